// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure taxonomy shared by every probe and action.
//!
//! State resolution never returns these; it folds failures into a
//! [`LifecycleState`]. Only explicit actions (`install`, `launch`, waiting
//! for a stage) surface a [`LifecycleError`] to the caller.

use crate::state::LifecycleState;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Mutating action a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Install,
    Launch,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Install => write!(f, "install"),
            Action::Launch => write!(f, "launch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("the daemon is not supported on this platform")]
    Unsupported,

    #[error("the daemon is not installed")]
    NotInstalled,

    #[error("install failed ({}): {stderr}", exit_label(.exit_code))]
    InstallFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("the daemon is not running")]
    NotRunning,

    #[error("launch failed: {reason}")]
    LaunchFailed { reason: String },

    #[error("the daemon API is not reachable{}", timeout_suffix(.timed_out))]
    NotReachable { timed_out: bool },

    #[error("the daemon session is not authenticated")]
    NotAuthenticated,

    #[error("cannot {action} while the daemon is {state}")]
    BadState {
        action: Action,
        state: LifecycleState,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

fn timeout_suffix(timed_out: &bool) -> &'static str {
    if *timed_out {
        " (timed out)"
    } else {
        ""
    }
}

impl LifecycleError {
    /// The ladder state this failure corresponds to, when there is one.
    pub fn state(&self) -> Option<LifecycleState> {
        match self {
            LifecycleError::Unsupported => Some(LifecycleState::Unsupported),
            LifecycleError::NotInstalled | LifecycleError::InstallFailed { .. } => {
                Some(LifecycleState::NotInstalled)
            }
            LifecycleError::NotRunning | LifecycleError::LaunchFailed { .. } => {
                Some(LifecycleState::NotRunning)
            }
            LifecycleError::NotReachable { .. } => Some(LifecycleState::NotReachable),
            LifecycleError::NotAuthenticated => Some(LifecycleState::NotAuthenticated),
            LifecycleError::BadState { state, .. } => Some(*state),
        }
    }

    /// Whether retrying the same call later can succeed without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LifecycleError::NotRunning | LifecycleError::NotReachable { .. }
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
