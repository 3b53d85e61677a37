// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle ladder states and the stages that move between them.
//!
//! A [`LifecycleState`] is never stored. Every observation re-probes the
//! host and the daemon, walking [`Stage::LADDER`] from the top and stopping
//! at the first stage that fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Observed position of the daemon on the lifecycle ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    /// No probe exists for this host
    Unsupported,
    NotInstalled,
    Installed,
    NotRunning,
    Running,
    /// Process exists but the local API is not answering
    NotReachable,
    Reachable,
    /// API answers but the session is logged out
    NotAuthenticated,
    Authenticated,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Unsupported => "unsupported",
            LifecycleState::NotInstalled => "not-installed",
            LifecycleState::Installed => "installed",
            LifecycleState::NotRunning => "not-running",
            LifecycleState::Running => "running",
            LifecycleState::NotReachable => "not-reachable",
            LifecycleState::Reachable => "reachable",
            LifecycleState::NotAuthenticated => "not-authenticated",
            LifecycleState::Authenticated => "authenticated",
        }
    }

    /// Whether observing this state implies `stage` was verified.
    ///
    /// `NotRunning` implies the daemon is installed, `NotAuthenticated`
    /// implies it is reachable, and so on down the ladder.
    pub fn has_reached(self, stage: Stage) -> bool {
        self.verified_depth() >= stage.depth()
    }

    /// Number of ladder stages this state proves passed.
    fn verified_depth(self) -> u8 {
        match self {
            LifecycleState::Unsupported | LifecycleState::NotInstalled => 0,
            LifecycleState::Installed | LifecycleState::NotRunning => 1,
            LifecycleState::Running | LifecycleState::NotReachable => 2,
            LifecycleState::Reachable | LifecycleState::NotAuthenticated => 3,
            LifecycleState::Authenticated => 4,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rung of the ladder. Each stage has a passing and a failing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Installed,
    Running,
    Reachable,
    Authenticated,
}

impl Stage {
    /// Stages in the order they are verified.
    pub const LADDER: [Stage; 4] = [
        Stage::Installed,
        Stage::Running,
        Stage::Reachable,
        Stage::Authenticated,
    ];

    /// State reported when this stage is the deepest one verified.
    pub fn passed(self) -> LifecycleState {
        match self {
            Stage::Installed => LifecycleState::Installed,
            Stage::Running => LifecycleState::Running,
            Stage::Reachable => LifecycleState::Reachable,
            Stage::Authenticated => LifecycleState::Authenticated,
        }
    }

    /// State reported when this stage is the first to fail.
    pub fn failed(self) -> LifecycleState {
        match self {
            Stage::Installed => LifecycleState::NotInstalled,
            Stage::Running => LifecycleState::NotRunning,
            Stage::Reachable => LifecycleState::NotReachable,
            Stage::Authenticated => LifecycleState::NotAuthenticated,
        }
    }

    /// Stages from the top of the ladder down to and including `self`.
    pub fn through(self) -> impl Iterator<Item = Stage> {
        Stage::LADDER.into_iter().take_while(move |s| *s <= self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Installed => "installed",
            Stage::Running => "running",
            Stage::Reachable => "reachable",
            Stage::Authenticated => "authenticated",
        }
    }

    fn depth(self) -> u8 {
        match self {
            Stage::Installed => 1,
            Stage::Running => 2,
            Stage::Reachable => 3,
            Stage::Authenticated => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage '{0}' (expected installed, running, reachable or authenticated)")]
pub struct ParseStageError(pub String);

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "installed" => Ok(Stage::Installed),
            "running" => Ok(Stage::Running),
            "reachable" => Ok(Stage::Reachable),
            "authenticated" => Ok(Stage::Authenticated),
            _ => Err(ParseStageError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
