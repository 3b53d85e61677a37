// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stage probe outcomes and the report assembled from them.

use crate::error::LifecycleError;
use crate::state::{LifecycleState, Stage};
use serde::Serialize;

/// Why a single stage did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProbeFailure {
    /// Host has no probe implementation
    Unsupported,
    /// Install artifact or daemon process not found
    Absent,
    /// Connection refused or dropped before a response arrived
    Refused { detail: String },
    TimedOut { timeout_ms: u64 },
    /// Daemon answered 401
    Unauthorized,
    /// Daemon answered with a status this stage cannot classify
    Status { status: u16 },
}

/// Outcome of one ladder stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ProbeResult {
    Passed,
    Failed { reason: ProbeFailure },
}

impl ProbeResult {
    pub fn failed(reason: ProbeFailure) -> Self {
        ProbeResult::Failed { reason }
    }

    pub fn from_bool(passed: bool) -> Self {
        if passed {
            ProbeResult::Passed
        } else {
            ProbeResult::failed(ProbeFailure::Absent)
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, ProbeResult::Passed)
    }

    /// Classify this outcome as a ladder state for `stage`.
    ///
    /// Network failures during the auth stage fold back to
    /// `NotReachable`: authentication is only meaningful once the API
    /// answers. An unclassifiable auth status leaves the ladder at
    /// `Reachable`.
    pub fn state_for(&self, stage: Stage) -> LifecycleState {
        match (self, stage) {
            (ProbeResult::Passed, stage) => stage.passed(),
            (ProbeResult::Failed { reason }, stage) => match (reason, stage) {
                (ProbeFailure::Unsupported, _) => LifecycleState::Unsupported,
                (
                    ProbeFailure::Refused { .. } | ProbeFailure::TimedOut { .. },
                    Stage::Authenticated,
                ) => LifecycleState::NotReachable,
                (ProbeFailure::Status { .. }, Stage::Authenticated) => LifecycleState::Reachable,
                (_, stage) => stage.failed(),
            },
        }
    }
}

/// Outcome of one stage, tagged with the stage it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    #[serde(flatten)]
    pub result: ProbeResult,
}

/// Resolved state plus the stage outcomes that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    pub state: LifecycleState,
    pub stages: Vec<StageReport>,
}

impl StateReport {
    pub fn unsupported() -> Self {
        Self {
            state: LifecycleState::Unsupported,
            stages: Vec::new(),
        }
    }

    /// The failure that ended resolution, if any.
    pub fn failure(&self) -> Option<&ProbeFailure> {
        self.stages.iter().find_map(|report| match &report.result {
            ProbeResult::Failed { reason } => Some(reason),
            ProbeResult::Passed => None,
        })
    }

    /// Error describing why the ladder stopped short of `target`.
    ///
    /// Returns `None` when `target` was reached.
    pub fn shortfall(&self, target: Stage) -> Option<LifecycleError> {
        if self.state.has_reached(target) {
            return None;
        }
        let timed_out = matches!(self.failure(), Some(ProbeFailure::TimedOut { .. }));
        Some(match self.state {
            LifecycleState::Unsupported => LifecycleError::Unsupported,
            LifecycleState::NotInstalled => LifecycleError::NotInstalled,
            LifecycleState::NotRunning => LifecycleError::NotRunning,
            LifecycleState::NotReachable => LifecycleError::NotReachable { timed_out },
            _ => LifecycleError::NotAuthenticated,
        })
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
