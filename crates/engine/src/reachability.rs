// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness check against the daemon's local API.

use kl_adapters::{HttpAdapter, HttpError};
use kl_core::{ProbeFailure, ProbeResult};
use std::time::Duration;

/// Liveness path; any response means the daemon is answering.
pub const SYSTEM_PATH: &str = "/system";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// The API answered with some status
    Reachable { status: u16 },
    /// Nothing answered (refused, reset, or another transport error)
    Refused { detail: String },
    TimedOut { timeout_ms: u64 },
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable { .. })
    }

    pub fn probe_result(&self) -> ProbeResult {
        match self {
            Reachability::Reachable { .. } => ProbeResult::Passed,
            Reachability::Refused { detail } => ProbeResult::failed(ProbeFailure::Refused {
                detail: detail.clone(),
            }),
            Reachability::TimedOut { timeout_ms } => ProbeResult::failed(ProbeFailure::TimedOut {
                timeout_ms: *timeout_ms,
            }),
        }
    }
}

/// Classify a transport error as a probe failure.
pub(crate) fn network_failure(err: &HttpError) -> ProbeFailure {
    match err {
        HttpError::TimedOut { timeout_ms, .. } => ProbeFailure::TimedOut {
            timeout_ms: *timeout_ms,
        },
        HttpError::Refused { detail, .. } | HttpError::Transport { detail, .. } => {
            ProbeFailure::Refused {
                detail: detail.clone(),
            }
        }
    }
}

#[derive(Clone)]
pub struct ReachabilityClient<H> {
    http: H,
}

impl<H: HttpAdapter> ReachabilityClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn check_reachable(&self, timeout: Duration) -> Reachability {
        match self.http.get(SYSTEM_PATH, timeout).await {
            Ok(response) => Reachability::Reachable {
                status: response.status,
            },
            Err(HttpError::TimedOut { timeout_ms, .. }) => Reachability::TimedOut { timeout_ms },
            Err(HttpError::Refused { detail, .. } | HttpError::Transport { detail, .. }) => {
                Reachability::Refused { detail }
            }
        }
    }
}

#[cfg(test)]
#[path = "reachability_tests.rs"]
mod tests;
