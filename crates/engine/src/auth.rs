// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session authentication check.

use crate::reachability::network_failure;
use kl_adapters::HttpAdapter;
use kl_core::{ProbeFailure, ProbeResult};
use std::time::Duration;

pub const AUTHENTICATED_PATH: &str = "/clientapi/account/authenticated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// 200
    Authenticated,
    /// 401; a steady state, not an error
    NotAuthenticated,
    /// No response; reachability has regressed since the liveness check
    Unreachable(ProbeFailure),
    /// Any other status
    UnexpectedStatus(u16),
}

impl AuthStatus {
    pub fn probe_result(&self) -> ProbeResult {
        match self {
            AuthStatus::Authenticated => ProbeResult::Passed,
            AuthStatus::NotAuthenticated => ProbeResult::failed(ProbeFailure::Unauthorized),
            AuthStatus::Unreachable(failure) => ProbeResult::failed(failure.clone()),
            AuthStatus::UnexpectedStatus(status) => {
                ProbeResult::failed(ProbeFailure::Status { status: *status })
            }
        }
    }
}

#[derive(Clone)]
pub struct AuthClient<H> {
    http: H,
}

impl<H: HttpAdapter> AuthClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn check_authenticated(&self, timeout: Duration) -> AuthStatus {
        match self.http.get(AUTHENTICATED_PATH, timeout).await {
            Ok(response) => match response.status {
                200 => AuthStatus::Authenticated,
                401 => AuthStatus::NotAuthenticated,
                status => {
                    tracing::warn!(status, "unexpected status from auth check");
                    AuthStatus::UnexpectedStatus(status)
                }
            },
            Err(e) => AuthStatus::Unreachable(network_failure(&e)),
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
