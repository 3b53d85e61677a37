// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reads the daemon's path-inclusion settings.

use kl_adapters::HttpAdapter;
use kl_core::WhitelistSet;
use std::time::Duration;

pub const INCLUSIONS_PATH: &str = "/clientapi/settings/inclusions";

#[derive(Clone)]
pub struct WhitelistClient<H> {
    http: H,
}

impl<H: HttpAdapter> WhitelistClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Fetch whitelisted path prefixes.
    ///
    /// Every failure yields the empty set.
    pub async fn fetch_whitelisted_paths(&self, timeout: Duration) -> WhitelistSet {
        let response = match self.http.get(INCLUSIONS_PATH, timeout).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "whitelist fetch failed");
                return WhitelistSet::default();
            }
        };
        if response.status != 200 {
            tracing::warn!(status = response.status, "whitelist fetch rejected");
            return WhitelistSet::default();
        }
        match WhitelistSet::try_from_json(&response.body) {
            Ok(set) => {
                tracing::debug!(count = set.len(), "whitelist fetched");
                set
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed whitelist response");
                WhitelistSet::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
