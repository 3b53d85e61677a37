// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::http::{HttpAdapter, HttpError, HttpResponse};
use crate::process::{ProcessAdapter, ProcessError, ProcessOutput};
use async_trait::async_trait;
use kl_core::CommandSpec;
use std::time::Duration;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessAdapter
#[derive(Clone)]
pub struct TracedProcess<P> {
    inner: P,
}

impl<P> TracedProcess<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: ProcessAdapter> ProcessAdapter for TracedProcess<P> {
    async fn output(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let span = tracing::info_span!("process.output", program = %command.program);
        async {
            tracing::debug!(command = %command, timeout_ms = timeout.as_millis() as u64, "starting");
            let start = std::time::Instant::now();
            let result = self.inner.output(command, timeout).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(output) => tracing::info!(exit_code = ?output.exit_code, elapsed_ms, "finished"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn spawn_detached(&self, command: &CommandSpec) -> Result<Option<u32>, ProcessError> {
        let result = self.inner.spawn_detached(command).await;
        tracing::info_span!("process.spawn", program = %command.program).in_scope(|| match &result {
            Ok(pid) => tracing::info!(pid = ?pid, "spawned detached"),
            Err(e) => tracing::error!(error = %e, "spawn failed"),
        });
        result
    }
}

/// Wrapper that adds tracing to any HttpAdapter
#[derive(Clone)]
pub struct TracedHttp<H> {
    inner: H,
}

impl<H> TracedHttp<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<H: HttpAdapter> HttpAdapter for TracedHttp<H> {
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpResponse, HttpError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.get(path, timeout).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(response) => tracing::info!(status = response.status, elapsed_ms, "response"),
                // Refusals are routine while the daemon is down
                Err(e) => tracing::debug!(elapsed_ms, error = %e, "no response"),
            }
            result
        }
        .instrument(tracing::info_span!("http.get", path))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
