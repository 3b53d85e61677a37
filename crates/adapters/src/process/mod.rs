// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External process adapters

mod system;

pub use system::SystemProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessAdapter, ProcessCall};

use async_trait::async_trait;
use kl_core::CommandSpec;
use std::time::Duration;
use thiserror::Error;

/// Errors from process operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("{command} failed to start: {reason}")]
    Spawn { command: String, reason: String },
    #[error("{command} timed out after {timeout_ms}ms")]
    TimedOut { command: String, timeout_ms: u64 },
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Adapter for running host commands
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Run `command` to completion, capturing its output.
    ///
    /// A non-zero exit is not an error; callers inspect the exit code.
    async fn output(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;

    /// Start `command` detached from this process and return its pid.
    async fn spawn_detached(&self, command: &CommandSpec) -> Result<Option<u32>, ProcessError>;
}
