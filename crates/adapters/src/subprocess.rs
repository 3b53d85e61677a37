// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use crate::process::ProcessError;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for process listing commands (`ps`, `tasklist`).
pub const PROCESS_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for admin checks and `uname`.
pub const HOST_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for a single installer step.
/// Set to 10 minutes to cover copying the app bundle from a mounted image.
pub const INSTALL_STEP_TIMEOUT: Duration = Duration::from_secs(600);

/// Default timeout for launch helpers that exit once the app is started.
pub const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`. The child is
/// spawned with `kill_on_drop`, so it is killed when the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, ProcessError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(ProcessError::Spawn {
            command: description.to_string(),
            reason: io_err.to_string(),
        }),
        Err(_elapsed) => Err(ProcessError::TimedOut {
            command: description.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
