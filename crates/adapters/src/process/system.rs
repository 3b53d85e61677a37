// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process adapter backed by `tokio::process`

use super::{ProcessAdapter, ProcessError, ProcessOutput};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use kl_core::CommandSpec;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Runs commands on the host
#[derive(Clone, Default)]
pub struct SystemProcessAdapter;

impl SystemProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).envs(&spec.env);
    cmd
}

#[async_trait]
impl ProcessAdapter for SystemProcessAdapter {
    async fn output(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut cmd = build_command(command);
        cmd.stdin(Stdio::null());
        let output = run_with_timeout(cmd, timeout, &command.program).await?;
        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn spawn_detached(&self, command: &CommandSpec) -> Result<Option<u32>, ProcessError> {
        let mut cmd = build_command(command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Own process group so the daemon survives our exit and terminal signals
        #[cfg(unix)]
        cmd.process_group(0);
        #[cfg(windows)]
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);

        let child = cmd.spawn().map_err(|e| ProcessError::Spawn {
            command: command.program.clone(),
            reason: e.to_string(),
        })?;
        Ok(child.id())
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
