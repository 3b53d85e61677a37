// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessAdapter, ProcessError, ProcessOutput};
use async_trait::async_trait;
use kl_core::CommandSpec;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Recorded process operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Output { command: CommandSpec, timeout: Duration },
    SpawnDetached { command: CommandSpec },
}

impl ProcessCall {
    pub fn command(&self) -> &CommandSpec {
        match self {
            ProcessCall::Output { command, .. } | ProcessCall::SpawnDetached { command } => command,
        }
    }
}

enum Scripted {
    Output(ProcessOutput),
    SpawnError,
    TimedOut,
}

type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct FakeProcessState {
    /// Per-program results; the last entry repeats
    scripts: HashMap<String, VecDeque<Scripted>>,
    failing_spawns: HashSet<String>,
    /// Side effects run after `program` is run or spawned
    hooks: HashMap<String, Hook>,
    calls: Vec<ProcessCall>,
    next_pid: u32,
}

/// Fake process adapter for testing
///
/// Commands are scripted by program name. Unscripted programs exit 1
/// with empty output.
#[derive(Clone, Default)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `program` with `output`.
    pub fn respond(&self, program: &str, output: ProcessOutput) {
        self.script(program, vec![Scripted::Output(output)]);
    }

    /// Answer `program` with each output in turn, repeating the last.
    pub fn respond_sequence(&self, program: &str, outputs: Vec<ProcessOutput>) {
        self.script(program, outputs.into_iter().map(Scripted::Output).collect());
    }

    /// Exit 0 with `stdout`.
    pub fn stdout(&self, program: &str, stdout: &str) {
        self.respond(
            program,
            ProcessOutput {
                exit_code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Exit with `code` and `stderr`.
    pub fn exit(&self, program: &str, code: i32, stderr: &str) {
        self.respond(
            program,
            ProcessOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// `program` cannot be started.
    pub fn fail_spawn(&self, program: &str) {
        self.script(program, vec![Scripted::SpawnError]);
        self.inner.lock().failing_spawns.insert(program.to_string());
    }

    /// `program` never finishes.
    pub fn time_out(&self, program: &str) {
        self.script(program, vec![Scripted::TimedOut]);
    }

    /// Run `hook` each time `program` is run or spawned, e.g. to create the
    /// files an installer would leave behind.
    pub fn on_run(&self, program: &str, hook: impl Fn() + Send + Sync + 'static) {
        self.inner
            .lock()
            .hooks
            .insert(program.to_string(), Arc::new(hook));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner.lock().calls.clone()
    }

    /// Programs run to completion or spawned, in call order
    pub fn programs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.command().program.clone())
            .collect()
    }

    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProcessCall::SpawnDetached { command } => Some(command),
                ProcessCall::Output { .. } => None,
            })
            .collect()
    }

    fn run_hook(&self, program: &str) {
        let hook = self.inner.lock().hooks.get(program).cloned();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn script(&self, program: &str, results: Vec<Scripted>) {
        self.inner
            .lock()
            .scripts
            .insert(program.to_string(), results.into());
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn output(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let result = self.scripted_output(command, timeout);
        self.run_hook(&command.program);
        result
    }

    async fn spawn_detached(&self, command: &CommandSpec) -> Result<Option<u32>, ProcessError> {
        let result = self.record_spawn(command);
        self.run_hook(&command.program);
        result
    }
}

impl FakeProcessAdapter {
    fn scripted_output(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::Output {
            command: command.clone(),
            timeout,
        });

        let Some(script) = inner.scripts.get_mut(&command.program) else {
            return Ok(ProcessOutput {
                exit_code: Some(1),
                ..ProcessOutput::default()
            });
        };
        let scripted = if script.len() > 1 {
            script.pop_front()
        } else {
            None
        };
        match scripted.as_ref().or(script.front()) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::SpawnError) => Err(ProcessError::Spawn {
                command: command.program.clone(),
                reason: "No such file or directory".to_string(),
            }),
            Some(Scripted::TimedOut) => Err(ProcessError::TimedOut {
                command: command.program.clone(),
                timeout_ms: timeout.as_millis() as u64,
            }),
            None => Ok(ProcessOutput::default()),
        }
    }

    fn record_spawn(&self, command: &CommandSpec) -> Result<Option<u32>, ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::SpawnDetached {
            command: command.clone(),
        });
        if inner.failing_spawns.contains(&command.program) {
            return Err(ProcessError::Spawn {
                command: command.program.clone(),
                reason: "No such file or directory".to_string(),
            });
        }
        inner.next_pid += 1;
        Ok(Some(1000 + inner.next_pid))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
