// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod install;
pub mod launch;
pub mod status;
pub mod wait;
pub mod whitelisted;

use anyhow::Result;
use kl_adapters::{
    HostProbe, ReqwestHttpAdapter, SystemProcessAdapter, TracedHttp, TracedProcess,
};
use kl_core::{LifecycleConfig, LifecycleState, PollPolicy};
use kl_engine::{ActionOutcome, Lifecycle};
use serde::Serialize;
use std::time::Duration;

#[cfg(test)]
pub(crate) mod fixture;

pub type SystemLifecycle = Lifecycle<
    HostProbe<TracedProcess<SystemProcessAdapter>>,
    TracedHttp<ReqwestHttpAdapter>,
>;

/// Wire the real host adapters into an orchestrator.
pub fn system_lifecycle(config: &LifecycleConfig) -> Result<SystemLifecycle> {
    let process = TracedProcess::new(SystemProcessAdapter::new());
    let probe = HostProbe::new(config.capability.clone(), process);
    let http = TracedHttp::new(ReqwestHttpAdapter::new(config.daemon.base_url.clone())?);
    Ok(Lifecycle::new(probe, http, config.daemon.timeouts))
}

/// Poll overrides shared by commands that wait.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PollArgs {
    /// Number of state checks before giving up
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Delay between state checks in milliseconds
    #[arg(long = "interval-ms")]
    pub interval_ms: Option<u64>,
}

impl PollArgs {
    pub fn policy(&self, base: PollPolicy) -> PollPolicy {
        PollPolicy {
            attempts: self.attempts.unwrap_or(base.attempts),
            interval: self
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(base.interval),
        }
    }
}

/// Result of `install` or `launch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReport {
    pub action: kl_core::Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ActionOutcome>,
    pub state: LifecycleState,
}

impl ActionReport {
    pub fn text(&self) -> String {
        let verb = match self.action {
            kl_core::Action::Install => "installed",
            kl_core::Action::Launch => "launched",
        };
        match self.outcome {
            Some(ActionOutcome::Performed) => format!("daemon {} ({})", verb, self.state),
            Some(ActionOutcome::AlreadySatisfied) => {
                format!("daemon already {} ({})", verb, self.state)
            }
            None => format!("daemon {} ({})", verb, self.state),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
