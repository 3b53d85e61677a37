// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl launch`: start the daemon unless it is already running.

use anyhow::Result;
use kl_adapters::{HttpAdapter, PlatformProbe};
use kl_core::{Action, PollPolicy, Stage};
use kl_engine::Lifecycle;

use super::{ActionReport, PollArgs};
use crate::output::{self, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct LaunchArgs {
    /// Keep checking until the daemon API answers
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

pub async fn handle<P: PlatformProbe, H: HttpAdapter>(
    args: LaunchArgs,
    lifecycle: &Lifecycle<P, H>,
    poll: PollPolicy,
    format: OutputFormat,
) -> Result<()> {
    let report = run(&args, lifecycle, poll).await?;
    output::print(format, &report, || report.text())
}

pub(crate) async fn run<P: PlatformProbe, H: HttpAdapter>(
    args: &LaunchArgs,
    lifecycle: &Lifecycle<P, H>,
    poll: PollPolicy,
) -> Result<ActionReport> {
    if args.wait {
        let policy = args.poll.policy(poll);
        let state = lifecycle.launch_and_wait(policy).await?;
        return Ok(ActionReport {
            action: Action::Launch,
            outcome: None,
            state,
        });
    }
    let outcome = lifecycle.launch().await?;
    Ok(ActionReport {
        action: Action::Launch,
        outcome: Some(outcome),
        state: lifecycle.resolve_until(Stage::Running).await,
    })
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
