// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl wait`: poll until the daemon reaches a stage (Ctrl+C aborts).

use std::future::Future;

use anyhow::Result;
use kl_adapters::{HttpAdapter, PlatformProbe};
use kl_core::{LifecycleState, PollPolicy, Stage};
use kl_engine::Lifecycle;
use serde::Serialize;

use super::PollArgs;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

/// Conventional exit code for SIGINT.
const INTERRUPTED: i32 = 130;

#[derive(clap::Args, Debug)]
pub struct WaitArgs {
    /// Stage to wait for
    #[arg(long, default_value_t = Stage::Reachable)]
    pub until: Stage,

    #[command(flatten)]
    pub poll: PollArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitReport {
    pub until: Stage,
    pub state: LifecycleState,
}

pub async fn handle<P: PlatformProbe, H: HttpAdapter>(
    args: WaitArgs,
    lifecycle: &Lifecycle<P, H>,
    poll: PollPolicy,
    format: OutputFormat,
) -> Result<()> {
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let report = run(&args, lifecycle, poll, interrupt).await?;
    output::print(format, &report, || {
        color::state(report.state, color::should_colorize())
    })
}

/// Wait for the stage, or give up with exit 130 once `interrupt` resolves.
pub(crate) async fn run<P: PlatformProbe, H: HttpAdapter>(
    args: &WaitArgs,
    lifecycle: &Lifecycle<P, H>,
    poll: PollPolicy,
    interrupt: impl Future<Output = ()>,
) -> Result<WaitReport> {
    let policy = args.poll.policy(poll);
    tracing::info!(until = %args.until, attempts = policy.attempts, "waiting for daemon");
    tokio::select! {
        result = lifecycle.wait_for(args.until, policy) => Ok(WaitReport {
            until: args.until,
            state: result?,
        }),
        () = interrupt => Err(ExitError::new(INTERRUPTED, "interrupted").into()),
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
