// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl status`: where the daemon stands on the lifecycle ladder.

use std::fmt::Write;

use anyhow::Result;
use kl_adapters::{HttpAdapter, PlatformProbe};
use kl_core::{ProbeFailure, ProbeResult, Stage, StateReport};
use kl_engine::Lifecycle;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Stop checking after this stage
    #[arg(long, default_value_t = Stage::Authenticated)]
    pub until: Stage,

    /// Show the outcome of every stage checked
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with code 2 unless the target stage is reached
    #[arg(long)]
    pub check: bool,
}

pub async fn handle<P: PlatformProbe, H: HttpAdapter>(
    args: StatusArgs,
    lifecycle: &Lifecycle<P, H>,
    format: OutputFormat,
) -> Result<()> {
    let report = lifecycle.diagnose_until(args.until).await;
    output::print(format, &report, || {
        format_report(&report, args.verbose, color::should_colorize())
    })?;
    if args.check && !report.state.has_reached(args.until) {
        return Err(ExitError::silent(2).into());
    }
    Ok(())
}

pub(crate) fn format_report(report: &StateReport, verbose: bool, colorize: bool) -> String {
    let mut out = color::state(report.state, colorize);
    if !verbose {
        return out;
    }
    for stage in &report.stages {
        let outcome = match &stage.result {
            ProbeResult::Passed => "passed".to_string(),
            ProbeResult::Failed { reason } => format!("failed: {}", describe_failure(reason)),
        };
        let label = format!("{:<14}", stage.stage.as_str());
        let _ = write!(out, "\n  {}{}", color::context(&label, colorize), outcome);
    }
    out
}

fn describe_failure(reason: &ProbeFailure) -> String {
    match reason {
        ProbeFailure::Unsupported => "platform not supported".to_string(),
        ProbeFailure::Absent => "not found".to_string(),
        ProbeFailure::Refused { detail } => format!("connection refused ({})", detail),
        ProbeFailure::TimedOut { timeout_ms } => format!("timed out after {}ms", timeout_ms),
        ProbeFailure::Unauthorized => "not logged in".to_string(),
        ProbeFailure::Status { status } => format!("unexpected status {}", status),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
