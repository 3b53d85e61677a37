// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl install`: run the platform installer unless already installed.

use std::path::PathBuf;

use anyhow::Result;
use kl_adapters::{HttpAdapter, InstallOptions, PlatformProbe};
use kl_core::{Action, Stage};
use kl_engine::Lifecycle;

use super::ActionReport;
use crate::output::{self, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Installer package to use instead of the configured artifact
    #[arg(long, value_name = "PATH")]
    pub installer: Option<PathBuf>,

    /// Leave the installer package in place after a successful install
    /// (a package given with --installer is never removed)
    #[arg(long)]
    pub keep_installer: bool,
}

impl InstallArgs {
    fn options(&self) -> InstallOptions {
        InstallOptions {
            installer_path: self.installer.clone(),
            remove_installer: self.installer.is_none() && !self.keep_installer,
        }
    }
}

pub async fn handle<P: PlatformProbe, H: HttpAdapter>(
    args: InstallArgs,
    lifecycle: &Lifecycle<P, H>,
    format: OutputFormat,
) -> Result<()> {
    let report = run(&args, lifecycle).await?;
    output::print(format, &report, || report.text())
}

pub(crate) async fn run<P: PlatformProbe, H: HttpAdapter>(
    args: &InstallArgs,
    lifecycle: &Lifecycle<P, H>,
) -> Result<ActionReport> {
    let outcome = lifecycle.install(&args.options()).await?;
    Ok(ActionReport {
        action: Action::Install,
        outcome: Some(outcome),
        state: lifecycle.resolve_until(Stage::Installed).await,
    })
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
