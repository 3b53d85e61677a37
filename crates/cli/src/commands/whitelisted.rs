// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl whitelisted`: whether a project path may use daemon features.

use std::path::{Path, PathBuf};

use anyhow::Result;
use kl_adapters::{HttpAdapter, PlatformProbe};
use kl_core::whitelist::normalize;
use kl_core::LifecycleState;
use kl_engine::Lifecycle;
use serde::Serialize;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct WhitelistedArgs {
    /// Project path to check (relative paths resolve against the cwd)
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhitelistReport {
    pub path: String,
    pub state: LifecycleState,
    pub whitelisted: bool,
}

impl WhitelistReport {
    fn text(&self) -> String {
        if self.whitelisted {
            format!("{} is whitelisted", self.path)
        } else if self.state == LifecycleState::Authenticated {
            format!("{} is not whitelisted", self.path)
        } else {
            format!("{} is not whitelisted (daemon {})", self.path, self.state)
        }
    }
}

pub async fn handle<P: PlatformProbe, H: HttpAdapter>(
    args: WhitelistedArgs,
    lifecycle: &Lifecycle<P, H>,
    format: OutputFormat,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let report = run(&absolute(&cwd, &args.path), lifecycle).await;
    output::print(format, &report, || report.text())?;
    if !report.whitelisted {
        return Err(ExitError::silent(2).into());
    }
    Ok(())
}

pub(crate) async fn run<P: PlatformProbe, H: HttpAdapter>(
    path: &Path,
    lifecycle: &Lifecycle<P, H>,
) -> WhitelistReport {
    let path = path.display().to_string();
    let authorization = lifecycle.authorize_path(&path).await;
    WhitelistReport {
        path,
        state: authorization.state,
        whitelisted: authorization.whitelisted,
    }
}

/// Join onto the cwd and resolve `.`/`..` so the reported path is the one checked.
fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    PathBuf::from(normalize(&joined.display().to_string()))
}

#[cfg(test)]
#[path = "whitelisted_tests.rs"]
mod tests;
