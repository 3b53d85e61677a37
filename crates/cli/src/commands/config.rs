// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl config`: print the effective capability and endpoint.

use std::fmt::Write;

use anyhow::Result;
use kl_core::{CommandSpec, Platform};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigView {
    pub source: Option<String>,
    pub platform: Platform,
    pub install_paths: Vec<String>,
    pub installed_path: Option<String>,
    pub process_name: String,
    pub process_list: String,
    pub installer: Vec<String>,
    pub launch_args: Vec<String>,
    pub base_url: String,
    pub reachable_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
}

impl ConfigView {
    pub fn new(settings: &Settings) -> Self {
        let config = &settings.config;
        let capability = &config.capability;
        Self {
            source: settings.source.as_ref().map(|p| p.display().to_string()),
            platform: capability.platform,
            install_paths: capability
                .install_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            installed_path: capability.installed_path().map(|p| p.display().to_string()),
            process_name: capability.process_name.clone(),
            process_list: command_line(&capability.process_list),
            installer: capability.installer.iter().map(command_line).collect(),
            launch_args: capability.launch_args.clone(),
            base_url: config.daemon.base_url.clone(),
            reachable_timeout_ms: config.daemon.timeouts.reachable.as_millis() as u64,
            request_timeout_ms: config.daemon.timeouts.request.as_millis() as u64,
            poll_attempts: config.poll.attempts,
            poll_interval_ms: config.poll.interval.as_millis() as u64,
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        let source = self.source.as_deref().unwrap_or("(defaults)");
        let installed = self.installed_path.as_deref().unwrap_or("-");
        let _ = writeln!(out, "source:          {}", source);
        let _ = writeln!(out, "platform:        {}", self.platform);
        let _ = writeln!(out, "install paths:   {}", self.install_paths.join(", "));
        let _ = writeln!(out, "installed at:    {}", installed);
        let _ = writeln!(out, "process:         {}", self.process_name);
        let _ = writeln!(out, "process list:    {}", self.process_list);
        for (i, step) in self.installer.iter().enumerate() {
            let _ = writeln!(out, "installer[{}]:    {}", i, step);
        }
        let _ = writeln!(out, "launch args:     {}", self.launch_args.join(" "));
        let _ = writeln!(out, "daemon url:      {}", self.base_url);
        let _ = writeln!(
            out,
            "timeouts:        reachable {}ms, request {}ms",
            self.reachable_timeout_ms, self.request_timeout_ms
        );
        let _ = write!(
            out,
            "poll:            {} attempts every {}ms",
            self.poll_attempts, self.poll_interval_ms
        );
        out
    }
}

fn command_line(command: &CommandSpec) -> String {
    std::iter::once(command.program.as_str())
        .chain(command.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn handle(settings: &Settings, format: OutputFormat) -> Result<()> {
    let view = ConfigView::new(settings);
    output::print(format, &view, || view.text())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
