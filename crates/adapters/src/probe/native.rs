// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behaviour shared by the macOS, Windows and Linux probes.

use super::InstallOptions;
use crate::process::{ProcessAdapter, ProcessOutput};
use crate::subprocess::{HOST_QUERY_TIMEOUT, INSTALL_STEP_TIMEOUT, PROCESS_LIST_TIMEOUT};
use kl_core::capability::{INSTALLER_PLACEHOLDER, INSTALL_PATH_PLACEHOLDER};
use kl_core::{CommandSpec, LifecycleError, PlatformCapability};
use std::path::Path;

#[derive(Clone)]
pub(super) struct NativeProbe<P> {
    pub(super) capability: PlatformCapability,
    pub(super) process: P,
}

impl<P: ProcessAdapter> NativeProbe<P> {
    pub(super) fn new(capability: PlatformCapability, process: P) -> Self {
        Self {
            capability,
            process,
        }
    }

    pub(super) fn installed_path(&self) -> Option<&Path> {
        self.capability.installed_path()
    }

    pub(super) fn is_installed(&self) -> bool {
        let found = self.installed_path();
        tracing::debug!(path = ?found, "install artifact check");
        found.is_some()
    }

    /// Stdout of a successful run of `command`, or `None`.
    pub(super) async fn query(&self, command: &CommandSpec) -> Option<ProcessOutput> {
        match self.process.output(command, HOST_QUERY_TIMEOUT).await {
            Ok(output) if output.success() => Some(output),
            Ok(output) => {
                tracing::debug!(command = %command, exit_code = ?output.exit_code, "query exited non-zero");
                None
            }
            Err(e) => {
                tracing::debug!(command = %command, error = %e, "query failed");
                None
            }
        }
    }

    /// Process listing text, or `None` when the listing cannot be taken.
    pub(super) async fn process_listing(&self) -> Option<String> {
        let command = &self.capability.process_list;
        if command.program.is_empty() {
            return None;
        }
        match self.process.output(command, PROCESS_LIST_TIMEOUT).await {
            Ok(output) if output.success() => Some(output.stdout),
            Ok(output) => {
                tracing::warn!(
                    command = %command,
                    exit_code = ?output.exit_code,
                    "process listing exited non-zero, treating daemon as not running"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "process listing failed, treating daemon as not running");
                None
            }
        }
    }

    /// Whether the host kernel meets the capability's minimum release.
    pub(super) async fn meets_min_release(&self) -> bool {
        let Some(min) = self.capability.min_os_release else {
            return true;
        };
        let uname = CommandSpec::new("uname", ["-r"]);
        let Some(output) = self.query(&uname).await else {
            return false;
        };
        match parse_major_release(&output.stdout) {
            Some(major) => major >= min,
            None => {
                tracing::warn!(release = output.stdout.trim(), "unrecognised kernel release");
                false
            }
        }
    }

    pub(super) async fn is_admin(&self) -> bool {
        let admin = &self.capability.admin;
        let Some(check) = &admin.check else {
            return false;
        };
        let Some(output) = self.query(check).await else {
            return false;
        };
        match &admin.check_token {
            Some(token) => output.stdout.split_whitespace().any(|t| t == token),
            None => true,
        }
    }

    pub(super) async fn requires_admin(&self) -> bool {
        self.capability.admin.install_requires_admin && !self.is_admin().await
    }

    pub(super) async fn install(&self, options: &InstallOptions) -> Result<(), LifecycleError> {
        if self.capability.installer.is_empty() {
            return Err(install_error(None, "no installer configured for this platform"));
        }
        let artifact = options
            .installer_path
            .clone()
            .or_else(|| self.capability.installer_artifact.clone());
        let needs_artifact = self
            .capability
            .installer
            .iter()
            .any(|step| mentions(step, INSTALLER_PLACEHOLDER));
        if needs_artifact {
            match &artifact {
                Some(path) if path.exists() => {}
                Some(path) => {
                    return Err(install_error(
                        None,
                        &format!("installer not found at {}", path.display()),
                    ));
                }
                None => return Err(install_error(None, "no installer package configured")),
            }
        }

        let requires_admin = self.requires_admin().await;
        tracing::info!(platform = %self.capability.platform, requires_admin, "installing");
        let elevation = if requires_admin {
            match &self.capability.admin.elevation {
                Some(prefix) => Some(prefix.clone()),
                None => {
                    tracing::warn!("install needs administrator rights, running installer as current user");
                    None
                }
            }
        } else {
            None
        };

        for step in &self.capability.installer {
            let command = self.resolve_step(step, artifact.as_deref(), elevation.as_ref());
            tracing::info!(command = %command, "running installer step");
            let output = self
                .process
                .output(&command, INSTALL_STEP_TIMEOUT)
                .await
                .map_err(|e| install_error(None, &e.to_string()))?;
            if !output.success() {
                return Err(install_error(output.exit_code, output.stderr.trim()));
            }
        }

        if !self.is_installed() {
            let expected = self
                .capability
                .primary_install_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            return Err(install_error(
                Some(0),
                &format!("installer finished but {} is missing", expected),
            ));
        }

        if options.remove_installer {
            if let Some(path) = &artifact {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove installer");
                }
            }
        }
        Ok(())
    }

    /// Spawn the installed executable detached with the launch args and env.
    pub(super) async fn launch_detached(&self) -> Result<(), LifecycleError> {
        let path = self.installed_path().ok_or(LifecycleError::NotInstalled)?;
        let command = CommandSpec {
            program: path.display().to_string(),
            args: self.capability.launch_args.clone(),
            env: self.capability.launch_env.clone(),
        };
        let pid = self
            .process
            .spawn_detached(&command)
            .await
            .map_err(|e| LifecycleError::LaunchFailed {
                reason: e.to_string(),
            })?;
        tracing::info!(pid = ?pid, "daemon launched");
        Ok(())
    }

    fn resolve_step(
        &self,
        step: &CommandSpec,
        artifact: Option<&Path>,
        elevation: Option<&CommandSpec>,
    ) -> CommandSpec {
        let mut command = step.clone();
        if let Some(artifact) = artifact {
            command = command.substitute(INSTALLER_PLACEHOLDER, &artifact.display().to_string());
        }
        if let Some(install_path) = self.capability.primary_install_path() {
            command = command.substitute(
                INSTALL_PATH_PLACEHOLDER,
                &install_path.display().to_string(),
            );
        }
        match elevation {
            Some(prefix) => command.prefixed(prefix),
            None => command,
        }
    }
}

fn mentions(step: &CommandSpec, placeholder: &str) -> bool {
    step.program.contains(placeholder) || step.args.iter().any(|arg| arg.contains(placeholder))
}

fn install_error(exit_code: Option<i32>, stderr: &str) -> LifecycleError {
    LifecycleError::InstallFailed {
        exit_code,
        stderr: stderr.to_string(),
    }
}

/// Major component of a kernel release string such as `21.6.0`.
pub(super) fn parse_major_release(release: &str) -> Option<u32> {
    release.trim().split('.').next()?.parse().ok()
}
