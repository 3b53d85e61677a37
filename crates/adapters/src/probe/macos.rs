// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! macOS probe: app bundle in `/Applications`, launched through `open`.

use super::native::NativeProbe;
use super::{InstallOptions, PlatformProbe};
use crate::process::ProcessAdapter;
use crate::subprocess::LAUNCH_TIMEOUT;
use async_trait::async_trait;
use kl_core::capability::MACOS_BUNDLE_ID;
use kl_core::{CommandSpec, LifecycleError, Platform, PlatformCapability};

#[derive(Clone)]
pub struct MacProbe<P> {
    native: NativeProbe<P>,
}

impl<P: ProcessAdapter> MacProbe<P> {
    pub fn new(capability: PlatformCapability, process: P) -> Self {
        Self {
            native: NativeProbe::new(capability, process),
        }
    }

    /// Stop the app from reopening its sidebar window on plugin launch.
    async fn suppress_sidebar(&self) {
        let defaults = CommandSpec::new(
            "defaults",
            ["write", MACOS_BUNDLE_ID, "shouldReopenSidebar", "0"],
        );
        match self.native.process.output(&defaults, LAUNCH_TIMEOUT).await {
            Ok(output) if output.success() => {}
            Ok(output) => tracing::debug!(exit_code = ?output.exit_code, "defaults write exited non-zero"),
            Err(e) => tracing::debug!(error = %e, "defaults write failed"),
        }
    }
}

#[async_trait]
impl<P: ProcessAdapter> PlatformProbe for MacProbe<P> {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    async fn is_supported(&self) -> bool {
        self.native.meets_min_release().await
    }

    async fn is_installed(&self) -> bool {
        self.native.is_installed()
    }

    async fn is_running(&self) -> bool {
        let name = &self.native.capability.process_name;
        match self.native.process_listing().await {
            Some(listing) => !name.is_empty() && listing.contains(name.as_str()),
            None => false,
        }
    }

    async fn is_admin(&self) -> bool {
        self.native.is_admin().await
    }

    async fn requires_admin(&self) -> bool {
        self.native.requires_admin().await
    }

    async fn install(&self, options: &InstallOptions) -> Result<(), LifecycleError> {
        self.native.install(options).await
    }

    async fn launch(&self) -> Result<(), LifecycleError> {
        let bundle = self
            .native
            .installed_path()
            .ok_or(LifecycleError::NotInstalled)?
            .display()
            .to_string();
        self.suppress_sidebar().await;

        let capability = &self.native.capability;
        let mut args = vec!["-a".to_string(), bundle];
        if !capability.launch_args.is_empty() {
            args.push("--args".to_string());
            args.extend(capability.launch_args.iter().cloned());
        }
        let open = CommandSpec {
            program: "open".to_string(),
            args,
            env: capability.launch_env.clone(),
        };
        let output = self
            .native
            .process
            .output(&open, LAUNCH_TIMEOUT)
            .await
            .map_err(|e| LifecycleError::LaunchFailed {
                reason: e.to_string(),
            })?;
        if !output.success() {
            let stderr = output.stderr.trim();
            return Err(LifecycleError::LaunchFailed {
                reason: if stderr.is_empty() {
                    format!("open exited with {:?}", output.exit_code)
                } else {
                    stderr.to_string()
                },
            });
        }
        tracing::info!("daemon launched");
        Ok(())
    }
}

#[cfg(test)]
#[path = "macos_tests.rs"]
mod tests;
