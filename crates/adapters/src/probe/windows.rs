// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Windows probe: `kited.exe` found through `tasklist`.

use super::native::NativeProbe;
use super::{InstallOptions, PlatformProbe};
use crate::process::ProcessAdapter;
use async_trait::async_trait;
use kl_core::{LifecycleError, Platform, PlatformCapability};

#[derive(Clone)]
pub struct WindowsProbe<P> {
    native: NativeProbe<P>,
}

impl<P: ProcessAdapter> WindowsProbe<P> {
    pub fn new(capability: PlatformCapability, process: P) -> Self {
        Self {
            native: NativeProbe::new(capability, process),
        }
    }
}

#[async_trait]
impl<P: ProcessAdapter> PlatformProbe for WindowsProbe<P> {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    async fn is_supported(&self) -> bool {
        self.native.meets_min_release().await
    }

    async fn is_installed(&self) -> bool {
        self.native.is_installed()
    }

    /// Image names are case-insensitive on Windows.
    async fn is_running(&self) -> bool {
        let name = self.native.capability.process_name.to_ascii_lowercase();
        match self.native.process_listing().await {
            Some(listing) => !name.is_empty() && listing.to_ascii_lowercase().contains(&name),
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
        self.native.launch_detached().await
    }
}

#[cfg(test)]
#[path = "windows_tests.rs"]
mod tests;
