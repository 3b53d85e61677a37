// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform probes: install and run-state questions plus install/launch
//! actions, one implementation per host OS.
//!
//! A probe is chosen once at startup from the capability's platform
//! ([`HostProbe::new`]). Read-only questions never fail: anything that
//! goes wrong while asking them reads as "no".

mod linux;
mod macos;
mod native;
mod unsupported;
mod windows;

pub use linux::LinuxProbe;
pub use macos::MacProbe;
pub use unsupported::UnsupportedProbe;
pub use windows::WindowsProbe;

use crate::process::ProcessAdapter;
use async_trait::async_trait;
use kl_core::{LifecycleError, Platform, PlatformCapability};
use std::path::PathBuf;

/// Options for an explicit install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Installer package to run instead of the capability's default
    pub installer_path: Option<PathBuf>,
    /// Delete the installer package after a successful install
    pub remove_installer: bool,
}

#[async_trait]
pub trait PlatformProbe: Send + Sync + 'static {
    fn platform(&self) -> Platform;

    /// Whether this host can run the daemon at all.
    async fn is_supported(&self) -> bool;

    async fn is_installed(&self) -> bool;

    /// Whether the daemon appears in the process listing.
    async fn is_running(&self) -> bool;

    async fn is_admin(&self) -> bool;

    /// Whether install must be run with elevated privileges.
    async fn requires_admin(&self) -> bool;

    /// Run the installer steps, then verify the install artifact exists.
    async fn install(&self, options: &InstallOptions) -> Result<(), LifecycleError>;

    /// Start the daemon in the background.
    async fn launch(&self) -> Result<(), LifecycleError>;
}

/// Probe for the host platform, selected from a capability.
#[derive(Clone)]
pub enum HostProbe<P> {
    MacOs(MacProbe<P>),
    Windows(WindowsProbe<P>),
    Linux(LinuxProbe<P>),
    Unsupported(UnsupportedProbe),
}

impl<P: ProcessAdapter> HostProbe<P> {
    pub fn new(capability: PlatformCapability, process: P) -> Self {
        match capability.platform {
            Platform::MacOs => HostProbe::MacOs(MacProbe::new(capability, process)),
            Platform::Windows => HostProbe::Windows(WindowsProbe::new(capability, process)),
            Platform::Linux => HostProbe::Linux(LinuxProbe::new(capability, process)),
            Platform::Unsupported => HostProbe::Unsupported(UnsupportedProbe),
        }
    }

    fn inner(&self) -> &dyn PlatformProbe {
        match self {
            HostProbe::MacOs(probe) => probe,
            HostProbe::Windows(probe) => probe,
            HostProbe::Linux(probe) => probe,
            HostProbe::Unsupported(probe) => probe,
        }
    }
}

#[async_trait]
impl<P: ProcessAdapter> PlatformProbe for HostProbe<P> {
    fn platform(&self) -> Platform {
        self.inner().platform()
    }

    async fn is_supported(&self) -> bool {
        self.inner().is_supported().await
    }

    async fn is_installed(&self) -> bool {
        self.inner().is_installed().await
    }

    async fn is_running(&self) -> bool {
        self.inner().is_running().await
    }

    async fn is_admin(&self) -> bool {
        self.inner().is_admin().await
    }

    async fn requires_admin(&self) -> bool {
        self.inner().requires_admin().await
    }

    async fn install(&self, options: &InstallOptions) -> Result<(), LifecycleError> {
        self.inner().install(options).await
    }

    async fn launch(&self) -> Result<(), LifecycleError> {
        self.inner().launch().await
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
