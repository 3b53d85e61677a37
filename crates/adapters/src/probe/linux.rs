// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Linux probe: `kited` executable matched by basename in `ps` output.

use super::native::NativeProbe;
use super::{InstallOptions, PlatformProbe};
use crate::process::ProcessAdapter;
use async_trait::async_trait;
use kl_core::{LifecycleError, Platform, PlatformCapability};

#[derive(Clone)]
pub struct LinuxProbe<P> {
    native: NativeProbe<P>,
}

impl<P: ProcessAdapter> LinuxProbe<P> {
    pub fn new(capability: PlatformCapability, process: P) -> Self {
        Self {
            native: NativeProbe::new(capability, process),
        }
    }
}

/// Whether any line of `listing` runs `process`, matched by basename of
/// the command column. A leading pid column is skipped; arguments are not
/// considered.
///
/// `kited` matches `412 /opt/kite/kited --plugin-launch` but not
/// `kited-helper` or `77 vim /home/me/kited`.
fn listing_names(listing: &str, process: &str) -> bool {
    !process.is_empty() && listing.lines().any(|line| command_of(line) == Some(process))
}

fn command_of(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace().peekable();
    if tokens
        .peek()
        .is_some_and(|first| first.chars().all(|c| c.is_ascii_digit()))
    {
        tokens.next();
    }
    tokens.next().and_then(|command| command.rsplit('/').next())
}

#[async_trait]
impl<P: ProcessAdapter> PlatformProbe for LinuxProbe<P> {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    async fn is_supported(&self) -> bool {
        self.native.meets_min_release().await
    }

    async fn is_installed(&self) -> bool {
        self.native.is_installed()
    }

    async fn is_running(&self) -> bool {
        match self.native.process_listing().await {
            Some(listing) => listing_names(&listing, &self.native.capability.process_name),
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
#[path = "linux_tests.rs"]
mod tests;
