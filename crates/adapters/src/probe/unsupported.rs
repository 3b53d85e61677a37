// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sentinel probe for hosts without a daemon build.

use super::{InstallOptions, PlatformProbe};
use async_trait::async_trait;
use kl_core::{LifecycleError, Platform};

#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedProbe;

#[async_trait]
impl PlatformProbe for UnsupportedProbe {
    fn platform(&self) -> Platform {
        Platform::Unsupported
    }

    async fn is_supported(&self) -> bool {
        false
    }

    async fn is_installed(&self) -> bool {
        false
    }

    async fn is_running(&self) -> bool {
        false
    }

    async fn is_admin(&self) -> bool {
        false
    }

    async fn requires_admin(&self) -> bool {
        false
    }

    async fn install(&self, _options: &InstallOptions) -> Result<(), LifecycleError> {
        Err(LifecycleError::Unsupported)
    }

    async fn launch(&self) -> Result<(), LifecycleError> {
        Err(LifecycleError::Unsupported)
    }
}
