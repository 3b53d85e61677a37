// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effective configuration for one invocation.
//!
//! Precedence: command flags > `KL_*` environment > TOML file > platform
//! defaults. The file comes from `--config`, then `KL_CONFIG`, then
//! `<config dir>/kl/config.toml` when it exists.

use anyhow::{Context, Result};
use kl_core::{ConfigFile, LifecycleConfig, Platform};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;

/// Overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub platform: Option<Platform>,
    pub install_path: Option<PathBuf>,
    pub daemon_url: Option<String>,
    pub reachable_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub poll_attempts: Option<u32>,
    pub poll_interval: Option<Duration>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let platform = env::platform()
            .map(|raw| raw.parse::<Platform>())
            .transpose()
            .context("invalid KL_PLATFORM")?;
        Ok(Self {
            platform,
            install_path: env::install_path(),
            daemon_url: env::daemon_url(),
            reachable_timeout: env::timeout_reachable_ms(),
            request_timeout: env::timeout_request_ms(),
            poll_attempts: env::poll_attempts(),
            poll_interval: env::poll_interval_ms(),
        })
    }

    /// Apply everything except the platform, which selects the defaults.
    fn apply(self, config: &mut LifecycleConfig) {
        if let Some(path) = self.install_path {
            config.capability.install_paths = vec![path];
        }
        if let Some(url) = self.daemon_url {
            config.daemon.base_url = url;
        }
        if let Some(timeout) = self.reachable_timeout {
            config.daemon.timeouts.reachable = timeout;
        }
        if let Some(timeout) = self.request_timeout {
            config.daemon.timeouts.request = timeout;
        }
        if let Some(attempts) = self.poll_attempts {
            config.poll.attempts = attempts;
        }
        if let Some(interval) = self.poll_interval {
            config.poll.interval = interval;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: LifecycleConfig,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

impl Settings {
    pub fn load(config_flag: Option<&Path>) -> Result<Self> {
        let overrides = EnvOverrides::from_env()?;
        let source = config_flag
            .map(Path::to_path_buf)
            .or_else(env::config_path)
            .or_else(default_config_path);
        Self::build(source, overrides, Platform::detect())
    }

    pub fn build(
        source: Option<PathBuf>,
        overrides: EnvOverrides,
        detected: Platform,
    ) -> Result<Self> {
        let file = match &source {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let mut config = file.resolve(overrides.platform, detected);
        overrides.apply(&mut config);
        tracing::debug!(
            platform = %config.capability.platform,
            base_url = %config.daemon.base_url,
            source = ?source,
            "configuration loaded"
        );
        Ok(Self { config, source })
    }
}

fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("kl").join("config.toml");
    path.is_file().then_some(path)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
