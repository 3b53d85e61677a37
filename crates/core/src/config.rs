// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effective configuration: platform capability, daemon endpoint, polling.
//!
//! Layering is platform defaults < TOML file < caller overrides. The TOML
//! file mirrors [`LifecycleConfig`] with every field optional:
//!
//! ```toml
//! [capability]
//! platform = "linux"
//! install_paths = ["/opt/kite/kited"]
//!
//! [daemon]
//! base_url = "http://127.0.0.1:46624"
//! reachable_timeout_ms = 2000
//!
//! [poll]
//! attempts = 30
//! interval_ms = 2500
//! ```

use crate::capability::{AdminPolicy, CommandSpec, PlatformCapability};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Loopback address of the daemon's local API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:46624";

const DEFAULT_REACHABLE_TIMEOUT: Duration = Duration::from_millis(2000);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_POLL_ATTEMPTS: u32 = 30;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Bounds for each network check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaemonTimeouts {
    /// Liveness check (`GET /system`)
    pub reachable: Duration,
    /// Auth and settings requests
    pub request: Duration,
}

impl Default for DaemonTimeouts {
    fn default() -> Self {
        Self {
            reachable: DEFAULT_REACHABLE_TIMEOUT,
            request: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonEndpoint {
    pub base_url: String,
    pub timeouts: DaemonTimeouts,
}

impl Default for DaemonEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: DaemonTimeouts::default(),
        }
    }
}

/// How long to keep re-resolving state while waiting for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollPolicy {
    /// Total number of resolutions, including the first
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POLL_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleConfig {
    pub capability: PlatformCapability,
    pub daemon: DaemonEndpoint,
    pub poll: PollPolicy,
}

impl LifecycleConfig {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            capability: PlatformCapability::for_platform(platform),
            daemon: DaemonEndpoint::default(),
            poll: PollPolicy::default(),
        }
    }
}

/// On-disk configuration; every field overrides a default when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub capability: CapabilityOverrides,
    pub daemon: DaemonOverrides,
    pub poll: PollOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilityOverrides {
    pub platform: Option<Platform>,
    pub install_paths: Option<Vec<PathBuf>>,
    pub process_name: Option<String>,
    pub process_list: Option<CommandSpec>,
    pub installer: Option<Vec<CommandSpec>>,
    pub installer_artifact: Option<PathBuf>,
    pub launch_args: Option<Vec<String>>,
    pub launch_env: Option<BTreeMap<String, String>>,
    pub admin: Option<AdminPolicy>,
    pub min_os_release: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonOverrides {
    pub base_url: Option<String>,
    pub reachable_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollOverrides {
    pub attempts: Option<u32>,
    pub interval_ms: Option<u64>,
}

impl ConfigFile {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Build the effective configuration.
    ///
    /// `platform` (e.g. from the environment) wins over the file's
    /// `capability.platform`, which wins over `detected`. The chosen
    /// platform selects the defaults the remaining overrides apply to.
    pub fn resolve(self, platform: Option<Platform>, detected: Platform) -> LifecycleConfig {
        let platform = platform
            .or(self.capability.platform)
            .unwrap_or(detected);
        let mut config = LifecycleConfig::for_platform(platform);
        self.capability.apply(&mut config.capability);

        let daemon = self.daemon;
        if let Some(base_url) = daemon.base_url {
            config.daemon.base_url = base_url;
        }
        if let Some(ms) = daemon.reachable_timeout_ms {
            config.daemon.timeouts.reachable = Duration::from_millis(ms);
        }
        if let Some(ms) = daemon.request_timeout_ms {
            config.daemon.timeouts.request = Duration::from_millis(ms);
        }

        if let Some(attempts) = self.poll.attempts {
            config.poll.attempts = attempts;
        }
        if let Some(ms) = self.poll.interval_ms {
            config.poll.interval = Duration::from_millis(ms);
        }
        config
    }
}

impl CapabilityOverrides {
    fn apply(self, capability: &mut PlatformCapability) {
        if let Some(paths) = self.install_paths {
            capability.install_paths = paths;
        }
        if let Some(name) = self.process_name {
            capability.process_name = name;
        }
        if let Some(list) = self.process_list {
            capability.process_list = list;
        }
        if let Some(installer) = self.installer {
            capability.installer = installer;
        }
        if let Some(artifact) = self.installer_artifact {
            capability.installer_artifact = Some(artifact);
        }
        if let Some(args) = self.launch_args {
            capability.launch_args = args;
        }
        if let Some(env) = self.launch_env {
            capability.launch_env = env;
        }
        if let Some(admin) = self.admin {
            capability.admin = admin;
        }
        if let Some(release) = self.min_os_release {
            capability.min_os_release = Some(release);
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
