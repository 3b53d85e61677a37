// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-platform description of where the daemon lives and how to drive it.
//!
//! A [`PlatformCapability`] is built once at startup from the detected
//! platform, optionally overridden from configuration, and then handed to
//! the platform probe. Tests construct one directly with fabricated paths.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder in installer commands replaced by the installer artifact path.
pub const INSTALLER_PLACEHOLDER: &str = "{installer}";

/// Placeholder in installer commands replaced by the primary install path.
pub const INSTALL_PATH_PLACEHOLDER: &str = "{install_path}";

/// Bundle identifier of the macOS app.
pub const MACOS_BUNDLE_ID: &str = "com.kite.Kite";

/// External command: program, arguments and extra environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Replace `placeholder` in the program and every argument.
    pub fn substitute(&self, placeholder: &str, value: &str) -> Self {
        Self {
            program: self.program.replace(placeholder, value),
            args: self
                .args
                .iter()
                .map(|arg| arg.replace(placeholder, value))
                .collect(),
            env: self.env.clone(),
        }
    }

    /// Run this command through `prefix` (e.g. an elevation helper).
    pub fn prefixed(&self, prefix: &CommandSpec) -> Self {
        let mut args = prefix.args.clone();
        args.push(self.program.clone());
        args.extend(self.args.iter().cloned());
        let mut env = prefix.env.clone();
        env.extend(self.env.clone());
        Self {
            program: prefix.program.clone(),
            args,
            env,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How installation interacts with administrator privileges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminPolicy {
    /// Install target is only writable by administrators
    pub install_requires_admin: bool,
    /// Command that exits zero when the current user is an administrator
    pub check: Option<CommandSpec>,
    /// Whitespace-separated token that must appear in the check's stdout
    pub check_token: Option<String>,
    /// Prefix used to invoke installer steps when admin rights are missing
    pub elevation: Option<CommandSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCapability {
    pub platform: Platform,
    /// Candidate install locations, most preferred first
    pub install_paths: Vec<PathBuf>,
    /// Text identifying the daemon in the process listing
    pub process_name: String,
    pub process_list: CommandSpec,
    /// Installer steps, run in order
    pub installer: Vec<CommandSpec>,
    /// Downloaded installer package, substituted for `{installer}`
    pub installer_artifact: Option<PathBuf>,
    pub launch_args: Vec<String>,
    pub launch_env: BTreeMap<String, String>,
    pub admin: AdminPolicy,
    /// Minimum kernel major release (macOS only)
    pub min_os_release: Option<u32>,
}

impl PlatformCapability {
    /// Capability of the running host.
    pub fn detect() -> Self {
        Self::for_platform(Platform::detect())
    }

    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => Self::macos(),
            Platform::Windows => Self::windows(),
            Platform::Linux => Self::linux(),
            Platform::Unsupported => Self::unsupported(),
        }
    }

    /// First configured install path that exists on disk.
    pub fn installed_path(&self) -> Option<&Path> {
        self.install_paths
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.exists())
    }

    /// Install path the installer is expected to populate.
    pub fn primary_install_path(&self) -> Option<&Path> {
        self.install_paths.first().map(PathBuf::as_path)
    }

    fn macos() -> Self {
        Self {
            platform: Platform::MacOs,
            install_paths: vec![PathBuf::from("/Applications/Kite.app")],
            process_name: "Kite.app/Contents/MacOS/".to_string(),
            process_list: CommandSpec::new("/bin/ps", ["-axo", "pid,command"]),
            installer: vec![
                CommandSpec::new("hdiutil", ["attach", "-nobrowse", INSTALLER_PLACEHOLDER]),
                CommandSpec::new(
                    "cp",
                    ["-R", "/Volumes/Kite/Kite.app", INSTALL_PATH_PLACEHOLDER],
                ),
                CommandSpec::new("hdiutil", ["detach", "/Volumes/Kite/"]),
            ],
            installer_artifact: Some(std::env::temp_dir().join("Kite.dmg")),
            launch_args: vec!["--plugin-launch".to_string()],
            launch_env: BTreeMap::new(),
            admin: AdminPolicy {
                install_requires_admin: true,
                check: Some(CommandSpec::new("id", ["-Gn"])),
                check_token: Some("admin".to_string()),
                elevation: None,
            },
            min_os_release: Some(14),
        }
    }

    fn windows() -> Self {
        let mut install_paths = vec![PathBuf::from(r"C:\Program Files\Kite\kited.exe")];
        if let Some(local) = dirs::data_local_dir() {
            install_paths.push(local.join("Kite").join("kited.exe"));
        }
        Self {
            platform: Platform::Windows,
            install_paths,
            process_name: "kited.exe".to_string(),
            process_list: CommandSpec::new("tasklist", ["/FI", "IMAGENAME eq kited.exe"]),
            installer: vec![CommandSpec::new(
                INSTALLER_PLACEHOLDER,
                ["--skip-onboarding", "--plugin-launch"],
            )],
            installer_artifact: Some(std::env::temp_dir().join("KiteSetup.exe")),
            launch_args: vec!["--plugin-launch".to_string()],
            launch_env: BTreeMap::from([("KITE_SKIP_ONBOARDING".to_string(), "1".to_string())]),
            admin: AdminPolicy {
                install_requires_admin: true,
                check: Some(CommandSpec::new("net", ["session"])),
                check_token: None,
                elevation: None,
            },
            min_os_release: None,
        }
    }

    fn linux() -> Self {
        let mut install_paths = Vec::new();
        if let Some(data) = dirs::data_local_dir() {
            install_paths.push(data.join("kite").join("kited"));
        }
        install_paths.push(PathBuf::from("/opt/kite/kited"));
        Self {
            platform: Platform::Linux,
            install_paths,
            process_name: "kited".to_string(),
            process_list: CommandSpec::new("/bin/ps", ["-axo", "pid,command"]),
            installer: vec![CommandSpec::new("bash", [INSTALLER_PLACEHOLDER, "--install"])],
            installer_artifact: Some(std::env::temp_dir().join("kite-installer.sh")),
            launch_args: vec!["--plugin-launch".to_string()],
            launch_env: BTreeMap::from([("SKIP_KITE_ONBOARDING".to_string(), "1".to_string())]),
            admin: AdminPolicy {
                install_requires_admin: false,
                check: Some(CommandSpec::new("id", ["-u"])),
                check_token: Some("0".to_string()),
                elevation: Some(CommandSpec::new("pkexec", Vec::<String>::new())),
            },
            min_os_release: None,
        }
    }

    fn unsupported() -> Self {
        Self {
            platform: Platform::Unsupported,
            install_paths: Vec::new(),
            process_name: String::new(),
            process_list: CommandSpec::default(),
            installer: Vec::new(),
            installer_artifact: None,
            launch_args: Vec::new(),
            launch_env: BTreeMap::new(),
            admin: AdminPolicy::default(),
            min_os_release: None,
        }
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
