// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::unwrap_used)]

use crate::capability::{AdminPolicy, CommandSpec, PlatformCapability};
use crate::platform::Platform;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Process name used by fabricated capabilities.
pub const FAKE_PROCESS_NAME: &str = "kited";

/// Program name of the fabricated process listing command.
pub const FAKE_PROCESS_LIST: &str = "list-processes";

/// Capability whose install path lives under `root` and whose commands
/// are all fake program names, so nothing on the host is touched.
///
/// The install artifact is not created; call [`create_install_artifact`].
pub fn fabricated_capability(platform: Platform, root: &Path) -> PlatformCapability {
    PlatformCapability {
        platform,
        install_paths: vec![install_path(root)],
        process_name: FAKE_PROCESS_NAME.to_string(),
        process_list: CommandSpec::new(FAKE_PROCESS_LIST, Vec::<String>::new()),
        installer: vec![CommandSpec::new(
            "run-installer",
            [crate::capability::INSTALLER_PLACEHOLDER],
        )],
        installer_artifact: Some(root.join("installer.pkg")),
        launch_args: vec!["--plugin-launch".to_string()],
        launch_env: BTreeMap::new(),
        admin: AdminPolicy {
            install_requires_admin: false,
            check: Some(CommandSpec::new("check-admin", Vec::<String>::new())),
            check_token: None,
            elevation: Some(CommandSpec::new("elevate", Vec::<String>::new())),
        },
        min_os_release: None,
    }
}

/// Install path used by [`fabricated_capability`].
pub fn install_path(root: &Path) -> PathBuf {
    root.join("kite").join("kited")
}

/// Create the install artifact so the capability reports "installed".
pub fn create_install_artifact(root: &Path) -> PathBuf {
    let path = install_path(root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"#!/bin/sh\n").unwrap();
    path
}

/// Create the downloaded installer package.
pub fn create_installer_artifact(capability: &PlatformCapability) -> Option<PathBuf> {
    let path = capability.installer_artifact.clone()?;
    std::fs::write(&path, b"installer").unwrap();
    Some(path)
}
