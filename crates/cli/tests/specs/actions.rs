// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions that refuse to run on hosts they cannot act on.

use crate::prelude::*;

#[test]
fn install_on_unsupported_platform_fails() {
    cli()
        .args(&["install"])
        .env("KL_PLATFORM", "unsupported")
        .exits(1)
        .stderr_has("not supported on this platform");
}

#[test]
fn install_already_installed_is_a_no_op() {
    let host = Host::new();
    let daemon = host.install_daemon();
    cli()
        .args(&["install"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", daemon)
        .passes()
        .stdout_eq("daemon already installed (installed)\n");
}

#[test]
fn launch_without_install_fails() {
    let host = Host::new();
    cli()
        .args(&["launch"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", host.path().join("missing"))
        .exits(1)
        .stderr_has("cannot launch while the daemon is not-installed");
}

#[test]
fn wait_gives_up_after_attempts() {
    let host = Host::new();
    cli()
        .args(&["wait", "--until", "installed", "--attempts", "2", "--interval-ms", "1"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", host.path().join("missing"))
        .exits(1)
        .stderr_has("not installed");
}

#[test]
fn whitelisted_exits_2_when_daemon_is_absent() {
    cli()
        .args(&["whitelisted", "/srv/project"])
        .env("KL_PLATFORM", "unsupported")
        .exits(2)
        .stdout_eq("/srv/project is not whitelisted (daemon unsupported)\n");
}
