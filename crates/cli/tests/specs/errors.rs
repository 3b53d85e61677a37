// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting and exit codes.

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli().passes().stdout_has("Usage: kl");
}

#[test]
fn invalid_platform_is_rejected() {
    cli()
        .args(&["status"])
        .env("KL_PLATFORM", "beos")
        .fails()
        .stderr_has("invalid KL_PLATFORM")
        .stderr_has("beos");
}

#[test]
fn missing_config_file_is_reported() {
    let host = Host::new();
    cli()
        .args(&["status"])
        .env("KL_CONFIG", host.path().join("absent.toml"))
        .exits(1)
        .stderr_has("failed to read config");
}

#[test]
fn unknown_config_key_is_reported() {
    let host = Host::new();
    let config = host.config("[daemon]\nport = 80\n");
    cli()
        .args(&["config"])
        .env("KL_CONFIG", &config)
        .exits(1)
        .stderr_has("failed to parse config");
}

#[test]
fn unknown_stage_is_a_usage_error() {
    cli()
        .args(&["status", "--until", "launched"])
        .exits(2)
        .stderr_has("launched");
}
