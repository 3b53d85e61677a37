// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl config` and configuration precedence.

use crate::prelude::*;

#[test]
fn defaults_without_file() {
    cli()
        .args(&["config"])
        .env("KL_PLATFORM", "linux")
        .passes()
        .stdout_has("source:          (defaults)")
        .stdout_has("platform:        linux")
        .stdout_has("daemon url:      http://127.0.0.1:46624");
}

#[test]
fn env_overrides_file() {
    let host = Host::new();
    let config = host.config(
        r#"
[capability]
platform = "windows"
process_name = "kite-test.exe"

[daemon]
base_url = "http://127.0.0.1:1111"
"#,
    );
    let run = cli()
        .args(&["config", "-o", "json"])
        .env("KL_CONFIG", &config)
        .env("KL_DAEMON_URL", "http://127.0.0.1:2222")
        .passes();
    let json = run.json();
    assert_eq!(json["platform"], "windows");
    assert_eq!(json["base_url"], "http://127.0.0.1:2222");
    assert_eq!(json["process_name"], "kite-test.exe");
    assert_eq!(json["source"], config.display().to_string());
}

#[test]
fn flag_beats_env_config_path() {
    let host = Host::new();
    let flagged = host.config("[poll]\nattempts = 11\n");
    let run = cli()
        .args(&["config", "-o", "json", "--config", flagged.to_str().unwrap()])
        .env("KL_CONFIG", host.path().join("ignored.toml"))
        .passes();
    // KL_POLL_ATTEMPTS from the harness still wins over the file
    assert_eq!(run.json()["poll_attempts"], 2);
}

#[test]
fn install_path_override_is_shown() {
    let host = Host::new();
    let daemon = host.install_daemon();
    cli()
        .args(&["config"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", &daemon)
        .passes()
        .stdout_has(&format!("installed at:    {}", daemon.display()));
}
