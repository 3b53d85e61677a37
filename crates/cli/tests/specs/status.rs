// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kl status` against fabricated hosts.

use crate::prelude::*;

#[test]
fn unsupported_platform_reports_unsupported() {
    cli()
        .args(&["status"])
        .env("KL_PLATFORM", "unsupported")
        .passes()
        .stdout_eq("unsupported\n");
}

#[test]
fn missing_install_reports_not_installed() {
    let host = Host::new();
    cli()
        .args(&["status"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", host.path().join("missing").join("kited"))
        .passes()
        .stdout_eq("not-installed\n");
}

#[test]
fn check_exits_2_below_authenticated() {
    let host = Host::new();
    cli()
        .args(&["status", "--check"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", host.path().join("missing"))
        .exits(2)
        .stdout_eq("not-installed\n");
}

#[test]
fn until_installed_stops_early() {
    let host = Host::new();
    let daemon = host.install_daemon();
    cli()
        .args(&["status", "--until", "installed", "--check"])
        .env("KL_PLATFORM", "linux")
        .env("KL_INSTALL_PATH", daemon)
        .passes()
        .stdout_eq("installed\n");
}

#[cfg(unix)]
fn running_host_config(host: &Host) -> std::path::PathBuf {
    let daemon = host.install_daemon();
    host.config(&format!(
        r#"
[capability]
platform = "linux"
install_paths = ["{}"]
process_name = "kited"
process_list = {{ program = "echo", args = ["/opt/kite/kited --plugin-launch"] }}

[daemon]
base_url = "{}"
"#,
        daemon.display(),
        DEAD_URL
    ))
}

#[cfg(unix)]
#[test]
fn refused_api_reports_not_reachable() {
    let host = Host::new();
    let config = running_host_config(&host);
    cli()
        .args(&["status", "--config"])
        .args(&[config.to_str().unwrap()])
        .passes()
        .stdout_eq("not-reachable\n");
}

#[cfg(unix)]
#[test]
fn verbose_lists_stage_outcomes() {
    let host = Host::new();
    let config = running_host_config(&host);
    cli()
        .args(&["status", "-v"])
        .env("KL_CONFIG", &config)
        .passes()
        .stdout_has("not-reachable\n")
        .stdout_has("  installed     passed\n")
        .stdout_has("  running       passed\n")
        .stdout_has("  reachable     failed: connection refused")
        .stdout_lacks("authenticated");
}

#[cfg(unix)]
#[test]
fn json_report_carries_stages() {
    let host = Host::new();
    let config = running_host_config(&host);
    let run = cli()
        .args(&["status", "-o", "json"])
        .env("KL_CONFIG", &config)
        .passes();
    let json = run.json();
    assert_eq!(json["state"], "not-reachable");
    let stages = json["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 3);
    assert_eq!(stages[0]["stage"], "installed");
    assert_eq!(stages[0]["outcome"], "passed");
    assert_eq!(stages[2]["outcome"], "failed");
    assert_eq!(stages[2]["reason"]["kind"], "refused");
}
