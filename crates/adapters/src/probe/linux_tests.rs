// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::process::{FakeProcessAdapter, ProcessCall};
use kl_core::test_support::{
    create_install_artifact, create_installer_artifact, fabricated_capability, FAKE_PROCESS_LIST,
};
use kl_core::CommandSpec;
use tempfile::TempDir;

struct Setup {
    dir: TempDir,
    process: FakeProcessAdapter,
    probe: LinuxProbe<FakeProcessAdapter>,
}

fn setup() -> Setup {
    setup_with(|_| {})
}

fn setup_with(edit: impl FnOnce(&mut PlatformCapability)) -> Setup {
    let dir = tempfile::tempdir().unwrap();
    let mut capability = fabricated_capability(Platform::Linux, dir.path());
    edit(&mut capability);
    let process = FakeProcessAdapter::new();
    let probe = LinuxProbe::new(capability, process.clone());
    Setup {
        dir,
        process,
        probe,
    }
}

#[yare::parameterized(
    bare_name        = { "kited", true },
    full_path        = { "  412 /home/me/.local/share/kite/kited --plugin-launch", true },
    other_process    = { "  99 /usr/bin/bash", false },
    name_as_prefix   = { "  12 /opt/kite/kited-helper", false },
    name_in_dir_only = { "  12 /opt/kited/other", false },
    name_as_argument = { "  77 vim /home/me/kited", false },
    second_line      = { "  PID COMMAND\n  1 /sbin/init\n  9 /opt/kite/kited", true },
    pid_only         = { "  42", false },
)]
fn listing_names_matches_basename(listing: &str, expected: bool) {
    assert_eq!(listing_names(listing, "kited"), expected);
}

#[test]
fn empty_process_name_never_matches() {
    assert!(!listing_names("kited", ""));
}

#[tokio::test]
async fn is_installed_follows_artifact() {
    let s = setup();
    assert!(!s.probe.is_installed().await);
    create_install_artifact(s.dir.path());
    assert!(s.probe.is_installed().await);
}

#[tokio::test]
async fn is_running_reads_listing() {
    let s = setup();
    s.process.stdout(FAKE_PROCESS_LIST, "1 /sbin/init\n42 /opt/kite/kited\n");
    assert!(s.probe.is_running().await);
}

#[tokio::test]
async fn listing_non_zero_exit_is_not_running() {
    let s = setup();
    s.process.respond(
        FAKE_PROCESS_LIST,
        crate::process::ProcessOutput {
            exit_code: Some(1),
            stdout: "42 /opt/kite/kited\n".to_string(),
            stderr: "ps: error".to_string(),
        },
    );
    assert!(!s.probe.is_running().await);
}

#[tokio::test]
async fn listing_spawn_failure_is_not_running() {
    let s = setup();
    s.process.fail_spawn(FAKE_PROCESS_LIST);
    assert!(!s.probe.is_running().await);
}

#[tokio::test]
async fn listing_timeout_is_not_running() {
    let s = setup();
    s.process.time_out(FAKE_PROCESS_LIST);
    assert!(!s.probe.is_running().await);
}

#[tokio::test]
async fn supported_without_min_release() {
    let s = setup();
    assert!(s.probe.is_supported().await);
    assert!(s.process.calls().is_empty());
}

#[yare::parameterized(
    root     = { "0\n", true },
    regular  = { "1000\n", false },
)]
fn is_admin_checks_token(stdout: &str, expected: bool) {
    let s = setup_with(|c| c.admin.check_token = Some("0".to_string()));
    s.process.stdout("check-admin", stdout);
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    assert_eq!(rt.block_on(s.probe.is_admin()), expected);
}

#[tokio::test]
async fn is_admin_false_when_check_fails() {
    let s = setup();
    s.process.exit("check-admin", 2, "");
    assert!(!s.probe.is_admin().await);
}

#[tokio::test]
async fn install_runs_steps_with_installer_path() {
    let s = setup();
    let capability = fabricated_capability(Platform::Linux, s.dir.path());
    let installer = create_installer_artifact(&capability).unwrap();
    create_install_artifact(s.dir.path());
    s.process.stdout("run-installer", "");

    s.probe.install(&InstallOptions::default()).await.unwrap();

    let installs: Vec<_> = s
        .process
        .calls()
        .into_iter()
        .filter(|c| c.command().program == "run-installer")
        .collect();
    assert_eq!(installs.len(), 1);
    assert_eq!(
        installs[0].command().args,
        vec![installer.display().to_string()]
    );
    assert!(installer.exists(), "installer kept by default");
}

#[tokio::test]
async fn install_removes_installer_when_asked() {
    let s = setup();
    let capability = fabricated_capability(Platform::Linux, s.dir.path());
    let installer = create_installer_artifact(&capability).unwrap();
    create_install_artifact(s.dir.path());
    s.process.stdout("run-installer", "");

    let options = InstallOptions {
        installer_path: None,
        remove_installer: true,
    };
    s.probe.install(&options).await.unwrap();
    assert!(!installer.exists());
}

#[tokio::test]
async fn install_override_path_is_substituted() {
    let s = setup();
    let custom = s.dir.path().join("custom-installer.sh");
    std::fs::write(&custom, b"#!/bin/sh\n").unwrap();
    create_install_artifact(s.dir.path());
    s.process.stdout("run-installer", "");

    let options = InstallOptions {
        installer_path: Some(custom.clone()),
        remove_installer: false,
    };
    s.probe.install(&options).await.unwrap();
    let programs = s.process.calls();
    let step = programs
        .iter()
        .find(|c| c.command().program == "run-installer")
        .unwrap();
    assert_eq!(step.command().args, vec![custom.display().to_string()]);
}

#[tokio::test]
async fn install_failure_carries_exit_code_and_stderr() {
    let s = setup();
    let capability = fabricated_capability(Platform::Linux, s.dir.path());
    create_installer_artifact(&capability);
    s.process.exit("run-installer", 3, "disk full\n");

    let err = s.probe.install(&InstallOptions::default()).await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::InstallFailed {
            exit_code: Some(3),
            stderr: "disk full".to_string(),
        }
    );
}

#[tokio::test]
async fn install_zero_exit_without_artifact_fails_verification() {
    let s = setup();
    let capability = fabricated_capability(Platform::Linux, s.dir.path());
    create_installer_artifact(&capability);
    s.process.stdout("run-installer", "");

    let err = s.probe.install(&InstallOptions::default()).await.unwrap_err();
    assert!(
        matches!(err, LifecycleError::InstallFailed { exit_code: Some(0), .. }),
        "got: {:?}",
        err
    );
}

#[tokio::test]
async fn install_missing_installer_package_fails_before_running() {
    let s = setup();
    let err = s.probe.install(&InstallOptions::default()).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InstallFailed { exit_code: None, .. }));
    assert!(!s.process.programs().contains(&"run-installer".to_string()));
}

#[tokio::test]
async fn install_first_failing_step_aborts() {
    let s = setup_with(|c| {
        c.installer = vec![
            CommandSpec::new("step-one", Vec::<String>::new()),
            CommandSpec::new("step-two", Vec::<String>::new()),
        ];
    });
    s.process.exit("step-one", 1, "nope");
    s.process.stdout("step-two", "");

    let err = s.probe.install(&InstallOptions::default()).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InstallFailed { exit_code: Some(1), .. }));
    assert!(!s.process.programs().contains(&"step-two".to_string()));
}

#[tokio::test]
async fn install_is_elevated_when_admin_required() {
    let s = setup_with(|c| {
        c.admin.install_requires_admin = true;
        c.installer = vec![CommandSpec::new("bash", ["install.sh"])];
    });
    s.process.exit("check-admin", 1, "");
    s.process.stdout("elevate", "");
    create_install_artifact(s.dir.path());

    s.probe.install(&InstallOptions::default()).await.unwrap();
    let calls = s.process.calls();
    let last = calls.last().unwrap();
    assert_eq!(last.command().program, "elevate");
    assert_eq!(last.command().args, vec!["bash", "install.sh"]);
}

#[tokio::test]
async fn install_not_elevated_for_admin_user() {
    let s = setup_with(|c| {
        c.admin.install_requires_admin = true;
        c.installer = vec![CommandSpec::new("bash", ["install.sh"])];
    });
    s.process.stdout("check-admin", "");
    s.process.stdout("bash", "");
    create_install_artifact(s.dir.path());

    assert!(!s.probe.requires_admin().await);
    s.probe.install(&InstallOptions::default()).await.unwrap();
    assert!(!s.process.programs().contains(&"elevate".to_string()));
}

#[tokio::test]
async fn launch_spawns_detached_with_args_and_env() {
    let s = setup_with(|c| {
        c.launch_env.insert("SKIP_KITE_ONBOARDING".to_string(), "1".to_string());
    });
    let path = create_install_artifact(s.dir.path());

    s.probe.launch().await.unwrap();
    let spawned = s.process.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].program, path.display().to_string());
    assert_eq!(spawned[0].args, vec!["--plugin-launch"]);
    assert_eq!(
        spawned[0].env.get("SKIP_KITE_ONBOARDING").map(String::as_str),
        Some("1")
    );
    assert!(matches!(
        s.process.calls()[0],
        ProcessCall::SpawnDetached { .. }
    ));
}

#[tokio::test]
async fn launch_spawn_error_is_launch_failed() {
    let s = setup();
    let path = create_install_artifact(s.dir.path());
    s.process.fail_spawn(&path.display().to_string());

    let err = s.probe.launch().await.unwrap_err();
    assert!(matches!(err, LifecycleError::LaunchFailed { .. }), "got: {:?}", err);
}

#[tokio::test]
async fn launch_without_install_is_not_installed() {
    let s = setup();
    assert_eq!(s.probe.launch().await, Err(LifecycleError::NotInstalled));
    assert!(s.process.calls().is_empty());
}
