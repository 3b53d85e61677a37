// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running `kl` against a fabricated host.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use assert_cmd::assert::OutputAssertExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Nothing listens here; connections are refused.
pub const DEAD_URL: &str = "http://127.0.0.1:9";

// Aggressive timeouts for fast tests.
const KL_TIMEOUT_REACHABLE_MS: &str = "500";
const KL_TIMEOUT_REQUEST_MS: &str = "500";
const KL_POLL_ATTEMPTS: &str = "2";
const KL_POLL_INTERVAL_MS: &str = "10";

/// Variables a developer's shell might leak into the run.
const SCRUBBED: &[&str] = &[
    "KL_CONFIG",
    "KL_PLATFORM",
    "KL_INSTALL_PATH",
    "KL_DAEMON_URL",
    "KL_LOG",
    "RUST_LOG",
    "COLOR",
];

/// Create a CLI builder for kl commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// Scratch directory standing in for the host filesystem.
pub struct Host {
    dir: TempDir,
}

impl Host {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create the daemon executable and return its path.
    pub fn install_daemon(&self) -> PathBuf {
        let path = self.path().join("kite").join("kited");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        path
    }

    /// Write a config file and return its path.
    pub fn config(&self, toml: &str) -> PathBuf {
        let path = self.path().join("kl.toml");
        std::fs::write(&path, toml).unwrap();
        path
    }
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    config_home: TempDir,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![
                ("KL_TIMEOUT_REACHABLE_MS".into(), KL_TIMEOUT_REACHABLE_MS.into()),
                ("KL_TIMEOUT_REQUEST_MS".into(), KL_TIMEOUT_REQUEST_MS.into()),
                ("KL_POLL_ATTEMPTS".into(), KL_POLL_ATTEMPTS.into()),
                ("KL_POLL_INTERVAL_MS".into(), KL_POLL_INTERVAL_MS.into()),
                ("NO_COLOR".into(), "1".into()),
            ],
            config_home: tempfile::tempdir().unwrap(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kl"));
        cmd.args(&self.args);
        for key in SCRUBBED {
            cmd.env_remove(key);
        }
        // Keep the user's own config file out of the run
        cmd.env("XDG_CONFIG_HOME", self.config_home.path());
        cmd.env("HOME", self.config_home.path());
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn output(&self) -> Output {
        self.command().output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.output();
        output.clone().assert().code(code);
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout contains substring
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap_or_else(|e| {
            panic!("stdout is not JSON: {}\nstdout: {}", e, self.stdout())
        })
    }
}
