// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

// --- Parse helpers (private) ---

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.trim().is_empty())
}

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- Configuration file ---

pub fn config_path() -> Option<PathBuf> {
    non_empty("KL_CONFIG").map(PathBuf::from)
}

// --- Capability ---

/// Raw `KL_PLATFORM`; parsed by the caller so bad values are reported.
pub fn platform() -> Option<String> {
    non_empty("KL_PLATFORM")
}

pub fn install_path() -> Option<PathBuf> {
    non_empty("KL_INSTALL_PATH").map(PathBuf::from)
}

// --- Daemon endpoint ---

pub fn daemon_url() -> Option<String> {
    non_empty("KL_DAEMON_URL")
}

pub fn timeout_reachable_ms() -> Option<Duration> {
    parse_duration_ms("KL_TIMEOUT_REACHABLE_MS")
}

pub fn timeout_request_ms() -> Option<Duration> {
    parse_duration_ms("KL_TIMEOUT_REQUEST_MS")
}

// --- Polling ---

pub fn poll_attempts() -> Option<u32> {
    std::env::var("KL_POLL_ATTEMPTS")
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
}

pub fn poll_interval_ms() -> Option<Duration> {
    parse_duration_ms("KL_POLL_INTERVAL_MS")
}

// --- Logging ---

/// Log filter: `KL_LOG`, then `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    non_empty("KL_LOG").or_else(|| non_empty("RUST_LOG"))
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
