// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use kl_core::LifecycleState;
use std::io::IsTerminal;

pub mod codes {
    /// Fully usable daemon
    pub const READY: u8 = 114;
    /// Partway up the ladder
    pub const PARTIAL: u8 = 179;
    /// Absent or failing
    pub const FAILED: u8 = 167;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(text: &str, code: u8, colorize: bool) -> String {
    if colorize {
        format!("{}{text}{RESET}", fg256(code))
    } else {
        text.to_string()
    }
}

fn state_code(state: LifecycleState) -> u8 {
    match state {
        LifecycleState::Authenticated => codes::READY,
        LifecycleState::Installed
        | LifecycleState::Running
        | LifecycleState::Reachable
        | LifecycleState::NotAuthenticated => codes::PARTIAL,
        LifecycleState::Unsupported
        | LifecycleState::NotInstalled
        | LifecycleState::NotRunning
        | LifecycleState::NotReachable => codes::FAILED,
    }
}

pub fn state(state: LifecycleState, colorize: bool) -> String {
    paint(state.as_str(), state_code(state), colorize)
}

pub fn context(text: &str, colorize: bool) -> String {
    paint(text, codes::CONTEXT, colorize)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
