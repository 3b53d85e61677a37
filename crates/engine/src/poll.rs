// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded polling for callers waiting on the ladder.

use kl_core::PollPolicy;
use std::time::Duration;

/// Result of waiting for the next poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Ready for the next poll iteration.
    Ready,
    /// Every attempt has been used.
    Exhausted,
}

/// Hands out at most `attempts` ticks, `interval` apart.
///
/// The first tick is immediate. A policy of zero attempts still polls once.
pub struct Poller {
    interval: Duration,
    remaining: u32,
    started: bool,
}

impl Poller {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            interval: policy.interval,
            remaining: policy.attempts.max(1),
            started: false,
        }
    }

    /// Attempts not yet handed out.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub async fn tick(&mut self) -> Tick {
        if self.remaining == 0 {
            return Tick::Exhausted;
        }
        if self.started {
            tokio::time::sleep(self.interval).await;
        }
        self.started = true;
        self.remaining -= 1;
        Tick::Ready
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
