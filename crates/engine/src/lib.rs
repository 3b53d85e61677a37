// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Kite daemon lifecycle engine: API clients and the orchestrator that
//! composes them with a platform probe.

pub mod auth;
mod lifecycle;
pub mod poll;
pub mod reachability;
pub mod whitelist;

pub use auth::{AuthClient, AuthStatus};
pub use lifecycle::{ActionOutcome, Lifecycle, PathAuthorization};
pub use poll::{Poller, Tick};
pub use reachability::{Reachability, ReachabilityClient};
pub use whitelist::WhitelistClient;
