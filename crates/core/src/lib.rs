// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kl-core: lifecycle ladder, platform capabilities and error taxonomy
//! for managing the Kite daemon.

pub mod capability;
pub mod config;
pub mod error;
pub mod platform;
pub mod probe;
pub mod state;
pub mod whitelist;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capability::{AdminPolicy, CommandSpec, PlatformCapability};
pub use config::{ConfigError, ConfigFile, DaemonEndpoint, DaemonTimeouts, LifecycleConfig, PollPolicy};
pub use error::{Action, LifecycleError};
pub use platform::{ParsePlatformError, Platform};
pub use probe::{ProbeFailure, ProbeResult, StageReport, StateReport};
pub use state::{LifecycleState, ParseStageError, Stage};
pub use whitelist::{is_path_whitelisted, WhitelistSet};
