// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: host processes, the daemon's HTTP API and
//! the per-platform probes built on them.

pub mod http;
pub mod probe;
pub mod process;
pub mod subprocess;
pub mod traced;

pub use http::{HttpAdapter, HttpError, HttpResponse, ReqwestHttpAdapter};
pub use probe::{
    HostProbe, InstallOptions, LinuxProbe, MacProbe, PlatformProbe, UnsupportedProbe,
    WindowsProbe,
};
pub use process::{ProcessAdapter, ProcessError, ProcessOutput, SystemProcessAdapter};
pub use traced::{TracedHttp, TracedProcess};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use http::{FakeHttpAdapter, HttpCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessAdapter, ProcessCall};
