// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator over fake adapters for command tests.

use kl_adapters::{FakeHttpAdapter, FakeProcessAdapter, HostProbe};
use kl_core::test_support::{create_install_artifact, fabricated_capability, FAKE_PROCESS_LIST};
use kl_core::{DaemonTimeouts, Platform, PlatformCapability};
use kl_engine::auth::AUTHENTICATED_PATH;
use kl_engine::reachability::SYSTEM_PATH;
use kl_engine::whitelist::INCLUSIONS_PATH;
use kl_engine::Lifecycle;
use std::time::Duration;
use tempfile::TempDir;

pub type FakeLifecycle = Lifecycle<HostProbe<FakeProcessAdapter>, FakeHttpAdapter>;

pub struct Fixture {
    pub dir: TempDir,
    pub capability: PlatformCapability,
    pub process: FakeProcessAdapter,
    pub http: FakeHttpAdapter,
    pub lifecycle: FakeLifecycle,
}

pub fn fixture(platform: Platform) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let capability = fabricated_capability(platform, dir.path());
    let process = FakeProcessAdapter::new();
    let http = FakeHttpAdapter::new();
    let lifecycle = Lifecycle::new(
        HostProbe::new(capability.clone(), process.clone()),
        http.clone(),
        DaemonTimeouts {
            reachable: Duration::from_millis(50),
            request: Duration::from_millis(50),
        },
    );
    Fixture {
        dir,
        capability,
        process,
        http,
        lifecycle,
    }
}

impl Fixture {
    pub fn installed(self) -> Self {
        create_install_artifact(self.dir.path());
        self
    }

    pub fn running(self) -> Self {
        self.process.stdout(FAKE_PROCESS_LIST, "1 /usr/bin/kited\n");
        self
    }

    pub fn reachable(self) -> Self {
        self.http.route(SYSTEM_PATH, 200, "{}");
        self
    }

    pub fn authenticated(self) -> Self {
        self.http.route(AUTHENTICATED_PATH, 200, "");
        self
    }

    pub fn whitelist(self, body: &str) -> Self {
        self.http.route(INCLUSIONS_PATH, 200, body);
        self
    }
}
