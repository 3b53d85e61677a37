// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle orchestrator.
//!
//! Walks the ladder installed → running → reachable → authenticated,
//! stopping at the first stage that fails. Resolution is read-only and
//! never fails; only the explicit actions (`install`, `launch`, waiting)
//! return a [`LifecycleError`].

use crate::auth::AuthClient;
use crate::poll::{Poller, Tick};
use crate::reachability::ReachabilityClient;
use crate::whitelist::WhitelistClient;
use kl_adapters::{HttpAdapter, InstallOptions, PlatformProbe};
use kl_core::{
    Action, DaemonTimeouts, LifecycleError, LifecycleState, PollPolicy, ProbeResult, Stage,
    StageReport, StateReport, WhitelistSet,
};
use serde::Serialize;

/// What an idempotent action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionOutcome {
    Performed,
    /// The daemon was already in the requested state
    AlreadySatisfied,
}

/// Whether a project path may use daemon features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathAuthorization {
    pub state: LifecycleState,
    pub whitelisted: bool,
}

pub struct Lifecycle<P, H> {
    probe: P,
    reachability: ReachabilityClient<H>,
    auth: AuthClient<H>,
    whitelist: WhitelistClient<H>,
    timeouts: DaemonTimeouts,
}

impl<P: PlatformProbe, H: HttpAdapter> Lifecycle<P, H> {
    pub fn new(probe: P, http: H, timeouts: DaemonTimeouts) -> Self {
        Self {
            probe,
            reachability: ReachabilityClient::new(http.clone()),
            auth: AuthClient::new(http.clone()),
            whitelist: WhitelistClient::new(http),
            timeouts,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Current position on the full ladder.
    pub async fn resolve_state(&self) -> LifecycleState {
        self.diagnose().await.state
    }

    /// Walk the ladder only as far as `target`.
    ///
    /// Reports `target`'s passing state when every stage up to it passes.
    pub async fn resolve_until(&self, target: Stage) -> LifecycleState {
        self.diagnose_until(target).await.state
    }

    pub async fn diagnose(&self) -> StateReport {
        self.diagnose_until(Stage::Authenticated).await
    }

    /// Resolved state plus the outcome of every stage that was checked.
    pub async fn diagnose_until(&self, target: Stage) -> StateReport {
        if !self.probe.is_supported().await {
            tracing::debug!(platform = %self.probe.platform(), "platform not supported");
            return StateReport::unsupported();
        }

        let mut stages = Vec::new();
        for stage in target.through() {
            let result = self.check(stage).await;
            if !result.passed() {
                let state = result.state_for(stage);
                tracing::debug!(%stage, %state, "stage failed");
                stages.push(StageReport { stage, result });
                return StateReport { state, stages };
            }
            stages.push(StageReport { stage, result });
        }
        StateReport {
            state: target.passed(),
            stages,
        }
    }

    async fn check(&self, stage: Stage) -> ProbeResult {
        match stage {
            Stage::Installed => ProbeResult::from_bool(self.probe.is_installed().await),
            Stage::Running => ProbeResult::from_bool(self.probe.is_running().await),
            Stage::Reachable => self
                .reachability
                .check_reachable(self.timeouts.reachable)
                .await
                .probe_result(),
            Stage::Authenticated => self
                .auth
                .check_authenticated(self.timeouts.request)
                .await
                .probe_result(),
        }
    }

    /// Install the daemon unless it is already installed.
    pub async fn install(&self, options: &InstallOptions) -> Result<ActionOutcome, LifecycleError> {
        match self.resolve_until(Stage::Installed).await {
            LifecycleState::Unsupported => Err(LifecycleError::Unsupported),
            LifecycleState::Installed => {
                tracing::info!("already installed, skipping installer");
                Ok(ActionOutcome::AlreadySatisfied)
            }
            _ => {
                self.probe.install(options).await?;
                tracing::info!("install complete");
                Ok(ActionOutcome::Performed)
            }
        }
    }

    /// Launch the daemon unless it is already running.
    pub async fn launch(&self) -> Result<ActionOutcome, LifecycleError> {
        match self.resolve_until(Stage::Running).await {
            LifecycleState::Unsupported => Err(LifecycleError::Unsupported),
            LifecycleState::Running => {
                tracing::info!("already running, skipping launch");
                Ok(ActionOutcome::AlreadySatisfied)
            }
            LifecycleState::NotRunning => {
                self.probe.launch().await?;
                Ok(ActionOutcome::Performed)
            }
            state => Err(LifecycleError::BadState {
                action: Action::Launch,
                state,
            }),
        }
    }

    /// Launch, then poll until the API answers.
    pub async fn launch_and_wait(&self, policy: PollPolicy) -> Result<LifecycleState, LifecycleError> {
        self.launch().await?;
        match self.wait_for(Stage::Reachable, policy).await {
            Ok(state) => Ok(state),
            Err(LifecycleError::Unsupported) => Err(LifecycleError::Unsupported),
            Err(_) => Err(LifecycleError::NotReachable { timed_out: true }),
        }
    }

    /// Re-resolve up to `stage` until it is reached or `policy` runs out.
    ///
    /// On exhaustion returns the shortfall from the last resolution.
    pub async fn wait_for(
        &self,
        stage: Stage,
        policy: PollPolicy,
    ) -> Result<LifecycleState, LifecycleError> {
        let mut poller = Poller::new(policy);
        let mut last = None;
        while poller.tick().await == Tick::Ready {
            let report = self.diagnose_until(stage).await;
            match report.shortfall(stage) {
                None => return Ok(report.state),
                Some(LifecycleError::Unsupported) => return Err(LifecycleError::Unsupported),
                Some(err) => {
                    tracing::debug!(
                        %stage,
                        state = %report.state,
                        remaining = poller.remaining(),
                        "waiting"
                    );
                    last = Some(err);
                }
            }
        }
        Err(last.unwrap_or(LifecycleError::NotReachable { timed_out: true }))
    }

    /// Fetch the whitelist directly and test `path` against it.
    ///
    /// Any fetch failure reads as "not whitelisted".
    pub async fn is_path_whitelisted(&self, path: &str) -> bool {
        self.whitelisted_paths().await.contains_path(path)
    }

    pub async fn whitelisted_paths(&self) -> WhitelistSet {
        self.whitelist
            .fetch_whitelisted_paths(self.timeouts.request)
            .await
    }

    /// Resolve the full ladder, then check `path` once authenticated.
    pub async fn authorize_path(&self, path: &str) -> PathAuthorization {
        let state = self.resolve_state().await;
        let whitelisted = state == LifecycleState::Authenticated && self.is_path_whitelisted(path).await;
        PathAuthorization { state, whitelisted }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
