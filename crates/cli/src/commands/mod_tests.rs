// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kl_core::{Action, Platform};

#[test]
fn poll_args_fall_back_to_config() {
    let base = PollPolicy {
        attempts: 30,
        interval: Duration::from_millis(2500),
    };
    assert_eq!(PollArgs::default().policy(base), base);

    let args = PollArgs {
        attempts: Some(2),
        interval_ms: Some(5),
    };
    assert_eq!(
        args.policy(base),
        PollPolicy {
            attempts: 2,
            interval: Duration::from_millis(5),
        }
    );
}

#[yare::parameterized(
    performed = { Action::Install, Some(ActionOutcome::Performed), "daemon installed (installed)" },
    already   = { Action::Install, Some(ActionOutcome::AlreadySatisfied), "daemon already installed (installed)" },
    waited    = { Action::Launch, None, "daemon launched (installed)" },
)]
fn action_report_text(action: Action, outcome: Option<ActionOutcome>, expected: &str) {
    let report = ActionReport {
        action,
        outcome,
        state: LifecycleState::Installed,
    };
    assert_eq!(report.text(), expected);
}

#[test]
fn action_report_json_omits_missing_outcome() {
    let report = ActionReport {
        action: Action::Launch,
        outcome: None,
        state: LifecycleState::Reachable,
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "action": "launch", "state": "reachable" })
    );
}

#[test]
fn system_lifecycle_builds_for_unsupported_platform() {
    let config = LifecycleConfig::for_platform(Platform::Unsupported);
    let lifecycle = system_lifecycle(&config).unwrap();
    assert_eq!(
        kl_adapters::PlatformProbe::platform(lifecycle.probe()),
        Platform::Unsupported
    );
}
