// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kl_adapters::FakeHttpAdapter;

const TIMEOUT: Duration = Duration::from_millis(250);

#[yare::parameterized(
    ok           = { 200 },
    server_error = { 500 },
    unauthorized = { 401 },
    not_found    = { 404 },
)]
fn any_status_is_reachable(status: u16) {
    let http = FakeHttpAdapter::new();
    http.route(SYSTEM_PATH, status, "");
    let client = ReachabilityClient::new(http);
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let result = rt.block_on(client.check_reachable(TIMEOUT));
    assert_eq!(result, Reachability::Reachable { status });
    assert!(result.probe_result().passed());
}

#[tokio::test]
async fn refusal_is_not_reachable() {
    let http = FakeHttpAdapter::new();
    http.refuse(SYSTEM_PATH);
    let result = ReachabilityClient::new(http).check_reachable(TIMEOUT).await;
    assert!(!result.is_reachable());
    assert!(matches!(result, Reachability::Refused { .. }));
}

#[tokio::test]
async fn timeout_is_distinct_from_refusal() {
    let http = FakeHttpAdapter::new();
    http.time_out(SYSTEM_PATH);
    let result = ReachabilityClient::new(http.clone())
        .check_reachable(TIMEOUT)
        .await;
    assert_eq!(result, Reachability::TimedOut { timeout_ms: 250 });
    assert_eq!(
        result.probe_result(),
        ProbeResult::failed(ProbeFailure::TimedOut { timeout_ms: 250 })
    );
    assert_eq!(http.calls()[0].timeout, TIMEOUT);
}

#[test]
fn transport_errors_classify_as_refused() {
    let err = HttpError::Transport {
        url: "http://127.0.0.1:46624/system".to_string(),
        detail: "connection reset".to_string(),
    };
    assert_eq!(
        network_failure(&err),
        ProbeFailure::Refused {
            detail: "connection reset".to_string()
        }
    );
}
