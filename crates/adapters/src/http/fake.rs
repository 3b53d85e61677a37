// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake HTTP adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HttpAdapter, HttpError, HttpResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub path: String,
    pub timeout: Duration,
}

#[derive(Clone)]
enum Route {
    Respond(HttpResponse),
    Refuse,
    TimeOut,
}

#[derive(Default)]
struct FakeHttpState {
    routes: HashMap<String, Route>,
    calls: Vec<HttpCall>,
}

/// Fake HTTP adapter for testing
///
/// Unrouted paths are refused, as if nothing listens on the port.
#[derive(Clone, Default)]
pub struct FakeHttpAdapter {
    inner: Arc<Mutex<FakeHttpState>>,
}

impl FakeHttpAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, path: &str, status: u16, body: &str) {
        self.set(path, Route::Respond(HttpResponse::new(status, body)));
    }

    pub fn refuse(&self, path: &str) {
        self.set(path, Route::Refuse);
    }

    pub fn time_out(&self, path: &str) {
        self.set(path, Route::TimeOut);
    }

    /// Get all recorded requests
    pub fn calls(&self) -> Vec<HttpCall> {
        self.inner.lock().calls.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.path).collect()
    }

    fn set(&self, path: &str, route: Route) {
        self.inner.lock().routes.insert(path.to_string(), route);
    }
}

#[async_trait]
impl HttpAdapter for FakeHttpAdapter {
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpResponse, HttpError> {
        let mut inner = self.inner.lock();
        inner.calls.push(HttpCall {
            path: path.to_string(),
            timeout,
        });
        let url = format!("fake://{}", path);
        match inner.routes.get(path).cloned().unwrap_or(Route::Refuse) {
            Route::Respond(response) => Ok(response),
            Route::Refuse => Err(HttpError::Refused {
                url,
                detail: "connection refused".to_string(),
            }),
            Route::TimeOut => Err(HttpError::TimedOut {
                url,
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}
