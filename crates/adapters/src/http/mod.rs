// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP adapters for the daemon's local API

mod reqwest;

pub use self::reqwest::ReqwestHttpAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHttpAdapter, HttpCall};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from HTTP operations
///
/// Any HTTP status is a response, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("connection to {url} refused: {detail}")]
    Refused { url: String, detail: String },
    #[error("request to {url} timed out after {timeout_ms}ms")]
    TimedOut { url: String, timeout_ms: u64 },
    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },
}

impl HttpError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::TimedOut { .. })
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Adapter for GET requests against a fixed base URL
#[async_trait]
pub trait HttpAdapter: Clone + Send + Sync + 'static {
    /// GET `path` (e.g. `/system`), bounded by `timeout`.
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpResponse, HttpError>;
}
