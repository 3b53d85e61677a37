// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP adapter backed by `reqwest`

use super::{HttpAdapter, HttpError, HttpResponse};
use async_trait::async_trait;
use std::time::Duration;

/// Sends requests to the daemon over loopback
#[derive(Clone)]
pub struct ReqwestHttpAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestHttpAdapter {
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        // Each probe must observe the daemon as it is now, not a pooled
        // connection to a previous instance.
        let client = reqwest::Client::builder()
            .no_proxy()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| HttpError::Transport {
                url: base_url.clone(),
                detail: e.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::TimedOut {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        HttpError::Refused {
            url: url.to_string(),
            detail: err.to_string(),
        }
    } else {
        HttpError::Transport {
            url: url.to_string(),
            detail: err.to_string(),
        }
    }
}

#[async_trait]
impl HttpAdapter for ReqwestHttpAdapter {
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpResponse, HttpError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(&url, timeout, e))?;
        // A status line means the daemon answered; a body that stalls or
        // breaks afterwards reads as empty.
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%url, status, error = %e, "response body unreadable");
                String::new()
            }
        };
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
#[path = "reqwest_tests.rs"]
mod tests;
