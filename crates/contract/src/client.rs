//! Blocking HTTP client.
//!
//! [`ApiClient`] delivers a [`RequestSpec`] and hands back an
//! [`ApiResponse`] holding status, headers, and the raw body. All calls are
//! synchronous from the scenario's point of view; a hung call blocks until
//! the configured timeout elapses. Transport problems surface as
//! [`ContractError::Transport`] and are never retried.

use std::time::Duration;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::TargetConfig;
use crate::error::{ContractError, ContractResult};
use crate::request::RequestSpec;

/// Blocking HTTP client for contract runs.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Creates a client with the configured timeout.
    pub fn new(config: &TargetConfig) -> ContractResult<Self> {
        Self::with_timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Creates a client with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> ContractResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Sends the request and collects the response.
    pub fn execute(&self, spec: RequestSpec) -> ContractResult<ApiResponse> {
        debug!(method = %spec.method, url = %spec.url, "Sending request");

        let mut request = self
            .http
            .request(spec.method, spec.url)
            .headers(spec.headers);
        if let Some(body) = spec.body {
            request = request.json(&body);
        }

        let response = request.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text()?;

        debug!(status = %status, bytes = text.len(), "Received response");

        Ok(ApiResponse {
            status,
            headers,
            text,
        })
    }
}

/// A received response: status, headers, and the raw body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The response status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw response body.
    pub text: String,
}

impl ApiResponse {
    /// Parses the body as JSON.
    ///
    /// An empty body parses as JSON `null`. A non-JSON body is an
    /// assertion failure: this engine verifies JSON contracts.
    pub fn json(&self) -> ContractResult<Value> {
        if self.text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.text).map_err(|e| {
            ContractError::assertion(format!(
                "response body is not valid JSON ({}): {}",
                e,
                preview(&self.text)
            ))
        })
    }

    /// Parses the body into a typed value.
    pub fn json_as<T: DeserializeOwned>(&self) -> ContractResult<T> {
        serde_json::from_str(&self.text).map_err(|e| {
            ContractError::assertion(format!(
                "response body does not match the expected shape ({}): {}",
                e,
                preview(&self.text)
            ))
        })
    }

    /// Returns the value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Truncates a body for inclusion in failure messages.
fn preview(text: &str) -> &str {
    let limit = 200;
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
