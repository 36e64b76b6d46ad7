//! Transport seam between the request executor and the network.
//!
//! The executor's retry behavior is specified in terms of transport faults
//! and raw status/body pairs, so it talks to this trait rather than to
//! `reqwest` directly. Production uses `HttpTransport`; tests substitute an
//! in-memory mock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::request::HttpMethod;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A transport-level fault: the HTTP exchange itself did not complete.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),
}

impl TransportError {
    /// Connect-class faults are retryable within the executor's budget; a
    /// timeout already consumed the caller's deadline and is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

/// Raw HTTP exchange result before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One outbound HTTP call.
#[derive(Debug)]
pub struct TransportCall<'a> {
    pub method: HttpMethod,
    pub url: String,
    pub bearer: Option<&'a str>,
    pub body: Option<&'a Value>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, call: TransportCall<'_>) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by `reqwest`.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, call: TransportCall<'_>) -> Result<RawResponse, TransportError> {
        let mut request = match call.method {
            HttpMethod::Get => self.client.get(&call.url),
            HttpMethod::Post => self.client.post(&call.url),
        };

        if let Some(token) = call.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(classify_reqwest_error)?;

        Ok(RawResponse { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connect(err.to_string())
    }
}
