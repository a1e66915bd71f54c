use std::fmt::Write;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Transport-level failure of a probe, before any status code was received
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {timeout:?}: {detail}")]
    Timeout { timeout: Duration, detail: String },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// A completed HTTP exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub status_code: u16,
    pub elapsed: Duration,
}

/// Checker trait, the seam between the probe engine and the transport
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Perform one GET against `target` and time it
    async fn check(&self, target: &str) -> Result<Exchange, TransportError>;
}

/// HTTP/HTTPS checker
pub struct HttpChecker {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpChecker {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).user_agent(user_agent).build()?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        let detail = report(err);
        if err.is_timeout() {
            TransportError::Timeout { timeout: self.timeout, detail }
        } else if err.is_builder() {
            TransportError::InvalidUrl(detail)
        } else if err.is_connect() {
            TransportError::Connect(detail)
        } else {
            TransportError::Request(detail)
        }
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, target: &str) -> Result<Exchange, TransportError> {
        let start = Instant::now();

        let mut response = self.client.get(target).send().await.map_err(|e| self.classify(&e))?;
        let status_code = response.status().as_u16();

        // The body counts towards latency, a truncated one is still a failure
        let body_error = |e: reqwest::Error| match self.classify(&e) {
            TransportError::Request(detail) => TransportError::Body(detail),
            other => other,
        };
        while response.chunk().await.map_err(body_error)?.is_some() {}

        Ok(Exchange { status_code, elapsed: start.elapsed() })
    }
}

/// Render an error and its whole `source()` chain on one line
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = err.to_string();
    while let Some(src) = err.source() {
        let cause = src.to_string();
        if !s.contains(&cause) {
            let _ = write!(s, ": {cause}");
        }
        err = src;
    }
    s
}
