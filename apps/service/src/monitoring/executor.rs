use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::checker::{Checker, HttpChecker};
use super::types::Sample;

/// Probe engine - issues one timed GET per call and turns the outcome into a `Sample`
///
/// Holds no mutable state, a single engine can serve concurrent probes.
#[derive(Clone)]
pub struct ProbeEngine {
    checker: Arc<dyn Checker>,
}

impl ProbeEngine {
    /// Engine backed by a reqwest client with a fixed per-call timeout
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self::with_checker(Arc::new(HttpChecker::new(timeout, user_agent)?)))
    }

    pub fn with_checker(checker: Arc<dyn Checker>) -> Self {
        Self { checker }
    }

    /// Probe `url` once. Transport failures come back as a failed `Sample`.
    pub async fn probe(&self, url: &str) -> Sample {
        match self.checker.check(url).await {
            Ok(exchange) => {
                let sample = Sample::completed(url, exchange.status_code, exchange.elapsed);
                info!(
                    url,
                    status_code = exchange.status_code,
                    response_time_ms = sample.response_time_ms(),
                    "probe completed"
                );
                sample
            }
            Err(e) => {
                warn!(url, error = %e, "probe failed");
                Sample::failed(url, e.to_string())
            }
        }
    }
}
