use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a single probe.
///
/// A probe either completed an HTTP exchange (whatever the status code) or
/// failed at the transport level. The two never coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeOutcome {
    /// The server answered, 4xx and 5xx included
    Completed {
        status_code: u16,
        /// Elapsed wall-clock time of the exchange, rounded to 2 decimals
        response_time_ms: f64,
    },
    /// DNS, connect, TLS, timeout or malformed URL
    Failed { error: String },
}

/// One immutable probe observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// URL or target that was probed
    pub url: String,

    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl Sample {
    /// Sample for an exchange that produced a status code
    pub fn completed(url: impl Into<String>, status_code: u16, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            outcome: ProbeOutcome::Completed {
                status_code,
                response_time_ms: round_millis(elapsed),
            },
        }
    }

    /// Sample for a probe that never got a response
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self { url: url.into(), outcome: ProbeOutcome::Failed { error: error.into() } }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Completed { status_code, .. } => Some(status_code),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn response_time_ms(&self) -> Option<f64> {
        match self.outcome {
            ProbeOutcome::Completed { response_time_ms, .. } => Some(response_time_ms),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Completed { .. } => None,
            ProbeOutcome::Failed { error } => Some(error),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Completed { .. })
    }
}

/// Convert a duration to milliseconds rounded to 2 decimal places.
pub fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}
