//! Probe-and-record pipeline.
//!
//! Runs one probe, hands completed samples to the store and reports what
//! happened to the write. Failed probes are returned to the caller but never
//! written to history.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::database::{SampleRecord, SampleStore, StoreError};
use crate::monitoring::{ProbeEngine, Sample};

/// What happened to a sample after the probe
#[derive(Debug)]
pub enum Persistence {
    /// Written to history under this id
    Stored(i64),
    /// Failed probe, intentionally not written
    Skipped,
    /// The store rejected the write
    Failed(StoreError),
}

impl Persistence {
    pub fn id(&self) -> Option<i64> {
        match self {
            Persistence::Stored(id) => Some(*id),
            _ => None,
        }
    }
}

/// Result of [`MonitorService::check`]
#[derive(Debug)]
pub struct CheckReport {
    pub sample: Sample,
    pub persistence: Persistence,
}

impl CheckReport {
    /// The store error, if the sample should have been recorded but was not
    pub fn store_error(&self) -> Option<&StoreError> {
        match &self.persistence {
            Persistence::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// JSON shape of a [`CheckReport`]
#[derive(Debug, Serialize)]
pub struct CheckReportView<'a> {
    #[serde(flatten)]
    pub sample: &'a Sample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

impl<'a> From<&'a CheckReport> for CheckReportView<'a> {
    fn from(report: &'a CheckReport) -> Self {
        Self {
            sample: &report.sample,
            id: report.persistence.id(),
            recorded: report.persistence.id().is_some(),
            store_error: report.store_error().map(ToString::to_string),
        }
    }
}

/// Ties the probe engine to the sample store
///
/// Owned by the caller (server or CLI) and shared behind `Arc`; nothing here
/// is global.
#[derive(Clone)]
pub struct MonitorService {
    engine: ProbeEngine,
    store: Arc<dyn SampleStore>,
}

impl MonitorService {
    pub fn new(engine: ProbeEngine, store: Arc<dyn SampleStore>) -> Self {
        Self { engine, store }
    }

    pub fn store(&self) -> &Arc<dyn SampleStore> {
        &self.store
    }

    /// Probe `url` without recording anything
    pub async fn probe(&self, url: &str) -> Sample {
        self.engine.probe(url).await
    }

    /// Probe `url` and record the sample when the exchange completed
    pub async fn check(&self, url: &str) -> CheckReport {
        let sample = self.engine.probe(url).await;

        let persistence = if !sample.is_completed() {
            debug!(url, "failed probe not recorded");
            Persistence::Skipped
        } else {
            match self.store.insert(&sample).await {
                Ok(id) => Persistence::Stored(id),
                Err(e) => {
                    error!(url, error = %e, "failed to record sample");
                    Persistence::Failed(e)
                }
            }
        };

        CheckReport { sample, persistence }
    }

    /// The `limit` most recent recorded samples, newest first
    pub async fn recent_history(&self, limit: usize) -> Result<Vec<SampleRecord>, StoreError> {
        self.store.recent_history(limit).await
    }
}
