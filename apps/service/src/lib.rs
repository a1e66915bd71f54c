//! upwatch core: single-shot HTTP probes and a durable, append-only history
//! of their results.

pub mod config;
pub mod database;
pub mod monitoring;
pub mod orchestrator;
pub mod pool;
pub mod validation;

pub use config::Config;
pub use database::{LibsqlSampleStore, SampleRecord, SampleStore, StoreError};
pub use monitoring::{ProbeEngine, ProbeOutcome, Sample};
pub use orchestrator::{CheckReport, CheckReportView, MonitorService, Persistence};

use std::sync::Arc;

/// Open and initialize the store described by `config` and wire it to a probe engine
pub async fn build_service(config: &Config) -> anyhow::Result<MonitorService> {
    let store =
        LibsqlSampleStore::open(&config.database.path, config.database.max_connections).await?;
    store.initialize().await?;

    let engine = ProbeEngine::new(config.probe.timeout(), &config.probe.user_agent)?;
    Ok(MonitorService::new(engine, Arc::new(store)))
}
