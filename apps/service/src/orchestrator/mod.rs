//! Orchestration of the probe engine and the sample store.

pub mod service;


pub use service::{CheckReport, CheckReportView, MonitorService, Persistence};
