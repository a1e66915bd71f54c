//! Sample store
//!
//! Durable, append-only history of probe samples on top of a local LibSQL
//! (SQLite) database file.

pub mod error;
pub mod migrations;
pub mod models;
pub mod repository;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use models::SampleRecord;
pub use repository::{LibsqlSampleStore, SampleStore};
