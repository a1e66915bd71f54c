use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Storage format of `response_times.timestamp`, fractional seconds optional
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// SampleRecord model - one persisted row of the response time history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: i64,
    pub url: String,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<f64>,
    /// Assigned by the database at insertion
    pub timestamp: DateTime<Utc>,
}

impl SampleRecord {
    /// Parse the text timestamp SQLite stores for `DATETIME` defaults
    pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| StoreError::Decode(format!("invalid timestamp {raw:?}: {e}")))
    }

    pub(crate) fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        let raw_timestamp: String = row.get(4)?;
        let status_code = row
            .get::<Option<i64>>(2)?
            .map(|code| {
                u16::try_from(code)
                    .map_err(|_| StoreError::Decode(format!("status code out of range: {code}")))
            })
            .transpose()?;

        Ok(Self {
            id: row.get(0)?,
            url: row.get(1)?,
            status_code,
            response_time_ms: row.get(3)?,
            timestamp: Self::parse_timestamp(&raw_timestamp)?,
        })
    }
}
