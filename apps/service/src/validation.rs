use anyhow::{Result, anyhow};

/// Longest accepted probe timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
/// Largest history page a caller may ask for
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Validation results with specific error messages
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(msg.into()) }
    }

    pub fn to_result(&self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(anyhow!(self.error.clone().unwrap_or_else(|| "Validation failed".to_string())))
        }
    }
}

/// Validate that a probe target was supplied
///
/// Only presence is checked. A malformed URL is still probed and reported
/// as a transport failure.
pub fn validate_probe_target(target: Option<&str>) -> ValidationResult {
    match target.map(str::trim) {
        Some(target) if !target.is_empty() => ValidationResult::ok(),
        _ => ValidationResult::err("Please provide a URL as a query parameter."),
    }
}

/// Validate probe timeout
pub fn validate_timeout(timeout_seconds: u64) -> ValidationResult {
    if timeout_seconds == 0 {
        return ValidationResult::err("Timeout must be at least 1 second");
    }

    if timeout_seconds > MAX_TIMEOUT_SECONDS {
        return ValidationResult::err(format!(
            "Timeout too long: {timeout_seconds} seconds (maximum: {MAX_TIMEOUT_SECONDS})"
        ));
    }

    ValidationResult::ok()
}

/// Validate the number of records returned by a history query
pub fn validate_history_limit(limit: usize) -> ValidationResult {
    if limit == 0 {
        return ValidationResult::err("History limit must be at least 1");
    }

    if limit > MAX_HISTORY_LIMIT {
        return ValidationResult::err(format!(
            "History limit too large: {limit} (maximum: {MAX_HISTORY_LIMIT})"
        ));
    }

    ValidationResult::ok()
}

/// Validate connection pool size
pub fn validate_pool_size(max_connections: usize) -> ValidationResult {
    if max_connections == 0 {
        return ValidationResult::err("Database pool needs at least 1 connection");
    }

    ValidationResult::ok()
}
