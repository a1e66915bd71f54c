pub mod checker;
/// Probe engine - performs single timed HTTP probes
///
/// This module is responsible for:
/// - Executing one HTTP GET per probe with a fixed timeout
/// - Measuring the exchange latency
/// - Turning transport failures into data instead of errors
pub mod executor;
pub mod types;

pub use checker::{Checker, Exchange, HttpChecker, TransportError};
pub use executor::ProbeEngine;
pub use types::{ProbeOutcome, Sample};
