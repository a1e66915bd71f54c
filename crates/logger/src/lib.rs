//! Shared tracing setup for the upwatch binaries.

mod tracing;

pub use self::tracing::{LogFormat, init_tracing, init_tracing_with_level};
