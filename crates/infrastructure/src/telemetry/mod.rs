//! Telemetry infrastructure
//!
//! Structured logging setup for the engine's front ends.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
