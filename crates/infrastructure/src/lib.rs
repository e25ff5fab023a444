//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: factor table sources
//! (built-in and file based), a lookup-table correction predictor, layered
//! configuration and log subscriber setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, CorrectionConfig, FactorSourceKind, FactorsConfig, RankingConfig,
};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
