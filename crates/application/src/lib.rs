//! Application layer - Use cases and orchestration
//!
//! Hosts the emission calculation and recommendation engine: leg estimation,
//! journey aggregation, alternative generation and ranking. Port definitions
//! describe the capabilities the engine consumes (factor data, correction
//! predictors); adapters in the infrastructure layer implement them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
