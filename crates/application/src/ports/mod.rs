//! Port definitions for application layer
//!
//! Ports are interfaces that define how the engine consumes external
//! capabilities. Adapters in the infrastructure layer implement these ports.

mod correction_predictor_port;
mod factor_source_port;

#[cfg(test)]
pub use correction_predictor_port::MockCorrectionPredictorPort;
pub use correction_predictor_port::{CorrectionPredictorPort, FnCorrectionPredictor, LegFeatures};
#[cfg(test)]
pub use factor_source_port::MockFactorSourcePort;
pub use factor_source_port::FactorSourcePort;
