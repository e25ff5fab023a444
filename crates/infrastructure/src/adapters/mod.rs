//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod builtin_factor_source;
mod file_factor_source;
mod lookup_correction_predictor;

pub use builtin_factor_source::BuiltinFactorSource;
pub use file_factor_source::{FactorFileFormat, FileFactorSource};
pub use lookup_correction_predictor::{CorrectionRule, LookupTableCorrectionPredictor};
