//! Correction predictor port
//!
//! A correction predictor maps the features of a leg to a multiplicative
//! adjustment of the static factor model, capturing learned deviations such
//! as traffic conditions or route-specific efficiency. Any regression,
//! lookup table or trained model can implement it.

use std::fmt;

use domain::{FuelSubtype, LoadBasis, TransportMode};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

/// Inputs a predictor sees for one leg
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegFeatures {
    /// Transport mode
    pub mode: TransportMode,
    /// Requested subtype, if any
    pub subtype: Option<FuelSubtype>,
    /// Distance in kilometres
    pub distance_km: f64,
    /// Load in the factor basis
    pub effective_load: f64,
    /// Factor basis
    pub basis: LoadBasis,
    /// Vehicle utilisation in (0, 1]
    pub load_factor: f64,
}

/// Capability mapping leg features to a positive multiplier
///
/// Values outside (0, 10] are treated as anomalies by the estimator and
/// discarded.
#[cfg_attr(test, automock)]
pub trait CorrectionPredictorPort: Send + Sync {
    /// Predict the correction multiplier for a leg
    fn predict_correction(&self, features: &LegFeatures) -> f64;
}

/// Adapter turning a plain function into a predictor
pub struct FnCorrectionPredictor<F> {
    predict: F,
}

impl<F> FnCorrectionPredictor<F>
where
    F: Fn(&LegFeatures) -> f64 + Send + Sync,
{
    /// Wrap a function
    pub const fn new(predict: F) -> Self {
        Self { predict }
    }
}

impl<F> fmt::Debug for FnCorrectionPredictor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCorrectionPredictor").finish_non_exhaustive()
    }
}

impl<F> CorrectionPredictorPort for FnCorrectionPredictor<F>
where
    F: Fn(&LegFeatures) -> f64 + Send + Sync,
{
    fn predict_correction(&self, features: &LegFeatures) -> f64 {
        (self.predict)(features)
    }
}
