//! Leg estimator
//!
//! Computes the emissions of one homogeneous leg:
//! `distance × load (in factor basis) × intensity × 1/load_factor`,
//! optionally scaled by an injected correction predictor.

use std::fmt;
use std::sync::Arc;

use domain::{EmissionFactorTable, Leg, LegContribution};
use tracing::{trace, warn};

use crate::error::ApplicationError;
use crate::ports::{CorrectionPredictorPort, LegFeatures};

/// Upper bound for an accepted correction multiplier
pub const MAX_CORRECTION: f64 = 10.0;

/// Estimates single legs against a factor table
#[derive(Clone, Default)]
pub struct LegEstimator {
    predictor: Option<Arc<dyn CorrectionPredictorPort>>,
}

impl fmt::Debug for LegEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegEstimator")
            .field("has_predictor", &self.predictor.is_some())
            .finish()
    }
}

impl LegEstimator {
    /// Estimator using the static factor model only
    #[must_use]
    pub const fn new() -> Self {
        Self { predictor: None }
    }

    /// Estimator applying a correction predictor
    #[must_use]
    pub fn with_predictor(predictor: Arc<dyn CorrectionPredictorPort>) -> Self {
        Self {
            predictor: Some(predictor),
        }
    }

    /// Whether a correction predictor is attached
    #[must_use]
    pub const fn has_predictor(&self) -> bool {
        self.predictor.is_some()
    }

    /// Estimate one leg
    ///
    /// `index` is the leg's position in its journey and is carried into the
    /// contribution for breakdowns.
    pub fn estimate(
        &self,
        table: &EmissionFactorTable,
        index: usize,
        leg: &Leg,
    ) -> Result<LegContribution, ApplicationError> {
        let factor = table.lookup(leg.mode, leg.subtype.as_ref())?;
        let effective_load = leg.load.in_basis(factor.basis)?;
        let distance_km = leg.distance.km();
        let load_factor = leg.effective_load_factor();

        let base_intensity = factor.intensity;
        let static_intensity = base_intensity * load_factor.emission_multiplier();

        let correction = self.predictor.as_ref().and_then(|predictor| {
            let features = LegFeatures {
                mode: leg.mode,
                subtype: leg.subtype.clone(),
                distance_km,
                effective_load,
                basis: factor.basis,
                load_factor: load_factor.value(),
            };
            accept_correction(index, predictor.predict_correction(&features))
        });

        let adjusted_intensity = static_intensity * correction.unwrap_or(1.0);
        let emission_kg = distance_km * effective_load * adjusted_intensity;

        trace!(
            leg = index,
            mode = %leg.mode,
            distance_km,
            effective_load,
            adjusted_intensity,
            emission_kg,
            "Estimated leg"
        );

        Ok(LegContribution {
            index,
            mode: leg.mode,
            factor_subtype: factor.subtype.clone(),
            label: leg.label.clone(),
            distance_km,
            effective_load,
            basis: factor.basis,
            emission_kg,
            base_intensity,
            adjusted_intensity,
            correction,
        })
    }
}

/// Keep a correction only if it lies in (0, `MAX_CORRECTION`]
fn accept_correction(index: usize, correction: f64) -> Option<f64> {
    if correction.is_finite() && correction > 0.0 && correction <= MAX_CORRECTION {
        Some(correction)
    } else {
        warn!(
            leg = index,
            correction, "Rejected anomalous correction, using uncorrected estimate"
        );
        None
    }
}
