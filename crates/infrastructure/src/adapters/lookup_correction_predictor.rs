//! Lookup-table correction predictor
//!
//! Maps legs to correction multipliers through an ordered list of rules
//! keyed by mode, optional subtype and a distance band. The first matching
//! rule wins; legs matching no rule get a neutral multiplier of 1.0.

use application::ports::{CorrectionPredictorPort, LegFeatures};
use domain::{FuelSubtype, TransportMode};
use serde::{Deserialize, Serialize};

/// One row of the correction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRule {
    pub mode: TransportMode,

    /// Restrict the rule to one subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<FuelSubtype>,

    /// Inclusive lower distance bound
    #[serde(default)]
    pub min_distance_km: f64,

    /// Exclusive upper distance bound; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,

    pub multiplier: f64,
}

impl CorrectionRule {
    /// Rule for every leg of a mode
    pub const fn for_mode(mode: TransportMode, multiplier: f64) -> Self {
        Self {
            mode,
            subtype: None,
            min_distance_km: 0.0,
            max_distance_km: None,
            multiplier,
        }
    }

    /// Restrict to the band `[min_km, max_km)`
    #[must_use]
    pub const fn within(mut self, min_km: f64, max_km: Option<f64>) -> Self {
        self.min_distance_km = min_km;
        self.max_distance_km = max_km;
        self
    }

    /// Restrict to a subtype
    #[must_use]
    pub fn with_subtype(mut self, subtype: FuelSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    fn matches(&self, features: &LegFeatures) -> bool {
        self.mode == features.mode
            && self
                .subtype
                .as_ref()
                .is_none_or(|s| features.subtype.as_ref() == Some(s))
            && features.distance_km >= self.min_distance_km
            && self
                .max_distance_km
                .is_none_or(|max| features.distance_km < max)
    }
}

/// Predictor answering from a fixed rule table
#[derive(Debug, Clone, Default)]
pub struct LookupTableCorrectionPredictor {
    rules: Vec<CorrectionRule>,
}

impl LookupTableCorrectionPredictor {
    /// Predictor over rules in priority order
    pub const fn new(rules: Vec<CorrectionRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }
}

impl CorrectionPredictorPort for LookupTableCorrectionPredictor {
    fn predict_correction(&self, features: &LegFeatures) -> f64 {
        self.rules
            .iter()
            .find(|rule| rule.matches(features))
            .map_or(1.0, |rule| rule.multiplier)
    }
}
