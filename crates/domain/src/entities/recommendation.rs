//! Ranked recommendation entity

use serde::Serialize;

use crate::entities::{Alternative, EmissionEstimate};

/// An improving alternative with its estimate and rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the ranking
    pub rank: usize,
    /// The alternative journey
    pub alternative: Alternative,
    /// Its emission estimate
    pub estimate: EmissionEstimate,
    /// Alternative total minus original total (negative = improvement)
    pub delta_kg: f64,
    /// Reduction relative to the original, in percent (positive = improvement)
    pub reduction_percent: f64,
}

impl Recommendation {
    /// Build a recommendation against the original total
    #[must_use]
    pub fn new(
        rank: usize,
        alternative: Alternative,
        estimate: EmissionEstimate,
        original_total_kg: f64,
    ) -> Self {
        let delta_kg = estimate.total_kg() - original_total_kg;
        let reduction_percent = if original_total_kg > 0.0 {
            -delta_kg / original_total_kg * 100.0
        } else {
            0.0
        };
        Self {
            rank,
            alternative,
            estimate,
            delta_kg,
            reduction_percent,
        }
    }

    /// Whether this alternative emits less than the original
    #[must_use]
    pub fn is_improvement(&self) -> bool {
        self.delta_kg < 0.0
    }
}
