//! Journey aggregation
//!
//! Runs the leg estimator over every leg in travel order and sums the
//! results. Legs are estimated in isolation; no cross-leg effects.

use domain::{DomainError, EmissionEstimate, EmissionFactorTable, Journey, Leg};

use crate::error::ApplicationError;
use crate::services::LegEstimator;

/// Composes per-leg estimates into journey totals
#[derive(Debug, Clone, Default)]
pub struct JourneyAggregator {
    estimator: LegEstimator,
}

impl JourneyAggregator {
    /// Aggregator over the given leg estimator
    #[must_use]
    pub const fn new(estimator: LegEstimator) -> Self {
        Self { estimator }
    }

    /// The underlying leg estimator
    #[must_use]
    pub const fn estimator(&self) -> &LegEstimator {
        &self.estimator
    }

    /// Estimate a whole journey
    pub fn aggregate(
        &self,
        table: &EmissionFactorTable,
        journey: &Journey,
    ) -> Result<EmissionEstimate, ApplicationError> {
        self.aggregate_legs(table, journey.legs())
    }

    /// Estimate an ordered slice of legs
    ///
    /// Fails with `EmptyJourney` for an empty slice.
    pub fn aggregate_legs(
        &self,
        table: &EmissionFactorTable,
        legs: &[Leg],
    ) -> Result<EmissionEstimate, ApplicationError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney.into());
        }
        let contributions = legs
            .iter()
            .enumerate()
            .map(|(index, leg)| self.estimator.estimate(table, index, leg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EmissionEstimate::from_contributions(
            contributions,
            table.version(),
        ))
    }
}
