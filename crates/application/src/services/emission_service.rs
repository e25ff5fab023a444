//! Emission service - entry point of the calculation and recommendation engine
//!
//! Wires the factor table, leg estimator, aggregator, alternative generator
//! and ranker together. Every call takes a single factor table snapshot and
//! uses it for all of its estimations.

use std::slice;
use std::sync::Arc;

use domain::{
    EmissionEstimate, EmissionFactorTable, Journey, Leg, Recommendation, TransportMode,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{CorrectionPredictorPort, FactorSourcePort};
use crate::services::{
    AlternativeGenerator, FactorTableHandle, JourneyAggregator, JourneyReport, LegEstimator,
    PlausibilityPolicy, RecommendationRanker, DEFAULT_MAX_RESULTS,
};

/// Original estimate together with its ranked recommendations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    /// Estimate of the journey as given
    pub original: EmissionEstimate,
    /// Improving alternatives, best first
    pub recommendations: Vec<Recommendation>,
    /// True when no alternative improves on the original
    pub already_optimal: bool,
}

/// Calculation and recommendation engine
#[derive(Debug, Clone)]
pub struct EmissionService {
    factors: FactorTableHandle,
    aggregator: JourneyAggregator,
    generator: AlternativeGenerator,
    ranker: RecommendationRanker,
    default_max_results: usize,
}

impl EmissionService {
    /// Create a service over a shared factor table
    #[must_use]
    pub fn new(factors: FactorTableHandle) -> Self {
        Self {
            factors,
            aggregator: JourneyAggregator::default(),
            generator: AlternativeGenerator::default(),
            ranker: RecommendationRanker::default(),
            default_max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Apply a correction predictor to every leg estimate
    #[must_use]
    pub fn with_predictor(mut self, predictor: Arc<dyn CorrectionPredictorPort>) -> Self {
        self.aggregator = JourneyAggregator::new(LegEstimator::with_predictor(predictor));
        self.ranker = RecommendationRanker::new(self.aggregator.clone());
        self
    }

    /// Replace the substitution plausibility policy
    #[must_use]
    pub fn with_policy(mut self, policy: PlausibilityPolicy) -> Self {
        self.generator = AlternativeGenerator::new(policy);
        self
    }

    /// Number of recommendations returned when the caller gives no limit
    #[must_use]
    pub const fn with_default_max_results(mut self, max_results: usize) -> Self {
        self.default_max_results = max_results;
        self
    }

    /// Shared factor table handle
    #[must_use]
    pub const fn factors(&self) -> &FactorTableHandle {
        &self.factors
    }

    /// Snapshot of the current factor table
    #[must_use]
    pub fn factor_table(&self) -> Arc<EmissionFactorTable> {
        self.factors.snapshot()
    }

    /// Active plausibility policy
    #[must_use]
    pub const fn policy(&self) -> &PlausibilityPolicy {
        self.generator.policy()
    }

    /// Estimate a single leg
    #[instrument(skip(self, leg), fields(mode = %leg.mode))]
    pub fn estimate_leg(&self, leg: &Leg) -> Result<EmissionEstimate, ApplicationError> {
        let table = self.factors.snapshot();
        self.aggregator
            .aggregate_legs(&table, slice::from_ref(leg))
    }

    /// Estimate a whole journey
    #[instrument(skip(self, journey), fields(legs = journey.len()))]
    pub fn estimate_journey(&self, journey: &Journey) -> Result<EmissionEstimate, ApplicationError> {
        let table = self.factors.snapshot();
        self.aggregator.aggregate(&table, journey)
    }

    /// Ranked lower-emission alternatives for a journey
    ///
    /// An empty result means the journey is already optimal for the given
    /// candidate modes.
    pub fn recommend(
        &self,
        journey: &Journey,
        candidate_modes: &[TransportMode],
        max_results: Option<usize>,
    ) -> Result<Vec<Recommendation>, ApplicationError> {
        self.analyse(journey, candidate_modes, max_results)
            .map(|outcome| outcome.recommendations)
    }

    /// Estimate a journey and rank its alternatives in one pass
    #[instrument(skip(self, journey, candidate_modes), fields(legs = journey.len(), candidates = candidate_modes.len()))]
    pub fn analyse(
        &self,
        journey: &Journey,
        candidate_modes: &[TransportMode],
        max_results: Option<usize>,
    ) -> Result<RecommendationOutcome, ApplicationError> {
        let table = self.factors.snapshot();
        let original = self.aggregator.aggregate(&table, journey)?;
        let limit = max_results.unwrap_or(self.default_max_results);

        let alternatives = self.generator.generate(journey, candidate_modes);
        let recommendations = self.ranker.rank(&table, &original, alternatives, limit);

        let already_optimal = recommendations.is_empty();
        debug!(
            original_kg = original.total_kg(),
            recommendations = recommendations.len(),
            already_optimal,
            "Recommendation complete"
        );

        Ok(RecommendationOutcome {
            original,
            recommendations,
            already_optimal,
        })
    }

    /// Detailed per-leg report
    pub fn report(&self, journey: &Journey) -> Result<JourneyReport, ApplicationError> {
        let estimate = self.estimate_journey(journey)?;
        Ok(JourneyReport::build(journey, &estimate))
    }

    /// Atomically replace the factor table, returning the previous version
    pub fn refresh_factor_table(
        &self,
        table: EmissionFactorTable,
    ) -> Result<String, ApplicationError> {
        self.factors.replace(table)
    }

    /// Reload the factor table from a source
    pub fn refresh_from_source(
        &self,
        source: &dyn FactorSourcePort,
    ) -> Result<String, ApplicationError> {
        info!(source = %source.describe(), "Refreshing emission factors");
        self.factors.refresh_from(source)
    }
}

impl Default for EmissionService {
    fn default() -> Self {
        Self::new(FactorTableHandle::builtin())
    }
}
