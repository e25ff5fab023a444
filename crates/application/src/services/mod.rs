//! Application services
//!
//! The engine is composed bottom-up: factor table handle, leg estimator,
//! journey aggregator, alternative generator, recommendation ranker, and
//! the `EmissionService` facade that ties them together.

mod alternative_generator;
mod emission_service;
mod factor_table;
mod journey_aggregator;
mod journey_report;
mod leg_estimator;
mod plausibility;
mod recommendation_ranker;

pub use alternative_generator::{AlternativeGenerator, Alternatives};
pub use emission_service::{EmissionService, RecommendationOutcome};
pub use factor_table::FactorTableHandle;
pub use journey_aggregator::JourneyAggregator;
pub use journey_report::{JourneyReport, ModeShare, ReportRow};
pub use leg_estimator::{LegEstimator, MAX_CORRECTION};
pub use plausibility::{PlausibilityPolicy, PlausibilityRule, SubstitutionPair};
pub use recommendation_ranker::{RecommendationRanker, DEFAULT_MAX_RESULTS};
