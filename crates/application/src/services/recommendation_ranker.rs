//! Recommendation ranking
//!
//! Estimates each alternative, keeps strict improvements over the original
//! and orders them by resulting total emissions.

use std::cmp::Ordering;

use domain::{Alternative, EmissionEstimate, EmissionFactorTable, Recommendation};
use tracing::debug;

use crate::services::JourneyAggregator;

/// Default number of recommendations returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Orders improving alternatives
#[derive(Debug, Clone, Default)]
pub struct RecommendationRanker {
    aggregator: JourneyAggregator,
}

impl RecommendationRanker {
    /// Ranker estimating alternatives with `aggregator`
    #[must_use]
    pub const fn new(aggregator: JourneyAggregator) -> Self {
        Self { aggregator }
    }

    /// Rank `alternatives` against `original`
    ///
    /// Alternatives that cannot be estimated (for example a load that the
    /// new mode's factor basis cannot carry) are skipped. The result holds
    /// at most `max_results` entries, sorted by ascending total, then by
    /// fewest legs changed, then by earliest changed leg; remaining ties
    /// keep input order. An empty result means nothing improves on the
    /// original.
    pub fn rank(
        &self,
        table: &EmissionFactorTable,
        original: &EmissionEstimate,
        alternatives: impl IntoIterator<Item = Alternative>,
        max_results: usize,
    ) -> Vec<Recommendation> {
        if max_results == 0 {
            return Vec::new();
        }

        let original_total = original.total_kg();
        let mut improving: Vec<(Alternative, EmissionEstimate)> = alternatives
            .into_iter()
            .filter_map(|alternative| {
                match self.aggregator.aggregate(table, alternative.journey()) {
                    Ok(estimate) => Some((alternative, estimate)),
                    Err(e) => {
                        debug!(
                            alternative = %alternative.description(),
                            error = %e,
                            "Skipping alternative that could not be estimated"
                        );
                        None
                    },
                }
            })
            .filter(|(_, estimate)| estimate.total_kg() < original_total)
            .collect();

        improving.sort_by(|(a_alt, a_est), (b_alt, b_est)| compare(a_alt, a_est, b_alt, b_est));
        improving.truncate(max_results);

        improving
            .into_iter()
            .enumerate()
            .map(|(position, (alternative, estimate))| {
                Recommendation::new(position + 1, alternative, estimate, original_total)
            })
            .collect()
    }
}

fn compare(
    a_alt: &Alternative,
    a_est: &EmissionEstimate,
    b_alt: &Alternative,
    b_est: &EmissionEstimate,
) -> Ordering {
    a_est
        .total_kg()
        .total_cmp(&b_est.total_kg())
        .then_with(|| a_alt.legs_changed().cmp(&b_alt.legs_changed()))
        .then_with(|| a_alt.first_changed_leg().cmp(&b_alt.first_changed_leg()))
}
