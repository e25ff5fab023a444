//! Alternative journey generation
//!
//! Proposes mode substitutions for a journey: first one alternative per
//! (leg, candidate mode), in travel order, then whole-journey switches onto
//! each candidate mode. Only legs whose mode is not itself a candidate are
//! substituted, and every substitution must pass the plausibility policy.
//! The original journey is never modified.

use std::iter::FusedIterator;

use domain::{Alternative, Journey, Leg, Substitution, TransportMode};

use crate::services::PlausibilityPolicy;

/// Produces substitution alternatives under a plausibility policy
#[derive(Debug, Clone, Default)]
pub struct AlternativeGenerator {
    policy: PlausibilityPolicy,
}

impl AlternativeGenerator {
    /// Generator with the given policy
    #[must_use]
    pub const fn new(policy: PlausibilityPolicy) -> Self {
        Self { policy }
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> &PlausibilityPolicy {
        &self.policy
    }

    /// Lazily generate alternatives for `journey`
    ///
    /// Duplicate candidate modes are ignored; their first occurrence fixes
    /// the order. Each call returns a fresh sequence.
    #[must_use]
    pub fn generate<'a>(
        &'a self,
        journey: &'a Journey,
        candidate_modes: &[TransportMode],
    ) -> Alternatives<'a> {
        let mut candidates = Vec::with_capacity(candidate_modes.len());
        for mode in candidate_modes {
            if !candidates.contains(mode) {
                candidates.push(*mode);
            }
        }
        Alternatives {
            journey,
            policy: &self.policy,
            candidates,
            stage: Stage::PerLeg { leg: 0, candidate: 0 },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    PerLeg { leg: usize, candidate: usize },
    WholeJourney { candidate: usize },
    Done,
}

/// Lazy, finite sequence of alternatives for one journey
#[derive(Debug)]
pub struct Alternatives<'a> {
    journey: &'a Journey,
    policy: &'a PlausibilityPolicy,
    candidates: Vec<TransportMode>,
    stage: Stage,
}

impl Alternatives<'_> {
    fn is_replaceable(&self, leg: &Leg) -> bool {
        !self.candidates.contains(&leg.mode)
    }

    fn single_leg(&self, index: usize, to: TransportMode) -> Option<Alternative> {
        let original = &self.journey.legs()[index];
        if !self.is_replaceable(original) || !self.policy.permits(original, to) {
            return None;
        }
        let journey = self.journey.with_leg(index, original.substituted(to))?;
        Some(Alternative::new(
            journey,
            vec![Substitution {
                leg_index: index,
                from: original.mode,
                to,
            }],
        ))
    }

    fn whole_journey(&self, to: TransportMode) -> Option<Alternative> {
        let legs = self.journey.legs();
        let substitutions: Vec<Substitution> = legs
            .iter()
            .enumerate()
            .filter(|(_, leg)| self.is_replaceable(leg))
            .map(|(leg_index, leg)| Substitution {
                leg_index,
                from: leg.mode,
                to,
            })
            .collect();

        // single-leg switches were already proposed in the first stage
        if substitutions.len() < 2 {
            return None;
        }
        if !substitutions
            .iter()
            .all(|s| self.policy.permits(&legs[s.leg_index], to))
        {
            return None;
        }

        let substituted = legs
            .iter()
            .map(|leg| {
                if self.is_replaceable(leg) {
                    leg.substituted(to)
                } else {
                    leg.clone()
                }
            })
            .collect();
        let journey = Journey::new(substituted).ok()?;
        Some(Alternative::new(journey, substitutions))
    }
}

impl Iterator for Alternatives<'_> {
    type Item = Alternative;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::PerLeg { leg, candidate } => {
                    if leg >= self.journey.len() {
                        self.stage = if self.journey.len() > 1 {
                            Stage::WholeJourney { candidate: 0 }
                        } else {
                            Stage::Done
                        };
                        continue;
                    }
                    let Some(&to) = self.candidates.get(candidate) else {
                        self.stage = Stage::PerLeg {
                            leg: leg + 1,
                            candidate: 0,
                        };
                        continue;
                    };
                    self.stage = Stage::PerLeg {
                        leg,
                        candidate: candidate + 1,
                    };
                    if let Some(alternative) = self.single_leg(leg, to) {
                        return Some(alternative);
                    }
                },
                Stage::WholeJourney { candidate } => {
                    let Some(&to) = self.candidates.get(candidate) else {
                        self.stage = Stage::Done;
                        continue;
                    };
                    self.stage = Stage::WholeJourney {
                        candidate: candidate + 1,
                    };
                    if let Some(alternative) = self.whole_journey(to) {
                        return Some(alternative);
                    }
                },
                Stage::Done => return None,
            }
        }
    }
}

impl FusedIterator for Alternatives<'_> {}
