//! Alternative journeys derived by mode substitution

use serde::Serialize;
use std::fmt;

use crate::entities::Journey;
use crate::value_objects::TransportMode;

/// One leg moved from one mode to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Position of the changed leg (0-based)
    pub leg_index: usize,
    /// Mode before substitution
    pub from: TransportMode,
    /// Mode after substitution
    pub to: TransportMode,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leg {}: {} → {}", self.leg_index + 1, self.from, self.to)
    }
}

/// A candidate journey with the substitutions that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    journey: Journey,
    substitutions: Vec<Substitution>,
    description: String,
}

impl Alternative {
    /// Create an alternative; the description is derived from the substitutions
    #[must_use]
    pub fn new(journey: Journey, substitutions: Vec<Substitution>) -> Self {
        let description = describe(&substitutions, journey.len());
        Self {
            journey,
            substitutions,
            description,
        }
    }

    /// The substituted journey
    #[must_use]
    pub const fn journey(&self) -> &Journey {
        &self.journey
    }

    /// Substitutions applied, in leg order
    #[must_use]
    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Human-readable summary of what changed
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of legs whose mode differs from the original
    #[must_use]
    pub fn legs_changed(&self) -> usize {
        self.substitutions.len()
    }

    /// Index of the earliest changed leg
    #[must_use]
    pub fn first_changed_leg(&self) -> Option<usize> {
        self.substitutions.iter().map(|s| s.leg_index).min()
    }
}

fn describe(substitutions: &[Substitution], leg_count: usize) -> String {
    match substitutions {
        [] => "no change".to_string(),
        [single] => format!("Switch {single}"),
        [first, ..]
            if substitutions.len() == leg_count
                && substitutions.iter().all(|s| s.to == first.to) =>
        {
            format!("Switch all legs to {}", first.to)
        },
        many => {
            let parts: Vec<String> = many.iter().map(ToString::to_string).collect();
            format!("Switch {}", parts.join(", "))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Leg;
    use crate::value_objects::Load;

    fn journey(modes: &[TransportMode]) -> Journey {
        Journey::new(
            modes
                .iter()
                .map(|m| Leg::from_km(*m, 100.0, Load::tonnes(1.0).unwrap()).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn single_substitution_description() {
        let alt = Alternative::new(
            journey(&[TransportMode::Rail]),
            vec![Substitution {
                leg_index: 0,
                from: TransportMode::Road,
                to: TransportMode::Rail,
            }],
        );
        assert_eq!(alt.description(), "Switch leg 1: Road → Rail");
        assert_eq!(alt.legs_changed(), 1);
        assert_eq!(alt.first_changed_leg(), Some(0));
    }

    #[test]
    fn whole_journey_description() {
        let subs = vec![
            Substitution {
                leg_index: 0,
                from: TransportMode::Road,
                to: TransportMode::Rail,
            },
            Substitution {
                leg_index: 1,
                from: TransportMode::Air,
                to: TransportMode::Rail,
            },
        ];
        let alt = Alternative::new(journey(&[TransportMode::Rail, TransportMode::Rail]), subs);
        assert_eq!(alt.description(), "Switch all legs to Rail");
        assert_eq!(alt.legs_changed(), 2);
    }

    #[test]
    fn partial_multi_substitution_description() {
        let subs = vec![
            Substitution {
                leg_index: 0,
                from: TransportMode::Road,
                to: TransportMode::Rail,
            },
            Substitution {
                leg_index: 2,
                from: TransportMode::Road,
                to: TransportMode::Rail,
            },
        ];
        let alt = Alternative::new(
            journey(&[TransportMode::Rail, TransportMode::Rail, TransportMode::Rail]),
            subs,
        );
        assert_eq!(
            alt.description(),
            "Switch leg 1: Road → Rail, leg 3: Road → Rail"
        );
        assert_eq!(alt.first_changed_leg(), Some(0));
    }
}
