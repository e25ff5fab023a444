//! Substitution plausibility policy
//!
//! Named, overridable rules deciding whether a leg may be moved onto
//! another mode. The policy is plain data so deployments can tune it from
//! configuration without code changes.

use std::fmt;

use domain::{Leg, TransportMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default longest leg a bike substitution may cover
const DEFAULT_MAX_BIKE_DISTANCE_KM: f64 = 20.0;

/// Default heaviest weight-based load an air substitution may carry
const DEFAULT_MAX_AIR_PAYLOAD_TONNES: f64 = 120.0;

/// A mode substitution that is never proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstitutionPair {
    /// Mode being replaced
    pub from: TransportMode,
    /// Replacement mode
    pub to: TransportMode,
}

/// Rule that rejected a substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlausibilityRule {
    /// Leg longer than `max_bike_distance_km`
    MaxBikeDistance,
    /// Weight-based load above `max_air_payload_tonnes`
    MaxAirPayload,
    /// Pair listed in `excluded_substitution_pairs`
    ExcludedPair,
}

impl PlausibilityRule {
    /// Configuration name of the rule
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MaxBikeDistance => "max_bike_distance_km",
            Self::MaxAirPayload => "max_air_payload_tonnes",
            Self::ExcludedPair => "excluded_substitution_pairs",
        }
    }
}

impl fmt::Display for PlausibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thresholds and exclusions applied during alternative generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityPolicy {
    /// Longest leg, in km, that may be moved onto a bike
    #[serde(default = "default_max_bike_distance_km")]
    pub max_bike_distance_km: f64,

    /// Heaviest weight-based load, in tonnes, that may be moved onto air
    #[serde(default = "default_max_air_payload_tonnes")]
    pub max_air_payload_tonnes: f64,

    /// Substitutions never proposed
    #[serde(default)]
    pub excluded_substitution_pairs: Vec<SubstitutionPair>,
}

const fn default_max_bike_distance_km() -> f64 {
    DEFAULT_MAX_BIKE_DISTANCE_KM
}

const fn default_max_air_payload_tonnes() -> f64 {
    DEFAULT_MAX_AIR_PAYLOAD_TONNES
}

impl Default for PlausibilityPolicy {
    fn default() -> Self {
        Self {
            max_bike_distance_km: default_max_bike_distance_km(),
            max_air_payload_tonnes: default_max_air_payload_tonnes(),
            excluded_substitution_pairs: Vec::new(),
        }
    }
}

impl PlausibilityPolicy {
    /// Add an excluded pair
    #[must_use]
    pub fn excluding(mut self, from: TransportMode, to: TransportMode) -> Self {
        self.excluded_substitution_pairs
            .push(SubstitutionPair { from, to });
        self
    }

    /// First rule the substitution of `leg` onto `to` violates, if any
    #[must_use]
    pub fn violation(&self, leg: &Leg, to: TransportMode) -> Option<PlausibilityRule> {
        let excluded = self
            .excluded_substitution_pairs
            .iter()
            .any(|pair| pair.from == leg.mode && pair.to == to);
        if excluded {
            return Some(PlausibilityRule::ExcludedPair);
        }

        match to {
            TransportMode::Bike if leg.distance.km() > self.max_bike_distance_km => {
                Some(PlausibilityRule::MaxBikeDistance)
            },
            TransportMode::Air
                if leg
                    .load
                    .as_tonnes()
                    .is_some_and(|t| t > self.max_air_payload_tonnes) =>
            {
                Some(PlausibilityRule::MaxAirPayload)
            },
            _ => None,
        }
    }

    /// Whether `leg` may be moved onto `to`; rejections are logged
    #[must_use]
    pub fn permits(&self, leg: &Leg, to: TransportMode) -> bool {
        match self.violation(leg, to) {
            Some(rule) => {
                debug!(
                    from = %leg.mode,
                    to = %to,
                    distance_km = leg.distance.km(),
                    rule = rule.name(),
                    "Substitution rejected by plausibility policy"
                );
                false
            },
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Load;

    fn leg(mode: TransportMode, km: f64, load: Load) -> Leg {
        Leg::from_km(mode, km, load).unwrap()
    }

    #[test]
    fn defaults() {
        let policy = PlausibilityPolicy::default();
        assert!((policy.max_bike_distance_km - 20.0).abs() < f64::EPSILON);
        assert!((policy.max_air_payload_tonnes - 120.0).abs() < f64::EPSILON);
        assert!(policy.excluded_substitution_pairs.is_empty());
    }

    #[test]
    fn bike_excluded_for_long_freight_leg() {
        let policy = PlausibilityPolicy::default();
        let long = leg(TransportMode::Road, 5000.0, Load::tonnes(2.0).unwrap());
        assert_eq!(
            policy.violation(&long, TransportMode::Bike),
            Some(PlausibilityRule::MaxBikeDistance)
        );
        assert!(!policy.permits(&long, TransportMode::Bike));
    }

    #[test]
    fn bike_allowed_at_limit() {
        let policy = PlausibilityPolicy::default();
        let short = leg(TransportMode::Road, 20.0, Load::kilograms(50.0).unwrap());
        assert!(policy.permits(&short, TransportMode::Bike));
    }

    #[test]
    fn air_excluded_for_heavy_bulk() {
        let policy = PlausibilityPolicy::default();
        let heavy = leg(TransportMode::Sea, 8000.0, Load::tonnes(500.0).unwrap());
        assert_eq!(
            policy.violation(&heavy, TransportMode::Air),
            Some(PlausibilityRule::MaxAirPayload)
        );
        let light = leg(TransportMode::Sea, 8000.0, Load::kilograms(900.0).unwrap());
        assert!(policy.permits(&light, TransportMode::Air));
    }

    #[test]
    fn passenger_loads_ignore_air_payload_limit() {
        let policy = PlausibilityPolicy::default();
        let passengers = leg(TransportMode::Rail, 800.0, Load::passengers(400).unwrap());
        assert!(policy.permits(&passengers, TransportMode::Air));
    }

    #[test]
    fn excluded_pairs_are_directional() {
        let policy = PlausibilityPolicy::default().excluding(TransportMode::Road, TransportMode::Sea);
        let road = leg(TransportMode::Road, 100.0, Load::tonnes(1.0).unwrap());
        let sea = leg(TransportMode::Sea, 100.0, Load::tonnes(1.0).unwrap());
        assert_eq!(
            policy.violation(&road, TransportMode::Sea),
            Some(PlausibilityRule::ExcludedPair)
        );
        assert!(policy.permits(&sea, TransportMode::Road));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let policy: PlausibilityPolicy = serde_json::from_str(
            r#"{"max_bike_distance_km": 5.0,
                "excluded_substitution_pairs": [{"from": "rail", "to": "air"}]}"#,
        )
        .unwrap();
        assert!((policy.max_bike_distance_km - 5.0).abs() < f64::EPSILON);
        assert!((policy.max_air_payload_tonnes - 120.0).abs() < f64::EPSILON);
        assert_eq!(
            policy.excluded_substitution_pairs,
            vec![SubstitutionPair {
                from: TransportMode::Rail,
                to: TransportMode::Air,
            }]
        );
    }

    #[test]
    fn rule_names_match_configuration_keys() {
        assert_eq!(PlausibilityRule::MaxBikeDistance.to_string(), "max_bike_distance_km");
        assert_eq!(PlausibilityRule::MaxAirPayload.name(), "max_air_payload_tonnes");
        assert_eq!(
            PlausibilityRule::ExcludedPair.name(),
            "excluded_substitution_pairs"
        );
    }
}
