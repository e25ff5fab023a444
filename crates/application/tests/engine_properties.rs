//! Property-based tests for the emission engine
//!
//! Exercises the engine through its public facade with random journeys
//! against the built-in factor table.

use application::{EmissionService, FactorTableHandle};
use domain::{DomainError, Journey, Leg, Load, TransportMode};
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = TransportMode> {
    prop_oneof![
        Just(TransportMode::Road),
        Just(TransportMode::Rail),
        Just(TransportMode::Sea),
        Just(TransportMode::Air),
        Just(TransportMode::Bike),
    ]
}

fn any_leg() -> impl Strategy<Value = Leg> {
    (any_mode(), 0.1f64..3_000.0f64, 0.0f64..50_000.0f64).prop_map(|(mode, km, kg)| {
        Leg::from_km(mode, km, Load::kilograms(kg).unwrap()).unwrap()
    })
}

fn any_journey() -> impl Strategy<Value = Journey> {
    prop::collection::vec(any_leg(), 1..8).prop_map(|legs| Journey::new(legs).unwrap())
}

const LOW_CARBON: [TransportMode; 3] =
    [TransportMode::Rail, TransportMode::Sea, TransportMode::Bike];

fn service() -> EmissionService {
    EmissionService::new(FactorTableHandle::builtin())
}

// ============================================================================
// Leg Estimation Properties
// ============================================================================

mod leg_tests {
    use super::*;

    proptest! {
        #[test]
        fn empty_load_emits_nothing(mode in any_mode(), km in 0.1f64..10_000.0f64) {
            let leg = Leg::from_km(mode, km, Load::tonnes(0.0).unwrap()).unwrap();
            let estimate = service().estimate_leg(&leg).unwrap();
            prop_assert!(estimate.total_kg().abs() < f64::EPSILON);
        }

        #[test]
        fn non_positive_distance_is_invalid(mode in any_mode(), km in -10_000.0f64..=0.0f64) {
            let result = Leg::from_km(mode, km, Load::tonnes(1.0).unwrap());
            prop_assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
        }

        #[test]
        fn emissions_are_never_negative(leg in any_leg()) {
            let estimate = service().estimate_leg(&leg).unwrap();
            prop_assert!(estimate.total_kg() >= 0.0);
        }
    }
}

// ============================================================================
// Journey Aggregation Properties
// ============================================================================

mod journey_tests {
    use super::*;

    proptest! {
        #[test]
        fn estimation_is_deterministic(journey in any_journey()) {
            let svc = service();
            let first = svc.estimate_journey(&journey).unwrap();
            let second = svc.estimate_journey(&journey).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn journey_total_is_sum_of_legs(journey in any_journey()) {
            let svc = service();
            let total = svc.estimate_journey(&journey).unwrap().total_kg();
            let sum: f64 = journey
                .legs()
                .iter()
                .map(|leg| svc.estimate_leg(leg).unwrap().total_kg())
                .sum();
            prop_assert!((total - sum).abs() <= 1e-9 * total.max(1.0));
        }

        #[test]
        fn mode_breakdown_sums_to_total(journey in any_journey()) {
            let estimate = service().estimate_journey(&journey).unwrap();
            let by_mode: f64 = estimate.by_mode().values().sum();
            prop_assert!((estimate.total_kg() - by_mode).abs() <= 1e-9 * by_mode.max(1.0));
        }
    }
}

// ============================================================================
// Recommendation Properties
// ============================================================================

mod recommendation_tests {
    use super::*;

    proptest! {
        #[test]
        fn recommendations_always_improve(journey in any_journey()) {
            let svc = service();
            let recommendations = svc
                .recommend(&journey, &LOW_CARBON, Some(50))
                .unwrap();
            for recommendation in &recommendations {
                prop_assert!(recommendation.delta_kg < 0.0);
            }
        }

        #[test]
        fn recommendations_sorted_ascending(journey in any_journey()) {
            let recommendations = service()
                .recommend(&journey, &LOW_CARBON, Some(50))
                .unwrap();
            for pair in recommendations.windows(2) {
                prop_assert!(pair[0].estimate.total_kg() <= pair[1].estimate.total_kg());
            }
            for (position, recommendation) in recommendations.iter().enumerate() {
                prop_assert_eq!(recommendation.rank, position + 1);
            }
        }

        #[test]
        fn results_respect_limit(journey in any_journey(), limit in 0usize..6) {
            let recommendations = service()
                .recommend(&journey, &LOW_CARBON, Some(limit))
                .unwrap();
            prop_assert!(recommendations.len() <= limit);
        }

        #[test]
        fn legs_on_candidate_modes_are_never_substituted(journey in any_journey()) {
            let recommendations = service()
                .recommend(&journey, &LOW_CARBON, Some(50))
                .unwrap();
            for recommendation in &recommendations {
                for substitution in recommendation.alternative.substitutions() {
                    prop_assert!(!LOW_CARBON.contains(&substitution.from));
                }
            }
        }

        #[test]
        fn every_mode_as_candidate_recommends_nothing(journey in any_journey()) {
            let recommendations = service()
                .recommend(&journey, &TransportMode::all(), Some(50))
                .unwrap();
            prop_assert!(recommendations.is_empty());
        }

        #[test]
        fn recommending_leaves_journey_untouched(journey in any_journey()) {
            let before = journey.clone();
            let _ = service().recommend(&journey, &LOW_CARBON, None).unwrap();
            prop_assert_eq!(journey, before);
        }
    }
}

#[test]
fn empty_journey_is_rejected() {
    let result = Journey::new(Vec::new());
    assert!(matches!(result, Err(DomainError::EmptyJourney)));
}

#[test]
fn empty_journey_document_is_rejected() {
    let result: Result<Journey, _> = serde_json::from_str(r#"{"legs": []}"#);
    assert!(result.is_err());
}
