//! Domain-level errors

use thiserror::Error;

use crate::value_objects::{LoadBasis, LoadUnit};

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Transport mode outside the closed set, or absent from the factor table
    #[error("Unknown transport mode: {0}")]
    UnknownMode(String),

    /// Load unit cannot be expressed in the factor's basis
    #[error("Load unit {unit} is incompatible with factor basis {basis}")]
    UnitMismatch { unit: LoadUnit, basis: LoadBasis },

    /// Leg violates its invariants (distance, load, load factor)
    #[error("Invalid leg: {0}")]
    InvalidLeg(String),

    /// Journey has no legs
    #[error("Journey has no legs")]
    EmptyJourney,

    /// Factor table failed validation
    #[error("Invalid emission factor table: {0}")]
    InvalidFactorTable(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a unit mismatch error
    pub const fn unit_mismatch(unit: LoadUnit, basis: LoadBasis) -> Self {
        Self::UnitMismatch { unit, basis }
    }

    /// Create an invalid leg error
    pub fn invalid_leg(reason: impl Into<String>) -> Self {
        Self::InvalidLeg(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_mismatch_creates_correct_error() {
        let err = DomainError::unit_mismatch(LoadUnit::Passengers, LoadBasis::Tonne);
        match err {
            DomainError::UnitMismatch { unit, basis } => {
                assert_eq!(unit, LoadUnit::Passengers);
                assert_eq!(basis, LoadBasis::Tonne);
            },
            _ => unreachable!("Expected UnitMismatch error"),
        }
    }

    #[test]
    fn unit_mismatch_error_message_is_correct() {
        let err = DomainError::unit_mismatch(LoadUnit::Passengers, LoadBasis::Tonne);
        assert_eq!(
            err.to_string(),
            "Load unit passengers is incompatible with factor basis tonne-km"
        );
    }

    #[test]
    fn unknown_mode_error_message() {
        let err = DomainError::UnknownMode("hovercraft".to_string());
        assert_eq!(err.to_string(), "Unknown transport mode: hovercraft");
    }

    #[test]
    fn invalid_leg_error_message() {
        let err = DomainError::invalid_leg("distance must be positive");
        assert_eq!(err.to_string(), "Invalid leg: distance must be positive");
    }

    #[test]
    fn empty_journey_error_message() {
        assert_eq!(DomainError::EmptyJourney.to_string(), "Journey has no legs");
    }

    #[test]
    fn invalid_factor_table_error_message() {
        let err = DomainError::InvalidFactorTable("no entries".to_string());
        assert_eq!(err.to_string(), "Invalid emission factor table: no entries");
    }
}
