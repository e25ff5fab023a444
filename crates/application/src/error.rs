//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Factor data source could not provide a table
    #[error("Factor source error: {0}")]
    FactorSource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error was caused by the caller's input rather than the
    /// engine or its collaborators
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                DomainError::UnknownMode(_)
                    | DomainError::UnitMismatch { .. }
                    | DomainError::InvalidLeg(_)
                    | DomainError::EmptyJourney
                    | DomainError::ValidationError(_)
            )
        )
    }
}
