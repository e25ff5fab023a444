//! Vehicle utilisation value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Fraction of vehicle capacity in use, in (0, 1]
///
/// Emission factors assume a fully utilised vehicle; a lower load factor
/// scales emissions up by its reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct LoadFactor(f64);

impl LoadFactor {
    /// Create a validated load factor
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeg` if the value is not in (0, 1].
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_leg(format!(
                "load factor must be in (0, 1], got {value}"
            )))
        }
    }

    /// Fully utilised vehicle
    #[must_use]
    pub const fn full() -> Self {
        Self(1.0)
    }

    /// Get the fraction
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Multiplier applied to a full-load emission figure
    #[must_use]
    pub fn emission_multiplier(self) -> f64 {
        1.0 / self.0
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for LoadFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

impl<'de> Deserialize<'de> for LoadFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
