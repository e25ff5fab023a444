//! Distance value object
//!
//! Represents a strictly positive leg distance, normalised to kilometres.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Distance;
//!
//! let d = Distance::from_km(100.0).expect("valid distance");
//! assert!((d.km() - 100.0).abs() < f64::EPSILON);
//!
//! // Zero and negative distances are rejected
//! assert!(Distance::from_km(0.0).is_err());
//!
//! // Miles are converted on construction
//! let m = Distance::from_miles(1.0).expect("valid distance");
//! assert!((m.km() - 1.609_344).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Kilometres per statute mile
const KM_PER_MILE: f64 = 1.609_344;

/// Positive, finite distance in kilometres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Distance(f64);

impl Distance {
    /// Create a distance from kilometres
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeg` if the value is not a positive,
    /// finite number.
    pub fn from_km(km: f64) -> Result<Self, DomainError> {
        if km.is_finite() && km > 0.0 {
            Ok(Self(km))
        } else {
            Err(DomainError::invalid_leg(format!(
                "distance must be positive and finite, got {km} km"
            )))
        }
    }

    /// Create a distance from statute miles
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeg` if the value is not a positive,
    /// finite number.
    pub fn from_miles(miles: f64) -> Result<Self, DomainError> {
        Self::from_km(miles * KM_PER_MILE)
    }

    /// Get the distance in kilometres
    #[must_use]
    pub const fn km(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_km(value)
    }
}

/// Custom deserialization that validates the distance
impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::from_km(value).map_err(serde::de::Error::custom)
    }
}
