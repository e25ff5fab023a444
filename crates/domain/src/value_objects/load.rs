//! Load value objects
//!
//! A [`Load`] is what a leg carries, in the unit the caller measured it in.
//! An emission factor is expressed per unit of transport work in some
//! [`LoadBasis`]; [`Load::in_basis`] converts between the two or reports a
//! mismatch.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Kilograms per metric tonne
const KG_PER_TONNE: f64 = 1000.0;

/// Unit a leg's load is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadUnit {
    /// Cargo mass in kilograms
    #[serde(alias = "kg")]
    Kilograms,
    /// Cargo mass in metric tonnes
    #[serde(alias = "t")]
    Tonnes,
    /// Passenger count
    Passengers,
    /// Vehicle count
    Vehicles,
}

impl LoadUnit {
    /// Whether this unit measures mass
    #[must_use]
    pub const fn is_weight(&self) -> bool {
        matches!(self, Self::Kilograms | Self::Tonnes)
    }
}

impl fmt::Display for LoadUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Kilograms => "kilograms",
            Self::Tonnes => "tonnes",
            Self::Passengers => "passengers",
            Self::Vehicles => "vehicles",
        };
        write!(f, "{name}")
    }
}

/// Unit of transport work an emission factor is expressed per
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBasis {
    /// Per tonne-kilometre
    Tonne,
    /// Per passenger-kilometre
    Passenger,
    /// Per vehicle-kilometre
    Vehicle,
}

impl fmt::Display for LoadBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tonne => "tonne-km",
            Self::Passenger => "passenger-km",
            Self::Vehicle => "vehicle-km",
        };
        write!(f, "{name}")
    }
}

/// Non-negative load carried on a leg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoad")]
pub struct Load {
    value: f64,
    unit: LoadUnit,
}

#[derive(Deserialize)]
struct RawLoad {
    value: f64,
    unit: LoadUnit,
}

impl TryFrom<RawLoad> for Load {
    type Error = DomainError;

    fn try_from(raw: RawLoad) -> Result<Self, Self::Error> {
        Self::new(raw.value, raw.unit)
    }
}

impl Load {
    /// Create a load
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeg` if the value is negative or not finite.
    pub fn new(value: f64, unit: LoadUnit) -> Result<Self, DomainError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self { value, unit })
        } else {
            Err(DomainError::invalid_leg(format!(
                "load must be non-negative and finite, got {value} {unit}"
            )))
        }
    }

    /// Cargo mass in kilograms
    pub fn kilograms(value: f64) -> Result<Self, DomainError> {
        Self::new(value, LoadUnit::Kilograms)
    }

    /// Cargo mass in tonnes
    pub fn tonnes(value: f64) -> Result<Self, DomainError> {
        Self::new(value, LoadUnit::Tonnes)
    }

    /// Passenger count
    pub fn passengers(count: u32) -> Result<Self, DomainError> {
        Self::new(f64::from(count), LoadUnit::Passengers)
    }

    /// Raw value in the load's own unit
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Unit the load was measured in
    #[must_use]
    pub const fn unit(&self) -> LoadUnit {
        self.unit
    }

    /// Whether nothing is carried
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }

    /// Mass in tonnes, if this is a weight load
    #[must_use]
    pub fn as_tonnes(&self) -> Option<f64> {
        match self.unit {
            LoadUnit::Kilograms => Some(self.value / KG_PER_TONNE),
            LoadUnit::Tonnes => Some(self.value),
            LoadUnit::Passengers | LoadUnit::Vehicles => None,
        }
    }

    /// Express the load in the given factor basis
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnitMismatch` when the unit family differs from
    /// the basis (e.g. passengers against a tonne-km factor).
    pub fn in_basis(&self, basis: LoadBasis) -> Result<f64, DomainError> {
        match (self.unit, basis) {
            (LoadUnit::Kilograms | LoadUnit::Tonnes, LoadBasis::Tonne) => {
                self.as_tonnes().ok_or(DomainError::unit_mismatch(self.unit, basis))
            },
            (LoadUnit::Passengers, LoadBasis::Passenger)
            | (LoadUnit::Vehicles, LoadBasis::Vehicle) => Ok(self.value),
            (unit, basis) => Err(DomainError::unit_mismatch(unit, basis)),
        }
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
