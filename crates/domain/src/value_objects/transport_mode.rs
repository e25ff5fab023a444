//! Transport mode value object

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;
use crate::value_objects::{FuelSubtype, LoadBasis};

/// Transport mode classification
///
/// The closed set of modes the emission model understands. Vehicle and fuel
/// variations within a mode (truck vs. van, electric vs. diesel traction) are
/// expressed as a [`FuelSubtype`](crate::value_objects::FuelSubtype) and live
/// in the factor table as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Road haulage (trucks, vans, cars)
    Road,
    /// Rail freight
    Rail,
    /// Sea and inland waterway shipping
    Sea,
    /// Air freight
    Air,
    /// Cargo bike
    Bike,
}

impl TransportMode {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Rail => "Rail",
            Self::Sea => "Sea",
            Self::Air => "Air",
            Self::Bike => "Bike",
        }
    }

    /// Machine key, matching the serialized form
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Rail => "rail",
            Self::Sea => "sea",
            Self::Air => "air",
            Self::Bike => "bike",
        }
    }

    /// Load basis the mode's built-in factor is expressed in
    #[must_use]
    pub const fn default_basis(&self) -> LoadBasis {
        LoadBasis::Tonne
    }

    /// Built-in mode-level intensity in kg CO2e per tonne-km
    #[must_use]
    pub const fn default_intensity(&self) -> f64 {
        match self {
            Self::Road => 0.088,
            Self::Rail => 0.023,
            Self::Sea => 0.007,
            Self::Air => 0.805,
            Self::Bike => 0.003,
        }
    }

    /// Get all modes in declaration order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::Road, Self::Rail, Self::Sea, Self::Air, Self::Bike]
    }

    /// Parse a mode name together with the vehicle subtype it implies
    ///
    /// Legacy vehicle names such as `barge` or `mini_truck` name a subtype
    /// of the built-in table as well as a mode; canonical mode names and
    /// generic aliases imply no subtype.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownMode` for unrecognised names.
    pub fn parse_with_subtype(s: &str) -> Result<(Self, Option<FuelSubtype>), DomainError> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let (mode, subtype) = match key.as_str() {
            "road" | "van" => (Self::Road, None),
            "car" => (Self::Road, Some("car")),
            "truck" => (Self::Road, Some("truck")),
            "mini_truck" => (Self::Road, Some("mini_truck")),
            "rail" | "train" => (Self::Rail, None),
            "railway" => (Self::Rail, Some("electric")),
            "sea" | "ship" => (Self::Sea, None),
            "seaway" => (Self::Sea, Some("container_ship")),
            "barge" => (Self::Sea, Some("barge")),
            "air" | "plane" => (Self::Air, None),
            "air_freight" => (Self::Air, Some("freighter")),
            "bike" | "bicycle" | "cargo_bike" => (Self::Bike, None),
            _ => return Err(DomainError::UnknownMode(s.to_string())),
        };
        Ok((mode, subtype.map(FuelSubtype::from_normalised)))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_subtype(s).map(|(mode, _)| mode)
    }
}

// Accepts the same names and aliases as `FromStr`
impl<'de> Deserialize<'de> for TransportMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
