//! Leg entity - one homogeneous transport segment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;
use crate::value_objects::{Distance, FuelSubtype, Load, LoadFactor, TransportMode};

/// A single-mode segment of a journey
///
/// Every field is a validated value object, so a `Leg` that exists always
/// satisfies distance > 0, load >= 0 and load factor in (0, 1].
///
/// When deserialized from a vehicle alias (`"barge"`, `"car"`) the alias's
/// subtype is used unless the leg names one explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLeg")]
pub struct Leg {
    /// Transport mode
    pub mode: TransportMode,
    /// Distance travelled
    #[serde(rename = "distance_km")]
    pub distance: Distance,
    /// What is carried
    pub load: Load,
    /// Fuel or vehicle subtype (falls back to the mode default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<FuelSubtype>,
    /// Vehicle utilisation (full when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<LoadFactor>,
    /// Display label, e.g. "Hamburg → Rotterdam"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Leg {
    /// Create a leg with no subtype, full utilisation and no label
    #[must_use]
    pub const fn new(mode: TransportMode, distance: Distance, load: Load) -> Self {
        Self {
            mode,
            distance,
            load,
            subtype: None,
            load_factor: None,
            label: None,
        }
    }

    /// Create a leg from a raw kilometre figure
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeg` if `distance_km` is not positive.
    pub fn from_km(mode: TransportMode, distance_km: f64, load: Load) -> Result<Self, DomainError> {
        Ok(Self::new(mode, Distance::from_km(distance_km)?, load))
    }

    /// Set the fuel/vehicle subtype
    #[must_use]
    pub fn with_subtype(mut self, subtype: FuelSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Set the vehicle load factor
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: LoadFactor) -> Self {
        self.load_factor = Some(load_factor);
        self
    }

    /// Set the display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Copy of this leg moved onto another mode
    ///
    /// Subtype and load factor describe the replaced vehicle, so they are
    /// cleared; distance, load and label carry over.
    #[must_use]
    pub fn substituted(&self, mode: TransportMode) -> Self {
        Self {
            mode,
            distance: self.distance,
            load: self.load,
            subtype: None,
            load_factor: None,
            label: self.label.clone(),
        }
    }

    /// Effective load factor (full when unspecified)
    #[must_use]
    pub fn effective_load_factor(&self) -> LoadFactor {
        self.load_factor.unwrap_or_default()
    }
}

/// Wire form of a leg before the mode name is resolved
#[derive(Deserialize)]
struct RawLeg {
    mode: String,
    distance_km: Distance,
    load: Load,
    #[serde(default)]
    subtype: Option<FuelSubtype>,
    #[serde(default)]
    load_factor: Option<LoadFactor>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawLeg> for Leg {
    type Error = DomainError;

    fn try_from(raw: RawLeg) -> Result<Self, Self::Error> {
        let (mode, implied) = TransportMode::parse_with_subtype(&raw.mode)?;
        Ok(Self {
            mode,
            distance: raw.distance_km,
            load: raw.load,
            subtype: raw.subtype.or(implied),
            load_factor: raw.load_factor,
            label: raw.label,
        })
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "{} {} carrying {}", self.mode, self.distance, self.load)
    }
}
