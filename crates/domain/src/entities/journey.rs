//! Journey entity - an ordered, non-empty sequence of legs

use serde::{Deserialize, Serialize};

use crate::entities::Leg;
use crate::errors::DomainError;
use crate::value_objects::TransportMode;

/// A shipment or trip as legs in travel order
///
/// Leg order is significant and preserved; a journey is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJourney")]
pub struct Journey {
    legs: Vec<Leg>,
}

#[derive(Deserialize)]
struct RawJourney {
    legs: Vec<Leg>,
}

impl TryFrom<RawJourney> for Journey {
    type Error = DomainError;

    fn try_from(raw: RawJourney) -> Result<Self, Self::Error> {
        Self::new(raw.legs)
    }
}

impl Journey {
    /// Create a journey from legs in travel order
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyJourney` if `legs` is empty.
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }
        Ok(Self { legs })
    }

    /// Journey consisting of a single leg
    #[must_use]
    pub fn single(leg: Leg) -> Self {
        Self { legs: vec![leg] }
    }

    /// Legs in travel order
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Sum of leg distances in kilometres
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance.km()).sum()
    }

    /// Distinct modes used, in order of first appearance
    #[must_use]
    pub fn modes(&self) -> Vec<TransportMode> {
        let mut modes = Vec::new();
        for leg in &self.legs {
            if !modes.contains(&leg.mode) {
                modes.push(leg.mode);
            }
        }
        modes
    }

    /// Copy of this journey with the leg at `index` replaced
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn with_leg(&self, index: usize, leg: Leg) -> Option<Self> {
        if index >= self.legs.len() {
            return None;
        }
        let mut legs = self.legs.clone();
        legs[index] = leg;
        Some(Self { legs })
    }
}

impl<'a> IntoIterator for &'a Journey {
    type Item = &'a Leg;
    type IntoIter = std::slice::Iter<'a, Leg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}
