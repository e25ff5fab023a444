//! Fuel / vehicle subtype value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Normalised fuel or vehicle subtype within a transport mode
///
/// Keys are trimmed, lower-cased and use underscores, so `"Mini Truck"` and
/// `"mini_truck"` refer to the same factor table entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FuelSubtype(String);

impl FuelSubtype {
    /// Create a normalised subtype key
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the key is blank.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalised = raw
            .as_ref()
            .trim()
            .to_lowercase()
            .replace(['-', ' '], "_");
        if normalised.is_empty() {
            return Err(DomainError::ValidationError(
                "fuel subtype must not be blank".to_string(),
            ));
        }
        Ok(Self(normalised))
    }

    /// Wrap a key that is already in normalised form
    pub(crate) fn from_normalised(key: &'static str) -> Self {
        debug_assert_eq!(key, key.trim().to_lowercase().replace(['-', ' '], "_"));
        Self(key.to_string())
    }

    /// Get the subtype key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FuelSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FuelSubtype {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FuelSubtype {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FuelSubtype> for String {
    fn from(subtype: FuelSubtype) -> Self {
        subtype.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_and_separators() {
        let subtype = FuelSubtype::new("  Mini-Truck ").unwrap();
        assert_eq!(subtype.as_str(), "mini_truck");
        assert_eq!(subtype, FuelSubtype::new("mini truck").unwrap());
    }

    #[test]
    fn rejects_blank() {
        assert!(FuelSubtype::new("   ").is_err());
    }

    #[test]
    fn deserializes_with_normalisation() {
        let subtype: FuelSubtype = serde_json::from_str("\"Container Ship\"").unwrap();
        assert_eq!(subtype.as_str(), "container_ship");
    }

    #[test]
    fn deserialization_rejects_blank() {
        let result: Result<FuelSubtype, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
