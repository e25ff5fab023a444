//! Emission factor reference data
//!
//! An [`EmissionFactorTable`] maps `(mode, subtype)` to an intensity of
//! kg CO2e per unit of transport work. Tables are validated once on
//! construction and never mutated afterwards; a refresh builds a whole new
//! table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::DomainError;
use crate::value_objects::{FuelSubtype, LoadBasis, TransportMode};

/// Intensity of one mode/subtype combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Transport mode
    pub mode: TransportMode,
    /// Subtype; `None` marks the mode-level default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<FuelSubtype>,
    /// kg CO2e per unit distance per unit load
    pub intensity: f64,
    /// Unit of transport work the intensity is expressed per
    #[serde(default = "default_basis")]
    pub basis: LoadBasis,
}

const fn default_basis() -> LoadBasis {
    LoadBasis::Tonne
}

impl EmissionFactor {
    /// Mode-level default factor
    #[must_use]
    pub const fn mode_default(mode: TransportMode, intensity: f64, basis: LoadBasis) -> Self {
        Self {
            mode,
            subtype: None,
            intensity,
            basis,
        }
    }

    /// Subtype-specific factor
    #[must_use]
    pub const fn for_subtype(
        mode: TransportMode,
        subtype: FuelSubtype,
        intensity: f64,
        basis: LoadBasis,
    ) -> Self {
        Self {
            mode,
            subtype: Some(subtype),
            intensity,
            basis,
        }
    }

    /// Whether this is a mode-level default entry
    #[must_use]
    pub const fn is_mode_default(&self) -> bool {
        self.subtype.is_none()
    }
}

type FactorKey = (TransportMode, Option<FuelSubtype>);

/// Immutable, validated set of emission factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFactorTable", into = "RawFactorTable")]
pub struct EmissionFactorTable {
    version: String,
    entries: BTreeMap<FactorKey, EmissionFactor>,
}

/// Serialized form: a version label and a flat list of factors
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFactorTable {
    #[serde(default = "default_version")]
    version: String,
    factors: Vec<EmissionFactor>,
}

fn default_version() -> String {
    "unversioned".to_string()
}

impl TryFrom<RawFactorTable> for EmissionFactorTable {
    type Error = DomainError;

    fn try_from(raw: RawFactorTable) -> Result<Self, Self::Error> {
        Self::new(raw.version, raw.factors)
    }
}

impl From<EmissionFactorTable> for RawFactorTable {
    fn from(table: EmissionFactorTable) -> Self {
        Self {
            version: table.version,
            factors: table.entries.into_values().collect(),
        }
    }
}

impl EmissionFactorTable {
    /// Build and validate a table
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFactorTable` if the table is empty, an
    /// intensity is negative or not finite, an entry is duplicated, or a mode
    /// listed in the table has no mode-level default entry.
    pub fn new(
        version: impl Into<String>,
        factors: impl IntoIterator<Item = EmissionFactor>,
    ) -> Result<Self, DomainError> {
        let mut entries = BTreeMap::new();
        for factor in factors {
            if !factor.intensity.is_finite() || factor.intensity < 0.0 {
                return Err(DomainError::InvalidFactorTable(format!(
                    "intensity for {} must be finite and non-negative, got {}",
                    describe(&factor.mode, factor.subtype.as_ref()),
                    factor.intensity
                )));
            }
            let key = (factor.mode, factor.subtype.clone());
            if entries.insert(key, factor.clone()).is_some() {
                return Err(DomainError::InvalidFactorTable(format!(
                    "duplicate entry for {}",
                    describe(&factor.mode, factor.subtype.as_ref())
                )));
            }
        }

        if entries.is_empty() {
            return Err(DomainError::InvalidFactorTable(
                "table has no entries".to_string(),
            ));
        }

        let modes: BTreeSet<TransportMode> = entries.keys().map(|(mode, _)| *mode).collect();
        if let Some(missing) = modes
            .iter()
            .find(|mode| !entries.contains_key(&(**mode, None)))
        {
            return Err(DomainError::InvalidFactorTable(format!(
                "mode {} has subtype entries but no mode-level default",
                missing.key()
            )));
        }

        Ok(Self {
            version: version.into(),
            entries,
        })
    }

    /// Reference table shipped with the engine (kg CO2e per tonne-km)
    #[must_use]
    pub fn builtin() -> Self {
        let subtype = |mode, key: &'static str, intensity| EmissionFactor {
            mode,
            subtype: Some(FuelSubtype::from_normalised(key)),
            intensity,
            basis: LoadBasis::Tonne,
        };
        let mut entries = BTreeMap::new();
        let mut factors: Vec<EmissionFactor> = TransportMode::all()
            .into_iter()
            .map(|mode| {
                EmissionFactor::mode_default(mode, mode.default_intensity(), mode.default_basis())
            })
            .collect();
        factors.extend([
            subtype(TransportMode::Road, "truck", 0.088),
            subtype(TransportMode::Road, "mini_truck", 0.122),
            subtype(TransportMode::Road, "car", 0.158),
            subtype(TransportMode::Rail, "electric", 0.023),
            subtype(TransportMode::Rail, "diesel", 0.028),
            subtype(TransportMode::Sea, "container_ship", 0.007),
            subtype(TransportMode::Sea, "barge", 0.035),
            subtype(TransportMode::Air, "freighter", 0.805),
            subtype(TransportMode::Bike, "e_cargo", 0.003),
        ]);
        for factor in factors {
            entries.insert((factor.mode, factor.subtype.clone()), factor);
        }
        Self {
            version: "builtin-2024".to_string(),
            entries,
        }
    }

    /// Version label of the data this table was built from
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up the factor for a mode and optional subtype
    ///
    /// An unspecified or unrecognised subtype falls back to the mode-level
    /// default; a missing subtype entry is never read as zero emissions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownMode` if the table has no entry for `mode`.
    pub fn lookup(
        &self,
        mode: TransportMode,
        subtype: Option<&FuelSubtype>,
    ) -> Result<&EmissionFactor, DomainError> {
        if let Some(subtype) = subtype {
            if let Some(factor) = self.entries.get(&(mode, Some(subtype.clone()))) {
                return Ok(factor);
            }
        }
        self.entries
            .get(&(mode, None))
            .ok_or_else(|| DomainError::UnknownMode(mode.key().to_string()))
    }

    /// Whether the table covers a mode
    #[must_use]
    pub fn contains_mode(&self, mode: TransportMode) -> bool {
        self.entries.contains_key(&(mode, None))
    }

    /// All factors, ordered by mode then subtype (defaults first)
    pub fn factors(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.entries.values()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated table
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn describe(mode: &TransportMode, subtype: Option<&FuelSubtype>) -> String {
    subtype.map_or_else(
        || mode.key().to_string(),
        |s| format!("{}/{}", mode.key(), s),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtype(key: &str) -> FuelSubtype {
        FuelSubtype::new(key).unwrap()
    }

    #[test]
    fn builtin_covers_every_mode() {
        let table = EmissionFactorTable::builtin();
        for mode in TransportMode::all() {
            assert!(table.contains_mode(mode), "{mode} missing");
        }
        assert_eq!(table.version(), "builtin-2024");
    }

    #[test]
    fn lookup_exact_subtype() {
        let table = EmissionFactorTable::builtin();
        let factor = table
            .lookup(TransportMode::Sea, Some(&subtype("barge")))
            .unwrap();
        assert!((factor.intensity - 0.035).abs() < f64::EPSILON);
        assert_eq!(factor.subtype, Some(subtype("barge")));
    }

    #[test]
    fn lookup_unknown_subtype_falls_back_to_mode_default() {
        let table = EmissionFactorTable::builtin();
        let factor = table
            .lookup(TransportMode::Road, Some(&subtype("hydrogen_truck")))
            .unwrap();
        assert!(factor.is_mode_default());
        assert!(factor.intensity > 0.0);
    }

    #[test]
    fn lookup_without_subtype_uses_default() {
        let table = EmissionFactorTable::builtin();
        let factor = table.lookup(TransportMode::Rail, None).unwrap();
        assert!((factor.intensity - 0.023).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_mode_absent_from_table_is_unknown() {
        let table = EmissionFactorTable::new(
            "road-only",
            [EmissionFactor::mode_default(TransportMode::Road, 0.1, LoadBasis::Tonne)],
        )
        .unwrap();
        let err = table.lookup(TransportMode::Air, None).unwrap_err();
        assert_eq!(err, DomainError::UnknownMode("air".to_string()));
    }

    #[test]
    fn rejects_empty_table() {
        let err = EmissionFactorTable::new("v", []).unwrap_err();
        assert!(matches!(err, DomainError::InvalidFactorTable(_)));
    }

    #[test]
    fn rejects_negative_intensity() {
        let err = EmissionFactorTable::new(
            "v",
            [EmissionFactor::mode_default(TransportMode::Road, -0.1, LoadBasis::Tonne)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn rejects_subtype_without_default() {
        let err = EmissionFactorTable::new(
            "v",
            [EmissionFactor::for_subtype(
                TransportMode::Rail,
                subtype("diesel"),
                0.03,
                LoadBasis::Tonne,
            )],
        )
        .unwrap_err();
        assert!(err.to_string().contains("no mode-level default"));
    }

    #[test]
    fn rejects_duplicates() {
        let factor = EmissionFactor::mode_default(TransportMode::Road, 0.1, LoadBasis::Tonne);
        let err = EmissionFactorTable::new("v", [factor.clone(), factor]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn deserializes_flat_list() {
        let json = r#"{
            "version": "2025-q1",
            "factors": [
                {"mode": "road", "intensity": 0.09},
                {"mode": "road", "subtype": "van", "intensity": 0.2},
                {"mode": "rail", "intensity": 0.02, "basis": "tonne"}
            ]
        }"#;
        let table: EmissionFactorTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.version(), "2025-q1");
        assert_eq!(table.len(), 3);
        let van = table
            .lookup(TransportMode::Road, Some(&subtype("van")))
            .unwrap();
        assert!((van.intensity - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"{"factors": [{"mode": "air", "subtype": "belly", "intensity": 0.6}]}"#;
        let result: Result<EmissionFactorTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn serialization_roundtrip_keeps_entries() {
        let table = EmissionFactorTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        let back: EmissionFactorTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
