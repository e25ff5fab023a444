//! Emission estimate entity
//!
//! The result of estimating a leg or a journey. Built once from per-leg
//! contributions and read-only afterwards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::value_objects::{FuelSubtype, LoadBasis, TransportMode};

/// Kilograms per metric tonne
const KG_PER_TONNE: f64 = 1000.0;

/// Emissions attributed to one leg
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegContribution {
    /// Position of the leg in the journey (0-based)
    pub index: usize,
    /// Mode the leg travelled on
    pub mode: TransportMode,
    /// Subtype of the factor entry actually used (`None` = mode default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_subtype: Option<FuelSubtype>,
    /// Leg display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Distance in kilometres
    pub distance_km: f64,
    /// Load expressed in the factor basis
    pub effective_load: f64,
    /// Basis of the factor used
    pub basis: LoadBasis,
    /// Emitted mass in kg CO2e
    pub emission_kg: f64,
    /// Intensity from the factor table
    pub base_intensity: f64,
    /// Intensity after load factor and correction
    pub adjusted_intensity: f64,
    /// Correction multiplier applied, if any was accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<f64>,
}

impl LegContribution {
    /// Transport work (distance × effective load), e.g. tonne-km
    #[must_use]
    pub fn transport_work(&self) -> f64 {
        self.distance_km * self.effective_load
    }
}

/// Estimated emissions for a leg or a journey
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionEstimate {
    total_kg: f64,
    total_distance_km: f64,
    legs: Vec<LegContribution>,
    by_mode: BTreeMap<TransportMode, f64>,
    factor_table_version: String,
}

impl EmissionEstimate {
    /// Build an estimate from contributions in leg order
    #[must_use]
    pub fn from_contributions(
        legs: Vec<LegContribution>,
        factor_table_version: impl Into<String>,
    ) -> Self {
        let mut total_kg = 0.0;
        let mut total_distance_km = 0.0;
        let mut by_mode: BTreeMap<TransportMode, f64> = BTreeMap::new();
        for leg in &legs {
            total_kg += leg.emission_kg;
            total_distance_km += leg.distance_km;
            *by_mode.entry(leg.mode).or_insert(0.0) += leg.emission_kg;
        }
        Self {
            total_kg,
            total_distance_km,
            legs,
            by_mode,
            factor_table_version: factor_table_version.into(),
        }
    }

    /// Total emissions in kg CO2e
    #[must_use]
    pub const fn total_kg(&self) -> f64 {
        self.total_kg
    }

    /// Total emissions in tonnes CO2e
    #[must_use]
    pub fn total_tonnes(&self) -> f64 {
        self.total_kg / KG_PER_TONNE
    }

    /// Total distance in kilometres
    #[must_use]
    pub const fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Per-leg breakdown in leg order
    #[must_use]
    pub fn legs(&self) -> &[LegContribution] {
        &self.legs
    }

    /// Per-mode totals
    #[must_use]
    pub const fn by_mode(&self) -> &BTreeMap<TransportMode, f64> {
        &self.by_mode
    }

    /// Version label of the factor table used
    #[must_use]
    pub fn factor_table_version(&self) -> &str {
        &self.factor_table_version
    }

    /// Fraction of the total emitted by a mode (0 when total is zero)
    #[must_use]
    pub fn share_of(&self, mode: TransportMode) -> f64 {
        if self.total_kg <= 0.0 {
            return 0.0;
        }
        self.by_mode.get(&mode).copied().unwrap_or(0.0) / self.total_kg
    }

    /// Sum of transport work across legs
    #[must_use]
    pub fn total_transport_work(&self) -> f64 {
        self.legs.iter().map(LegContribution::transport_work).sum()
    }

    /// Emissions per unit of transport work, e.g. kg per tonne-km
    ///
    /// `None` when nothing was carried. Only meaningful when all legs share
    /// one basis.
    #[must_use]
    pub fn intensity_per_unit_km(&self) -> Option<f64> {
        let work = self.total_transport_work();
        (work > 0.0).then(|| self.total_kg / work)
    }
}
