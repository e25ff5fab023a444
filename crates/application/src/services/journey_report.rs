//! Detailed journey report
//!
//! Flattens a journey and its estimate into rows and totals suitable for
//! tables and charts.

use domain::{EmissionEstimate, Journey, LoadBasis, TransportMode};
use serde::Serialize;

/// One leg of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// 1-based leg number
    pub leg: usize,
    /// Leg label, or "Leg N" when unlabelled
    pub label: String,
    pub mode: TransportMode,
    pub distance_km: f64,
    /// Load as entered, e.g. "1500 kilograms"
    pub load: String,
    /// Load in the factor basis
    pub effective_load: f64,
    pub basis: LoadBasis,
    pub emission_kg: f64,
    /// Intensity applied after load factor and correction
    pub intensity: f64,
    /// Share of the journey total, in percent
    pub share_percent: f64,
}

/// Emissions attributed to one mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeShare {
    pub mode: TransportMode,
    pub emission_kg: f64,
    pub share_percent: f64,
}

/// Per-leg rows with totals and mode shares
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyReport {
    pub factor_table_version: String,
    pub rows: Vec<ReportRow>,
    pub mode_shares: Vec<ModeShare>,
    pub total_kg: f64,
    pub total_tonnes: f64,
    pub total_distance_km: f64,
    /// Emissions per unit of transport work, absent for empty loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_per_unit_km: Option<f64>,
}

impl JourneyReport {
    /// Build a report for `journey` from its estimate
    #[must_use]
    pub fn build(journey: &Journey, estimate: &EmissionEstimate) -> Self {
        let total = estimate.total_kg();
        let percent = |kg: f64| if total > 0.0 { kg / total * 100.0 } else { 0.0 };

        let rows = estimate
            .legs()
            .iter()
            .map(|contribution| {
                let label = contribution
                    .label
                    .clone()
                    .unwrap_or_else(|| format!("Leg {}", contribution.index + 1));
                let load = journey
                    .legs()
                    .get(contribution.index)
                    .map(|leg| leg.load.to_string())
                    .unwrap_or_default();
                ReportRow {
                    leg: contribution.index + 1,
                    label,
                    mode: contribution.mode,
                    distance_km: contribution.distance_km,
                    load,
                    effective_load: contribution.effective_load,
                    basis: contribution.basis,
                    emission_kg: contribution.emission_kg,
                    intensity: contribution.adjusted_intensity,
                    share_percent: percent(contribution.emission_kg),
                }
            })
            .collect();

        let mode_shares = estimate
            .by_mode()
            .iter()
            .map(|(mode, kg)| ModeShare {
                mode: *mode,
                emission_kg: *kg,
                share_percent: estimate.share_of(*mode) * 100.0,
            })
            .collect();

        Self {
            factor_table_version: estimate.factor_table_version().to_string(),
            rows,
            mode_shares,
            total_kg: total,
            total_tonnes: estimate.total_tonnes(),
            total_distance_km: estimate.total_distance_km(),
            intensity_per_unit_km: estimate.intensity_per_unit_km(),
        }
    }
}
