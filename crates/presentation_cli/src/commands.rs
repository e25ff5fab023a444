//! Command implementations
//!
//! Each command builds the engine from configuration, runs one operation and
//! returns its result as a JSON value for printing.

use std::fs;
use std::path::Path;

use anyhow::Context;
use domain::{Journey, TransportMode};
use infrastructure::AppConfig;
use serde_json::Value;
use tracing::{debug, info};

/// Read a journey document
///
/// Format: `{"legs": [{"mode": "road", "distance_km": 100.0,
/// "load": {"value": 1000.0, "unit": "kilograms"}}]}`
pub fn load_journey(path: &Path) -> anyhow::Result<Journey> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journey file {}", path.display()))?;
    let journey: Journey = serde_json::from_str(&content)
        .with_context(|| format!("Invalid journey file {}", path.display()))?;
    debug!(legs = journey.len(), path = %path.display(), "Loaded journey");
    Ok(journey)
}

pub fn estimate(config: &AppConfig, journey: &Path) -> anyhow::Result<Value> {
    let service = config.build_service()?;
    let journey = load_journey(journey)?;
    let estimate = service.estimate_journey(&journey)?;
    Ok(serde_json::to_value(&estimate)?)
}

pub fn recommend(
    config: &AppConfig,
    journey: &Path,
    modes: &[TransportMode],
    max_results: Option<usize>,
) -> anyhow::Result<Value> {
    let service = config.build_service()?;
    let journey = load_journey(journey)?;
    let candidates = if modes.is_empty() {
        config.ranking.candidate_modes.as_slice()
    } else {
        modes
    };

    let outcome = service.analyse(&journey, candidates, max_results)?;
    if outcome.already_optimal {
        info!("No lower-emission alternative found, journey is already optimal");
    }
    Ok(serde_json::to_value(&outcome)?)
}

pub fn report(config: &AppConfig, journey: &Path) -> anyhow::Result<Value> {
    let service = config.build_service()?;
    let journey = load_journey(journey)?;
    Ok(serde_json::to_value(service.report(&journey)?)?)
}

pub fn factors(config: &AppConfig) -> anyhow::Result<Value> {
    let service = config.build_service()?;
    let table = service.factor_table();
    Ok(serde_json::to_value(&*table)?)
}
