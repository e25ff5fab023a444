//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `carbonroute.toml` (or an explicit file), then environment variables
//! prefixed with `CARBONROUTE_` using `__` between nested keys, e.g.
//! `CARBONROUTE_RANKING__MAX_RESULTS=3`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::{
    EmissionService, FactorSourcePort, FactorTableHandle, MAX_CORRECTION, PlausibilityPolicy,
    error::ApplicationError,
};
use domain::TransportMode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::{
    BuiltinFactorSource, CorrectionRule, FileFactorSource, LookupTableCorrectionPredictor,
};
use crate::telemetry::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CARBONROUTE";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "carbonroute";

/// Where the emission factor table comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorSourceKind {
    /// Reference table compiled into the engine
    #[default]
    Builtin,
    /// TOML or JSON file at `factors.path`
    File,
}

impl fmt::Display for FactorSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Factor table configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorsConfig {
    #[serde(default)]
    pub source: FactorSourceKind,

    /// Factor file, required when `source = "file"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Recommendation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Recommendations returned when the caller gives no limit
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Modes considered when the caller names none; legs already on one of
    /// these are left alone
    #[serde(default = "default_candidate_modes")]
    pub candidate_modes: Vec<TransportMode>,
}

const fn default_max_results() -> usize {
    application::DEFAULT_MAX_RESULTS
}

fn default_candidate_modes() -> Vec<TransportMode> {
    vec![TransportMode::Rail, TransportMode::Sea, TransportMode::Bike]
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            candidate_modes: default_candidate_modes(),
        }
    }
}

/// Correction predictor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Apply the rule table to estimates
    #[serde(default)]
    pub enabled: bool,

    /// Rules in priority order
    #[serde(default)]
    pub rules: Vec<CorrectionRule>,
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub factors: FactorsConfig,

    /// Substitution plausibility policy
    #[serde(default)]
    pub plausibility: PlausibilityPolicy,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub correction: CorrectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// An explicit `path` must exist; without one, `carbonroute.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("factors.source", "builtin")?
            .set_default("ranking.max_results", default_max_results() as u64)?
            .set_default("logging.filter", "warn")?
            .add_source(file)
            .add_source(env);

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check cross-field constraints the types cannot express
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.factors.source == FactorSourceKind::File && self.factors.path.is_none() {
            return Err(ApplicationError::Configuration(
                "factors.path is required when factors.source = \"file\"".to_string(),
            ));
        }

        let policy = &self.plausibility;
        for (name, value) in [
            ("max_bike_distance_km", policy.max_bike_distance_km),
            ("max_air_payload_tonnes", policy.max_air_payload_tonnes),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ApplicationError::Configuration(format!(
                    "plausibility.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if let Some(rule) = self
            .correction
            .rules
            .iter()
            .find(|r| !(r.multiplier > 0.0 && r.multiplier <= MAX_CORRECTION))
        {
            return Err(ApplicationError::Configuration(format!(
                "correction multiplier for {} must be in (0, {MAX_CORRECTION}], got {}",
                rule.mode.key(),
                rule.multiplier
            )));
        }

        Ok(())
    }

    /// Factor source selected by `factors`
    pub fn factor_source(&self) -> Result<Box<dyn FactorSourcePort>, ApplicationError> {
        match (self.factors.source, &self.factors.path) {
            (FactorSourceKind::Builtin, _) => Ok(Box::new(BuiltinFactorSource::new())),
            (FactorSourceKind::File, Some(path)) => Ok(Box::new(FileFactorSource::new(path))),
            (FactorSourceKind::File, None) => Err(ApplicationError::Configuration(
                "factors.path is required when factors.source = \"file\"".to_string(),
            )),
        }
    }

    /// Build the engine described by this configuration
    pub fn build_service(&self) -> Result<EmissionService, ApplicationError> {
        self.validate()?;
        let source = self.factor_source()?;
        let factors = FactorTableHandle::from_source(source.as_ref())?;

        let mut service = EmissionService::new(factors)
            .with_policy(self.plausibility.clone())
            .with_default_max_results(self.ranking.max_results);

        if self.correction.enabled {
            info!(
                rules = self.correction.rules.len(),
                "Correction predictor enabled"
            );
            service = service.with_predictor(Arc::new(LookupTableCorrectionPredictor::new(
                self.correction.rules.clone(),
            )));
        }

        Ok(service)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("ranking.candidate_modes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config.factors.source, FactorSourceKind::Builtin);
        assert_eq!(config.ranking.max_results, 5);
        assert_eq!(
            config.ranking.candidate_modes,
            vec![TransportMode::Rail, TransportMode::Sea, TransportMode::Bike]
        );
        assert_eq!(config.plausibility, PlausibilityPolicy::default());
        assert!(!config.correction.enabled);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn file_values_are_read() {
        let file = toml_file(
            r#"
[ranking]
max_results = 3
candidate_modes = ["rail", "sea"]

[plausibility]
max_bike_distance_km = 8.0
excluded_substitution_pairs = [{ from = "road", to = "air" }]

[correction]
enabled = true

[[correction.rules]]
mode = "road"
max_distance_km = 50.0
multiplier = 1.25
"#,
        );
        let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.ranking.max_results, 3);
        assert_eq!(
            config.ranking.candidate_modes,
            vec![TransportMode::Rail, TransportMode::Sea]
        );
        assert!((config.plausibility.max_bike_distance_km - 8.0).abs() < f64::EPSILON);
        assert!((config.plausibility.max_air_payload_tonnes - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.plausibility.excluded_substitution_pairs.len(), 1);
        assert!(config.correction.enabled);
        assert_eq!(config.correction.rules[0].max_distance_km, Some(50.0));
        config.validate().unwrap();
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[ranking]\nmax_results = 3\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("CARBONROUTE_RANKING__MAX_RESULTS", "7"),
                ("CARBONROUTE_RANKING__CANDIDATE_MODES", "rail,bike"),
                ("CARBONROUTE_LOGGING__JSON", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.ranking.max_results, 7);
        assert_eq!(
            config.ranking.candidate_modes,
            vec![TransportMode::Rail, TransportMode::Bike]
        );
        assert!(config.logging.json);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_with_env(Some(&dir.path().join("absent.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn file_source_requires_path() {
        let mut config = AppConfig::default();
        config.factors.source = FactorSourceKind::File;
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
        assert!(config.factor_source().is_err());
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        let mut config = AppConfig::default();
        config.plausibility.max_bike_distance_km = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_bike_distance_km"));
    }

    #[test]
    fn out_of_range_correction_is_rejected() {
        let mut config = AppConfig::default();
        config.correction.rules = vec![CorrectionRule::for_mode(TransportMode::Air, 12.0)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn builds_service_from_factor_file() {
        let factors = toml_file(
            r#"
version = "site-2025"
[[factors]]
mode = "road"
intensity = 0.1
[[factors]]
mode = "rail"
intensity = 0.03
"#,
        );
        let mut config = AppConfig::default();
        config.factors.source = FactorSourceKind::File;
        config.factors.path = Some(factors.path().to_path_buf());

        let service = config.build_service().unwrap();
        assert_eq!(service.factor_table().version(), "site-2025");
    }

    #[test]
    fn correction_rules_reach_the_engine() {
        let mut config = AppConfig::default();
        config.correction.enabled = true;
        config.correction.rules = vec![CorrectionRule::for_mode(TransportMode::Road, 2.0)];
        let service = config.build_service().unwrap();

        let leg = domain::Leg::from_km(
            TransportMode::Road,
            100.0,
            domain::Load::tonnes(1.0).unwrap(),
        )
        .unwrap();
        let estimate = service.estimate_leg(&leg).unwrap();
        let expected = 100.0 * TransportMode::Road.default_intensity() * 2.0;
        assert!((estimate.total_kg() - expected).abs() < 1e-9);
    }

    #[test]
    fn serializes_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn source_kind_display() {
        assert_eq!(FactorSourceKind::Builtin.to_string(), "builtin");
        assert_eq!(FactorSourceKind::File.to_string(), "file");
    }
}
