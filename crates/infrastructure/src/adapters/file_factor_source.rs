//! File-based factor source
//!
//! Reads an emission factor table from a TOML or JSON document, chosen by
//! file extension:
//!
//! ```toml
//! version = "2025-q1"
//!
//! [[factors]]
//! mode = "road"
//! intensity = 0.088
//!
//! [[factors]]
//! mode = "road"
//! subtype = "mini_truck"
//! intensity = 0.122
//! basis = "tonne"
//! ```
//!
//! The file is re-read on every `load_table` call so a refresh picks up
//! edits.

use std::fs;
use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::FactorSourcePort};
use domain::EmissionFactorTable;
use tracing::{debug, instrument};

/// Document formats understood by [`FileFactorSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorFileFormat {
    Toml,
    Json,
}

impl FactorFileFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse a table document in this format
    pub fn parse(self, content: &str) -> Result<EmissionFactorTable, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Loads the factor table from a file on disk
#[derive(Debug, Clone)]
pub struct FileFactorSource {
    path: PathBuf,
}

impl FileFactorSource {
    /// Source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the factor file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactorSourcePort for FileFactorSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_table(&self) -> Result<EmissionFactorTable, ApplicationError> {
        let format = FactorFileFormat::from_path(&self.path).ok_or_else(|| {
            ApplicationError::FactorSource(format!(
                "{}: unsupported factor file extension (expected .toml or .json)",
                self.path.display()
            ))
        })?;

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ApplicationError::FactorSource(format!("{}: {e}", self.path.display()))
        })?;

        let table = format.parse(&content).map_err(|e| {
            ApplicationError::FactorSource(format!("{}: {e}", self.path.display()))
        })?;

        debug!(version = %table.version(), entries = table.len(), "Parsed factor file");
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
