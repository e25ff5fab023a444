//! Shared, atomically swappable emission factor table
//!
//! Every calculation takes one snapshot of the table at its start and uses
//! it throughout, so a concurrent refresh can never mix old and new factors
//! within a single result.

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use domain::{DomainError, EmissionFactorTable, TransportMode};
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::FactorSourcePort;

/// Process-wide handle to the current factor table
///
/// Cloning the handle shares the same underlying table.
#[derive(Debug, Clone)]
pub struct FactorTableHandle {
    inner: Arc<ArcSwap<EmissionFactorTable>>,
}

impl FactorTableHandle {
    /// Create a handle around an initial table
    #[must_use]
    pub fn new(table: EmissionFactorTable) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Handle around the built-in reference table
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EmissionFactorTable::builtin())
    }

    /// Load the initial table from a source
    pub fn from_source(source: &dyn FactorSourcePort) -> Result<Self, ApplicationError> {
        let table = source.load_table()?;
        info!(
            source = %source.describe(),
            version = %table.version(),
            entries = table.len(),
            "Emission factor table loaded"
        );
        Ok(Self::new(table))
    }

    /// Consistent snapshot of the current table
    #[must_use]
    pub fn snapshot(&self) -> Arc<EmissionFactorTable> {
        self.inner.load_full()
    }

    /// Version label of the current table
    #[must_use]
    pub fn version(&self) -> String {
        self.inner.load().version().to_string()
    }

    /// Replace the table as a unit
    ///
    /// The replacement must cover every mode the current table covers, so a
    /// refresh cannot make previously valid journeys fail with an unknown
    /// mode. The check and the swap are one compare-and-swap step; a
    /// concurrent refresh that lands first is checked against again.
    /// Returns the version label of the replaced table.
    #[instrument(skip(self, table), fields(new_version = %table.version()))]
    pub fn replace(&self, table: EmissionFactorTable) -> Result<String, ApplicationError> {
        let table = Arc::new(table);
        let mut current = self.inner.load_full();
        loop {
            let dropped = dropped_modes(&current, &table);
            if !dropped.is_empty() {
                warn!(dropped = ?dropped, "Rejected factor table refresh");
                return Err(DomainError::InvalidFactorTable(format!(
                    "refresh would drop modes: {}",
                    dropped.join(", ")
                ))
                .into());
            }

            let witnessed = self.inner.compare_and_swap(&current, Arc::clone(&table));
            if Arc::ptr_eq(&*witnessed, &current) {
                break;
            }
            current = Guard::into_inner(witnessed);
        }

        info!(
            old_version = %current.version(),
            new_version = %table.version(),
            "Emission factor table refreshed"
        );
        Ok(current.version().to_string())
    }

    /// Reload the table from a source and swap it in
    pub fn refresh_from(&self, source: &dyn FactorSourcePort) -> Result<String, ApplicationError> {
        let table = source.load_table().map_err(|e| {
            warn!(source = %source.describe(), error = %e, "Factor source failed, keeping current table");
            e
        })?;
        self.replace(table)
    }
}

fn dropped_modes(current: &EmissionFactorTable, next: &EmissionFactorTable) -> Vec<&'static str> {
    TransportMode::all()
        .iter()
        .filter(|mode| current.contains_mode(**mode) && !next.contains_mode(**mode))
        .map(TransportMode::key)
        .collect()
}

impl Default for FactorTableHandle {
    fn default() -> Self {
        Self::builtin()
    }
}
