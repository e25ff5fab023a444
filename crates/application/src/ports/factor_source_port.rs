//! Emission factor data source port
//!
//! Defines how the engine obtains reference emission factors. Loading may
//! involve I/O (files, historical datasets, remote services); the engine
//! only ever sees the finished, validated table.

use domain::EmissionFactorTable;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Read-only provider of emission factor tables
#[cfg_attr(test, automock)]
pub trait FactorSourcePort: Send + Sync {
    /// Load a complete table
    ///
    /// Implementations return a whole table or an error, never a partial one.
    fn load_table(&self) -> Result<EmissionFactorTable, ApplicationError>;

    /// Short description of where the data comes from (for logs)
    fn describe(&self) -> String;
}
