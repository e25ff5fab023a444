//! Factor source backed by the reference table compiled into the engine

use application::{error::ApplicationError, ports::FactorSourcePort};
use domain::EmissionFactorTable;

/// Serves `EmissionFactorTable::builtin()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFactorSource;

impl BuiltinFactorSource {
    /// Create the source
    pub const fn new() -> Self {
        Self
    }
}

impl FactorSourcePort for BuiltinFactorSource {
    fn load_table(&self) -> Result<EmissionFactorTable, ApplicationError> {
        Ok(EmissionFactorTable::builtin())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::TransportMode;

    #[test]
    fn serves_every_mode() {
        let table = BuiltinFactorSource::new().load_table().unwrap();
        for mode in TransportMode::all() {
            assert!(table.contains_mode(mode), "missing {mode}");
        }
        assert_eq!(BuiltinFactorSource.describe(), "builtin");
    }
}
