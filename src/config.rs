//! YAML bench configuration.
//!
//! Supply voltage, output ceiling, the measured vane table, and the
//! resistor catalog all live in one file so a different vane (or a
//! restocked parts drawer) never means editing source. Every field has a
//! compiled-in default matching the prototype hardware, so a missing or
//! partial file still works.
//!
//! ```yaml
//! # stationbench.yaml
//! vin: 3.3
//! target: 2.56
//! vane_table:
//!   - { ohms: 33000.0, degrees: 0.0 }
//!   - { ohms: 6570.0, degrees: 22.5 }
//! catalog:
//!   rows:
//!     - [1000.0, 10000.0, 100000.0]
//! ```

use crate::catalog::ResistorCatalog;
use crate::divider::VanePoint;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root bench configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Divider supply voltage in volts.
    #[serde(default = "default_vin")]
    pub vin: f64,
    /// Output ceiling the divider must hold across all bearings, volts.
    #[serde(default = "default_target")]
    pub target: f64,
    /// Measured vane switch resistances per compass bearing.
    #[serde(default = "default_vane_table")]
    pub vane_table: Vec<VanePoint>,
    /// Standard resistor values on hand.
    #[serde(default = "ResistorCatalog::e24")]
    pub catalog: ResistorCatalog,
}

fn default_vin() -> f64 {
    3.3
}

fn default_target() -> f64 {
    2.56
}

/// The sixteen switch positions of the stock vane, as measured on the
/// bench with the meter.
fn default_vane_table() -> Vec<VanePoint> {
    [
        (33_000.0, 0.0),
        (6_570.0, 22.5),
        (8_200.0, 45.0),
        (891.0, 67.5),
        (1_000.0, 90.0),
        (688.0, 112.5),
        (2_200.0, 135.0),
        (1_410.0, 157.5),
        (3_900.0, 180.0),
        (3_140.0, 202.5),
        (16_000.0, 225.0),
        (14_120.0, 247.5),
        (120_000.0, 270.0),
        (42_120.0, 292.5),
        (64_900.0, 315.0),
        (21_880.0, 337.5),
    ]
    .into_iter()
    .map(|(ohms, degrees)| VanePoint { ohms, degrees })
    .collect()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            vin: default_vin(),
            target: default_target(),
            vane_table: default_vane_table(),
            catalog: ResistorCatalog::e24(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&source)?)
    }

    /// Write this configuration as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_prototype_hardware() {
        let config = BenchConfig::default();
        assert_eq!(config.vin, 3.3);
        assert_eq!(config.target, 2.56);
        assert_eq!(config.vane_table.len(), 16);
        assert_eq!(config.catalog.rows.len(), 24);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: BenchConfig = serde_yaml::from_str("vin: 5.0\n").unwrap();
        assert_eq!(config.vin, 5.0);
        assert_eq!(config.target, 2.56);
        assert_eq!(config.vane_table.len(), 16);
    }

    #[test]
    fn yaml_round_trip() {
        let config = BenchConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reloaded: BenchConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reloaded.vin, config.vin);
        assert_eq!(reloaded.target, config.target);
        assert_eq!(reloaded.vane_table, config.vane_table);
        assert_eq!(reloaded.catalog, config.catalog);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.yaml");
        let config = BenchConfig::default();
        config.save(&path).unwrap();
        let reloaded = BenchConfig::load(&path).unwrap();
        assert_eq!(reloaded.vane_table, config.vane_table);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BenchConfig::load("/nonexistent/bench.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
