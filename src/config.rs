//! Configuration file handling.
//!
//! An optional TOML file overrides the bench circuit values and adds datasets:
//!
//! ```toml
//! [circuit]
//! capacitance = "9.91(0.02)e-9"
//!
//! [[datasets]]
//! name = "bench"
//! nominal_resistance = 220.0
//! measurements = [[0.1, 0.02, 0.002], [1.0, 0.1, 0.002]]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::CircuitConstants;
use crate::constants::{
    CAPACITANCE_F, CAPACITANCE_UNCERTAINTY_F, INDUCTANCE_H, INDUCTANCE_UNCERTAINTY_H,
    SOURCE_VOLTAGE_UNCERTAINTY_V, SOURCE_VOLTAGE_V,
};
use crate::dataset::Dataset;
use crate::errors::AnalysisError;
use crate::math::Scalar;
use crate::uncertain::Uncertain;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extra datasets; these shadow built-ins of the same name.
    #[serde(default)]
    pub datasets: Vec<Dataset>,

    /// Circuit component values.
    #[serde(default)]
    pub circuit: CircuitConfig,
}

/// Component values written in uncertainty notation, e.g. `"12+/-0.1"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Inductance in henries.
    #[serde(default = "default_inductance")]
    pub inductance: String,

    /// Capacitance in farads.
    #[serde(default = "default_capacitance")]
    pub capacitance: String,

    /// Source amplitude in volts.
    #[serde(default = "default_source_voltage")]
    pub source_voltage: String,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            inductance: default_inductance(),
            capacitance: default_capacitance(),
            source_voltage: default_source_voltage(),
        }
    }
}

fn default_inductance() -> String {
    format!("{INDUCTANCE_H}+/-{INDUCTANCE_UNCERTAINTY_H}")
}

fn default_capacitance() -> String {
    format!("{CAPACITANCE_F:e}+/-{CAPACITANCE_UNCERTAINTY_F:e}")
}

fn default_source_voltage() -> String {
    format!("{SOURCE_VOLTAGE_V}+/-{SOURCE_VOLTAGE_UNCERTAINTY_V}")
}

fn parse_field(name: &str, value: &str) -> Result<Uncertain, AnalysisError> {
    value
        .parse()
        .map_err(|e| AnalysisError::Config(format!("circuit.{name}: {e}")))
}

impl CircuitConfig {
    /// Parses the configured values into circuit constants.
    pub fn to_constants(&self) -> Result<CircuitConstants, AnalysisError> {
        Ok(CircuitConstants::new(
            parse_field("inductance", &self.inductance)?,
            parse_field("capacitance", &self.capacitance)?,
            parse_field("source_voltage", &self.source_voltage)?,
        ))
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), datasets = config.datasets.len(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, AnalysisError> {
        toml::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Finds a dataset by name, preferring configured datasets over built-ins.
    pub fn dataset(&self, name: &str) -> Result<Dataset, AnalysisError> {
        match self.datasets.iter().find(|d| d.name == name) {
            Some(dataset) => Ok(dataset.clone()),
            None => Dataset::builtin(name),
        }
    }

    /// Finds the dataset recorded with `resistance`, configured datasets first.
    pub fn dataset_for_resistance(&self, resistance: Scalar) -> Result<Dataset, AnalysisError> {
        match self
            .datasets
            .iter()
            .find(|d| d.nominal_resistance == resistance)
        {
            Some(dataset) => Ok(dataset.clone()),
            None => Dataset::for_resistance(resistance),
        }
    }

    /// Default configuration as TOML, for `init-config`.
    pub fn default_toml() -> Result<String, AnalysisError> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| AnalysisError::Config(format!("failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_config_reproduces_bench_constants() {
        let constants = Config::default()
            .circuit
            .to_constants()
            .expect("defaults parse");
        let bench = CircuitConstants::default();
        assert_relative_eq!(constants.inductance.nominal(), bench.inductance.nominal());
        assert_relative_eq!(constants.capacitance.std_dev(), bench.capacitance.std_dev(), max_relative = 1.0e-12);
        assert_relative_eq!(constants.source_voltage.std_dev(), 0.1);
    }

    #[test]
    fn parses_partial_config() {
        let config = Config::parse(
            r#"
            [circuit]
            capacitance = "10.0(0.1)e-9"

            [[datasets]]
            name = "r100"
            nominal_resistance = 100.0
            measurements = [[12.9, 6.1, 0.05]]
            "#,
        )
        .expect("valid config");
        let constants = config.circuit.to_constants().expect("valid values");
        assert_relative_eq!(constants.capacitance.nominal(), 10.0e-9, max_relative = 1.0e-12);
        assert_relative_eq!(constants.inductance.nominal(), INDUCTANCE_H);

        // Configured data shadows the built-in dataset of the same name.
        assert_eq!(config.dataset("r100").expect("configured").len(), 1);
        assert_eq!(config.dataset("r1000").expect("built-in").len(), 17);
        assert!(config.dataset("missing").is_err());
        assert_eq!(config.dataset_for_resistance(100.0).expect("configured").len(), 1);
        assert_eq!(config.dataset_for_resistance(1_000.0).expect("built-in").len(), 17);
    }

    #[test]
    fn invalid_value_names_the_field() {
        let config = Config::parse("[circuit]\nsource_voltage = \"twelve\"\n").expect("valid toml");
        let err = config.circuit.to_constants().unwrap_err();
        assert!(err.to_string().contains("circuit.source_voltage"));
    }

    #[test]
    fn default_toml_round_trips() {
        let text = Config::default_toml().expect("default config serializes");
        assert!(text.contains("[circuit]"));
        let config = Config::parse(&text).expect("generated config parses");
        assert!(config.datasets.is_empty());
    }
}
