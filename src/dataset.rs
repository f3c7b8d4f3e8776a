//! Recorded bench measurements.
//!
//! Each row is `(frequency in kHz, voltage across R, voltage uncertainty)`.
//! Rows are kept in the order they were taken on the bench, which is not
//! sorted by frequency: the resonance was bracketed after the coarse sweep.

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::math::Scalar;

/// Name of the data recorded with the 100 Ω resistor.
pub const R100: &str = "r100";
/// Name of the data recorded with the 1 kΩ resistor.
pub const R1000: &str = "r1000";

/// One hand-recorded reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Scalar, Scalar, Scalar)", into = "(Scalar, Scalar, Scalar)")]
pub struct RawMeasurement {
    /// Generator frequency in kHz.
    pub frequency_khz: Scalar,
    /// Peak voltage across the resistor in volts.
    pub voltage: Scalar,
    /// Reading uncertainty of `voltage` in volts.
    pub voltage_error: Scalar,
}

impl RawMeasurement {
    /// Creates a reading.
    #[must_use]
    pub const fn new(frequency_khz: Scalar, voltage: Scalar, voltage_error: Scalar) -> Self {
        Self {
            frequency_khz,
            voltage,
            voltage_error,
        }
    }
}

impl From<(Scalar, Scalar, Scalar)> for RawMeasurement {
    fn from((frequency_khz, voltage, voltage_error): (Scalar, Scalar, Scalar)) -> Self {
        Self::new(frequency_khz, voltage, voltage_error)
    }
}

impl From<RawMeasurement> for (Scalar, Scalar, Scalar) {
    fn from(m: RawMeasurement) -> Self {
        (m.frequency_khz, m.voltage, m.voltage_error)
    }
}

const RAW_100: [(Scalar, Scalar, Scalar); 21] = [
    (0.1, 0.0175, 0.0025),
    (1.0, 0.081, 0.002),
    (5.0, 0.46, 0.004),
    (8.0, 0.98, 0.004),
    (10.0, 1.9, 0.02),
    (12.96, 6.0, 0.08),
    (17.0, 1.52, 0.02),
    (20.0, 0.98, 0.02),
    (12.0, 5.28, 0.08),
    (14.0, 3.84, 0.02),
    (30.0, 0.416, 0.008),
    (40.0, 0.248, 0.004),
    (60.0, 0.068, 0.002),
    (80.0, 0.064, 0.002),
    (100.0, 0.158, 0.002),
    (13.54, 4.76, 0.04),
    (11.0, 3.08, 0.04),
    (11.52, 4.96, 0.04),
    (11.26, 3.48, 0.04),
    (11.435, 3.8, 0.04),
    (11.6, 4.2, 0.04),
];

const RAW_1000: [(Scalar, Scalar, Scalar); 17] = [
    (0.1, 0.092, 0.002),
    (1.0, 0.728, 0.002),
    (5.0, 4.2, 0.04),
    (10.0, 9.64, 0.04),
    (11.0, 10.5, 0.1),
    (12.0, 10.95, 0.05),
    (30.0, 3.82, 0.02),
    (13.0, 11.0, 0.1),
    (8.0, 7.3, 0.02),
    (14.0, 10.75, 0.05),
    (15.0, 10.25, 0.05),
    (20.0, 7.16, 0.04),
    (40.0, 2.44, 0.04),
    (60.0, 0.588, 0.004),
    (80.0, 0.556, 0.004),
    (100.0, 1.41, 0.005),
    (90.0, 1.05, 0.01),
];

/// A named series of readings taken with one resistor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Identifier used on the command line.
    pub name: String,
    /// Resistance in ohms the readings were recorded with.
    pub nominal_resistance: Scalar,
    /// Readings in bench order.
    pub measurements: Vec<RawMeasurement>,
}

impl Dataset {
    /// Creates a dataset.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        nominal_resistance: Scalar,
        measurements: Vec<RawMeasurement>,
    ) -> Self {
        Self {
            name: name.into(),
            nominal_resistance,
            measurements,
        }
    }

    fn from_rows(name: &str, nominal_resistance: Scalar, rows: &[(Scalar, Scalar, Scalar)]) -> Self {
        Self::new(
            name,
            nominal_resistance,
            rows.iter().copied().map(RawMeasurement::from).collect(),
        )
    }

    /// Readings taken with the 100 Ω resistor.
    #[must_use]
    pub fn r100() -> Self {
        Self::from_rows(R100, 100.0, &RAW_100)
    }

    /// Readings taken with the 1 kΩ resistor.
    #[must_use]
    pub fn r1000() -> Self {
        Self::from_rows(R1000, 1_000.0, &RAW_1000)
    }

    /// All datasets shipped with the crate.
    #[must_use]
    pub fn builtins() -> Vec<Self> {
        vec![Self::r100(), Self::r1000()]
    }

    /// Looks up a built-in dataset by name.
    pub fn builtin(name: &str) -> Result<Self, AnalysisError> {
        Self::builtins()
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| AnalysisError::UnknownDataset(name.to_string()))
    }

    /// Selects the built-in dataset recorded with `resistance`.
    pub fn for_resistance(resistance: Scalar) -> Result<Self, AnalysisError> {
        Self::builtins()
            .into_iter()
            .find(|d| d.nominal_resistance == resistance)
            .ok_or(AnalysisError::InvalidResistance(resistance))
    }

    /// Fails unless the data was recorded with `resistance`.
    pub fn check_resistance(&self, resistance: Scalar) -> Result<(), AnalysisError> {
        if self.nominal_resistance == resistance {
            Ok(())
        } else {
            Err(AnalysisError::DatasetMismatch {
                dataset: self.name.clone(),
                expected: self.nominal_resistance,
                resistance,
            })
        }
    }

    /// Number of readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// True when the dataset has no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sizes_match_notebook() {
        assert_eq!(Dataset::r100().len(), 21);
        assert_eq!(Dataset::r1000().len(), 17);
    }

    #[test]
    fn lookup_by_resistance_selects_matching_data() {
        let d = Dataset::for_resistance(1_000.0).expect("recorded");
        assert_eq!(d.name, R1000);
        assert_eq!(d.measurements[0], RawMeasurement::new(0.1, 0.092, 0.002));
        assert_eq!(Dataset::for_resistance(100.0).expect("recorded").name, R100);
    }

    #[test]
    fn unknown_resistance_is_rejected() {
        assert!(matches!(
            Dataset::for_resistance(470.0),
            Err(AnalysisError::InvalidResistance(r)) if r == 470.0
        ));
        assert!(matches!(
            Dataset::builtin("r47"),
            Err(AnalysisError::UnknownDataset(_))
        ));
    }

    #[test]
    fn mismatched_resistance_trips_guard() {
        let d = Dataset::r100();
        assert!(d.check_resistance(100.0).is_ok());
        let err = d.check_resistance(1_000.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DatasetMismatch { .. }));
        assert!(err.to_string().starts_with("wrong dataset"));
    }

    #[test]
    fn measurement_deserializes_from_triple() {
        let d: Dataset = toml::from_str(
            r#"
            name = "bench"
            nominal_resistance = 220.0
            measurements = [[0.1, 0.02, 0.002], [1.0, 0.1, 0.002]]
            "#,
        )
        .expect("valid dataset");
        assert_eq!(d.len(), 2);
        assert_eq!(d.measurements[1], RawMeasurement::new(1.0, 0.1, 0.002));
    }
}
