//! Derived quantities for a single reading.

use std::fmt;

use nalgebra::DMatrix;
use tracing::{debug, warn};

use crate::circuits::{CircuitConstants, SeriesRlc};
use crate::constants::{angular_frequency, frequency_from_khz, resistance_with_tolerance};
use crate::dataset::{Dataset, RawMeasurement};
use crate::math::Scalar;
use crate::uncertain::{correlation_matrix, Uncertain};

/// One reading with every derived quantity and its propagated uncertainty.
#[derive(Debug, Clone)]
pub struct DataPoint {
    /// Series resistance (Ω), 1 % tolerance, independent per reading.
    pub resistance: Uncertain,
    /// Generator frequency (Hz).
    pub frequency: Uncertain,
    /// Voltage across the resistor (V).
    pub voltage: Uncertain,
    /// Angular frequency `2π f`.
    pub angular_frequency: Uncertain,
    /// Current from the measured voltage, `v / R`.
    pub measured_current: Uncertain,
    /// Current predicted by the series RLC model, `Vs / |Z|`.
    pub theoretical_current: Uncertain,
    /// Power dissipated in the resistor, `R I_m² / 2`.
    pub power: Uncertain,
}

impl DataPoint {
    /// Derives every quantity for `raw` analysed with `resistance` ohms.
    #[must_use]
    pub fn new(raw: &RawMeasurement, resistance: Scalar, constants: &CircuitConstants) -> Self {
        let resistance = resistance_with_tolerance(resistance);
        let frequency = frequency_from_khz(raw.frequency_khz);
        let voltage = Uncertain::new(raw.voltage, raw.voltage_error);
        let angular_frequency = angular_frequency(&frequency);

        let measured_current = &voltage / &resistance;
        let theoretical_current =
            SeriesRlc::new(constants, resistance.clone()).current(&angular_frequency);
        let power = &resistance * measured_current.powi(2) / 2.0;

        Self {
            resistance,
            frequency,
            voltage,
            angular_frequency,
            measured_current,
            theoretical_current,
            power,
        }
    }

    /// Correlation matrix of `(w, I_m, I_t, P)`.
    #[must_use]
    pub fn correlation_matrix(&self) -> DMatrix<Scalar> {
        correlation_matrix(&[
            &self.angular_frequency,
            &self.measured_current,
            &self.theoretical_current,
            &self.power,
        ])
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frequency: {} | Voltage: {} | AngFreq: {} | I Meas {} | I Theor {} | Power {}",
            self.frequency,
            self.voltage,
            self.angular_frequency,
            self.measured_current,
            self.theoretical_current,
            self.power
        )
    }
}

/// Derives a [`DataPoint`] for every reading of `dataset`, in bench order.
///
/// No resistance check is made here; see [`Dataset::check_resistance`].
#[must_use]
pub fn process_raw(
    dataset: &Dataset,
    resistance: Scalar,
    constants: &CircuitConstants,
) -> Vec<DataPoint> {
    dataset
        .measurements
        .iter()
        .map(|raw| {
            if raw.voltage_error == 0.0 {
                warn!(
                    frequency_khz = raw.frequency_khz,
                    "reading has no voltage uncertainty"
                );
            }
            let point = DataPoint::new(raw, resistance, constants);
            debug!(dataset = %dataset.name, "{point}");
            point
        })
        .collect()
}
