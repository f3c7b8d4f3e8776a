//! Experiment constants and unit conversions.
//!
//! ## Circuit values
//!
//! The component values are those recorded for the bench circuit, with the
//! absolute uncertainties quoted by the instruments used to measure them.
//! Resistances and frequencies are not listed here: both are read per run and
//! assigned a fixed relative uncertainty.

use std::f64::consts::PI;

use crate::math::Scalar;
use crate::uncertain::Uncertain;

/// Hertz per kilohertz.
pub const HZ_PER_KHZ: Scalar = 1_000.0;

/// Relative (1σ) uncertainty assumed for every resistor value.
pub const RESISTANCE_RELATIVE_UNCERTAINTY: Scalar = 0.01;
/// Relative (1σ) uncertainty assumed for every generator frequency reading.
pub const FREQUENCY_RELATIVE_UNCERTAINTY: Scalar = 0.01;

/// Nominal inductance of the coil in henries (H).
pub const INDUCTANCE_H: Scalar = 0.015_25;
/// Absolute uncertainty of [`INDUCTANCE_H`].
pub const INDUCTANCE_UNCERTAINTY_H: Scalar = 0.000_02;
/// Nominal capacitance in farads (F).
pub const CAPACITANCE_F: Scalar = 9.91e-9;
/// Absolute uncertainty of [`CAPACITANCE_F`].
pub const CAPACITANCE_UNCERTAINTY_F: Scalar = 0.02e-9;
/// Nominal source amplitude in volts (V).
pub const SOURCE_VOLTAGE_V: Scalar = 12.0;
/// Absolute uncertainty of [`SOURCE_VOLTAGE_V`].
pub const SOURCE_VOLTAGE_UNCERTAINTY_V: Scalar = 0.1;

/// Angular frequency of an uncertain linear frequency, `w = 2π f`.
#[must_use]
pub fn angular_frequency(hz: &Uncertain) -> Uncertain {
    hz.scale(2.0 * PI)
}

/// Converts a frequency reading in kHz to hertz, with the assumed relative uncertainty.
#[must_use]
pub fn frequency_from_khz(khz: Scalar) -> Uncertain {
    Uncertain::with_relative(khz * HZ_PER_KHZ, FREQUENCY_RELATIVE_UNCERTAINTY)
}

/// Wraps a resistor value in ohms with the assumed relative uncertainty.
#[must_use]
pub fn resistance_with_tolerance(ohms: Scalar) -> Uncertain {
    Uncertain::with_relative(ohms, RESISTANCE_RELATIVE_UNCERTAINTY)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn khz_reading_gets_one_percent() {
        let f = frequency_from_khz(12.96);
        assert_relative_eq!(f.nominal(), 12_960.0, max_relative = 1.0e-12);
        assert_relative_eq!(f.std_dev(), 129.6, max_relative = 1.0e-12);

        let w = angular_frequency(&f);
        assert_relative_eq!(w.nominal(), 2.0 * PI * 12_960.0, max_relative = 1.0e-12);
        assert_relative_eq!(w.relative_std_dev(), 0.01, max_relative = 1.0e-12);
        assert_relative_eq!(w.correlation(&f), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn resistor_tolerance_is_relative() {
        let r = resistance_with_tolerance(1_000.0);
        assert_relative_eq!(r.std_dev(), 10.0);
    }
}
