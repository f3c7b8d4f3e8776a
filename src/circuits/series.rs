use crate::constants::{
    CAPACITANCE_F, CAPACITANCE_UNCERTAINTY_F, INDUCTANCE_H, INDUCTANCE_UNCERTAINTY_H,
    SOURCE_VOLTAGE_UNCERTAINTY_V, SOURCE_VOLTAGE_V,
};
use crate::math::{phase_deg, CScalar, Scalar};
use crate::uncertain::Uncertain;

use super::component::{Capacitor, Component, Inductor, Resistor};

/// Component values shared by every measurement of a run.
#[derive(Debug, Clone)]
pub struct CircuitConstants {
    /// Coil inductance in henries.
    pub inductance: Uncertain,
    /// Capacitance in farads.
    pub capacitance: Uncertain,
    /// Source amplitude in volts.
    pub source_voltage: Uncertain,
}

impl CircuitConstants {
    /// Creates a set of constants from already-uncertain values.
    #[must_use]
    pub fn new(inductance: Uncertain, capacitance: Uncertain, source_voltage: Uncertain) -> Self {
        Self {
            inductance,
            capacitance,
            source_voltage,
        }
    }
}

impl Default for CircuitConstants {
    /// The bench values: `L = 0.01525(2) H`, `C = 9.91(2) nF`, `Vs = 12.0(1) V`.
    fn default() -> Self {
        Self::new(
            Uncertain::new(INDUCTANCE_H, INDUCTANCE_UNCERTAINTY_H),
            Uncertain::new(CAPACITANCE_F, CAPACITANCE_UNCERTAINTY_F),
            Uncertain::new(SOURCE_VOLTAGE_V, SOURCE_VOLTAGE_UNCERTAINTY_V),
        )
    }
}

/// Series RLC loop driven by a sinusoidal source.
#[derive(Debug, Clone)]
pub struct SeriesRlc {
    resistor: Resistor,
    inductor: Inductor,
    capacitor: Capacitor,
    source_voltage: Uncertain,
}

impl SeriesRlc {
    /// Builds the loop from the shared constants and a run-specific resistance.
    #[must_use]
    pub fn new(constants: &CircuitConstants, resistance: Uncertain) -> Self {
        Self {
            resistor: Resistor::new("R", resistance),
            inductor: Inductor::new("L", constants.inductance.clone()),
            capacitor: Capacitor::new("C", constants.capacitance.clone()),
            source_voltage: constants.source_voltage.clone(),
        }
    }

    /// The series resistor.
    #[must_use]
    pub fn resistor(&self) -> &Resistor {
        &self.resistor
    }

    fn members(&self) -> [&dyn Component; 3] {
        [&self.resistor, &self.inductor, &self.capacitor]
    }

    /// Nominal phasor impedance; series impedances add linearly.
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> CScalar {
        self.members()
            .iter()
            .fold(CScalar::default(), |total, c| total + c.impedance(omega))
    }

    /// Net reactance `Xl - Xc`.
    #[must_use]
    pub fn reactance(&self, omega: &Uncertain) -> Uncertain {
        self.members()
            .iter()
            .fold(Uncertain::exact(0.0), |total, c| total + c.reactance(omega))
    }

    /// Impedance magnitude `sqrt(R² + (Xl - Xc)²)`.
    #[must_use]
    pub fn impedance_magnitude(&self, omega: &Uncertain) -> Uncertain {
        (self.resistor.resistance().powi(2) + self.reactance(omega).powi(2)).sqrt()
    }

    /// Theoretical current amplitude `Vs / |Z|`.
    #[must_use]
    pub fn current(&self, omega: &Uncertain) -> Uncertain {
        &self.source_voltage / self.impedance_magnitude(omega)
    }

    /// Nominal phase of the impedance in degrees.
    #[must_use]
    pub fn phase_deg(&self, omega: Scalar) -> Scalar {
        phase_deg(self.impedance(omega))
    }

    /// Resonant angular frequency `1 / sqrt(L C)`.
    #[must_use]
    pub fn resonant_angular_frequency(&self) -> Uncertain {
        (self.inductor.inductance() * self.capacitor.capacitance())
            .sqrt()
            .recip()
    }

    /// Quality factor `(1 / R) sqrt(L / C)`.
    #[must_use]
    pub fn quality_factor(&self) -> Uncertain {
        (self.inductor.inductance() / self.capacitor.capacitance()).sqrt()
            / self.resistor.resistance()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn bench_loop(resistance: Scalar) -> SeriesRlc {
        SeriesRlc::new(
            &CircuitConstants::default(),
            Uncertain::with_relative(resistance, 0.01),
        )
    }

    #[test]
    fn resonance_matches_bench_values() {
        let rlc = bench_loop(100.0);
        let w0 = rlc.resonant_angular_frequency();
        let expected = 1.0 / (INDUCTANCE_H * CAPACITANCE_F).sqrt();
        assert_relative_eq!(w0.nominal(), expected, max_relative = 1.0e-12);
        // Half of the quadrature sum of the relative errors of L and C.
        let rel = 0.5 * (INDUCTANCE_UNCERTAINTY_H / INDUCTANCE_H)
            .hypot(CAPACITANCE_UNCERTAINTY_F / CAPACITANCE_F);
        assert_relative_eq!(w0.relative_std_dev(), rel, max_relative = 1.0e-9);
    }

    #[test]
    fn current_peaks_at_resonance() {
        let rlc = bench_loop(100.0);
        let w0 = rlc.resonant_angular_frequency().nominal();
        let at = rlc.current(&Uncertain::exact(w0));
        assert_relative_eq!(at.nominal(), SOURCE_VOLTAGE_V / 100.0, max_relative = 1.0e-9);
        assert_relative_eq!(rlc.phase_deg(w0), 0.0, epsilon = 1.0e-6);

        let below = rlc.current(&Uncertain::exact(0.5 * w0));
        let above = rlc.current(&Uncertain::exact(2.0 * w0));
        assert!(below.nominal() < at.nominal());
        assert!(above.nominal() < at.nominal());
        assert!(rlc.phase_deg(0.5 * w0) < 0.0);
        assert!(rlc.phase_deg(2.0 * w0) > 0.0);
    }

    #[test]
    fn current_agrees_with_complex_impedance() {
        let rlc = bench_loop(1_000.0);
        for omega in [1.0e3, 5.0e4, 8.1e4, 3.0e5] {
            let i = rlc.current(&Uncertain::exact(omega));
            let z = rlc.impedance(omega);
            assert_relative_eq!(i.nominal(), SOURCE_VOLTAGE_V / z.norm(), max_relative = 1.0e-12);
        }
    }

    #[test]
    fn quality_factor_scales_inversely_with_resistance() {
        let q100 = bench_loop(100.0).quality_factor().nominal();
        let q1000 = bench_loop(1_000.0).quality_factor().nominal();
        assert_relative_eq!(q100 / q1000, 10.0, max_relative = 1.0e-12);
    }
}
