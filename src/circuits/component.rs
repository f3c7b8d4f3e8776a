use crate::math::{CScalar, Scalar};
use crate::uncertain::Uncertain;

/// Trait implemented by the lumped components of the bench circuit.
pub trait Component {
    /// Nominal phasor impedance at angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;

    /// Reactance (imaginary part of the impedance) at an uncertain angular frequency.
    fn reactance(&self, omega: &Uncertain) -> Uncertain;

    /// Human-readable identifier (e.g. `R1`).
    fn name(&self) -> &str;
}

/// Lumped resistor with a toleranced value.
#[derive(Debug, Clone)]
pub struct Resistor {
    name: String,
    resistance: Uncertain,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub fn new(name: impl Into<String>, resistance_ohms: Uncertain) -> Self {
        Self {
            name: name.into(),
            resistance: resistance_ohms,
        }
    }

    /// Resistance in ohms.
    #[must_use]
    pub fn resistance(&self) -> &Uncertain {
        &self.resistance
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> CScalar {
        CScalar::new(self.resistance.nominal(), 0.0)
    }

    fn reactance(&self, _omega: &Uncertain) -> Uncertain {
        Uncertain::exact(0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ideal capacitor.
#[derive(Debug, Clone)]
pub struct Capacitor {
    name: String,
    capacitance: Uncertain,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub fn new(name: impl Into<String>, capacitance_f: Uncertain) -> Self {
        Self {
            name: name.into(),
            capacitance: capacitance_f,
        }
    }

    /// Capacitance in farads.
    #[must_use]
    pub fn capacitance(&self) -> &Uncertain {
        &self.capacitance
    }

    /// Magnitude of the capacitive reactance, `Xc = 1 / (w C)`.
    #[must_use]
    pub fn reactance_magnitude(&self, omega: &Uncertain) -> Uncertain {
        (omega * &self.capacitance).recip()
    }
}

impl Component for Capacitor {
    fn impedance(&self, omega: Scalar) -> CScalar {
        if omega.abs() < Scalar::EPSILON {
            CScalar::new(Scalar::INFINITY, 0.0)
        } else {
            CScalar::new(0.0, -1.0 / (omega * self.capacitance.nominal()))
        }
    }

    fn reactance(&self, omega: &Uncertain) -> Uncertain {
        -self.reactance_magnitude(omega)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ideal inductor.
#[derive(Debug, Clone)]
pub struct Inductor {
    name: String,
    inductance: Uncertain,
}

impl Inductor {
    /// Creates an inductor.
    #[must_use]
    pub fn new(name: impl Into<String>, inductance_h: Uncertain) -> Self {
        Self {
            name: name.into(),
            inductance: inductance_h,
        }
    }

    /// Inductance in henries.
    #[must_use]
    pub fn inductance(&self) -> &Uncertain {
        &self.inductance
    }
}

impl Component for Inductor {
    fn impedance(&self, omega: Scalar) -> CScalar {
        CScalar::new(0.0, omega * self.inductance.nominal())
    }

    fn reactance(&self, omega: &Uncertain) -> Uncertain {
        omega * &self.inductance
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistor_impedance_is_real() {
        let r = Resistor::new("R1", Uncertain::new(100.0, 1.0));
        let z = r.impedance(1.0);
        assert_relative_eq!(z.re, 100.0);
        assert_relative_eq!(z.im, 0.0);
        assert!(r.reactance(&Uncertain::new(1.0, 0.1)).is_exact());
    }

    #[test]
    fn capacitor_reactance_is_negative() {
        let c = Capacitor::new("C1", Uncertain::new(1e-6, 1e-8));
        let omega = Uncertain::new(1.0e3, 10.0);
        let x = c.reactance(&omega);
        assert_relative_eq!(x.nominal(), -1.0e3, max_relative = 1.0e-12);
        // 1 % on both factors of w C, added in quadrature.
        assert_relative_eq!(x.relative_std_dev(), 0.01_f64.hypot(0.01), max_relative = 1.0e-9);
        assert_relative_eq!(c.impedance(1.0e3).im, x.nominal(), max_relative = 1.0e-12);
    }

    #[test]
    fn capacitor_is_open_at_dc() {
        let c = Capacitor::new("C1", Uncertain::exact(1e-6));
        assert!(c.impedance(0.0).re.is_infinite());
    }

    #[test]
    fn inductor_reactance_tracks_omega() {
        let l = Inductor::new("L1", Uncertain::exact(0.01));
        let omega = Uncertain::new(1.0e4, 100.0);
        let x = l.reactance(&omega);
        assert_relative_eq!(x.nominal(), 100.0, max_relative = 1.0e-12);
        assert_relative_eq!(x.correlation(&omega), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(l.impedance(1.0e4).im, 100.0, max_relative = 1.0e-12);
    }
}
