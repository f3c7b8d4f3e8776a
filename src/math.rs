//! Shared numerical primitives.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasor impedances.
pub type CScalar = num_complex::Complex<Scalar>;

/// Returns the decimal exponent of `x`, i.e. `floor(log10(|x|))`.
///
/// Zero and non-finite inputs map to `0`.
#[must_use]
pub fn decimal_exponent(x: Scalar) -> i32 {
    if x == 0.0 || !x.is_finite() {
        0
    } else {
        x.abs().log10().floor() as i32
    }
}

/// Significant digits kept for an uncertainty `x` under the Particle Data Group rule.
///
/// The three leading digits decide: 100–354 keep two, 355–949 keep one,
/// 950–999 keep two (and round up to the next power of ten).
#[must_use]
pub fn pdg_significant_digits(x: Scalar) -> u32 {
    if x == 0.0 || !x.is_finite() {
        return 2;
    }
    let shift = 2 - decimal_exponent(x);
    let leading = if shift >= 0 {
        x.abs() * 10f64.powi(shift)
    } else {
        x.abs() / 10f64.powi(-shift)
    }
    .floor();
    if (355.0..950.0).contains(&leading) {
        1
    } else {
        2
    }
}

/// Power of ten of the last digit kept when `x` is shown with `digits` significant digits.
#[must_use]
pub fn last_digit_place(x: Scalar, digits: u32) -> i32 {
    decimal_exponent(x) + 1 - digits as i32
}

/// Rounds `x` to a multiple of `10^place`.
#[must_use]
pub fn round_to_place(x: Scalar, place: i32) -> Scalar {
    if place >= 0 {
        let step = 10f64.powi(place);
        (x / step).round() * step
    } else {
        let scale = 10f64.powi(-place);
        (x * scale).round() / scale
    }
}

/// Rounds an uncertainty with the Particle Data Group rule.
///
/// Returns the rounded value and the power of ten of its last significant digit.
/// A carry (`0.0996` to `0.10`) moves the place up by one.
#[must_use]
pub fn pdg_round(x: Scalar) -> (Scalar, i32) {
    let exponent = decimal_exponent(x);
    let place = last_digit_place(x, pdg_significant_digits(x));
    let rounded = round_to_place(x, place);
    if rounded.abs() >= 10f64.powi(exponent + 1) {
        (rounded, place + 1)
    } else {
        (rounded, place)
    }
}

/// Phase of a complex impedance in degrees.
#[must_use]
pub fn phase_deg(z: CScalar) -> Scalar {
    z.arg().to_degrees()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn decimal_exponent_tracks_magnitude() {
        assert_eq!(decimal_exponent(0.0025), -3);
        assert_eq!(decimal_exponent(12.0), 1);
        assert_eq!(decimal_exponent(-628.3), 2);
        assert_eq!(decimal_exponent(0.0), 0);
    }

    #[test]
    fn pdg_digit_choice_follows_leading_digits() {
        assert_eq!(pdg_significant_digits(0.1), 2);
        assert_eq!(pdg_significant_digits(0.0025), 2);
        assert_eq!(pdg_significant_digits(0.354), 2);
        assert_eq!(pdg_significant_digits(0.36), 1);
        assert_eq!(pdg_significant_digits(628.3), 1);
        assert_eq!(pdg_significant_digits(0.0996), 2);
    }

    #[test]
    fn pdg_round_carries_into_next_decade() {
        let (rounded, place) = pdg_round(0.0996);
        assert_relative_eq!(rounded, 0.1, epsilon = 1.0e-15);
        assert_eq!(place, -2);

        let (rounded, place) = pdg_round(62.83);
        assert_relative_eq!(rounded, 60.0);
        assert_eq!(place, 1);

        let (rounded, place) = pdg_round(0.0025);
        assert_relative_eq!(rounded, 0.0025, epsilon = 1.0e-15);
        assert_eq!(place, -4);
    }

    #[test]
    fn round_to_place_handles_tens() {
        assert_relative_eq!(round_to_place(6283.18, 1), 6280.0);
        assert_relative_eq!(round_to_place(0.0175, -4), 0.0175, epsilon = 1.0e-15);
    }

    #[test]
    fn inductive_phase_is_positive() {
        let z = CScalar::new(1.0, 1.0);
        assert_relative_eq!(phase_deg(z), 45.0, epsilon = 1.0e-12);
    }
}
