//! Frequency sweep utilities for model curves.

use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples in [start, stop].
/// Returns an empty sweep unless both bounds are positive.
#[must_use]
pub fn logspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    if !(start > 0.0 && stop > 0.0) {
        return Vec::new();
    }
    linspace(start.log10(), stop.log10(), n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Applies `f` to each angular frequency and collects `[w, f(w)]` pairs.
#[must_use]
pub fn sweep_map<I, F>(omegas: I, mut f: F) -> Vec<[Scalar; 2]>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> Scalar,
{
    omegas.into_iter().map(|w| [w, f(w)]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logspace_hits_decades() {
        let v = logspace(10.0, 1.0e4, 4);
        assert_eq!(v.len(), 4);
        for (got, want) in v.iter().zip([10.0, 100.0, 1.0e3, 1.0e4]) {
            assert_relative_eq!(*got, want, max_relative = 1.0e-12);
        }
        assert!(logspace(0.0, 10.0, 3).is_empty());
    }

    #[test]
    fn sweep_map_pairs_input_and_output() {
        let out = sweep_map(vec![1.0, 2.0, 3.0], |w| w * 2.0);
        assert_eq!(out, vec![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
    }
}
