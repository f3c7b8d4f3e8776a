//! Values with uncertainty and first-order (linear) error propagation.
//!
//! Every [`Uncertain`] remembers its partial derivatives with respect to the
//! independent variables it was computed from. Standard deviations and
//! covariances are derived from those sensitivities on demand, so quantities
//! that share inputs stay correlated through any chain of arithmetic:
//! `x - x` is exactly zero, and `v / r` keeps its dependence on `r`.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::DMatrix;

use crate::math::{decimal_exponent, pdg_round, round_to_place, Scalar};

static NEXT_VARIABLE: AtomicU64 = AtomicU64::new(0);

/// Magnitudes at or beyond `10^±SHARED_EXPONENT_THRESHOLD` are displayed with a shared exponent.
const SHARED_EXPONENT_THRESHOLD: i32 = 4;

/// Errors raised when constructing or parsing uncertain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UncertainError {
    /// The input string was empty.
    #[error("empty uncertain value")]
    Empty,
    /// A numeric component could not be parsed.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    /// The input did not match any supported notation.
    #[error("malformed uncertain value `{0}`")]
    Malformed(String),
    /// A standard deviation was negative.
    #[error("standard deviation must be non-negative, got {0}")]
    NegativeStdDev(Scalar),
}

/// Identifier of an independent random variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(u64);

impl VariableId {
    fn fresh() -> Self {
        Self(NEXT_VARIABLE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sensitivity {
    std_dev: Scalar,
    derivative: Scalar,
}

/// A nominal value carrying its linearised dependence on independent variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Uncertain {
    nominal: Scalar,
    terms: BTreeMap<VariableId, Sensitivity>,
}

impl Uncertain {
    /// Creates a new independent variable.
    ///
    /// Each call yields a distinct variable even for identical arguments. The
    /// sign of `std_dev` is ignored; use [`Uncertain::try_new`] to reject it.
    #[must_use]
    pub fn new(nominal: Scalar, std_dev: Scalar) -> Self {
        let std_dev = std_dev.abs();
        if std_dev == 0.0 {
            return Self::exact(nominal);
        }
        let mut terms = BTreeMap::new();
        terms.insert(
            VariableId::fresh(),
            Sensitivity {
                std_dev,
                derivative: 1.0,
            },
        );
        Self { nominal, terms }
    }

    /// Creates a new independent variable, rejecting negative standard deviations.
    pub fn try_new(nominal: Scalar, std_dev: Scalar) -> Result<Self, UncertainError> {
        if std_dev < 0.0 {
            return Err(UncertainError::NegativeStdDev(std_dev));
        }
        Ok(Self::new(nominal, std_dev))
    }

    /// Creates a value from a nominal value and a relative uncertainty (`0.01` is 1 %).
    #[must_use]
    pub fn with_relative(nominal: Scalar, relative: Scalar) -> Self {
        Self::new(nominal, relative * nominal)
    }

    /// A constant with zero uncertainty.
    #[must_use]
    pub fn exact(value: Scalar) -> Self {
        Self {
            nominal: value,
            terms: BTreeMap::new(),
        }
    }

    /// Nominal (central) value.
    #[must_use]
    pub fn nominal(&self) -> Scalar {
        self.nominal
    }

    /// Propagated standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> Scalar {
        self.terms
            .values()
            .map(|t| (t.derivative * t.std_dev).powi(2))
            .sum::<Scalar>()
            .sqrt()
    }

    /// Standard deviation relative to the nominal value.
    #[must_use]
    pub fn relative_std_dev(&self) -> Scalar {
        self.std_dev() / self.nominal.abs()
    }

    /// True when the value depends on no random variable.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.terms.is_empty()
    }

    /// Partial derivative with respect to the independent variable behind `input`.
    ///
    /// Returns `None` when `input` is not an independent variable itself.
    #[must_use]
    pub fn derivative(&self, input: &Self) -> Option<Scalar> {
        let mut ids = input.terms.keys();
        let id = ids.next()?;
        if ids.next().is_some() {
            return None;
        }
        Some(self.terms.get(id).map_or(0.0, |t| t.derivative))
    }

    /// Covariance between two values, from the variables they share.
    #[must_use]
    pub fn covariance(&self, other: &Self) -> Scalar {
        self.terms
            .iter()
            .filter_map(|(id, a)| {
                other
                    .terms
                    .get(id)
                    .map(|b| a.derivative * b.derivative * a.std_dev * a.std_dev)
            })
            .sum()
    }

    /// Pearson correlation coefficient; `0` when either value is exact.
    #[must_use]
    pub fn correlation(&self, other: &Self) -> Scalar {
        let denom = self.std_dev() * other.std_dev();
        if denom == 0.0 {
            0.0
        } else {
            self.covariance(other) / denom
        }
    }

    /// Applies a function with nominal result `nominal` and derivative `derivative`.
    fn chain(&self, nominal: Scalar, derivative: Scalar) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(id, t)| {
                (
                    *id,
                    Sensitivity {
                        std_dev: t.std_dev,
                        derivative: t.derivative * derivative,
                    },
                )
            })
            .collect();
        Self { nominal, terms }
    }

    /// Combines two values through a function with partials `da` and `db`.
    fn combine(a: &Self, b: &Self, nominal: Scalar, da: Scalar, db: Scalar) -> Self {
        let mut terms = a.chain(nominal, da).terms;
        for (id, t) in &b.terms {
            terms
                .entry(*id)
                .and_modify(|s| s.derivative += t.derivative * db)
                .or_insert(Sensitivity {
                    std_dev: t.std_dev,
                    derivative: t.derivative * db,
                });
        }
        Self { nominal, terms }
    }

    /// Integer power.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        let x = self.nominal;
        let derivative = if n == 0 {
            0.0
        } else {
            Scalar::from(n) * x.powi(n - 1)
        };
        self.chain(x.powi(n), derivative)
    }

    /// Real power.
    #[must_use]
    pub fn powf(&self, p: Scalar) -> Self {
        let x = self.nominal;
        let derivative = if p == 0.0 { 0.0 } else { p * x.powf(p - 1.0) };
        self.chain(x.powf(p), derivative)
    }

    /// Square root.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        let root = self.nominal.sqrt();
        self.chain(root, 0.5 / root)
    }

    /// Reciprocal `1 / x`.
    #[must_use]
    pub fn recip(&self) -> Self {
        let x = self.nominal;
        self.chain(x.recip(), -1.0 / (x * x))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.chain(self.nominal.abs(), self.nominal.signum())
    }

    /// Scales by an exact factor.
    #[must_use]
    pub fn scale(&self, factor: Scalar) -> Self {
        self.chain(self.nominal * factor, factor)
    }
}

impl Default for Uncertain {
    fn default() -> Self {
        Self::exact(0.0)
    }
}

impl From<Scalar> for Uncertain {
    fn from(value: Scalar) -> Self {
        Self::exact(value)
    }
}

fn add(a: &Uncertain, b: &Uncertain) -> Uncertain {
    Uncertain::combine(a, b, a.nominal + b.nominal, 1.0, 1.0)
}

fn sub(a: &Uncertain, b: &Uncertain) -> Uncertain {
    Uncertain::combine(a, b, a.nominal - b.nominal, 1.0, -1.0)
}

fn mul(a: &Uncertain, b: &Uncertain) -> Uncertain {
    Uncertain::combine(a, b, a.nominal * b.nominal, b.nominal, a.nominal)
}

fn div(a: &Uncertain, b: &Uncertain) -> Uncertain {
    let inv = 1.0 / b.nominal;
    Uncertain::combine(a, b, a.nominal * inv, inv, -a.nominal * inv * inv)
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $func:ident) => {
        impl $op<&Uncertain> for &Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: &Uncertain) -> Uncertain {
                $func(self, rhs)
            }
        }

        impl $op<Uncertain> for Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: Uncertain) -> Uncertain {
                $func(&self, &rhs)
            }
        }

        impl $op<&Uncertain> for Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: &Uncertain) -> Uncertain {
                $func(&self, rhs)
            }
        }

        impl $op<Uncertain> for &Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: Uncertain) -> Uncertain {
                $func(self, &rhs)
            }
        }

        impl $op<Scalar> for Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: Scalar) -> Uncertain {
                $func(&self, &Uncertain::exact(rhs))
            }
        }

        impl $op<Scalar> for &Uncertain {
            type Output = Uncertain;
            fn $method(self, rhs: Scalar) -> Uncertain {
                $func(self, &Uncertain::exact(rhs))
            }
        }

        impl $op<Uncertain> for Scalar {
            type Output = Uncertain;
            fn $method(self, rhs: Uncertain) -> Uncertain {
                $func(&Uncertain::exact(self), &rhs)
            }
        }

        impl $op<&Uncertain> for Scalar {
            type Output = Uncertain;
            fn $method(self, rhs: &Uncertain) -> Uncertain {
                $func(&Uncertain::exact(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl Neg for &Uncertain {
    type Output = Uncertain;
    fn neg(self) -> Uncertain {
        self.chain(-self.nominal, -1.0)
    }
}

impl Neg for Uncertain {
    type Output = Uncertain;
    fn neg(self) -> Uncertain {
        -&self
    }
}

/// Dense covariance matrix of `values`.
#[must_use]
pub fn covariance_matrix(values: &[&Uncertain]) -> DMatrix<Scalar> {
    let n = values.len();
    DMatrix::from_fn(n, n, |i, j| values[i].covariance(values[j]))
}

/// Dense correlation matrix of `values`. Exact values get a unit diagonal entry.
#[must_use]
pub fn correlation_matrix(values: &[&Uncertain]) -> DMatrix<Scalar> {
    let n = values.len();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            1.0
        } else {
            values[i].correlation(values[j])
        }
    })
}

impl fmt::Display for Uncertain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nominal = self.nominal;
        let std_dev = self.std_dev();
        if !nominal.is_finite() || !std_dev.is_finite() {
            return write!(f, "{nominal}+/-{std_dev}");
        }
        if std_dev == 0.0 {
            return write!(f, "{nominal}+/-0");
        }

        let lead = decimal_exponent(nominal.abs().max(std_dev));
        let shared = if lead.abs() >= SHARED_EXPONENT_THRESHOLD {
            lead
        } else {
            0
        };
        let scale = 10f64.powi(shared);
        let (std_dev, place) = pdg_round(std_dev / scale);
        let nominal = round_to_place(nominal / scale, place);
        let decimals = (-place).max(0) as usize;

        if shared == 0 {
            write!(f, "{nominal:.decimals$}+/-{std_dev:.decimals$}")
        } else {
            write!(
                f,
                "({nominal:.decimals$}+/-{std_dev:.decimals$})e{shared:+03}"
            )
        }
    }
}

fn parse_number(s: &str) -> Result<Scalar, UncertainError> {
    let s = s.trim();
    s.parse::<Scalar>()
        .map_err(|_| UncertainError::InvalidNumber(s.to_string()))
}

/// Parses an exponent suffix such as `e-9`; an empty suffix is `10^0`.
fn parse_exponent(s: &str) -> Result<Scalar, UncertainError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(1.0);
    }
    let digits = s
        .strip_prefix('e')
        .or_else(|| s.strip_prefix('E'))
        .ok_or_else(|| UncertainError::Malformed(s.to_string()))?;
    let exponent = digits
        .parse::<i32>()
        .map_err(|_| UncertainError::InvalidNumber(digits.to_string()))?;
    Ok(10f64.powi(exponent))
}

fn split_plus_minus(s: &str) -> Option<(&str, &str)> {
    s.split_once("+/-").or_else(|| s.split_once('±'))
}

fn build(nominal: Scalar, std_dev: Scalar) -> Result<Uncertain, UncertainError> {
    Uncertain::try_new(nominal, std_dev)
}

impl FromStr for Uncertain {
    type Err = UncertainError;

    /// Accepts `12+/-0.1`, `12±0.1`, `(9.91+/-0.02)e-9`, `9.91(0.02)e-9`,
    /// `9.91(2)e-9` and bare numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UncertainError::Empty);
        }
        let malformed = || UncertainError::Malformed(s.to_string());

        if let Some(rest) = s.strip_prefix('(') {
            let (inner, tail) = rest.split_once(')').ok_or_else(malformed)?;
            let scale = parse_exponent(tail)?;
            let (nominal, std_dev) = split_plus_minus(inner).ok_or_else(malformed)?;
            return build(
                parse_number(nominal)? * scale,
                parse_number(std_dev)? * scale,
            );
        }

        if let Some((nominal, std_dev)) = split_plus_minus(s) {
            return build(parse_number(nominal)?, parse_number(std_dev)?);
        }

        if let Some((nominal, rest)) = s.split_once('(') {
            let (std_dev, tail) = rest.split_once(')').ok_or_else(malformed)?;
            let scale = parse_exponent(tail)?;
            let std_dev = if std_dev.contains('.') {
                parse_number(std_dev)?
            } else {
                // Short form: digits in units of the nominal's last decimal place.
                let places = nominal
                    .trim()
                    .split_once('.')
                    .map_or(0, |(_, fraction)| fraction.len());
                parse_number(std_dev)? * 10f64.powi(-(places as i32))
            };
            return build(parse_number(nominal)? * scale, std_dev * scale);
        }

        Ok(Self::exact(parse_number(s)?))
    }
}
