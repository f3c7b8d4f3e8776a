//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;
use crate::uncertain::UncertainError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Wraps errors raised while building or parsing uncertain values.
    #[error(transparent)]
    Uncertain(#[from] UncertainError),
    /// Raised when a resistance is analysed against data recorded with another resistor.
    #[error("wrong dataset: `{dataset}` was recorded with R={expected} ohm, not R={resistance} ohm")]
    DatasetMismatch {
        /// Name of the offending dataset.
        dataset: String,
        /// Resistance the dataset was recorded with.
        expected: Scalar,
        /// Resistance requested for the analysis.
        resistance: Scalar,
    },
    /// Raised when no dataset was recorded with the requested resistance.
    #[error("invalid resistance: no dataset recorded with R={0} ohm")]
    InvalidResistance(Scalar),
    /// Raised when a dataset name is unknown.
    #[error("unknown dataset `{0}`")]
    UnknownDataset(String),
    /// Raised when a dataset has no measurements to analyse.
    #[error("dataset `{0}` is empty")]
    EmptyDataset(String),
    /// Raised when a configured value is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
