//! Convenience re-exports for running bench analyses.

pub use crate::analysis::{Analysis, AnalysisKind, AnalysisReport};
pub use crate::circuits::{Capacitor, CircuitConstants, Component, Inductor, Resistor, SeriesRlc};
pub use crate::config::{CircuitConfig, Config};
pub use crate::constants::*;
pub use crate::dataset::{Dataset, RawMeasurement};
pub use crate::errors::AnalysisError;
pub use crate::io::write_table_csv;
pub use crate::math::{CScalar, Scalar};
pub use crate::plot::{error_bar_segments, Chart, Series, SeriesStyle};
pub use crate::point::{process_raw, DataPoint};
pub use crate::table::{Column, ResultTable};
pub use crate::uncertain::{correlation_matrix, covariance_matrix, Uncertain, UncertainError};
