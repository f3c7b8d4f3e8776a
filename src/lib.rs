#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Experiment constants and unit conversions.
pub mod constants;
/// Shared numerical helpers.
pub mod math;
/// Values with uncertainty and linear error propagation.
pub mod uncertain;
/// Circuit components and the series RLC model.
pub mod circuits;
/// Recorded bench measurements.
pub mod dataset;
/// Derived quantities per reading.
pub mod point;
/// Column-oriented result tables.
pub mod table;
/// Frequency sweeps for model curves.
pub mod sweep;
/// Chart descriptions and the plot window.
pub mod plot;
/// The current and power analyses.
pub mod analysis;
/// TOML configuration.
pub mod config;
/// Table export.
pub mod io;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
