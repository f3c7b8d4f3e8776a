//! I/O helpers for exporting result tables.

pub mod csv;

pub use csv::*;
