//! Lumped components and the series RLC loop model.

/// Lumped component definitions and traits.
pub mod component;
/// Series RLC loop and its shared circuit constants.
pub mod series;

pub use component::{Capacitor, Component, Inductor, Resistor};
pub use series::{CircuitConstants, SeriesRlc};
