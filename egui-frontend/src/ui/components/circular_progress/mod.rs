//! Circular progress indicator: calculations plus the egui painter.

pub mod calculations;
pub mod renderer;

pub use calculations::RingDisplay;
pub use renderer::{render_ring, RingConfig};
