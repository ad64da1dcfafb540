//! State types for the annotation canvas.
//!
//! This module contains:
//! - Screen/world points and ROI rectangles
//! - The pan/zoom view transform
//! - The interaction mode (idle, panning, drawing)

mod types;
mod view;

pub use types::*;
pub use view::*;
