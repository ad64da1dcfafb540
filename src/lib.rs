//! Region-of-interest annotation canvas.
//!
//! The library holds everything that does not need a window:
//! - `state` - view transform, rectangles and interaction mode
//! - `canvas` - the controller turning pointer events into state changes
//! - `render` - rasterizes the current state into an RGBA frame
//! - `roi` - crops committed rectangles and builds OCR payloads
//! - `ocr` - submission of payloads to the remote OCR endpoint
//! - `config` - TOML configuration

pub mod canvas;
pub mod config;
pub mod ocr;
pub mod render;
pub mod roi;
pub mod state;
pub mod utils;
