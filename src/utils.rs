//! Utility functions shared by the renderer and the window glue.

use image::{Rgba, RgbaImage};
use slint::{Rgba8Pixel, SharedPixelBuffer};

/// Parse a hex color string (e.g., "#ff0000") to an opaque RGBA pixel
pub fn parse_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgba([r, g, b, 255]))
    } else {
        None
    }
}

/// Like `parse_color`, logging and falling back when the string is invalid.
pub fn color_or(hex: &str, fallback: Rgba<u8>) -> Rgba<u8> {
    parse_color(hex).unwrap_or_else(|| {
        log::warn!("Invalid color {hex:?}, using fallback");
        fallback
    })
}

/// Copy a rendered frame into an image Slint can display
pub fn to_slint_image(frame: &RgbaImage) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        frame.as_raw(),
        frame.width(),
        frame.height(),
    );
    slint::Image::from_rgba8(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_color("#dc3545"), Some(Rgba([0xdc, 0x35, 0x45, 255])));
        assert_eq!(parse_color("00ff00"), Some(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(color_or("blue", Rgba([1, 2, 3, 4])), Rgba([1, 2, 3, 4]));
    }
}
