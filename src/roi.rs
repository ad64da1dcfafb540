//! ROI extraction: crop a committed rectangle out of the loaded image and
//! package it for the OCR endpoint.

use base64::prelude::*;
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

use crate::state::RoiRect;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Upper bound on cropped pixels, far above any region drawn on a real image.
const MAX_ROI_PIXELS: u64 = 1 << 26;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("region {width}x{height} contains no whole pixel")]
    EmptyRegion { width: f32, height: f32 },
    #[error("region {width}x{height} exceeds the crop size limit")]
    Oversized { width: u32, height: u32 },
    #[error("failed to encode ROI as PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("encoded ROI is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// JSON body of `POST /process_roi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiPayload {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// PNG data URL of the cropped region.
    pub image_data: String,
}

impl RoiPayload {
    /// Crop `rect` from `source`, encode it and check the encoded size.
    pub fn build(source: &RgbaImage, rect: RoiRect, max_encoded_bytes: usize) -> Result<Self, RoiError> {
        let crop = crop_roi(source, rect)?;
        let image_data = encode_data_url(&crop)?;

        let size = image_data.len() - DATA_URL_PREFIX.len();
        if size > max_encoded_bytes {
            return Err(RoiError::TooLarge {
                size,
                limit: max_encoded_bytes,
            });
        }

        Ok(Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            image_data,
        })
    }

    pub fn rect(&self) -> RoiRect {
        RoiRect::new(self.x, self.y, self.w, self.h)
    }
}

/// Crop a `trunc(|w|) x trunc(|h|)` raster from `source`.
///
/// Negative extents reflect the region across the anchor corner, so the
/// result equals cropping the normalized rectangle. Pixels outside the source
/// stay transparent.
pub fn crop_roi(source: &RgbaImage, rect: RoiRect) -> Result<RgbaImage, RoiError> {
    let (min_x, min_y, abs_w, abs_h) = rect.normalized();
    let out_w = abs_w as u32;
    let out_h = abs_h as u32;

    if out_w == 0 || out_h == 0 {
        return Err(RoiError::EmptyRegion {
            width: rect.w,
            height: rect.h,
        });
    }
    if out_w as u64 * out_h as u64 > MAX_ROI_PIXELS {
        return Err(RoiError::Oversized {
            width: out_w,
            height: out_h,
        });
    }

    // Source pixels per output pixel; 1.0 unless the extent is fractional.
    let step_x = abs_w / out_w as f32;
    let step_y = abs_h / out_h as f32;

    Ok(RgbaImage::from_fn(out_w, out_h, |i, j| {
        let sx = (min_x + (i as f32 + 0.5) * step_x).floor();
        let sy = (min_y + (j as f32 + 0.5) * step_y).floor();
        if sx >= 0.0 && sy >= 0.0 && (sx as u32) < source.width() && (sy as u32) < source.height() {
            *source.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

/// Encode an image as a `data:image/png;base64,...` URL.
pub fn encode_data_url(image: &RgbaImage) -> Result<String, RoiError> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(format!("{DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn crops_exact_integer_region() {
        let source = gradient(200, 100);
        let crop = crop_roi(&source, RoiRect::new(10.0, 10.0, 20.0, 30.0)).unwrap();
        assert_eq!(crop.dimensions(), (20, 30));
        assert_eq!(*crop.get_pixel(0, 0), Rgba([10, 10, 7, 255]));
        assert_eq!(*crop.get_pixel(19, 29), Rgba([29, 39, 7, 255]));
    }

    #[test]
    fn negative_extents_sample_the_reflected_region() {
        let source = gradient(200, 100);
        let forward = crop_roi(&source, RoiRect::new(10.0, 10.0, 20.0, 30.0)).unwrap();
        let backward = crop_roi(&source, RoiRect::new(30.0, 40.0, -20.0, -30.0)).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn pixels_outside_the_image_are_transparent() {
        let source = gradient(50, 50);
        let crop = crop_roi(&source, RoiRect::new(40.0, -5.0, 20.0, 20.0)).unwrap();
        assert_eq!(crop.get_pixel(0, 0)[3], 0);
        assert_eq!(*crop.get_pixel(0, 5), Rgba([40, 0, 7, 255]));
        assert_eq!(crop.get_pixel(15, 10)[3], 0);
    }

    #[test]
    fn sub_pixel_region_is_rejected() {
        let source = gradient(50, 50);
        let err = crop_roi(&source, RoiRect::new(1.0, 1.0, 0.5, 20.0)).unwrap_err();
        assert!(matches!(err, RoiError::EmptyRegion { .. }));
    }

    #[test]
    fn payload_carries_rect_and_decodable_png() {
        let source = gradient(200, 100);
        let rect = RoiRect::new(30.0, 40.0, -20.0, -30.0);
        let payload = RoiPayload::build(&source, rect, 2 * 1024 * 1024).unwrap();
        assert_eq!(payload.rect(), rect);

        let encoded = payload.image_data.strip_prefix(DATA_URL_PREFIX).unwrap();
        let png = BASE64_STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 30));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["w"], -20.0);
        assert!(json["image_data"].as_str().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn encoded_size_limit_is_enforced() {
        let source = gradient(200, 100);
        let err = RoiPayload::build(&source, RoiRect::new(0.0, 0.0, 100.0, 100.0), 16).unwrap_err();
        assert!(matches!(err, RoiError::TooLarge { limit: 16, .. }));
    }
}
