//! Rasterizes the canvas state into an RGBA frame.
//!
//! Rendering never touches the data model: the same [`Scene`] always yields
//! the same frame, so it is safe to redraw on every pointer move.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use crate::config::AppearanceConfig;
use crate::state::{Point, RoiRect, ViewTransform};
use crate::utils::color_or;

/// Border thickness in screen pixels, independent of zoom.
const BORDER_WIDTH: i32 = 2;
/// Half the length of each stroke of the glyph's cross.
const CROSS_HALF: f32 = 5.0;
/// Coordinates further than this outside the frame are clamped before drawing.
const CLIP_MARGIN: f32 = 8.0;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub rect: Rgba<u8>,
    pub selected: Rgba<u8>,
    pub preview: Rgba<u8>,
    pub glyph_fill: Rgba<u8>,
    pub glyph_hover_fill: Rgba<u8>,
    pub glyph_stroke: Rgba<u8>,
    pub glyph_hover_stroke: Rgba<u8>,
    pub glyph_cross: Rgba<u8>,
    pub glyph_radius: f32,
}

impl RenderStyle {
    pub fn from_config(appearance: &AppearanceConfig, glyph_radius: f32) -> Self {
        Self {
            rect: color_or(&appearance.rect_color, Rgba([0, 0, 255, 255])),
            selected: color_or(&appearance.selected_color, Rgba([255, 0, 0, 255])),
            preview: color_or(&appearance.preview_color, Rgba([0, 128, 0, 255])),
            glyph_fill: color_or(&appearance.glyph_fill, Rgba([255, 255, 255, 255])),
            glyph_hover_fill: color_or(&appearance.glyph_hover_fill, Rgba([248, 215, 218, 255])),
            glyph_stroke: color_or(&appearance.glyph_stroke, Rgba([204, 204, 204, 255])),
            glyph_hover_stroke: color_or(&appearance.glyph_hover_stroke, Rgba([220, 53, 69, 255])),
            glyph_cross: color_or(&appearance.glyph_cross, Rgba([220, 53, 69, 255])),
            glyph_radius,
        }
    }
}

/// Everything a frame depends on, borrowed from the canvas.
pub struct Scene<'a> {
    pub canvas_size: (u32, u32),
    pub image: Option<&'a RgbaImage>,
    pub view: &'a ViewTransform,
    pub rects: &'a [RoiRect],
    pub selected: Option<usize>,
    pub hovered_trash: Option<usize>,
    pub preview: Option<RoiRect>,
}

pub fn render_frame(scene: &Scene<'_>, style: &RenderStyle) -> RgbaImage {
    let (width, height) = scene.canvas_size;
    let mut frame = RgbaImage::from_pixel(width.max(1), height.max(1), TRANSPARENT);

    let Some(image) = scene.image else {
        return frame;
    };

    draw_image(&mut frame, image, scene.view);

    for (i, rect) in scene.rects.iter().enumerate() {
        let color = if scene.selected == Some(i) {
            style.selected
        } else {
            style.rect
        };
        draw_border(&mut frame, scene.view, rect, color);

        let anchor = scene.view.world_to_screen(rect.delete_anchor());
        draw_delete_glyph(&mut frame, anchor, scene.hovered_trash == Some(i), style);
    }

    if let Some(preview) = scene.preview {
        draw_border(&mut frame, scene.view, &preview, style.preview);
    }

    frame
}

/// Nearest-neighbour blit of the image under the view transform. Only the
/// screen area covered by the image is visited.
fn draw_image(frame: &mut RgbaImage, image: &RgbaImage, view: &ViewTransform) {
    let (fw, fh) = frame.dimensions();
    let top_left = view.world_to_screen(Point::new(0.0, 0.0));
    let bottom_right = view.world_to_screen(Point::new(image.width() as f32, image.height() as f32));

    let x0 = top_left.x.floor().clamp(0.0, fw as f32) as u32;
    let y0 = top_left.y.floor().clamp(0.0, fh as f32) as u32;
    let x1 = bottom_right.x.ceil().clamp(0.0, fw as f32) as u32;
    let y1 = bottom_right.y.ceil().clamp(0.0, fh as f32) as u32;

    for sy in y0..y1 {
        for sx in x0..x1 {
            let world = view.screen_to_world(Point::new(sx as f32 + 0.5, sy as f32 + 0.5));
            if world.x < 0.0 || world.y < 0.0 {
                continue;
            }
            let (ix, iy) = (world.x as u32, world.y as u32);
            if ix < image.width() && iy < image.height() {
                frame.put_pixel(sx, sy, *image.get_pixel(ix, iy));
            }
        }
    }
}

fn draw_border(frame: &mut RgbaImage, view: &ViewTransform, rect: &RoiRect, color: Rgba<u8>) {
    let (x, y, w, h) = rect.normalized();
    let a = clip_point(frame, view.world_to_screen(Point::new(x, y)));
    let b = clip_point(frame, view.world_to_screen(Point::new(x + w, y + h)));

    // Centre the stroke on the edge, as a canvas stroke would.
    let left = a.x.round() as i32 - BORDER_WIDTH / 2;
    let top = a.y.round() as i32 - BORDER_WIDTH / 2;
    let right = b.x.round() as i32 + BORDER_WIDTH / 2;
    let bottom = b.y.round() as i32 + BORDER_WIDTH / 2;

    for inset in 0..BORDER_WIDTH {
        let rw = right - left - 2 * inset;
        let rh = bottom - top - 2 * inset;
        if rw <= 0 || rh <= 0 {
            break;
        }
        let outline = Rect::at(left + inset, top + inset).of_size(rw as u32, rh as u32);
        draw_hollow_rect_mut(frame, outline, color);
    }
}

/// Delete glyph in screen space: filled circle, ring, and a 10px cross.
fn draw_delete_glyph(frame: &mut RgbaImage, center: Point, hovered: bool, style: &RenderStyle) {
    let (fw, fh) = frame.dimensions();
    let r = style.glyph_radius;
    if center.x + r < 0.0 || center.y + r < 0.0 || center.x - r > fw as f32 || center.y - r > fh as f32 {
        return;
    }

    let c = (center.x.round() as i32, center.y.round() as i32);
    let radius = r.round() as i32;
    let (fill, stroke) = if hovered {
        (style.glyph_hover_fill, style.glyph_hover_stroke)
    } else {
        (style.glyph_fill, style.glyph_stroke)
    };
    draw_filled_circle_mut(frame, c, radius, fill);
    draw_hollow_circle_mut(frame, c, radius, stroke);

    let (cx, cy) = (c.0 as f32, c.1 as f32);
    for shift in [0.0, 1.0] {
        draw_line_segment_mut(
            frame,
            (cx - CROSS_HALF + shift, cy - CROSS_HALF),
            (cx + CROSS_HALF + shift, cy + CROSS_HALF),
            style.glyph_cross,
        );
        draw_line_segment_mut(
            frame,
            (cx + CROSS_HALF + shift, cy - CROSS_HALF),
            (cx - CROSS_HALF + shift, cy + CROSS_HALF),
            style.glyph_cross,
        );
    }
}

fn clip_point(frame: &RgbaImage, p: Point) -> Point {
    let (fw, fh) = frame.dimensions();
    Point::new(
        p.x.clamp(-CLIP_MARGIN, fw as f32 + CLIP_MARGIN),
        p.y.clamp(-CLIP_MARGIN, fh as f32 + CLIP_MARGIN),
    )
}
