use super::{Point, ZoomDirection};

/// Affine pan/zoom transform from image space to screen space.
///
/// `screen = world * scale + offset`. The scale is kept inside
/// `[min_scale, max_scale]` by every operation that changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    min_scale: f32,
    max_scale: f32,
    zoom_step: f32,
}

impl ViewTransform {
    /// Identity transform with the given scale limits and zoom step factor.
    pub fn new(min_scale: f32, max_scale: f32, zoom_step: f32) -> Self {
        Self {
            scale: 1.0_f32.clamp(min_scale, max_scale),
            offset_x: 0.0,
            offset_y: 0.0,
            min_scale,
            max_scale,
            zoom_step,
        }
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset_x,
            world.y * self.scale + self.offset_y,
        )
    }

    /// Zooms one step keeping the world point under `screen` fixed on screen.
    pub fn zoom_at(&mut self, screen: Point, direction: ZoomDirection) {
        let world = self.screen_to_world(screen);
        let old_scale = self.scale;
        let factor = match direction {
            ZoomDirection::In => self.zoom_step,
            ZoomDirection::Out => 1.0 / self.zoom_step,
        };
        let new_scale = (old_scale * factor).clamp(self.min_scale, self.max_scale);

        self.scale = new_scale;
        self.offset_x -= world.x * (new_scale - old_scale);
        self.offset_y -= world.y * (new_scale - old_scale);
    }

    /// Moves the view by a screen-space delta. Not clamped: the image may be
    /// dragged entirely off the canvas.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Fits an image into the canvas preserving aspect ratio, centered.
    pub fn fit(&mut self, canvas_size: (u32, u32), image_size: (u32, u32)) {
        let (cw, ch) = (canvas_size.0 as f32, canvas_size.1 as f32);
        let (iw, ih) = (image_size.0.max(1) as f32, image_size.1.max(1) as f32);

        self.scale = (cw / iw).min(ch / ih).clamp(self.min_scale, self.max_scale);
        self.offset_x = (cw - iw * self.scale) / 2.0;
        self.offset_y = (ch - ih * self.scale) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centers_wide_image() {
        let mut view = ViewTransform::new(0.2, 5.0, 1.1);
        view.fit((800, 600), (200, 100));
        assert_eq!(view.scale, 4.0);
        assert_eq!(view.offset_x, 0.0);
        assert_eq!(view.offset_y, 100.0);
    }

    #[test]
    fn fit_respects_scale_limits() {
        let mut view = ViewTransform::new(0.2, 5.0, 1.1);
        view.fit((800, 600), (10, 10));
        assert_eq!(view.scale, 5.0);
        assert_eq!(view.offset_x, 375.0);
        assert_eq!(view.offset_y, 275.0);
    }

    #[test]
    fn zoom_out_is_inverse_of_zoom_in() {
        let mut view = ViewTransform::new(0.2, 5.0, 1.1);
        let anchor = Point::new(123.0, 45.0);
        view.zoom_at(anchor, ZoomDirection::In);
        view.zoom_at(anchor, ZoomDirection::Out);
        assert!((view.scale - 1.0).abs() < 1e-5);
        assert!(view.offset_x.abs() < 1e-3);
        assert!(view.offset_y.abs() < 1e-3);
    }
}
