//! The annotation canvas controller.
//!
//! Owns the loaded image, the view transform, the rectangle list and the
//! interaction mode. Every pointer handler resolves to exactly one action and
//! returns `true` when the frame must be redrawn.

use image::{DynamicImage, RgbaImage};

use crate::config::{AppConfig, CanvasConfig, InteractionConfig};
use crate::ocr::RoiSubmitter;
use crate::render::{RenderStyle, Scene, render_frame};
use crate::roi::RoiPayload;
use crate::state::{InteractionMode, Modifiers, Point, RoiRect, ViewTransform, ZoomDirection};

pub struct AnnotationCanvas {
    settings: CanvasConfig,
    interaction: InteractionConfig,
    style: RenderStyle,
    max_encoded_bytes: usize,
    canvas_size: (u32, u32),
    image: Option<RgbaImage>,
    view: ViewTransform,
    rects: Vec<RoiRect>,
    mode: InteractionMode,
    selected: Option<usize>,
    hovered_trash: Option<usize>,
    submitter: Box<dyn RoiSubmitter>,
}

impl AnnotationCanvas {
    pub fn new(config: &AppConfig, canvas_size: (u32, u32), submitter: Box<dyn RoiSubmitter>) -> Self {
        let settings = config.canvas.clone();
        Self {
            view: ViewTransform::new(settings.min_scale, settings.max_scale, settings.zoom_step),
            style: RenderStyle::from_config(&config.appearance, settings.trash_glyph_radius),
            interaction: config.interaction.clone(),
            max_encoded_bytes: config.ocr.max_encoded_bytes,
            settings,
            canvas_size,
            image: None,
            rects: Vec::new(),
            mode: InteractionMode::Idle,
            selected: None,
            hovered_trash: None,
            submitter,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn rects(&self) -> &[RoiRect] {
        &self.rects
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered_trash(&self) -> Option<usize> {
        self.hovered_trash
    }

    /// Replace the image, drop all rectangles and fit the view to the canvas.
    pub fn load_image(&mut self, image: DynamicImage) {
        let image = image.into_rgba8();
        self.view.fit(self.canvas_size, image.dimensions());
        log::info!(
            "Loaded {}x{} image, scale {:.3}, offset ({:.1}, {:.1})",
            image.width(),
            image.height(),
            self.view.scale,
            self.view.offset_x,
            self.view.offset_y
        );
        self.image = Some(image);
        self.rects.clear();
        self.selected = None;
        self.hovered_trash = None;
        self.mode = InteractionMode::Idle;
    }

    /// New canvas size; the transform is kept as is.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.canvas_size = (width, height);
        true
    }

    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) -> bool {
        if self.image.is_none() || !self.contains_screen(screen) {
            return false;
        }

        if let Some(index) = self.trash_hit(screen) {
            self.rects.remove(index);
            self.selected = None;
            self.hovered_trash = self.trash_hit(screen);
            log::info!("Deleted ROI {index} via trash icon, {} left", self.rects.len());
            return true;
        }

        if self.interaction.pan_modifier.is_held(&modifiers) {
            self.mode = InteractionMode::Panning { last: screen };
            return false;
        }

        let world = self.view.screen_to_world(screen);
        self.selected = self.rect_at(world);
        match self.selected {
            Some(index) => log::debug!("Selected ROI {index}"),
            None => {
                self.mode = InteractionMode::Drawing {
                    start: world,
                    current: world,
                };
                log::debug!("Drawing from ({:.1}, {:.1})", world.x, world.y);
            }
        }
        true
    }

    /// A move outside the canvas counts as leaving it, even while the
    /// toolkit keeps the pointer grabbed for a held button.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        if !self.contains_screen(screen) {
            return self.pointer_leave();
        }

        self.hovered_trash = self.trash_hit(screen);

        match self.mode {
            InteractionMode::Panning { last } => {
                self.view.pan(screen.x - last.x, screen.y - last.y);
                self.mode = InteractionMode::Panning { last: screen };
            }
            InteractionMode::Drawing { start, .. } => {
                self.mode = InteractionMode::Drawing {
                    start,
                    current: self.view.screen_to_world(screen),
                };
            }
            InteractionMode::Idle => {}
        }
        true
    }

    pub fn pointer_up(&mut self, screen: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        if !self.contains_screen(screen) {
            return self.pointer_leave();
        }

        match self.mode {
            InteractionMode::Panning { .. } => {
                self.mode = InteractionMode::Idle;
                false
            }
            InteractionMode::Drawing { start, .. } => {
                self.mode = InteractionMode::Idle;
                let rect = RoiRect::from_drag(start, self.view.screen_to_world(screen));
                if rect.exceeds(self.settings.min_rect_size) {
                    self.commit(rect);
                } else {
                    log::debug!("Discarded {:.1}x{:.1} drag below threshold", rect.w, rect.h);
                }
                true
            }
            InteractionMode::Idle => false,
        }
    }

    /// The pointer left the canvas: abort any pan or draw without committing.
    pub fn pointer_leave(&mut self) -> bool {
        if self.image.is_none() {
            return false;
        }
        let changed = !self.mode.is_idle() || self.hovered_trash.is_some();
        self.mode = InteractionMode::Idle;
        self.hovered_trash = None;
        changed
    }

    /// Zoom one step at the pointer. `delta_y` uses the DOM sign convention:
    /// negative zooms in.
    pub fn wheel(&mut self, screen: Point, delta_y: f32, modifiers: Modifiers) -> bool {
        if self.image.is_none() {
            return false;
        }
        if self.interaction.wheel_zoom_requires_modifier && !modifiers.control {
            return false;
        }
        let Some(direction) = ZoomDirection::from_wheel_delta(delta_y) else {
            return false;
        };
        self.view.zoom_at(screen, direction);
        self.hovered_trash = self.trash_hit(screen);
        true
    }

    /// Remove the selected rectangle, if any.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected.take() else {
            return false;
        };
        if index < self.rects.len() {
            self.rects.remove(index);
            log::info!("Deleted selected ROI {index}");
        }
        self.hovered_trash = None;
        true
    }

    /// Remove every rectangle.
    pub fn reset(&mut self) -> bool {
        self.rects.clear();
        self.selected = None;
        self.hovered_trash = None;
        true
    }

    pub fn render(&self) -> RgbaImage {
        let scene = Scene {
            canvas_size: self.canvas_size,
            image: self.image.as_ref(),
            view: &self.view,
            rects: &self.rects,
            selected: self.selected,
            hovered_trash: self.hovered_trash,
            preview: self.mode.preview(),
        };
        render_frame(&scene, &self.style)
    }

    /// Index of the delete glyph under `screen`; later rectangles win.
    pub fn trash_hit(&self, screen: Point) -> Option<usize> {
        let radius = self.settings.trash_hit_radius;
        self.rects
            .iter()
            .rposition(|rect| self.view.world_to_screen(rect.delete_anchor()).distance_to(screen) < radius)
    }

    /// Whether a screen point lies on the canvas, edges included.
    pub fn contains_screen(&self, screen: Point) -> bool {
        let (width, height) = self.canvas_size;
        screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= width as f32 && screen.y <= height as f32
    }

    /// Topmost rectangle containing the image-space point.
    pub fn rect_at(&self, world: Point) -> Option<usize> {
        self.rects.iter().rposition(|rect| rect.contains(world))
    }

    fn commit(&mut self, rect: RoiRect) {
        self.rects.push(rect);
        log::info!(
            "Committed ROI {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
            self.rects.len() - 1,
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );

        let Some(image) = self.image.as_ref() else {
            return;
        };
        match RoiPayload::build(image, rect, self.max_encoded_bytes) {
            Ok(payload) => self.submitter.submit(payload),
            Err(e) => log::warn!("Not submitting ROI for OCR: {e}"),
        }
    }
}
