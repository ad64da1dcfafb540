use serde::{Deserialize, Serialize};

/// A 2D point. Whether it is in screen or image space depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A region of interest in image space.
///
/// `(x, y)` is the corner where the drag started; `w` and `h` keep the sign of
/// the drag direction, so a box drawn up-and-left has negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RoiRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanned by a drag from `start` to `end`.
    pub fn from_drag(start: Point, end: Point) -> Self {
        Self {
            x: start.x,
            y: start.y,
            w: end.x - start.x,
            h: end.y - start.y,
        }
    }

    /// Returns `(min_x, min_y, width, height)` with non-negative extents.
    pub fn normalized(&self) -> (f32, f32, f32, f32) {
        (
            self.x.min(self.x + self.w),
            self.y.min(self.y + self.h),
            self.w.abs(),
            self.h.abs(),
        )
    }

    /// Inclusive containment test that ignores the drag direction.
    pub fn contains(&self, p: Point) -> bool {
        let (x, y, w, h) = self.normalized();
        p.x >= x && p.x <= x + w && p.y >= y && p.y <= y + h
    }

    /// Anchor of the delete glyph: the corner at `(x + w, y)`.
    pub fn delete_anchor(&self) -> Point {
        Point::new(self.x + self.w, self.y)
    }

    /// Both extents must be strictly larger than `min_size`.
    pub fn exceeds(&self, min_size: f32) -> bool {
        self.w.abs() > min_size && self.h.abs() > min_size
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Maps a wheel delta to a direction. Negative deltas (wheel pushed away)
    /// zoom in; zero carries no direction.
    pub fn from_wheel_delta(delta_y: f32) -> Option<Self> {
        if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        shift: false,
        alt: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        shift: false,
        alt: false,
    };
}

/// What the pointer is currently doing on the canvas.
///
/// Panning and drawing are variants of one enum so they can never be active
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Dragging the view; `last` is the previous pointer position in screen space.
    Panning { last: Point },
    /// Dragging out a new rectangle; both points are in image space.
    Drawing { start: Point, current: Point },
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    /// The uncommitted rectangle shown while drawing.
    pub fn preview(&self) -> Option<RoiRect> {
        match *self {
            InteractionMode::Drawing { start, current } => Some(RoiRect::from_drag(start, current)),
            _ => None,
        }
    }
}
