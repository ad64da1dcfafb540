//! Callback handlers wiring the Slint window to the annotation canvas.
//!
//! - `pointer` - press/move/release/leave and wheel zoom on the canvas
//! - `controls` - delete-selected and reset buttons
//! - `file_ops` - image loading and canvas resize

pub mod controls;
pub mod file_ops;
pub mod pointer;

use crate::AppWindow;
use roi_annotator::canvas::AnnotationCanvas;
use roi_annotator::utils::to_slint_image;
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedCanvas = Rc<RefCell<AnnotationCanvas>>;

/// Render the canvas and push the frame plus derived state to the window.
pub fn redraw(ui: &AppWindow, canvas: &AnnotationCanvas) {
    ui.set_frame(to_slint_image(&canvas.render()));
    ui.set_image_loaded(canvas.has_image());
    ui.set_has_selection(canvas.selected().is_some());
    ui.set_rect_count(canvas.rects().len() as i32);
}
