//! Button callbacks.
//!
//! Handles: delete_selected, reset_rects

use super::{SharedCanvas, redraw};
use crate::AppWindow;
use slint::ComponentHandle;

pub fn setup_control_callbacks(ui: &AppWindow, canvas: SharedCanvas) {
    setup_delete_selected(ui, canvas.clone());
    setup_reset(ui, canvas);
}

fn setup_delete_selected(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_delete_selected(move || {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        if canvas.delete_selected() {
            ui.set_status_text("ROI deleted".into());
            redraw(&ui, &canvas);
        }
    });
}

fn setup_reset(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_reset_rects(move || {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        if canvas.reset() {
            ui.set_status_text("All ROIs cleared".into());
            redraw(&ui, &canvas);
        }
    });
}
