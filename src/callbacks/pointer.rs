//! Pointer callbacks for the canvas.
//!
//! Handles: pointer_down, pointer_move, pointer_up, pointer_exit, wheel

use super::{SharedCanvas, redraw};
use crate::AppWindow;
use roi_annotator::state::{Modifiers, Point};
use slint::ComponentHandle;

/// Sets up all pointer-related callbacks on the UI.
pub fn setup_pointer_callbacks(ui: &AppWindow, canvas: SharedCanvas) {
    setup_pointer_down(ui, canvas.clone());
    setup_pointer_move(ui, canvas.clone());
    setup_pointer_up(ui, canvas.clone());
    setup_pointer_exit(ui, canvas.clone());
    setup_wheel(ui, canvas);
}

fn setup_pointer_down(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_down(move |x, y, control, shift, alt| {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        let count = canvas.rects().len();
        let modifiers = Modifiers { control, shift, alt };
        if canvas.pointer_down(Point::new(x, y), modifiers) {
            if canvas.rects().len() < count {
                ui.set_status_text("ROI deleted".into());
            } else if let Some(index) = canvas.selected() {
                ui.set_status_text(format!("Selected ROI {}", index + 1).into());
            }
            redraw(&ui, &canvas);
        }
    });
}

fn setup_pointer_move(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_move(move |x, y| {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        if canvas.pointer_move(Point::new(x, y)) {
            redraw(&ui, &canvas);
        }
    });
}

fn setup_pointer_up(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_up(move |x, y| {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        let count = canvas.rects().len();
        if canvas.pointer_up(Point::new(x, y)) {
            if canvas.rects().len() > count {
                ui.set_status_text(format!("ROI {} added", canvas.rects().len()).into());
            }
            redraw(&ui, &canvas);
        }
    });
}

fn setup_pointer_exit(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_exit(move || {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        if canvas.pointer_leave() {
            redraw(&ui, &canvas);
        }
    });
}

fn setup_wheel(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_wheel(move |x, y, delta_y, control| {
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        let modifiers = Modifiers {
            control,
            ..Modifiers::NONE
        };
        // Slint reports wheel-up as a positive delta; the canvas expects the DOM sign.
        if canvas.wheel(Point::new(x, y), -delta_y, modifiers) {
            ui.set_status_text(format!("Zoom {:.0}%", canvas.view().scale * 100.0).into());
            redraw(&ui, &canvas);
        }
    });
}
