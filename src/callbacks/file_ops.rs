//! File operation callbacks.
//!
//! Handles: open image (file dialog or CLI path) and canvas resize

use super::{SharedCanvas, redraw};
use crate::AppWindow;
use roi_annotator::config::{self, AppConfig};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Sets up all file operation callbacks on the UI.
pub fn setup_file_callbacks(ui: &AppWindow, canvas: SharedCanvas, config: Rc<RefCell<AppConfig>>) {
    setup_open_image(ui, canvas.clone(), config);
    setup_canvas_resized(ui, canvas);
}

/// Decode `path` into the canvas. On failure the previous image and ROIs stay.
pub fn load_image_into(ui: &AppWindow, canvas: &SharedCanvas, config: &RefCell<AppConfig>, path: &Path) {
    let image = match image::open(path) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Failed to load image {}: {e}", path.display());
            ui.set_status_text(format!("Failed to load image: {e}").into());
            return;
        }
    };

    let Ok(mut canvas) = canvas.try_borrow_mut() else {
        return;
    };
    // The fit uses the canvas size, which no resize event may have reported yet.
    let (width, height) = (ui.get_canvas_width(), ui.get_canvas_height());
    if width >= 1.0 && height >= 1.0 {
        canvas.resize(width.round() as u32, height.round() as u32);
    }
    canvas.load_image(image);
    redraw(ui, &canvas);
    ui.set_ocr_text("".into());
    ui.set_status_text(format!("Loaded {}", path.display()).into());

    let mut config = config.borrow_mut();
    config::add_recent_image(&mut config, path.display().to_string());
    if let Err(e) = config::save_config(&config) {
        log::warn!("Could not save recent images: {e}");
    }
}

/// Load an image passed on the command line once the event loop runs and the
/// window has its real size.
pub fn load_image_on_start(ui: &AppWindow, canvas: SharedCanvas, config: Rc<RefCell<AppConfig>>, path: PathBuf) {
    let ui_weak = ui.as_weak();
    slint::Timer::single_shot(Duration::ZERO, move || {
        if let Some(ui) = ui_weak.upgrade() {
            load_image_into(&ui, &canvas, &config, &path);
        }
    });
}

fn setup_open_image(ui: &AppWindow, canvas: SharedCanvas, config: Rc<RefCell<AppConfig>>) {
    let ui_weak = ui.as_weak();
    ui.on_open_image(move || {
        let start_dir = config
            .borrow()
            .files
            .recent_images
            .first()
            .and_then(|p| Path::new(p).parent().map(Path::to_path_buf));

        let mut dialog = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .set_title("Open Image");
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }

        // No file selected is a no-op.
        let Some(path) = dialog.pick_file() else {
            return;
        };
        if let Some(ui) = ui_weak.upgrade() {
            load_image_into(&ui, &canvas, &config, &path);
        }
    });
}

fn setup_canvas_resized(ui: &AppWindow, canvas: SharedCanvas) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_resized(move |width, height| {
        if width < 1.0 || height < 1.0 {
            return;
        }
        let (Ok(mut canvas), Some(ui)) = (canvas.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        if canvas.resize(width.round() as u32, height.round() as u32) {
            redraw(&ui, &canvas);
        }
    });
}
