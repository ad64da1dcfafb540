slint::include_modules!();

mod callbacks;

use roi_annotator::canvas::AnnotationCanvas;
use roi_annotator::config;
use roi_annotator::ocr::{HttpOcrClient, LogOnlySubmitter, OcrOutcome, RoiSubmitter};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Canvas size used until the window reports its real layout.
const INITIAL_CANVAS_SIZE: (u32, u32) = (800, 600);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config();
    let ui = AppWindow::new()?;

    let submitter: Box<dyn RoiSubmitter> = if config.ocr.enabled {
        let ui_weak = ui.as_weak();
        log::info!("OCR endpoint: {}", config.ocr.process_url());
        Box::new(HttpOcrClient::new(config.ocr.clone(), move |outcome: OcrOutcome| {
            let message = match outcome.result {
                Ok(text) => format!("OCR: {}", text.trim()),
                Err(e) => format!("OCR failed: {e}"),
            };
            let ui_weak = ui_weak.clone();
            let posted = slint::invoke_from_event_loop(move || {
                if let Some(ui) = ui_weak.upgrade() {
                    ui.set_ocr_text(message.into());
                }
            });
            if let Err(e) = posted {
                log::warn!("Dropping OCR outcome, event loop is gone: {e}");
            }
        })?)
    } else {
        log::info!("OCR disabled in config");
        Box::new(LogOnlySubmitter)
    };

    let canvas = Rc::new(RefCell::new(AnnotationCanvas::new(&config, INITIAL_CANVAS_SIZE, submitter)));
    let config = Rc::new(RefCell::new(config));

    callbacks::pointer::setup_pointer_callbacks(&ui, canvas.clone());
    callbacks::controls::setup_control_callbacks(&ui, canvas.clone());
    callbacks::file_ops::setup_file_callbacks(&ui, canvas.clone(), config.clone());

    // Optional image path as first argument.
    if let Some(path) = std::env::args().nth(1) {
        callbacks::file_ops::load_image_on_start(&ui, canvas.clone(), config.clone(), PathBuf::from(path));
    }

    ui.run()?;
    Ok(())
}
