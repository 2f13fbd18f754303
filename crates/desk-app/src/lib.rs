//! Desk App: WASM entry point.
//!
//! Composition root: builds the HTTP backend and core state, then hands
//! them to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use desk_types::{DeskError, Result};

pub const CANVAS_ID: &str = "desk_canvas";

/// WASM entry point, called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Service desk starting...");

    let canvas = match find_canvas(CANVAS_ID) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Cannot mount the desk: {}", e);
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(app::DeskApp::new(cc)))),
            )
            .await
            .map_err(|e| DeskError::JsInterop(format!("eframe failed to start: {:?}", e)));
        if let Err(e) = started {
            log::error!("{}", e);
        }
    });
}

/// Look up the canvas the app renders into.
pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
    let document = web_sys::window()
        .ok_or_else(|| DeskError::JsInterop("no window".to_string()))?
        .document()
        .ok_or_else(|| DeskError::JsInterop("no document".to_string()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| DeskError::JsInterop(format!("no element with id '{}'", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| DeskError::JsInterop(format!("element '{}' is not a canvas", id)))
}
