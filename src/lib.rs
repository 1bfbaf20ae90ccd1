#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use typeloop_core::{query, SceneController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod effects;
mod events;
mod font;
mod frame;
mod input;
mod panel;
mod render;

use constants::{CANVAS_ID, FONT_URL};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("typeloop-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);
    dom::wire_fullscreen_toggle(&canvas);

    let search = window.location().search().unwrap_or_default();
    let params = query::decode(&search);
    log::info!("[init] parameters {}", query::encode(&params));

    dom::set_page_background(params.background_color);
    let scene = Rc::new(RefCell::new(SceneController::new(params.clone())));
    let runtime = effects::Runtime::new(scene.clone());
    panel::build(&document, &runtime, &params)?;
    panel::wire_toggle_h(&document);

    // Clear-only frames until the first layout lands
    let drag = Rc::new(RefCell::new(input::DragState::default()));
    events::pointer::wire_pointer_handlers(events::pointer::PointerWiring {
        canvas: canvas.clone(),
        drag: drag.clone(),
        runtime: runtime.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene.clone(),
        canvas.clone(),
        gpu,
        drag,
    )));
    frame::start_loop(frame_ctx);

    // The scene has no text without a font
    let font = font::fetch_font(FONT_URL).await?;
    runtime.font_ready(font)?;
    Ok(())
}
