use typeloop_core::color::to_css_hex;
use typeloop_core::{query, ParamKey};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::constants::MAX_DEVICE_PIXEL_RATIO;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Attach a listener for the lifetime of the page.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    add_listener(element, "click", move |_| handler());
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Double-clicking the canvas toggles fullscreen; double-clicks inside the
/// panel (selecting a word of the message) do not.
pub fn wire_fullscreen_toggle(canvas: &web::HtmlCanvasElement) {
    let target = canvas.clone();
    let canvas = canvas.clone();
    add_listener(&target, "dblclick", move |_| {
        let Some(document) = window_document() else {
            return;
        };
        let res = if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
            Ok(())
        } else {
            canvas.request_fullscreen()
        };
        if let Err(e) = res {
            log::warn!("[dom] fullscreen toggle failed: {:?}", e);
        }
    });
}

pub fn set_page_background(color: u32) {
    let Some(body) = window_document().and_then(|d| d.body()) else {
        return;
    };
    _ = body.set_attribute("style", &format!("background-color:{}", to_css_hex(color)));
}

/// Rewrite one key of the page URL in place, without a history entry.
pub fn replace_query_key(key: ParamKey, value: &str) {
    let Some(window) = web::window() else {
        return;
    };
    let location = window.location();
    let search = location.search().unwrap_or_default();
    let next = query::update_query(&search, key, value);
    let path = location.pathname().unwrap_or_default();
    let hash = location.hash().unwrap_or_default();
    let url = format!("{}?{}{}", path, next, hash);
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
                log::warn!("[dom] replaceState failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("[dom] no history: {:?}", e),
    }
}

/// Absolute link to this page carrying `query`.
pub fn share_url(query: &str) -> Option<String> {
    let location = web::window()?.location();
    let origin = location.origin().ok()?;
    let path = location.pathname().ok()?;
    Some(format!("{}{}?{}", origin, path, query))
}

/// `navigator.clipboard.writeText(text)`, looked up dynamically since the
/// clipboard API is not available in every context (e.g. plain http).
pub fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let navigator = js_sys::Reflect::get(&window, &JsValue::from_str("navigator"))?;
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    write.call1(&clipboard, &JsValue::from_str(text))?;
    Ok(())
}
