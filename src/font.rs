use typeloop_core::FontGeometry;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::js_err;

/// Fetch and parse the font used for every text instance.
pub async fn fetch_font(url: &str) -> anyhow::Result<FontGeometry> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("font fetch {} failed: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    log::info!("[font] loaded {} ({} bytes)", url, bytes.len());
    Ok(FontGeometry::from_bytes(bytes)?)
}
