use crate::core::Viewport;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn query_canvas(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .query_selector(selector)
        .map_err(|e| anyhow!("bad selector {}: {:?}", selector, e))?
        .ok_or_else(|| anyhow!("missing {}", selector))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{} is not a canvas: {:?}", selector, e))
}

/// Window inner size and device pixel ratio.
pub fn current_viewport(window: &web::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height, window.device_pixel_ratio())
}

/// CSS size from the viewport, backing store scaled by its pixel ratio.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (css_w, css_h) = viewport.output_size();
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css_w));
    _ = style.set_property("height", &format!("{}px", css_h));
    let (w_px, h_px) = viewport.buffer_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}
