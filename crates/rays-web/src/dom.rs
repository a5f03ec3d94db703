use anyhow::anyhow;
use rays_core::SurfaceSize;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Layout size of the container in CSS pixels.
#[inline]
pub fn container_css_size(container: &web::HtmlElement) -> (f64, f64) {
    (container.client_width() as f64, container.client_height() as f64)
}

pub fn clear_children(container: &web::HtmlElement) {
    while let Some(child) = container.first_child() {
        if container.remove_child(&child).is_err() {
            break;
        }
    }
}

/// Replace the container's contents with a fresh canvas sized to `size`.
pub fn mount_canvas(
    container: &web::HtmlElement,
    size: &SurfaceSize,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    let style = canvas.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
    let _ = style.set_property("display", "block");
    sync_canvas_backing_size(&canvas, size);

    clear_children(container);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: &SurfaceSize) {
    canvas.set_width(size.width);
    canvas.set_height(size.height);
}

pub fn remove_from_parent(node: &web::Node) {
    if let Some(parent) = node.parent_node() {
        let _ = parent.remove_child(node);
    }
}
