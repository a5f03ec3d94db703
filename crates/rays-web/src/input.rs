use glam::Vec2;
use rays_core::pointer::normalize_in_rect;
use web_sys as web;

/// Pointer position relative to the container, 0..1 inside it. Positions
/// outside the container are not clamped.
#[inline]
pub fn pointer_uv(ev: &web::MouseEvent, container: &web::HtmlElement) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    normalize_in_rect(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}
