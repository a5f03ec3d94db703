use crate::config::RaysOrigin;
use crate::constants::{ANCHOR_OUTSIDE, MAX_DEVICE_PIXEL_RATIO};
use glam::Vec2;

#[inline]
pub fn capped_device_pixel_ratio(dpr: f64) -> f64 {
    dpr.min(MAX_DEVICE_PIXEL_RATIO)
}

/// Pixel dimensions of the render surface for a container of a given CSS size.
///
/// `resolution` is the exact css × capped-dpr product fed to the shader;
/// `width`/`height` are the integer backing-store dimensions (at least 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
    pub resolution: Vec2,
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = capped_device_pixel_ratio(device_pixel_ratio);
        let w = css_width * dpr;
        let h = css_height * dpr;
        Self {
            css_width,
            css_height,
            dpr,
            resolution: Vec2::new(w as f32, h as f32),
            width: (w.max(0.0) as u32).max(1),
            height: (h.max(0.0) as u32).max(1),
        }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::from_css(1.0, 1.0, 1.0)
    }
}

/// Anchor point (y-down pixels) and principal direction for an origin on a
/// `w` × `h` surface. The anchor sits `ANCHOR_OUTSIDE` of the surface past
/// its edge; corner origins cast along the normal of their top/bottom edge.
pub fn anchor_and_dir(origin: RaysOrigin, w: f32, h: f32) -> (Vec2, Vec2) {
    let out = ANCHOR_OUTSIDE;
    match origin {
        RaysOrigin::TopCenter => (Vec2::new(0.5 * w, -out * h), Vec2::Y),
        RaysOrigin::TopLeft => (Vec2::new(0.0, -out * h), Vec2::Y),
        RaysOrigin::TopRight => (Vec2::new(w, -out * h), Vec2::Y),
        RaysOrigin::Left => (Vec2::new(-out * w, 0.5 * h), Vec2::X),
        RaysOrigin::Right => (Vec2::new((1.0 + out) * w, 0.5 * h), Vec2::NEG_X),
        RaysOrigin::BottomLeft => (Vec2::new(0.0, (1.0 + out) * h), Vec2::NEG_Y),
        RaysOrigin::BottomCenter => (Vec2::new(0.5 * w, (1.0 + out) * h), Vec2::NEG_Y),
        RaysOrigin::BottomRight => (Vec2::new(w, (1.0 + out) * h), Vec2::NEG_Y),
    }
}

/// Surface size plus the anchor/direction derived from it. Recomputed on
/// every resize and origin change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub size: SurfaceSize,
    pub anchor: Vec2,
    pub dir: Vec2,
}

impl Placement {
    pub fn compute(origin: RaysOrigin, size: SurfaceSize) -> Self {
        let (anchor, dir) = anchor_and_dir(origin, size.resolution.x, size.resolution.y);
        Self { size, anchor, dir }
    }

    #[inline]
    pub fn resolution(&self) -> Vec2 {
        self.size.resolution
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::compute(RaysOrigin::default(), SurfaceSize::default())
    }
}
