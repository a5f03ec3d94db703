use crate::constants::{POINTER_REST_UV, POINTER_SMOOTHING};
use glam::Vec2;

/// Pointer position in container-normalized coordinates (0..1, y-down).
///
/// `raw` follows every pointer-move event; `smoothed` is blended toward it
/// once per frame so the ray direction never jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smoothed: Vec2,
}

impl Default for PointerState {
    fn default() -> Self {
        let rest = Vec2::from(POINTER_REST_UV);
        Self {
            raw: rest,
            smoothed: rest,
        }
    }
}

impl PointerState {
    #[inline]
    pub fn set_raw(&mut self, uv: Vec2) {
        self.raw = uv;
    }

    /// One exponential smoothing step; returns the new smoothed position.
    #[inline]
    pub fn step(&mut self) -> Vec2 {
        self.smoothed = self.smoothed * POINTER_SMOOTHING + self.raw * (1.0 - POINTER_SMOOTHING);
        self.smoothed
    }
}

/// Normalize a client-space position against a container rectangle. Values
/// outside the rectangle are kept (they still steer the rays).
#[inline]
pub fn normalize_in_rect(x: f32, y: f32, left: f32, top: f32, width: f32, height: f32) -> Vec2 {
    if width > 0.0 && height > 0.0 {
        Vec2::new((x - left) / width, (y - top) / height)
    } else {
        Vec2::from(POINTER_REST_UV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_a_fixed_fraction_toward_raw() {
        let mut p = PointerState::default();
        p.set_raw(Vec2::new(1.5, 0.5));
        let s = p.step();
        assert!((s.x - (0.5 * 0.92 + 1.5 * 0.08)).abs() < 1e-6);
        assert!((s.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn step_never_overshoots() {
        let mut p = PointerState::default();
        p.set_raw(Vec2::new(0.9, 0.1));
        let mut prev = p.smoothed.distance(p.raw);
        for _ in 0..200 {
            p.step();
            let d = p.smoothed.distance(p.raw);
            assert!(d <= prev + 1e-6);
            prev = d;
        }
    }

    #[test]
    fn degenerate_rect_maps_to_rest() {
        assert_eq!(normalize_in_rect(10.0, 10.0, 0.0, 0.0, 0.0, 100.0), Vec2::new(0.5, 0.5));
        let uv = normalize_in_rect(150.0, 50.0, 100.0, 0.0, 200.0, 100.0);
        assert!((uv.x - 0.25).abs() < 1e-6 && (uv.y - 0.5).abs() < 1e-6);
    }
}
