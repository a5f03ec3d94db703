//! CPU evaluation of the light field.
//!
//! Mirrors `fs_rays` in `shaders/rays.wgsl` term for term so the pattern can
//! be checked on the host and rendered without a GPU (native `--snapshot`).
//! Coordinates are surface pixels with the origin at the top-left, y down.

use crate::config::Rgb;
use crate::constants::*;
use crate::uniforms::RaysUniforms;
use glam::{Vec2, Vec3, Vec4};

/// `fract(sin(dot(st, (12.9898, 78.233))) * 43758.5453)`
#[inline]
pub fn hash_noise(st: Vec2) -> f32 {
    let v = st.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.547;
    v - v.floor()
}

/// Base direction bent toward the pointer by `influence` (0 keeps `dir`).
pub fn effective_direction(
    dir: Vec2,
    anchor: Vec2,
    mouse_uv: Vec2,
    resolution: Vec2,
    influence: f32,
) -> Vec2 {
    if influence <= 0.0 {
        return dir;
    }
    let to_mouse = (mouse_uv * resolution - anchor).normalize_or_zero();
    let mixed = dir.lerp(to_mouse, influence).normalize_or_zero();
    if mixed == Vec2::ZERO {
        dir
    } else {
        mixed
    }
}

/// Intensity of one ray layer at `coord`.
pub fn ray_strength(
    u: &RaysUniforms,
    source: Vec2,
    ref_dir: Vec2,
    coord: Vec2,
    seeds: [f32; 2],
    speed: f32,
) -> f32 {
    let t = u.time;
    let to_coord = coord - source;
    let dist = to_coord.length();
    let cos_angle = to_coord.normalize_or_zero().dot(ref_dir);
    let angle = cos_angle
        + u.distortion
            * (t * DISTORTION_TIME_RATE + dist * DISTORTION_DISTANCE_RATE).sin()
            * DISTORTION_SCALE;
    let spread_factor = angle.max(0.0).powf(1.0 / u.spread.max(MIN_SPREAD));

    let max_dist = u.resolution[0] * u.ray_length;
    let length_falloff = ((max_dist - dist) / max_dist).clamp(0.0, 1.0);

    let fade = u.resolution[0] * u.fade_distance;
    let fade_falloff = ((fade - dist) / fade).clamp(FADE_FLOOR, 1.0);

    let pulse = if u.pulsating > 0.5 {
        PULSE_BASE + PULSE_DEPTH * (t * speed * PULSE_RATE).sin()
    } else {
        1.0
    };

    let base = ((0.45 + 0.15 * (angle * seeds[0] + t * speed).sin())
        + (0.3 + 0.2 * (-angle * seeds[1] + t * speed).cos()))
    .clamp(0.0, 1.0);

    base * length_falloff * fade_falloff * spread_factor * pulse
}

/// Luminance-preserving mix between gray (`s = 0`) and `rgb` (`s = 1`).
#[inline]
pub fn apply_saturation(rgb: Vec3, s: f32) -> Vec3 {
    if s == 1.0 {
        return rgb;
    }
    let gray = Vec3::splat(rgb.dot(Vec3::from(LUMA_WEIGHTS)));
    gray.lerp(rgb, s)
}

/// Straight (non-premultiplied) color and coverage at `coord`.
pub fn shade_straight(u: &RaysUniforms, coord: Vec2) -> (Vec3, f32) {
    let res = Vec2::from(u.resolution);
    let anchor = Vec2::from(u.ray_pos);
    let dir = effective_direction(
        Vec2::from(u.ray_dir),
        anchor,
        Vec2::from(u.mouse_pos),
        res,
        u.mouse_influence,
    );

    let a = ray_strength(u, anchor, dir, coord, RAY_A_SEEDS, RAY_A_SPEED * u.speed);
    let b = ray_strength(u, anchor, dir, coord, RAY_B_SEEDS, RAY_B_SPEED * u.speed);
    let alpha = a * RAY_A_WEIGHT + b * RAY_B_WEIGHT;
    let mut rgb = Vec3::splat(alpha);

    if u.noise_amount > 0.0 {
        let n = hash_noise(coord * NOISE_COORD_SCALE + Vec2::splat(u.time * NOISE_TIME_SCALE));
        rgb *= 1.0 - u.noise_amount + u.noise_amount * n;
    }

    let brightness = 1.0 - coord.y / res.y;
    rgb *= Vec3::from(TINT_OFFSET) + brightness * Vec3::from(TINT_GAIN);

    rgb = apply_saturation(rgb, u.saturation);
    rgb *= Vec3::from(u.color);

    (rgb, alpha)
}

/// Final premultiplied RGBA at `coord`; composites like a straight-alpha
/// canvas showing `rgb` at coverage `alpha`.
pub fn shade(u: &RaysUniforms, coord: Vec2) -> Vec4 {
    let (rgb, alpha) = shade_straight(u, coord);
    (rgb * alpha).extend(alpha)
}

/// Evaluate every pixel center of a `width` × `height` surface into RGBA8.
/// With a `background` the premultiplied output is composited over it and
/// written opaque; otherwise channels are written as-is.
pub fn render_rgba8(
    u: &RaysUniforms,
    width: u32,
    height: u32,
    background: Option<Rgb>,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    for y in 0..height {
        for x in 0..width {
            let c = shade(u, Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
            let px = match background {
                Some(bg) => {
                    let keep = 1.0 - c.w.clamp(0.0, 1.0);
                    let rgb = c.truncate() + Vec3::from(bg.to_array()) * keep;
                    [to_byte(rgb.x), to_byte(rgb.y), to_byte(rgb.z), 255]
                }
                None => [to_byte(c.x), to_byte(c.y), to_byte(c.z), to_byte(c.w)],
            };
            out.extend_from_slice(&px);
        }
    }
    out
}
