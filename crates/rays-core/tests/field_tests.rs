// Host-side tests for the CPU light-field evaluator.

use glam::{Vec2, Vec3};
use rays_core::field::{
    apply_saturation, effective_direction, render_rgba8, shade, shade_straight,
};
use rays_core::{LightRaysConfig, Placement, RaysOrigin, RaysUniforms, Rgb, SurfaceSize};

fn uniforms(config: &LightRaysConfig, w: f64, h: f64, time: f32) -> RaysUniforms {
    let placement = Placement::compute(config.origin, SurfaceSize::from_css(w, h, 1.0));
    RaysUniforms::new(config, &placement, Vec2::new(0.5, 0.5), time)
}

#[test]
fn uniform_block_is_96_bytes() {
    assert_eq!(std::mem::size_of::<RaysUniforms>(), 96);
}

#[test]
fn zero_influence_keeps_base_direction() {
    let dir = Vec2::new(0.0, 1.0);
    let anchor = Vec2::new(50.0, -20.0);
    let d = effective_direction(dir, anchor, Vec2::new(0.9, 0.1), Vec2::new(100.0, 100.0), 0.0);
    assert_eq!(d, dir);
}

#[test]
fn full_influence_points_at_the_pointer() {
    let anchor = Vec2::new(50.0, -20.0);
    let res = Vec2::new(100.0, 100.0);
    let mouse = Vec2::new(0.9, 0.6);
    let d = effective_direction(Vec2::Y, anchor, mouse, res, 1.0);
    let expected = (mouse * res - anchor).normalize();
    assert!(d.dot(expected) > 0.9999);
}

#[test]
fn pointer_on_the_anchor_keeps_base_direction() {
    let anchor = Vec2::new(50.0, 50.0);
    let d = effective_direction(Vec2::Y, anchor, Vec2::new(0.5, 0.5), Vec2::new(100.0, 100.0), 1.0);
    assert_eq!(d, Vec2::Y);
}

#[test]
fn saturation_one_is_identity() {
    let rgb = Vec3::new(0.2, 0.5, 0.9);
    assert_eq!(apply_saturation(rgb, 1.0), rgb);
}

#[test]
fn saturation_zero_with_white_is_gray() {
    let config = LightRaysConfig {
        saturation: 0.0,
        ..LightRaysConfig::default()
    };
    let u = uniforms(&config, 64.0, 64.0, 1.25);
    for (x, y) in [(32.0, 10.0), (10.0, 40.0), (60.0, 60.0)] {
        let c = shade(&u, Vec2::new(x, y));
        assert!((c.x - c.y).abs() < 1e-6 && (c.y - c.z).abs() < 1e-6, "{c:?}");
    }
}

#[test]
fn output_is_premultiplied() {
    let config = LightRaysConfig {
        noise_amount: 0.5,
        distortion: 0.3,
        pulsating: true,
        ..LightRaysConfig::default()
    };
    let u = uniforms(&config, 32.0, 24.0, 3.7);
    for y in 0..24 {
        for x in 0..32 {
            let coord = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let c = shade(&u, coord);
            let (straight, alpha) = shade_straight(&u, coord);
            assert!(c.w >= 0.0);
            assert_eq!(c.w, alpha);
            assert!((c.truncate() - straight * alpha).abs().max_element() < 1e-6);
            assert!(c.x <= c.w + 1e-5 && c.y <= c.w + 1e-5 && c.z <= c.w + 1e-5);
        }
    }
}

#[test]
fn partial_coverage_is_not_brightened() {
    let u = uniforms(&LightRaysConfig::default(), 200.0, 200.0, 0.0);
    let coord = Vec2::new(100.5, 50.5);
    let (straight, alpha) = shade_straight(&u, coord);
    assert!(alpha > 0.1 && alpha < 0.9, "alpha {alpha}");

    // Over black a straight-alpha canvas shows straight * alpha.
    let c = shade(&u, coord);
    assert!((c.x - straight.x * alpha).abs() < 1e-6);
    assert!(c.x < straight.x);

    let px = render_rgba8(&u, 200, 200, Some(Rgb::new(0.0, 0.0, 0.0)));
    let i = (50 * 200 + 100) * 4;
    let expected = (straight.x * alpha * 255.0).round() as i32;
    assert!((px[i] as i32 - expected).abs() <= 1, "{} vs {expected}", px[i]);
}

#[test]
fn rays_are_visible_below_the_anchor() {
    let u = uniforms(&LightRaysConfig::default(), 200.0, 200.0, 0.0);
    assert!(shade(&u, Vec2::new(100.0, 50.0)).w > 0.1);
}

#[test]
fn nothing_is_drawn_beyond_ray_length() {
    let config = LightRaysConfig {
        length: 0.5,
        ..LightRaysConfig::default()
    };
    // Anchor at (100, -40); reach is 100 px.
    let u = uniforms(&config, 200.0, 200.0, 0.0);
    assert_eq!(shade(&u, Vec2::new(100.0, 190.0)).w, 0.0);
}

#[test]
fn nothing_is_drawn_behind_the_source() {
    let config = LightRaysConfig {
        origin: RaysOrigin::Left,
        ..LightRaysConfig::default()
    };
    let u = uniforms(&config, 100.0, 100.0, 0.0);
    // Anchor at (-20, 50) casting +x; this point is straight above it.
    assert_eq!(shade(&u, Vec2::new(-20.0, 0.0)).w, 0.0);
}

#[test]
fn narrow_spread_dims_off_axis_pixels() {
    let wide = uniforms(&LightRaysConfig::default(), 200.0, 200.0, 0.5);
    let narrow = uniforms(
        &LightRaysConfig {
            spread: 0.1,
            ..LightRaysConfig::default()
        },
        200.0,
        200.0,
        0.5,
    );
    let off_axis = Vec2::new(190.0, 40.0);
    assert!(shade(&narrow, off_axis).w < shade(&wide, off_axis).w);
}

#[test]
fn color_scales_channels() {
    let config = LightRaysConfig {
        color: Rgb::new(1.0, 0.0, 0.0),
        ..LightRaysConfig::default()
    };
    let u = uniforms(&config, 100.0, 100.0, 0.0);
    let c = shade(&u, Vec2::new(50.0, 30.0));
    assert!(c.x > 0.0);
    assert_eq!(c.y, 0.0);
    assert_eq!(c.z, 0.0);
}

#[test]
fn rgba8_buffer_covers_every_pixel() {
    let u = uniforms(&LightRaysConfig::hero(), 16.0, 9.0, 2.0);
    let transparent = render_rgba8(&u, 16, 9, None);
    assert_eq!(transparent.len(), 16 * 9 * 4);

    let opaque = render_rgba8(&u, 16, 9, Some(Rgb::new(0.0, 0.0, 0.0)));
    assert!(opaque.chunks_exact(4).all(|px| px[3] == 255));
    // Over black the composite equals the premultiplied color.
    assert_eq!(
        transparent.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect::<Vec<_>>(),
        opaque.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect::<Vec<_>>()
    );
}
