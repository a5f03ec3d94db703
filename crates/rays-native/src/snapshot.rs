use anyhow::{anyhow, Context};
use glam::Vec2;
use rays_core::constants::POINTER_REST_UV;
use rays_core::field::render_rgba8;
use rays_core::{LightRaysConfig, Placement, RaysUniforms, Rgb, SurfaceSize};
use std::path::Path;

/// Evaluate one frame at `time` seconds on the CPU, pointer at rest,
/// composited over `background`.
pub fn render(
    config: &LightRaysConfig,
    width: u32,
    height: u32,
    time: f32,
    background: Rgb,
) -> anyhow::Result<image::RgbaImage> {
    let size = SurfaceSize::from_css(width as f64, height as f64, 1.0);
    let placement = Placement::compute(config.origin, size);
    let uniforms = RaysUniforms::new(config, &placement, Vec2::from(POINTER_REST_UV), time);
    let pixels = render_rgba8(&uniforms, size.width, size.height, Some(background));
    image::RgbaImage::from_raw(size.width, size.height, pixels)
        .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", size.width, size.height))
}

pub fn write(
    path: &Path,
    config: &LightRaysConfig,
    width: u32,
    height: u32,
    time: f32,
    background: Rgb,
) -> anyhow::Result<()> {
    let img = render(config, width, height, time, background)?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "[rays] snapshot {}x{} t={:.2}s -> {}",
        img.width(),
        img.height(),
        time,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_opaque_and_sized() {
        let black = Rgb::new(0.0, 0.0, 0.0);
        let img = render(&LightRaysConfig::hero(), 40, 20, 1.0, black).unwrap();
        assert_eq!(img.dimensions(), (40, 20));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn top_rows_are_brighter_than_bottom_rows() {
        let black = Rgb::new(0.0, 0.0, 0.0);
        let img = render(&LightRaysConfig::default(), 32, 64, 0.0, black).unwrap();
        let row_sum = |y: u32| (0..32).map(|x| img.get_pixel(x, y).0[0] as u32).sum::<u32>();
        assert!(row_sum(2) > row_sum(61));
    }
}
