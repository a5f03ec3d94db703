use crate::config::LightRaysConfig;
use crate::placement::Placement;
use glam::Vec2;

/// Per-frame shader inputs. Layout matches `RaysUniforms` in `rays.wgsl`
/// (96 bytes; `color` is a vec3 at a 16-byte boundary).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RaysUniforms {
    pub resolution: [f32; 2],
    pub ray_pos: [f32; 2],
    pub ray_dir: [f32; 2],
    pub mouse_pos: [f32; 2],
    pub color: [f32; 3],
    pub time: f32,
    pub speed: f32,
    pub spread: f32,
    pub ray_length: f32,
    pub pulsating: f32,
    pub fade_distance: f32,
    pub saturation: f32,
    pub mouse_influence: f32,
    pub noise_amount: f32,
    pub distortion: f32,
    pub _pad: [f32; 3],
}

impl RaysUniforms {
    pub fn new(config: &LightRaysConfig, placement: &Placement, mouse_uv: Vec2, time: f32) -> Self {
        Self {
            resolution: placement.resolution().to_array(),
            ray_pos: placement.anchor.to_array(),
            ray_dir: placement.dir.to_array(),
            mouse_pos: mouse_uv.to_array(),
            color: config.color.to_array(),
            time,
            speed: config.speed,
            spread: config.spread,
            ray_length: config.length,
            pulsating: if config.pulsating { 1.0 } else { 0.0 },
            fade_distance: config.fade_distance,
            saturation: config.saturation,
            mouse_influence: config.effective_mouse_influence(),
            noise_amount: config.noise_amount,
            distortion: config.distortion,
            _pad: [0.0; 3],
        }
    }
}
