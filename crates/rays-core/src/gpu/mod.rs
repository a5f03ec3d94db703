//! wgpu device + surface wiring shared by the web and native front-ends.

mod fault;
mod pipeline;

use crate::error::{RaysError, Result};
use crate::placement::SurfaceSize;
use crate::uniforms::RaysUniforms;
use fault::FaultSlot;
use pipeline::RaysPipeline;

pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    rays: RaysPipeline,
    faults: FaultSlot,
    destroyed: bool,
}

impl GpuContext {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        size: &SurfaceSize,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("rays_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let faults = FaultSlot::default();
        faults.install(&device);

        let caps = surface.get_capabilities(&adapter);
        // Shader output is already display-referred; avoid an sRGB re-encode.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let rays = RaysPipeline::new(&device, format);
        log::debug!("[rays] gpu ready format={:?} alpha={:?}", format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            rays,
            faults,
            destroyed: false,
        })
    }

    pub fn resize(&mut self, size: &SurfaceSize) {
        let unchanged = size.width == self.config.width && size.height == self.config.height;
        if self.destroyed || unchanged {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn draw(&mut self, uniforms: &RaysUniforms) -> Result<()> {
        if self.destroyed {
            return Err(RaysError::Draw("device destroyed".into()));
        }
        // Errors from earlier submissions and device loss arrive out of band.
        if let Some(fault) = self.faults.take() {
            return Err(RaysError::Draw(fault));
        }
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            // Swapchain went stale (resize, tab switch); reconfigure and skip this frame.
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(RaysError::Draw(format!("{e:?}"))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("rays_encoder"),
            });
        self.rays.encode(&self.queue, &mut encoder, &view, uniforms);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Destroys the device. Further draws fail with `RaysError::Draw`.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.device.destroy();
    }
}
