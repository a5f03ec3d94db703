use crate::dom;
use rays_core::gpu::GpuContext;
use rays_core::{RaysError, RaysUniforms, RenderSurface, Result, SurfaceSize};
use web_sys as web;

/// Canvas inserted into the container plus the WebGPU context drawing into it.
pub struct WebSurface {
    canvas: web::HtmlCanvasElement,
    gpu: GpuContext,
    released: bool,
}

impl WebSurface {
    pub async fn create(container: &web::HtmlElement, size: SurfaceSize) -> Result<Self> {
        let canvas =
            dom::mount_canvas(container, &size).map_err(|e| RaysError::Init(e.to_string()))?;
        match Self::connect(&canvas, &size).await {
            Ok(gpu) => Ok(Self {
                canvas,
                gpu,
                released: false,
            }),
            Err(e) => {
                dom::remove_from_parent(&canvas);
                Err(RaysError::Init(format!("{e:#}")))
            }
        }
    }

    async fn connect(
        canvas: &web::HtmlCanvasElement,
        size: &SurfaceSize,
    ) -> anyhow::Result<GpuContext> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        GpuContext::new(&instance, surface, size).await
    }
}

impl RenderSurface for WebSurface {
    fn resize(&mut self, size: &SurfaceSize) {
        dom::sync_canvas_backing_size(&self.canvas, size);
        self.gpu.resize(size);
    }

    fn draw(&mut self, uniforms: &RaysUniforms) -> Result<()> {
        self.gpu.draw(uniforms)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.gpu.destroy();
        dom::remove_from_parent(&self.canvas);
    }
}
