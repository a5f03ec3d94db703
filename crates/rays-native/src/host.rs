use rays_core::gpu::GpuContext;
use rays_core::pointer::normalize_in_rect;
use rays_core::{FrameHost, FrameId, RaysError, RaysUniforms, RenderSurface, Result, SurfaceSize};
use std::sync::Arc;
use winit::window::Window;

/// Drives the instance from winit: a frame request is a `request_redraw`,
/// listeners are flags the event loop consults before forwarding events.
pub struct NativeHost {
    window: Arc<Window>,
    next_id: FrameId,
    scheduled: Option<FrameId>,
    pub observing: bool,
    pub resize_attached: bool,
    pub pointer_attached: bool,
}

impl NativeHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            scheduled: None,
            observing: false,
            resize_attached: false,
            pointer_attached: false,
        }
    }

    /// Consume the outstanding frame request, if any.
    pub fn take_scheduled(&mut self) -> Option<FrameId> {
        self.scheduled.take()
    }

    /// Cursor position (physical pixels) relative to the client area.
    pub fn pointer_uv(&self, x: f64, y: f64) -> glam::Vec2 {
        let size = self.window.inner_size();
        normalize_in_rect(x as f32, y as f32, 0.0, 0.0, size.width as f32, size.height as f32)
    }
}

impl FrameHost for NativeHost {
    fn request_frame(&mut self) -> Result<FrameId> {
        self.next_id += 1;
        self.scheduled = Some(self.next_id);
        self.window.request_redraw();
        Ok(self.next_id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.scheduled == Some(id) {
            self.scheduled = None;
        }
    }

    fn observe_visibility(&mut self) {
        self.observing = true;
    }

    fn unobserve_visibility(&mut self) {
        self.observing = false;
    }

    fn attach_resize_listener(&mut self) {
        self.resize_attached = true;
    }

    fn detach_resize_listener(&mut self) {
        self.resize_attached = false;
    }

    fn attach_pointer_listener(&mut self) {
        self.pointer_attached = true;
    }

    fn detach_pointer_listener(&mut self) {
        self.pointer_attached = false;
    }

    fn container_size(&self) -> (f64, f64) {
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        (size.width as f64 / scale, size.height as f64 / scale)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }
}

pub struct NativeSurface {
    gpu: GpuContext,
}

impl NativeSurface {
    pub async fn create(
        instance: &wgpu::Instance,
        window: Arc<Window>,
        size: SurfaceSize,
    ) -> Result<Self> {
        let surface = instance
            .create_surface(window)
            .map_err(|e| RaysError::Init(e.to_string()))?;
        let gpu = GpuContext::new(instance, surface, &size)
            .await
            .map_err(|e| RaysError::Init(format!("{e:#}")))?;
        Ok(Self { gpu })
    }
}

impl RenderSurface for NativeSurface {
    fn resize(&mut self, size: &SurfaceSize) {
        self.gpu.resize(size);
    }

    fn draw(&mut self, uniforms: &RaysUniforms) -> Result<()> {
        self.gpu.draw(uniforms)
    }

    fn release(&mut self) {
        self.gpu.destroy();
    }
}
