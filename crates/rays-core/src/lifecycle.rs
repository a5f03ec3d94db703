//! Mount / visibility / frame-loop lifecycle of one light-rays instance.
//!
//! The instance is a plain state machine. Platform work is delegated through
//! two seams:
//! - [`FrameHost`] schedules animation frames and owns the listeners
//!   (visibility observer, window resize, global pointer move).
//! - [`RenderSurface`] is the graphics surface created lazily on first
//!   visibility. Creation may be asynchronous, so the instance hands out an
//!   [`InitTicket`] and accepts the result later via
//!   [`RaysInstance::finish_init`]; a ticket outlived by a visibility change
//!   or unmount is stale and its surface is released on arrival.
//!
//! Phases: `Unmounted → Hidden ⇄ Initializing → Running → TearingDown → Hidden`.

use crate::clock::AnimationClock;
use crate::config::LightRaysConfig;
use crate::error::Result;
use crate::placement::{Placement, SurfaceSize};
use crate::pointer::PointerState;
use crate::uniforms::RaysUniforms;
use glam::Vec2;

pub type FrameId = u64;

pub trait FrameHost {
    /// Schedule one call to [`RaysInstance::on_frame`] before the next repaint.
    fn request_frame(&mut self) -> Result<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);

    fn observe_visibility(&mut self);
    fn unobserve_visibility(&mut self);
    fn attach_resize_listener(&mut self);
    fn detach_resize_listener(&mut self);
    fn attach_pointer_listener(&mut self);
    fn detach_pointer_listener(&mut self);

    /// Container size in CSS pixels.
    fn container_size(&self) -> (f64, f64);
    /// Raw (uncapped) device pixel ratio.
    fn device_pixel_ratio(&self) -> f64;
}

pub trait RenderSurface {
    fn resize(&mut self, size: &SurfaceSize);
    fn draw(&mut self, uniforms: &RaysUniforms) -> Result<()>;
    /// Free GPU resources and detach from the container. Safe to repeat.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Hidden,
    Initializing,
    Running,
    TearingDown,
}

/// Permission to build a surface for one initialization attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitTicket {
    epoch: u64,
    pub size: SurfaceSize,
}

pub struct RaysInstance<H: FrameHost, S: RenderSurface> {
    host: H,
    surface: Option<S>,
    phase: Phase,
    config: LightRaysConfig,
    placement: Placement,
    pointer: PointerState,
    clock: AnimationClock,
    pending_frame: Option<FrameId>,
    // Bumped whenever an in-flight init must be abandoned.
    epoch: u64,
    // Set by init/draw failures; cleared only by a fresh mount.
    halted: bool,
    pointer_attached: bool,
    resize_attached: bool,
    frames_drawn: u64,
}

impl<H: FrameHost, S: RenderSurface> RaysInstance<H, S> {
    pub fn new(config: LightRaysConfig, host: H) -> Self {
        let placement = Placement::compute(config.origin, SurfaceSize::default());
        Self {
            host,
            surface: None,
            phase: Phase::Unmounted,
            config,
            placement,
            pointer: PointerState::default(),
            clock: AnimationClock::default(),
            pending_frame: None,
            epoch: 0,
            halted: false,
            pointer_attached: false,
            resize_attached: false,
            frames_drawn: 0,
        }
    }

    pub fn mount(&mut self) {
        if self.phase != Phase::Unmounted {
            return;
        }
        self.phase = Phase::Hidden;
        self.halted = false;
        self.pointer = PointerState::default();
        self.host.observe_visibility();
        self.sync_pointer_listener();
        log::info!(
            "[rays] mounted origin={} follow_mouse={}",
            self.config.origin,
            self.config.follow_mouse
        );
    }

    pub fn unmount(&mut self) {
        if self.phase == Phase::Unmounted {
            return;
        }
        self.epoch += 1;
        self.teardown();
        self.phase = Phase::Unmounted;
        self.sync_pointer_listener();
        self.host.unobserve_visibility();
        log::info!("[rays] unmounted");
    }

    /// Visibility report from the host. Returns a ticket when the caller
    /// should start building a surface.
    pub fn set_visible(&mut self, visible: bool) -> Option<InitTicket> {
        match (self.phase, visible) {
            (Phase::Hidden, true) if !self.halted => {
                self.epoch += 1;
                self.phase = Phase::Initializing;
                self.placement = self.measure();
                log::debug!(
                    "[rays] visible; initializing {}x{}",
                    self.placement.size.width,
                    self.placement.size.height
                );
                Some(InitTicket {
                    epoch: self.epoch,
                    size: self.placement.size,
                })
            }
            (Phase::Initializing, false) => {
                self.epoch += 1;
                self.phase = Phase::Hidden;
                log::debug!("[rays] hidden during init; abandoning it");
                None
            }
            (Phase::Running, false) => {
                self.teardown();
                log::debug!("[rays] hidden; render loop stopped");
                None
            }
            _ => None,
        }
    }

    pub fn finish_init(&mut self, ticket: InitTicket, result: Result<S>) {
        let current = self.phase == Phase::Initializing && ticket.epoch == self.epoch;
        match result {
            Ok(mut surface) if !current => {
                log::debug!("[rays] discarding surface from a stale init");
                surface.release();
            }
            Ok(mut surface) => {
                self.placement = self.measure();
                surface.resize(&self.placement.size);
                self.surface = Some(surface);
                self.host.attach_resize_listener();
                self.resize_attached = true;
                self.phase = Phase::Running;
                log::info!(
                    "[rays] running at {}x{} (dpr {:.2})",
                    self.placement.size.width,
                    self.placement.size.height,
                    self.placement.size.dpr
                );
                self.schedule_next_frame();
            }
            Err(e) if !current => {
                log::debug!("[rays] stale init failed: {e}");
            }
            Err(e) => {
                log::error!("[rays] init error: {e}");
                self.phase = Phase::Hidden;
                self.halted = true;
            }
        }
    }

    /// Animation-frame callback. Draws one frame and re-enqueues itself while
    /// the instance is still running.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if self.phase != Phase::Running || self.pending_frame.take().is_none() {
            return;
        }
        let time = self.clock.advance_to(timestamp_ms);
        if self.config.follow_mouse && self.config.mouse_influence > 0.0 {
            self.pointer.step();
        }
        let uniforms =
            RaysUniforms::new(&self.config, &self.placement, self.pointer.smoothed, time);
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match surface.draw(&uniforms) {
            Ok(()) => {
                self.frames_drawn += 1;
                self.schedule_next_frame();
            }
            Err(e) => {
                log::warn!("[rays] {e}; stopping render loop");
                self.halt();
            }
        }
    }

    pub fn on_resize(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.placement = self.measure();
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&self.placement.size);
        }
    }

    pub fn on_pointer_move(&mut self, uv: Vec2) {
        if self.pointer_attached {
            self.pointer.set_raw(uv);
        }
    }

    /// Replace the configuration. Takes effect on the next frame; a changed
    /// origin re-derives anchor/direction for the current size.
    pub fn set_config(&mut self, config: LightRaysConfig) {
        self.config = config;
        self.placement = Placement::compute(self.config.origin, self.placement.size);
        self.sync_pointer_listener();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &LightRaysConfig {
        &self.config
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn measure(&self) -> Placement {
        let (w, h) = self.host.container_size();
        let size = SurfaceSize::from_css(w, h, self.host.device_pixel_ratio());
        Placement::compute(self.config.origin, size)
    }

    fn schedule_next_frame(&mut self) {
        match self.host.request_frame() {
            Ok(id) => self.pending_frame = Some(id),
            Err(e) => {
                log::error!("[rays] {e}");
                self.halt();
            }
        }
    }

    fn halt(&mut self) {
        self.teardown();
        self.halted = true;
    }

    // Cancels the frame, drops the resize listener and releases the surface.
    // Leaves the instance Hidden; repeated calls are no-ops.
    fn teardown(&mut self) {
        let was_running = self.phase == Phase::Running;
        self.phase = Phase::TearingDown;
        if let Some(id) = self.pending_frame.take() {
            self.host.cancel_frame(id);
        }
        if self.resize_attached {
            self.host.detach_resize_listener();
            self.resize_attached = false;
        }
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        self.phase = Phase::Hidden;
        if was_running {
            log::info!("[rays] torn down after {} frames", self.frames_drawn);
        }
    }

    fn sync_pointer_listener(&mut self) {
        let want = self.phase != Phase::Unmounted && self.config.follow_mouse;
        if want && !self.pointer_attached {
            self.host.attach_pointer_listener();
            self.pointer_attached = true;
        } else if !want && self.pointer_attached {
            self.host.detach_pointer_listener();
            self.pointer_attached = false;
        }
    }
}

impl<H: FrameHost, S: RenderSurface> Drop for RaysInstance<H, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
