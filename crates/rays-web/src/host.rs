//! Browser side of the frame loop: requestAnimationFrame, window listeners and
//! the IntersectionObserver. Every callback holds a `Weak` handle to the
//! instance so a destroyed widget is never kept alive by the DOM.

use crate::dom;
use crate::input;
use crate::render::WebSurface;
use rays_core::constants::VISIBILITY_THRESHOLD;
use rays_core::{FrameHost, FrameId, RaysError, RaysInstance, RenderSurface, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type WebInstance = RaysInstance<WebHost, WebSurface>;
pub type SharedInstance = Rc<RefCell<WebInstance>>;

pub struct WebHost {
    container: web::HtmlElement,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut()>,
    on_pointer: Closure<dyn FnMut(web::MouseEvent)>,
    _on_visibility: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
    observer: Option<web::IntersectionObserver>,
}

impl WebHost {
    pub fn new(container: web::HtmlElement, weak: Weak<RefCell<WebInstance>>) -> Self {
        let on_frame = {
            let weak = weak.clone();
            Closure::wrap(Box::new(move |ts: f64| {
                with_instance(&weak, |inst| inst.on_frame(ts));
            }) as Box<dyn FnMut(f64)>)
        };

        let on_resize = {
            let weak = weak.clone();
            Closure::wrap(Box::new(move || {
                with_instance(&weak, |inst| inst.on_resize());
            }) as Box<dyn FnMut()>)
        };

        let on_pointer = {
            let weak = weak.clone();
            let container = container.clone();
            Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                let uv = input::pointer_uv(&ev, &container);
                with_instance(&weak, |inst| inst.on_pointer_move(uv));
            }) as Box<dyn FnMut(web::MouseEvent)>)
        };

        let on_visibility = {
            let container = container.clone();
            Closure::wrap(Box::new(move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                // Only the most recent entry matters.
                let Some(entry) = entries
                    .iter()
                    .last()
                    .and_then(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                else {
                    return;
                };
                handle_visibility(&weak, &container, entry.is_intersecting());
            })
                as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>)
        };

        let options = web::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer = web::IntersectionObserver::new_with_options(
            on_visibility.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| log::error!("[rays] IntersectionObserver unavailable: {:?}", e))
        .ok();

        Self {
            container,
            on_frame,
            on_resize,
            on_pointer,
            _on_visibility: on_visibility,
            observer,
        }
    }
}

fn with_instance(weak: &Weak<RefCell<WebInstance>>, f: impl FnOnce(&mut WebInstance)) {
    let Some(cell) = weak.upgrade() else {
        return;
    };
    // Callbacks never nest; a failed borrow means the instance is mid-teardown.
    if let Ok(mut inst) = cell.try_borrow_mut() {
        f(&mut inst);
    }
}

fn handle_visibility(
    weak: &Weak<RefCell<WebInstance>>,
    container: &web::HtmlElement,
    visible: bool,
) {
    let mut ticket = None;
    with_instance(weak, |inst| ticket = inst.set_visible(visible));
    let Some(ticket) = ticket else {
        return;
    };
    let weak = weak.clone();
    let container = container.clone();
    spawn_local(async move {
        let result = WebSurface::create(&container, ticket.size).await;
        match weak.upgrade() {
            Some(inst) => {
                inst.borrow_mut().finish_init(ticket, result);
            }
            None => {
                if let Ok(mut surface) = result {
                    surface.release();
                }
            }
        }
    });
}

fn window() -> Result<web::Window> {
    web::window().ok_or_else(|| RaysError::Schedule("no window".into()))
}

fn toggle_window_listener(event: &str, callback: &js_sys::Function, attach: bool) {
    let w = match window() {
        Ok(w) => w,
        Err(e) => {
            log::warn!("[rays] {event} listener not updated: {e}");
            return;
        }
    };
    let result = if attach {
        w.add_event_listener_with_callback(event, callback)
    } else {
        w.remove_event_listener_with_callback(event, callback)
    };
    if let Err(e) = result {
        let action = if attach { "attach" } else { "detach" };
        log::warn!("[rays] failed to {action} {event} listener: {e:?}");
    }
}

impl FrameHost for WebHost {
    fn request_frame(&mut self) -> Result<FrameId> {
        window()?
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map(|id| id as FrameId)
            .map_err(|e| RaysError::Schedule(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Ok(w) = window() {
            let _ = w.cancel_animation_frame(id as i32);
        }
    }

    fn observe_visibility(&mut self) {
        if let Some(observer) = &self.observer {
            observer.observe(&self.container);
        }
    }

    fn unobserve_visibility(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }

    fn attach_resize_listener(&mut self) {
        toggle_window_listener("resize", self.on_resize.as_ref().unchecked_ref(), true);
    }

    fn detach_resize_listener(&mut self) {
        toggle_window_listener("resize", self.on_resize.as_ref().unchecked_ref(), false);
    }

    fn attach_pointer_listener(&mut self) {
        toggle_window_listener("mousemove", self.on_pointer.as_ref().unchecked_ref(), true);
    }

    fn detach_pointer_listener(&mut self) {
        toggle_window_listener("mousemove", self.on_pointer.as_ref().unchecked_ref(), false);
    }

    fn container_size(&self) -> (f64, f64) {
        dom::container_css_size(&self.container)
    }

    fn device_pixel_ratio(&self) -> f64 {
        dom::device_pixel_ratio()
    }
}
