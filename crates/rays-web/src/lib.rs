#![cfg(target_arch = "wasm32")]
mod dom;
mod host;
mod input;
mod render;

use anyhow::anyhow;
use host::{SharedInstance, WebHost};
use rays_core::{ConfigPatch, LightRaysConfig, RaysInstance};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

// Element the page can provide to get the hero background without any JS.
const AUTO_MOUNT_ID: &str = "light-rays";
const CONFIG_ATTRIBUTE: &str = "data-config";

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<LightRays>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rays-web starting");

    if let Err(e) = auto_mount() {
        log::error!("[rays] auto-mount failed: {:#}", e);
    }
    Ok(())
}

fn auto_mount() -> anyhow::Result<()> {
    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    let Some(el) = document.get_element_by_id(AUTO_MOUNT_ID) else {
        return Ok(());
    };
    let container: web::HtmlElement = el.dyn_into().map_err(|e| anyhow!("{:?}", e))?;
    let mut config = LightRaysConfig::hero();
    if let Some(json) = container.get_attribute(CONFIG_ATTRIBUTE) {
        config.apply(&ConfigPatch::from_json(&json)?);
    }
    let rays = LightRays::mount(container, config);
    AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(rays));
    Ok(())
}

/// JS handle to one mounted light-rays background.
#[wasm_bindgen]
pub struct LightRays {
    inner: Option<SharedInstance>,
}

#[wasm_bindgen]
impl LightRays {
    /// Mount into `container`. `config` is a plain object of widget props;
    /// omitted keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, config: JsValue) -> Result<LightRays, JsValue> {
        let config = LightRaysConfig::default().with(&patch_from_js(&config)?);
        Ok(Self::mount(container, config))
    }

    /// Replace the props. Omitted keys revert to their defaults.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config = LightRaysConfig::default().with(&patch_from_js(&config)?);
        if let Some(inner) = &self.inner {
            inner
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("light rays busy"))?
                .set_config(config);
        }
        Ok(())
    }

    pub fn destroy(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        if let Ok(mut inst) = inner.try_borrow_mut() {
            inst.unmount();
        }
    }
}

impl LightRays {
    fn mount(container: web::HtmlElement, config: LightRaysConfig) -> Self {
        let inner: SharedInstance = Rc::new_cyclic(|weak| {
            RefCell::new(RaysInstance::new(config, WebHost::new(container, weak.clone())))
        });
        inner.borrow_mut().mount();
        Self { inner: Some(inner) }
    }
}

impl Drop for LightRays {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn patch_from_js(value: &JsValue) -> Result<ConfigPatch, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ConfigPatch::default());
    }
    let json = String::from(js_sys::JSON::stringify(value)?);
    ConfigPatch::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}
