//! Embedded provider control API loader
//!
//! The provider's iframe API script is injected at most once per page.
//! The first request creates a promise that resolves when the provider
//! signals readiness; every later request (including ones racing the first)
//! receives a clone of that same promise.

use once_cell::unsync::OnceCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Global callback the provider script invokes once its API is usable
const READY_CALLBACK: &str = "onYouTubeIframeAPIReady";

/// Single-instantiation handle to the provider API
pub struct ProviderApi {
    script_url: String,
    loading: OnceCell<Promise>,
}

thread_local! {
    static SHARED: OnceCell<Rc<ProviderApi>> = OnceCell::new();
}

impl ProviderApi {
    /// The page-wide instance, created on first access
    ///
    /// `script_url` only matters for the call that creates the instance.
    pub fn shared(script_url: &str) -> Rc<ProviderApi> {
        SHARED.with(|cell| {
            cell.get_or_init(|| {
                Rc::new(ProviderApi {
                    script_url: script_url.to_string(),
                    loading: OnceCell::new(),
                })
            })
            .clone()
        })
    }

    /// Promise resolving once the API is ready; injects the script on first use
    pub fn ready(&self) -> Promise {
        self.loading
            .get_or_init(|| {
                log::info!("Loading embedded player API from {}", self.script_url);
                load_script(&self.script_url)
            })
            .clone()
    }

    pub fn is_requested(&self) -> bool {
        self.loading.get().is_some()
    }
}

fn load_script(script_url: &str) -> Promise {
    let script_url = script_url.to_string();
    Promise::new(&mut move |resolve: Function, reject: Function| {
        if api_available() {
            let _ = resolve.call0(&JsValue::NULL);
            return;
        }
        if let Err(e) = inject(&script_url, resolve, reject.clone()) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    })
}

/// Whether a previous page script already loaded the provider API
fn api_available() -> bool {
    let global = js_sys::global();
    Reflect::get(&global, &JsValue::from_str("YT"))
        .ok()
        .filter(|yt| yt.is_object())
        .and_then(|yt| Reflect::get(&yt, &JsValue::from_str("loaded")).ok())
        .and_then(|loaded| loaded.as_f64())
        == Some(1.0)
}

fn inject(script_url: &str, resolve: Function, reject: Function) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Chain any handler the host page installed before us
    let previous = Reflect::get(&window, &JsValue::from_str(READY_CALLBACK))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok());
    let on_ready = Closure::once_into_js(move || {
        if let Some(previous) = previous {
            let _ = previous.call0(&JsValue::NULL);
        }
        log::info!("Embedded player API ready");
        let _ = resolve.call0(&JsValue::NULL);
    });
    Reflect::set(&window, &JsValue::from_str(READY_CALLBACK), &on_ready)?;

    let script = document.create_element("script")?;
    script.set_attribute("src", script_url)?;
    script.set_attribute("async", "")?;
    let url = script_url.to_string();
    EventListener::once(&script, "error", move |_| {
        log::error!("Embedded player API failed to load from {}", url);
        let _ = reject.call1(
            &JsValue::NULL,
            &js_sys::Error::new(&format!("failed to load {}", url)),
        );
    })
    .forget();

    let parent = document
        .head()
        .map(|head| head.unchecked_into::<web_sys::Node>())
        .or_else(|| document.body().map(|body| body.unchecked_into()))
        .ok_or_else(|| JsValue::from_str("no head or body to attach script"))?;
    parent.append_child(&script)?;
    Ok(())
}
