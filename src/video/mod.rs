//! Video subsystem
//!
//! A video element renders as a placeholder (preview image plus play
//! affordance). The first activation classifies the URL and swaps the
//! placeholder for the matching player; there is no way back to the
//! placeholder until the slide changes.
//!
//! - `transport`: URL classification (direct media / embedded / external)
//! - `controls`: pure transport-control state for the custom control bar
//! - `provider_api`: one-time loader for the provider's control API
//! - `native`: direct-media player
//! - `embedded`: provider player with custom controls

pub mod controls;
pub mod embedded;
pub mod native;
pub mod provider_api;
pub mod transport;

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::models::VideoElement;
use crate::renderers::context::RenderContext;
use crate::renderers::dom::helpers::{append, create, create_text, create_with_class, open_detached};
use controls::PLAY_GLYPH;
pub use transport::Transport;

/// Lifecycle of one video element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoPhase {
    /// Preview only, no player instantiated
    Placeholder,
    /// A player replaced the placeholder
    Active(Transport),
    /// Activation opened the URL elsewhere; the placeholder stays
    OpenedExternally,
}

/// One-shot activation guard
#[derive(Default)]
pub struct Activation {
    fired: Cell<bool>,
}

impl Activation {
    /// True exactly once
    pub fn claim(&self) -> bool {
        !self.fired.replace(true)
    }
}

/// Build the placeholder for a video element
pub fn build_video(ctx: &Rc<RenderContext>, video: &VideoElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let wrapper = create_with_class(document, "div", "video-element")?;
    let placeholder = create_with_class(document, "div", "video-placeholder")?;
    placeholder.set_attribute("role", "button")?;
    placeholder.set_attribute("tabindex", "0")?;
    placeholder.set_attribute(
        "aria-label",
        video.title.as_deref().unwrap_or("Play video"),
    )?;

    if let Some(preview) = video.preview_image.as_deref().filter(|p| !p.is_empty()) {
        let img: HtmlImageElement = create(document, "img")?;
        img.set_class_name("video-preview");
        img.set_src(&ctx.image_src(preview));
        img.set_alt(video.title.as_deref().unwrap_or(""));
        let weak = Rc::downgrade(ctx);
        EventListener::once(&img, "load", move |_| {
            if let Some(ctx) = weak.upgrade() {
                ctx.request_height_recalc();
            }
        })
        .forget();
        append(&placeholder, &img)?;
    }

    let overlay = create_text(document, "span", "video-play-overlay", PLAY_GLYPH)?;
    append(&placeholder, &overlay)?;
    append(&wrapper, &placeholder)?;

    // Pointer and keyboard share one guard
    let start: Rc<dyn Fn()> = {
        let activation = Activation::default();
        let weak = Rc::downgrade(ctx);
        let url = video.url.clone();
        let target = placeholder.clone();
        Rc::new(move || {
            if !activation.claim() {
                return;
            }
            let Some(ctx) = weak.upgrade() else {
                return;
            };
            match activate(&ctx, &target, &url) {
                Ok(phase) => log::debug!("Video {} activated: {:?}", url, phase),
                Err(e) => log::error!("Video activation failed for {}: {:?}", url, e),
            }
        })
    };

    let click = {
        let start = start.clone();
        EventListener::new(&placeholder, "click", move |_| start())
    };
    let keydown = EventListener::new(&placeholder, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if is_activation_key(&key) {
            event.prevent_default();
            start();
        }
    });
    let listeners = [click, keydown];
    ctx.own(&placeholder, move || drop(listeners))?;

    Ok(wrapper)
}

/// Keys that press a `role="button"` element
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Swap `placeholder` for the player matching `url`'s transport
pub fn activate(ctx: &Rc<RenderContext>, placeholder: &HtmlElement, url: &str) -> Result<VideoPhase, JsValue> {
    let transport = Transport::classify(url);
    match &transport {
        Transport::DirectMedia { mime } => {
            let player = native::build_native_player(ctx, url, mime)?;
            placeholder.replace_with_with_node_1(&player)?;
        }
        Transport::Embedded { video_id } => {
            let player = embedded::build_embedded_player(ctx, video_id)?;
            placeholder.replace_with_with_node_1(&player)?;
        }
        Transport::External => {
            open_detached(url)?;
            return Ok(VideoPhase::OpenedExternally);
        }
    }
    ctx.request_height_recalc();
    Ok(VideoPhase::Active(transport))
}
