//! Direct-media playback through the browser's own video element

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlSourceElement, HtmlVideoElement};

use crate::renderers::context::RenderContext;
use crate::renderers::dom::helpers::create;

/// Native player with standard transport controls
pub fn build_native_player(
    ctx: &Rc<RenderContext>,
    url: &str,
    mime: &str,
) -> Result<HtmlVideoElement, JsValue> {
    let document = ctx.document();
    let video: HtmlVideoElement = create(document, "video")?;
    video.set_class_name("video-native");
    video.set_controls(true);
    video.set_autoplay(true);
    video.set_attribute("playsinline", "")?;
    video.set_attribute("preload", "metadata")?;

    let source: HtmlSourceElement = create(document, "source")?;
    source.set_src(url);
    source.set_type(mime);
    video.append_child(&source)?;

    let weak = Rc::downgrade(ctx);
    EventListener::once(&video, "loadedmetadata", move |_| {
        if let Some(ctx) = weak.upgrade() {
            ctx.request_height_recalc();
        }
    })
    .forget();

    Ok(video)
}
