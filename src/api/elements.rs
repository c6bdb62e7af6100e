//! Stateless rendering entry points
//!
//! Used by the modal to render info-box contents and by hosts that drive
//! navigation themselves.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::api::helpers::{deserialize, serialize};
use crate::config::ViewerConfig;
use crate::models::{Element, Slide};
use crate::renderers::{build_element as build_node, render_slide as render_into_page, RenderContext};
use crate::video::transport::Transport;
use crate::{wasm_info, wasm_warn};

/// Build the node for one element; `undefined` when it cannot be rendered
#[wasm_bindgen(js_name = buildElement)]
pub fn build_element(element_js: JsValue) -> Result<Option<HtmlElement>, JsValue> {
    let element: Element = deserialize(element_js, "Element deserialization error")?;
    let ctx = RenderContext::current()?;
    let node = build_node(&ctx, &element);
    if node.is_none() {
        wasm_warn!("buildElement: {} produced no node", element.type_name());
    }
    Ok(node)
}

/// Render a slide into the page's content container
#[wasm_bindgen(js_name = renderSlide)]
pub fn render_slide(slide_js: JsValue) -> Result<(), JsValue> {
    let slide: Slide = deserialize(slide_js, "Slide deserialization error")?;

    let mut ctx = RenderContext::current()?;
    if ctx.content().is_none() {
        ctx = RenderContext::attach(ViewerConfig::default())?;
        RenderContext::activate(&ctx);
    }

    let rendered = render_into_page(&ctx, &slide)?;
    wasm_info!("renderSlide '{}': {} elements", slide.id, rendered);
    Ok(())
}

/// Classify a video URL: `{ kind: "directMedia" | "embedded" | "external", ... }`
#[wasm_bindgen(js_name = parseVideoUrl)]
pub fn parse_video_url(url: &str) -> Result<JsValue, JsValue> {
    serialize(&Transport::classify(url), "Transport serialization error")
}
