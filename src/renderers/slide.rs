//! Slide renderer
//!
//! Replaces the content container's children with one slide's elements and
//! updates the page chrome (title, subtitle, narration audio).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlAudioElement, HtmlElement};

use super::context::RenderContext;
use super::dom::append_elements;
use super::dom::helpers::clear_children;
use crate::error::{dom_err, ViewerError};
use crate::models::Slide;

/// Render `slide` into the shared content container
///
/// Resources owned by the previous slide are released before its nodes are
/// removed. Returns the number of elements that produced a node.
pub fn render_slide(ctx: &Rc<RenderContext>, slide: &Slide) -> Result<usize, ViewerError> {
    let content = ctx
        .content()
        .ok_or_else(|| ViewerError::MissingElement(ctx.config.content_id.clone()))?;

    ctx.dispose_scope();
    clear_children(content);

    set_heading(ctx, &ctx.config.title_id, Some(slide.title.as_str()));
    set_heading(ctx, &ctx.config.subtitle_id, slide.subtitle.as_deref());
    set_audio(ctx, slide.audio.as_deref());

    let appended = append_elements(ctx, content, &slide.elements).map_err(dom_err)?;
    if appended < slide.elements.len() {
        log::warn!(
            "Slide '{}': {} of {} elements skipped",
            slide.id,
            slide.elements.len() - appended,
            slide.elements.len()
        );
    }

    content.set_scroll_top(0);
    ctx.recalc_height();
    log::info!("Rendered slide '{}' ({} elements)", slide.id, appended);
    Ok(appended)
}

/// Fill a heading, hiding it when there is nothing to show
fn set_heading(ctx: &RenderContext, id: &str, text: Option<&str>) {
    let Some(el) = lookup::<HtmlElement>(ctx, id) else {
        return;
    };
    let text = text.filter(|t| !t.trim().is_empty());
    el.set_text_content(text);
    el.set_hidden(text.is_none());
}

/// Point the narration player at the slide's audio, or hide it
fn set_audio(ctx: &RenderContext, audio: Option<&str>) {
    let Some(player) = lookup::<HtmlAudioElement>(ctx, &ctx.config.audio_id) else {
        return;
    };
    let _ = player.pause();
    match audio.filter(|a| !a.trim().is_empty()) {
        Some(file) => {
            player.set_src(&ctx.config.assets().audio(file));
            player.set_hidden(false);
        }
        None => {
            let _ = player.remove_attribute("src");
            player.load();
            player.set_hidden(true);
        }
    }
}

fn lookup<T: JsCast>(ctx: &RenderContext, id: &str) -> Option<T> {
    if id.is_empty() {
        return None;
    }
    let found = ctx.document().get_element_by_id(id)?;
    match found.dyn_into::<T>() {
        Ok(el) => Some(el),
        Err(_) => {
            log::warn!("Element #{} has an unexpected type", id);
            None
        }
    }
}
