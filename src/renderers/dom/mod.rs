//! DOM element builders
//!
//! `build_element` is the dispatcher: one exhaustive match over the
//! element variants. Malformed elements and builders that throw are logged
//! and yield `None`; callers keep going with the next sibling.

pub mod grid;
pub mod group;
pub mod helpers;
pub mod image;
pub mod info_box;
pub mod text;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::models::Element;
use crate::renderers::context::RenderContext;
use crate::video;

/// Build the rendered node for one element, or nothing
pub fn build_element(ctx: &Rc<RenderContext>, element: &Element) -> Option<HtmlElement> {
    let built: Result<HtmlElement, JsValue> = match element {
        Element::Text(e) => text::build_text(ctx, e),
        Element::List(e) => text::build_list(ctx, e),
        Element::Image(e) => image::build_image(ctx, e),
        Element::Video(e) => video::build_video(ctx, e),
        Element::Grid(e) => grid::build_grid(ctx, e),
        Element::Group(e) => group::build_group(ctx, e),
        Element::InfoBox(e) => info_box::build_info_box(ctx, e),
        Element::Spacer(e) => group::build_spacer(ctx, e),
        Element::AppLauncher(e) => group::build_app_launcher(ctx, e),
        Element::Malformed(m) => {
            log::warn!(
                "Skipping element (type {}): {}",
                m.tag.as_deref().unwrap_or("<missing>"),
                m.reason
            );
            return None;
        }
    };

    match built {
        Ok(node) => Some(node),
        Err(e) => {
            log::warn!("Failed to build {}: {:?}", element.type_name(), e);
            None
        }
    }
}

/// Build `elements` in order and append each result to `parent`
///
/// The height signal is refreshed after every insertion: right away for
/// content whose size is final, on the next paint for the rest. Returns how
/// many nodes were appended.
pub fn append_elements(
    ctx: &Rc<RenderContext>,
    parent: &web_sys::Node,
    elements: &[Element],
) -> Result<usize, JsValue> {
    let mut appended = 0;
    for element in elements {
        if let Some(node) = build_element(ctx, element) {
            parent.append_child(&node)?;
            appended += 1;
            if settles_synchronously(element) {
                ctx.recalc_height();
            } else {
                ctx.request_height_recalc();
            }
        }
    }
    Ok(appended)
}

/// Whether an element's size is final as soon as it is inserted
fn settles_synchronously(element: &Element) -> bool {
    match element {
        Element::Text(_)
        | Element::List(_)
        | Element::Grid(_)
        | Element::Spacer(_)
        | Element::AppLauncher(_)
        | Element::Malformed(_) => true,
        Element::Image(_) | Element::Video(_) | Element::Group(_) | Element::InfoBox(_) => false,
    }
}
