//! Group, spacer and app-launcher builders

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlAnchorElement, HtmlElement};

use super::append_elements;
use super::helpers::{create, create_with_class};
use crate::html_layout::FlexLayout;
use crate::models::{AppLauncherElement, GroupElement, SpacerElement};
use crate::renderers::context::RenderContext;

const LAUNCHER_LABEL: &str = "Launch activity";

/// Flex container; children are built and appended in order
pub fn build_group(ctx: &Rc<RenderContext>, element: &GroupElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let layout = FlexLayout::from_group(element);

    let group = create_with_class(document, "div", "group-element")?;
    let style = group.style();
    for (name, value) in layout.style_properties() {
        style.set_property(name, value)?;
    }

    append_elements(ctx, &group, &element.elements)?;

    Ok(group)
}

/// Invisible fixed-size box
pub fn build_spacer(ctx: &Rc<RenderContext>, element: &SpacerElement) -> Result<HtmlElement, JsValue> {
    let spacer = create_with_class(ctx.document(), "div", "spacer-element")?;
    spacer.set_attribute("aria-hidden", "true")?;
    let style = spacer.style();
    style.set_property("width", &px(element.width))?;
    style.set_property("height", &px(element.height))?;
    style.set_property("flex-shrink", "0")?;
    Ok(spacer)
}

/// Link opening an external activity in a new, unlinked browsing context
pub fn build_app_launcher(ctx: &Rc<RenderContext>, element: &AppLauncherElement) -> Result<HtmlElement, JsValue> {
    let link: HtmlAnchorElement = create(ctx.document(), "a")?;
    link.set_class_name("app-launcher");
    link.set_href(&element.path);
    link.set_target("_blank");
    link.set_rel("noopener noreferrer");
    let label = element
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(LAUNCHER_LABEL);
    link.set_text_content(Some(label));
    Ok(link.into())
}

fn px(value: f64) -> String {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    format!("{}px", value)
}
