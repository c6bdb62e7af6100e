//! Course menu
//!
//! Nested list mirroring the course tree. Slide entries carry
//! `data-slide-id`; the viewer marks the current one with `active`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::models::CourseItem;
use crate::renderers::dom::helpers::{append, create_text};

pub const SLIDE_ID_ATTR: &str = "data-slide-id";
pub const ACTIVE_CLASS: &str = "active";

/// Build the menu list for `items`
pub fn build_menu(document: &Document, items: &[CourseItem]) -> Result<Element, JsValue> {
    let list = document.create_element("ul")?;
    list.set_class_name("menu-list");
    for item in items {
        let entry = match item {
            CourseItem::SlideGroup(group) => {
                let li = document.create_element("li")?;
                li.set_class_name("menu-group");
                let title = create_text(document, "span", "menu-group-title", &group.title)?;
                append(&li, &title)?;
                let submenu = build_menu(document, &group.items)?;
                append(&li, &submenu)?;
                li
            }
            CourseItem::Slide(slide) => {
                let li: HtmlElement = create_text(document, "li", "menu-slide", &slide.title)?;
                li.set_attribute(SLIDE_ID_ATTR, &slide.id)?;
                li.into()
            }
        };
        append(&list, &entry)?;
    }
    Ok(list)
}

/// Move the `active` marker to the entry for `current_id`
pub fn mark_active(menu: &Element, current_id: &str) -> Result<(), JsValue> {
    let entries = menu.query_selector_all(&format!("[{}]", SLIDE_ID_ATTR))?;
    for i in 0..entries.length() {
        let Some(entry) = entries.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let is_current = entry.get_attribute(SLIDE_ID_ATTR).as_deref() == Some(current_id);
        entry.class_list().toggle_with_force(ACTIVE_CLASS, is_current)?;
    }
    Ok(())
}

/// Slide id of the menu entry at or above an event target
pub fn slide_id_at(target: &Element) -> Option<String> {
    target
        .closest(&format!("[{}]", SLIDE_ID_ATTR))
        .ok()
        .flatten()
        .and_then(|entry| entry.get_attribute(SLIDE_ID_ATTR))
}
