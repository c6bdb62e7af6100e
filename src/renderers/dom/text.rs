//! Text and list builders

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlOListElement};

use super::helpers::{append, create, create_text, create_with_class};
use crate::html_layout::{text_class, text_lines, ListModel};
use crate::models::{ListElement, TextElement};
use crate::renderers::context::RenderContext;

/// Paragraph with `<br>` at every embedded newline
pub fn build_text(ctx: &Rc<RenderContext>, element: &TextElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let p = create_with_class(document, "p", &text_class(element))?;

    for (i, line) in text_lines(&element.text).into_iter().enumerate() {
        if i > 0 {
            let br = document.create_element("br")?;
            append(&p, &br)?;
        }
        append(&p, &document.create_text_node(line))?;
    }

    Ok(p)
}

pub fn build_list(ctx: &Rc<RenderContext>, element: &ListElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let model = ListModel::from_element(element);

    let list: HtmlElement = if model.ordered {
        let ol: HtmlOListElement = create(document, "ol")?;
        if let Some(start) = model.start {
            ol.set_start(start.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        }
        ol.into()
    } else {
        create(document, "ul")?
    };
    list.set_class_name("list-element");

    for item in &model.items {
        let entry = create_text(document, "li", "list-item", item)?;
        append(&list, &entry)?;
    }

    Ok(list)
}
