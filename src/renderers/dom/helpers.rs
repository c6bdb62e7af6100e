//! Small DOM construction helpers shared by the element builders

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

/// Create an element and cast it to its concrete type
pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document.create_element(tag)?.dyn_into::<T>().map_err(|el| {
        JsValue::from_str(&format!(
            "<{}> is not the expected element type ({:?})",
            tag,
            el.node_name()
        ))
    })
}

/// Create an `HtmlElement` carrying `class`
pub fn create_with_class(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = create(document, tag)?;
    el.set_class_name(class);
    Ok(el)
}

/// Create an element with a class and text content
pub fn create_text(document: &Document, tag: &str, class: &str, text: &str) -> Result<HtmlElement, JsValue> {
    let el = create_with_class(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

pub fn append(parent: &Node, child: &Node) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Whether `el` carries `class`
pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Remove every child of `node`
pub fn clear_children(node: &Node) {
    while let Some(child) = node.first_child() {
        if node.remove_child(&child).is_err() {
            break;
        }
    }
}

/// Current window and document
pub fn window_document() -> Result<(web_sys::Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    Ok((window, document))
}

/// Open `url` in a new browsing context without a reference back to this page
pub fn open_detached(url: &str) -> Result<(), JsValue> {
    let (window, _) = window_document()?;
    window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")?;
    Ok(())
}
