//! Error types for the course viewer
//!
//! Hard failures only: course data that cannot be loaded, a page missing
//! the elements the viewer is configured with, DOM calls that throw.
//! Malformed elements and unplayable videos degrade with a log line
//! instead and never reach this type.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// Course or element JSON could not be parsed
    #[error("Course data parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Viewer configuration object is invalid
    #[error("Invalid viewer configuration: {0}")]
    Config(String),

    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// A configured page element is not in the document
    #[error("Missing page element: #{0}")]
    MissingElement(String),

    /// Network or HTTP failure while loading course data
    #[error("Course data could not be fetched: {0}")]
    Fetch(String),

    /// Navigation target does not exist
    #[error("Unknown slide: {0}")]
    UnknownSlide(String),
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort readable text for a thrown JS value
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = wasm_bindgen::JsCast::dyn_ref::<js_sys::Error>(value) {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// Wrap a thrown JS value; used as `.map_err(dom_err)` on web-sys results
pub fn dom_err(value: JsValue) -> ViewerError {
    ViewerError::Dom(describe_js(&value))
}
