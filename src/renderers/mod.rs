//! Renderers for course content
//!
//! `dom` holds the per-element builders and the dispatcher, `slide` the
//! slide-level renderer, `context` the state they share.

pub mod context;
pub mod dom;
pub mod slide;

pub use context::RenderContext;
pub use dom::{append_elements, build_element};
pub use slide::render_slide;
