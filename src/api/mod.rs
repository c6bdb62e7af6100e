//! Course viewer WASM API
//!
//! - `helpers`: console logging macros and (de)serialization wrappers
//! - `elements`: stateless `buildElement`, `renderSlide`, `parseVideoUrl`
//! - `viewer`: the `CourseViewer` page controller

pub mod helpers;
pub mod elements;
pub mod viewer;

pub use elements::{build_element, parse_video_url, render_slide};
pub use viewer::CourseViewer;
