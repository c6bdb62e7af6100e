//! Models module for the course viewer
//!
//! This module contains the data models consumed by the renderer:
//! the course/slide hierarchy and the element tree of each slide.

pub mod course;
pub mod elements;

// Re-export commonly used types
pub use course::*;
pub use elements::*;
