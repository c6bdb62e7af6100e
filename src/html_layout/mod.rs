//! HTML Layout models
//!
//! Pure layout decisions for the element builders: which classes,
//! attributes and children each element gets, plus the info-box anchor
//! geometry. Nothing here touches the DOM, so all of it is testable
//! without a browser.

pub mod anchor;
pub mod flex;
pub mod grid;
pub mod image;
pub mod text;

pub use anchor::{clamp_position, resolve_position, scroll_frame, Point, Rect, Size};
pub use flex::{Axis, FlexAlign, FlexLayout};
pub use grid::{GridCell, GridRow, GridTable};
pub use image::ImageView;
pub use text::{text_class, text_lines, ListModel};
