//! Info-box anchor geometry
//!
//! Resolves where an info-box trigger sits inside its container. All
//! rectangles are in the same coordinate space (viewport coordinates as
//! returned by `getBoundingClientRect`); the result is relative to the
//! container's top-left corner and always lies inside the container.

use crate::models::AnchorMode;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Container frame in content coordinates
///
/// `visible_origin` is the top-left of the container's padding box on
/// screen. Scrolling moves content up and left relative to it, so the
/// content origin sits `scroll` further back; `extent` is the scrollable
/// size.
pub fn scroll_frame(visible_origin: Point, scroll: Point, extent: Size) -> Rect {
    Rect::new(
        visible_origin.x - scroll.x,
        visible_origin.y - scroll.y,
        extent.width,
        extent.height,
    )
}

/// Position of a trigger of size `trigger` inside `container`
///
/// In `AutoPrev` mode the offsets are added to the anchor's top-left corner;
/// without an anchor, or in `Container` mode, they are taken from the
/// container's own corner.
pub fn resolve_position(
    mode: AnchorMode,
    container: &Rect,
    anchor: Option<&Rect>,
    offset: Point,
    trigger: Size,
) -> Point {
    let origin = match (mode, anchor) {
        (AnchorMode::AutoPrev, Some(anchor)) => Point {
            x: anchor.left - container.left,
            y: anchor.top - container.top,
        },
        _ => Point::default(),
    };

    clamp_position(
        Point {
            x: origin.x + offset.x,
            y: origin.y + offset.y,
        },
        container.size(),
        trigger,
    )
}

/// Clamp to `[0, container - trigger]` on both axes
pub fn clamp_position(position: Point, container: Size, trigger: Size) -> Point {
    Point {
        x: clamp_axis(position.x, container.width, trigger.width),
        y: clamp_axis(position.y, container.height, trigger.height),
    }
}

fn clamp_axis(value: f64, container: f64, trigger: f64) -> f64 {
    let max = container - trigger;
    let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}
