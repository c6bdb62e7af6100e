//! Flex layout for group elements
//!
//! Alignment keywords are mapped onto the axis they describe: horizontal
//! keywords drive `justify-content` in a row and `align-items` in a column,
//! vertical keywords the other way round.

use crate::models::GroupElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlexAlign {
    Start,
    Center,
    End,
}

impl FlexAlign {
    /// left | center | right; anything else is start
    pub fn from_horizontal(keyword: Option<&str>) -> Self {
        match keyword {
            Some("center") => FlexAlign::Center,
            Some("right") => FlexAlign::End,
            _ => FlexAlign::Start,
        }
    }

    /// top | middle | bottom; anything else is start
    pub fn from_vertical(keyword: Option<&str>) -> Self {
        match keyword {
            Some("middle") => FlexAlign::Center,
            Some("bottom") => FlexAlign::End,
            _ => FlexAlign::Start,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            FlexAlign::Start => "flex-start",
            FlexAlign::Center => "center",
            FlexAlign::End => "flex-end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlexLayout {
    pub axis: Axis,
    pub justify: FlexAlign,
    pub align: FlexAlign,
    pub fill_height: bool,
}

impl FlexLayout {
    pub fn new(
        layout_mode: Option<&str>,
        horizontal_align: Option<&str>,
        vertical_align: Option<&str>,
        fill_height: bool,
    ) -> Self {
        let horizontal = FlexAlign::from_horizontal(horizontal_align);
        let vertical = FlexAlign::from_vertical(vertical_align);

        let (axis, justify, align) = if layout_mode == Some("horizontal") {
            (Axis::Row, horizontal, vertical)
        } else {
            (Axis::Column, vertical, horizontal)
        };

        Self { axis, justify, align, fill_height }
    }

    pub fn from_group(group: &GroupElement) -> Self {
        Self::new(
            group.layout_mode.as_deref(),
            group.horizontal_align.as_deref(),
            group.vertical_align.as_deref(),
            group.fill_height,
        )
    }

    /// Inline style declarations, in application order
    pub fn style_properties(&self) -> Vec<(&'static str, &'static str)> {
        let mut props = vec![
            ("display", "flex"),
            (
                "flex-direction",
                match self.axis {
                    Axis::Row => "row",
                    Axis::Column => "column",
                },
            ),
            ("justify-content", self.justify.css()),
            ("align-items", self.align.css()),
        ];
        if self.fill_height {
            props.push(("flex-grow", "1"));
        }
        props
    }
}
