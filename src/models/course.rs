//! Course hierarchy: slide groups and slides
//!
//! A course is an ordered tree of `CourseItem`s. Groups only organize the
//! menu; slides are the unit of navigation and rendering.

use serde::{Deserialize, Serialize};

use super::elements::Element;

/// Root of a loaded course document
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Optional course title (shown by the host page, not by the renderer)
    #[serde(default)]
    pub title: Option<String>,

    /// Top-level items in display order
    #[serde(default)]
    pub items: Vec<CourseItem>,
}

/// One node of the course tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum CourseItem {
    SlideGroup(SlideGroup),
    Slide(Slide),
}

/// Organizational node; groups may nest
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlideGroup {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub items: Vec<CourseItem>,
}

/// A renderable slide
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Unique, stable identifier across the flattened course
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    /// Audio file name, resolved under the audio asset root
    #[serde(default)]
    pub audio: Option<String>,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Course {
    /// Parse a course document from JSON text
    pub fn from_json(json: &str) -> Result<Course, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Visit every slide depth-first in document order
    pub fn slides(&self) -> Vec<&Slide> {
        let mut out = Vec::new();
        collect_slides(&self.items, &mut out);
        out
    }
}

fn collect_slides<'a>(items: &'a [CourseItem], out: &mut Vec<&'a Slide>) {
    for item in items {
        match item {
            CourseItem::Slide(slide) => out.push(slide),
            CourseItem::SlideGroup(group) => collect_slides(&group.items, out),
        }
    }
}
