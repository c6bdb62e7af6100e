//! Element tree of a slide
//!
//! `Element` is a closed sum type over the nine visual variants. The JSON
//! discriminant is the `type` field. Anything that cannot be read as one of
//! the variants (missing tag, unknown tag, wrong field types) becomes
//! `Element::Malformed` instead of failing the whole slide, so one bad
//! element never takes its siblings down with it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A visual unit within a slide's content tree
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Text(TextElement),
    List(ListElement),
    Image(ImageElement),
    Video(VideoElement),
    Grid(GridElement),
    Group(GroupElement),
    InfoBox(InfoBoxElement),
    Spacer(SpacerElement),
    AppLauncher(AppLauncherElement),
    /// Input that could not be read as any known variant
    Malformed(MalformedElement),
}

/// Literal text; newlines become line breaks
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub style_name: Option<String>,
}

/// Newline-separated list items
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListElement {
    #[serde(default)]
    pub text: String,

    /// `"numberList"` renders an ordered list
    #[serde(default)]
    pub style_name: Option<String>,

    #[serde(default)]
    pub start_index: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Preferred accessible text
    #[serde(default)]
    pub search_text: Option<String>,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoElement {
    #[serde(default)]
    pub url: String,

    /// Preview image file name, resolved under the image root
    #[serde(default)]
    pub preview_image: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}

/// Table of rows of cell strings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridElement {
    #[serde(default)]
    pub content: Vec<Vec<String>>,

    #[serde(default)]
    pub is_first_row_header: bool,

    #[serde(default)]
    pub alternate_row_color: bool,

    #[serde(default)]
    pub feature_column: Option<i64>,
}

/// Flex container of child elements
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupElement {
    #[serde(default)]
    pub elements: Vec<Element>,

    /// `"horizontal"` lays children out in a row
    #[serde(default)]
    pub layout_mode: Option<String>,

    /// left | center | right
    #[serde(default)]
    pub horizontal_align: Option<String>,

    /// top | middle | bottom
    #[serde(default)]
    pub vertical_align: Option<String>,

    #[serde(default)]
    pub fill_height: bool,

    /// Carried over when a group is synthesized from an info-box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// How an info-box trigger resolves the origin of its offsets
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    /// Offsets are relative to the nearest preceding rendered sibling
    #[default]
    AutoPrev,
    /// Offsets are relative to the container's top-left corner
    Container,
}

/// Anchored trigger that opens its nested elements in a modal
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InfoBoxElement {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default)]
    pub elements: Vec<Element>,

    #[serde(default)]
    pub layout_mode: Option<String>,

    #[serde(default)]
    pub horizontal_align: Option<String>,

    #[serde(default)]
    pub vertical_align: Option<String>,

    /// Per-element override of the viewer-wide anchor mode
    #[serde(default)]
    pub anchor: Option<AnchorMode>,
}

impl InfoBoxElement {
    /// The group the modal renders when this info-box is activated
    pub fn as_group(&self) -> GroupElement {
        GroupElement {
            elements: self.elements.clone(),
            layout_mode: self.layout_mode.clone(),
            horizontal_align: self.horizontal_align.clone(),
            vertical_align: self.vertical_align.clone(),
            fill_height: false,
            title: self.title.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpacerElement {
    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,
}

/// Outbound link to an external interactive activity
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppLauncherElement {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub title: Option<String>,
}

/// Raw input kept for diagnostics
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedElement {
    /// The `type` value, if there was a string one
    pub tag: Option<String>,
    pub reason: String,
    pub raw: Value,
}

// ============================================================================
// Tag dispatch
// ============================================================================

impl Element {
    /// Read one element from a JSON value, never failing
    pub fn from_value(value: Value) -> Element {
        let tag = match value.get("type").and_then(Value::as_str) {
            Some(tag) => tag.to_string(),
            None => {
                return Element::Malformed(MalformedElement {
                    tag: None,
                    reason: "missing element type".to_string(),
                    raw: value,
                })
            }
        };

        let parsed = match tag.as_str() {
            "TextElement" => serde_json::from_value(value.clone()).map(Element::Text),
            "ListElement" => serde_json::from_value(value.clone()).map(Element::List),
            "ImageElement" => serde_json::from_value(value.clone()).map(Element::Image),
            "VideoElement" => serde_json::from_value(value.clone()).map(Element::Video),
            "GridElement" => serde_json::from_value(value.clone()).map(Element::Grid),
            "GroupElement" => serde_json::from_value(value.clone()).map(Element::Group),
            "InfoBoxElement" => serde_json::from_value(value.clone()).map(Element::InfoBox),
            "SpacerElement" => serde_json::from_value(value.clone()).map(Element::Spacer),
            "AppLauncherElement" => serde_json::from_value(value.clone()).map(Element::AppLauncher),
            _ => {
                return Element::Malformed(MalformedElement {
                    reason: format!("unknown element type '{}'", tag),
                    tag: Some(tag),
                    raw: value,
                })
            }
        };

        parsed.unwrap_or_else(|e| {
            Element::Malformed(MalformedElement {
                reason: e.to_string(),
                tag: Some(tag),
                raw: value,
            })
        })
    }

    /// The JSON discriminant for this element
    pub fn type_name(&self) -> &str {
        match self {
            Element::Text(_) => "TextElement",
            Element::List(_) => "ListElement",
            Element::Image(_) => "ImageElement",
            Element::Video(_) => "VideoElement",
            Element::Grid(_) => "GridElement",
            Element::Group(_) => "GroupElement",
            Element::InfoBox(_) => "InfoBoxElement",
            Element::Spacer(_) => "SpacerElement",
            Element::AppLauncher(_) => "AppLauncherElement",
            Element::Malformed(m) => m.tag.as_deref().unwrap_or("<none>"),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Element::from_value(value))
    }
}

/// Borrowed, internally tagged view used for serialization
#[derive(Serialize)]
#[serde(tag = "type")]
enum TaggedElement<'a> {
    TextElement(&'a TextElement),
    ListElement(&'a ListElement),
    ImageElement(&'a ImageElement),
    VideoElement(&'a VideoElement),
    GridElement(&'a GridElement),
    GroupElement(&'a GroupElement),
    InfoBoxElement(&'a InfoBoxElement),
    SpacerElement(&'a SpacerElement),
    AppLauncherElement(&'a AppLauncherElement),
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let tagged = match self {
            Element::Text(e) => TaggedElement::TextElement(e),
            Element::List(e) => TaggedElement::ListElement(e),
            Element::Image(e) => TaggedElement::ImageElement(e),
            Element::Video(e) => TaggedElement::VideoElement(e),
            Element::Grid(e) => TaggedElement::GridElement(e),
            Element::Group(e) => TaggedElement::GroupElement(e),
            Element::InfoBox(e) => TaggedElement::InfoBoxElement(e),
            Element::Spacer(e) => TaggedElement::SpacerElement(e),
            Element::AppLauncher(e) => TaggedElement::AppLauncherElement(e),
            Element::Malformed(m) => return m.raw.serialize(serializer),
        };
        tagged.serialize(serializer)
    }
}
