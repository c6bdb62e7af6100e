//! Text and list layout

use crate::models::{ListElement, TextElement};

/// Class applied to text without a style name
pub const BASE_TEXT_CLASS: &str = "text-paragraph";

/// Style name that turns a list into an ordered list
pub const NUMBER_LIST_STYLE: &str = "numberList";

/// Split text into the segments separated by explicit line breaks
///
/// Windows line endings count as one break.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// CSS class for a text element
pub fn text_class(element: &TextElement) -> String {
    match element.style_name.as_deref().map(str::trim) {
        Some(style) if !style.is_empty() => format!("text-{}", style),
        _ => BASE_TEXT_CLASS.to_string(),
    }
}

/// Layout decisions for a list element
#[derive(Clone, Debug, PartialEq)]
pub struct ListModel {
    pub ordered: bool,

    /// First visible number; only set for ordered lists starting after 1
    pub start: Option<i64>,

    /// Non-empty lines in input order
    pub items: Vec<String>,
}

impl ListModel {
    pub fn from_element(element: &ListElement) -> Self {
        let ordered = element.style_name.as_deref() == Some(NUMBER_LIST_STYLE);

        let items = text_lines(&element.text)
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let start = match element.start_index {
            Some(index) if ordered && index > 1 => Some(index),
            _ => None,
        };

        Self { ordered, start, items }
    }

    pub fn tag(&self) -> &'static str {
        if self.ordered {
            "ol"
        } else {
            "ul"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(text: &str, style: Option<&str>, start: Option<i64>) -> ListElement {
        ListElement {
            text: text.to_string(),
            style_name: style.map(str::to_string),
            start_index: start,
        }
    }

    #[test]
    fn test_text_lines_split_on_newlines() {
        assert_eq!(text_lines("one\ntwo\r\nthree"), vec!["one", "two", "three"]);
        assert_eq!(text_lines("single"), vec!["single"]);
        assert_eq!(text_lines("trailing\n"), vec!["trailing", ""]);
    }

    #[test]
    fn test_text_class_defaults_to_paragraph() {
        let plain = TextElement { text: "x".to_string(), style_name: None };
        assert_eq!(text_class(&plain), "text-paragraph");

        let blank = TextElement { text: "x".to_string(), style_name: Some("  ".to_string()) };
        assert_eq!(text_class(&blank), "text-paragraph");

        let heading = TextElement { text: "x".to_string(), style_name: Some("heading".to_string()) };
        assert_eq!(text_class(&heading), "text-heading");
    }

    #[test]
    fn test_number_list_starts_at_given_index() {
        let model = ListModel::from_element(&list("a\nb\n\nc", Some("numberList"), Some(5)));
        assert!(model.ordered);
        assert_eq!(model.tag(), "ol");
        assert_eq!(model.start, Some(5));
        assert_eq!(model.items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_start_index_of_one_is_not_emitted() {
        let model = ListModel::from_element(&list("a", Some("numberList"), Some(1)));
        assert_eq!(model.start, None);
    }

    #[test]
    fn test_bullet_list_ignores_start_index() {
        let model = ListModel::from_element(&list("a\n  \nb", Some("bulletList"), Some(7)));
        assert!(!model.ordered);
        assert_eq!(model.tag(), "ul");
        assert_eq!(model.start, None);
        assert_eq!(model.items.len(), 2);
    }
}
