//! Slide navigation
//!
//! `Navigator` is the flattened slide order plus a cursor. It never touches
//! the DOM; `CourseViewer` applies its state to buttons, menu and URL hash.

pub mod menu;

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Course, Slide};

/// Disabled state of the previous/next buttons
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavButtons {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    slides: Vec<Slide>,
    by_id: HashMap<String, usize>,
    index: usize,
}

impl Navigator {
    pub fn new(course: &Course) -> Self {
        let slides: Vec<Slide> = course.slides().into_iter().cloned().collect();
        let mut by_id = HashMap::with_capacity(slides.len());
        for (i, slide) in slides.iter().enumerate() {
            if by_id.contains_key(&slide.id) {
                log::warn!("Duplicate slide id '{}' at position {}; keeping the first", slide.id, i);
                continue;
            }
            by_id.insert(slide.id.clone(), i);
        }
        Self { slides, by_id, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn go_to_index(&mut self, index: usize) -> Option<&Slide> {
        if index >= self.slides.len() {
            return None;
        }
        self.index = index;
        self.current()
    }

    pub fn go_to_id(&mut self, id: &str) -> Option<&Slide> {
        let index = self.position_of(id)?;
        self.go_to_index(index)
    }

    /// Advance one slide; stays put on the last one
    pub fn next(&mut self) -> Option<&Slide> {
        if self.index + 1 >= self.slides.len() {
            return None;
        }
        self.go_to_index(self.index + 1)
    }

    /// Step back one slide; stays put on the first one
    pub fn prev(&mut self) -> Option<&Slide> {
        let index = self.index.checked_sub(1)?;
        self.go_to_index(index)
    }

    pub fn button_state(&self) -> NavButtons {
        NavButtons {
            prev_disabled: self.index == 0,
            next_disabled: self.index + 1 >= self.slides.len(),
        }
    }
}

/// Slide id named by a location hash (`#intro` -> `intro`)
pub fn hash_target(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_slide_course() -> Course {
        Course::from_json(
            r#"{
                "items": [
                    { "type": "SlideGroup", "title": "Intro", "items": [
                        { "type": "Slide", "id": "s1", "title": "One", "elements": [] }
                    ]},
                    { "type": "Slide", "id": "s2", "title": "Two", "elements": [] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_two_slide_navigation_end_to_end() {
        let mut nav = Navigator::new(&two_slide_course());
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current().unwrap().id, "s1");
        assert_eq!(
            nav.button_state(),
            NavButtons { prev_disabled: true, next_disabled: false }
        );

        assert_eq!(nav.next().unwrap().id, "s2");
        assert_eq!(
            nav.button_state(),
            NavButtons { prev_disabled: false, next_disabled: true }
        );

        // No wrap at the end
        assert!(nav.next().is_none());
        assert_eq!(nav.current().unwrap().id, "s2");

        assert_eq!(nav.prev().unwrap().id, "s1");
        assert!(nav.prev().is_none());
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_go_to_id() {
        let mut nav = Navigator::new(&two_slide_course());
        assert_eq!(nav.go_to_id("s2").unwrap().title, "Two");
        assert!(nav.go_to_id("missing").is_none());
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let course = Course::from_json(
            r#"{ "items": [
                { "type": "Slide", "id": "a", "title": "First" },
                { "type": "Slide", "id": "a", "title": "Second" }
            ]}"#,
        )
        .unwrap();
        let mut nav = Navigator::new(&course);
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.go_to_id("a").unwrap().title, "First");
    }

    #[test]
    fn test_single_slide_disables_both() {
        let course = Course::from_json(r#"{ "items": [{ "type": "Slide", "id": "only" }] }"#).unwrap();
        let nav = Navigator::new(&course);
        assert_eq!(
            nav.button_state(),
            NavButtons { prev_disabled: true, next_disabled: true }
        );
    }

    #[test]
    fn test_hash_target() {
        assert_eq!(hash_target("#intro"), Some("intro"));
        assert_eq!(hash_target("intro"), Some("intro"));
        assert_eq!(hash_target("#"), None);
        assert_eq!(hash_target(""), None);
    }
}
