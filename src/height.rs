//! Container-height propagation
//!
//! Publishes the visible interior height of the shared content container as
//! a CSS custom property on the document root. Aspect-ratio locked media
//! boxes read it in CSS to cap their width so 16:9 video never overflows
//! the available vertical space.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement};

use crate::lifecycle::ResizeWatch;

/// Last published height; suppresses redundant style writes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightTracker {
    last: Option<i32>,
}

impl HeightTracker {
    /// CSS value to publish for `height`, or `None` when unchanged
    pub fn update(&mut self, height: f64) -> Option<String> {
        let px = if height.is_finite() { height.round().max(0.0) as i32 } else { 0 };
        if self.last == Some(px) {
            return None;
        }
        self.last = Some(px);
        Some(format!("{}px", px))
    }

    pub fn last(&self) -> Option<i32> {
        self.last
    }
}

/// Live height signal bound to one container for the page lifetime
pub struct HeightSignal {
    container: HtmlElement,
    root_style: CssStyleDeclaration,
    property: String,
    tracker: RefCell<HeightTracker>,
    /// Pending measurement; dropping it cancels the frame
    frame: RefCell<Option<AnimationFrame>>,
    _container_resize: RefCell<Option<ResizeWatch>>,
    _window_resize: RefCell<Option<EventListener>>,
}

impl HeightSignal {
    /// Start observing `container` and publish its first value immediately
    pub fn install(container: &HtmlElement, property: &str) -> Result<Rc<Self>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root: HtmlElement = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?
            .dyn_into()?;

        let signal = Rc::new(Self {
            container: container.clone(),
            root_style: root.style(),
            property: property.to_string(),
            tracker: RefCell::new(HeightTracker::default()),
            frame: RefCell::new(None),
            _container_resize: RefCell::new(None),
            _window_resize: RefCell::new(None),
        });

        let target: &Element = container;
        let resize = ResizeWatch::new(&[target], recalc_from(&signal))?;
        let listener = EventListener::new(&window, "resize", {
            let mut recalc = recalc_from(&signal);
            move |_| recalc()
        });
        *signal._container_resize.borrow_mut() = Some(resize);
        *signal._window_resize.borrow_mut() = Some(listener);

        signal.recalc();
        log::debug!(
            "Height signal installed on #{} as {}",
            container.id(),
            signal.property
        );
        Ok(signal)
    }

    /// Measure and publish now
    pub fn recalc(&self) {
        let height = f64::from(self.container.client_height());
        let value = self.tracker.borrow_mut().update(height);
        if let Some(value) = value {
            if let Err(e) = self.root_style.set_property(&self.property, &value) {
                log::error!("Failed to publish {}: {:?}", self.property, e);
            }
        }
    }

    /// Measure on the next paint, once layout has settled
    ///
    /// Requests arriving before that frame share it.
    pub fn request(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_timestamp| {
            if let Some(signal) = weak.upgrade() {
                signal.frame.borrow_mut().take();
                signal.recalc();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.borrow().is_some()
    }

    pub fn current(&self) -> Option<i32> {
        self.tracker.borrow().last()
    }
}

fn recalc_from(signal: &Rc<HeightSignal>) -> impl FnMut() + 'static {
    let weak: Weak<HeightSignal> = Rc::downgrade(signal);
    move || {
        if let Some(signal) = weak.upgrade() {
            signal.recalc();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_publishes_changes_only() {
        let mut tracker = HeightTracker::default();
        assert_eq!(tracker.update(480.0), Some("480px".to_string()));
        assert_eq!(tracker.update(480.2), None);
        assert_eq!(tracker.update(512.0), Some("512px".to_string()));
        assert_eq!(tracker.last(), Some(512));
    }

    #[test]
    fn test_tracker_sanitizes_input() {
        let mut tracker = HeightTracker::default();
        assert_eq!(tracker.update(f64::NAN), Some("0px".to_string()));
        assert_eq!(tracker.update(-20.0), None);
    }
}
