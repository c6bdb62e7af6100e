//! Info-box triggers
//!
//! An info-box renders as a small absolutely positioned trigger. Its
//! position comes from `html_layout::anchor`; this module decides when to
//! recompute it:
//!
//! - on the first paint after insertion,
//! - when the container or the anchor element resizes,
//! - when images or video metadata inside the anchor finish loading,
//! - on window resize.
//!
//! Observers and the window listener are released with the trigger.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlElement};

use super::helpers::{create, has_class};
use crate::html_layout::{resolve_position, scroll_frame, Point, Rect, Size};
use crate::lifecycle::ResizeWatch;
use crate::models::{AnchorMode, InfoBoxElement};
use crate::renderers::context::RenderContext;

pub const TRIGGER_CLASS: &str = "info-box-trigger";

const TRIGGER_GLYPH: &str = "i";

pub fn build_info_box(ctx: &Rc<RenderContext>, info: &InfoBoxElement) -> Result<HtmlElement, JsValue> {
    let trigger: HtmlButtonElement = create(ctx.document(), "button")?;
    trigger.set_class_name(TRIGGER_CLASS);
    trigger.set_type("button");
    trigger.set_text_content(Some(TRIGGER_GLYPH));
    trigger.set_attribute(
        "aria-label",
        info.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("More information"),
    )?;
    let style = trigger.style();
    style.set_property("position", "absolute")?;
    style.set_property("left", "0px")?;
    style.set_property("top", "0px")?;

    let trigger: HtmlElement = trigger.into();
    let anchor = Rc::new(InfoBoxAnchor {
        trigger: trigger.clone(),
        mode: ctx.anchor_mode_for(info),
        offset: Point { x: info.x, y: info.y },
        ctx: Rc::downgrade(ctx),
        resize: RefCell::new(None),
        window_resize: RefCell::new(None),
        click: RefCell::new(None),
        media: RefCell::new(Vec::new()),
        first_paint: RefCell::new(None),
        disposed: Cell::new(false),
    });

    let click = {
        let ctx = Rc::downgrade(ctx);
        let info = info.clone();
        EventListener::new(&trigger, "click", move |event| {
            event.prevent_default();
            if let Some(ctx) = ctx.upgrade() {
                ctx.open_modal(&info);
            }
        })
    };
    *anchor.click.borrow_mut() = Some(click);

    {
        let anchor = anchor.clone();
        ctx.own(&trigger, move || anchor.dispose())?;
    }

    let weak = Rc::downgrade(&anchor);
    let first_paint = request_animation_frame(move |_timestamp| {
        if let Some(anchor) = weak.upgrade() {
            anchor.first_paint.borrow_mut().take();
            anchor.wire();
        }
    });
    *anchor.first_paint.borrow_mut() = Some(first_paint);

    Ok(trigger)
}

struct InfoBoxAnchor {
    trigger: HtmlElement,
    mode: AnchorMode,
    offset: Point,
    ctx: Weak<RenderContext>,
    resize: RefCell<Option<ResizeWatch>>,
    window_resize: RefCell<Option<EventListener>>,
    click: RefCell<Option<EventListener>>,
    media: RefCell<Vec<EventListener>>,
    first_paint: RefCell<Option<AnimationFrame>>,
    disposed: Cell<bool>,
}

impl InfoBoxAnchor {
    /// Start observing everything that can move the trigger
    fn wire(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        self.reposition();

        let Some(container) = trigger_container(&self.trigger) else {
            log::debug!("Info-box trigger has no container yet; not observing");
            return;
        };
        let anchor = match self.mode {
            AnchorMode::AutoPrev => preceding_anchor(&self.trigger),
            AnchorMode::Container => None,
        };

        let mut targets: Vec<&Element> = vec![&container];
        if let Some(anchor) = &anchor {
            targets.push(anchor);
        }
        match ResizeWatch::new(&targets, self.reposition_fn()) {
            Ok(watch) => *self.resize.borrow_mut() = Some(watch),
            Err(e) => log::warn!("Info-box resize observation unavailable: {:?}", e),
        }

        if let Some(window) = web_sys::window() {
            let mut reposition = self.reposition_fn();
            let listener = EventListener::new(&window, "resize", move |_| reposition());
            *self.window_resize.borrow_mut() = Some(listener);
        }

        if let Some(anchor) = &anchor {
            self.watch_media(anchor);
        }
    }

    /// Reposition once per image or video inside the anchor when it loads
    fn watch_media(self: &Rc<Self>, anchor: &Element) {
        let mut media: Vec<Element> = Vec::new();
        if matches!(anchor.tag_name().as_str(), "IMG" | "VIDEO") {
            media.push(anchor.clone());
        }
        if let Ok(found) = anchor.query_selector_all("img, video") {
            for i in 0..found.length() {
                if let Some(el) = found.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    media.push(el);
                }
            }
        }

        let mut listeners = self.media.borrow_mut();
        for el in media {
            let event = if el.tag_name() == "VIDEO" { "loadedmetadata" } else { "load" };
            let mut reposition = self.reposition_fn();
            listeners.push(EventListener::once(&el, event, move |_| reposition()));
        }
    }

    fn reposition_fn(self: &Rc<Self>) -> impl FnMut() + 'static {
        let weak = Rc::downgrade(self);
        move || {
            if let Some(anchor) = weak.upgrade() {
                anchor.reposition();
            }
        }
    }

    fn reposition(&self) {
        if self.disposed.get() {
            return;
        }
        apply_position(&self.trigger, self.mode, self.offset);
        if let Some(ctx) = self.ctx.upgrade() {
            ctx.request_height_recalc();
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.first_paint.borrow_mut().take();
        self.resize.borrow_mut().take();
        self.window_resize.borrow_mut().take();
        self.click.borrow_mut().take();
        self.media.borrow_mut().clear();
        log::debug!("Info-box trigger released");
    }
}

/// Element the trigger is positioned against
fn trigger_container(trigger: &HtmlElement) -> Option<Element> {
    trigger.offset_parent().or_else(|| trigger.parent_element())
}

/// Nearest preceding sibling that is not another info-box trigger
pub fn preceding_anchor(trigger: &Element) -> Option<Element> {
    let mut sibling = trigger.previous_element_sibling();
    while let Some(el) = sibling {
        if !has_class(&el, TRIGGER_CLASS) {
            return Some(el);
        }
        sibling = el.previous_element_sibling();
    }
    None
}

/// Measure and move the trigger; returns the applied position
///
/// Positions are in the container's content coordinates: a scrolled
/// container adds its scroll offset, and clamping spans the whole scrollable
/// extent rather than the visible box.
pub fn apply_position(trigger: &HtmlElement, mode: AnchorMode, offset: Point) -> Option<Point> {
    let container = trigger_container(trigger)?;
    let style = trigger.style();

    // Park the trigger at the origin so its previous spot does not widen
    // the scrollable extent it is clamped against
    if let Err(e) = style
        .set_property("left", "0px")
        .and_then(|_| style.set_property("top", "0px"))
    {
        log::warn!("Failed to reset info-box trigger: {:?}", e);
        return None;
    }

    let outer = container.get_bounding_client_rect();
    let container_rect = scroll_frame(
        Point {
            x: outer.left() + f64::from(container.client_left()),
            y: outer.top() + f64::from(container.client_top()),
        },
        Point {
            x: f64::from(container.scroll_left()),
            y: f64::from(container.scroll_top()),
        },
        Size {
            width: f64::from(container.scroll_width().max(container.client_width())),
            height: f64::from(container.scroll_height().max(container.client_height())),
        },
    );

    let anchor_rect = match mode {
        AnchorMode::AutoPrev => preceding_anchor(trigger).map(|el| {
            let r = el.get_bounding_client_rect();
            Rect::new(r.left(), r.top(), r.width(), r.height())
        }),
        AnchorMode::Container => None,
    };

    let size = Size {
        width: f64::from(trigger.offset_width()),
        height: f64::from(trigger.offset_height()),
    };

    let position = resolve_position(mode, &container_rect, anchor_rect.as_ref(), offset, size);
    if let Err(e) = style
        .set_property("left", &format!("{}px", position.x))
        .and_then(|_| style.set_property("top", &format!("{}px", position.y)))
    {
        log::warn!("Failed to position info-box trigger: {:?}", e);
        return None;
    }
    Some(position)
}
