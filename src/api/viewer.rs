//! `CourseViewer`: the page-level controller exported to JavaScript
//!
//! Owns the render context and the navigator, keeps the previous/next
//! buttons, the menu marker and the URL hash in step with the current slide.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Element, HtmlButtonElement};

use crate::api::helpers::{deserialize, deserialize_or_default, serialize};
use crate::config::ViewerConfig;
use crate::error::{dom_err, ViewerError};
use crate::loader::{fetch_course, notify_failure};
use crate::models::Course;
use crate::navigation::menu::{build_menu, mark_active, slide_id_at};
use crate::navigation::{hash_target, Navigator};
use crate::renderers::dom::helpers::{append, clear_children};
use crate::renderers::{render_slide, RenderContext};
use crate::{wasm_info, wasm_warn};

#[wasm_bindgen]
pub struct CourseViewer {
    state: Rc<ViewerState>,
}

#[wasm_bindgen]
impl CourseViewer {
    /// Attach to the page; `config` may be omitted to use the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CourseViewer, JsValue> {
        let config: ViewerConfig = deserialize_or_default(config, "Viewer config deserialization error")?;
        let ctx = RenderContext::attach(config)?;
        RenderContext::activate(&ctx);
        wasm_info!("CourseViewer attached to #{}", ctx.config.content_id);
        Ok(CourseViewer {
            state: Rc::new(ViewerState {
                ctx,
                navigator: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Fetch the course at `url` and show its first (or deep-linked) slide
    ///
    /// On failure a blocking alert is shown and nothing is rendered.
    pub fn load(&self, url: String) -> js_sys::Promise {
        let state = self.state.clone();
        future_to_promise(async move {
            match fetch_course(&url).await {
                Ok(course) => {
                    state.start(&course)?;
                    Ok(JsValue::UNDEFINED)
                }
                Err(err) => {
                    notify_failure(&err);
                    Err(err.into())
                }
            }
        })
    }

    /// Use an already parsed course object
    #[wasm_bindgen(js_name = setCourse)]
    pub fn set_course(&self, course: JsValue) -> Result<(), JsValue> {
        let course: Course = deserialize(course, "Course deserialization error")?;
        self.state.start(&course)?;
        Ok(())
    }

    /// Returns whether the viewer moved
    pub fn next(&self) -> Result<bool, JsValue> {
        Ok(self.state.step(Step::Next)?)
    }

    /// Returns whether the viewer moved
    pub fn prev(&self) -> Result<bool, JsValue> {
        Ok(self.state.step(Step::Prev)?)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, id: &str) -> Result<(), JsValue> {
        self.state.go_to(id)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = currentSlideId)]
    pub fn current_slide_id(&self) -> Option<String> {
        self.state.current_id()
    }

    /// `{ prevDisabled, nextDisabled }` for the current position
    #[wasm_bindgen(js_name = buttonState)]
    pub fn button_state(&self) -> Result<JsValue, JsValue> {
        let navigator = self.state.navigator.borrow();
        match navigator.as_ref() {
            Some(nav) => serialize(&nav.button_state(), "Button state serialization error"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Function called with a group element when an info-box is activated
    #[wasm_bindgen(js_name = setModalOpener)]
    pub fn set_modal_opener(&self, opener: Option<js_sys::Function>) {
        self.state.ctx.set_modal_opener(opener);
    }

    /// Release listeners and the mounted slide's resources
    pub fn dispose(&self) {
        self.state.listeners.borrow_mut().clear();
        self.state.ctx.dispose_scope();
    }
}

#[derive(Clone, Copy)]
enum Step {
    Next,
    Prev,
}

struct ViewerState {
    ctx: Rc<RenderContext>,
    navigator: RefCell<Option<Navigator>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ViewerState {
    fn start(self: &Rc<Self>, course: &Course) -> Result<(), ViewerError> {
        let mut navigator = Navigator::new(course);
        if navigator.is_empty() {
            wasm_warn!("Course has no slides; nothing to show");
        }

        let deep_link = current_hash().and_then(|hash| hash_target(&hash).map(str::to_string));
        if let Some(id) = deep_link {
            if navigator.go_to_id(&id).is_none() {
                wasm_warn!("Deep link '#{}' does not name a slide; starting at the beginning", id);
            }
        }
        *self.navigator.borrow_mut() = Some(navigator);

        self.install_menu(course)?;
        self.bind_listeners();
        self.show()
    }

    fn step(&self, step: Step) -> Result<bool, ViewerError> {
        let moved = {
            let mut navigator = self.navigator.borrow_mut();
            let Some(nav) = navigator.as_mut() else {
                return Ok(false);
            };
            match step {
                Step::Next => nav.next().is_some(),
                Step::Prev => nav.prev().is_some(),
            }
        };
        if moved {
            self.show()?;
        }
        Ok(moved)
    }

    fn go_to(&self, id: &str) -> Result<(), ViewerError> {
        if self.current_id().as_deref() == Some(id) {
            return Ok(());
        }
        let found = {
            let mut navigator = self.navigator.borrow_mut();
            navigator.as_mut().and_then(|nav| nav.go_to_id(id)).is_some()
        };
        if !found {
            return Err(ViewerError::UnknownSlide(id.to_string()));
        }
        self.show()
    }

    fn current_id(&self) -> Option<String> {
        self.navigator
            .borrow()
            .as_ref()
            .and_then(|nav| nav.current())
            .map(|slide| slide.id.clone())
    }

    /// Render the current slide and sync the page chrome with it
    fn show(&self) -> Result<(), ViewerError> {
        let (slide, buttons) = {
            let navigator = self.navigator.borrow();
            let Some(nav) = navigator.as_ref() else {
                return Ok(());
            };
            let Some(slide) = nav.current().cloned() else {
                return Ok(());
            };
            (slide, nav.button_state())
        };

        render_slide(&self.ctx, &slide)?;

        let config = &self.ctx.config;
        let document = self.ctx.document();
        for (id, disabled) in [
            (&config.prev_button_id, buttons.prev_disabled),
            (&config.next_button_id, buttons.next_disabled),
        ] {
            if let Some(button) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                button.set_disabled(disabled);
            }
        }

        if let Some(menu) = document.get_element_by_id(&config.menu_id) {
            mark_active(&menu, &slide.id).map_err(dom_err)?;
        }

        if current_hash().as_deref().and_then(hash_target) != Some(slide.id.as_str()) {
            if let Some(window) = web_sys::window() {
                window.location().set_hash(&slide.id).map_err(dom_err)?;
            }
        }
        Ok(())
    }

    fn install_menu(&self, course: &Course) -> Result<(), ViewerError> {
        let document = self.ctx.document();
        let Some(menu) = document.get_element_by_id(&self.ctx.config.menu_id) else {
            return Ok(());
        };
        clear_children(&menu);
        let list = build_menu(document, &course.items).map_err(dom_err)?;
        append(&menu, &list).map_err(dom_err)?;
        Ok(())
    }

    fn bind_listeners(self: &Rc<Self>) {
        let document = self.ctx.document();
        let config = &self.ctx.config;
        let mut listeners = Vec::new();

        for (id, step) in [(&config.prev_button_id, Step::Prev), (&config.next_button_id, Step::Next)] {
            if let Some(button) = document.get_element_by_id(id) {
                let weak = Rc::downgrade(self);
                let listener = EventListener::new(&button, "click", move |_| {
                    with_state(&weak, |state| state.step(step).map(|_| ()));
                });
                listeners.push(listener);
            }
        }

        if let Some(menu) = document.get_element_by_id(&config.menu_id) {
            let weak = Rc::downgrade(self);
            let listener = EventListener::new(&menu, "click", move |event| {
                let id = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| slide_id_at(&el));
                if let Some(id) = id {
                    event.prevent_default();
                    with_state(&weak, |state| state.go_to(&id));
                }
            });
            listeners.push(listener);
        }

        if let Some(window) = web_sys::window() {
            let weak = Rc::downgrade(self);
            let listener = EventListener::new(&window, "hashchange", move |_| {
                let Some(id) = current_hash().and_then(|h| hash_target(&h).map(str::to_string)) else {
                    return;
                };
                with_state(&weak, |state| state.go_to(&id));
            });
            listeners.push(listener);
        }

        // Replacing drops the previous course's listeners
        *self.listeners.borrow_mut() = listeners;
    }
}

/// Run a navigation action from an event handler, logging failures
fn with_state<F>(weak: &Weak<ViewerState>, f: F)
where
    F: FnOnce(&ViewerState) -> Result<(), ViewerError>,
{
    if let Some(state) = weak.upgrade() {
        if let Err(e) = f(&state) {
            log::warn!("Navigation failed: {}", e);
        }
    }
}

fn current_hash() -> Option<String> {
    web_sys::window().and_then(|w| w.location().hash().ok())
}
