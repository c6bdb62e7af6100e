//! Render context shared by all element builders
//!
//! Holds configuration, the shared content container, the height signal,
//! the provider API handle, the modal opener and the lifetime scope of the
//! slide currently mounted. One context is active per page; builders reach
//! it through `RenderContext::current` when called from JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

use crate::config::ViewerConfig;
use crate::error::{dom_err, ViewerError};
use crate::height::HeightSignal;
use crate::lifecycle::{dispose_all, tie_to_node, Cleanup, RenderScope};
use crate::models::{AnchorMode, Element, InfoBoxElement};
use crate::video::provider_api::ProviderApi;

pub struct RenderContext {
    pub config: ViewerConfig,
    document: Document,
    content: Option<HtmlElement>,
    height: Option<Rc<HeightSignal>>,
    provider: Rc<ProviderApi>,
    modal_opener: RefCell<Option<js_sys::Function>>,
    scope: RefCell<RenderScope>,
}

thread_local! {
    static ACTIVE: RefCell<Option<Rc<RenderContext>>> = const { RefCell::new(None) };
}

impl RenderContext {
    /// Context bound to the page's content container, with a live height signal
    pub fn attach(config: ViewerConfig) -> Result<Rc<Self>, ViewerError> {
        config.validate().map_err(ViewerError::Config)?;
        let document = page_document()?;
        let content: HtmlElement = document
            .get_element_by_id(&config.content_id)
            .ok_or_else(|| ViewerError::MissingElement(config.content_id.clone()))?
            .dyn_into()
            .map_err(|_| ViewerError::MissingElement(config.content_id.clone()))?;
        establish_positioning(&content).map_err(dom_err)?;
        let height = HeightSignal::install(&content, &config.height_property).map_err(dom_err)?;

        Ok(Rc::new(Self::build(config, document, Some(content), Some(height))))
    }

    /// Context without a content container, for building elements in isolation
    pub fn detached(config: ViewerConfig) -> Result<Rc<Self>, ViewerError> {
        let document = page_document()?;
        Ok(Rc::new(Self::build(config, document, None, None)))
    }

    fn build(
        config: ViewerConfig,
        document: Document,
        content: Option<HtmlElement>,
        height: Option<Rc<HeightSignal>>,
    ) -> Self {
        let provider = ProviderApi::shared(&config.provider_api_url);
        Self {
            config,
            document,
            content,
            height,
            provider,
            modal_opener: RefCell::new(None),
            scope: RefCell::new(RenderScope::default()),
        }
    }

    /// Make `ctx` the context used by JavaScript-facing builders
    pub fn activate(ctx: &Rc<RenderContext>) {
        ACTIVE.with(|active| *active.borrow_mut() = Some(ctx.clone()));
    }

    /// The active context, or a detached default one
    pub fn current() -> Result<Rc<RenderContext>, ViewerError> {
        if let Some(ctx) = ACTIVE.with(|active| active.borrow().clone()) {
            return Ok(ctx);
        }
        let ctx = Self::detached(ViewerConfig::default())?;
        Self::activate(&ctx);
        Ok(ctx)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The shared content container, if this context has one
    pub fn content(&self) -> Option<&HtmlElement> {
        self.content.as_ref()
    }

    pub fn height(&self) -> Option<&Rc<HeightSignal>> {
        self.height.as_ref()
    }

    pub fn provider(&self) -> &ProviderApi {
        &self.provider
    }

    pub fn image_src(&self, file_name: &str) -> String {
        self.config.assets().image(file_name)
    }

    pub fn anchor_mode_for(&self, info: &InfoBoxElement) -> AnchorMode {
        info.anchor.unwrap_or(self.config.anchor_mode)
    }

    // ========================================================================
    // Height signal
    // ========================================================================

    /// Recalculate after static content was inserted
    pub fn recalc_height(&self) {
        if let Some(height) = &self.height {
            height.recalc();
        }
    }

    /// Recalculate on the next paint, for content still settling
    pub fn request_height_recalc(&self) {
        if let Some(height) = &self.height {
            height.request();
        }
    }

    // ========================================================================
    // Lifetimes
    // ========================================================================

    /// Release `f` when `node` is discarded
    ///
    /// Runs on the next slide change or when `node` is seen leaving the
    /// document, whichever happens first.
    pub fn own<F>(&self, node: &Node, f: F) -> Result<Cleanup, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let cleanup = tie_to_node(node, f)?;
        self.scope.borrow_mut().register(cleanup.clone());
        Ok(cleanup)
    }

    /// Run every pending cleanup of the mounted slide
    pub fn dispose_scope(&self) -> usize {
        let cleanups = self.scope.borrow_mut().take();
        let ran = dispose_all(cleanups);
        if ran > 0 {
            log::debug!("Released {} rendered resources", ran);
        }
        ran
    }

    pub fn pending_cleanups(&self) -> usize {
        self.scope.borrow().pending()
    }

    // ========================================================================
    // Modal collaborator
    // ========================================================================

    pub fn set_modal_opener(&self, opener: Option<js_sys::Function>) {
        *self.modal_opener.borrow_mut() = opener;
    }

    /// Ask the modal to show an info-box's contents as a group element
    pub fn open_modal(&self, info: &InfoBoxElement) {
        let opener = self.modal_opener.borrow().clone();
        let Some(opener) = opener else {
            log::warn!("Info-box activated but no modal opener is registered");
            return;
        };

        let group = Element::Group(info.as_group());
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match serde::Serialize::serialize(&group, &serializer) {
            Ok(payload) => {
                if let Err(e) = opener.call1(&JsValue::NULL, &payload) {
                    log::error!("Modal opener threw: {:?}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize info-box contents: {}", e),
        }
    }
}

/// Make `content` the offset parent of the info-box triggers it holds
///
/// Only a statically positioned container is changed; a host stylesheet
/// that already positions it wins.
fn establish_positioning(content: &HtmlElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let position = match window.get_computed_style(content)? {
        Some(computed) => computed.get_property_value("position")?,
        None => String::new(),
    };
    if position.is_empty() || position == "static" {
        content.style().set_property("position", "relative")?;
        log::debug!("Content container #{} positioned relative", content.id());
    }
    Ok(())
}

fn page_document() -> Result<Document, ViewerError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ViewerError::Dom("no document available".to_string()))
}
