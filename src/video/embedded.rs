//! Embedded-provider playback with a custom control bar
//!
//! The provider iframe runs muted and autoplaying with its own chrome
//! disabled. Our control bar drives it through the provider's JS API and a
//! polling interval mirrors playback position into the seek slider and the
//! time readout.
//!
//! Layout:
//!
//! ```text
//! div.video-embed              <- fullscreen target, lifetime owner
//!   div.video-frame            <- aspect-ratio locked box
//!     div.video-host           <- replaced by the provider iframe
//!   div.video-controls
//!     button.video-play | button.video-mute | input.video-seek
//!     span.video-time   | button.video-fullscreen
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, Node};

use super::controls::{
    mute_glyph, seek_target, slider_position, time_readout, PlayerState, ToggleAction,
    FULLSCREEN_GLYPH, PLAY_GLYPH, SLIDER_MAX,
};
use crate::renderers::context::RenderContext;
use crate::renderers::dom::helpers::{append, create, create_text, create_with_class, window_document};

// ============================================================================
// Provider API bindings
// ============================================================================

#[wasm_bindgen]
extern "C" {
    /// `YT.Player`
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    pub type ProviderPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player", catch)]
    fn new(host: &HtmlElement, options: &JsValue) -> Result<ProviderPlayer, JsValue>;

    #[wasm_bindgen(method, js_class = "Player", js_name = playVideo)]
    fn play_video(this: &ProviderPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = pauseVideo)]
    fn pause_video(this: &ProviderPlayer);

    #[wasm_bindgen(method, js_class = "Player")]
    fn mute(this: &ProviderPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = unMute)]
    fn un_mute(this: &ProviderPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = isMuted)]
    fn is_muted(this: &ProviderPlayer) -> bool;

    #[wasm_bindgen(method, js_class = "Player", js_name = getDuration)]
    fn get_duration(this: &ProviderPlayer) -> f64;

    #[wasm_bindgen(method, js_class = "Player", js_name = getCurrentTime)]
    fn get_current_time(this: &ProviderPlayer) -> f64;

    #[wasm_bindgen(method, js_class = "Player", js_name = getPlayerState)]
    fn get_player_state(this: &ProviderPlayer) -> i32;

    #[wasm_bindgen(method, js_class = "Player", js_name = seekTo)]
    fn seek_to(this: &ProviderPlayer, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_class = "Player", catch)]
    fn destroy(this: &ProviderPlayer) -> Result<(), JsValue>;
}

/// Embed parameters: no native chrome, muted autoplay, no related videos
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerVars {
    controls: u8,
    autoplay: u8,
    mute: u8,
    rel: u8,
    playsinline: u8,
    modestbranding: u8,
}

impl Default for PlayerVars {
    fn default() -> Self {
        Self {
            controls: 0,
            autoplay: 1,
            mute: 1,
            rel: 0,
            playsinline: 1,
            modestbranding: 1,
        }
    }
}

// ============================================================================
// Control bar
// ============================================================================

struct ControlBar {
    root: HtmlElement,
    play: HtmlButtonElement,
    mute: HtmlButtonElement,
    seek: HtmlInputElement,
    time: HtmlElement,
    fullscreen: HtmlButtonElement,
}

impl ControlBar {
    fn build(document: &web_sys::Document) -> Result<Self, JsValue> {
        let root = create_with_class(document, "div", "video-controls")?;

        let play: HtmlButtonElement = create(document, "button")?;
        play.set_class_name("video-play");
        play.set_type("button");
        play.set_text_content(Some(PLAY_GLYPH));
        play.set_attribute("aria-label", "Play or pause")?;

        let mute: HtmlButtonElement = create(document, "button")?;
        mute.set_class_name("video-mute");
        mute.set_type("button");
        mute.set_text_content(Some(mute_glyph(true)));
        mute.set_attribute("aria-label", "Mute or unmute")?;

        let seek: HtmlInputElement = create(document, "input")?;
        seek.set_class_name("video-seek");
        seek.set_type("range");
        seek.set_min("0");
        seek.set_max(&SLIDER_MAX.to_string());
        seek.set_step("0.1");
        seek.set_value("0");
        seek.set_attribute("aria-label", "Seek")?;

        let time = create_text(document, "span", "video-time", &time_readout(0.0, 0.0))?;

        let fullscreen: HtmlButtonElement = create(document, "button")?;
        fullscreen.set_class_name("video-fullscreen");
        fullscreen.set_type("button");
        fullscreen.set_text_content(Some(FULLSCREEN_GLYPH));
        fullscreen.set_attribute("aria-label", "Fullscreen")?;

        let children: [&Node; 5] = [&play, &mute, &seek, &time, &fullscreen];
        for child in children {
            append(&root, child)?;
        }

        Ok(Self {
            root,
            play,
            mute,
            seek,
            time,
            fullscreen,
        })
    }

    fn show_state(&self, state: PlayerState) {
        if let Some(glyph) = state.toggle_glyph() {
            self.play.set_text_content(Some(glyph));
        }
    }

    fn show_progress(&self, current: f64, duration: f64) {
        self.seek
            .set_value_as_number(slider_position(current, duration));
        self.time
            .set_text_content(Some(&time_readout(current, duration)));
    }
}

// ============================================================================
// Player state
// ============================================================================

struct EmbeddedPlayer {
    wrapper: HtmlElement,
    controls: ControlBar,
    player: RefCell<Option<ProviderPlayer>>,
    duration: Cell<f64>,
    poll_interval_ms: u32,
    poll: RefCell<Option<Interval>>,
    listeners: RefCell<Vec<EventListener>>,
    provider_callbacks: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
    disposed: Cell<bool>,
}

impl EmbeddedPlayer {
    fn with_player<R>(&self, f: impl FnOnce(&ProviderPlayer) -> R) -> Option<R> {
        self.player.borrow().as_ref().map(f)
    }

    fn duration(&self) -> f64 {
        let cached = self.duration.get();
        if cached.is_finite() && cached > 0.0 {
            return cached;
        }
        let fresh = self.with_player(|p| p.get_duration()).unwrap_or(0.0);
        self.duration.set(fresh);
        fresh
    }

    fn on_ready(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        self.duration.set(0.0);
        let duration = self.duration();
        log::debug!("Embedded player ready, duration {:.1}s", duration);
        self.controls.show_progress(0.0, duration);
        if let Some(state) = self.with_player(|p| p.get_player_state()) {
            self.controls.show_state(PlayerState::from_code(state));
        }

        let weak = Rc::downgrade(self);
        let interval = Interval::new(self.poll_interval_ms, move || {
            if let Some(this) = weak.upgrade() {
                this.poll();
            }
        });
        *self.poll.borrow_mut() = Some(interval);
    }

    fn poll(&self) {
        let current = self.with_player(|p| p.get_current_time()).unwrap_or(0.0);
        let duration = self.duration();
        self.controls.show_progress(current, duration);
    }

    fn on_state_change(&self, code: i32) {
        self.controls.show_state(PlayerState::from_code(code));
    }

    fn toggle_play(&self) {
        self.with_player(|p| {
            match ToggleAction::for_state(PlayerState::from_code(p.get_player_state())) {
                ToggleAction::Play => p.play_video(),
                ToggleAction::Pause => p.pause_video(),
            }
        });
    }

    fn toggle_mute(&self) {
        let muted = self.with_player(|p| {
            if p.is_muted() {
                p.un_mute();
                false
            } else {
                p.mute();
                true
            }
        });
        if let Some(muted) = muted {
            self.controls.mute.set_text_content(Some(mute_glyph(muted)));
        }
    }

    fn seek(&self) {
        let value = self.controls.seek.value_as_number();
        if let Some(target) = seek_target(value, self.duration()) {
            self.with_player(|p| p.seek_to(target, true));
        }
    }

    fn toggle_fullscreen(&self) {
        let Ok((_, document)) = window_document() else {
            return;
        };
        let result = if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
            Ok(())
        } else {
            self.wrapper.request_fullscreen()
        };
        if let Err(e) = result {
            log::warn!("Fullscreen request refused: {:?}", e);
        }
    }

    /// Stop polling and detach everything; idempotent
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.poll.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        if let Some(player) = self.player.borrow_mut().take() {
            if let Err(e) = player.destroy() {
                log::debug!("Embedded player destroy threw: {:?}", e);
            }
        }
        self.provider_callbacks.borrow_mut().clear();
        log::debug!("Embedded player released");
    }
}

// ============================================================================
// Construction
// ============================================================================

const FRAME_ASPECT_RATIO: &str = "16 / 9";

/// Width cap keeping a 16:9 frame inside the published container height
pub fn frame_max_width(height_property: &str) -> String {
    format!("calc(var({}) * 16 / 9)", height_property)
}

/// Build the embedded player shell and start loading the provider player
///
/// The shell (frame box and control bar) is returned synchronously so it can
/// replace the placeholder right away; the provider iframe appears once the
/// shared API promise resolves.
pub fn build_embedded_player(ctx: &Rc<RenderContext>, video_id: &str) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();
    let wrapper = create_with_class(document, "div", "video-embed")?;
    let frame = create_with_class(document, "div", "video-frame")?;
    let style = frame.style();
    style.set_property("width", "100%")?;
    style.set_property("aspect-ratio", FRAME_ASPECT_RATIO)?;
    style.set_property("max-width", &frame_max_width(&ctx.config.height_property))?;
    let host = create_with_class(document, "div", "video-host")?;
    append(&frame, &host)?;
    append(&wrapper, &frame)?;

    let controls = ControlBar::build(document)?;
    append(&wrapper, &controls.root)?;

    let state = Rc::new(EmbeddedPlayer {
        wrapper: wrapper.clone(),
        controls,
        player: RefCell::new(None),
        duration: Cell::new(0.0),
        poll_interval_ms: ctx.config.poll_interval_ms,
        poll: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        provider_callbacks: RefCell::new(Vec::new()),
        disposed: Cell::new(false),
    });

    bind_controls(&state);

    {
        let state = state.clone();
        ctx.own(&wrapper, move || state.dispose())?;
    }

    let ready = ctx.provider().ready();
    let weak = Rc::downgrade(&state);
    let video_id = video_id.to_string();
    let ctx_weak = Rc::downgrade(ctx);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(ready).await {
            log::error!("Embedded player API unavailable: {:?}", e);
            return;
        }
        let Some(state) = weak.upgrade() else {
            return;
        };
        if state.disposed.get() {
            return;
        }
        if let Err(e) = instantiate(&state, &host, &video_id) {
            log::error!("Failed to create embedded player for {}: {:?}", video_id, e);
        }
        if let Some(ctx) = ctx_weak.upgrade() {
            ctx.request_height_recalc();
        }
    });

    Ok(wrapper)
}

fn bind_controls(state: &Rc<EmbeddedPlayer>) {
    let bind = |target: &HtmlElement, event: &'static str, action: fn(&EmbeddedPlayer)| {
        let weak: Weak<EmbeddedPlayer> = Rc::downgrade(state);
        EventListener::new(target, event, move |_| {
            if let Some(this) = weak.upgrade() {
                action(&this);
            }
        })
    };

    let listeners = [
        bind(&state.controls.play, "click", EmbeddedPlayer::toggle_play),
        bind(&state.controls.mute, "click", EmbeddedPlayer::toggle_mute),
        bind(&state.controls.seek, "input", EmbeddedPlayer::seek),
        bind(&state.controls.fullscreen, "click", EmbeddedPlayer::toggle_fullscreen),
    ];
    state.listeners.borrow_mut().extend(listeners);
}

fn instantiate(state: &Rc<EmbeddedPlayer>, host: &HtmlElement, video_id: &str) -> Result<(), JsValue> {
    let on_ready = {
        let weak = Rc::downgrade(state);
        Closure::wrap(Box::new(move |_event: JsValue| {
            if let Some(this) = weak.upgrade() {
                this.on_ready();
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    let on_state_change = {
        let weak = Rc::downgrade(state);
        Closure::wrap(Box::new(move |event: JsValue| {
            let code = Reflect::get(&event, &JsValue::from_str("data"))
                .ok()
                .and_then(|data| data.as_f64())
                .map(|code| code as i32);
            if let (Some(this), Some(code)) = (weak.upgrade(), code) {
                this.on_state_change(code);
            }
        }) as Box<dyn FnMut(JsValue)>)
    };

    let events = Object::new();
    Reflect::set(&events, &JsValue::from_str("onReady"), on_ready.as_ref())?;
    Reflect::set(&events, &JsValue::from_str("onStateChange"), on_state_change.as_ref())?;

    let player_vars = serde_wasm_bindgen::to_value(&PlayerVars::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("videoId"), &JsValue::from_str(video_id))?;
    Reflect::set(&options, &JsValue::from_str("width"), &JsValue::from_str("100%"))?;
    Reflect::set(&options, &JsValue::from_str("height"), &JsValue::from_str("100%"))?;
    Reflect::set(&options, &JsValue::from_str("playerVars"), &player_vars)?;
    Reflect::set(&options, &JsValue::from_str("events"), &events)?;

    let player = ProviderPlayer::new(host, &options)?;
    *state.player.borrow_mut() = Some(player);
    state
        .provider_callbacks
        .borrow_mut()
        .extend([on_ready, on_state_change]);
    log::info!("Embedded player created for video {}", video_id);
    Ok(())
}
