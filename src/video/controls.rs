//! Transport-control state for the embedded player
//!
//! Pure helpers behind the custom control bar: provider player states,
//! glyph selection, the elapsed/duration readout and slider arithmetic.

pub const PLAY_GLYPH: &str = "\u{25B6}";
pub const PAUSE_GLYPH: &str = "\u{275A}\u{275A}";
pub const MUTED_GLYPH: &str = "\u{1F507}";
pub const UNMUTED_GLYPH: &str = "\u{1F50A}";
pub const FULLSCREEN_GLYPH: &str = "\u{26F6}";

/// Seek slider range is `0..=SLIDER_MAX`
pub const SLIDER_MAX: f64 = 100.0;

/// Provider player states as reported by `getPlayerState`/`onStateChange`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown(i32),
}

impl PlayerState {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => PlayerState::Unstarted,
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            other => PlayerState::Unknown(other),
        }
    }

    /// Glyph for the play/pause toggle, or `None` to leave it unchanged
    pub fn toggle_glyph(self) -> Option<&'static str> {
        match self {
            PlayerState::Playing => Some(PAUSE_GLYPH),
            PlayerState::Paused | PlayerState::Ended => Some(PLAY_GLYPH),
            _ => None,
        }
    }
}

/// What a click on the play/pause toggle should do in the current state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
}

impl ToggleAction {
    pub fn for_state(state: PlayerState) -> Self {
        if state == PlayerState::Playing {
            ToggleAction::Pause
        } else {
            ToggleAction::Play
        }
    }
}

pub fn mute_glyph(muted: bool) -> &'static str {
    if muted {
        MUTED_GLYPH
    } else {
        UNMUTED_GLYPH
    }
}

/// `mm:ss`; unknown, negative or non-finite positions read `00:00`
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Elapsed/duration readout
pub fn time_readout(current: f64, duration: f64) -> String {
    format!("{} / {}", format_clock(current), format_clock(duration))
}

/// Playback position for a slider value
pub fn seek_target(slider_value: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !slider_value.is_finite() {
        return None;
    }
    let value = slider_value.clamp(0.0, SLIDER_MAX);
    Some(value / SLIDER_MAX * duration)
}

/// Slider value for a playback position
pub fn slider_position(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration * SLIDER_MAX).clamp(0.0, SLIDER_MAX)
}
