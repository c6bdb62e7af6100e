//! Course viewer WASM module
//!
//! Renders e-learning courses (nested slide groups and slides, each a tree
//! of typed elements) into the host page: element builders, the video
//! player state machine, info-box anchoring and content-height propagation,
//! plus course loading and slide navigation around them.

pub mod api;
pub mod config;
pub mod error;
pub mod height;
pub mod html_layout;
pub mod lifecycle;
pub mod loader;
pub mod models;
pub mod navigation;
pub mod renderers;
pub mod video;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use models::course::*;
pub use models::elements::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger is already installed (module instantiated twice)
        log::debug!("Logger already initialized");
    }

    log::info!("Course viewer WASM module initialized");
}
