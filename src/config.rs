//! Viewer configuration
//!
//! Page element ids, asset roots and tunables. Every field has a default so
//! the host page only passes what it changes.

use serde::{Deserialize, Serialize};

use crate::models::AnchorMode;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Shared content container the slide elements render into
    pub content_id: String,
    pub title_id: String,
    pub subtitle_id: String,
    pub audio_id: String,
    pub prev_button_id: String,
    pub next_button_id: String,
    pub menu_id: String,

    pub image_root: String,
    pub audio_root: String,

    /// Anchor mode for info-boxes that do not choose one themselves
    pub anchor_mode: AnchorMode,

    /// Script URL of the embedded provider's control API
    pub provider_api_url: String,

    /// CSS custom property carrying the available content height
    pub height_property: String,

    /// Embedded player progress polling period
    pub poll_interval_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            content_id: "slide-content".to_string(),
            title_id: "slide-title".to_string(),
            subtitle_id: "slide-subtitle".to_string(),
            audio_id: "slide-audio".to_string(),
            prev_button_id: "prev-button".to_string(),
            next_button_id: "next-button".to_string(),
            menu_id: "course-menu".to_string(),
            image_root: "assets/images/".to_string(),
            audio_root: "assets/audio/".to_string(),
            anchor_mode: AnchorMode::AutoPrev,
            provider_api_url: "https://www.youtube.com/iframe_api".to_string(),
            height_property: "--content-height".to_string(),
            poll_interval_ms: 100,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn assets(&self) -> AssetPaths<'_> {
        AssetPaths { config: self }
    }

    /// Reject values the viewer cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.content_id.trim().is_empty() {
            return Err("contentId must not be empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err(format!(
                "pollIntervalMs must be positive (got {})",
                self.poll_interval_ms
            ));
        }
        if !self.height_property.starts_with("--") {
            return Err(format!(
                "heightProperty must be a CSS custom property (got '{}')",
                self.height_property
            ));
        }
        Ok(())
    }
}

/// Asset path resolution by plain concatenation
pub struct AssetPaths<'a> {
    config: &'a ViewerConfig,
}

impl AssetPaths<'_> {
    pub fn image(&self, file_name: &str) -> String {
        format!("{}{}", self.config.image_root, file_name)
    }

    pub fn audio(&self, file_name: &str) -> String {
        format!("{}{}", self.config.audio_root, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "imageRoot": "img/", "anchorMode": "container" }"#).unwrap();
        assert_eq!(config.image_root, "img/");
        assert_eq!(config.anchor_mode, AnchorMode::Container);
        assert_eq!(config.content_id, "slide-content");
        assert_eq!(config.poll_interval_ms, 100);
    }

    #[test]
    fn test_asset_paths_concatenate() {
        let config = ViewerConfig::default();
        assert_eq!(config.assets().image("a b.png"), "assets/images/a b.png");
        assert_eq!(config.assets().audio("n.mp3"), "assets/audio/n.mp3");
    }

    #[test]
    fn test_validation() {
        assert!(ViewerConfig::default().validate().is_ok());

        let mut config = ViewerConfig::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.height_property = "height".to_string();
        assert!(config.validate().is_err());
    }
}
