//! Image layout

use crate::models::ImageElement;

/// Extensions of interactive formats browsers no longer run
const DEPRECATED_EXTENSIONS: &[&str] = &["swf"];

const FALLBACK_ALT: &str = "Image";

#[derive(Clone, Debug, PartialEq)]
pub enum ImageView {
    /// Text shown in place of unsupported content
    Warning(String),
    Picture {
        src: String,
        alt: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

impl ImageView {
    /// Decide how to show an image whose file lives under `image_root`
    pub fn from_element(element: &ImageElement, image_root: &str) -> Self {
        if is_deprecated_format(&element.file_name) {
            return ImageView::Warning(format!(
                "Unsupported interactive content: {}",
                element.file_name
            ));
        }

        let alt = [&element.search_text, &element.title]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_ALT)
            .to_string();

        ImageView::Picture {
            src: format!("{}{}", image_root, element.file_name),
            alt,
            width: positive_px(element.width),
            height: positive_px(element.height),
        }
    }
}

fn is_deprecated_format(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            DEPRECATED_EXTENSIONS
                .iter()
                .any(|deprecated| ext.eq_ignore_ascii_case(deprecated))
        })
        .unwrap_or(false)
}

fn positive_px(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32)
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(file: &str) -> ImageElement {
        ImageElement {
            file_name: file.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flash_files_render_a_warning() {
        for name in ["intro.swf", "INTRO.SWF"] {
            match ImageView::from_element(&image(name), "img/") {
                ImageView::Warning(text) => assert!(text.contains(name)),
                other => panic!("expected warning, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_alt_text_fallback_order() {
        let mut el = image("a.png");
        el.title = Some("Title".to_string());
        el.search_text = Some("Search".to_string());
        let alt = |el: &ImageElement| match ImageView::from_element(el, "") {
            ImageView::Picture { alt, .. } => alt,
            other => panic!("expected picture, got {:?}", other),
        };

        assert_eq!(alt(&el), "Search");
        el.search_text = Some(String::new());
        assert_eq!(alt(&el), "Title");
        el.title = None;
        assert_eq!(alt(&el), "Image");
    }

    #[test]
    fn test_source_and_dimensions() {
        let mut el = image("chart.png");
        el.width = Some(320.0);
        el.height = Some(0.0);
        match ImageView::from_element(&el, "assets/images/") {
            ImageView::Picture { src, width, height, .. } => {
                assert_eq!(src, "assets/images/chart.png");
                assert_eq!(width, Some(320));
                assert_eq!(height, None);
            }
            other => panic!("expected picture, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_dimensions_are_ignored() {
        let mut el = image("x.jpg");
        el.width = Some(-5.0);
        el.height = Some(f64::NAN);
        match ImageView::from_element(&el, "") {
            ImageView::Picture { width, height, .. } => {
                assert_eq!(width, None);
                assert_eq!(height, None);
            }
            other => panic!("expected picture, got {:?}", other),
        }
    }
}
