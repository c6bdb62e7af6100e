//! Image builder

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlImageElement};

use super::helpers::{create, create_text};
use crate::html_layout::ImageView;
use crate::models::ImageElement;
use crate::renderers::context::RenderContext;

/// Image, or a warning for deprecated interactive formats
///
/// Recalculates the container height once the image has loaded.
pub fn build_image(ctx: &Rc<RenderContext>, element: &ImageElement) -> Result<HtmlElement, JsValue> {
    let document = ctx.document();

    match ImageView::from_element(element, &ctx.config.image_root) {
        ImageView::Warning(text) => {
            log::warn!("{}", text);
            let warning = create_text(document, "p", "image-warning", &text)?;
            Ok(warning)
        }
        ImageView::Picture { src, alt, width, height } => {
            let img: HtmlImageElement = create(document, "img")?;
            img.set_class_name("image-element");
            img.set_alt(&alt);
            if let Some(width) = width {
                img.set_width(width);
            }
            if let Some(height) = height {
                img.set_height(height);
            }

            let weak = Rc::downgrade(ctx);
            EventListener::once(&img, "load", move |_| {
                if let Some(ctx) = weak.upgrade() {
                    ctx.request_height_recalc();
                }
            })
            .forget();
            // Listener first so a cached image cannot load unobserved
            img.set_src(&src);

            Ok(img.into())
        }
    }
}
