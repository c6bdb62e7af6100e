//! Course loading over the Fetch API

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::{describe_js, ViewerError};
use crate::models::Course;

/// Fetch and parse the course document at `url`
pub async fn fetch_course(url: &str) -> Result<Course, ViewerError> {
    let window = web_sys::window().ok_or_else(|| ViewerError::Fetch("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ViewerError::Fetch(format!("{}: {}", url, describe_js(&e))))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ViewerError::Fetch(format!("{}: not a response", url)))?;

    if !response.ok() {
        return Err(ViewerError::Fetch(format!(
            "{}: HTTP {} {}",
            url,
            response.status(),
            response.status_text()
        )));
    }

    let text = response
        .text()
        .map_err(|e| ViewerError::Fetch(describe_js(&e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| ViewerError::Fetch(describe_js(&e)))?
        .as_string()
        .ok_or_else(|| ViewerError::Fetch(format!("{}: body is not text", url)))?;

    let course = Course::from_json(&text)?;
    log::info!(
        "Loaded course '{}' from {} ({} slides)",
        course.title.as_deref().unwrap_or("untitled"),
        url,
        course.slides().len()
    );
    Ok(course)
}

/// Blocking notification for failures the viewer cannot recover from
pub fn notify_failure(err: &ViewerError) {
    log::error!("{}", err);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.to_string());
    }
}
