//! DOM rendering tests
//!
//! Run in a browser: `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use course_viewer_wasm::api::CourseViewer;
use course_viewer_wasm::html_layout::Point;
use course_viewer_wasm::renderers::dom::info_box::apply_position;
use course_viewer_wasm::renderers::{append_elements, build_element, render_slide, RenderContext};
use course_viewer_wasm::video::provider_api::ProviderApi;
use course_viewer_wasm::video::{activate, VideoPhase};
use course_viewer_wasm::{AnchorMode, Element, Slide, ViewerConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn context() -> Rc<RenderContext> {
    RenderContext::detached(ViewerConfig::default()).unwrap()
}

fn element(json: &str) -> Element {
    serde_json::from_str(json).unwrap()
}

fn slide(json: &str) -> Slide {
    serde_json::from_str(json).unwrap()
}

fn placeholder_in(root: &web_sys::Element) -> HtmlElement {
    root.query_selector(".video-placeholder")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

/// Wait one macrotask so pending mutation records are delivered
async fn settle() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn mount(id: &str, style: &str) -> HtmlElement {
    let div: HtmlElement = document().create_element("div").unwrap().dyn_into().unwrap();
    div.set_id(id);
    div.set_attribute("style", style).unwrap();
    document().body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
fn test_malformed_element_is_skipped_siblings_render() {
    let ctx = context();
    let host = mount("skip-host", "");
    let elements = vec![
        element(r#"{ "type": "TextElement", "text": "before" }"#),
        element(r#"{ "type": "Hologram", "text": "???" }"#),
        element(r#"{ "type": "TextElement", "text": "after" }"#),
    ];

    let appended = append_elements(&ctx, &host, &elements).unwrap();

    assert_eq!(appended, 2);
    assert_eq!(host.child_element_count(), 2);
    let text = host.text_content().unwrap();
    assert!(text.contains("before"));
    assert!(text.contains("after"));
}

#[wasm_bindgen_test]
fn test_text_line_breaks() {
    let ctx = context();
    let p = build_element(&ctx, &element(r#"{ "type": "TextElement", "text": "one\ntwo" }"#)).unwrap();
    assert_eq!(p.tag_name(), "P");
    assert_eq!(p.query_selector_all("br").unwrap().length(), 1);
}

#[wasm_bindgen_test]
fn test_numbered_list_dom() {
    let ctx = context();
    let list = build_element(
        &ctx,
        &element(r#"{ "type": "ListElement", "text": "a\n b \n\nc", "styleName": "numberList", "startIndex": 5 }"#),
    )
    .unwrap();

    assert_eq!(list.tag_name(), "OL");
    assert_eq!(list.get_attribute("start").as_deref(), Some("5"));
    let items = list.query_selector_all("li").unwrap();
    assert_eq!(items.length(), 3);
    assert_eq!(items.item(1).unwrap().text_content().as_deref(), Some("b"));
}

#[wasm_bindgen_test]
fn test_grid_header_alternation_and_feature_column() {
    let ctx = context();
    let table = build_element(
        &ctx,
        &element(
            r#"{ "type": "GridElement",
                 "content": [["H1", "H2"], ["a", "b"], ["c", "d"]],
                 "isFirstRowHeader": true,
                 "alternateRowColor": true,
                 "featureColumn": 0 }"#,
        ),
    )
    .unwrap();

    assert_eq!(table.query_selector_all("thead th").unwrap().length(), 2);
    let rows = table.query_selector_all("tbody tr").unwrap();
    assert_eq!(rows.length(), 2);
    assert!(table.query_selector("tbody tr:nth-child(2).alt-row").unwrap().is_some());
    assert!(table.query_selector("tbody tr:nth-child(1).alt-row").unwrap().is_none());
    assert_eq!(table.query_selector_all("td.feature-column").unwrap().length(), 2);
}

#[wasm_bindgen_test]
fn test_direct_media_activates_once() {
    let ctx = context();
    let host = mount("video-host", "");
    let wrapper = build_element(
        &ctx,
        &element(r#"{ "type": "VideoElement", "url": "https://cdn.example.com/clip.mp4" }"#),
    )
    .unwrap();
    host.append_child(&wrapper).unwrap();

    let placeholder: HtmlElement = wrapper
        .query_selector(".video-placeholder")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    placeholder.click();
    placeholder.click();

    assert_eq!(wrapper.query_selector_all("video").unwrap().length(), 1);
    assert!(wrapper.query_selector(".video-placeholder").unwrap().is_none());
    let source = wrapper.query_selector("video source").unwrap().unwrap();
    assert_eq!(source.get_attribute("type").as_deref(), Some("video/mp4"));
}

#[wasm_bindgen_test]
fn test_info_box_without_anchor_uses_container() {
    let ctx = context();
    let container = mount("info-host", "position: relative; width: 400px; height: 300px;");
    let trigger = build_element(
        &ctx,
        &element(r#"{ "type": "InfoBoxElement", "x": 10, "y": 20, "anchor": "auto-prev" }"#),
    )
    .unwrap();
    container.append_child(&trigger).unwrap();

    let placed = apply_position(&trigger, AnchorMode::AutoPrev, Point { x: 10.0, y: 20.0 });
    assert_eq!(placed, Some(Point { x: 10.0, y: 20.0 }));
    assert_eq!(trigger.style().get_property_value("left").unwrap(), "10px");
    assert_eq!(trigger.style().get_property_value("top").unwrap(), "20px");

    // Offsets past the edge are clamped inside the container
    let placed = apply_position(&trigger, AnchorMode::Container, Point { x: 5000.0, y: -40.0 }).unwrap();
    assert_eq!(placed.x, 400.0 - f64::from(trigger.offset_width()));
    assert_eq!(placed.y, 0.0);
}

#[wasm_bindgen_test]
fn test_info_box_follows_preceding_sibling() {
    let ctx = context();
    let container = mount("anchor-host", "position: relative; width: 400px; padding-top: 30px;");
    let anchor = mount("anchor-block", "height: 100px;");
    container.append_child(&anchor).unwrap();
    let trigger = build_element(&ctx, &element(r#"{ "type": "InfoBoxElement", "x": 15, "y": 5 }"#)).unwrap();
    container.append_child(&trigger).unwrap();

    let placed = apply_position(&trigger, AnchorMode::AutoPrev, Point { x: 15.0, y: 5.0 }).unwrap();
    assert_eq!(placed, Point { x: 15.0, y: 35.0 });
}

#[wasm_bindgen_test]
fn test_provider_api_promise_is_shared() {
    let first = ProviderApi::shared("data:text/javascript,void 0").ready();
    let second = ProviderApi::shared("ignored-after-first").ready();
    assert!(js_sys::Object::is(&first, &second));
}

#[wasm_bindgen_test]
fn test_navigation_button_state_and_menu_marker() {
    mount("nav-content", "");
    mount("nav-menu", "");
    for id in ["nav-prev", "nav-next"] {
        let button = document().create_element("button").unwrap();
        button.set_id(id);
        document().body().unwrap().append_child(&button).unwrap();
    }
    let config = js_sys::JSON::parse(
        r#"{ "contentId": "nav-content", "menuId": "nav-menu",
             "prevButtonId": "nav-prev", "nextButtonId": "nav-next",
             "titleId": "", "subtitleId": "", "audioId": "" }"#,
    )
    .unwrap();
    let course = js_sys::JSON::parse(
        r#"{ "items": [
               { "type": "Slide", "id": "n1", "title": "One",
                 "elements": [{ "type": "TextElement", "text": "first" }] },
               { "type": "Slide", "id": "n2", "title": "Two",
                 "elements": [{ "type": "TextElement", "text": "second" }] }
           ] }"#,
    )
    .unwrap();

    let viewer = CourseViewer::new(config).unwrap();
    viewer.set_course(course).unwrap();

    let button = |id: &str| -> HtmlButtonElement {
        document().get_element_by_id(id).unwrap().dyn_into().unwrap()
    };
    let active_id = || {
        document()
            .query_selector("#nav-menu li.active")
            .unwrap()
            .and_then(|li| li.get_attribute("data-slide-id"))
    };

    assert_eq!(viewer.current_slide_id().as_deref(), Some("n1"));
    assert!(button("nav-prev").disabled());
    assert!(!button("nav-next").disabled());
    assert_eq!(active_id().as_deref(), Some("n1"));

    assert!(viewer.next().unwrap());
    assert!(!button("nav-prev").disabled());
    assert!(button("nav-next").disabled());
    assert_eq!(active_id().as_deref(), Some("n2"));
    assert!(document().get_element_by_id("nav-content").unwrap().text_content().unwrap().contains("second"));

    assert!(!viewer.next().unwrap());
    assert!(viewer.prev().unwrap());
    assert!(button("nav-prev").disabled());
    assert_eq!(active_id().as_deref(), Some("n1"));

    viewer.dispose();
}

#[wasm_bindgen_test]
fn test_info_box_in_scrolled_container() {
    let ctx = context();
    let container = mount(
        "scroll-host",
        "position: relative; width: 400px; height: 100px; overflow: auto;",
    );
    let spacer = mount("scroll-spacer", "height: 300px;");
    container.append_child(&spacer).unwrap();
    let anchor = mount("scroll-anchor", "height: 50px;");
    container.append_child(&anchor).unwrap();
    let trigger = build_element(&ctx, &element(r#"{ "type": "InfoBoxElement", "x": 15, "y": 5 }"#)).unwrap();
    container.append_child(&trigger).unwrap();

    container.set_scroll_top(120);
    assert_eq!(container.scroll_top(), 120);

    // Same spot as unscrolled: offsets are in content coordinates
    let placed = apply_position(&trigger, AnchorMode::AutoPrev, Point { x: 15.0, y: 5.0 }).unwrap();
    assert_eq!(placed, Point { x: 15.0, y: 305.0 });

    // Clamped against the scrollable extent, not the 100px visible box
    let placed = apply_position(&trigger, AnchorMode::Container, Point { x: 0.0, y: 9000.0 }).unwrap();
    assert_eq!(placed.y, 350.0 - f64::from(trigger.offset_height()));
}

#[wasm_bindgen_test]
fn test_attach_positions_static_content_container() {
    let content = mount("positioned-content", "");
    let config = ViewerConfig {
        content_id: "positioned-content".to_string(),
        ..ViewerConfig::default()
    };
    let _ctx = RenderContext::attach(config).unwrap();
    assert_eq!(content.style().get_property_value("position").unwrap(), "relative");

    // A host-chosen position is left alone
    let placed = mount("placed-content", "position: absolute;");
    let config = ViewerConfig {
        content_id: "placed-content".to_string(),
        ..ViewerConfig::default()
    };
    let _ctx = RenderContext::attach(config).unwrap();
    assert_eq!(placed.style().get_property_value("position").unwrap(), "absolute");
}

#[wasm_bindgen_test]
fn test_info_box_trigger_is_positioned_against_content() {
    let content = mount("offset-content", "");
    let config = ViewerConfig {
        content_id: "offset-content".to_string(),
        ..ViewerConfig::default()
    };
    let ctx = RenderContext::attach(config).unwrap();
    render_slide(
        &ctx,
        &slide(r#"{ "id": "o1", "elements": [{ "type": "InfoBoxElement", "x": 4, "y": 4 }] }"#),
    )
    .unwrap();

    let trigger: HtmlElement = content
        .query_selector(".info-box-trigger")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let parent: web_sys::Element = content.clone().into();
    assert_eq!(trigger.offset_parent(), Some(parent));
}

#[wasm_bindgen_test]
fn test_embedded_video_shell_released_on_rerender() {
    let content = mount("teardown-content", "");
    let config = ViewerConfig {
        content_id: "teardown-content".to_string(),
        ..ViewerConfig::default()
    };
    let ctx = RenderContext::attach(config).unwrap();

    render_slide(
        &ctx,
        &slide(r#"{ "id": "v1", "elements": [{ "type": "VideoElement", "url": "https://youtu.be/abc123" }] }"#),
    )
    .unwrap();
    placeholder_in(&content).click();

    assert!(content.query_selector(".video-placeholder").unwrap().is_none());
    let shell = content.query_selector(".video-embed").unwrap().unwrap();
    assert!(shell.query_selector(".video-controls").unwrap().is_some());
    let frame: HtmlElement = shell.query_selector(".video-frame").unwrap().unwrap().dyn_into().unwrap();
    assert_eq!(frame.style().get_property_value("aspect-ratio").unwrap(), "16 / 9");
    assert!(frame
        .style()
        .get_property_value("max-width")
        .unwrap()
        .contains("var(--content-height)"));
    assert!(ctx.pending_cleanups() > 0);

    render_slide(&ctx, &slide(r#"{ "id": "v2", "elements": [] }"#)).unwrap();
    assert!(content.query_selector(".video-embed").unwrap().is_none());
    assert_eq!(ctx.pending_cleanups(), 0);
}

#[wasm_bindgen_test]
async fn test_removed_info_box_releases_its_observers() {
    let ctx = context();
    let container = mount("removal-host", "position: relative; width: 200px; height: 100px;");
    let trigger = build_element(&ctx, &element(r#"{ "type": "InfoBoxElement", "x": 0, "y": 0 }"#)).unwrap();

    container.append_child(&trigger).unwrap();
    settle().await;
    assert_eq!(ctx.pending_cleanups(), 1);

    // Removed outside any render pass
    trigger.remove();
    settle().await;
    assert_eq!(ctx.pending_cleanups(), 0);
}

#[wasm_bindgen_test]
fn test_external_video_keeps_placeholder() {
    let ctx = context();
    let host = mount("external-host", "");
    let url = "https://example.com/lectures/intro";
    let wrapper = build_element(
        &ctx,
        &element(&format!(r#"{{ "type": "VideoElement", "url": "{}" }}"#, url)),
    )
    .unwrap();
    host.append_child(&wrapper).unwrap();
    let placeholder = placeholder_in(&wrapper);

    let phase = activate(&ctx, &placeholder, url).unwrap();

    assert_eq!(phase, VideoPhase::OpenedExternally);
    assert!(placeholder.is_connected());
    assert!(wrapper.query_selector("video").unwrap().is_none());
    assert!(wrapper.query_selector(".video-embed").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_keyboard_activation_shares_guard_with_click() {
    let ctx = context();
    let host = mount("keyboard-host", "");
    let wrapper = build_element(
        &ctx,
        &element(r#"{ "type": "VideoElement", "url": "https://cdn.example.com/lesson.webm" }"#),
    )
    .unwrap();
    host.append_child(&wrapper).unwrap();
    let placeholder = placeholder_in(&wrapper);

    let press = |key: &str| {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        placeholder.dispatch_event(&event).unwrap()
    };

    // Unrelated keys pass through untouched
    assert!(press("Tab"));
    assert!(wrapper.query_selector("video").unwrap().is_none());

    assert!(!press("Enter"));
    press(" ");
    placeholder.click();

    assert_eq!(wrapper.query_selector_all("video").unwrap().length(), 1);
    assert!(wrapper.query_selector(".video-placeholder").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_height_requests_share_one_frame() {
    let content = mount("frame-content", "height: 240px;");
    let config = ViewerConfig {
        content_id: "frame-content".to_string(),
        ..ViewerConfig::default()
    };
    let ctx = RenderContext::attach(config).unwrap();
    let height = ctx.height().unwrap();
    assert_eq!(height.current(), Some(content.client_height()));

    assert!(!height.is_frame_pending());
    ctx.request_height_recalc();
    ctx.request_height_recalc();
    assert!(height.is_frame_pending());
}
