//! Mount and unmount against a real page. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use eco_field::CircleStyle;
use eco_field_web::MountedField;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn dispatch_resize() {
    let window = web_sys::window().unwrap();
    let event = Event::new("resize").unwrap();
    window.dispatch_event(&event).unwrap();
}

/// Resolve after `ms` milliseconds, giving pending animation frames a chance to run.
async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn mount_fails_without_canvas() {
    let result = MountedField::mount(CircleStyle::new(), "no-such-canvas");
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn resize_event_regenerates_while_mounted() {
    add_canvas("field-resize");
    let mut mounted = MountedField::mount(CircleStyle::new(), "field-resize").unwrap();
    assert!(mounted.is_animating());
    assert!(mounted.is_listening());

    let generation = mounted.generation();
    dispatch_resize();
    assert_eq!(mounted.generation(), generation + 1);

    mounted.unmount();
}

#[wasm_bindgen_test]
async fn unmount_stops_frames_and_resize_handling() {
    add_canvas("field-teardown");
    let mut mounted = MountedField::mount(CircleStyle::new(), "field-teardown").unwrap();
    assert!(mounted.is_animating());

    mounted.unmount();
    assert!(!mounted.is_animating());
    assert!(!mounted.is_listening());

    let count = mounted.particle_count();
    let generation = mounted.generation();
    let frames = mounted.frame_count();

    dispatch_resize();
    sleep(100).await;

    assert_eq!(mounted.particle_count(), count);
    assert_eq!(mounted.generation(), generation);
    assert_eq!(mounted.frame_count(), frames);

    // Second unmount is a no-op
    mounted.unmount();
    assert!(!mounted.is_animating());
}

#[wasm_bindgen_test]
fn configure_after_mount_applies_overrides() {
    add_canvas("field-configure");
    let mut mounted = MountedField::mount(CircleStyle::new(), "field-configure").unwrap();
    mounted.configure(r#"{"max_count": 7, "spacing_factor": 1}"#).unwrap();
    assert_eq!(mounted.particle_count(), 7);
    assert!(mounted.configure(r#"{"max_count": 5000}"#).is_err());
    let err: JsValue = eco_field_web::to_js_error(mounted.configure("{broken").unwrap_err());
    assert!(err.as_string().is_some());
    mounted.unmount();
}
