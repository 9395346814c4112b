pub mod canvas;
pub mod frame_loop;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use eco_field::{FieldError, FieldStyle, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub use canvas::CanvasSurface;
pub use frame_loop::{AnimationLoop, ResizeListener};
pub use runner::{FieldRunner, FieldState};

/// A field attached to a page canvas: runner, frame loop and resize listener.
///
/// Dropping it (or calling `unmount`) cancels the pending animation frame and
/// removes the resize listener, so nothing keeps drawing into a detached canvas.
pub struct MountedField<S: FieldStyle + 'static> {
    runner: Rc<RefCell<FieldRunner<S>>>,
    frames: AnimationLoop,
    resize: Option<ResizeListener>,
}

impl<S: FieldStyle + 'static> MountedField<S> {
    /// Size the canvas to the viewport, populate the field and start animating.
    ///
    /// A canvas without a 2D context still mounts; drawing becomes a no-op.
    pub fn mount(style: S, canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into()?;

        place_behind_content(&canvas);

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if context.is_none() {
            log::debug!("canvas '{}' has no 2d context; drawing disabled", canvas_id);
        }
        let mut surface = context.map(CanvasSurface::new);

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let runner = Rc::new(RefCell::new(FieldRunner::new(style, seed)));

        let (w, h) = fit_to_viewport(&window, &canvas);
        runner.borrow_mut().resize(w, h);

        let resize = {
            let runner = runner.clone();
            let window_inner = window.clone();
            let canvas = canvas.clone();
            ResizeListener::attach(&window, move || {
                let (w, h) = fit_to_viewport(&window_inner, &canvas);
                runner.borrow_mut().resize(w, h);
            })?
        };

        let frames = {
            let runner = runner.clone();
            AnimationLoop::start(&window, move |timestamp| {
                let surface = surface.as_mut().map(|s| s as &mut dyn Surface);
                runner.borrow_mut().frame_at(timestamp, surface)
            })?
        };

        Ok(Self {
            runner,
            frames,
            resize: Some(resize),
        })
    }

    pub fn particle_count(&self) -> u32 {
        self.runner.borrow().particle_count()
    }

    pub fn frame_count(&self) -> u64 {
        self.runner.borrow().frame_count()
    }

    /// Bumped every time the entity set is regenerated (resize or configure).
    pub fn generation(&self) -> u32 {
        self.runner.borrow().field().generation()
    }

    pub fn configure(&self, json: &str) -> Result<(), FieldError> {
        self.runner.borrow_mut().configure(json)
    }

    pub fn is_animating(&self) -> bool {
        self.runner.borrow().is_running() && self.frames.is_scheduled()
    }

    /// Whether the window `resize` listener is still registered.
    pub fn is_listening(&self) -> bool {
        self.resize.is_some()
    }

    /// Stop the runner, cancel the frame request and remove the resize listener.
    /// Idempotent.
    pub fn unmount(&mut self) {
        self.runner.borrow_mut().stop();
        self.frames.cancel();
        // Dropping the listener unregisters it
        self.resize = None;
    }
}

/// Match the canvas backing store to the viewport. Returns the new size.
fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) -> (f32, f32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let w = dim(window.inner_width()).max(0.0);
    let h = dim(window.inner_height()).max(0.0);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w as f32, h as f32)
}

/// Full-viewport, non-interactive, behind all page content.
fn place_behind_content(canvas: &HtmlCanvasElement) {
    let style = canvas.style();
    for (name, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("z-index", "-1"),
        ("pointer-events", "none"),
    ] {
        if let Err(err) = style.set_property(name, value) {
            log::debug!("could not set canvas style {}: {:?}", name, err);
        }
    }
}

/// Convert a field error into a JS exception value.
pub fn to_js_error(err: FieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Generate the `#[wasm_bindgen]` exports for one field style.
///
/// Generates:
/// - `thread_local!` storage for the mounted field
/// - `field_mount(canvas_id)`, `field_unmount()`, `field_configure(json)`,
///   `field_particle_count()`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use eco_field::CircleStyle;
///
/// eco_field_web::export_field!(CircleStyle, "particle-background");
/// ```
///
/// The style type must provide `fn new() -> Self`.
#[macro_export]
macro_rules! export_field {
    ($style:ty, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static FIELD: RefCell<Option<$crate::MountedField<$style>>> = RefCell::new(None);
        }

        #[wasm_bindgen]
        pub fn field_mount(canvas_id: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mounted = $crate::MountedField::mount(<$style>::new(), canvas_id)?;
            let count = mounted.particle_count();
            FIELD.with(|cell| {
                if let Some(mut previous) = cell.borrow_mut().replace(mounted) {
                    previous.unmount();
                }
            });
            log::info!("{}: mounted on '{}' with {} particles", $name, canvas_id, count);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn field_unmount() {
            FIELD.with(|cell| {
                if let Some(mut mounted) = cell.borrow_mut().take() {
                    mounted.unmount();
                    log::info!("{}: unmounted", $name);
                }
            });
        }

        #[wasm_bindgen]
        pub fn field_configure(json: &str) -> Result<(), JsValue> {
            FIELD.with(|cell| match cell.borrow().as_ref() {
                Some(mounted) => mounted.configure(json).map_err(|err| {
                    log::warn!("{}: config rejected: {}", $name, err);
                    $crate::to_js_error(err)
                }),
                None => Err(JsValue::from_str("field not mounted")),
            })
        }

        #[wasm_bindgen]
        pub fn field_particle_count() -> u32 {
            FIELD.with(|cell| cell.borrow().as_ref().map_or(0, |m| m.particle_count()))
        }
    };
}
