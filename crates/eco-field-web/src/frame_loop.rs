//! Browser scheduling: a cancellable `requestAnimationFrame` loop and a
//! `resize` listener that unregisters itself.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling animation-frame loop.
///
/// The handle of the pending request is kept so `cancel` can withdraw it;
/// the callback stops rescheduling on its own once `on_frame` returns false.
pub struct AnimationLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    /// Start the loop. `on_frame` receives the frame timestamp in milliseconds
    /// and returns whether another frame should be scheduled.
    pub fn start(
        window: &Window,
        mut on_frame: impl FnMut(f64) -> bool + 'static,
    ) -> Result<Self, JsValue> {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        // The closure reschedules itself through `callback`, which forms an
        // Rc cycle; `cancel` breaks it by taking the closure out.
        let next = callback.clone();
        let pending = handle.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            pending.set(None);
            if !on_frame(timestamp) {
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match callback.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        handle.set(Some(id));

        Ok(Self {
            window: window.clone(),
            handle,
            callback,
        })
    }

    /// Whether a frame request is currently pending.
    pub fn is_scheduled(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Withdraw the pending frame request and release the callback. Idempotent.
    ///
    /// Must not be called from inside the frame callback itself.
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A `resize` listener on the window, removed when dropped.
pub struct ResizeListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn attach(window: &Window, on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            callback,
        })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {:?}", err);
        }
    }
}
