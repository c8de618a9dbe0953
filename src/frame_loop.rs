// A requestAnimationFrame loop with an explicit stop.
//
// The callback closure lives in an `Rc<RefCell<Option<..>>>` so it can hand a
// reference to itself back to `request_animation_frame` each frame. Stopping
// flips the shared token, cancels the pending frame and drops the closure,
// which breaks the Rc cycle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Shared stop flag. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    window: Window,
    token: CancellationToken,
    pending: Rc<Cell<Option<i32>>>,
    in_frame: Rc<Cell<bool>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Calls `on_frame` with the frame timestamp once per display refresh until
    /// the loop is stopped or `token` is cancelled.
    pub fn start<F>(window: &Window, token: CancellationToken, mut on_frame: F) -> Result<FrameLoop, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let pending = Rc::new(Cell::new(None));
        let in_frame = Rc::new(Cell::new(false));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let self_ref = callback.clone();
        let frame_window = window.clone();
        let frame_token = token.clone();
        let frame_pending = pending.clone();
        let frame_in_frame = in_frame.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            frame_pending.set(None);
            if frame_token.is_cancelled() {
                // Drop ourselves; nothing else holds a reference to the loop now.
                let _ = self_ref.borrow_mut().take();
                return;
            }

            frame_in_frame.set(true);
            on_frame(timestamp);
            frame_in_frame.set(false);

            if frame_token.is_cancelled() {
                let _ = self_ref.borrow_mut().take();
                return;
            }
            let next = match self_ref.borrow().as_ref() {
                Some(closure) => frame_window.request_animation_frame(closure.as_ref().unchecked_ref()),
                None => return,
            };
            match next {
                Ok(handle) => frame_pending.set(Some(handle)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }) as Box<dyn FnMut(f64)>));

        let first = match callback.borrow().as_ref() {
            Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        pending.set(Some(first));

        Ok(FrameLoop {
            window: window.clone(),
            token,
            pending,
            in_frame,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn stop(&self) {
        self.token.cancel();
        if let Some(handle) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        // When called from inside `on_frame` the closure is still executing;
        // it releases itself once it returns.
        if !self.in_frame.get() {
            let _ = self.callback.borrow_mut().take();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_live() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn clones_share_cancellation() {
        let token = CancellationToken::new();
        let handle = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
