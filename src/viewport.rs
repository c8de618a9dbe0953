// Keeps the canvas backing store the same size as the window's inner area.

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, Window};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }

    /// Reads `innerWidth`/`innerHeight` off the window.
    pub fn of_window(window: &Window) -> Result<Self, JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        Ok(Viewport::new(width.max(0.0) as u32, height.max(0.0) as u32))
    }
}

/// Anything whose pixel dimensions can be set, i.e. a canvas.
pub trait PixelSurface {
    fn set_pixel_size(&self, width: u32, height: u32);
    fn pixel_size(&self) -> (u32, u32);
}

impl PixelSurface for HtmlCanvasElement {
    fn set_pixel_size(&self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

pub struct ViewportSizer<S: PixelSurface> {
    surface: S,
    viewport: Viewport,
}

impl<S: PixelSurface> ViewportSizer<S> {
    pub fn new(surface: S) -> Self {
        let (width, height) = surface.pixel_size();
        ViewportSizer {
            surface,
            viewport: Viewport::new(width, height),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // Zero-sized windows are passed through untouched; the field just collapses
    // onto the origin until the next resize.
    pub fn sync(&mut self, width: u32, height: u32) -> Viewport {
        self.surface.set_pixel_size(width, height);
        self.viewport = Viewport::new(width, height);
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeCanvas {
        size: Cell<(u32, u32)>,
    }

    impl PixelSurface for FakeCanvas {
        fn set_pixel_size(&self, width: u32, height: u32) {
            self.size.set((width, height));
        }

        fn pixel_size(&self) -> (u32, u32) {
            self.size.get()
        }
    }

    #[test]
    fn starts_from_current_surface_size() {
        let canvas = FakeCanvas::default();
        canvas.size.set((300, 150));
        let sizer = ViewportSizer::new(canvas);
        assert_eq!(sizer.viewport(), Viewport::new(300, 150));
    }

    #[test]
    fn resize_sets_surface_to_window_size() {
        let mut sizer = ViewportSizer::new(FakeCanvas::default());
        sizer.sync(800, 600);
        let viewport = sizer.sync(1024, 768);

        assert_eq!(viewport, Viewport::new(1024, 768));
        assert_eq!(sizer.surface().pixel_size(), (1024, 768));
    }

    #[test]
    fn zero_sized_window_is_accepted() {
        let mut sizer = ViewportSizer::new(FakeCanvas::default());
        assert_eq!(sizer.sync(0, 0), Viewport::new(0, 0));
    }
}
