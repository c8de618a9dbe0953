// Decorative particle background and locale toggle for the landing page.
//
// JS side:
//   import init, { mount_background, LanguageSwitcher } from './pkg/glowfield.js';
//   await init();
//   const background = mount_background('canvas-background');
//   const language = new LanguageSwitcher();

extern crate nalgebra_glm as glm;

pub mod color;
pub mod config;
pub mod field;
pub mod frame_loop;
pub mod i18n;
pub mod particle;
pub mod renderer;
mod utils;
pub mod viewport;

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::frame_loop::{CancellationToken, FrameLoop};
use crate::i18n::{BrowserDocument, BrowserStore, Locale, LocaleSwitcher};
use crate::viewport::{Viewport, ViewportSizer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub const DEFAULT_CANVAS_ID: &str = "canvas-background";

#[wasm_bindgen(start)]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
}

/// Builds and starts the background on `canvas_id`. Returns `None` (after
/// logging why) when the canvas or its 2D context is unavailable, leaving the
/// page without an animation.
#[wasm_bindgen]
pub fn mount_background(canvas_id: &str) -> Option<ParticleBackground> {
    let started = ParticleBackground::new(canvas_id).and_then(|mut background| {
        background.start()?;
        Ok(background)
    });
    match started {
        Ok(background) => Some(background),
        Err(e) => {
            log::warn!("particle background disabled: {:?}", e);
            None
        }
    }
}

struct Scene {
    sizer: ViewportSizer<HtmlCanvasElement>,
    context: CanvasRenderingContext2d,
    field: ParticleField,
}

#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    frame_loop: Option<FrameLoop>,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        Self::build(canvas_id, FieldConfig::default(), StdRng::from_entropy())
    }

    /// Same as `new` but with a reproducible particle layout.
    pub fn with_seed(canvas_id: &str, seed: u32) -> Result<ParticleBackground, JsValue> {
        Self::build(canvas_id, FieldConfig::default(), StdRng::seed_from_u64(seed as u64))
    }

    /// Starts the frame loop and begins tracking window resizes. No-op if already running.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }

        let scene = self.scene.clone();
        let window = self.window.clone();
        let on_resize = Closure::wrap(Box::new(move || match Viewport::of_window(&window) {
            Ok(viewport) => scene.borrow_mut().resize(viewport),
            Err(e) => log::error!("could not read window size: {:?}", e),
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        self.resize_listener = Some(on_resize);

        let scene = self.scene.clone();
        let frame_loop = FrameLoop::start(&self.window, CancellationToken::new(), move |_| {
            if let Err(e) = scene.borrow_mut().draw_frame() {
                log::error!("frame failed: {:?}", e);
            }
        })?;
        self.frame_loop = Some(frame_loop);
        log::info!("particle background started");
        Ok(())
    }

    /// Stops the frame loop and detaches the resize listener. The last frame stays on screen.
    pub fn stop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        if let Some(on_resize) = self.resize_listener.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                log::warn!("could not detach resize listener: {:?}", e);
            }
        }
        log::info!("particle background stopped");
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.as_ref().map_or(false, FrameLoop::is_running)
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.particles().len()
    }

    pub fn width(&self) -> u32 {
        self.scene.borrow().sizer.viewport().width
    }

    pub fn height(&self) -> u32 {
        self.scene.borrow().sizer.viewport().height
    }

    /// Re-reads the window size, as a `resize` event would.
    pub fn resize(&self) -> Result<(), JsValue> {
        let viewport = Viewport::of_window(&self.window)?;
        self.scene.borrow_mut().resize(viewport);
        Ok(())
    }
}

impl ParticleBackground {
    pub fn build(canvas_id: &str, config: FieldConfig, mut rng: StdRng) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| utils::js_err("missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| utils::js_err("missing document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| utils::js_err(&format!("missing #{} element", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| utils::js_err("2d canvas context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut sizer = ViewportSizer::new(canvas);
        let window_size = Viewport::of_window(&window)?;
        let viewport = sizer.sync(window_size.width, window_size.height);
        let field = ParticleField::initialize(config, viewport, &mut rng);
        log::info!(
            "spawned {} particles in {}x{}",
            field.particles().len(),
            viewport.width,
            viewport.height
        );

        Ok(ParticleBackground {
            window,
            scene: Rc::new(RefCell::new(Scene {
                sizer,
                context,
                field,
            })),
            frame_loop: None,
            resize_listener: None,
        })
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        if self.frame_loop.is_some() || self.resize_listener.is_some() {
            self.stop();
        }
    }
}

impl Scene {
    fn resize(&mut self, viewport: Viewport) {
        let viewport = self.sizer.sync(viewport.width, viewport.height);
        self.field.resize(viewport);
        log::debug!("canvas resized to {}x{}", viewport.width, viewport.height);
    }

    fn draw_frame(&mut self) -> Result<(), JsValue> {
        self.field.tick(&mut self.context)
    }
}

/// Page-level handle to the locale switcher. Applies the stored locale on
/// construction and flips it whenever `#lang-toggle` is clicked.
#[wasm_bindgen]
pub struct LanguageSwitcher {
    switcher: Rc<RefCell<LocaleSwitcher<BrowserStore, BrowserDocument>>>,
    click_listener: Option<(web_sys::Element, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl LanguageSwitcher {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LanguageSwitcher, JsValue> {
        let window = web_sys::window().ok_or_else(|| utils::js_err("missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| utils::js_err("missing document"))?;
        let storage = window.local_storage().ok().flatten();

        let mut switcher = LocaleSwitcher::new(BrowserStore::new(storage), BrowserDocument::new(document.clone()));
        switcher.apply()?;
        let switcher = Rc::new(RefCell::new(switcher));

        let click_listener = match document.get_element_by_id(i18n::TOGGLE_ID) {
            Some(toggle) => {
                let handle = switcher.clone();
                let on_click = Closure::wrap(Box::new(move || {
                    if let Err(e) = handle.borrow_mut().toggle_language() {
                        log::error!("could not switch language: {:?}", e);
                    }
                }) as Box<dyn FnMut()>);
                toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                Some((toggle, on_click))
            }
            None => {
                log::warn!("no #{} button on the page", i18n::TOGGLE_ID);
                None
            }
        };

        Ok(LanguageSwitcher {
            switcher,
            click_listener,
        })
    }

    /// Switches to `code` ("en" or "ko"). Unknown codes are rejected.
    pub fn set_language(&self, code: &str) -> Result<(), JsValue> {
        let locale = Locale::from_code(code)
            .ok_or_else(|| utils::js_err(&format!("unsupported locale {:?}", code)))?;
        self.switcher.borrow_mut().set_language(locale)
    }

    pub fn toggle_language(&self) -> Result<(), JsValue> {
        self.switcher.borrow_mut().toggle_language()
    }

    pub fn current(&self) -> String {
        self.switcher.borrow().current().code().to_owned()
    }
}

impl Drop for LanguageSwitcher {
    fn drop(&mut self) {
        if let Some((toggle, on_click)) = self.click_listener.take() {
            if let Err(e) =
                toggle.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                log::warn!("could not detach language toggle listener: {:?}", e);
            }
        }
    }
}
