use wasm_bindgen::JsValue;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Routes `log` macros to the browser console. Safe to call more than once.
pub fn init_logging() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already initialised");
    }
}

pub fn js_err(message: &str) -> JsValue {
    JsValue::from_str(message)
}
