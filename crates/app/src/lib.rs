//! Resource progress tracker, browser entry point.
//!
//! Adds a completion checkbox to every resource row of the generated course
//! page, keeps completed rows in `localStorage`, shows per-section progress
//! bars and a reset button.
//!
//! ## Usage
//!
//! ```html
//! <script type="application/json" id="resource-tracker-config">
//!   { "storage_key": "ift3395_resources_tracker" }
//! </script>
//! <script type="module">
//!   import init from './pkg/app.js';
//!   await init();
//! </script>
//! ```
//!
//! ## Build
//!
//! ```bash
//! wasm-pack build crates/app --target web --out-dir pkg
//! ```

#![forbid(unsafe_code)]

pub mod boot;
pub mod config;
pub mod logging;

use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Module start hook, run once when the wasm module is instantiated.
///
/// # Errors
///
/// Returns a `JsValue` when there is no window or startup fails; the browser
/// reports it as an uncaught error.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    boot::launch(window)
}
