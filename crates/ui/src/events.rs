//! Wires DOM events to the tracker.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `Closure::forget`.

use std::rc::Rc;

use services::{Dialogs, Initialized, ProgressTracker, TrackerError};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlButtonElement, HtmlInputElement};

use crate::page::WebPage;

pub type WebTracker = ProgressTracker<WebPage>;

/// Route `change` events of `checkbox` through [`ProgressTracker::toggle`].
///
/// A storage failure inside the handler is rethrown to the browser as an
/// uncaught error.
///
/// # Errors
///
/// Returns the `JsValue` raised by `addEventListener`.
pub fn bind_checkbox(tracker: &Rc<WebTracker>, checkbox: &HtmlInputElement) -> Result<(), JsValue> {
    let tracker = Rc::clone(tracker);
    let target = checkbox.clone();
    let handler = Closure::<dyn FnMut(Event) -> Result<(), JsValue>>::new(move |_: Event| {
        let outcome = tracker.toggle(&target).map_err(to_js)?;
        debug!(?outcome, "checkbox change handled");
        Ok(())
    });
    checkbox.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Route clicks on the reset control through [`ProgressTracker::reset`].
///
/// # Errors
///
/// Returns the `JsValue` raised by `addEventListener`.
pub fn bind_reset(
    tracker: &Rc<WebTracker>,
    control: &HtmlButtonElement,
    dialogs: Rc<dyn Dialogs>,
) -> Result<(), JsValue> {
    let tracker = Rc::clone(tracker);
    let handler = Closure::<dyn FnMut(Event) -> Result<(), JsValue>>::new(move |_: Event| {
        tracker.reset(dialogs.as_ref()).map_err(to_js)?;
        Ok(())
    });
    control.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Bind every checkbox created during initialization and the reset control.
///
/// # Errors
///
/// Returns the first `JsValue` raised while registering a listener.
pub fn bind_initialized(
    tracker: &Rc<WebTracker>,
    initialized: &Initialized<WebPage>,
    dialogs: Rc<dyn Dialogs>,
) -> Result<(), JsValue> {
    for checkbox in &initialized.annotation.inserted {
        bind_checkbox(tracker, checkbox)?;
    }
    if let Some(control) = &initialized.reset_control {
        bind_reset(tracker, control, dialogs)?;
    }
    Ok(())
}

fn to_js(err: TrackerError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
