//! Document-readiness wiring for the tracker.

use std::rc::Rc;

use services::{BootStep, Bootstrapper, Dialogs, DocumentReadiness, ProgressTracker};
use storage::{CompletionStore, LocalStorage};
use tracing::{debug, error};
use ui::{WebPage, WindowDialogs, bind_initialized};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Event, Window};

use crate::{config, logging};

/// Start the tracker now if the document is parsed, otherwise once
/// `DOMContentLoaded` fires.
///
/// # Errors
///
/// Returns a `JsValue` when the document is unavailable, the readiness
/// listener cannot be registered, or initialization fails.
pub fn launch(window: Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let readiness = DocumentReadiness::parse(&document.ready_state());
    let (boot, step) = Bootstrapper::enter(readiness);

    match step {
        BootStep::Initialize => initialize(&window, &document),
        BootStep::Defer => {
            let doc = document.clone();
            let continuation = Closure::once(move |_: Event| -> Result<(), JsValue> {
                match boot.document_ready() {
                    BootStep::Initialize => initialize(&window, &doc),
                    BootStep::Defer | BootStep::Idle => Ok(()),
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                continuation.as_ref().unchecked_ref(),
                &options,
            )?;
            continuation.forget();
            Ok(())
        }
        BootStep::Idle => Ok(()),
    }
}

/// Ready-state entry: resolve config, start logging, annotate the page and
/// bind its controls.
fn initialize(window: &Window, document: &Document) -> Result<(), JsValue> {
    let (config, config_error) = match config::discover(document) {
        Ok(config) => (config, None),
        Err(err) => (Default::default(), Some(err)),
    };
    logging::init(logging::parse_level(&config.log_level));
    if let Some(err) = config_error {
        error!(error = %err, "invalid tracker config, using defaults");
    }
    debug!(storage_key = %config.storage_key, "tracker config resolved");

    let config = Rc::new(config);
    let store = LocalStorage::from_window(window).map_err(to_js)?;
    let completions = Rc::new(CompletionStore::new(store, config.storage_key.clone()));
    let page = WebPage::new(document.clone(), Rc::clone(&config));
    let tracker = Rc::new(ProgressTracker::new(page, completions, config));

    let initialized = tracker.initialize().map_err(to_js)?;
    let dialogs: Rc<dyn Dialogs> = Rc::new(WindowDialogs::new(window.clone()));
    bind_initialized(&tracker, &initialized, dialogs)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
