use services::Dialogs;
use tracing::warn;

/// `window.confirm` / `window.alert`.
#[derive(Clone)]
pub struct WindowDialogs {
    window: web_sys::Window,
}

impl WindowDialogs {
    #[must_use]
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Dialogs for WindowDialogs {
    fn confirm(&self, message: &str) -> bool {
        match self.window.confirm_with_message(message) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = ?err, "confirm dialog unavailable");
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = ?err, "alert dialog unavailable");
        }
    }
}
