use tracing::info;

use crate::error::TrackerError;
use crate::page::{Dialogs, Page};
use crate::progress::ProgressReport;
use crate::tracker::ProgressTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user refused; nothing was touched.
    Declined,
    Cleared {
        unchecked: usize,
        progress: ProgressReport,
    },
}

impl<P: Page> ProgressTracker<P> {
    /// Attach the reset control to the page.
    pub fn install_reset_control(&self) -> Option<P::Control> {
        self.page
            .attach_reset_control(&self.config.reset.button_label)
    }

    /// Clear all progress after explicit confirmation.
    ///
    /// Removes the persisted entry, unchecks every checkbox and clears every
    /// completed marker in the document, then acknowledges to the user.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the stored entry cannot be removed;
    /// the page is left untouched in that case.
    pub fn reset(&self, dialogs: &dyn Dialogs) -> Result<ResetOutcome, TrackerError> {
        if !dialogs.confirm(&self.config.reset.confirm_message) {
            return Ok(ResetOutcome::Declined);
        }

        self.completions.clear()?;

        let mut unchecked = 0;
        for checkbox in self.page.all_checkboxes() {
            if self.page.is_checked(&checkbox) {
                unchecked += 1;
            }
            self.page.set_checked(&checkbox, false);
        }
        for row in self.page.rows() {
            self.page.set_completed(&row, false);
        }

        let progress = self.recompute();
        info!(unchecked, "progress reset");
        dialogs.notify(&self.config.reset.done_message);

        Ok(ResetOutcome::Cleared {
            unchecked,
            progress,
        })
    }
}
