use tracing::debug;
use tracker_core::model::ResourceId;

use crate::error::TrackerError;
use crate::page::Page;
use crate::progress::ProgressReport;
use crate::tracker::ProgressTracker;

/// What a checkbox change did to the completion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Completed {
        id: ResourceId,
        progress: ProgressReport,
    },
    Reopened {
        id: ResourceId,
        progress: ProgressReport,
    },
    /// The checkbox is not inside an identifiable row.
    Detached,
}

impl<P: Page> ProgressTracker<P> {
    /// Apply a checkbox change: persist the row's new state, update its
    /// completed marker, and recompute all progress indicators.
    ///
    /// The marker is only touched once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the completion set cannot be read or
    /// written.
    pub fn toggle(&self, checkbox: &P::Checkbox) -> Result<ToggleOutcome, TrackerError> {
        let Some(row) = self.page.owning_row(checkbox) else {
            debug!("checkbox outside any row");
            return Ok(ToggleOutcome::Detached);
        };
        let Some(id) = self.resource_id(&row) else {
            return Ok(ToggleOutcome::Detached);
        };

        let checked = self.page.is_checked(checkbox);
        let mut completed = self.completions.load()?;
        completed.set(id.clone(), checked);
        self.completions.save(&completed)?;
        self.page.set_completed(&row, checked);
        debug!(resource = %id, checked, "resource toggled");

        let progress = self.recompute();
        Ok(if checked {
            ToggleOutcome::Completed { id, progress }
        } else {
            ToggleOutcome::Reopened { id, progress }
        })
    }
}
