use std::rc::Rc;

use storage::repository::CompletionRepository;
use tracing::{debug, info};
use tracker_core::TrackerConfig;
use tracker_core::model::ResourceId;

use crate::annotator::Annotation;
use crate::error::TrackerError;
use crate::page::Page;
use crate::progress::ProgressReport;

/// Orchestrates row annotation, progress rendering, toggles and reset for
/// one document.
///
/// Holds no completion state of its own: every operation that needs the
/// completion set loads it from the repository.
pub struct ProgressTracker<P> {
    pub(crate) page: P,
    pub(crate) completions: Rc<dyn CompletionRepository>,
    pub(crate) config: Rc<TrackerConfig>,
}

/// Everything produced by the one-time initialization pass.
pub struct Initialized<P: Page> {
    pub annotation: Annotation<P::Checkbox>,
    pub progress: ProgressReport,
    pub reset_control: Option<P::Control>,
}

impl<P: Page> ProgressTracker<P> {
    #[must_use]
    pub fn new(
        page: P,
        completions: Rc<dyn CompletionRepository>,
        config: Rc<TrackerConfig>,
    ) -> Self {
        Self {
            page,
            completions,
            config,
        }
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Annotate rows, render initial progress, then install the reset control.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the completion set cannot be read.
    pub fn initialize(&self) -> Result<Initialized<P>, TrackerError> {
        let annotation = self.annotate_rows()?;
        let progress = self.recompute();
        let reset_control = self.install_reset_control();

        info!(
            annotated = annotation.inserted.len(),
            skipped = annotation.skipped,
            sections = progress.sections.len(),
            overall = %progress.overall,
            reset_control = reset_control.is_some(),
            "resource tracker initialized"
        );

        Ok(Initialized {
            annotation,
            progress,
            reset_control,
        })
    }

    /// Validated identifier of `row`, or `None` when the row has no usable id.
    pub(crate) fn resource_id(&self, row: &P::Row) -> Option<ResourceId> {
        let raw = self.page.row_id(row)?;
        match ResourceId::new(raw) {
            Ok(id) => Some(id),
            Err(err) => {
                debug!(error = %err, "row has no usable id");
                None
            }
        }
    }
}
