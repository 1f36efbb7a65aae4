use tracker_core::model::Progress;

use crate::page::Page;
use crate::tracker::ProgressTracker;

/// Progress of one section that has at least one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionProgress {
    pub progress: Progress,
    /// False when the section had no place to attach an indicator.
    pub displayed: bool,
}

/// Aggregated view of a recomputation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    /// Sections with at least one checkbox, in document order.
    pub sections: Vec<SectionProgress>,
    pub overall: Progress,
}

impl<P: Page> ProgressTracker<P> {
    /// Recount every section from live checkbox state, render or update its
    /// indicator, and write overall progress into the document title.
    pub fn recompute(&self) -> ProgressReport {
        let mut sections = Vec::new();

        for section in self.page.sections() {
            let progress = self.tally(&self.page.section_checkboxes(&section));
            if progress.is_empty() {
                continue;
            }

            let indicator = self
                .page
                .find_indicator(&section)
                .or_else(|| self.page.attach_indicator(&section));
            if let Some(indicator) = &indicator {
                self.page.update_indicator(indicator, progress);
            }
            sections.push(SectionProgress {
                progress,
                displayed: indicator.is_some(),
            });
        }

        let overall = self.tally(&self.page.all_checkboxes());
        self.page
            .set_title(&self.config.render_title(overall.percentage()));

        ProgressReport { sections, overall }
    }

    fn tally(&self, checkboxes: &[P::Checkbox]) -> Progress {
        Progress::tally(checkboxes.iter().map(|cb| self.page.is_checked(cb)))
    }
}
