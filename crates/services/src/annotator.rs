use tracing::debug;

use crate::error::TrackerError;
use crate::page::Page;
use crate::tracker::ProgressTracker;

/// Result of one annotation pass.
#[derive(Debug)]
pub struct Annotation<C> {
    /// Checkboxes created by this pass. Callers bind change handlers to these.
    pub inserted: Vec<C>,
    /// Rows that already carried a tracker checkbox.
    pub already_annotated: usize,
    /// Rows without a usable id or insertion point.
    pub skipped: usize,
}

impl<P: Page> ProgressTracker<P> {
    /// Inject one checkbox per row that lacks one, restoring checked state and
    /// the completed marker from the persisted completion set.
    ///
    /// Running it again over annotated rows changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the completion set cannot be read.
    pub fn annotate_rows(&self) -> Result<Annotation<P::Checkbox>, TrackerError> {
        let completed = self.completions.load()?;
        let mut annotation = Annotation {
            inserted: Vec::new(),
            already_annotated: 0,
            skipped: 0,
        };

        for row in self.page.rows() {
            let Some(id) = self.resource_id(&row) else {
                annotation.skipped += 1;
                continue;
            };
            if self.page.row_checkbox(&row).is_some() {
                annotation.already_annotated += 1;
                continue;
            }

            let done = completed.is_completed(&id);
            match self.page.insert_checkbox(&row, &id.checkbox_id(), done) {
                Some(checkbox) => {
                    if done {
                        self.page.set_completed(&row, true);
                    }
                    annotation.inserted.push(checkbox);
                }
                None => {
                    debug!(resource = %id, "row has no insertion point");
                    annotation.skipped += 1;
                }
            }
        }

        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use storage::kv::{InMemoryStore, KeyValueStore};
    use storage::repository::CompletionStore;
    use tracker_core::TrackerConfig;

    use crate::memory::MemoryPage;
    use crate::tracker::ProgressTracker;

    fn tracker_with(page: &MemoryPage, stored: Option<&str>) -> ProgressTracker<MemoryPage> {
        let config = TrackerConfig::default();
        let store = InMemoryStore::new();
        if let Some(raw) = stored {
            store.set_item(&config.storage_key, raw).unwrap();
        }
        let repo = CompletionStore::new(store, config.storage_key.clone());
        ProgressTracker::new(page.clone(), Rc::new(repo), Rc::new(config))
    }

    #[test]
    fn restores_checked_state_and_marker() {
        let page = MemoryPage::new();
        let section = page.add_section();
        let r1 = page.add_row(section, "r1");
        let r2 = page.add_row(section, "r2");
        let tracker = tracker_with(&page, Some(r#"{"r2":true,"gone":true}"#));

        let annotation = tracker.annotate_rows().unwrap();

        assert_eq!(annotation.inserted.len(), 2);
        assert_eq!(page.checked_ids(), vec!["r2".to_string()]);
        assert!(!page.is_row_completed(r1));
        assert!(page.is_row_completed(r2));
        assert_eq!(page.checkbox_element_id("r1").as_deref(), Some("checkbox_r1"));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let page = MemoryPage::new();
        let section = page.add_section();
        page.add_row(section, "r1");
        page.add_row(section, "r2");
        let tracker = tracker_with(&page, Some(r#"{"r1":true}"#));
        tracker.annotate_rows().unwrap();

        let again = tracker.annotate_rows().unwrap();

        assert!(again.inserted.is_empty());
        assert_eq!(again.already_annotated, 2);
        assert_eq!(page.checkbox_count(), 2);
        assert_eq!(page.checked_ids(), vec!["r1".to_string()]);
    }

    #[test]
    fn skips_rows_without_insertion_point_or_id() {
        let page = MemoryPage::new();
        let section = page.add_section();
        let bare = page.add_row_without_insertion_point(section, "r1");
        page.add_row_without_id(section);
        page.add_row(section, "r3");
        let tracker = tracker_with(&page, Some(r#"{"r1":true}"#));

        let annotation = tracker.annotate_rows().unwrap();

        assert_eq!(annotation.inserted.len(), 1);
        assert_eq!(annotation.skipped, 2);
        assert_eq!(page.checkbox_count(), 1);
        assert!(!page.is_row_completed(bare));
    }

    #[test]
    fn malformed_store_annotates_unchecked() {
        let page = MemoryPage::new();
        let section = page.add_section();
        page.add_row(section, "r1");
        let tracker = tracker_with(&page, Some("tru"));

        let annotation = tracker.annotate_rows().unwrap();

        assert_eq!(annotation.inserted.len(), 1);
        assert!(page.checked_ids().is_empty());
    }
}
