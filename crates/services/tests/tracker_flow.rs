use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use services::{
    MemoryPage, Page, ProgressTracker, ResetOutcome, ScriptedDialogs, ToggleOutcome,
    TrackerError,
};
use storage::kv::{InMemoryStore, KeyValueStore};
use storage::repository::{CompletionStore, StorageError};
use tracker_core::TrackerConfig;
use tracker_core::model::Progress;

fn tracker_over(page: &MemoryPage, store: &InMemoryStore) -> ProgressTracker<MemoryPage> {
    let config = TrackerConfig::default();
    let repo = CompletionStore::new(store.clone(), config.storage_key.clone());
    ProgressTracker::new(page.clone(), Rc::new(repo), Rc::new(config))
}

fn stored_mapping(store: &InMemoryStore) -> Option<BTreeMap<String, bool>> {
    let raw = store.raw(&TrackerConfig::default().storage_key)?;
    Some(serde_json::from_str(&raw).expect("stored value is a json object"))
}

fn click(tracker: &ProgressTracker<MemoryPage>, id: &str) -> ToggleOutcome {
    let checkbox = tracker.page().checkbox(id).expect("row is annotated");
    tracker.page().user_toggle(checkbox);
    tracker.toggle(&checkbox).expect("toggle succeeds")
}

#[test]
fn three_rows_check_and_uncheck() {
    let page = MemoryPage::new();
    let section = page.add_section();
    for id in ["r1", "r2", "r3"] {
        page.add_row(section, id);
    }
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");

    click(&tracker, "r1");
    let outcome = click(&tracker, "r3");

    let ToggleOutcome::Completed { progress, .. } = outcome else {
        panic!("expected completion");
    };
    assert_eq!(progress.sections[0].progress, Progress::new(2, 3));
    let view = page.indicator(section).expect("indicator");
    assert_eq!(view.count, "2 / 3");
    assert_eq!(view.percent, "67%");
    assert_eq!(
        stored_mapping(&store),
        Some(BTreeMap::from([("r1".into(), true), ("r3".into(), true)]))
    );

    click(&tracker, "r1");

    let view = page.indicator(section).expect("indicator");
    assert_eq!(view.count, "1 / 3");
    assert_eq!(view.percent, "33%");
    assert_eq!(view.fill_width, "33%");
    assert_eq!(
        stored_mapping(&store),
        Some(BTreeMap::from([("r3".into(), true)]))
    );
}

#[test]
fn two_sections_overall_and_per_section() {
    let page = MemoryPage::new();
    let first = page.add_section();
    let second = page.add_section();
    page.add_row(first, "a1");
    page.add_row(first, "a2");
    for id in ["b1", "b2", "b3", "b4"] {
        page.add_row(second, id);
    }
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");

    click(&tracker, "a1");
    let outcome = click(&tracker, "a2");

    let ToggleOutcome::Completed { progress, .. } = outcome else {
        panic!("expected completion");
    };
    assert_eq!(progress.overall, Progress::new(2, 6));
    assert_eq!(progress.overall.percentage(), 33);
    assert_eq!(page.title(), "Resources (33% Complete) - IFT3395");

    let first_view = page.indicator(first).expect("first indicator");
    assert_eq!((first_view.count.as_str(), first_view.percent.as_str()), ("2 / 2", "100%"));
    let second_view = page.indicator(second).expect("second indicator");
    assert_eq!((second_view.count.as_str(), second_view.percent.as_str()), ("0 / 4", "0%"));
}

#[test]
fn reload_restores_checked_rows() {
    let page = MemoryPage::new();
    let first = page.add_section();
    let second = page.add_section();
    for id in ["a", "b", "c"] {
        page.add_row(first, id);
    }
    for id in ["d", "e"] {
        page.add_row(second, id);
    }
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");

    for id in ["a", "d", "c", "a", "e", "d", "a"] {
        click(&tracker, id);
    }
    let before = page.checked_ids();
    assert_eq!(before, vec!["a", "c", "e"]);

    let reloaded = page.fresh_copy();
    assert_eq!(reloaded.checkbox_count(), 0);
    let tracker = tracker_over(&reloaded, &store);
    let init = tracker.initialize().expect("initialize after reload");

    assert_eq!(reloaded.checked_ids(), before);
    assert_eq!(reloaded.completed_row_ids(), before);
    assert_eq!(init.progress.overall, Progress::new(3, 5));
    assert_eq!(reloaded.indicator(first).expect("indicator").count, "2 / 3");
    assert_eq!(reloaded.indicator(second).expect("indicator").count, "1 / 2");
}

#[test]
fn initialization_is_idempotent_for_rows() {
    let page = MemoryPage::new();
    let section = page.add_section();
    page.add_row(section, "r1");
    page.add_row(section, "r2");
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");
    click(&tracker, "r2");

    let annotation = tracker.annotate_rows().expect("annotate again");
    tracker.recompute();

    assert!(annotation.inserted.is_empty());
    assert_eq!(annotation.already_annotated, 2);
    assert_eq!(page.checkbox_count(), 2);
    assert_eq!(page.indicator_count(), 1);
    assert_eq!(page.checked_ids(), vec!["r2"]);
}

#[test]
fn empty_section_gets_no_indicator_and_title_is_zero() {
    let page = MemoryPage::new();
    let empty = page.add_section();
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);

    let init = tracker.initialize().expect("initialize");

    assert!(page.indicator(empty).is_none());
    assert!(init.progress.sections.is_empty());
    assert_eq!(init.progress.overall.percentage(), 0);
    assert_eq!(page.title(), "Resources (0% Complete) - IFT3395");
}

#[test]
fn reset_clears_key_and_page_only_when_confirmed() {
    let page = MemoryPage::new();
    let first = page.add_section();
    let second = page.add_section();
    page.add_row(first, "a");
    page.add_row(second, "b");
    let store = InMemoryStore::new();
    let tracker = tracker_over(&page, &store);
    let init = tracker.initialize().expect("initialize");
    assert!(init.reset_control.is_some());
    assert_eq!(page.reset_controls(), vec!["Reset All Progress"]);
    click(&tracker, "a");
    click(&tracker, "b");

    let declined = ScriptedDialogs::answering(false);
    assert_eq!(tracker.reset(&declined).expect("reset"), ResetOutcome::Declined);
    assert_eq!(page.checked_ids(), vec!["a", "b"]);
    assert!(stored_mapping(&store).is_some());

    let accepted = ScriptedDialogs::answering(true);
    let outcome = tracker.reset(&accepted).expect("reset");

    assert!(matches!(outcome, ResetOutcome::Cleared { unchecked: 2, .. }));
    assert_eq!(stored_mapping(&store), None);
    assert!(page.checked_ids().is_empty());
    assert!(page.completed_row_ids().is_empty());
    assert_eq!(page.title(), "Resources (0% Complete) - IFT3395");
    assert_eq!(
        accepted.confirmations(),
        vec!["Are you sure you want to reset all progress? This cannot be undone."]
    );
    assert_eq!(accepted.notifications(), vec!["All progress has been reset!"]);
}

#[test]
fn missing_reset_container_skips_control() {
    let page = MemoryPage::new();
    page.remove_reset_container();
    let section = page.add_section();
    page.add_row(section, "a");
    let tracker = tracker_over(&page, &InMemoryStore::new());

    let init = tracker.initialize().expect("initialize");

    assert!(init.reset_control.is_none());
    assert!(page.reset_controls().is_empty());
    assert_eq!(page.checkbox_count(), 1);
}

#[test]
fn stale_keys_survive_toggles() {
    let page = MemoryPage::new();
    let section = page.add_section();
    page.add_row(section, "kept");
    let store = InMemoryStore::new();
    store
        .set_item(&TrackerConfig::default().storage_key, r#"{"removed-lecture":true}"#)
        .expect("seed store");
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");

    click(&tracker, "kept");
    click(&tracker, "kept");

    assert_eq!(
        stored_mapping(&store),
        Some(BTreeMap::from([("removed-lecture".into(), true)]))
    );
    assert_eq!(page.sections().len(), 1);
}

#[test]
fn unusable_stored_entry_does_not_erase_the_others() {
    let page = MemoryPage::new();
    let section = page.add_section();
    page.add_row(section, "r1");
    page.add_row(section, "r2");
    let store = InMemoryStore::new();
    store
        .set_item(&TrackerConfig::default().storage_key, r#"{"":true,"r1":true}"#)
        .expect("seed store");
    let tracker = tracker_over(&page, &store);
    tracker.initialize().expect("initialize");
    assert_eq!(page.checked_ids(), vec!["r1"]);

    click(&tracker, "r2");

    assert_eq!(page.checked_ids(), vec!["r1", "r2"]);
    assert_eq!(
        stored_mapping(&store),
        Some(BTreeMap::from([("r1".into(), true), ("r2".into(), true)]))
    );
}

/// Reads succeed; writes and removals fail once `fail_writes` is set.
struct WriteFailingStore {
    inner: InMemoryStore,
    fail_writes: Rc<Cell<bool>>,
}

impl KeyValueStore for WriteFailingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("storage disabled".into()));
        }
        self.inner.remove_item(key)
    }
}

fn failing_tracker(
    page: &MemoryPage,
) -> (InMemoryStore, Rc<Cell<bool>>, ProgressTracker<MemoryPage>) {
    let config = TrackerConfig::default();
    let inner = InMemoryStore::new();
    let fail_writes = Rc::new(Cell::new(false));
    let store = WriteFailingStore {
        inner: inner.clone(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let repo = CompletionStore::new(store, config.storage_key.clone());
    let tracker = ProgressTracker::new(page.clone(), Rc::new(repo), Rc::new(config));
    (inner, fail_writes, tracker)
}

#[test]
fn failed_save_surfaces_and_leaves_marker_alone() {
    let page = MemoryPage::new();
    let section = page.add_section();
    let row = page.add_row(section, "r1");
    let (inner, fail_writes, tracker) = failing_tracker(&page);
    tracker.initialize().expect("initialize");
    fail_writes.set(true);

    let checkbox = page.checkbox("r1").expect("annotated");
    page.user_toggle(checkbox);
    let result = tracker.toggle(&checkbox);

    assert!(matches!(
        result,
        Err(TrackerError::Storage(StorageError::Write(_)))
    ));
    assert!(!page.is_row_completed(row));
    assert!(inner.is_empty());
}

#[test]
fn failed_clear_leaves_page_untouched() {
    let page = MemoryPage::new();
    let section = page.add_section();
    let row = page.add_row(section, "r1");
    page.add_row(section, "r2");
    let (inner, fail_writes, tracker) = failing_tracker(&page);
    tracker.initialize().expect("initialize");
    let checkbox = page.checkbox("r1").expect("annotated");
    page.user_toggle(checkbox);
    tracker.toggle(&checkbox).expect("toggle while store works");
    let title_before = page.title();
    let indicator_before = page.indicator(section);
    fail_writes.set(true);
    let dialogs = ScriptedDialogs::answering(true);

    let result = tracker.reset(&dialogs);

    assert!(matches!(result, Err(TrackerError::Storage(_))));
    assert_eq!(page.checked_ids(), vec!["r1"]);
    assert!(page.is_row_completed(row));
    assert_eq!(page.title(), title_before);
    assert_eq!(page.indicator(section), indicator_before);
    assert!(dialogs.notifications().is_empty());
    assert!(inner.raw(&TrackerConfig::default().storage_key).is_some());
}
