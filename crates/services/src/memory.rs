//! In-memory document for tests and headless runs.
//!
//! `MemoryPage` models just enough of the resource page for the tracker:
//! sections with an optional header, rows with an optional id and insertion
//! point, and the nodes the tracker creates (checkboxes, indicators, the reset
//! control, the title). Clones share the same document.

use std::cell::RefCell;
use std::rc::Rc;

use tracker_core::model::Progress;

use crate::page::{Dialogs, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionRef(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckboxRef(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorRef(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlRef(usize);

/// Rendered text of a progress indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorView {
    /// `checked / total`
    pub count: String,
    /// Text inside the fill bar.
    pub percent: String,
    /// Width of the fill bar.
    pub fill_width: String,
}

#[derive(Debug, Clone)]
struct SectionNode {
    has_header: bool,
    indicator: Option<usize>,
}

#[derive(Debug, Clone)]
struct RowNode {
    id: Option<String>,
    section: Option<usize>,
    has_insertion_point: bool,
    completed: bool,
    checkbox: Option<usize>,
}

#[derive(Debug, Clone)]
struct CheckboxNode {
    element_id: String,
    row: usize,
    checked: bool,
}

#[derive(Debug, Default)]
struct MemoryDocument {
    sections: Vec<SectionNode>,
    rows: Vec<RowNode>,
    checkboxes: Vec<CheckboxNode>,
    indicators: Vec<IndicatorView>,
    title: String,
    has_reset_container: bool,
    reset_controls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    doc: Rc<RefCell<MemoryDocument>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Empty document with a reset container and no sections.
    #[must_use]
    pub fn new() -> Self {
        let doc = MemoryDocument {
            has_reset_container: true,
            ..MemoryDocument::default()
        };
        Self {
            doc: Rc::new(RefCell::new(doc)),
        }
    }

    pub fn add_section(&self) -> SectionRef {
        self.push_section(true)
    }

    /// Section without the header an indicator is placed after.
    pub fn add_headerless_section(&self) -> SectionRef {
        self.push_section(false)
    }

    pub fn add_row(&self, section: SectionRef, id: &str) -> RowRef {
        self.push_row(Some(id.to_owned()), Some(section.0), true)
    }

    /// Row that belongs to no section.
    pub fn add_loose_row(&self, id: &str) -> RowRef {
        self.push_row(Some(id.to_owned()), None, true)
    }

    pub fn add_row_without_insertion_point(&self, section: SectionRef, id: &str) -> RowRef {
        self.push_row(Some(id.to_owned()), Some(section.0), false)
    }

    pub fn add_row_without_id(&self, section: SectionRef) -> RowRef {
        self.push_row(None, Some(section.0), true)
    }

    pub fn remove_reset_container(&self) {
        self.doc.borrow_mut().has_reset_container = false;
    }

    /// Same sections and rows, none of the tracker's annotations. Models a
    /// page reload.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        let doc = self.doc.borrow();
        let fresh = MemoryDocument {
            sections: doc
                .sections
                .iter()
                .map(|s| SectionNode {
                    has_header: s.has_header,
                    indicator: None,
                })
                .collect(),
            rows: doc
                .rows
                .iter()
                .map(|r| RowNode {
                    completed: false,
                    checkbox: None,
                    ..r.clone()
                })
                .collect(),
            has_reset_container: doc.has_reset_container,
            ..MemoryDocument::default()
        };
        Self {
            doc: Rc::new(RefCell::new(fresh)),
        }
    }

    /// Flip a checkbox the way a click would. Does not notify the tracker.
    pub fn user_toggle(&self, checkbox: CheckboxRef) {
        let mut doc = self.doc.borrow_mut();
        let node = &mut doc.checkboxes[checkbox.0];
        node.checked = !node.checked;
    }

    /// Tracker checkbox of the row with the given id.
    #[must_use]
    pub fn checkbox(&self, id: &str) -> Option<CheckboxRef> {
        let doc = self.doc.borrow();
        doc.rows
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .and_then(|r| r.checkbox)
            .map(CheckboxRef)
    }

    #[must_use]
    pub fn checkbox_element_id(&self, id: &str) -> Option<String> {
        let cb = self.checkbox(id)?;
        Some(self.doc.borrow().checkboxes[cb.0].element_id.clone())
    }

    #[must_use]
    pub fn checkbox_count(&self) -> usize {
        self.doc.borrow().checkboxes.len()
    }

    /// Ids of rows whose checkbox is checked, in document order.
    #[must_use]
    pub fn checked_ids(&self) -> Vec<String> {
        let doc = self.doc.borrow();
        doc.rows
            .iter()
            .filter(|r| r.checkbox.is_some_and(|cb| doc.checkboxes[cb].checked))
            .filter_map(|r| r.id.clone())
            .collect()
    }

    /// Ids of rows carrying the completed marker, in document order.
    #[must_use]
    pub fn completed_row_ids(&self) -> Vec<String> {
        self.doc
            .borrow()
            .rows
            .iter()
            .filter(|r| r.completed)
            .filter_map(|r| r.id.clone())
            .collect()
    }

    #[must_use]
    pub fn is_row_completed(&self, row: RowRef) -> bool {
        self.doc.borrow().rows[row.0].completed
    }

    #[must_use]
    pub fn indicator(&self, section: SectionRef) -> Option<IndicatorView> {
        let doc = self.doc.borrow();
        doc.sections[section.0]
            .indicator
            .map(|i| doc.indicators[i].clone())
    }

    #[must_use]
    pub fn indicator_count(&self) -> usize {
        self.doc.borrow().indicators.len()
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.doc.borrow().title.clone()
    }

    /// Labels of every reset control attached so far.
    #[must_use]
    pub fn reset_controls(&self) -> Vec<String> {
        self.doc.borrow().reset_controls.clone()
    }

    fn push_section(&self, has_header: bool) -> SectionRef {
        let mut doc = self.doc.borrow_mut();
        doc.sections.push(SectionNode {
            has_header,
            indicator: None,
        });
        SectionRef(doc.sections.len() - 1)
    }

    fn push_row(&self, id: Option<String>, section: Option<usize>, insertable: bool) -> RowRef {
        let mut doc = self.doc.borrow_mut();
        doc.rows.push(RowNode {
            id,
            section,
            has_insertion_point: insertable,
            completed: false,
            checkbox: None,
        });
        RowRef(doc.rows.len() - 1)
    }
}

impl Page for MemoryPage {
    type Row = RowRef;
    type Section = SectionRef;
    type Checkbox = CheckboxRef;
    type Indicator = IndicatorRef;
    type Control = ControlRef;

    fn rows(&self) -> Vec<RowRef> {
        (0..self.doc.borrow().rows.len()).map(RowRef).collect()
    }

    fn sections(&self) -> Vec<SectionRef> {
        (0..self.doc.borrow().sections.len())
            .map(SectionRef)
            .collect()
    }

    fn row_id(&self, row: &RowRef) -> Option<String> {
        self.doc.borrow().rows[row.0].id.clone()
    }

    fn row_checkbox(&self, row: &RowRef) -> Option<CheckboxRef> {
        self.doc.borrow().rows[row.0].checkbox.map(CheckboxRef)
    }

    fn insert_checkbox(&self, row: &RowRef, element_id: &str, checked: bool) -> Option<CheckboxRef> {
        let mut doc = self.doc.borrow_mut();
        if !doc.rows[row.0].has_insertion_point {
            return None;
        }
        doc.checkboxes.push(CheckboxNode {
            element_id: element_id.to_owned(),
            row: row.0,
            checked,
        });
        let index = doc.checkboxes.len() - 1;
        doc.rows[row.0].checkbox = Some(index);
        Some(CheckboxRef(index))
    }

    fn is_checked(&self, checkbox: &CheckboxRef) -> bool {
        self.doc.borrow().checkboxes[checkbox.0].checked
    }

    fn set_checked(&self, checkbox: &CheckboxRef, checked: bool) {
        self.doc.borrow_mut().checkboxes[checkbox.0].checked = checked;
    }

    fn owning_row(&self, checkbox: &CheckboxRef) -> Option<RowRef> {
        Some(RowRef(self.doc.borrow().checkboxes[checkbox.0].row))
    }

    fn set_completed(&self, row: &RowRef, completed: bool) {
        self.doc.borrow_mut().rows[row.0].completed = completed;
    }

    fn section_checkboxes(&self, section: &SectionRef) -> Vec<CheckboxRef> {
        let doc = self.doc.borrow();
        doc.checkboxes
            .iter()
            .enumerate()
            .filter(|(_, cb)| doc.rows[cb.row].section == Some(section.0))
            .map(|(i, _)| CheckboxRef(i))
            .collect()
    }

    fn all_checkboxes(&self) -> Vec<CheckboxRef> {
        (0..self.doc.borrow().checkboxes.len())
            .map(CheckboxRef)
            .collect()
    }

    fn find_indicator(&self, section: &SectionRef) -> Option<IndicatorRef> {
        self.doc.borrow().sections[section.0]
            .indicator
            .map(IndicatorRef)
    }

    fn attach_indicator(&self, section: &SectionRef) -> Option<IndicatorRef> {
        let mut doc = self.doc.borrow_mut();
        if !doc.sections[section.0].has_header {
            return None;
        }
        doc.indicators.push(IndicatorView {
            count: "0 / 0".to_owned(),
            percent: "0%".to_owned(),
            fill_width: "0%".to_owned(),
        });
        let index = doc.indicators.len() - 1;
        doc.sections[section.0].indicator = Some(index);
        Some(IndicatorRef(index))
    }

    fn update_indicator(&self, indicator: &IndicatorRef, progress: Progress) {
        let mut doc = self.doc.borrow_mut();
        let view = &mut doc.indicators[indicator.0];
        view.count = progress.count_label();
        view.percent = progress.percent_label();
        view.fill_width = progress.percent_label();
    }

    fn set_title(&self, title: &str) {
        title.clone_into(&mut self.doc.borrow_mut().title);
    }

    fn attach_reset_control(&self, label: &str) -> Option<ControlRef> {
        let mut doc = self.doc.borrow_mut();
        if !doc.has_reset_container {
            return None;
        }
        doc.reset_controls.push(label.to_owned());
        Some(ControlRef(doc.reset_controls.len() - 1))
    }
}

/// Dialogs that answer every confirmation the same way and record prompts.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    answer: bool,
    confirmations: RefCell<Vec<String>>,
    notifications: RefCell<Vec<String>>,
}

impl ScriptedDialogs {
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_owned());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notifications.borrow_mut().push(message.to_owned());
    }
}
