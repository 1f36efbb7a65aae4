//! Seams between the tracker and the document it annotates.

use tracker_core::model::Progress;

/// Read/annotate access to the externally generated resource document.
///
/// Handles are cheap clones of live nodes. Methods never fail: when the
/// document lacks the expected structure they return `None` or an empty list
/// and the tracker skips that element.
pub trait Page {
    type Row: Clone;
    type Section;
    type Checkbox: Clone;
    type Indicator;
    type Control;

    /// All resource rows in document order.
    fn rows(&self) -> Vec<Self::Row>;

    /// All sections in document order.
    fn sections(&self) -> Vec<Self::Section>;

    /// Raw identifier carried by the row element, if any.
    fn row_id(&self, row: &Self::Row) -> Option<String>;

    /// Tracker checkbox already present inside `row`.
    fn row_checkbox(&self, row: &Self::Row) -> Option<Self::Checkbox>;

    /// Insert a tracker checkbox with the given element id at the row's
    /// insertion point. Returns `None` when the row has no insertion point.
    fn insert_checkbox(
        &self,
        row: &Self::Row,
        element_id: &str,
        checked: bool,
    ) -> Option<Self::Checkbox>;

    fn is_checked(&self, checkbox: &Self::Checkbox) -> bool;

    fn set_checked(&self, checkbox: &Self::Checkbox, checked: bool);

    /// Nearest row enclosing the checkbox.
    fn owning_row(&self, checkbox: &Self::Checkbox) -> Option<Self::Row>;

    /// Add or remove the "completed" marker on a row.
    fn set_completed(&self, row: &Self::Row, completed: bool);

    /// Tracker checkboxes inside `section`.
    fn section_checkboxes(&self, section: &Self::Section) -> Vec<Self::Checkbox>;

    /// Every tracker checkbox in the document, sectioned or not.
    fn all_checkboxes(&self) -> Vec<Self::Checkbox>;

    /// Indicator previously attached to `section`.
    fn find_indicator(&self, section: &Self::Section) -> Option<Self::Indicator>;

    /// Create and place a new indicator. `None` when the section has no
    /// place to put one.
    fn attach_indicator(&self, section: &Self::Section) -> Option<Self::Indicator>;

    fn update_indicator(&self, indicator: &Self::Indicator, progress: Progress);

    fn set_title(&self, title: &str);

    /// Append the reset control to the page-level container. `None` when the
    /// container is missing.
    fn attach_reset_control(&self, label: &str) -> Option<Self::Control>;
}

/// Blocking user prompts used by the reset flow.
pub trait Dialogs {
    /// Ask the user to confirm; returns true on acceptance.
    fn confirm(&self, message: &str) -> bool;

    /// Show an informational message.
    fn notify(&self, message: &str);
}
