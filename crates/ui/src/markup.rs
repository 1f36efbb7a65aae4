//! Markup and inline styles injected into the resource page.

/// Inner markup of a freshly attached progress indicator.
pub const INDICATOR_HTML: &str = concat!(
    r#"<div class="progress-text">Progress: <span class="progress-count">0 / 0</span></div>"#,
    r#"<div class="progress-bar-wrapper">"#,
    r#"<div class="progress-bar-fill" style="width: 0%">0%</div>"#,
    r#"</div>"#,
);

pub const COUNT_SELECTOR: &str = ".progress-count";
pub const FILL_SELECTOR: &str = ".progress-bar-fill";

pub const RESET_CONTAINER_STYLE: &str =
    "text-align: center; padding: 30px; background: #f8f9fa; border-top: 2px solid #e9ecef;";
pub const RESET_BUTTON_CLASS: &str = "btn";
pub const RESET_BUTTON_STYLE: &str =
    "background: #dc3545; color: white; padding: 12px 24px; font-size: 1rem;";

/// Selector matching elements that carry `class`.
#[must_use]
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}
