use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the overall percentage in [`TrackerConfig::title_template`].
pub const PERCENT_PLACEHOLDER: &str = "{percent}";

/// Page contract and user-facing text for one tracked document.
///
/// Every field has a default matching the generated course resources page,
/// so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Key of the single durable store entry holding the completion set.
    pub storage_key: String,
    pub selectors: Selectors,
    pub classes: ClassNames,
    /// Document title written after every recomputation.
    pub title_template: String,
    pub reset: ResetText,
    /// Max level for console logging (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

/// CSS selectors describing the externally generated document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub section: String,
    pub row: String,
    /// Cell inside a row that hosts the checkbox.
    pub cell: String,
    /// Element inside the cell that receives the checkbox as first child.
    pub insertion_target: String,
    /// Section header after which the progress indicator is placed.
    pub section_header: String,
    /// Element id of the container receiving the reset control.
    pub reset_container_id: String,
}

/// Class names the tracker writes into the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    pub checkbox: String,
    pub completed: String,
    pub indicator: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResetText {
    pub button_label: String,
    pub confirm_message: String,
    pub done_message: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("class name {field} must be a single token, got {value:?}")]
    InvalidClass { field: &'static str, value: String },
    #[error("title template must contain {{percent}}")]
    MissingPercentPlaceholder,
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl TrackerConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields, and
    /// the other variants when [`TrackerConfig::validate`] rejects a value.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a page.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("storage_key", &self.storage_key)?;
        require("selectors.section", &self.selectors.section)?;
        require("selectors.row", &self.selectors.row)?;
        require("selectors.cell", &self.selectors.cell)?;
        require("selectors.insertion_target", &self.selectors.insertion_target)?;
        require("selectors.section_header", &self.selectors.section_header)?;
        require("selectors.reset_container_id", &self.selectors.reset_container_id)?;
        class_token("classes.checkbox", &self.classes.checkbox)?;
        class_token("classes.completed", &self.classes.completed)?;
        class_token("classes.indicator", &self.classes.indicator)?;
        require("reset.button_label", &self.reset.button_label)?;

        if !self.title_template.contains(PERCENT_PLACEHOLDER) {
            return Err(ConfigError::MissingPercentPlaceholder);
        }
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    /// Document title for the given overall percentage.
    #[must_use]
    pub fn render_title(&self, percent: u8) -> String {
        self.title_template
            .replace(PERCENT_PLACEHOLDER, &percent.to_string())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: "ift3395_resources_tracker".to_owned(),
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            title_template: "Resources ({percent}% Complete) - IFT3395".to_owned(),
            reset: ResetText::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            section: ".resource-section".to_owned(),
            row: r#".form-row[role="row"]"#.to_owned(),
            cell: r#"[role="cell"]"#.to_owned(),
            insertion_target: ".d-flex".to_owned(),
            section_header: ".mb-2.sorting-line".to_owned(),
            reset_container_id: "resources".to_owned(),
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            checkbox: "resource-checkbox".to_owned(),
            completed: "completed".to_owned(),
            indicator: "progress-container".to_owned(),
        }
    }
}

impl Default for ResetText {
    fn default() -> Self {
        Self {
            button_label: "Reset All Progress".to_owned(),
            confirm_message: "Are you sure you want to reset all progress? This cannot be undone."
                .to_owned(),
            done_message: "All progress has been reset!".to_owned(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Ok(())
}

fn class_token(field: &'static str, value: &str) -> Result<(), ConfigError> {
    require(field, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidClass {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}
