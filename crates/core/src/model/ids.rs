use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Prefix applied to a resource identifier to build its checkbox element id.
pub const CHECKBOX_ID_PREFIX: &str = "checkbox_";

/// Stable identifier of one trackable resource row.
///
/// The value is whatever id the page generator gave the row element. It is
/// never empty and never padded with whitespace.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

/// Error type for rejected resource identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IdError {
    #[error("resource id is empty")]
    Empty,
    #[error("resource id has surrounding whitespace: {0:?}")]
    Padded(String),
}

impl ResourceId {
    /// Creates a new `ResourceId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` when the raw value is empty or padded with whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(IdError::Empty);
        }
        if raw.trim() != raw {
            return Err(IdError::Padded(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Element id of the checkbox injected for this resource.
    #[must_use]
    pub fn checkbox_id(&self) -> String {
        format!("{CHECKBOX_ID_PREFIX}{}", self.0)
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
