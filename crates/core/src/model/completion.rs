use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Persisted record of which resources the reader has completed.
///
/// Serializes as a flat JSON object (`{"r1": true, "r3": true}`). A missing
/// key means "not completed". Entries stored as `false` are tolerated on read
/// and treated as not completed. Keys for rows that no longer exist on the
/// page are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    entries: BTreeMap<ResourceId, bool>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_completed(&self, id: &ResourceId) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Record `id` as completed.
    pub fn mark(&mut self, id: ResourceId) {
        self.entries.insert(id, true);
    }

    /// Forget `id`. Returns true if an entry was present.
    pub fn unmark(&mut self, id: &ResourceId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Mark or unmark `id` depending on `completed`.
    pub fn set(&mut self, id: ResourceId, completed: bool) {
        if completed {
            self.mark(id);
        } else {
            self.unmark(&id);
        }
    }

    /// Number of completed resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().filter(|done| **done).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Completed identifiers in sorted order.
    pub fn completed(&self) -> impl Iterator<Item = &ResourceId> {
        self.entries
            .iter()
            .filter(|(_, done)| **done)
            .map(|(id, _)| id)
    }
}

impl FromIterator<ResourceId> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|id| (id, true)).collect(),
        }
    }
}
