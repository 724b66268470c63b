//! Entry record shared by every layer.

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier. Positive once persisted.
pub type EntryId = i64;

/// Id an entry may carry before its first insert. The store never assigns it.
pub const UNSET_ID: EntryId = 0;

/// One short text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// `None` (or [`UNSET_ID`]) until the store has assigned an id on insert.
    pub id: Option<EntryId>,
    pub title: String,
    pub body: String,
}

impl Entry {
    /// Creates an unsaved entry, the shape a create form hands over.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Creates an entry that already carries its store id.
    pub fn with_id(id: EntryId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, body)
        }
    }

    /// Whether the store has assigned this entry an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some_and(|id| id != UNSET_ID)
    }

    /// Two entries denote the same list item when their ids match.
    pub fn same_item(&self, other: &Entry) -> bool {
        self.is_persisted() && self.id == other.id
    }

    /// Two same-item entries render identically when title and body match.
    pub fn same_content(&self, other: &Entry) -> bool {
        self.title == other.title && self.body == other.body
    }
}
