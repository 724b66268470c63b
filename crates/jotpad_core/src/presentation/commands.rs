//! Command interface forms use to hand input back to the controller.

use crate::model::entry::{Entry, EntryId};

/// Which entry an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Stable store id. Edit forms always produce this.
    Id(EntryId),
    /// Row position at the time the form was opened. Breaks if the list
    /// changes while the form is open; accepted for callers that only have
    /// a position.
    Position(usize),
}

/// Field bundle submitted by an edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub body: String,
    pub target: EditTarget,
}

pub trait EntryCommands {
    /// Persists a new entry; returns the store-assigned id.
    fn create(&mut self, entry: Entry) -> Option<EntryId>;
    /// Rewrites title and body of the targeted entry. `true` if the store
    /// replaced a row.
    fn update(&mut self, fields: EntryFields) -> bool;
    /// Removes `entry`. `true` if the store removed a row.
    fn delete(&mut self, entry: Entry) -> bool;
}
