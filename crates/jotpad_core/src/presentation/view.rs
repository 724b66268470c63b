//! List view seam: whatever draws rows receives [`ListUpdate`]s here.

use super::diff::{apply_updates, ListUpdate};
use crate::model::entry::Entry;

/// A scrollable list surface.
pub trait ListView {
    /// Redraws every row from scratch; called once when the list is first
    /// attached.
    fn reload(&mut self, entries: &[Entry]);
    /// Applies one granular change to the rows currently drawn.
    fn dispatch(&mut self, update: &ListUpdate);
}

/// In-memory list view that mirrors the rows it was told to draw and keeps
/// a log of every update it received.
#[derive(Debug, Default, Clone)]
pub struct MirrorView {
    rows: Vec<Entry>,
    reloads: usize,
    log: Vec<ListUpdate>,
}

impl MirrorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Entry] {
        &self.rows
    }

    /// Number of full redraws.
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Every granular update since creation, oldest first.
    pub fn updates(&self) -> &[ListUpdate] {
        &self.log
    }

    /// Forgets the update log, keeping the rows.
    pub fn clear_updates(&mut self) {
        self.log.clear();
    }
}

impl ListView for MirrorView {
    fn reload(&mut self, entries: &[Entry]) {
        self.rows = entries.to_vec();
        self.reloads += 1;
    }

    fn dispatch(&mut self, update: &ListUpdate) {
        apply_updates(&mut self.rows, std::slice::from_ref(update));
        self.log.push(update.clone());
    }
}

impl<V: ListView + ?Sized> ListView for Box<V> {
    fn reload(&mut self, entries: &[Entry]) {
        (**self).reload(entries);
    }

    fn dispatch(&mut self, update: &ListUpdate) {
        (**self).dispatch(update);
    }
}
