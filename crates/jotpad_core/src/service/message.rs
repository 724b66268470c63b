//! Messages the facade posts back to the presentation thread.

use crate::model::entry::Entry;

/// Count of writes the store had applied at some point in its queue.
pub type StoreRevision = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMessage {
    /// Full store contents, ordered by id, after a read-all. `revision` is
    /// the number of writes applied when the read ran.
    EntriesLoaded {
        entries: Vec<Entry>,
        revision: StoreRevision,
    },
    /// Posted after every write. Receivers ignore it; change observers on
    /// the gateway drive refreshes instead.
    RepaintRequested,
}
