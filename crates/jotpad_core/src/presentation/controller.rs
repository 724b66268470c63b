//! Presentation controller: owns the entry snapshot and the list adapter.
//!
//! # Responsibility
//! - Load the store once, then follow change events by re-querying and
//!   diffing into the list.
//! - Implement [`EntryCommands`] on top of the content gateway.
//!
//! # Invariants
//! - `Uninitialized -> Loaded` happens once, on the first loaded snapshot.
//! - The snapshot is only touched from the thread that owns the controller.
//! - A loaded snapshot older than the newest write this controller made or
//!   observed is dropped, so it cannot undo a local append or removal.

use super::adapter::EntryListAdapter;
use super::commands::{EditTarget, EntryCommands, EntryFields};
use super::forms::{CreateForm, EditForm};
use super::view::ListView;
use crate::convert::to_row;
use crate::gateway::change_bus::{ChangeSubscription, EntriesChanged};
use crate::gateway::content_gateway::ContentGateway;
use crate::model::entry::{Entry, EntryId, UNSET_ID};
use crate::service::message::{StoreMessage, StoreRevision};
use log::{debug, info, trace, warn};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_SLICE: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Loaded,
}

pub struct NoteController<V: ListView> {
    gateway: Arc<ContentGateway>,
    messages: Receiver<StoreMessage>,
    changes: Option<ChangeSubscription>,
    snapshot: Vec<Entry>,
    adapter: Option<EntryListAdapter<V>>,
    // Held until the first snapshot arrives and the adapter is attached.
    detached_view: Option<V>,
    // Store revision the snapshot reflects.
    applied_revision: StoreRevision,
    // Store revision the newest requested reload will at least reflect.
    wanted_revision: StoreRevision,
}

impl<V: ListView> NoteController<V> {
    /// `messages` must be the receiving end of the sender the gateway's
    /// [`crate::EntryService`] was opened with.
    pub fn new(
        gateway: Arc<ContentGateway>,
        messages: Receiver<StoreMessage>,
        view: V,
    ) -> Self {
        Self {
            gateway,
            messages,
            changes: None,
            snapshot: Vec::new(),
            adapter: None,
            detached_view: Some(view),
            applied_revision: 0,
            wanted_revision: 0,
        }
    }

    /// Subscribes to changes and requests the first load.
    pub fn start(&mut self) {
        self.resume();
        if self.state() == ControllerState::Uninitialized {
            self.request_reload();
        }
    }

    /// Re-subscribes to change events. Once loaded, also re-queries, since
    /// changes made while paused were not observed.
    pub fn resume(&mut self) {
        if self.changes.is_none() {
            self.changes = Some(self.gateway.subscribe());
        }
        if self.state() == ControllerState::Loaded {
            self.request_reload();
        }
    }

    /// Stops observing change events until [`NoteController::resume`].
    pub fn pause(&mut self) {
        self.changes = None;
    }

    pub fn state(&self) -> ControllerState {
        if self.adapter.is_some() {
            ControllerState::Loaded
        } else {
            ControllerState::Uninitialized
        }
    }

    pub fn is_observing(&self) -> bool {
        self.changes.is_some()
    }

    /// The controller's snapshot, including local edits not yet reloaded.
    pub fn snapshot(&self) -> &[Entry] {
        &self.snapshot
    }

    pub fn adapter(&self) -> Option<&EntryListAdapter<V>> {
        self.adapter.as_ref()
    }

    pub fn view(&self) -> Option<&V> {
        self.adapter
            .as_ref()
            .map(EntryListAdapter::view)
            .or(self.detached_view.as_ref())
    }

    /// Whether every requested reload has arrived and the list shows
    /// exactly the controller's snapshot.
    pub fn is_settled(&self) -> bool {
        self.applied_revision >= self.wanted_revision
            && self
                .adapter
                .as_ref()
                .is_some_and(|adapter| adapter.rendered() == self.snapshot.as_slice())
    }

    /// Handles everything already queued, without blocking. Returns how
    /// many messages and change events were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let before = handled;
            while let Ok(message) = self.messages.try_recv() {
                self.handle_message(message);
                handled += 1;
            }
            while let Some(change) = self.changes.as_ref().and_then(ChangeSubscription::try_next) {
                self.handle_change(change);
                handled += 1;
            }
            if handled == before {
                return handled;
            }
        }
    }

    /// Handles messages until `done` holds or `timeout` passes. Returns the
    /// final value of `done`.
    pub fn wait_until(&mut self, timeout: Duration, mut done: impl FnMut(&Self) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending();
            if done(&*self) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            match self.messages.recv_timeout((deadline - now).min(POLL_SLICE)) {
                Ok(message) => self.handle_message(message),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    self.process_pending();
                    return done(&*self);
                }
            }
        }
    }

    /// Waits for the list to be loaded and to match the snapshot.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        self.wait_until(timeout, Self::is_settled)
    }

    pub fn open_create_form(&self) -> CreateForm {
        CreateForm::new()
    }

    /// Edit form for the row at `position`, prefilled from the snapshot.
    pub fn open_edit_form(&self, position: usize) -> Option<EditForm> {
        self.snapshot
            .get(position)
            .map(|entry| EditForm::prefilled(entry, position))
    }

    /// Deletes the row at `position`.
    pub fn delete_at(&mut self, position: usize) -> bool {
        match self.snapshot.get(position).cloned() {
            Some(entry) => self.delete(entry),
            None => {
                warn!("event=entry_delete module=presentation status=rejected reason=no_row position={position}");
                false
            }
        }
    }

    fn handle_message(&mut self, message: StoreMessage) {
        match message {
            StoreMessage::EntriesLoaded { entries, revision } => {
                if revision < self.applied_revision {
                    debug!(
                        "event=entries_loaded module=presentation status=skipped reason=stale revision={revision} applied={}",
                        self.applied_revision
                    );
                    if self.adapter.is_none() {
                        // Change events are ignored until loaded; ask again.
                        self.request_reload();
                    }
                    return;
                }
                self.applied_revision = revision;
                self.snapshot = entries;
                match self.adapter.as_mut() {
                    Some(adapter) => {
                        adapter.apply_new_snapshot(&self.snapshot);
                    }
                    None => self.attach_adapter(),
                }
            }
            StoreMessage::RepaintRequested => {
                trace!("event=repaint_request module=presentation status=ignored");
            }
        }
    }

    fn handle_change(&mut self, change: EntriesChanged) {
        debug!(
            "event=entries_changed module=presentation kind={:?} uri={}",
            change.kind, change.uri
        );
        if self.state() == ControllerState::Loaded {
            self.request_reload();
        }
    }

    fn attach_adapter(&mut self) {
        let Some(view) = self.detached_view.take() else {
            return;
        };
        self.adapter = Some(EntryListAdapter::new(&self.snapshot, view));
        info!(
            "event=list_attach module=presentation status=ok items={}",
            self.snapshot.len()
        );
    }

    fn request_reload(&mut self) {
        self.wanted_revision = self.wanted_revision.max(self.store_revision());
        // Rows arrive as StoreMessage::EntriesLoaded; the cursor is not needed.
        let _ = self.gateway.query(&self.gateway.collection_uri());
    }

    fn store_revision(&self) -> StoreRevision {
        self.gateway.service().revision()
    }

    // The snapshot now includes a write of ours; loads read before it are stale.
    fn note_local_write(&mut self) {
        self.applied_revision = self.applied_revision.max(self.store_revision());
    }

    fn locate(&mut self, target: EditTarget) -> Option<&mut Entry> {
        match target {
            EditTarget::Id(id) => self.snapshot.iter_mut().find(|entry| entry.id == Some(id)),
            EditTarget::Position(position) => self.snapshot.get_mut(position),
        }
    }
}

impl<V: ListView> EntryCommands for NoteController<V> {
    fn create(&mut self, mut entry: Entry) -> Option<EntryId> {
        entry.id = None;
        let placeholder = self.gateway.item_uri(UNSET_ID);
        let inserted = self.gateway.insert(&placeholder, &to_row(&entry))?;
        let Some(id) = inserted.id() else {
            warn!("event=entry_create module=presentation status=error reason=no_id uri={inserted}");
            return None;
        };
        entry.id = Some(id);
        self.snapshot.push(entry);
        self.note_local_write();
        Some(id)
    }

    fn update(&mut self, fields: EntryFields) -> bool {
        let EntryFields {
            title,
            body,
            target,
        } = fields;
        let Some(entry) = self.locate(target) else {
            warn!(
                "event=entry_update module=presentation status=rejected reason=no_target target={target:?}"
            );
            return false;
        };
        let Some(id) = entry.id.filter(|_| entry.is_persisted()) else {
            warn!("event=entry_update module=presentation status=rejected reason=unsaved");
            return false;
        };
        entry.title = title;
        entry.body = body;
        let row = to_row(entry);
        let updated = self.gateway.update(&self.gateway.item_uri(id), &row) > 0;
        if updated {
            self.note_local_write();
        }
        updated
    }

    fn delete(&mut self, entry: Entry) -> bool {
        let Some(id) = entry.id else {
            warn!("event=entry_delete module=presentation status=rejected reason=unsaved");
            return false;
        };
        let removed = self.gateway.delete(&self.gateway.item_uri(id)) > 0;
        if let Some(position) = self.snapshot.iter().position(|current| *current == entry) {
            self.snapshot.remove(position);
        }
        if removed {
            self.note_local_write();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::{ControllerState, NoteController};
    use crate::config::JotpadConfig;
    use crate::gateway::content_gateway::ContentGateway;
    use crate::model::entry::Entry;
    use crate::presentation::commands::{EditTarget, EntryCommands, EntryFields};
    use crate::presentation::view::MirrorView;
    use crate::service::entry_service::EntryService;
    use crate::service::message::StoreMessage;
    use std::sync::mpsc;
    use std::sync::Arc;

    fn controller() -> NoteController<MirrorView> {
        let config = JotpadConfig::default();
        let (tx, rx) = mpsc::channel();
        let service = EntryService::open(&config, tx).expect("in-memory store");
        let gateway = Arc::new(ContentGateway::new(&config, Arc::new(service)));
        NoteController::new(gateway, rx, MirrorView::new())
    }

    fn loaded(entries: Vec<Entry>, revision: u64) -> StoreMessage {
        StoreMessage::EntriesLoaded { entries, revision }
    }

    #[test]
    fn rejected_update_of_unsaved_row_keeps_snapshot() {
        let mut controller = controller();
        controller.handle_message(loaded(vec![Entry::new("draft", "text")], 0));
        assert_eq!(controller.state(), ControllerState::Loaded);

        assert!(!controller.update(EntryFields {
            title: "changed".to_string(),
            body: "changed".to_string(),
            target: EditTarget::Position(0),
        }));
        assert_eq!(controller.snapshot(), &[Entry::new("draft", "text")]);
    }

    #[test]
    fn older_snapshot_is_dropped_after_local_write() {
        let mut controller = controller();
        controller.handle_message(loaded(Vec::new(), 0));
        let id = controller.create(Entry::new("A", "1")).expect("insert");

        controller.handle_message(loaded(Vec::new(), 0));
        assert_eq!(controller.snapshot(), &[Entry::with_id(id, "A", "1")]);
        assert!(!controller.is_settled());

        controller.handle_message(loaded(vec![Entry::with_id(id, "A", "1")], 1));
        assert!(controller.is_settled());
    }
}
