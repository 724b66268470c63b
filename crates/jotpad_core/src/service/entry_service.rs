//! Entry data access facade.
//!
//! Every call is queued on the store worker and awaited synchronously.
//! Once an operation succeeds, a follow-up job on the same worker posts a
//! [`StoreMessage`], so callers return before listeners hear about it.
//!
//! Each successful write bumps the store revision on the worker, and each
//! read reports the revision it saw, so listeners can tell an older
//! snapshot from a newer one.
//!
//! The plain methods keep a sentinel contract: `None` or `0` means the
//! operation did not complete, and the cause is logged. The `try_*` methods
//! return the cause instead.

use super::message::{StoreMessage, StoreRevision};
use super::worker::StoreWorker;
use super::{ServiceError, ServiceResult};
use crate::config::JotpadConfig;
use crate::convert::{result_set_to_entries, ResultCursor};
use crate::db::{open_db, open_db_in_memory};
use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{EntryRepository, SqliteEntryRepository};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Single point of contact with the entry store.
pub struct EntryService {
    worker: StoreWorker,
    messages: Sender<StoreMessage>,
    revision: Arc<AtomicU64>,
}

impl EntryService {
    /// Opens the configured database and starts the store worker.
    ///
    /// `messages` receives every [`StoreMessage`] this facade posts.
    pub fn open(config: &JotpadConfig, messages: Sender<StoreMessage>) -> ServiceResult<Self> {
        let conn = match config.db_path.as_ref() {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        Self::with_repository(SqliteEntryRepository::new(conn), messages)
    }

    /// Starts the store worker around an existing repository.
    pub fn with_repository<R>(repo: R, messages: Sender<StoreMessage>) -> ServiceResult<Self>
    where
        R: EntryRepository + Send + 'static,
    {
        let worker = StoreWorker::spawn(repo)?;
        info!("event=service_open module=service status=ok");
        Ok(Self {
            worker,
            messages,
            revision: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Reads every row. The rows are also converted to entries on the
    /// worker and posted as [`StoreMessage::EntriesLoaded`].
    pub fn read_all(&self) -> Option<ResultCursor> {
        self.try_read_all()
            .map_err(|err| log_failure("read_all", &err))
            .ok()
    }

    /// Inserts `entry` and returns the id the store assigned.
    pub fn insert(&self, entry: &Entry) -> Option<EntryId> {
        self.try_insert(entry)
            .map_err(|err| log_failure("insert", &err))
            .ok()
    }

    /// Replaces the row keyed by `entry.id`. Returns rows replaced.
    pub fn update(&self, entry: &Entry) -> usize {
        self.try_update(entry).unwrap_or_else(|err| {
            log_failure("update", &err);
            0
        })
    }

    /// Returns rows removed.
    pub fn delete_by_id(&self, id: EntryId) -> usize {
        self.try_delete_by_id(id).unwrap_or_else(|err| {
            log_failure("delete", &err);
            0
        })
    }

    /// Writes applied so far. Every write that returned before this call
    /// is counted.
    pub fn revision(&self) -> StoreRevision {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn try_read_all(&self) -> ServiceResult<ResultCursor> {
        let revision = Arc::clone(&self.revision);
        let (cursor, seen) = self.worker.submit(move |repo| {
            repo.get_all()
                .map(|cursor| (cursor, revision.load(Ordering::SeqCst)))
        })??;
        debug!(
            "event=store_read module=service status=ok rows={} revision={seen}",
            cursor.remaining()
        );

        let rows = cursor.clone();
        let messages = self.messages.clone();
        self.post_after("read_all", move || match result_set_to_entries(rows) {
            Ok(entries) => post(
                &messages,
                StoreMessage::EntriesLoaded {
                    entries,
                    revision: seen,
                },
            ),
            Err(err) => error!(
                "event=store_convert module=service status=error error={}",
                err
            ),
        });
        Ok(cursor)
    }

    pub fn try_insert(&self, entry: &Entry) -> ServiceResult<EntryId> {
        let entry = entry.clone();
        let revision = Arc::clone(&self.revision);
        let id = self
            .worker
            .submit(move |repo| repo.insert(&entry).map(|value| bump(&revision, value)))??;
        debug!("event=store_insert module=service status=ok id={id}");
        self.post_repaint("insert");
        Ok(id)
    }

    pub fn try_update(&self, entry: &Entry) -> ServiceResult<usize> {
        let entry = entry.clone();
        let revision = Arc::clone(&self.revision);
        let replaced = self
            .worker
            .submit(move |repo| repo.update(&entry).map(|value| bump(&revision, value)))??;
        debug!("event=store_update module=service status=ok rows={replaced}");
        self.post_repaint("update");
        Ok(replaced)
    }

    pub fn try_delete_by_id(&self, id: EntryId) -> ServiceResult<usize> {
        let revision = Arc::clone(&self.revision);
        let removed = self
            .worker
            .submit(move |repo| repo.delete_by_id(id).map(|value| bump(&revision, value)))??;
        debug!("event=store_delete module=service status=ok id={id} rows={removed}");
        self.post_repaint("delete");
        Ok(removed)
    }

    /// Finishes queued work and stops the worker. Later calls fail.
    pub fn shutdown(&self) {
        self.worker.shutdown();
        info!("event=service_close module=service status=ok");
    }

    pub fn is_open(&self) -> bool {
        self.worker.is_running()
    }

    fn post_repaint(&self, operation: &'static str) {
        let messages = self.messages.clone();
        self.post_after(operation, move || {
            post(&messages, StoreMessage::RepaintRequested)
        });
    }

    fn post_after(&self, operation: &'static str, notify: impl FnOnce() + Send + 'static) {
        if let Err(err) = self.worker.execute(move |_| notify()) {
            warn!(
                "event=store_notify module=service status=error operation={operation} error={err}"
            );
        }
    }
}

fn bump<T>(revision: &AtomicU64, value: T) -> T {
    revision.fetch_add(1, Ordering::SeqCst);
    value
}

fn post(messages: &Sender<StoreMessage>, message: StoreMessage) {
    if messages.send(message).is_err() {
        debug!("event=store_notify module=service status=skipped reason=no_listener");
    }
}

fn log_failure(operation: &str, err: &ServiceError) {
    error!("event=store_op module=service status=error operation={operation} error={err}");
}
