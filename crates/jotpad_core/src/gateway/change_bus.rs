//! Typed publish/subscribe channel for entry collection changes.

use super::content_uri::ContentUri;
use log::trace;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

/// One landed write. `uri` addresses the affected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesChanged {
    pub kind: ChangeKind,
    pub uri: ContentUri,
}

/// Fan-out of [`EntriesChanged`] to any number of subscribers.
#[derive(Debug, Default)]
pub struct ChangeBus {
    subscribers: Mutex<Vec<Sender<EntriesChanged>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts receiving every event published from now on.
    pub fn subscribe(&self) -> ChangeSubscription {
        let (tx, rx) = mpsc::channel();
        self.lock().push(tx);
        ChangeSubscription { events: rx }
    }

    /// Sends `event` to live subscribers and forgets dropped ones.
    /// Returns how many received it.
    pub fn publish(&self, event: &EntriesChanged) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        trace!(
            "event=change_publish module=gateway status=ok kind={:?} subscribers={}",
            event.kind,
            subscribers.len()
        );
        subscribers.len()
    }

    /// Subscribers that were alive at the last publish or subscribed since.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<EntriesChanged>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of a [`ChangeBus`] subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ChangeSubscription {
    events: Receiver<EntriesChanged>,
}

impl ChangeSubscription {
    /// Next queued event, without blocking.
    pub fn try_next(&self) -> Option<EntriesChanged> {
        self.events.try_recv().ok()
    }

    /// Next event, waiting up to `timeout`.
    pub fn next_timeout(&self, timeout: Duration) -> Option<EntriesChanged> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Every queued event, oldest first.
    pub fn drain(&self) -> Vec<EntriesChanged> {
        self.events.try_iter().collect()
    }
}
