//! Single background worker that owns the entry store.

use super::{ServiceError, ServiceResult};
use crate::repo::entry_repo::EntryRepository;
use log::{debug, error, info};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "jotpad-store";

type Job = Box<dyn FnOnce(&dyn EntryRepository) + Send>;

/// FIFO job queue drained by exactly one thread.
///
/// The repository never leaves the worker thread; jobs borrow it for the
/// duration of their run.
pub struct StoreWorker {
    jobs: Mutex<Option<Sender<Job>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl StoreWorker {
    /// Moves `repo` onto a fresh worker thread.
    pub fn spawn<R>(repo: R) -> ServiceResult<Self>
    where
        R: EntryRepository + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                debug!("event=worker_start module=service status=ok");
                for job in rx {
                    if panic::catch_unwind(AssertUnwindSafe(|| job(&repo))).is_err() {
                        error!("event=worker_job module=service status=error error_code=job_panicked");
                    }
                }
                debug!("event=worker_stop module=service status=ok");
            })
            .map_err(ServiceError::Spawn)?;

        Ok(Self {
            jobs: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Queues `job` and blocks until it has run, returning its output.
    pub fn submit<T, F>(&self, job: F) -> ServiceResult<T>
    where
        F: FnOnce(&dyn EntryRepository) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.execute(move |repo| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(repo)));
            // The caller is blocked on this reply; it only goes away if the
            // caller thread itself died.
            let _ = reply_tx.send(outcome);
        })?;

        match reply_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(ServiceError::JobPanicked),
            Err(_) => Err(ServiceError::WorkerGone),
        }
    }

    /// Queues `job` without waiting for it.
    pub fn execute<F>(&self, job: F) -> ServiceResult<()>
    where
        F: FnOnce(&dyn EntryRepository) + Send + 'static,
    {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = jobs.as_ref().ok_or(ServiceError::WorkerGone)?;
        sender
            .send(Box::new(job))
            .map_err(|_| ServiceError::WorkerGone)
    }

    /// Whether jobs are still accepted.
    pub fn is_running(&self) -> bool {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stops accepting jobs, lets queued ones finish, then joins the thread.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&self) {
        let sender = self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(sender);

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                error!("event=worker_join module=service status=error");
            } else {
                info!("event=worker_join module=service status=ok");
            }
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
