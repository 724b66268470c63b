//! Data access facade over the entry store.
//!
//! # Responsibility
//! - Serialize every store operation onto one background worker.
//! - Tell the presentation side, by message, when data was loaded or changed.
//!
//! # Invariants
//! - Operations complete in submission order (single FIFO worker).
//! - Follow-up notifications are queued behind the operation they follow.

use crate::db::DbError;
use crate::repo::entry_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entry_service;
pub mod message;
pub mod worker;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a queued store operation.
#[derive(Debug)]
pub enum ServiceError {
    Open(DbError),
    Repo(RepoError),
    /// The worker thread could not be started.
    Spawn(std::io::Error),
    /// The worker has shut down (or died) and accepts no more jobs.
    WorkerGone,
    /// The job panicked on the worker; the worker itself keeps running.
    JobPanicked,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open entry store: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Spawn(err) => write!(f, "failed to start store worker: {err}"),
            Self::WorkerGone => write!(f, "store worker is not running"),
            Self::JobPanicked => write!(f, "store job panicked"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Spawn(err) => Some(err),
            Self::WorkerGone | Self::JobPanicked => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Open(value)
    }
}
