//! Core of Jotpad, a small note list backed by SQLite.
//!
//! Layering, leaf first: `model` -> `convert` -> `repo` -> `service`
//! (single store worker) -> `gateway` (content addresses, change events)
//! -> `presentation` (controller, list adapter, forms).

pub mod app;
pub mod config;
pub mod convert;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod service;

pub use app::Jotpad;
pub use config::JotpadConfig;
pub use convert::{result_set_to_entries, to_entry, to_row, ConvertError, FieldRow, ResultCursor};
pub use gateway::change_bus::{ChangeKind, ChangeSubscription, EntriesChanged};
pub use gateway::content_gateway::ContentGateway;
pub use gateway::content_uri::ContentUri;
pub use gateway::GatewayError;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{Entry, EntryId, UNSET_ID};
pub use presentation::adapter::EntryListAdapter;
pub use presentation::commands::{EditTarget, EntryCommands, EntryFields};
pub use presentation::controller::{ControllerState, NoteController};
pub use presentation::diff::{apply_updates, compute_updates, ListUpdate};
pub use presentation::forms::{CreateForm, EditForm};
pub use presentation::view::{ListView, MirrorView};
pub use repo::entry_repo::{EntryRepository, RepoError, SqliteEntryRepository};
pub use service::entry_service::EntryService;
pub use service::message::{StoreMessage, StoreRevision};
pub use service::ServiceError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
