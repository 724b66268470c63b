//! Entries database: connection bootstrap and schema history.
//!
//! Every connection handed out here is migrated and owned by exactly one
//! store worker. Rows are never touched before the schema is current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::MigrationError;
pub use open::{open_db, open_db_in_memory};

/// Name of the only persisted table.
pub const ENTRIES_TABLE: &str = "entries";

/// Location reported for in-memory databases.
pub const IN_MEMORY_LOCATION: &str = ":memory:";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open `location`.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// A statement failed on an already open connection.
    Query(rusqlite::Error),
    /// The schema could not be brought up to date.
    Migration(MigrationError),
}

impl DbError {
    /// Whether this build is too old for the database it was pointed at.
    pub fn is_newer_schema(&self) -> bool {
        matches!(self, Self::Migration(MigrationError::NewerSchema { .. }))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open entries database at {location}: {source}")
            }
            Self::Query(err) => write!(f, "entries query failed: {err}"),
            Self::Migration(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Query(err) => Some(err),
            Self::Migration(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

impl From<MigrationError> for DbError {
    fn from(value: MigrationError) -> Self {
        Self::Migration(value)
    }
}
