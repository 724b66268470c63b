//! Schema history of the entries database.
//!
//! Step `n` (1-based) is the n-th SQL file below. A database at
//! `PRAGMA user_version = n` has run steps `1..=n`; the version is bumped
//! inside the same transaction as the step.

use crate::db::DbResult;
use rusqlite::{Connection, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SCHEMA_STEPS: [&str; 1] = [include_str!("0001_entries.sql")];

#[derive(Debug)]
pub enum MigrationError {
    /// The file was written by a newer build.
    NewerSchema { found: u32, supported: u32 },
    /// Step `version` failed; nothing from this run was committed.
    Step {
        version: u32,
        source: rusqlite::Error,
    },
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewerSchema { found, supported } => write!(
                f,
                "entries schema v{found} is newer than this build (v{supported})"
            ),
            Self::Step { version, source } => {
                write!(f, "entries schema step v{version} failed: {source}")
            }
        }
    }
}

impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NewerSchema { .. } => None,
            Self::Step { source, .. } => Some(source),
        }
    }
}

/// Schema version a fresh database ends up at.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Runs every step past the stored version, all in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(MigrationError::NewerSchema { found, supported }.into());
    }

    let tx = conn.transaction()?;
    for (version, sql) in (1u32..).zip(SCHEMA_STEPS).skip(found as usize) {
        run_step(&tx, version, sql).map_err(|source| MigrationError::Step { version, source })?;
    }
    tx.commit()?;
    Ok(())
}

fn run_step(tx: &Transaction<'_>, version: u32, sql: &str) -> rusqlite::Result<()> {
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)
}
