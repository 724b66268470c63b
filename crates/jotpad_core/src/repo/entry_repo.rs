//! Entry store over the `entries` table.
//!
//! # Responsibility
//! - Get-all, insert, update and delete-by-id over entry rows.
//! - Keep SQL inside the persistence boundary; callers see field rows and
//!   entries only.

use crate::convert::{ConvertError, FieldRow, ResultCursor};
use crate::db::DbError;
use crate::model::entry::{Entry, EntryId, UNSET_ID};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT id, title, entry_text FROM entries ORDER BY id ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Convert(ConvertError),
    /// An update was asked for an entry the store never assigned an id to.
    MissingId,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Convert(err) => write!(f, "invalid entry row: {err}"),
            Self::MissingId => write!(f, "entry has no store id"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Convert(err) => Some(err),
            Self::MissingId => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Query(value))
    }
}

impl From<ConvertError> for RepoError {
    fn from(value: ConvertError) -> Self {
        Self::Convert(value)
    }
}

/// Opaque relational store for entry rows.
pub trait EntryRepository {
    /// Every row, ordered by id.
    fn get_all(&self) -> RepoResult<ResultCursor>;
    /// Inserts with replace-on-conflict; returns the store-assigned id.
    fn insert(&self, entry: &Entry) -> RepoResult<EntryId>;
    /// Replaces the row keyed by `entry.id`; returns rows replaced.
    fn update(&self, entry: &Entry) -> RepoResult<usize>;
    /// Returns rows removed.
    fn delete_by_id(&self, id: EntryId) -> RepoResult<usize>;
}

/// SQLite-backed entry store. Owns its connection so it can live on the
/// worker thread.
pub struct SqliteEntryRepository {
    conn: Connection,
}

impl SqliteEntryRepository {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Gives the connection back, e.g. for inspection in tests.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl EntryRepository for SqliteEntryRepository {
    fn get_all(&self) -> RepoResult<ResultCursor> {
        let mut stmt = self.conn.prepare(ENTRY_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut fields = Vec::new();
        while let Some(row) = rows.next()? {
            fields.push(field_row_from_sql(row)?);
        }
        Ok(ResultCursor::new(fields))
    }

    fn insert(&self, entry: &Entry) -> RepoResult<EntryId> {
        // NULL lets AUTOINCREMENT pick the id.
        let id = entry.id.filter(|id| *id != UNSET_ID);
        self.conn.execute(
            "INSERT OR REPLACE INTO entries (id, title, entry_text) VALUES (?1, ?2, ?3);",
            params![id, entry.title.as_str(), entry.body.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, entry: &Entry) -> RepoResult<usize> {
        let id = entry.id.ok_or(RepoError::MissingId)?;
        let changed = self.conn.execute(
            "UPDATE OR REPLACE entries SET title = ?1, entry_text = ?2 WHERE id = ?3;",
            params![entry.title.as_str(), entry.body.as_str(), id],
        )?;
        Ok(changed)
    }

    fn delete_by_id(&self, id: EntryId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn field_row_from_sql(row: &Row<'_>) -> RepoResult<FieldRow> {
    let mut fields = FieldRow::new();
    for (index, name) in row.as_ref().column_names().into_iter().enumerate() {
        fields.put(name, row.get::<_, Value>(index)?);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::{EntryRepository, RepoError, SqliteEntryRepository};
    use crate::db::open_db_in_memory;
    use crate::model::entry::{Entry, UNSET_ID};

    fn repo() -> SqliteEntryRepository {
        SqliteEntryRepository::new(open_db_in_memory().expect("in-memory db"))
    }

    #[test]
    fn update_without_id_is_rejected() {
        let err = repo().update(&Entry::new("t", "b")).unwrap_err();
        assert!(matches!(err, RepoError::MissingId));
    }

    #[test]
    fn insert_with_unset_id_gets_a_fresh_id() {
        let repo = repo();
        assert_eq!(repo.insert(&Entry::with_id(UNSET_ID, "a", "1")).unwrap(), 1);
        assert_eq!(repo.insert(&Entry::with_id(UNSET_ID, "b", "2")).unwrap(), 2);
        assert_eq!(repo.get_all().unwrap().remaining(), 2);
    }

    #[test]
    fn delete_of_unknown_id_removes_nothing() {
        assert_eq!(repo().delete_by_id(42).unwrap(), 0);
    }
}
