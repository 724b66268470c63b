//! Pure conversions between store rows and [`Entry`] records.
//!
//! # Responsibility
//! - Map a generic field-keyed row to an entry and back.
//! - Drain a forward-only result cursor into an ordered entry list.
//!
//! # Invariants
//! - `to_row(&to_entry(row)?) == row` for every well-formed row, where
//!   well-formed means text `title`/`entry_text` and an integer or absent `id`.
//! - `to_entry(&to_row(entry))? == entry` for every entry.

use crate::model::entry::{Entry, EntryId};
use rusqlite::types::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const COLUMN_ID: &str = "id";
pub const COLUMN_TITLE: &str = "title";
pub const COLUMN_BODY: &str = "entry_text";

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Raised when a row does not carry what an entry needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "row has no `{field}` field"),
            Self::WrongType { field, expected } => {
                write!(f, "row field `{field}` is not {expected}")
            }
        }
    }
}

impl Error for ConvertError {}

/// Generic field-keyed row, the store's view of one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRow {
    fields: BTreeMap<String, Value>,
}

impl FieldRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field, replacing any previous value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder form of [`FieldRow::put`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn text(&self, field: &'static str) -> ConvertResult<String> {
        match self.fields.get(field) {
            Some(Value::Text(value)) => Ok(value.clone()),
            Some(Value::Null) | None => Err(ConvertError::MissingField(field)),
            Some(_) => Err(ConvertError::WrongType {
                field,
                expected: "text",
            }),
        }
    }

    fn optional_id(&self) -> ConvertResult<Option<EntryId>> {
        match self.fields.get(COLUMN_ID) {
            Some(Value::Integer(id)) => Ok(Some(*id)),
            Some(Value::Null) | None => Ok(None),
            Some(_) => Err(ConvertError::WrongType {
                field: COLUMN_ID,
                expected: "an integer",
            }),
        }
    }
}

/// Forward-only cursor over a materialized result set.
///
/// Rows are handed out once, first to last. Dropping the cursor releases
/// whatever is left.
#[derive(Debug, Clone, Default)]
pub struct ResultCursor {
    rows: std::vec::IntoIter<FieldRow>,
}

impl ResultCursor {
    pub fn new(rows: Vec<FieldRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Iterator for ResultCursor {
    type Item = FieldRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Builds an entry from a row's `title`, `entry_text` and `id` fields.
pub fn to_entry(row: &FieldRow) -> ConvertResult<Entry> {
    Ok(Entry {
        id: row.optional_id()?,
        title: row.text(COLUMN_TITLE)?,
        body: row.text(COLUMN_BODY)?,
    })
}

/// Builds a row from an entry. The `id` field is present only when the
/// entry has one, so an unsaved entry lets the store assign it.
pub fn to_row(entry: &Entry) -> FieldRow {
    let mut row = FieldRow::new()
        .with(COLUMN_TITLE, entry.title.clone())
        .with(COLUMN_BODY, entry.body.clone());
    if let Some(id) = entry.id {
        row.put(COLUMN_ID, id);
    }
    row
}

/// Consumes a cursor first-to-last into entries.
///
/// The cursor is taken by value, so it is released on return whether or
/// not every row converted.
pub fn result_set_to_entries<C>(cursor: C) -> ConvertResult<Vec<Entry>>
where
    C: IntoIterator<Item = FieldRow>,
{
    cursor.into_iter().map(|row| to_entry(&row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(id: Option<i64>) -> FieldRow {
        let row = FieldRow::new()
            .with(COLUMN_TITLE, "groceries".to_string())
            .with(COLUMN_BODY, "milk, eggs".to_string());
        match id {
            Some(id) => row.with(COLUMN_ID, id),
            None => row,
        }
    }

    #[test]
    fn row_roundtrips_through_entry() {
        for row in [well_formed(Some(7)), well_formed(None)] {
            let entry = to_entry(&row).expect("well-formed row converts");
            assert_eq!(to_row(&entry), row);
        }
    }

    #[test]
    fn missing_title_is_reported() {
        let row = FieldRow::new().with(COLUMN_BODY, "no title".to_string());
        assert_eq!(
            to_entry(&row).unwrap_err(),
            ConvertError::MissingField(COLUMN_TITLE)
        );
    }

    #[test]
    fn text_id_is_rejected() {
        let row = well_formed(None).with(COLUMN_ID, "seven".to_string());
        assert!(matches!(
            to_entry(&row),
            Err(ConvertError::WrongType { field: "id", .. })
        ));
    }

    #[test]
    fn cursor_is_drained_in_order() {
        let cursor = ResultCursor::new(vec![
            to_row(&Entry::with_id(1, "a", "1")),
            to_row(&Entry::with_id(2, "b", "2")),
        ]);
        let entries = result_set_to_entries(cursor).unwrap();
        let ids: Vec<_> = entries.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn bad_row_stops_conversion() {
        let cursor = ResultCursor::new(vec![
            to_row(&Entry::with_id(1, "a", "1")),
            FieldRow::new().with(COLUMN_TITLE, "orphan".to_string()),
        ]);
        assert_eq!(
            result_set_to_entries(cursor).unwrap_err(),
            ConvertError::MissingField(COLUMN_BODY)
        );
    }
}
