//! Runtime configuration for one Jotpad instance.

use crate::db::ENTRIES_TABLE;
use std::path::PathBuf;

pub const DEFAULT_AUTHORITY: &str = "jotpad";

/// Where entries live and how they are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JotpadConfig {
    /// Authority part of `content://<authority>/<table>[/<id>]`.
    pub authority: String,
    /// Table part of the content address.
    pub table: String,
    /// Database file; `None` keeps entries in memory for the process lifetime.
    pub db_path: Option<PathBuf>,
}

impl Default for JotpadConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            table: ENTRIES_TABLE.to_string(),
            db_path: None,
        }
    }
}

impl JotpadConfig {
    /// Default addressing with entries persisted to `path`.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }
}
