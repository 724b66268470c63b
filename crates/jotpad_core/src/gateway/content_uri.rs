//! `content://` addresses for the entry collection and single entries.

use super::{GatewayError, GatewayResult};
use crate::model::entry::EntryId;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const CONTENT_SCHEME: &str = "content://";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    authority: String,
    table: String,
    id: Option<EntryId>,
}

impl ContentUri {
    /// Address of the whole collection.
    pub fn collection(authority: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            table: table.into(),
            id: None,
        }
    }

    /// Address of one entry.
    pub fn item(authority: impl Into<String>, table: impl Into<String>, id: EntryId) -> Self {
        Self {
            id: Some(id),
            ..Self::collection(authority, table)
        }
    }

    /// Same collection, addressing `id`.
    pub fn with_id(&self, id: EntryId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Same collection, without an id.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id(&self) -> Option<EntryId> {
        self.id
    }

    /// Last path segment as text: the id if present, otherwise the table.
    pub fn last_path_segment(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.table.clone(),
        }
    }

    /// Whether this address and `other` point into the same collection.
    pub fn same_collection(&self, other: &ContentUri) -> bool {
        self.authority == other.authority && self.table == other.table
    }

    /// Parses `content://<authority>/<table>[/<id>]`. The id segment must be
    /// all digits.
    pub fn parse(value: &str) -> GatewayResult<Self> {
        let malformed = || GatewayError::MalformedUri(value.to_string());
        let rest = value.strip_prefix(CONTENT_SCHEME).ok_or_else(malformed)?;

        let mut segments = rest.split('/');
        let authority = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let table = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let id = match segments.next() {
            None => None,
            Some(segment) if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => {
                Some(segment.parse::<EntryId>().map_err(|_| malformed())?)
            }
            Some(_) => return Err(malformed()),
        };
        if segments.next().is_some() {
            return Err(malformed());
        }

        Ok(Self {
            authority: authority.to_string(),
            table: table.to_string(),
            id,
        })
    }
}

impl FromStr for ContentUri {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ContentUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CONTENT_SCHEME}{}/{}", self.authority, self.table)?;
        if let Some(id) = self.id {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}
