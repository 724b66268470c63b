//! Content gateway between presentation code and the data access facade.
//!
//! # Responsibility
//! - Route CRUD requests addressed as `content://<authority>/<table>[/<id>]`.
//! - Publish a typed change event to every subscriber after a write lands.
//!
//! # Invariants
//! - Collection addresses (no id) serve read-all and insert.
//! - Item addresses (with id) serve update and delete; insert ignores the id.
//! - Only writes that affected at least one row are published.

use crate::convert::ConvertError;
use crate::service::ServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod change_bus;
pub mod content_gateway;
pub mod content_uri;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug)]
pub enum GatewayError {
    MalformedUri(String),
    /// Well-formed address for an authority or table this gateway does not serve.
    UnknownUri(String),
    /// Update or delete addressed the whole collection.
    MissingId(String),
    InvalidValues(ConvertError),
    Service(ServiceError),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedUri(uri) => write!(f, "malformed content address `{uri}`"),
            Self::UnknownUri(uri) => write!(f, "no route for content address `{uri}`"),
            Self::MissingId(uri) => write!(f, "content address `{uri}` names no entry"),
            Self::InvalidValues(err) => write!(f, "invalid entry values: {err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValues(err) => Some(err),
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for GatewayError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<ConvertError> for GatewayError {
    fn from(value: ConvertError) -> Self {
        Self::InvalidValues(value)
    }
}
