//! Address-routed CRUD over [`EntryService`].

use super::change_bus::{ChangeBus, ChangeKind, ChangeSubscription, EntriesChanged};
use super::content_uri::ContentUri;
use super::{GatewayError, GatewayResult};
use crate::config::JotpadConfig;
use crate::convert::{to_entry, FieldRow, ResultCursor};
use crate::model::entry::EntryId;
use crate::service::entry_service::EntryService;
use log::{error, warn};
use std::sync::Arc;

/// Routes content addresses to the facade and publishes landed writes.
pub struct ContentGateway {
    collection: ContentUri,
    service: Arc<EntryService>,
    changes: ChangeBus,
}

impl ContentGateway {
    pub fn new(config: &JotpadConfig, service: Arc<EntryService>) -> Self {
        Self {
            collection: ContentUri::collection(config.authority.as_str(), config.table.as_str()),
            service,
            changes: ChangeBus::new(),
        }
    }

    /// `content://<authority>/<table>`.
    pub fn collection_uri(&self) -> ContentUri {
        self.collection.clone()
    }

    /// `content://<authority>/<table>/<id>`.
    pub fn item_uri(&self, id: EntryId) -> ContentUri {
        self.collection.with_id(id)
    }

    pub fn service(&self) -> &Arc<EntryService> {
        &self.service
    }

    /// Registers for [`EntriesChanged`] events on this collection.
    pub fn subscribe(&self) -> ChangeSubscription {
        self.changes.subscribe()
    }

    /// Read-all on the collection address. `None` if unroutable or failed.
    pub fn query(&self, uri: &ContentUri) -> Option<ResultCursor> {
        self.try_query(uri)
            .map_err(|err| log_rejected("query", uri, &err))
            .ok()
    }

    /// Inserts `values`; returns the new entry's address, carrying the
    /// store-assigned id.
    pub fn insert(&self, uri: &ContentUri, values: &FieldRow) -> Option<ContentUri> {
        self.try_insert(uri, values)
            .map_err(|err| log_rejected("insert", uri, &err))
            .ok()
    }

    /// Rows replaced, `0` if nothing was or the request failed.
    pub fn update(&self, uri: &ContentUri, values: &FieldRow) -> usize {
        self.try_update(uri, values).unwrap_or_else(|err| {
            log_rejected("update", uri, &err);
            0
        })
    }

    /// Rows removed, `0` if nothing was or the request failed.
    pub fn delete(&self, uri: &ContentUri) -> usize {
        self.try_delete(uri).unwrap_or_else(|err| {
            log_rejected("delete", uri, &err);
            0
        })
    }

    pub fn try_query(&self, uri: &ContentUri) -> GatewayResult<ResultCursor> {
        self.route(uri)?;
        Ok(self.service.try_read_all()?)
    }

    pub fn try_insert(&self, uri: &ContentUri, values: &FieldRow) -> GatewayResult<ContentUri> {
        self.route(uri)?;
        let entry = to_entry(values)?;
        let id = self.service.try_insert(&entry)?;
        let inserted = self.item_uri(id);
        self.publish(ChangeKind::Inserted, &inserted);
        Ok(inserted)
    }

    /// The id in `uri` wins over any `id` field in `values`.
    pub fn try_update(&self, uri: &ContentUri, values: &FieldRow) -> GatewayResult<usize> {
        let id = self.route_item(uri)?;
        let mut entry = to_entry(values)?;
        entry.id = Some(id);
        let replaced = self.service.try_update(&entry)?;
        if replaced > 0 {
            self.publish(ChangeKind::Updated, uri);
        }
        Ok(replaced)
    }

    pub fn try_delete(&self, uri: &ContentUri) -> GatewayResult<usize> {
        let id = self.route_item(uri)?;
        let removed = self.service.try_delete_by_id(id)?;
        if removed > 0 {
            self.publish(ChangeKind::Deleted, uri);
        }
        Ok(removed)
    }

    fn route(&self, uri: &ContentUri) -> GatewayResult<()> {
        if uri.same_collection(&self.collection) {
            Ok(())
        } else {
            Err(GatewayError::UnknownUri(uri.to_string()))
        }
    }

    fn route_item(&self, uri: &ContentUri) -> GatewayResult<EntryId> {
        self.route(uri)?;
        uri.id()
            .ok_or_else(|| GatewayError::MissingId(uri.to_string()))
    }

    fn publish(&self, kind: ChangeKind, uri: &ContentUri) {
        self.changes.publish(&EntriesChanged {
            kind,
            uri: uri.clone(),
        });
    }
}

fn log_rejected(operation: &str, uri: &ContentUri, err: &GatewayError) {
    if let GatewayError::Service(_) = err {
        error!("event=gateway_op module=gateway status=error operation={operation} uri={uri} error={err}");
    } else {
        warn!("event=gateway_route module=gateway status=rejected operation={operation} uri={uri} error={err}");
    }
}
