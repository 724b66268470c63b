//! Application wiring with an explicit open/shutdown lifecycle.

use crate::config::JotpadConfig;
use crate::gateway::content_gateway::ContentGateway;
use crate::presentation::controller::NoteController;
use crate::presentation::view::ListView;
use crate::service::entry_service::EntryService;
use crate::service::ServiceResult;
use log::info;
use std::sync::mpsc;
use std::sync::Arc;

/// One running instance: store worker, gateway, and the controller
/// drawing into `V`.
pub struct Jotpad<V: ListView> {
    gateway: Arc<ContentGateway>,
    controller: NoteController<V>,
}

impl<V: ListView> Jotpad<V> {
    /// Opens the store, wires gateway and controller, and requests the
    /// first load.
    pub fn open(config: &JotpadConfig, view: V) -> ServiceResult<Self> {
        let (messages_tx, messages_rx) = mpsc::channel();
        let service = Arc::new(EntryService::open(config, messages_tx)?);
        let gateway = Arc::new(ContentGateway::new(config, service));
        let mut controller = NoteController::new(Arc::clone(&gateway), messages_rx, view);
        controller.start();
        info!(
            "event=app_open module=app status=ok authority={} table={}",
            config.authority, config.table
        );
        Ok(Self {
            gateway,
            controller,
        })
    }

    pub fn gateway(&self) -> &Arc<ContentGateway> {
        &self.gateway
    }

    pub fn controller(&self) -> &NoteController<V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NoteController<V> {
        &mut self.controller
    }

    /// Lets queued store work finish, stops the worker, and hands back the
    /// controller for a final look at its state.
    pub fn shutdown(mut self) -> NoteController<V> {
        self.controller.pause();
        self.gateway.service().shutdown();
        info!("event=app_shutdown module=app status=ok");
        self.controller
    }
}
