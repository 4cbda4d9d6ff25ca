use crate::capabilities::CapabilityCache;
use crate::connection::ConnectionHandler;
use crate::correlation::CorrelationTables;
use crate::file_store::{DiskFileStore, FileStore};
use crate::ids::IdAllocator;
use crate::protocol::MobileOutbound;
use crate::registry::Registry;
use crate::syncp::{PostPool, SyncPBuffer};
use crate::translate::{self, MobileMethod};
use applink_protocol::hmi::{
    HmiNotification, HmiOutbound, HmiRequest, HmiRequestPayload, HmiResult,
};
use applink_protocol::{
    BasicResponse, DriverDistractionState, ProtocolVersion, RpcNotification, RpcResponse,
};
use crossbeam_channel::Sender;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct CoreConfig {
    pub file_root: PathBuf,
    pub file_quota_bytes: u64,
    pub post_workers: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            file_root: PathBuf::from("."),
            file_quota_bytes: 64 * 1024 * 1024,
            post_workers: 2,
        }
    }
}

// Owns every piece of shared state. Only the dispatcher thread touches it,
// which is the serialization the queue design promises.
pub struct AppManager {
    pub(crate) registry: Registry,
    pub(crate) correlations: CorrelationTables,
    pub(crate) capabilities: CapabilityCache,
    pub(crate) ids: IdAllocator,
    pub(crate) syncp: SyncPBuffer,
    pub(crate) posts: PostPool,
    pub(crate) driver_distraction: Option<DriverDistractionState>,
    pub(crate) mobile_tx: Sender<MobileOutbound>,
    pub(crate) hmi_tx: Sender<HmiOutbound>,
    pub(crate) connection: Box<dyn ConnectionHandler>,
    pub(crate) files: Box<dyn FileStore>,
}

impl AppManager {
    pub fn new(
        mobile_tx: Sender<MobileOutbound>,
        hmi_tx: Sender<HmiOutbound>,
        connection: Box<dyn ConnectionHandler>,
        files: Box<dyn FileStore>,
        post_workers: usize,
    ) -> Self {
        Self {
            registry: Registry::new(),
            correlations: CorrelationTables::new(),
            capabilities: CapabilityCache::new(),
            ids: IdAllocator::new(),
            syncp: SyncPBuffer::new(),
            posts: PostPool::new(post_workers),
            driver_distraction: None,
            mobile_tx,
            hmi_tx,
            connection,
            files,
        }
    }

    pub fn with_config(
        config: CoreConfig,
        mobile_tx: Sender<MobileOutbound>,
        hmi_tx: Sender<HmiOutbound>,
        connection: Box<dyn ConnectionHandler>,
    ) -> Self {
        let files = Box::new(DiskFileStore::new(config.file_root, config.file_quota_bytes));
        Self::new(mobile_tx, hmi_tx, connection, files, config.post_workers)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn correlations(&self) -> &CorrelationTables {
        &self.correlations
    }

    // Outbound channels are bounded send buffers: block when full, never
    // drop. A disconnected peer is a shutdown in progress.
    pub(crate) fn respond(
        &self,
        session_key: u32,
        correlation_id: u32,
        response: RpcResponse,
    ) {
        let _ = self.mobile_tx.send(MobileOutbound::Response {
            session_key,
            correlation_id,
            response,
        });
    }

    pub(crate) fn respond_basic(
        &self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        method: MobileMethod,
        body: BasicResponse,
    ) {
        self.respond(
            session_key,
            correlation_id,
            translate::basic_response(version, method, body),
        );
    }

    pub(crate) fn notify(&self, session_key: u32, notification: RpcNotification) {
        let _ = self.mobile_tx.send(MobileOutbound::Notification {
            session_key,
            notification,
        });
    }

    // Allocates the bus id. Callers that expect an upstream response record
    // the correlation through one of the _for variants.
    pub(crate) fn send_hmi(&mut self, payload: HmiRequestPayload) -> u32 {
        let id = self.ids.next_id();
        let _ = self
            .hmi_tx
            .send(HmiOutbound::Request(HmiRequest { id, payload }));
        id
    }

    pub(crate) fn send_hmi_internal(&mut self, session_key: u32, payload: HmiRequestPayload) -> u32 {
        let id = self.send_hmi(payload);
        self.correlations.record_outbound(id, session_key);
        id
    }

    pub(crate) fn send_hmi_for(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        payload: HmiRequestPayload,
    ) -> u32 {
        let id = self.send_hmi(payload);
        self.correlations
            .record_outbound_for(id, session_key, correlation_id);
        id
    }

    pub(crate) fn send_hmi_response(&self, result: HmiResult) {
        let _ = self.hmi_tx.send(HmiOutbound::Response(result));
    }

    pub(crate) fn send_hmi_notification(&self, notification: HmiNotification) {
        let _ = self.hmi_tx.send(HmiOutbound::Notification(notification));
    }

    pub(crate) fn emit_hmi_status(&self, session_key: u32) {
        let Some(app) = self.registry.get(session_key) else {
            return;
        };
        self.notify(
            session_key,
            translate::on_hmi_status(
                app.version,
                app.hmi_level,
                app.audio_state,
                app.system_context,
            ),
        );
    }

    pub(crate) fn device_name_for(&self, session_key: u32) -> String {
        let Some(handle) = self.correlations.resolve_device(session_key) else {
            log::warn!("no device assigned to session {session_key}");
            return String::new();
        };
        self.connection
            .device_list()
            .into_iter()
            .find(|device| device.handle == handle)
            .map(|device| device.name)
            .unwrap_or_default()
    }

    // Removes an app's HMI footprint: background status, then deletes for
    // every command, menu and choice set, each with a correlation record so
    // the response is absorbed instead of reaching mobile. Returns the delete
    // ids for the activation state machine.
    pub(crate) fn teardown_app_footprint(
        &mut self,
        session_key: u32,
        notify_mobile: bool,
    ) -> BTreeSet<u32> {
        // The active app gives up the slot and drops to BACKGROUND; anything
        // else keeps the level it already had.
        if self.registry.active_session() == Some(session_key) {
            self.registry.deactivate_active();
        }
        let Some(app) = self.registry.get(session_key) else {
            return BTreeSet::new();
        };
        let commands: Vec<(u32, crate::app_state::CommandType)> = app
            .commands()
            .map(|(cmd_id, cmd_type, _)| (cmd_id, cmd_type))
            .collect();
        let menus: Vec<u32> = app.menus().map(|(menu_id, _)| menu_id).collect();
        let choice_sets: Vec<u32> = app.choice_sets().map(|(set_id, _)| set_id).collect();

        if notify_mobile {
            self.emit_hmi_status(session_key);
        }

        let mut delete_ids = BTreeSet::new();
        for (cmd_id, cmd_type) in commands {
            let payload = match cmd_type {
                crate::app_state::CommandType::Ui => HmiRequestPayload::UiDeleteCommand {
                    app_id: session_key,
                    cmd_id,
                },
                crate::app_state::CommandType::Vr => HmiRequestPayload::VrDeleteCommand {
                    app_id: session_key,
                    cmd_id,
                },
            };
            delete_ids.insert(self.send_hmi_internal(session_key, payload));
        }
        for menu_id in menus {
            delete_ids.insert(self.send_hmi_internal(
                session_key,
                HmiRequestPayload::UiDeleteSubMenu {
                    app_id: session_key,
                    menu_id,
                },
            ));
        }
        for set_id in choice_sets {
            delete_ids.insert(self.send_hmi_internal(
                session_key,
                HmiRequestPayload::UiDeleteInteractionChoiceSet {
                    app_id: session_key,
                    interaction_choice_set_id: set_id,
                },
            ));
        }
        delete_ids
    }
}
