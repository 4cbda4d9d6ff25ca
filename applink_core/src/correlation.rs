use crate::connection::DeviceHandle;
use applink_protocol::ButtonName;
use std::collections::HashMap;

// Internally-issued requests (teardown, replay) have no mobile correlation id;
// their responses are absorbed and never surface upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundRecord {
    pub session_key: u32,
    pub correlation_id: Option<u32>,
}

// All four maps are confined to the dispatcher thread; no locking.
#[derive(Debug, Default)]
pub struct CorrelationTables {
    outbound: HashMap<u32, OutboundRecord>,
    commands: HashMap<u32, u32>,
    buttons: HashMap<ButtonName, u32>,
    devices: HashMap<u32, DeviceHandle>,
}

impl CorrelationTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_outbound(&mut self, hmi_id: u32, session_key: u32) {
        self.outbound.insert(
            hmi_id,
            OutboundRecord {
                session_key,
                correlation_id: None,
            },
        );
    }

    pub fn record_outbound_for(&mut self, hmi_id: u32, session_key: u32, correlation_id: u32) {
        self.outbound.insert(
            hmi_id,
            OutboundRecord {
                session_key,
                correlation_id: Some(correlation_id),
            },
        );
    }

    pub fn resolve_outbound(&self, hmi_id: u32) -> Option<OutboundRecord> {
        self.outbound.get(&hmi_id).copied()
    }

    pub fn forget_outbound(&mut self, hmi_id: u32) {
        self.outbound.remove(&hmi_id);
    }

    pub fn record_command(&mut self, hmi_id: u32, cmd_id: u32) {
        self.commands.insert(hmi_id, cmd_id);
    }

    pub fn resolve_command(&self, hmi_id: u32) -> Option<u32> {
        self.commands.get(&hmi_id).copied()
    }

    pub fn forget_command(&mut self, hmi_id: u32) {
        self.commands.remove(&hmi_id);
    }

    // Button subscriptions are a single global slot per button: last writer
    // wins, and the displaced subscriber is not notified.
    pub fn subscribe_button(&mut self, button: ButtonName, session_key: u32) {
        if let Some(previous) = self.buttons.insert(button, session_key) {
            if previous != session_key {
                log::warn!(
                    "button {:?} subscription moved from session {} to {}",
                    button,
                    previous,
                    session_key
                );
            }
        }
    }

    pub fn resolve_button(&self, button: ButtonName) -> Option<u32> {
        self.buttons.get(&button).copied()
    }

    pub fn unsubscribe_button(&mut self, button: ButtonName) {
        self.buttons.remove(&button);
    }

    pub fn assign_device(&mut self, session_key: u32, device: DeviceHandle) {
        self.devices.insert(session_key, device);
    }

    pub fn resolve_device(&self, session_key: u32) -> Option<DeviceHandle> {
        self.devices.get(&session_key).copied()
    }

    // O(N) over every table; runs once per unregister.
    pub fn drop_all_for(&mut self, session_key: u32) {
        let orphaned: Vec<u32> = self
            .outbound
            .iter()
            .filter(|(_, record)| record.session_key == session_key)
            .map(|(id, _)| *id)
            .collect();
        for hmi_id in orphaned {
            self.outbound.remove(&hmi_id);
            self.commands.remove(&hmi_id);
        }
        self.buttons.retain(|_, key| *key != session_key);
        self.devices.remove(&session_key);
    }

    pub fn outbound_len(&self) -> usize {
        self.outbound.len()
    }
}
