use crate::app_state::AppState;
use applink_protocol::{HmiLevel, ResultCode};
use std::collections::{BTreeMap, BTreeSet};

// Active-app pointer as a state machine: while a switch is in flight the
// incoming app is the registry-visible active one, and the outgoing app's
// teardown delete ids are parked here so their responses can be absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    Active {
        session_key: u32,
    },
    Switching {
        outgoing: u32,
        incoming: u32,
        pending_deletes: BTreeSet<u32>,
    },
}

#[derive(Debug)]
pub struct Registry {
    apps: BTreeMap<u32, AppState>,
    activation: ActivationState,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            apps: BTreeMap::new(),
            activation: ActivationState::Idle,
        }
    }

    pub fn register(&mut self, app: AppState) -> Result<(), ResultCode> {
        if self.apps.contains_key(&app.session_key) {
            return Err(ResultCode::ApplicationRegisteredAlready);
        }
        self.apps.insert(app.session_key, app);
        Ok(())
    }

    pub fn unregister(&mut self, session_key: u32) -> Option<AppState> {
        let app = self.apps.remove(&session_key)?;
        self.activation = match std::mem::replace(&mut self.activation, ActivationState::Idle) {
            ActivationState::Active { session_key: key } if key == session_key => {
                ActivationState::Idle
            }
            ActivationState::Switching {
                outgoing,
                incoming,
                pending_deletes,
            } => {
                if incoming == session_key {
                    ActivationState::Idle
                } else if outgoing == session_key {
                    // The outgoing app is gone; its delete responses will be
                    // dropped on the unknown-correlation path instead.
                    ActivationState::Active {
                        session_key: incoming,
                    }
                } else {
                    ActivationState::Switching {
                        outgoing,
                        incoming,
                        pending_deletes,
                    }
                }
            }
            other => other,
        };
        Some(app)
    }

    pub fn contains(&self, session_key: u32) -> bool {
        self.apps.contains_key(&session_key)
    }

    pub fn get(&self, session_key: u32) -> Option<&AppState> {
        self.apps.get(&session_key)
    }

    pub fn get_mut(&mut self, session_key: u32) -> Option<&mut AppState> {
        self.apps.get_mut(&session_key)
    }

    pub fn active_session(&self) -> Option<u32> {
        match &self.activation {
            ActivationState::Idle => None,
            ActivationState::Active { session_key } => Some(*session_key),
            ActivationState::Switching { incoming, .. } => Some(*incoming),
        }
    }

    pub fn activation(&self) -> &ActivationState {
        &self.activation
    }

    pub fn set_active(&mut self, session_key: u32) {
        self.activation = ActivationState::Active { session_key };
        if let Some(app) = self.apps.get_mut(&session_key) {
            app.hmi_level = HmiLevel::Full;
        }
    }

    pub fn begin_switch(&mut self, outgoing: u32, incoming: u32, pending_deletes: BTreeSet<u32>) {
        if pending_deletes.is_empty() {
            self.set_active(incoming);
        } else {
            self.activation = ActivationState::Switching {
                outgoing,
                incoming,
                pending_deletes,
            };
            if let Some(app) = self.apps.get_mut(&incoming) {
                app.hmi_level = HmiLevel::Full;
            }
        }
    }

    // Consumes one teardown delete response. Returns true when the id was a
    // pending teardown delete (the caller must not forward it upstream).
    pub fn note_delete_response(&mut self, hmi_id: u32) -> bool {
        let ActivationState::Switching {
            incoming,
            pending_deletes,
            ..
        } = &mut self.activation
        else {
            return false;
        };
        if !pending_deletes.remove(&hmi_id) {
            return false;
        }
        if pending_deletes.is_empty() {
            let incoming = *incoming;
            self.activation = ActivationState::Active {
                session_key: incoming,
            };
        }
        true
    }

    // Drops the active app to BACKGROUND and releases the active slot.
    // Emitting the matching OnHMIStatus is the caller's job.
    pub fn deactivate_active(&mut self) -> Option<u32> {
        let session_key = self.active_session()?;
        if let Some(app) = self.apps.get_mut(&session_key) {
            app.hmi_level = HmiLevel::Background;
        }
        self.activation = ActivationState::Idle;
        Some(session_key)
    }

    // First match in ascending session-key order; duplicate cmd_ids across
    // apps resolve to the lowest session key.
    pub fn lookup_by_command(&self, cmd_id: u32) -> Option<u32> {
        self.apps
            .values()
            .find(|app| app.has_command(cmd_id))
            .map(|app| app.session_key)
    }

    pub fn sessions_by_name(&self, app_name: &str) -> Vec<u32> {
        self.apps
            .values()
            .filter(|app| app.name == app_name)
            .map(|app| app.session_key)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppState> {
        self.apps.values()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
