use crate::app_state::CommandType;
use crate::manager::AppManager;
use crate::syncp::{parse_url, PostJob};
use crate::translate::{self, MobileMethod};
use applink_protocol::hmi::{
    HmiCommand, HmiMethod, HmiRequestPayload, HmiResponse, HmiResult,
};
use applink_protocol::v2::V2Response;
use applink_protocol::{
    AudioStreamingState, BasicResponse, HmiApplication, ResultCode, RpcResponse, SystemContext,
    TriggerSource,
};
use std::time::Duration;

impl AppManager {
    pub fn handle_hmi(&mut self, command: HmiCommand) {
        match command {
            HmiCommand::Response(response) => self.handle_bus_response(response),
            HmiCommand::UiSliderResponse {
                id,
                result,
                slider_position,
            } => self.handle_slider_response(id, result, slider_position),
            HmiCommand::UiAlertResponse {
                id,
                result,
                try_again_time,
            } => self.handle_alert_response(id, result, try_again_time),
            HmiCommand::UiGetCapabilitiesResponse {
                id: _,
                display_capabilities,
                hmi_zone_capabilities,
                soft_button_capabilities,
            } => {
                self.capabilities.display_capabilities = Some(display_capabilities);
                self.capabilities.hmi_zone_capabilities = hmi_zone_capabilities;
                if let Some(soft_buttons) = soft_button_capabilities {
                    self.capabilities.soft_button_capabilities = Some(soft_buttons);
                }
            }
            HmiCommand::VrGetCapabilitiesResponse {
                id: _,
                capabilities,
            } => {
                self.capabilities.vr_capabilities = capabilities;
            }
            HmiCommand::TtsGetCapabilitiesResponse {
                id: _,
                capabilities,
            } => {
                self.capabilities.speech_capabilities = capabilities;
            }
            HmiCommand::ButtonsGetCapabilitiesResponse {
                id: _,
                capabilities,
                preset_bank_capabilities,
            } => {
                self.capabilities.button_capabilities = capabilities;
                if let Some(preset_bank) = preset_bank_capabilities {
                    self.capabilities.preset_bank_capabilities = Some(preset_bank);
                }
            }
            HmiCommand::UiGetLanguageResponse {
                id: _,
                hmi_display_language,
            } => {
                self.capabilities.ui_language = hmi_display_language;
            }
            HmiCommand::VrGetLanguageResponse { id: _, language } => {
                self.capabilities.vr_language = language;
            }
            HmiCommand::TtsGetLanguageResponse { id: _, language } => {
                self.capabilities.tts_language = language;
            }
            HmiCommand::VehicleInfoGetVehicleTypeResponse {
                id: _,
                vehicle_type,
            } => {
                self.capabilities.vehicle_type = Some(vehicle_type);
            }
            HmiCommand::OnReady => self.on_ready(),
            HmiCommand::OnButtonEvent {
                name,
                mode,
                custom_button_id,
            } => {
                let Some(session_key) = self.correlations.resolve_button(name) else {
                    log::error!("no application subscribed to button {name:?}");
                    return;
                };
                let Some(app) = self.registry.get(session_key) else {
                    log::error!("button {name:?} subscriber session {session_key} is gone");
                    return;
                };
                self.notify(
                    session_key,
                    translate::on_button_event(app.version, name, mode, custom_button_id),
                );
            }
            HmiCommand::OnButtonPress {
                name,
                mode,
                custom_button_id,
            } => {
                let Some(session_key) = self.correlations.resolve_button(name) else {
                    log::error!("no application subscribed to button {name:?}");
                    return;
                };
                let Some(app) = self.registry.get(session_key) else {
                    log::error!("button {name:?} subscriber session {session_key} is gone");
                    return;
                };
                self.notify(
                    session_key,
                    translate::on_button_press(app.version, name, mode, custom_button_id),
                );
            }
            HmiCommand::UiOnCommand { cmd_id } => {
                self.forward_on_command(cmd_id, TriggerSource::Menu);
            }
            HmiCommand::VrOnCommand { cmd_id } => {
                self.forward_on_command(cmd_id, TriggerSource::Vr);
            }
            HmiCommand::OnDriverDistraction { state } => {
                self.driver_distraction = Some(state);
                let Some(session_key) = self.registry.active_session() else {
                    log::debug!("driver distraction cached, no active application");
                    return;
                };
                let Some(app) = self.registry.get(session_key) else {
                    return;
                };
                self.notify(
                    session_key,
                    translate::on_driver_distraction(app.version, state),
                );
            }
            HmiCommand::OnSystemContext { system_context } => {
                let Some(session_key) = self.registry.active_session() else {
                    log::error!("system context change with no active application");
                    return;
                };
                if let Some(app) = self.registry.get_mut(session_key) {
                    app.system_context = system_context;
                }
                if system_context == SystemContext::Main {
                    self.emit_hmi_status(session_key);
                }
            }
            HmiCommand::OnDeviceChosen { device_name } => {
                let device = self
                    .connection
                    .device_list()
                    .into_iter()
                    .find(|device| device.name == device_name);
                match device {
                    Some(device) => self.connection.connect_to_device(device.handle),
                    None => log::error!("no known device named {device_name}"),
                }
            }
            HmiCommand::ActivateApp { id, app_name } => self.activate_app(id, app_name),
            HmiCommand::DeactivateApp { id: _, app_name } => {
                log::debug!("DeactivateApp for {app_name} ignored");
            }
            HmiCommand::SendData {
                id,
                data,
                url,
                timeout,
            } => self.send_data(id, data, url, timeout),
            HmiCommand::GetAppList { id } => {
                let app_list: Vec<HmiApplication> = self
                    .registry
                    .iter()
                    .map(|app| HmiApplication {
                        app_name: app.name.clone(),
                        ngn_media_screen_app_name: app.ngn_screen_name.clone(),
                        app_id: app.session_key,
                        is_media_application: app.is_media,
                    })
                    .collect();
                let result = if app_list.is_empty() {
                    log::error!("application list is empty");
                    ResultCode::GenericError
                } else {
                    ResultCode::Success
                };
                self.send_hmi_response(HmiResult::GetAppList {
                    id,
                    result,
                    app_list,
                });
            }
            HmiCommand::GetDeviceList { id } => {
                let device_list: Vec<String> = self
                    .connection
                    .device_list()
                    .into_iter()
                    .map(|device| device.name)
                    .collect();
                let result = if device_list.is_empty() {
                    ResultCode::GenericError
                } else {
                    ResultCode::Success
                };
                self.connection.start_devices_discovery();
                self.send_hmi_response(HmiResult::GetDeviceList {
                    id,
                    result,
                    device_list,
                });
            }
        }
    }

    fn handle_bus_response(&mut self, response: HmiResponse) {
        // Teardown deletes issued during an activation switch resolve the
        // state machine and never travel upstream.
        if self.registry.note_delete_response(response.id) {
            self.correlations.forget_outbound(response.id);
            return;
        }
        let Some(record) = self.correlations.resolve_outbound(response.id) else {
            log::warn!(
                "no correlation for bus response id {} ({:?})",
                response.id,
                response.method
            );
            return;
        };
        self.correlations.forget_outbound(response.id);

        match response.method {
            HmiMethod::UiAddCommand | HmiMethod::VrAddCommand => {
                self.finish_command_response(record, response, MobileMethod::AddCommand);
            }
            HmiMethod::UiDeleteCommand | HmiMethod::VrDeleteCommand => {
                self.finish_command_response(record, response, MobileMethod::DeleteCommand);
            }
            method => {
                let Some(correlation_id) = record.correlation_id else {
                    // Internally-issued request (activation replay); absorbed.
                    log::debug!("absorbed bus response {} for {:?}", response.id, method);
                    return;
                };
                let Some(mobile_method) = translate::mobile_method_for(method) else {
                    log::warn!("bus response {} for {:?} has no mobile counterpart", response.id, method);
                    return;
                };
                let Some(app) = self.registry.get(record.session_key) else {
                    log::warn!("bus response {} for a vanished session {}", response.id, record.session_key);
                    return;
                };
                let body = match method {
                    // These mirror the HMI verdict into `success`.
                    HmiMethod::UiSetAppIcon | HmiMethod::UiScrollableMessage => {
                        BasicResponse::from_result(response.result)
                    }
                    _ => BasicResponse {
                        success: true,
                        result_code: response.result,
                    },
                };
                self.respond(
                    record.session_key,
                    correlation_id,
                    translate::basic_response(app.version, mobile_method, body),
                );
            }
        }
    }

    // One mobile response per command operation, released when the last
    // outstanding UI/VR counterpart has answered.
    fn finish_command_response(
        &mut self,
        record: crate::correlation::OutboundRecord,
        response: HmiResponse,
        mobile_method: MobileMethod,
    ) {
        let Some(cmd_id) = self.correlations.resolve_command(response.id) else {
            // Submenu-cascade and replay deletes carry no command record.
            log::debug!("absorbed command response {}", response.id);
            return;
        };
        self.correlations.forget_command(response.id);

        let Some(app) = self.registry.get_mut(record.session_key) else {
            log::warn!(
                "command response {} for a vanished session {}",
                response.id,
                record.session_key
            );
            return;
        };
        if app.decrement_unresponded(cmd_id) > 0 {
            return;
        }
        let version = app.version;
        let Some(correlation_id) = record.correlation_id else {
            return;
        };
        self.respond(
            record.session_key,
            correlation_id,
            translate::basic_response(
                version,
                mobile_method,
                BasicResponse {
                    success: true,
                    result_code: response.result,
                },
            ),
        );
    }

    fn handle_alert_response(&mut self, id: u32, result: ResultCode, try_again_time: Option<u32>) {
        let Some(record) = self.correlations.resolve_outbound(id) else {
            log::warn!("no correlation for alert response id {id}");
            return;
        };
        self.correlations.forget_outbound(id);
        let Some(correlation_id) = record.correlation_id else {
            return;
        };
        let Some(app) = self.registry.get(record.session_key) else {
            log::warn!("alert response {id} for a vanished session {}", record.session_key);
            return;
        };
        self.respond(
            record.session_key,
            correlation_id,
            translate::alert_response(
                app.version,
                BasicResponse {
                    success: true,
                    result_code: result,
                },
                try_again_time,
            ),
        );
    }

    fn handle_slider_response(&mut self, id: u32, result: ResultCode, slider_position: u32) {
        let Some(record) = self.correlations.resolve_outbound(id) else {
            log::warn!("no correlation for slider response id {id}");
            return;
        };
        self.correlations.forget_outbound(id);
        let Some(correlation_id) = record.correlation_id else {
            return;
        };
        self.respond(
            record.session_key,
            correlation_id,
            RpcResponse::V2(V2Response::Slider {
                success: true,
                result_code: result,
                slider_position,
            }),
        );
    }

    // Fire the full capability/language/vehicle-type volley. The replies are
    // consumed by method, so none of these record a correlation.
    fn on_ready(&mut self) {
        self.send_hmi(HmiRequestPayload::UiGetCapabilities {});
        self.send_hmi(HmiRequestPayload::VrGetCapabilities {});
        self.send_hmi(HmiRequestPayload::TtsGetCapabilities {});
        self.send_hmi(HmiRequestPayload::ButtonsGetCapabilities {});
        self.send_hmi(HmiRequestPayload::VehicleInfoGetVehicleType {});
        self.send_hmi(HmiRequestPayload::UiGetLanguage {});
        self.send_hmi(HmiRequestPayload::VrGetLanguage {});
        self.send_hmi(HmiRequestPayload::TtsGetLanguage {});
    }

    fn forward_on_command(&mut self, cmd_id: u32, trigger_source: TriggerSource) {
        let Some(session_key) = self.registry.lookup_by_command(cmd_id) else {
            log::error!("no application owns command {cmd_id}");
            return;
        };
        let Some(app) = self.registry.get(session_key) else {
            return;
        };
        self.notify(
            session_key,
            translate::on_command(app.version, cmd_id, trigger_source),
        );
    }

    fn activate_app(&mut self, id: u32, app_name: String) {
        let sessions = self.registry.sessions_by_name(&app_name);
        let Some(&incoming) = sessions.first() else {
            log::error!("no application named {app_name} found");
            self.send_hmi_response(HmiResult::ActivateApp {
                id,
                result: ResultCode::InvalidData,
            });
            return;
        };

        if let Some(current) = self.registry.active_session() {
            if current == incoming {
                log::error!("application {app_name} is already active");
                self.send_hmi_response(HmiResult::ActivateApp {
                    id,
                    result: ResultCode::GenericError,
                });
                return;
            }
            let pending_deletes = self.teardown_app_footprint(current, true);
            self.registry.begin_switch(current, incoming, pending_deletes);
        } else {
            self.registry.set_active(incoming);
        }

        {
            let Some(app) = self.registry.get_mut(incoming) else {
                self.send_hmi_response(HmiResult::ActivateApp {
                    id,
                    result: ResultCode::GenericError,
                });
                return;
            };
            app.audio_state = if app.is_media {
                AudioStreamingState::Audible
            } else {
                AudioStreamingState::NotAudible
            };
        }

        self.replay_app_footprint(incoming);
        self.emit_hmi_status(incoming);
        self.send_hmi_response(HmiResult::ActivateApp {
            id,
            result: ResultCode::Success,
        });

        if let Some(state) = self.driver_distraction {
            if let Some(app) = self.registry.get(incoming) {
                self.notify(incoming, translate::on_driver_distraction(app.version, state));
            }
        }
    }

    // Re-creates the newly active app's choice sets, menus and commands on
    // the bus. The responses are absorbed (no mobile correlation).
    fn replay_app_footprint(&mut self, session_key: u32) {
        let Some(app) = self.registry.get(session_key) else {
            return;
        };
        let choice_sets: Vec<(u32, Vec<applink_protocol::Choice>)> = app
            .choice_sets()
            .map(|(set_id, choices)| (set_id, choices.clone()))
            .collect();
        let menus: Vec<(u32, String, Option<u32>)> = app
            .menus()
            .map(|(menu_id, menu)| (menu_id, menu.name.clone(), menu.position))
            .collect();
        let commands: Vec<(u32, CommandType, crate::app_state::CommandParams)> = app
            .commands()
            .map(|(cmd_id, cmd_type, params)| (cmd_id, cmd_type, params.clone()))
            .collect();

        for (set_id, choice_set) in choice_sets {
            self.send_hmi_internal(
                session_key,
                HmiRequestPayload::UiCreateInteractionChoiceSet {
                    app_id: session_key,
                    interaction_choice_set_id: set_id,
                    choice_set,
                },
            );
        }
        for (menu_id, menu_name, position) in menus {
            self.send_hmi_internal(
                session_key,
                HmiRequestPayload::UiAddSubMenu {
                    app_id: session_key,
                    menu_id,
                    menu_name,
                    position,
                },
            );
        }
        for (cmd_id, cmd_type, params) in commands {
            let payload = match cmd_type {
                CommandType::Ui => {
                    let Some(menu_params) = params.menu_params else {
                        log::error!("UI command {cmd_id} has no menu params; skipping replay");
                        continue;
                    };
                    HmiRequestPayload::UiAddCommand {
                        app_id: session_key,
                        cmd_id,
                        menu_params,
                        cmd_icon: params.cmd_icon,
                    }
                }
                CommandType::Vr => HmiRequestPayload::VrAddCommand {
                    app_id: session_key,
                    cmd_id,
                    vr_commands: params.vr_commands.unwrap_or_default(),
                },
            };
            self.send_hmi_internal(session_key, payload);
        }
    }

    fn send_data(&mut self, id: u32, data: Vec<String>, url: Option<String>, timeout: Option<u64>) {
        self.syncp.set_raw(data);
        let Some(session_key) = self.registry.active_session() else {
            log::error!("SendData with no active application");
            return;
        };

        if let Some(url) = url {
            let (host, port) = parse_url(&url);
            let timeout = timeout.unwrap_or(0);
            log::debug!("SendData deferred to {host}:{port} after {timeout}s");
            // The upload carries the HMI payload plus whatever the owning
            // app has staged through EncodedSyncPData; staging is consumed.
            let mut lines = self.syncp.raw().to_vec();
            let app_name = self
                .registry
                .get(session_key)
                .map(|app| app.name.clone());
            if let Some(app_name) = app_name {
                lines.extend(self.syncp.take_encoded(&app_name));
            }
            let job = PostJob {
                host,
                port,
                delay: Duration::from_secs(timeout),
                lines,
            };
            let result = match self.posts.submit(job) {
                Ok(()) => ResultCode::Success,
                Err(e) => {
                    log::error!("cannot schedule sync-P post: {e}");
                    ResultCode::GenericError
                }
            };
            self.send_hmi_response(HmiResult::SendData { id, result });
        } else {
            let Some(app) = self.registry.get(session_key) else {
                return;
            };
            self.notify(
                session_key,
                translate::on_encoded_syncp_data(app.version, self.syncp.raw().to_vec()),
            );
            self.send_hmi_response(HmiResult::SendData {
                id,
                result: ResultCode::Success,
            });
        }
    }
}
