use crate::app_state::{AppState, CommandParams, CommandType};
use crate::file_store::{sandbox_dir, FileStoreError};
use crate::manager::AppManager;
use crate::protocol::MobileInbound;
use crate::translate::{self, MobileMethod};
use applink_protocol::hmi::{HmiNotification, HmiRequestPayload, OnAppRegistered};
use applink_protocol::v1::{
    RegisterAppInterfaceResponseV1, RegisterAppInterfaceV1, V1Request, V1Response,
};
use applink_protocol::v2::{
    FileResponseV2, ListFilesResponseV2, PutFileV2, RegisterAppInterfaceResponseV2,
    RegisterAppInterfaceV2, V2Request, V2Response,
};
use applink_protocol::{
    AppInterfaceUnregisteredReason, BasicResponse, ButtonName, Choice, HmiLevel, Image,
    MenuParams, ProtocolVersion, ResultCode, RpcRequest, RpcResponse, StartTime, TtsChunk,
    UpdateMode,
};

impl AppManager {
    pub fn handle_mobile(&mut self, item: MobileInbound) {
        match item {
            MobileInbound::Request {
                session_key,
                correlation_id,
                request,
            } => match request {
                RpcRequest::V1(request) => self.handle_v1(session_key, correlation_id, request),
                RpcRequest::V2(request) => self.handle_v2(session_key, correlation_id, request),
            },
            MobileInbound::UnknownRequest {
                session_key,
                correlation_id,
                version,
            } => {
                log::error!("unknown mobile method from session {session_key}");
                self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::GenericResponse,
                    BasicResponse::error(ResultCode::InvalidData),
                );
            }
            MobileInbound::SessionOpened {
                session_key,
                device,
            } => {
                self.correlations.assign_device(session_key, device);
            }
            MobileInbound::SessionClosed { session_key } => {
                self.handle_session_closed(session_key);
            }
        }
    }

    fn handle_v1(&mut self, session_key: u32, correlation_id: u32, request: V1Request) {
        let version = ProtocolVersion::V1;
        match request {
            V1Request::RegisterAppInterface(request) => {
                self.register_v1(session_key, correlation_id, request);
            }
            V1Request::UnregisterAppInterface {} => {
                self.unregister(session_key, correlation_id, version);
            }
            V1Request::SubscribeButton { button_name } => {
                self.subscribe_button(session_key, correlation_id, version, button_name);
            }
            V1Request::UnsubscribeButton { button_name } => {
                self.unsubscribe_button(session_key, correlation_id, version, button_name);
            }
            V1Request::Show(show) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(session_key, correlation_id, translate::show_v1(session_key, show));
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::Show,
                    BasicResponse::error(code),
                ),
            },
            V1Request::Speak { tts_chunks } => {
                self.speak(session_key, correlation_id, version, tts_chunks);
            }
            V1Request::SetGlobalProperties {
                help_prompt,
                timeout_prompt,
            } => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(
                        session_key,
                        correlation_id,
                        translate::set_global_properties_v1(session_key, help_prompt, timeout_prompt),
                    );
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::SetGlobalProperties,
                    BasicResponse::error(code),
                ),
            },
            V1Request::ResetGlobalProperties { properties } => {
                self.reset_global_properties(session_key, correlation_id, version, properties);
            }
            V1Request::Alert(alert) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(session_key, correlation_id, translate::alert_v1(session_key, alert));
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::Alert,
                    BasicResponse::error(code),
                ),
            },
            V1Request::AddCommand {
                cmd_id,
                menu_params,
                vr_commands,
            } => {
                self.add_command(
                    session_key,
                    correlation_id,
                    version,
                    cmd_id,
                    menu_params,
                    vr_commands,
                    None,
                );
            }
            V1Request::DeleteCommand { cmd_id } => {
                self.delete_command(session_key, correlation_id, version, cmd_id);
            }
            V1Request::AddSubMenu {
                menu_id,
                menu_name,
                position,
            } => {
                self.add_submenu(session_key, correlation_id, version, menu_id, menu_name, position);
            }
            V1Request::DeleteSubMenu { menu_id } => {
                self.delete_submenu(session_key, correlation_id, version, menu_id);
            }
            V1Request::CreateInteractionChoiceSet {
                interaction_choice_set_id,
                choice_set,
            } => {
                self.create_choice_set(
                    session_key,
                    correlation_id,
                    version,
                    interaction_choice_set_id,
                    choice_set,
                );
            }
            V1Request::DeleteInteractionChoiceSet {
                interaction_choice_set_id,
            } => {
                self.delete_choice_set(
                    session_key,
                    correlation_id,
                    version,
                    interaction_choice_set_id,
                );
            }
            V1Request::PerformInteraction(request) => {
                let choice_sets = request.interaction_choice_set_id_list.clone();
                self.perform_interaction(
                    session_key,
                    correlation_id,
                    version,
                    choice_sets,
                    |app_id| translate::perform_interaction_v1(app_id, request),
                );
            }
            V1Request::SetMediaClockTimer {
                start_time,
                update_mode,
            } => {
                self.set_media_clock_timer(
                    session_key,
                    correlation_id,
                    version,
                    start_time,
                    update_mode,
                );
            }
            V1Request::EncodedSyncPData { data } => {
                self.encoded_syncp_data(session_key, correlation_id, version, data);
            }
        }
    }

    fn handle_v2(&mut self, session_key: u32, correlation_id: u32, request: V2Request) {
        let version = ProtocolVersion::V2;
        match request {
            V2Request::RegisterAppInterface(request) => {
                self.register_v2(session_key, correlation_id, request);
            }
            V2Request::UnregisterAppInterface {} => {
                self.unregister(session_key, correlation_id, version);
            }
            V2Request::SubscribeButton { button_name } => {
                self.subscribe_button(session_key, correlation_id, version, button_name);
            }
            V2Request::UnsubscribeButton { button_name } => {
                self.unsubscribe_button(session_key, correlation_id, version, button_name);
            }
            V2Request::Show(show) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(session_key, correlation_id, translate::show_v2(session_key, show));
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::Show,
                    BasicResponse::error(code),
                ),
            },
            V2Request::Speak { tts_chunks } => {
                self.speak(session_key, correlation_id, version, tts_chunks);
            }
            V2Request::SetGlobalProperties(request) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(
                        session_key,
                        correlation_id,
                        translate::set_global_properties_v2(session_key, request),
                    );
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::SetGlobalProperties,
                    BasicResponse::error(code),
                ),
            },
            V2Request::ResetGlobalProperties { properties } => {
                self.reset_global_properties(session_key, correlation_id, version, properties);
            }
            V2Request::Alert(alert) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(session_key, correlation_id, translate::alert_v2(session_key, alert));
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::Alert,
                    BasicResponse::error(code),
                ),
            },
            V2Request::AddCommand {
                cmd_id,
                menu_params,
                vr_commands,
                cmd_icon,
            } => {
                self.add_command(
                    session_key,
                    correlation_id,
                    version,
                    cmd_id,
                    menu_params,
                    vr_commands,
                    cmd_icon,
                );
            }
            V2Request::DeleteCommand { cmd_id } => {
                self.delete_command(session_key, correlation_id, version, cmd_id);
            }
            V2Request::AddSubMenu {
                menu_id,
                menu_name,
                position,
            } => {
                self.add_submenu(session_key, correlation_id, version, menu_id, menu_name, position);
            }
            V2Request::DeleteSubMenu { menu_id } => {
                self.delete_submenu(session_key, correlation_id, version, menu_id);
            }
            V2Request::CreateInteractionChoiceSet {
                interaction_choice_set_id,
                choice_set,
            } => {
                self.create_choice_set(
                    session_key,
                    correlation_id,
                    version,
                    interaction_choice_set_id,
                    choice_set,
                );
            }
            V2Request::DeleteInteractionChoiceSet {
                interaction_choice_set_id,
            } => {
                self.delete_choice_set(
                    session_key,
                    correlation_id,
                    version,
                    interaction_choice_set_id,
                );
            }
            V2Request::PerformInteraction(request) => {
                let choice_sets = request.interaction_choice_set_id_list.clone();
                self.perform_interaction(
                    session_key,
                    correlation_id,
                    version,
                    choice_sets,
                    |app_id| translate::perform_interaction_v2(app_id, request),
                );
            }
            V2Request::SetMediaClockTimer {
                start_time,
                update_mode,
            } => {
                self.set_media_clock_timer(
                    session_key,
                    correlation_id,
                    version,
                    start_time,
                    update_mode,
                );
            }
            V2Request::EncodedSyncPData { data } => {
                let data = if data.is_empty() { None } else { Some(data) };
                self.encoded_syncp_data(session_key, correlation_id, version, data);
            }
            V2Request::PutFile(request) => {
                self.put_file(session_key, correlation_id, request);
            }
            V2Request::DeleteFile { sync_file_name } => {
                self.delete_file(session_key, correlation_id, sync_file_name);
            }
            V2Request::ListFiles {} => {
                self.list_files(session_key, correlation_id);
            }
            V2Request::Slider(request) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(session_key, correlation_id, translate::slider(session_key, request));
                }
                Err(code) => self.respond(
                    session_key,
                    correlation_id,
                    RpcResponse::V2(V2Response::Slider {
                        success: false,
                        result_code: code,
                        slider_position: 0,
                    }),
                ),
            },
            V2Request::ScrollableMessage(request) => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(
                        session_key,
                        correlation_id,
                        translate::scrollable_message(session_key, request),
                    );
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::ScrollableMessage,
                    BasicResponse::error(code),
                ),
            },
            V2Request::SetAppIcon { sync_file_name } => match self.visible_app(session_key) {
                Ok(()) => {
                    self.send_hmi_for(
                        session_key,
                        correlation_id,
                        HmiRequestPayload::UiSetAppIcon {
                            app_id: session_key,
                            sync_file_name,
                        },
                    );
                }
                Err(code) => self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::SetAppIcon,
                    BasicResponse::error(code),
                ),
            },
        }
    }

    // Precondition pipeline: the app must exist, and for requests with a
    // visible HMI effect it must have left HMI_NONE.
    fn registered_app(&self, session_key: u32) -> Result<(), ResultCode> {
        if self.registry.contains(session_key) {
            Ok(())
        } else {
            Err(ResultCode::ApplicationNotRegistered)
        }
    }

    fn visible_app(&self, session_key: u32) -> Result<(), ResultCode> {
        let Some(app) = self.registry.get(session_key) else {
            return Err(ResultCode::ApplicationNotRegistered);
        };
        if app.hmi_level == HmiLevel::None {
            return Err(ResultCode::Rejected);
        }
        Ok(())
    }

    fn register_v1(&mut self, session_key: u32, correlation_id: u32, request: RegisterAppInterfaceV1) {
        if self.registry.contains(session_key) {
            log::error!("session {session_key} is already registered");
            self.respond(
                session_key,
                correlation_id,
                RpcResponse::V1(V1Response::RegisterAppInterface(
                    RegisterAppInterfaceResponseV1::error(
                        ResultCode::ApplicationRegisteredAlready,
                    ),
                )),
            );
            return;
        }

        let mut app = AppState::new(session_key, request.app_name.clone(), ProtocolVersion::V1);
        app.ngn_screen_name = request.ngn_media_screen_app_name;
        app.vr_synonyms = request.vr_synonyms.clone();
        app.uses_vehicle_data = request.uses_vehicle_data.unwrap_or(false);
        app.is_media = request.is_media_application;
        app.language_desired = request.language_desired;
        app.sync_msg_version = request.sync_msg_version;
        let language_desired = app.language_desired;
        let is_media = app.is_media;
        if let Err(code) = self.registry.register(app) {
            self.respond(
                session_key,
                correlation_id,
                RpcResponse::V1(V1Response::RegisterAppInterface(
                    RegisterAppInterfaceResponseV1::error(code),
                )),
            );
            return;
        }

        let response = RegisterAppInterfaceResponseV1 {
            success: true,
            result_code: ResultCode::Success,
            button_capabilities: Some(self.capabilities.button_capabilities.clone()),
            display_capabilities: self.capabilities.display_capabilities.clone(),
            hmi_zone_capabilities: Some(self.capabilities.hmi_zone_capabilities.clone()),
            speech_capabilities: Some(self.capabilities.speech_capabilities.clone()),
            vr_capabilities: Some(self.capabilities.vr_capabilities.clone()),
            language: Some(self.capabilities.ui_language),
            sync_msg_version: Some(request.sync_msg_version),
        };
        self.respond(
            session_key,
            correlation_id,
            RpcResponse::V1(V1Response::RegisterAppInterface(response)),
        );
        self.emit_hmi_status(session_key);

        let device_name = self.device_name_for(session_key);
        self.send_hmi_notification(HmiNotification::OnAppRegistered(OnAppRegistered {
            app_name: request.app_name,
            app_id: session_key,
            is_media_application: is_media,
            language_desired,
            vr_synonyms: request.vr_synonyms,
            device_name,
            version_number: 1,
            app_type: None,
            hmi_display_language_desired: None,
            tts_name: None,
        }));
    }

    fn register_v2(&mut self, session_key: u32, correlation_id: u32, request: RegisterAppInterfaceV2) {
        if self.registry.contains(session_key) {
            log::error!("session {session_key} is already registered");
            self.respond(
                session_key,
                correlation_id,
                RpcResponse::V2(V2Response::RegisterAppInterface(
                    RegisterAppInterfaceResponseV2::error(
                        ResultCode::ApplicationRegisteredAlready,
                    ),
                )),
            );
            return;
        }

        let mut app = AppState::new(session_key, request.app_name.clone(), ProtocolVersion::V2);
        app.ngn_screen_name = request.ngn_media_screen_app_name;
        app.vr_synonyms = request.vr_synonyms.clone();
        app.tts_name = request.tts_name.clone();
        app.is_media = request.is_media_application;
        app.language_desired = request.language_desired;
        app.hmi_display_language_desired = request.hmi_display_language_desired;
        app.app_types = request.app_type.clone().unwrap_or_default();
        app.sync_msg_version = request.sync_msg_version;
        let language_desired = app.language_desired;
        let hmi_display_language_desired = app.hmi_display_language_desired;
        let is_media = app.is_media;
        if let Err(code) = self.registry.register(app) {
            self.respond(
                session_key,
                correlation_id,
                RpcResponse::V2(V2Response::RegisterAppInterface(
                    RegisterAppInterfaceResponseV2::error(code),
                )),
            );
            return;
        }

        let response = RegisterAppInterfaceResponseV2 {
            success: true,
            result_code: ResultCode::Success,
            button_capabilities: Some(self.capabilities.button_capabilities.clone()),
            display_capabilities: self.capabilities.display_capabilities.clone(),
            hmi_zone_capabilities: Some(self.capabilities.hmi_zone_capabilities.clone()),
            speech_capabilities: Some(self.capabilities.speech_capabilities.clone()),
            vr_capabilities: Some(self.capabilities.vr_capabilities.clone()),
            soft_button_capabilities: self.capabilities.soft_button_capabilities.clone(),
            preset_bank_capabilities: self.capabilities.preset_bank_capabilities,
            vehicle_type: self.capabilities.vehicle_type.clone(),
            language: Some(self.capabilities.vr_language),
            hmi_display_language: Some(self.capabilities.ui_language),
            sync_msg_version: Some(request.sync_msg_version),
        };
        self.respond(
            session_key,
            correlation_id,
            RpcResponse::V2(V2Response::RegisterAppInterface(response)),
        );
        self.emit_hmi_status(session_key);

        let device_name = self.device_name_for(session_key);
        self.send_hmi_notification(HmiNotification::OnAppRegistered(OnAppRegistered {
            app_name: request.app_name,
            app_id: session_key,
            is_media_application: is_media,
            language_desired,
            vr_synonyms: request.vr_synonyms,
            device_name,
            version_number: 2,
            app_type: request.app_type,
            hmi_display_language_desired: Some(hmi_display_language_desired),
            tts_name: request.tts_name,
        }));
    }

    fn unregister(&mut self, session_key: u32, correlation_id: u32, version: ProtocolVersion) {
        if !self.registry.contains(session_key) {
            log::error!("session {session_key} is not associated with any application");
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::UnregisterAppInterface,
                BasicResponse::error(ResultCode::ApplicationNotRegistered),
            );
            return;
        }

        self.teardown_app_footprint(session_key, true);
        let Some(app) = self.registry.unregister(session_key) else {
            return;
        };
        self.syncp.drop_app(&app.name);
        self.correlations.drop_all_for(session_key);

        self.respond_basic(
            session_key,
            correlation_id,
            version,
            MobileMethod::UnregisterAppInterface,
            BasicResponse::ok(),
        );
        self.notify(
            session_key,
            translate::on_app_interface_unregistered(
                version,
                AppInterfaceUnregisteredReason::UserExit,
            ),
        );
        self.send_hmi_notification(HmiNotification::OnAppUnregistered {
            app_name: app.name,
            app_id: session_key,
            reason: AppInterfaceUnregisteredReason::UserExit,
        });
    }

    fn handle_session_closed(&mut self, session_key: u32) {
        if self.registry.contains(session_key) {
            self.teardown_app_footprint(session_key, false);
            if let Some(app) = self.registry.unregister(session_key) {
                self.syncp.drop_app(&app.name);
                self.send_hmi_notification(HmiNotification::OnAppUnregistered {
                    app_name: app.name,
                    app_id: session_key,
                    reason: AppInterfaceUnregisteredReason::UserExit,
                });
            }
        }
        self.correlations.drop_all_for(session_key);
    }

    fn subscribe_button(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        button_name: ButtonName,
    ) {
        let body = match self.visible_app(session_key) {
            Ok(()) => {
                self.correlations.subscribe_button(button_name, session_key);
                BasicResponse::ok()
            }
            Err(code) => BasicResponse::error(code),
        };
        self.respond_basic(
            session_key,
            correlation_id,
            version,
            MobileMethod::SubscribeButton,
            body,
        );
    }

    fn unsubscribe_button(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        button_name: ButtonName,
    ) {
        let body = match self.visible_app(session_key) {
            Ok(()) => {
                self.correlations.unsubscribe_button(button_name);
                BasicResponse::ok()
            }
            Err(code) => BasicResponse::error(code),
        };
        self.respond_basic(
            session_key,
            correlation_id,
            version,
            MobileMethod::UnsubscribeButton,
            body,
        );
    }

    fn speak(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        tts_chunks: Vec<TtsChunk>,
    ) {
        match self.visible_app(session_key) {
            Ok(()) => {
                self.send_hmi_for(
                    session_key,
                    correlation_id,
                    translate::speak(session_key, tts_chunks),
                );
            }
            Err(code) => self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::Speak,
                BasicResponse::error(code),
            ),
        }
    }

    fn reset_global_properties(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        properties: Vec<applink_protocol::GlobalProperty>,
    ) {
        match self.visible_app(session_key) {
            Ok(()) => {
                self.send_hmi_for(
                    session_key,
                    correlation_id,
                    translate::reset_global_properties(session_key, properties),
                );
            }
            Err(code) => self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::ResetGlobalProperties,
                BasicResponse::error(code),
            ),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn add_command(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        cmd_id: u32,
        menu_params: Option<MenuParams>,
        vr_commands: Option<Vec<String>>,
        cmd_icon: Option<Image>,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::AddCommand,
                BasicResponse::error(code),
            );
            return;
        }
        if menu_params.is_none() && vr_commands.is_none() {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::AddCommand,
                BasicResponse::error(ResultCode::InvalidData),
            );
            return;
        }

        if let Some(menu_params) = menu_params {
            let payload = HmiRequestPayload::UiAddCommand {
                app_id: session_key,
                cmd_id,
                menu_params: menu_params.clone(),
                cmd_icon: cmd_icon.clone(),
            };
            {
                let Some(app) = self.registry.get_mut(session_key) else {
                    return;
                };
                if let Some(parent_id) = menu_params.parent_id {
                    app.add_menu_command(cmd_id, parent_id);
                }
                app.add_command(
                    cmd_id,
                    CommandType::Ui,
                    CommandParams {
                        menu_params: Some(menu_params),
                        vr_commands: None,
                        cmd_icon,
                    },
                );
                app.increment_unresponded(cmd_id);
            }
            let hmi_id = self.send_hmi_for(session_key, correlation_id, payload);
            self.correlations.record_command(hmi_id, cmd_id);
        }

        if let Some(vr_commands) = vr_commands {
            let payload = HmiRequestPayload::VrAddCommand {
                app_id: session_key,
                cmd_id,
                vr_commands: vr_commands.clone(),
            };
            {
                let Some(app) = self.registry.get_mut(session_key) else {
                    return;
                };
                app.add_command(
                    cmd_id,
                    CommandType::Vr,
                    CommandParams {
                        menu_params: None,
                        vr_commands: Some(vr_commands),
                        cmd_icon: None,
                    },
                );
                app.increment_unresponded(cmd_id);
            }
            let hmi_id = self.send_hmi_for(session_key, correlation_id, payload);
            self.correlations.record_command(hmi_id, cmd_id);
        }
    }

    fn delete_command(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        cmd_id: u32,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteCommand,
                BasicResponse::error(code),
            );
            return;
        }
        let Some(app) = self.registry.get_mut(session_key) else {
            return;
        };
        let cmd_types = app.command_types(cmd_id);
        if cmd_types.is_empty() {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteCommand,
                BasicResponse::error(ResultCode::InvalidData),
            );
            return;
        }

        for cmd_type in cmd_types {
            let payload = match cmd_type {
                CommandType::Ui => HmiRequestPayload::UiDeleteCommand {
                    app_id: session_key,
                    cmd_id,
                },
                CommandType::Vr => HmiRequestPayload::VrDeleteCommand {
                    app_id: session_key,
                    cmd_id,
                },
            };
            {
                let Some(app) = self.registry.get_mut(session_key) else {
                    return;
                };
                app.remove_command(cmd_id, cmd_type);
                if cmd_type == CommandType::Ui {
                    app.remove_menu_command(cmd_id);
                }
                app.increment_unresponded(cmd_id);
            }
            let hmi_id = self.send_hmi_for(session_key, correlation_id, payload);
            self.correlations.record_command(hmi_id, cmd_id);
        }
    }

    fn add_submenu(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        menu_id: u32,
        menu_name: String,
        position: Option<u32>,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::AddSubMenu,
                BasicResponse::error(code),
            );
            return;
        }
        if let Some(app) = self.registry.get_mut(session_key) {
            app.add_menu(menu_id, menu_name.clone(), position);
        }
        self.send_hmi_for(
            session_key,
            correlation_id,
            HmiRequestPayload::UiAddSubMenu {
                app_id: session_key,
                menu_id,
                menu_name,
                position,
            },
        );
    }

    // Cascades: every command under the menu gets its UI (and, when present,
    // VR) delete issued as an internal request whose response is absorbed;
    // only the closing UI.DeleteSubMenu answers the mobile request.
    fn delete_submenu(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        menu_id: u32,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteSubMenu,
                BasicResponse::error(code),
            );
            return;
        }
        let Some(app) = self.registry.get_mut(session_key) else {
            return;
        };
        if app.find_menu(menu_id).is_none() {
            log::error!(
                "menu {menu_id} is not associated with the application of session {session_key}"
            );
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteSubMenu,
                BasicResponse::error(ResultCode::InvalidData),
            );
            return;
        }

        let menu_commands = app.menu_commands(menu_id);
        for cmd_id in menu_commands {
            let had_vr = {
                let Some(app) = self.registry.get_mut(session_key) else {
                    return;
                };
                let had_vr = app.command_types(cmd_id).contains(&CommandType::Vr);
                app.remove_command(cmd_id, CommandType::Ui);
                app.remove_menu_command(cmd_id);
                had_vr
            };
            self.send_hmi_internal(
                session_key,
                HmiRequestPayload::UiDeleteCommand {
                    app_id: session_key,
                    cmd_id,
                },
            );
            if had_vr {
                if let Some(app) = self.registry.get_mut(session_key) {
                    app.remove_command(cmd_id, CommandType::Vr);
                }
                self.send_hmi_internal(
                    session_key,
                    HmiRequestPayload::VrDeleteCommand {
                        app_id: session_key,
                        cmd_id,
                    },
                );
            }
        }

        if let Some(app) = self.registry.get_mut(session_key) {
            app.remove_menu(menu_id);
        }
        self.send_hmi_for(
            session_key,
            correlation_id,
            HmiRequestPayload::UiDeleteSubMenu {
                app_id: session_key,
                menu_id,
            },
        );
    }

    fn create_choice_set(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        set_id: u32,
        choice_set: Vec<Choice>,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::CreateInteractionChoiceSet,
                BasicResponse::error(code),
            );
            return;
        }
        if let Some(app) = self.registry.get_mut(session_key) {
            app.add_choice_set(set_id, choice_set.clone());
        }
        self.send_hmi_for(
            session_key,
            correlation_id,
            HmiRequestPayload::UiCreateInteractionChoiceSet {
                app_id: session_key,
                interaction_choice_set_id: set_id,
                choice_set,
            },
        );
    }

    fn delete_choice_set(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        set_id: u32,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteInteractionChoiceSet,
                BasicResponse::error(code),
            );
            return;
        }
        let Some(app) = self.registry.get_mut(session_key) else {
            return;
        };
        if app.find_choice_set(set_id).is_none() {
            log::error!(
                "choice set {set_id} is not registered within the application of session {session_key}"
            );
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::DeleteInteractionChoiceSet,
                BasicResponse::error(ResultCode::InvalidData),
            );
            return;
        }
        app.remove_choice_set(set_id);
        self.send_hmi_for(
            session_key,
            correlation_id,
            HmiRequestPayload::UiDeleteInteractionChoiceSet {
                app_id: session_key,
                interaction_choice_set_id: set_id,
            },
        );
    }

    fn perform_interaction(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        choice_sets: Vec<u32>,
        payload: impl FnOnce(u32) -> HmiRequestPayload,
    ) {
        if let Err(code) = self.visible_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::PerformInteraction,
                BasicResponse::error(code),
            );
            return;
        }
        let Some(app) = self.registry.get(session_key) else {
            return;
        };
        for set_id in &choice_sets {
            if app.find_choice_set(*set_id).is_none() {
                log::error!(
                    "choice set {set_id} is not registered within the application of session {session_key}"
                );
                self.respond_basic(
                    session_key,
                    correlation_id,
                    version,
                    MobileMethod::PerformInteraction,
                    BasicResponse::error(ResultCode::InvalidData),
                );
                return;
            }
        }
        self.send_hmi_for(session_key, correlation_id, payload(session_key));
    }

    fn set_media_clock_timer(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        start_time: Option<StartTime>,
        update_mode: UpdateMode,
    ) {
        match self.visible_app(session_key) {
            Ok(()) => {
                self.send_hmi_for(
                    session_key,
                    correlation_id,
                    translate::set_media_clock_timer(session_key, start_time, update_mode),
                );
            }
            Err(code) => self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::SetMediaClockTimer,
                BasicResponse::error(code),
            ),
        }
    }

    fn encoded_syncp_data(
        &mut self,
        session_key: u32,
        correlation_id: u32,
        version: ProtocolVersion,
        data: Option<Vec<String>>,
    ) {
        if let Err(code) = self.registered_app(session_key) {
            self.respond_basic(
                session_key,
                correlation_id,
                version,
                MobileMethod::EncodedSyncPData,
                BasicResponse::error(code),
            );
            return;
        }
        let body = match data {
            Some(data) if !data.is_empty() => {
                let app_name = self
                    .registry
                    .get(session_key)
                    .map(|app| app.name.clone())
                    .unwrap_or_default();
                self.syncp.append_encoded(&app_name, data);
                BasicResponse::ok()
            }
            _ => BasicResponse::error(ResultCode::InvalidData),
        };
        self.respond_basic(
            session_key,
            correlation_id,
            version,
            MobileMethod::EncodedSyncPData,
            body,
        );
    }

    fn put_file(&mut self, session_key: u32, correlation_id: u32, request: PutFileV2) {
        let space_available = self.files.free_space();
        let result_code = if self.registered_app(session_key).is_err() {
            ResultCode::ApplicationNotRegistered
        } else if request.sync_file_name.is_empty() || request.bytes.is_empty() {
            ResultCode::InvalidData
        } else if space_available <= request.bytes.len() as u64 {
            ResultCode::GenericError
        } else {
            let (dir, already_staged) = {
                let Some(app) = self.registry.get(session_key) else {
                    return;
                };
                (
                    sandbox_dir(&app.name, session_key),
                    app.uploaded_files.contains(&request.sync_file_name),
                )
            };
            if already_staged {
                ResultCode::GenericError
            } else {
                match self.files.write(&dir, &request.sync_file_name, &request.bytes) {
                    Ok(()) => {
                        if let Some(app) = self.registry.get_mut(session_key) {
                            app.uploaded_files.insert(request.sync_file_name.clone());
                        }
                        ResultCode::Success
                    }
                    Err(FileStoreError::AlreadyExists(name)) => {
                        log::error!("put file: {name} already exists for session {session_key}");
                        ResultCode::GenericError
                    }
                    Err(e) => {
                        log::error!("put file failed for session {session_key}: {e}");
                        ResultCode::GenericError
                    }
                }
            }
        };

        self.respond(
            session_key,
            correlation_id,
            RpcResponse::V2(V2Response::PutFile(FileResponseV2 {
                success: result_code == ResultCode::Success,
                result_code,
                space_available: self.files.free_space(),
            })),
        );
    }

    fn delete_file(&mut self, session_key: u32, correlation_id: u32, sync_file_name: String) {
        let result_code = if self.registered_app(session_key).is_err() {
            ResultCode::ApplicationNotRegistered
        } else if sync_file_name.is_empty() {
            ResultCode::InvalidData
        } else {
            let dir = {
                let Some(app) = self.registry.get(session_key) else {
                    return;
                };
                sandbox_dir(&app.name, session_key)
            };
            match self.files.remove(&dir, &sync_file_name) {
                Ok(()) => {
                    if let Some(app) = self.registry.get_mut(session_key) {
                        app.uploaded_files.remove(&sync_file_name);
                    }
                    ResultCode::Success
                }
                Err(e) => {
                    log::error!("delete file failed for session {session_key}: {e}");
                    ResultCode::GenericError
                }
            }
        };

        self.respond(
            session_key,
            correlation_id,
            RpcResponse::V2(V2Response::DeleteFile(FileResponseV2 {
                success: result_code == ResultCode::Success,
                result_code,
                space_available: self.files.free_space(),
            })),
        );
    }

    fn list_files(&mut self, session_key: u32, correlation_id: u32) {
        let space_available = self.files.free_space();
        let (result_code, filenames) = if self.registered_app(session_key).is_err() {
            (ResultCode::ApplicationNotRegistered, None)
        } else {
            let dir = {
                let Some(app) = self.registry.get(session_key) else {
                    return;
                };
                sandbox_dir(&app.name, session_key)
            };
            match self.files.list(&dir) {
                Ok(names) => (ResultCode::Success, Some(names)),
                Err(e) => {
                    log::error!("list files failed for session {session_key}: {e}");
                    (ResultCode::GenericError, None)
                }
            }
        };

        self.respond(
            session_key,
            correlation_id,
            RpcResponse::V2(V2Response::ListFiles(ListFilesResponseV2 {
                success: result_code == ResultCode::Success,
                result_code,
                filenames,
                space_available,
            })),
        );
    }
}
