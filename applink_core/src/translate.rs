use applink_protocol::hmi::{HmiMethod, HmiRequestPayload, UiAlert, UiPerformInteraction, UiSetGlobalProperties, UiShow, UiSlider};
use applink_protocol::v1::{
    AlertV1, PerformInteractionV1, ShowV1, V1Notification, V1Response,
};
use applink_protocol::v2::{
    AlertV2, PerformInteractionV2, ScrollableMessageV2, SetGlobalPropertiesV2, ShowV2, SliderV2,
    V2Notification, V2Response,
};
use applink_protocol::{
    AppInterfaceUnregisteredReason, AudioStreamingState, BasicResponse, ButtonEventMode,
    ButtonName, ButtonPressMode, DriverDistractionState, GlobalProperty, HmiLevel,
    ProtocolVersion, RpcNotification, RpcResponse, StartTime, SystemContext, TriggerSource,
    TtsChunk, UpdateMode,
};

// The mobile request ids whose responses all share the success/resultCode
// shape. Version dispatch for those responses funnels through here instead of
// being spelled out at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileMethod {
    UnregisterAppInterface,
    SubscribeButton,
    UnsubscribeButton,
    Show,
    Speak,
    SetGlobalProperties,
    ResetGlobalProperties,
    Alert,
    AddCommand,
    DeleteCommand,
    AddSubMenu,
    DeleteSubMenu,
    CreateInteractionChoiceSet,
    DeleteInteractionChoiceSet,
    PerformInteraction,
    SetMediaClockTimer,
    EncodedSyncPData,
    ScrollableMessage,
    SetAppIcon,
    GenericResponse,
}

pub fn basic_response(
    version: ProtocolVersion,
    method: MobileMethod,
    body: BasicResponse,
) -> RpcResponse {
    match version {
        ProtocolVersion::V1 => RpcResponse::V1(match method {
            MobileMethod::UnregisterAppInterface => V1Response::UnregisterAppInterface(body),
            MobileMethod::SubscribeButton => V1Response::SubscribeButton(body),
            MobileMethod::UnsubscribeButton => V1Response::UnsubscribeButton(body),
            MobileMethod::Show => V1Response::Show(body),
            MobileMethod::Speak => V1Response::Speak(body),
            MobileMethod::SetGlobalProperties => V1Response::SetGlobalProperties(body),
            MobileMethod::ResetGlobalProperties => V1Response::ResetGlobalProperties(body),
            MobileMethod::Alert => return alert_response(version, body, None),
            MobileMethod::AddCommand => V1Response::AddCommand(body),
            MobileMethod::DeleteCommand => V1Response::DeleteCommand(body),
            MobileMethod::AddSubMenu => V1Response::AddSubMenu(body),
            MobileMethod::DeleteSubMenu => V1Response::DeleteSubMenu(body),
            MobileMethod::CreateInteractionChoiceSet => {
                V1Response::CreateInteractionChoiceSet(body)
            }
            MobileMethod::DeleteInteractionChoiceSet => {
                V1Response::DeleteInteractionChoiceSet(body)
            }
            MobileMethod::PerformInteraction => V1Response::PerformInteraction(body),
            MobileMethod::SetMediaClockTimer => V1Response::SetMediaClockTimer(body),
            MobileMethod::EncodedSyncPData => V1Response::EncodedSyncPData(body),
            // v2-only surfaces have no v1 response shape.
            MobileMethod::ScrollableMessage
            | MobileMethod::SetAppIcon
            | MobileMethod::GenericResponse => V1Response::GenericResponse(body),
        }),
        ProtocolVersion::V2 => RpcResponse::V2(match method {
            MobileMethod::UnregisterAppInterface => V2Response::UnregisterAppInterface(body),
            MobileMethod::SubscribeButton => V2Response::SubscribeButton(body),
            MobileMethod::UnsubscribeButton => V2Response::UnsubscribeButton(body),
            MobileMethod::Show => V2Response::Show(body),
            MobileMethod::Speak => V2Response::Speak(body),
            MobileMethod::SetGlobalProperties => V2Response::SetGlobalProperties(body),
            MobileMethod::ResetGlobalProperties => V2Response::ResetGlobalProperties(body),
            MobileMethod::Alert => return alert_response(version, body, None),
            MobileMethod::AddCommand => V2Response::AddCommand(body),
            MobileMethod::DeleteCommand => V2Response::DeleteCommand(body),
            MobileMethod::AddSubMenu => V2Response::AddSubMenu(body),
            MobileMethod::DeleteSubMenu => V2Response::DeleteSubMenu(body),
            MobileMethod::CreateInteractionChoiceSet => {
                V2Response::CreateInteractionChoiceSet(body)
            }
            MobileMethod::DeleteInteractionChoiceSet => {
                V2Response::DeleteInteractionChoiceSet(body)
            }
            MobileMethod::PerformInteraction => V2Response::PerformInteraction(body),
            MobileMethod::SetMediaClockTimer => V2Response::SetMediaClockTimer(body),
            MobileMethod::EncodedSyncPData => V2Response::EncodedSyncPData(body),
            MobileMethod::ScrollableMessage => V2Response::ScrollableMessage(body),
            MobileMethod::SetAppIcon => V2Response::SetAppIcon(body),
            MobileMethod::GenericResponse => V2Response::GenericResponse(body),
        }),
    }
}

// The single Alert response builder: v1 has no retry field, v2 carries the
// bus-reported tryAgainTime through.
pub fn alert_response(
    version: ProtocolVersion,
    body: BasicResponse,
    try_again_time: Option<u32>,
) -> RpcResponse {
    match version {
        ProtocolVersion::V1 => RpcResponse::V1(V1Response::Alert(body)),
        ProtocolVersion::V2 => RpcResponse::V2(V2Response::Alert {
            success: body.success,
            result_code: body.result_code,
            try_again_time,
        }),
    }
}

// Which mobile response a plain bus response resolves to. Command operations
// and Slider take dedicated paths; capability/language queries produce no
// upstream message at all. Alert keeps its entry so a bus response delivered
// in the plain shape still answers the app, just without a retry time.
pub fn mobile_method_for(method: HmiMethod) -> Option<MobileMethod> {
    match method {
        HmiMethod::UiShow => Some(MobileMethod::Show),
        HmiMethod::UiAlert => Some(MobileMethod::Alert),
        HmiMethod::TtsSpeak => Some(MobileMethod::Speak),
        HmiMethod::UiSetGlobalProperties => Some(MobileMethod::SetGlobalProperties),
        HmiMethod::UiResetGlobalProperties => Some(MobileMethod::ResetGlobalProperties),
        HmiMethod::UiAddSubMenu => Some(MobileMethod::AddSubMenu),
        HmiMethod::UiDeleteSubMenu => Some(MobileMethod::DeleteSubMenu),
        HmiMethod::UiCreateInteractionChoiceSet => Some(MobileMethod::CreateInteractionChoiceSet),
        HmiMethod::UiDeleteInteractionChoiceSet => Some(MobileMethod::DeleteInteractionChoiceSet),
        HmiMethod::UiPerformInteraction => Some(MobileMethod::PerformInteraction),
        HmiMethod::UiSetMediaClockTimer => Some(MobileMethod::SetMediaClockTimer),
        HmiMethod::UiScrollableMessage => Some(MobileMethod::ScrollableMessage),
        HmiMethod::UiSetAppIcon => Some(MobileMethod::SetAppIcon),
        HmiMethod::UiAddCommand
        | HmiMethod::UiDeleteCommand
        | HmiMethod::VrAddCommand
        | HmiMethod::VrDeleteCommand
        | HmiMethod::UiSlider
        | HmiMethod::UiGetCapabilities
        | HmiMethod::VrGetCapabilities
        | HmiMethod::TtsGetCapabilities
        | HmiMethod::ButtonsGetCapabilities
        | HmiMethod::UiGetLanguage
        | HmiMethod::VrGetLanguage
        | HmiMethod::TtsGetLanguage
        | HmiMethod::VehicleInfoGetVehicleType => None,
    }
}

pub fn show_v1(app_id: u32, show: ShowV1) -> HmiRequestPayload {
    HmiRequestPayload::UiShow(UiShow {
        app_id,
        main_field1: show.main_field1,
        main_field2: show.main_field2,
        main_field3: None,
        main_field4: None,
        alignment: show.alignment,
        status_bar: show.status_bar,
        media_clock: show.media_clock,
        media_track: show.media_track,
        graphic: None,
        soft_buttons: None,
        custom_presets: None,
    })
}

pub fn show_v2(app_id: u32, show: ShowV2) -> HmiRequestPayload {
    HmiRequestPayload::UiShow(UiShow {
        app_id,
        main_field1: show.main_field1,
        main_field2: show.main_field2,
        main_field3: show.main_field3,
        main_field4: show.main_field4,
        alignment: show.alignment,
        status_bar: show.status_bar,
        media_clock: show.media_clock,
        media_track: show.media_track,
        graphic: show.graphic,
        soft_buttons: show.soft_buttons,
        custom_presets: show.custom_presets,
    })
}

pub fn alert_v1(app_id: u32, alert: AlertV1) -> HmiRequestPayload {
    HmiRequestPayload::UiAlert(UiAlert {
        app_id,
        alert_text1: alert.alert_text1,
        alert_text2: alert.alert_text2,
        alert_text3: None,
        tts_chunks: None,
        duration: alert.duration,
        play_tone: alert.play_tone,
        soft_buttons: None,
    })
}

pub fn alert_v2(app_id: u32, alert: AlertV2) -> HmiRequestPayload {
    HmiRequestPayload::UiAlert(UiAlert {
        app_id,
        alert_text1: alert.alert_text1,
        alert_text2: alert.alert_text2,
        alert_text3: alert.alert_text3,
        tts_chunks: alert.tts_chunks,
        duration: alert.duration,
        play_tone: alert.play_tone,
        soft_buttons: alert.soft_buttons,
    })
}

pub fn speak(app_id: u32, tts_chunks: Vec<TtsChunk>) -> HmiRequestPayload {
    HmiRequestPayload::TtsSpeak {
        app_id,
        tts_chunks,
    }
}

pub fn set_global_properties_v1(
    app_id: u32,
    help_prompt: Option<Vec<TtsChunk>>,
    timeout_prompt: Option<Vec<TtsChunk>>,
) -> HmiRequestPayload {
    HmiRequestPayload::UiSetGlobalProperties(UiSetGlobalProperties {
        app_id,
        help_prompt,
        timeout_prompt,
        vr_help_title: None,
        vr_help: None,
    })
}

pub fn set_global_properties_v2(app_id: u32, req: SetGlobalPropertiesV2) -> HmiRequestPayload {
    HmiRequestPayload::UiSetGlobalProperties(UiSetGlobalProperties {
        app_id,
        help_prompt: req.help_prompt,
        timeout_prompt: req.timeout_prompt,
        vr_help_title: req.vr_help_title,
        vr_help: req.vr_help,
    })
}

pub fn reset_global_properties(
    app_id: u32,
    properties: Vec<GlobalProperty>,
) -> HmiRequestPayload {
    HmiRequestPayload::UiResetGlobalProperties {
        app_id,
        properties,
    }
}

pub fn perform_interaction_v1(app_id: u32, req: PerformInteractionV1) -> HmiRequestPayload {
    HmiRequestPayload::UiPerformInteraction(UiPerformInteraction {
        app_id,
        initial_text: req.initial_text,
        initial_prompt: req.initial_prompt,
        interaction_mode: req.interaction_mode,
        interaction_choice_set_id_list: req.interaction_choice_set_id_list,
        help_prompt: req.help_prompt,
        timeout_prompt: req.timeout_prompt,
        timeout: req.timeout,
        vr_help: None,
    })
}

pub fn perform_interaction_v2(app_id: u32, req: PerformInteractionV2) -> HmiRequestPayload {
    HmiRequestPayload::UiPerformInteraction(UiPerformInteraction {
        app_id,
        initial_text: req.initial_text,
        initial_prompt: req.initial_prompt,
        interaction_mode: req.interaction_mode,
        interaction_choice_set_id_list: req.interaction_choice_set_id_list,
        help_prompt: req.help_prompt,
        timeout_prompt: req.timeout_prompt,
        timeout: req.timeout,
        vr_help: req.vr_help,
    })
}

pub fn set_media_clock_timer(
    app_id: u32,
    start_time: Option<StartTime>,
    update_mode: UpdateMode,
) -> HmiRequestPayload {
    HmiRequestPayload::UiSetMediaClockTimer {
        app_id,
        start_time,
        update_mode,
    }
}

pub fn slider(app_id: u32, req: SliderV2) -> HmiRequestPayload {
    HmiRequestPayload::UiSlider(UiSlider {
        app_id,
        num_ticks: req.num_ticks,
        position: req.position,
        slider_header: req.slider_header,
        slider_footer: req.slider_footer,
        timeout: req.timeout,
    })
}

pub fn scrollable_message(app_id: u32, req: ScrollableMessageV2) -> HmiRequestPayload {
    HmiRequestPayload::UiScrollableMessage {
        app_id,
        scrollable_message_body: req.scrollable_message_body,
        timeout: req.timeout,
        soft_buttons: req.soft_buttons,
    }
}

pub fn on_hmi_status(
    version: ProtocolVersion,
    hmi_level: HmiLevel,
    audio_streaming_state: AudioStreamingState,
    system_context: SystemContext,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnHmiStatus {
            hmi_level,
            audio_streaming_state,
            system_context,
        }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnHmiStatus {
            hmi_level,
            audio_streaming_state,
            system_context,
        }),
    }
}

pub fn on_command(
    version: ProtocolVersion,
    cmd_id: u32,
    trigger_source: TriggerSource,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnCommand {
            cmd_id,
            trigger_source,
        }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnCommand {
            cmd_id,
            trigger_source,
        }),
    }
}

pub fn on_button_event(
    version: ProtocolVersion,
    button_name: ButtonName,
    mode: ButtonEventMode,
    custom_button_id: Option<u32>,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnButtonEvent {
            button_name,
            button_event_mode: mode,
        }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnButtonEvent {
            button_name,
            button_event_mode: mode,
            custom_button_id: custom_button_id.unwrap_or(0),
        }),
    }
}

pub fn on_button_press(
    version: ProtocolVersion,
    button_name: ButtonName,
    mode: ButtonPressMode,
    custom_button_id: Option<u32>,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnButtonPress {
            button_name,
            button_press_mode: mode,
        }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnButtonPress {
            button_name,
            button_press_mode: mode,
            custom_button_id: custom_button_id.unwrap_or(0),
        }),
    }
}

pub fn on_driver_distraction(
    version: ProtocolVersion,
    state: DriverDistractionState,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnDriverDistraction { state }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnDriverDistraction { state }),
    }
}

pub fn on_encoded_syncp_data(version: ProtocolVersion, data: Vec<String>) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => RpcNotification::V1(V1Notification::OnEncodedSyncPData { data }),
        ProtocolVersion::V2 => RpcNotification::V2(V2Notification::OnEncodedSyncPData { data }),
    }
}

pub fn on_app_interface_unregistered(
    version: ProtocolVersion,
    reason: AppInterfaceUnregisteredReason,
) -> RpcNotification {
    match version {
        ProtocolVersion::V1 => {
            RpcNotification::V1(V1Notification::OnAppInterfaceUnregistered { reason })
        }
        ProtocolVersion::V2 => {
            RpcNotification::V2(V2Notification::OnAppInterfaceUnregistered { reason })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applink_protocol::ResultCode;

    #[test]
    fn v1_show_projection_leaves_v2_fields_empty() {
        let payload = show_v1(
            17,
            ShowV1 {
                main_field1: Some("NOW PLAYING".to_string()),
                main_field2: None,
                alignment: None,
                status_bar: None,
                media_clock: None,
                media_track: None,
            },
        );
        let HmiRequestPayload::UiShow(show) = payload else {
            panic!("expected UI.Show");
        };
        assert_eq!(show.app_id, 17);
        assert_eq!(show.main_field1.as_deref(), Some("NOW PLAYING"));
        assert!(show.soft_buttons.is_none());
        assert!(show.main_field3.is_none());
    }

    #[test]
    fn basic_response_picks_the_version_shape() {
        let v1 = basic_response(
            ProtocolVersion::V1,
            MobileMethod::Show,
            BasicResponse::ok(),
        );
        assert!(matches!(v1, RpcResponse::V1(V1Response::Show(_))));

        let v2 = basic_response(
            ProtocolVersion::V2,
            MobileMethod::Alert,
            BasicResponse::error(ResultCode::Rejected),
        );
        let RpcResponse::V2(V2Response::Alert {
            success,
            result_code,
            try_again_time,
        }) = v2
        else {
            panic!("expected v2 alert response");
        };
        assert!(!success);
        assert_eq!(result_code, ResultCode::Rejected);
        assert!(try_again_time.is_none());
    }

    #[test]
    fn alert_response_threads_the_retry_time() {
        let v2 = alert_response(
            ProtocolVersion::V2,
            BasicResponse::ok(),
            Some(5000),
        );
        let RpcResponse::V2(V2Response::Alert {
            success,
            try_again_time,
            ..
        }) = v2
        else {
            panic!("expected v2 alert response");
        };
        assert!(success);
        assert_eq!(try_again_time, Some(5000));

        // v1 has nowhere to put it.
        let v1 = alert_response(
            ProtocolVersion::V1,
            BasicResponse::ok(),
            Some(5000),
        );
        assert!(matches!(v1, RpcResponse::V1(V1Response::Alert(_))));
    }

    #[test]
    fn command_and_query_responses_have_no_generic_mobile_method() {
        assert_eq!(mobile_method_for(HmiMethod::UiAddCommand), None);
        assert_eq!(mobile_method_for(HmiMethod::UiGetCapabilities), None);
        assert_eq!(
            mobile_method_for(HmiMethod::UiShow),
            Some(MobileMethod::Show)
        );
    }
}
