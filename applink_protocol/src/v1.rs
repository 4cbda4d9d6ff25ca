use crate::common::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V1Request {
    RegisterAppInterface(RegisterAppInterfaceV1),
    UnregisterAppInterface {},
    SubscribeButton {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
    },
    UnsubscribeButton {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
    },
    Show(ShowV1),
    Speak {
        #[serde(rename = "ttsChunks")]
        tts_chunks: Vec<TtsChunk>,
    },
    SetGlobalProperties {
        #[serde(rename = "helpPrompt")]
        help_prompt: Option<Vec<TtsChunk>>,
        #[serde(rename = "timeoutPrompt")]
        timeout_prompt: Option<Vec<TtsChunk>>,
    },
    ResetGlobalProperties {
        properties: Vec<GlobalProperty>,
    },
    Alert(AlertV1),
    AddCommand {
        #[serde(rename = "cmdID")]
        cmd_id: u32,
        #[serde(rename = "menuParams")]
        menu_params: Option<MenuParams>,
        #[serde(rename = "vrCommands")]
        vr_commands: Option<Vec<String>>,
    },
    DeleteCommand {
        #[serde(rename = "cmdID")]
        cmd_id: u32,
    },
    AddSubMenu {
        #[serde(rename = "menuID")]
        menu_id: u32,
        #[serde(rename = "menuName")]
        menu_name: String,
        position: Option<u32>,
    },
    DeleteSubMenu {
        #[serde(rename = "menuID")]
        menu_id: u32,
    },
    CreateInteractionChoiceSet {
        #[serde(rename = "interactionChoiceSetID")]
        interaction_choice_set_id: u32,
        #[serde(rename = "choiceSet")]
        choice_set: Vec<Choice>,
    },
    DeleteInteractionChoiceSet {
        #[serde(rename = "interactionChoiceSetID")]
        interaction_choice_set_id: u32,
    },
    PerformInteraction(PerformInteractionV1),
    SetMediaClockTimer {
        #[serde(rename = "startTime")]
        start_time: Option<StartTime>,
        #[serde(rename = "updateMode")]
        update_mode: UpdateMode,
    },
    EncodedSyncPData {
        data: Option<Vec<String>>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAppInterfaceV1 {
    pub app_name: String,
    pub ngn_media_screen_app_name: Option<String>,
    pub vr_synonyms: Option<Vec<String>>,
    pub uses_vehicle_data: Option<bool>,
    pub is_media_application: bool,
    pub language_desired: Language,
    pub sync_msg_version: SyncMsgVersion,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShowV1 {
    pub main_field1: Option<String>,
    pub main_field2: Option<String>,
    pub alignment: Option<TextAlignment>,
    pub status_bar: Option<String>,
    pub media_clock: Option<String>,
    pub media_track: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertV1 {
    pub alert_text1: Option<String>,
    pub alert_text2: Option<String>,
    pub play_tone: Option<bool>,
    pub duration: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PerformInteractionV1 {
    pub initial_text: String,
    pub initial_prompt: Vec<TtsChunk>,
    pub interaction_mode: InteractionMode,
    #[serde(rename = "interactionChoiceSetIDList")]
    pub interaction_choice_set_id_list: Vec<u32>,
    pub help_prompt: Option<Vec<TtsChunk>>,
    pub timeout_prompt: Option<Vec<TtsChunk>>,
    pub timeout: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V1Response {
    RegisterAppInterface(RegisterAppInterfaceResponseV1),
    UnregisterAppInterface(BasicResponse),
    SubscribeButton(BasicResponse),
    UnsubscribeButton(BasicResponse),
    Show(BasicResponse),
    Speak(BasicResponse),
    SetGlobalProperties(BasicResponse),
    ResetGlobalProperties(BasicResponse),
    Alert(BasicResponse),
    AddCommand(BasicResponse),
    DeleteCommand(BasicResponse),
    AddSubMenu(BasicResponse),
    DeleteSubMenu(BasicResponse),
    CreateInteractionChoiceSet(BasicResponse),
    DeleteInteractionChoiceSet(BasicResponse),
    PerformInteraction(BasicResponse),
    SetMediaClockTimer(BasicResponse),
    EncodedSyncPData(BasicResponse),
    GenericResponse(BasicResponse),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAppInterfaceResponseV1 {
    pub success: bool,
    pub result_code: ResultCode,
    pub button_capabilities: Option<Vec<ButtonCapabilities>>,
    pub display_capabilities: Option<DisplayCapabilities>,
    pub hmi_zone_capabilities: Option<Vec<HmiZoneCapability>>,
    pub speech_capabilities: Option<Vec<SpeechCapability>>,
    pub vr_capabilities: Option<Vec<VrCapability>>,
    pub language: Option<Language>,
    pub sync_msg_version: Option<SyncMsgVersion>,
}

impl RegisterAppInterfaceResponseV1 {
    pub fn error(result_code: ResultCode) -> Self {
        Self {
            success: false,
            result_code,
            button_capabilities: None,
            display_capabilities: None,
            hmi_zone_capabilities: None,
            speech_capabilities: None,
            vr_capabilities: None,
            language: None,
            sync_msg_version: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V1Notification {
    OnHmiStatus {
        #[serde(rename = "hmiLevel")]
        hmi_level: HmiLevel,
        #[serde(rename = "audioStreamingState")]
        audio_streaming_state: AudioStreamingState,
        #[serde(rename = "systemContext")]
        system_context: SystemContext,
    },
    OnAppInterfaceUnregistered {
        reason: AppInterfaceUnregisteredReason,
    },
    OnButtonEvent {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
        #[serde(rename = "buttonEventMode")]
        button_event_mode: ButtonEventMode,
    },
    OnButtonPress {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
        #[serde(rename = "buttonPressMode")]
        button_press_mode: ButtonPressMode,
    },
    OnCommand {
        #[serde(rename = "cmdID")]
        cmd_id: u32,
        #[serde(rename = "triggerSource")]
        trigger_source: TriggerSource,
    },
    OnDriverDistraction {
        state: DriverDistractionState,
    },
    OnEncodedSyncPData {
        data: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_method_tag() {
        let req = V1Request::SubscribeButton {
            button_name: ButtonName::Ok,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["method"], "SubscribeButton");
        assert_eq!(json["buttonName"], "OK");
    }

    #[test]
    fn response_method_tag() {
        let resp = V1Response::Show(BasicResponse::ok());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["method"], "Show");
        assert_eq!(json["resultCode"], "SUCCESS");
        assert_eq!(json["success"], true);
    }
}
