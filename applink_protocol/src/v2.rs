use crate::common::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V2Request {
    RegisterAppInterface(RegisterAppInterfaceV2),
    UnregisterAppInterface {},
    SubscribeButton {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
    },
    UnsubscribeButton {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
    },
    Show(ShowV2),
    Speak {
        #[serde(rename = "ttsChunks")]
        tts_chunks: Vec<TtsChunk>,
    },
    SetGlobalProperties(SetGlobalPropertiesV2),
    ResetGlobalProperties {
        properties: Vec<GlobalProperty>,
    },
    Alert(AlertV2),
    AddCommand {
        #[serde(rename = "cmdID")]
        cmd_id: u32,
        #[serde(rename = "menuParams")]
        menu_params: Option<MenuParams>,
        #[serde(rename = "vrCommands")]
        vr_commands: Option<Vec<String>>,
        #[serde(rename = "cmdIcon")]
        cmd_icon: Option<Image>,
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
    PerformInteraction(PerformInteractionV2),
    SetMediaClockTimer {
        #[serde(rename = "startTime")]
        start_time: Option<StartTime>,
        #[serde(rename = "updateMode")]
        update_mode: UpdateMode,
    },
    EncodedSyncPData {
        data: Vec<String>,
    },
    PutFile(PutFileV2),
    DeleteFile {
        #[serde(rename = "syncFileName")]
        sync_file_name: String,
    },
    ListFiles {},
    Slider(SliderV2),
    ScrollableMessage(ScrollableMessageV2),
    SetAppIcon {
        #[serde(rename = "syncFileName")]
        sync_file_name: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAppInterfaceV2 {
    pub app_name: String,
    pub ngn_media_screen_app_name: Option<String>,
    pub tts_name: Option<Vec<TtsChunk>>,
    pub vr_synonyms: Option<Vec<String>>,
    pub is_media_application: bool,
    pub language_desired: Language,
    pub hmi_display_language_desired: Language,
    pub app_type: Option<Vec<AppType>>,
    pub sync_msg_version: SyncMsgVersion,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShowV2 {
    pub main_field1: Option<String>,
    pub main_field2: Option<String>,
    pub main_field3: Option<String>,
    pub main_field4: Option<String>,
    pub alignment: Option<TextAlignment>,
    pub status_bar: Option<String>,
    pub media_clock: Option<String>,
    pub media_track: Option<String>,
    pub graphic: Option<Image>,
    pub soft_buttons: Option<Vec<SoftButton>>,
    pub custom_presets: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SetGlobalPropertiesV2 {
    pub help_prompt: Option<Vec<TtsChunk>>,
    pub timeout_prompt: Option<Vec<TtsChunk>>,
    pub vr_help_title: Option<String>,
    pub vr_help: Option<Vec<VrHelpItem>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertV2 {
    pub alert_text1: Option<String>,
    pub alert_text2: Option<String>,
    pub alert_text3: Option<String>,
    pub tts_chunks: Option<Vec<TtsChunk>>,
    pub play_tone: Option<bool>,
    pub duration: Option<u32>,
    pub soft_buttons: Option<Vec<SoftButton>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PerformInteractionV2 {
    pub initial_text: String,
    pub initial_prompt: Vec<TtsChunk>,
    pub interaction_mode: InteractionMode,
    #[serde(rename = "interactionChoiceSetIDList")]
    pub interaction_choice_set_id_list: Vec<u32>,
    pub help_prompt: Option<Vec<TtsChunk>>,
    pub timeout_prompt: Option<Vec<TtsChunk>>,
    pub timeout: Option<u32>,
    pub vr_help: Option<Vec<VrHelpItem>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PutFileV2 {
    pub sync_file_name: String,
    pub file_type: FileType,
    pub persistent_file: Option<bool>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SliderV2 {
    pub num_ticks: u32,
    pub position: u32,
    pub slider_header: String,
    pub slider_footer: Option<Vec<String>>,
    pub timeout: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScrollableMessageV2 {
    pub scrollable_message_body: String,
    pub timeout: Option<u32>,
    pub soft_buttons: Option<Vec<SoftButton>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V2Response {
    RegisterAppInterface(RegisterAppInterfaceResponseV2),
    UnregisterAppInterface(BasicResponse),
    SubscribeButton(BasicResponse),
    UnsubscribeButton(BasicResponse),
    Show(BasicResponse),
    Speak(BasicResponse),
    SetGlobalProperties(BasicResponse),
    ResetGlobalProperties(BasicResponse),
    Alert {
        success: bool,
        #[serde(rename = "resultCode")]
        result_code: ResultCode,
        #[serde(rename = "tryAgainTime")]
        try_again_time: Option<u32>,
    },
    AddCommand(BasicResponse),
    DeleteCommand(BasicResponse),
    AddSubMenu(BasicResponse),
    DeleteSubMenu(BasicResponse),
    CreateInteractionChoiceSet(BasicResponse),
    DeleteInteractionChoiceSet(BasicResponse),
    PerformInteraction(BasicResponse),
    SetMediaClockTimer(BasicResponse),
    EncodedSyncPData(BasicResponse),
    PutFile(FileResponseV2),
    DeleteFile(FileResponseV2),
    ListFiles(ListFilesResponseV2),
    Slider {
        success: bool,
        #[serde(rename = "resultCode")]
        result_code: ResultCode,
        #[serde(rename = "sliderPosition")]
        slider_position: u32,
    },
    ScrollableMessage(BasicResponse),
    SetAppIcon(BasicResponse),
    GenericResponse(BasicResponse),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAppInterfaceResponseV2 {
    pub success: bool,
    pub result_code: ResultCode,
    pub button_capabilities: Option<Vec<ButtonCapabilities>>,
    pub display_capabilities: Option<DisplayCapabilities>,
    pub hmi_zone_capabilities: Option<Vec<HmiZoneCapability>>,
    pub speech_capabilities: Option<Vec<SpeechCapability>>,
    pub vr_capabilities: Option<Vec<VrCapability>>,
    pub soft_button_capabilities: Option<Vec<SoftButtonCapabilities>>,
    pub preset_bank_capabilities: Option<PresetBankCapabilities>,
    pub vehicle_type: Option<VehicleType>,
    pub language: Option<Language>,
    pub hmi_display_language: Option<Language>,
    pub sync_msg_version: Option<SyncMsgVersion>,
}

impl RegisterAppInterfaceResponseV2 {
    pub fn error(result_code: ResultCode) -> Self {
        Self {
            success: false,
            result_code,
            button_capabilities: None,
            display_capabilities: None,
            hmi_zone_capabilities: None,
            speech_capabilities: None,
            vr_capabilities: None,
            soft_button_capabilities: None,
            preset_bank_capabilities: None,
            vehicle_type: None,
            language: None,
            hmi_display_language: None,
            sync_msg_version: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileResponseV2 {
    pub success: bool,
    pub result_code: ResultCode,
    pub space_available: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponseV2 {
    pub success: bool,
    pub result_code: ResultCode,
    pub filenames: Option<Vec<String>>,
    pub space_available: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum V2Notification {
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
        #[serde(rename = "customButtonID")]
        custom_button_id: u32,
    },
    OnButtonPress {
        #[serde(rename = "buttonName")]
        button_name: ButtonName,
        #[serde(rename = "buttonPressMode")]
        button_press_mode: ButtonPressMode,
        #[serde(rename = "customButtonID")]
        custom_button_id: u32,
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
