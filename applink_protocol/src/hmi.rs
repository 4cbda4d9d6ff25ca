use crate::common::*;
use serde::{Deserialize, Serialize};

// JSON-RPC2 bus traffic. Outbound requests get their id from the core's
// allocator; inbound commands arrive already decoded and tagged by method.

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HmiRequest {
    pub id: u32,
    #[serde(flatten)]
    pub payload: HmiRequestPayload,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method", content = "params")]
pub enum HmiRequestPayload {
    #[serde(rename = "UI.Show")]
    UiShow(UiShow),
    #[serde(rename = "UI.Alert")]
    UiAlert(UiAlert),
    #[serde(rename = "TTS.Speak")]
    TtsSpeak {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "ttsChunks")]
        tts_chunks: Vec<TtsChunk>,
    },
    #[serde(rename = "UI.SetGlobalProperties")]
    UiSetGlobalProperties(UiSetGlobalProperties),
    #[serde(rename = "UI.ResetGlobalProperties")]
    UiResetGlobalProperties {
        #[serde(rename = "appId")]
        app_id: u32,
        properties: Vec<GlobalProperty>,
    },
    #[serde(rename = "UI.AddCommand")]
    UiAddCommand {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "cmdId")]
        cmd_id: u32,
        #[serde(rename = "menuParams")]
        menu_params: MenuParams,
        #[serde(rename = "cmdIcon")]
        cmd_icon: Option<Image>,
    },
    #[serde(rename = "UI.DeleteCommand")]
    UiDeleteCommand {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "cmdId")]
        cmd_id: u32,
    },
    #[serde(rename = "VR.AddCommand")]
    VrAddCommand {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "cmdId")]
        cmd_id: u32,
        #[serde(rename = "vrCommands")]
        vr_commands: Vec<String>,
    },
    #[serde(rename = "VR.DeleteCommand")]
    VrDeleteCommand {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "cmdId")]
        cmd_id: u32,
    },
    #[serde(rename = "UI.AddSubMenu")]
    UiAddSubMenu {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "menuId")]
        menu_id: u32,
        #[serde(rename = "menuName")]
        menu_name: String,
        position: Option<u32>,
    },
    #[serde(rename = "UI.DeleteSubMenu")]
    UiDeleteSubMenu {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "menuId")]
        menu_id: u32,
    },
    #[serde(rename = "UI.CreateInteractionChoiceSet")]
    UiCreateInteractionChoiceSet {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "interactionChoiceSetID")]
        interaction_choice_set_id: u32,
        #[serde(rename = "choiceSet")]
        choice_set: Vec<Choice>,
    },
    #[serde(rename = "UI.DeleteInteractionChoiceSet")]
    UiDeleteInteractionChoiceSet {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "interactionChoiceSetID")]
        interaction_choice_set_id: u32,
    },
    #[serde(rename = "UI.PerformInteraction")]
    UiPerformInteraction(UiPerformInteraction),
    #[serde(rename = "UI.SetMediaClockTimer")]
    UiSetMediaClockTimer {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "startTime")]
        start_time: Option<StartTime>,
        #[serde(rename = "updateMode")]
        update_mode: UpdateMode,
    },
    #[serde(rename = "UI.Slider")]
    UiSlider(UiSlider),
    #[serde(rename = "UI.ScrollableMessage")]
    UiScrollableMessage {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "scrollableMessageBody")]
        scrollable_message_body: String,
        timeout: Option<u32>,
        #[serde(rename = "softButtons")]
        soft_buttons: Option<Vec<SoftButton>>,
    },
    #[serde(rename = "UI.SetAppIcon")]
    UiSetAppIcon {
        #[serde(rename = "appId")]
        app_id: u32,
        #[serde(rename = "syncFileName")]
        sync_file_name: String,
    },
    #[serde(rename = "UI.GetCapabilities")]
    UiGetCapabilities {},
    #[serde(rename = "VR.GetCapabilities")]
    VrGetCapabilities {},
    #[serde(rename = "TTS.GetCapabilities")]
    TtsGetCapabilities {},
    #[serde(rename = "Buttons.GetCapabilities")]
    ButtonsGetCapabilities {},
    #[serde(rename = "UI.GetLanguage")]
    UiGetLanguage {},
    #[serde(rename = "VR.GetLanguage")]
    VrGetLanguage {},
    #[serde(rename = "TTS.GetLanguage")]
    TtsGetLanguage {},
    #[serde(rename = "VehicleInfo.GetVehicleType")]
    VehicleInfoGetVehicleType {},
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UiShow {
    pub app_id: u32,
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
pub struct UiAlert {
    pub app_id: u32,
    pub alert_text1: Option<String>,
    pub alert_text2: Option<String>,
    pub alert_text3: Option<String>,
    pub tts_chunks: Option<Vec<TtsChunk>>,
    pub duration: Option<u32>,
    pub play_tone: Option<bool>,
    pub soft_buttons: Option<Vec<SoftButton>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UiSetGlobalProperties {
    pub app_id: u32,
    pub help_prompt: Option<Vec<TtsChunk>>,
    pub timeout_prompt: Option<Vec<TtsChunk>>,
    pub vr_help_title: Option<String>,
    pub vr_help: Option<Vec<VrHelpItem>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UiPerformInteraction {
    pub app_id: u32,
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
pub struct UiSlider {
    pub app_id: u32,
    pub num_ticks: u32,
    pub position: u32,
    pub slider_header: String,
    pub slider_footer: Option<Vec<String>>,
    pub timeout: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmiMethod {
    UiShow,
    UiAlert,
    TtsSpeak,
    UiSetGlobalProperties,
    UiResetGlobalProperties,
    UiAddCommand,
    UiDeleteCommand,
    VrAddCommand,
    VrDeleteCommand,
    UiAddSubMenu,
    UiDeleteSubMenu,
    UiCreateInteractionChoiceSet,
    UiDeleteInteractionChoiceSet,
    UiPerformInteraction,
    UiSetMediaClockTimer,
    UiSlider,
    UiScrollableMessage,
    UiSetAppIcon,
    UiGetCapabilities,
    VrGetCapabilities,
    TtsGetCapabilities,
    ButtonsGetCapabilities,
    UiGetLanguage,
    VrGetLanguage,
    TtsGetLanguage,
    VehicleInfoGetVehicleType,
}

impl HmiRequestPayload {
    pub fn method(&self) -> HmiMethod {
        match self {
            HmiRequestPayload::UiShow(_) => HmiMethod::UiShow,
            HmiRequestPayload::UiAlert(_) => HmiMethod::UiAlert,
            HmiRequestPayload::TtsSpeak { .. } => HmiMethod::TtsSpeak,
            HmiRequestPayload::UiSetGlobalProperties(_) => HmiMethod::UiSetGlobalProperties,
            HmiRequestPayload::UiResetGlobalProperties { .. } => {
                HmiMethod::UiResetGlobalProperties
            }
            HmiRequestPayload::UiAddCommand { .. } => HmiMethod::UiAddCommand,
            HmiRequestPayload::UiDeleteCommand { .. } => HmiMethod::UiDeleteCommand,
            HmiRequestPayload::VrAddCommand { .. } => HmiMethod::VrAddCommand,
            HmiRequestPayload::VrDeleteCommand { .. } => HmiMethod::VrDeleteCommand,
            HmiRequestPayload::UiAddSubMenu { .. } => HmiMethod::UiAddSubMenu,
            HmiRequestPayload::UiDeleteSubMenu { .. } => HmiMethod::UiDeleteSubMenu,
            HmiRequestPayload::UiCreateInteractionChoiceSet { .. } => {
                HmiMethod::UiCreateInteractionChoiceSet
            }
            HmiRequestPayload::UiDeleteInteractionChoiceSet { .. } => {
                HmiMethod::UiDeleteInteractionChoiceSet
            }
            HmiRequestPayload::UiPerformInteraction(_) => HmiMethod::UiPerformInteraction,
            HmiRequestPayload::UiSetMediaClockTimer { .. } => HmiMethod::UiSetMediaClockTimer,
            HmiRequestPayload::UiSlider(_) => HmiMethod::UiSlider,
            HmiRequestPayload::UiScrollableMessage { .. } => HmiMethod::UiScrollableMessage,
            HmiRequestPayload::UiSetAppIcon { .. } => HmiMethod::UiSetAppIcon,
            HmiRequestPayload::UiGetCapabilities {} => HmiMethod::UiGetCapabilities,
            HmiRequestPayload::VrGetCapabilities {} => HmiMethod::VrGetCapabilities,
            HmiRequestPayload::TtsGetCapabilities {} => HmiMethod::TtsGetCapabilities,
            HmiRequestPayload::ButtonsGetCapabilities {} => HmiMethod::ButtonsGetCapabilities,
            HmiRequestPayload::UiGetLanguage {} => HmiMethod::UiGetLanguage,
            HmiRequestPayload::VrGetLanguage {} => HmiMethod::VrGetLanguage,
            HmiRequestPayload::TtsGetLanguage {} => HmiMethod::TtsGetLanguage,
            HmiRequestPayload::VehicleInfoGetVehicleType {} => {
                HmiMethod::VehicleInfoGetVehicleType
            }
        }
    }
}

// Decoded inbound bus traffic. Plain responses to core-issued requests all
// share the `Response` shape; responses carrying extra payload (capabilities,
// languages, slider position) get their own variant.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum HmiCommand {
    Response(HmiResponse),
    UiSliderResponse {
        id: u32,
        result: ResultCode,
        slider_position: u32,
    },
    UiAlertResponse {
        id: u32,
        result: ResultCode,
        try_again_time: Option<u32>,
    },
    UiGetCapabilitiesResponse {
        id: u32,
        display_capabilities: DisplayCapabilities,
        hmi_zone_capabilities: Vec<HmiZoneCapability>,
        soft_button_capabilities: Option<Vec<SoftButtonCapabilities>>,
    },
    VrGetCapabilitiesResponse {
        id: u32,
        capabilities: Vec<VrCapability>,
    },
    TtsGetCapabilitiesResponse {
        id: u32,
        capabilities: Vec<SpeechCapability>,
    },
    ButtonsGetCapabilitiesResponse {
        id: u32,
        capabilities: Vec<ButtonCapabilities>,
        preset_bank_capabilities: Option<PresetBankCapabilities>,
    },
    UiGetLanguageResponse {
        id: u32,
        hmi_display_language: Language,
    },
    VrGetLanguageResponse {
        id: u32,
        language: Language,
    },
    TtsGetLanguageResponse {
        id: u32,
        language: Language,
    },
    VehicleInfoGetVehicleTypeResponse {
        id: u32,
        vehicle_type: VehicleType,
    },
    OnReady,
    OnButtonEvent {
        name: ButtonName,
        mode: ButtonEventMode,
        custom_button_id: Option<u32>,
    },
    OnButtonPress {
        name: ButtonName,
        mode: ButtonPressMode,
        custom_button_id: Option<u32>,
    },
    UiOnCommand {
        cmd_id: u32,
    },
    VrOnCommand {
        cmd_id: u32,
    },
    OnDriverDistraction {
        state: DriverDistractionState,
    },
    OnSystemContext {
        system_context: SystemContext,
    },
    OnDeviceChosen {
        device_name: String,
    },
    ActivateApp {
        id: u32,
        app_name: String,
    },
    DeactivateApp {
        id: u32,
        app_name: String,
    },
    SendData {
        id: u32,
        data: Vec<String>,
        url: Option<String>,
        timeout: Option<u64>,
    },
    GetAppList {
        id: u32,
    },
    GetDeviceList {
        id: u32,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HmiResponse {
    pub id: u32,
    pub method: HmiMethod,
    pub result: ResultCode,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum HmiOutbound {
    Request(HmiRequest),
    Response(HmiResult),
    Notification(HmiNotification),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum HmiResult {
    #[serde(rename = "AppLinkCore.ActivateAppResponse")]
    ActivateApp { id: u32, result: ResultCode },
    #[serde(rename = "AppLinkCore.SendDataResponse")]
    SendData { id: u32, result: ResultCode },
    #[serde(rename = "AppLinkCore.GetAppListResponse")]
    GetAppList {
        id: u32,
        result: ResultCode,
        #[serde(rename = "appList")]
        app_list: Vec<HmiApplication>,
    },
    #[serde(rename = "AppLinkCore.GetDeviceListResponse")]
    GetDeviceList {
        id: u32,
        result: ResultCode,
        #[serde(rename = "deviceList")]
        device_list: Vec<String>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "method")]
pub enum HmiNotification {
    #[serde(rename = "AppLinkCore.OnAppRegistered")]
    OnAppRegistered(OnAppRegistered),
    #[serde(rename = "AppLinkCore.OnAppUnregistered")]
    OnAppUnregistered {
        #[serde(rename = "appName")]
        app_name: String,
        #[serde(rename = "appId")]
        app_id: u32,
        reason: AppInterfaceUnregisteredReason,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OnAppRegistered {
    pub app_name: String,
    pub app_id: u32,
    pub is_media_application: bool,
    pub language_desired: Language,
    pub vr_synonyms: Option<Vec<String>>,
    pub device_name: String,
    pub version_number: u32,
    pub app_type: Option<Vec<AppType>>,
    pub hmi_display_language_desired: Option<Language>,
    pub tts_name: Option<Vec<TtsChunk>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_method_is_namespaced() {
        let req = HmiRequest {
            id: 9,
            payload: HmiRequestPayload::UiDeleteCommand {
                app_id: 17,
                cmd_id: 42,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["method"], "UI.DeleteCommand");
        assert_eq!(json["params"]["cmdId"], 42);
        assert_eq!(json["params"]["appId"], 17);
    }

    #[test]
    fn payload_method_mapping() {
        let p = HmiRequestPayload::VrAddCommand {
            app_id: 1,
            cmd_id: 2,
            vr_commands: vec!["hello".to_string()],
        };
        assert_eq!(p.method(), HmiMethod::VrAddCommand);
        assert_eq!(
            HmiRequestPayload::ButtonsGetCapabilities {}.method(),
            HmiMethod::ButtonsGetCapabilities
        );
    }

    #[test]
    fn bus_response_tag() {
        let resp = HmiResult::ActivateApp {
            id: 3,
            result: ResultCode::Success,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["method"], "AppLinkCore.ActivateAppResponse");
    }
}
