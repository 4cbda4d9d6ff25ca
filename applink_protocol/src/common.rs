use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Success,
    InvalidData,
    UnsupportedRequest,
    ApplicationNotRegistered,
    ApplicationRegisteredAlready,
    Rejected,
    GenericError,
    UnsupportedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HmiLevel {
    None,
    Background,
    Limited,
    Full,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioStreamingState {
    Audible,
    NotAudible,
    Attenuated,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemContext {
    Main,
    Vrsession,
    Menu,
    HmiObscured,
    Alert,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    #[serde(rename = "EN-US")]
    EnUs,
    #[serde(rename = "ES-MX")]
    EsMx,
    #[serde(rename = "FR-CA")]
    FrCa,
    #[serde(rename = "DE-DE")]
    DeDe,
    #[serde(rename = "RU-RU")]
    RuRu,
    #[serde(rename = "TR-TR")]
    TrTr,
    #[serde(rename = "PT-BR")]
    PtBr,
    #[serde(rename = "JA-JP")]
    JaJp,
}

impl Default for Language {
    fn default() -> Self {
        Language::EnUs
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeechCapability {
    Text,
    SapiPhonemes,
    LhplusPhonemes,
    PreRecorded,
    Silence,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TtsChunk {
    pub text: String,
    #[serde(rename = "type")]
    pub chunk_type: SpeechCapability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonName {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "SEEKLEFT")]
    SeekLeft,
    #[serde(rename = "SEEKRIGHT")]
    SeekRight,
    #[serde(rename = "TUNEUP")]
    TuneUp,
    #[serde(rename = "TUNEDOWN")]
    TuneDown,
    #[serde(rename = "PRESET_0")]
    Preset0,
    #[serde(rename = "PRESET_1")]
    Preset1,
    #[serde(rename = "PRESET_2")]
    Preset2,
    #[serde(rename = "PRESET_3")]
    Preset3,
    #[serde(rename = "PRESET_4")]
    Preset4,
    #[serde(rename = "PRESET_5")]
    Preset5,
    #[serde(rename = "PRESET_6")]
    Preset6,
    #[serde(rename = "PRESET_7")]
    Preset7,
    #[serde(rename = "PRESET_8")]
    Preset8,
    #[serde(rename = "PRESET_9")]
    Preset9,
    #[serde(rename = "CUSTOM_BUTTON")]
    CustomButton,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEventMode {
    #[serde(rename = "BUTTONUP")]
    ButtonUp,
    #[serde(rename = "BUTTONDOWN")]
    ButtonDown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonPressMode {
    Long,
    Short,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerSource {
    Menu,
    Vr,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionMode {
    ManualOnly,
    VrOnly,
    Both,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    #[serde(rename = "COUNTUP")]
    CountUp,
    #[serde(rename = "COUNTDOWN")]
    CountDown,
    #[serde(rename = "PAUSE")]
    Pause,
    #[serde(rename = "RESUME")]
    Resume,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalProperty {
    #[serde(rename = "HELPPROMPT")]
    HelpPrompt,
    #[serde(rename = "TIMEOUTPROMPT")]
    TimeoutPrompt,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignment {
    LeftAligned,
    RightAligned,
    Centered,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverDistractionState {
    DdOn,
    DdOff,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppInterfaceUnregisteredReason {
    UserExit,
    IgnitionOff,
    BluetoothOff,
    UsbDisconnected,
    LanguageChange,
    MasterReset,
    FactoryDefaults,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppType {
    Default,
    Communication,
    Media,
    Messaging,
    Navigation,
    Information,
    Social,
    Background,
    Testing,
    System,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    GraphicBmp,
    GraphicJpeg,
    GraphicPng,
    AudioWave,
    AudioMp3,
    Binary,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    Static,
    Dynamic,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub value: String,
    pub image_type: ImageType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoftButtonType {
    Text,
    Image,
    Both,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemAction {
    DefaultAction,
    StealFocus,
    KeepContext,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoftButton {
    #[serde(rename = "softButtonID")]
    pub soft_button_id: u32,
    #[serde(rename = "type")]
    pub button_type: SoftButtonType,
    pub text: Option<String>,
    pub image: Option<Image>,
    pub is_highlighted: Option<bool>,
    pub system_action: SystemAction,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VrHelpItem {
    pub text: String,
    pub image: Option<Image>,
    pub position: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuParams {
    pub menu_name: String,
    #[serde(rename = "parentID")]
    pub parent_id: Option<u32>,
    pub position: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    #[serde(rename = "choiceID")]
    pub choice_id: u32,
    pub menu_name: String,
    pub vr_commands: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncMsgVersion {
    pub major_version: u32,
    pub minor_version: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    #[serde(rename = "CID")]
    Cid,
    #[serde(rename = "TYPE2")]
    Type2,
    #[serde(rename = "TYPE5")]
    Type5,
    #[serde(rename = "NGN")]
    Ngn,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    #[serde(rename = "TYPE2SET")]
    Type2Set,
    #[serde(rename = "TYPE5SET")]
    Type5Set,
    #[serde(rename = "CID1SET")]
    Cid1Set,
    #[serde(rename = "CID2SET")]
    Cid2Set,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextFieldName {
    MainField1,
    MainField2,
    StatusBar,
    MediaClock,
    MediaTrack,
    AlertText1,
    AlertText2,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClockFormat {
    #[serde(rename = "CLOCK1")]
    Clock1,
    #[serde(rename = "CLOCK2")]
    Clock2,
    #[serde(rename = "CLOCKTEXT1")]
    ClockText1,
    #[serde(rename = "CLOCKTEXT2")]
    ClockText2,
    #[serde(rename = "CLOCKTEXT3")]
    ClockText3,
    #[serde(rename = "CLOCKTEXT4")]
    ClockText4,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub name: TextFieldName,
    pub character_set: CharacterSet,
    pub width: u32,
    pub rows: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCapabilities {
    pub display_type: DisplayType,
    pub text_fields: Vec<TextField>,
    pub media_clock_formats: Vec<MediaClockFormat>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ButtonCapabilities {
    pub name: ButtonName,
    pub short_press_available: bool,
    pub long_press_available: bool,
    pub up_down_available: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresetBankCapabilities {
    pub on_screen_presets_available: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SoftButtonCapabilities {
    pub short_press_available: bool,
    pub long_press_available: bool,
    pub up_down_available: bool,
    pub image_supported: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HmiZoneCapability {
    Front,
    Back,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VrCapability {
    Text,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleType {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<String>,
    pub trim: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HmiApplication {
    pub app_name: String,
    pub ngn_media_screen_app_name: Option<String>,
    pub app_id: u32,
    pub is_media_application: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicResponse {
    pub success: bool,
    pub result_code: ResultCode,
}

impl BasicResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            result_code: ResultCode::Success,
        }
    }

    pub fn error(result_code: ResultCode) -> Self {
        Self {
            success: false,
            result_code,
        }
    }

    pub fn from_result(result_code: ResultCode) -> Self {
        Self {
            success: result_code == ResultCode::Success,
            result_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_literals() {
        assert_eq!(
            serde_json::to_string(&ResultCode::ApplicationRegisteredAlready).unwrap(),
            "\"APPLICATION_REGISTERED_ALREADY\""
        );
        assert_eq!(serde_json::to_string(&HmiLevel::None).unwrap(), "\"NONE\"");
        assert_eq!(
            serde_json::to_string(&SystemContext::HmiObscured).unwrap(),
            "\"HMI_OBSCURED\""
        );
        assert_eq!(serde_json::to_string(&Language::EnUs).unwrap(), "\"EN-US\"");
        assert_eq!(
            serde_json::to_string(&ButtonName::SeekLeft).unwrap(),
            "\"SEEKLEFT\""
        );
        assert_eq!(
            serde_json::to_string(&ButtonName::Preset3).unwrap(),
            "\"PRESET_3\""
        );
        assert_eq!(
            serde_json::to_string(&UpdateMode::CountUp).unwrap(),
            "\"COUNTUP\""
        );
    }

    #[test]
    fn tts_chunk_type_field() {
        let chunk = TtsChunk {
            text: "hello".to_string(),
            chunk_type: SpeechCapability::Text,
        };
        let json = serde_json::to_string(&chunk).unwrap();
        assert_eq!(json, "{\"text\":\"hello\",\"type\":\"TEXT\"}");
    }

    #[test]
    fn basic_response_constructors() {
        assert!(BasicResponse::ok().success);
        let err = BasicResponse::error(ResultCode::Rejected);
        assert!(!err.success);
        assert_eq!(err.result_code, ResultCode::Rejected);
        assert!(BasicResponse::from_result(ResultCode::Success).success);
        assert!(!BasicResponse::from_result(ResultCode::GenericError).success);
    }
}
