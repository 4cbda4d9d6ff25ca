use applink_protocol::{
    ButtonCapabilities, DisplayCapabilities, HmiZoneCapability, Language, PresetBankCapabilities,
    SoftButtonCapabilities, SpeechCapability, VehicleType, VrCapability,
};

// Populated by the capability/language volley fired on HMI OnReady.
// Registrations that arrive earlier see the defaults.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    pub button_capabilities: Vec<ButtonCapabilities>,
    pub preset_bank_capabilities: Option<PresetBankCapabilities>,
    pub display_capabilities: Option<DisplayCapabilities>,
    pub hmi_zone_capabilities: Vec<HmiZoneCapability>,
    pub soft_button_capabilities: Option<Vec<SoftButtonCapabilities>>,
    pub speech_capabilities: Vec<SpeechCapability>,
    pub vr_capabilities: Vec<VrCapability>,
    pub ui_language: Language,
    pub vr_language: Language,
    pub tts_language: Language,
    pub vehicle_type: Option<VehicleType>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }
}
