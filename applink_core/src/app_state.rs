use applink_protocol::{
    AppType, AudioStreamingState, Choice, HmiLevel, Image, Language, MenuParams, ProtocolVersion,
    SyncMsgVersion, SystemContext, TtsChunk,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandType {
    Ui,
    Vr,
}

#[derive(Debug, Clone, Default)]
pub struct CommandParams {
    pub menu_params: Option<MenuParams>,
    pub vr_commands: Option<Vec<String>>,
    pub cmd_icon: Option<Image>,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub name: String,
    pub position: Option<u32>,
}

// Ordered maps keep teardown/replay emission deterministic: ascending ids,
// UI parts before VR parts of the same command.
#[derive(Debug)]
pub struct AppState {
    pub session_key: u32,
    pub name: String,
    pub ngn_screen_name: Option<String>,
    pub vr_synonyms: Option<Vec<String>>,
    pub tts_name: Option<Vec<TtsChunk>>,
    pub version: ProtocolVersion,
    pub is_media: bool,
    pub uses_vehicle_data: bool,
    pub language_desired: Language,
    pub hmi_display_language_desired: Language,
    pub sync_msg_version: SyncMsgVersion,
    pub app_types: Vec<AppType>,
    pub hmi_level: HmiLevel,
    pub audio_state: AudioStreamingState,
    pub system_context: SystemContext,
    menus: BTreeMap<u32, Menu>,
    menu_commands: BTreeMap<u32, BTreeSet<u32>>,
    commands: BTreeMap<(u32, CommandType), CommandParams>,
    unresponded_by_cmd: BTreeMap<u32, u32>,
    choice_sets: BTreeMap<u32, Vec<Choice>>,
    pub uploaded_files: BTreeSet<String>,
}

impl AppState {
    pub fn new(session_key: u32, name: String, version: ProtocolVersion) -> Self {
        Self {
            session_key,
            name,
            ngn_screen_name: None,
            vr_synonyms: None,
            tts_name: None,
            version,
            is_media: false,
            uses_vehicle_data: false,
            language_desired: Language::default(),
            hmi_display_language_desired: Language::default(),
            sync_msg_version: SyncMsgVersion {
                major_version: 1,
                minor_version: 0,
            },
            app_types: Vec::new(),
            hmi_level: HmiLevel::None,
            audio_state: AudioStreamingState::NotAudible,
            system_context: SystemContext::Main,
            menus: BTreeMap::new(),
            menu_commands: BTreeMap::new(),
            commands: BTreeMap::new(),
            unresponded_by_cmd: BTreeMap::new(),
            choice_sets: BTreeMap::new(),
            uploaded_files: BTreeSet::new(),
        }
    }

    pub fn add_menu(&mut self, menu_id: u32, name: String, position: Option<u32>) {
        self.menus.insert(menu_id, Menu { name, position });
    }

    pub fn find_menu(&self, menu_id: u32) -> Option<&Menu> {
        self.menus.get(&menu_id)
    }

    pub fn remove_menu(&mut self, menu_id: u32) {
        self.menus.remove(&menu_id);
        self.menu_commands.remove(&menu_id);
    }

    pub fn menus(&self) -> impl Iterator<Item = (u32, &Menu)> {
        self.menus.iter().map(|(id, menu)| (*id, menu))
    }

    pub fn add_menu_command(&mut self, cmd_id: u32, menu_id: u32) {
        self.menu_commands.entry(menu_id).or_default().insert(cmd_id);
    }

    pub fn remove_menu_command(&mut self, cmd_id: u32) {
        for commands in self.menu_commands.values_mut() {
            commands.remove(&cmd_id);
        }
    }

    pub fn menu_commands(&self, menu_id: u32) -> Vec<u32> {
        self.menu_commands
            .get(&menu_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn add_command(&mut self, cmd_id: u32, cmd_type: CommandType, params: CommandParams) {
        self.commands.insert((cmd_id, cmd_type), params);
    }

    pub fn remove_command(&mut self, cmd_id: u32, cmd_type: CommandType) {
        self.commands.remove(&(cmd_id, cmd_type));
    }

    pub fn command_types(&self, cmd_id: u32) -> Vec<CommandType> {
        [CommandType::Ui, CommandType::Vr]
            .into_iter()
            .filter(|cmd_type| self.commands.contains_key(&(cmd_id, *cmd_type)))
            .collect()
    }

    pub fn has_command(&self, cmd_id: u32) -> bool {
        !self.command_types(cmd_id).is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = (u32, CommandType, &CommandParams)> {
        self.commands
            .iter()
            .map(|((id, cmd_type), params)| (*id, *cmd_type, params))
    }

    pub fn increment_unresponded(&mut self, cmd_id: u32) {
        *self.unresponded_by_cmd.entry(cmd_id).or_insert(0) += 1;
    }

    // Returns the count after decrementing; the entry disappears at zero.
    pub fn decrement_unresponded(&mut self, cmd_id: u32) -> u32 {
        let Some(count) = self.unresponded_by_cmd.get_mut(&cmd_id) else {
            return 0;
        };
        *count = count.saturating_sub(1);
        let remaining = *count;
        if remaining == 0 {
            self.unresponded_by_cmd.remove(&cmd_id);
        }
        remaining
    }

    pub fn unresponded(&self, cmd_id: u32) -> u32 {
        self.unresponded_by_cmd.get(&cmd_id).copied().unwrap_or(0)
    }

    pub fn add_choice_set(&mut self, set_id: u32, choices: Vec<Choice>) {
        self.choice_sets.insert(set_id, choices);
    }

    pub fn find_choice_set(&self, set_id: u32) -> Option<&Vec<Choice>> {
        self.choice_sets.get(&set_id)
    }

    pub fn remove_choice_set(&mut self, set_id: u32) {
        self.choice_sets.remove(&set_id);
    }

    pub fn choice_sets(&self) -> impl Iterator<Item = (u32, &Vec<Choice>)> {
        self.choice_sets.iter().map(|(id, set)| (*id, set))
    }
}
