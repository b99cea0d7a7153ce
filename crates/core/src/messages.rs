use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Command tags accepted from the control surface.
///
/// Token 0 of every message must match one of these exactly (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidCommand {
    Status,

    // Per-visual fan-out
    ChangeGeneratorA,
    ChangeGeneratorB,
    ChangeEffectA,
    ChangeEffectB,
    ChangeMixer,

    // Output routing
    ChangeOutput,
    ChangeOutputEffect,
    ChangeFader,

    // Scalars
    ChangeTint,
    ChangePresent,
    ChangeShufflerSelect,
    ChangeThresholdValue,

    // Presets
    SavePresent,
    LoadPresent,

    // Generator assets
    Blinken,
    Image,
    ImageZoomer,
    Textdef,
    TextdefFile,
    Textwr,

    /// Enable or disable random mode
    Random,
    /// One shot randomizer
    Randomize,
}

impl ValidCommand {
    pub const ALL: [ValidCommand; 23] = [
        ValidCommand::Status,
        ValidCommand::ChangeGeneratorA,
        ValidCommand::ChangeGeneratorB,
        ValidCommand::ChangeEffectA,
        ValidCommand::ChangeEffectB,
        ValidCommand::ChangeMixer,
        ValidCommand::ChangeOutput,
        ValidCommand::ChangeOutputEffect,
        ValidCommand::ChangeFader,
        ValidCommand::ChangeTint,
        ValidCommand::ChangePresent,
        ValidCommand::ChangeShufflerSelect,
        ValidCommand::ChangeThresholdValue,
        ValidCommand::SavePresent,
        ValidCommand::LoadPresent,
        ValidCommand::Blinken,
        ValidCommand::Image,
        ValidCommand::ImageZoomer,
        ValidCommand::Textdef,
        ValidCommand::TextdefFile,
        ValidCommand::Textwr,
        ValidCommand::Random,
        ValidCommand::Randomize,
    ];

    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidCommand::Status => "STATUS",
            ValidCommand::ChangeGeneratorA => "CHANGE_GENERATOR_A",
            ValidCommand::ChangeGeneratorB => "CHANGE_GENERATOR_B",
            ValidCommand::ChangeEffectA => "CHANGE_EFFECT_A",
            ValidCommand::ChangeEffectB => "CHANGE_EFFECT_B",
            ValidCommand::ChangeMixer => "CHANGE_MIXER",
            ValidCommand::ChangeOutput => "CHANGE_OUTPUT",
            ValidCommand::ChangeOutputEffect => "CHANGE_OUTPUT_EFFECT",
            ValidCommand::ChangeFader => "CHANGE_FADER",
            ValidCommand::ChangeTint => "CHANGE_TINT",
            ValidCommand::ChangePresent => "CHANGE_PRESENT",
            ValidCommand::ChangeShufflerSelect => "CHANGE_SHUFFLER_SELECT",
            ValidCommand::ChangeThresholdValue => "CHANGE_THRESHOLD_VALUE",
            ValidCommand::SavePresent => "SAVE_PRESENT",
            ValidCommand::LoadPresent => "LOAD_PRESENT",
            ValidCommand::Blinken => "BLINKEN",
            ValidCommand::Image => "IMAGE",
            ValidCommand::ImageZoomer => "IMAGE_ZOOMER",
            ValidCommand::Textdef => "TEXTDEF",
            ValidCommand::TextdefFile => "TEXTDEF_FILE",
            ValidCommand::Textwr => "TEXTWR",
            ValidCommand::Random => "RANDOM",
            ValidCommand::Randomize => "RANDOMIZE",
        }
    }

    /// Whether the command may appear in a stored status snapshot.
    ///
    /// Session and persistence commands are refused on replay; a preset that
    /// loads a preset would never terminate.
    pub fn is_replayable(&self) -> bool {
        !matches!(
            self,
            ValidCommand::Status
                | ValidCommand::ChangePresent
                | ValidCommand::SavePresent
                | ValidCommand::LoadPresent
                | ValidCommand::Random
                | ValidCommand::Randomize
        )
    }

    /// Commands whose single argument is everything after the tag
    pub fn takes_rest_of_line(&self) -> bool {
        matches!(
            self,
            ValidCommand::Blinken
                | ValidCommand::Image
                | ValidCommand::ImageZoomer
                | ValidCommand::TextdefFile
                | ValidCommand::Textwr
        )
    }
}

impl fmt::Display for ValidCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when token 0 does not name a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for ValidCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidCommand::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// What the caller has to do after a message was processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Push the full engine status back to the client
    Status,
}

/// Settings configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    // General settings
    pub target_fps: u32,

    // Topology
    pub visual_count: usize,
    pub output_count: usize,

    // Presets
    pub preset_count: usize,
    pub presets_path: PathBuf,

    // Generator assets are resolved relative to this directory
    pub data_dir: PathBuf,

    // Transitions and randomizer
    pub fade_time_ms: u32,
    pub random_interval_ms: u32,

    // Effect defaults
    pub initial_tint: (u8, u8, u8),
    pub initial_threshold: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 25,

            visual_count: 3,
            output_count: 2,

            preset_count: 128,
            presets_path: PathBuf::from("presets.json"),

            data_dir: PathBuf::from("data"),

            fade_time_ms: 1500,
            random_interval_ms: 4000,

            initial_tint: (255, 255, 255),
            initial_threshold: 128,
        }
    }
}
