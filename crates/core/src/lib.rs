pub use config::{ConfigError, ConfigManager, ConfigSchema};
pub use dispatcher::{
    apply_status, clamp_channel, process_message, tokenize, DispatchError, Dispatcher,
};
pub use effect::effect::{Effect, EffectName, EffectRegistry, Threshold, Tint};
pub use engine::{AssetState, EngineState};
pub use generator::generator::{Generator, GeneratorName, GeneratorRegistry};
pub use generator::loaders::{GeneratorError, Resources, TEXTURE_DEFORMATION_LUTS};
pub use messages::{Reply, Settings, UnknownCommand, ValidCommand};
pub use output::fader::{FadeComplete, Fader, FaderKind, FaderState};
pub use output::output_mapping::OutputMapping;
pub use preset::preset::Preset;
pub use preset::preset_library::PresetLibrary;
pub use selector::{Selector, SelectorError};
pub use shuffler::manual_shuffle;
pub use visual::mixer::MixerName;
pub use visual::visual::Visual;

mod config;
mod dispatcher;
mod effect;
mod engine;
mod generator;
pub mod messages;
mod output;
mod preset;
mod selector;
mod shuffler;
mod visual;
