use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;

use crate::effect::effect::EffectRegistry;
use crate::generator::generator::GeneratorRegistry;
use crate::generator::loaders::Resources;
use crate::messages::{Settings, ValidCommand};
use crate::output::fader::{FadeComplete, Fader, FaderKind};
use crate::output::output_mapping::OutputMapping;
use crate::preset::preset_library::PresetLibrary;
use crate::selector::Selector;
use crate::shuffler;
use crate::visual::visual::Visual;

/// Asset parameters as last requested by the control surface.
///
/// These are recorded before the matching generator is asked to load them,
/// so they may name an asset that failed to load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetState {
    pub blinken_file: Option<String>,
    pub image_file: Option<String>,
    pub image_zoomer_file: Option<String>,
    pub texture_deformation_lut: Option<i32>,
    pub texture_deformation_file: Option<String>,
    pub text: Option<String>,
}

/// Everything the control surface can change
pub struct EngineState {
    settings: Settings,
    visuals: Vec<Visual>,
    outputs: Vec<OutputMapping>,
    generators: GeneratorRegistry,
    effects: EffectRegistry,
    presets: PresetLibrary,
    presets_path: Option<PathBuf>,
    tint: (u8, u8, u8),
    threshold: u8,
    shuffler_select: Vec<bool>,
    random_mode: bool,
    since_shuffle: Duration,
    assets: AssetState,
}

impl EngineState {
    /// Build the default topology from settings. Presets stay in memory until
    /// `with_preset_file` attaches a file
    pub fn new(settings: Settings) -> Self {
        let visual_count = settings.visual_count.max(1);
        let fade_time = Duration::from_millis(settings.fade_time_ms as u64);

        let outputs = (0..settings.output_count)
            .map(|i| OutputMapping::new(i % visual_count, Fader::new(FaderKind::Switch, fade_time)))
            .collect();

        Self {
            visuals: vec![Visual::default(); visual_count],
            outputs,
            generators: GeneratorRegistry::new(Resources::new(settings.data_dir.clone())),
            effects: EffectRegistry::new(settings.initial_tint, settings.initial_threshold),
            presets: PresetLibrary::new(settings.preset_count),
            presets_path: None,
            tint: settings.initial_tint,
            threshold: settings.initial_threshold,
            shuffler_select: vec![true; visual_count],
            random_mode: false,
            since_shuffle: Duration::ZERO,
            assets: AssetState::default(),
            settings,
        }
    }

    /// Persist presets to `path`, loading it first if it already exists
    pub fn with_preset_file(mut self, path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            self.presets = PresetLibrary::load(path, self.settings.preset_count)?;
            log::info!(
                "Loaded {} presets from {}",
                self.presets.len(),
                path.display()
            );
        }
        self.presets_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // Visuals

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn visual(&self, index: usize) -> Option<&Visual> {
        self.visuals.get(index)
    }

    pub fn visual_mut(&mut self, index: usize) -> Option<&mut Visual> {
        self.visuals.get_mut(index)
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    /// Append a visual slot, returning its index
    pub fn add_visual(&mut self, visual: Visual) -> usize {
        self.visuals.push(visual);
        self.shuffler_select.push(true);
        self.visuals.len() - 1
    }

    /// Drop the last visual slot. Outputs fed by it fall back to visual 0
    pub fn remove_visual(&mut self) -> Option<Visual> {
        if self.visuals.len() <= 1 {
            return None;
        }

        let removed = self.visuals.pop();
        self.shuffler_select.truncate(self.visuals.len());
        let count = self.visuals.len();
        for mapping in &mut self.outputs {
            if mapping.visual() >= count {
                mapping.set_visual(0);
            }
        }
        removed
    }

    /// Validate a visual index sent by the control surface
    pub fn check_visual(&self, index: i32) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.visuals.len())
    }

    // Outputs

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn output(&self, index: usize) -> Option<&OutputMapping> {
        self.outputs.get(index)
    }

    pub fn output_mut(&mut self, index: usize) -> Option<&mut OutputMapping> {
        self.outputs.get_mut(index)
    }

    /// Visual currently feeding `output`
    pub fn fx_input_for_output(&self, output: usize) -> Option<usize> {
        self.outputs.get(output).map(OutputMapping::visual)
    }

    /// Bind `output` to `visual` immediately, bypassing its fader
    pub fn map_input_to_output(&mut self, output: usize, visual: usize) -> bool {
        if visual >= self.visuals.len() {
            return false;
        }
        match self.outputs.get_mut(output) {
            Some(mapping) => {
                mapping.set_visual(visual);
                true
            }
            None => false,
        }
    }

    /// Fader of the given kind using the configured fade time
    pub fn new_fader(&self, kind: FaderKind) -> Fader {
        Fader::new(kind, Duration::from_millis(self.settings.fade_time_ms as u64))
    }

    // Registries

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    pub fn generators_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.generators
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectRegistry {
        &mut self.effects
    }

    // Presets

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut PresetLibrary {
        &mut self.presets
    }

    /// Write all presets to the attached preset file, if any
    pub fn persist_presets(&self) -> anyhow::Result<()> {
        match &self.presets_path {
            Some(path) => self.presets.save(path),
            None => {
                log::debug!("No preset file attached, keeping presets in memory");
                Ok(())
            }
        }
    }

    // Scalars

    pub fn tint(&self) -> (u8, u8, u8) {
        self.tint
    }

    pub fn set_tint(&mut self, r: u8, g: u8, b: u8) {
        self.tint = (r, g, b);
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn set_threshold(&mut self, value: u8) {
        self.threshold = value;
    }

    pub fn shuffler_select(&self) -> &[bool] {
        &self.shuffler_select
    }

    pub fn set_shuffler_select(&mut self, index: usize, selected: bool) -> bool {
        match self.shuffler_select.get_mut(index) {
            Some(flag) => {
                *flag = selected;
                true
            }
            None => false,
        }
    }

    pub fn random_mode(&self) -> bool {
        self.random_mode
    }

    pub fn set_random_mode(&mut self, enabled: bool) {
        self.random_mode = enabled;
        self.since_shuffle = Duration::ZERO;
    }

    pub fn assets(&self) -> &AssetState {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetState {
        &mut self.assets
    }

    /// Status lines describing every persisted field, in command syntax.
    ///
    /// Feeding these back through the dispatcher without transitions
    /// reproduces the current state.
    pub fn current_status(&self) -> Vec<String> {
        let mut status = vec![
            status_line(
                ValidCommand::ChangeGeneratorA,
                self.visuals.iter().map(|v| v.generator1.index()),
            ),
            status_line(
                ValidCommand::ChangeGeneratorB,
                self.visuals.iter().map(|v| v.generator2.index()),
            ),
            status_line(
                ValidCommand::ChangeEffectA,
                self.visuals.iter().map(|v| v.effect1.index()),
            ),
            status_line(
                ValidCommand::ChangeEffectB,
                self.visuals.iter().map(|v| v.effect2.index()),
            ),
            status_line(
                ValidCommand::ChangeMixer,
                self.visuals.iter().map(|v| v.mixer.index()),
            ),
            status_line(
                ValidCommand::ChangeOutput,
                self.outputs.iter().map(OutputMapping::visual),
            ),
            status_line(
                ValidCommand::ChangeOutputEffect,
                self.outputs.iter().map(|m| m.effect.index()),
            ),
            status_line(
                ValidCommand::ChangeFader,
                self.outputs.iter().map(|m| m.fader().kind().index()),
            ),
            status_line(
                ValidCommand::ChangeTint,
                [self.tint.0, self.tint.1, self.tint.2],
            ),
            status_line(ValidCommand::ChangeThresholdValue, [self.threshold]),
            status_line(
                ValidCommand::ChangeShufflerSelect,
                self.shuffler_select
                    .iter()
                    .map(|selected| if *selected { 1 } else { 0 }),
            ),
        ];

        let assets = &self.assets;
        let asset_lines = [
            (ValidCommand::Blinken, assets.blinken_file.clone()),
            (ValidCommand::Image, assets.image_file.clone()),
            (ValidCommand::ImageZoomer, assets.image_zoomer_file.clone()),
            (
                ValidCommand::Textdef,
                assets.texture_deformation_lut.map(|lut| lut.to_string()),
            ),
            (
                ValidCommand::TextdefFile,
                assets.texture_deformation_file.clone(),
            ),
            (ValidCommand::Textwr, assets.text.clone()),
        ];
        status.extend(
            asset_lines
                .into_iter()
                .filter_map(|(cmd, value)| value.map(|value| status_line(cmd, [value]))),
        );

        status
    }

    /// `current_status` plus the session fields a client needs to resync
    pub fn full_status(&self) -> Vec<String> {
        let mut status = self.current_status();
        status.push(status_line(
            ValidCommand::ChangePresent,
            [self.presets.selected()],
        ));
        status.push(status_line(
            ValidCommand::Random,
            [if self.random_mode { "ON" } else { "OFF" }],
        ));
        status
    }

    /// Advance faders and the random mode timer
    pub fn tick(&mut self, elapsed: Duration) -> Vec<FadeComplete> {
        self.tick_with_rng(elapsed, &mut rand::rng())
    }

    pub fn tick_with_rng<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        rng: &mut R,
    ) -> Vec<FadeComplete> {
        let visual_count = self.visuals.len();
        let mut completed = Vec::new();

        for mapping in &mut self.outputs {
            if let Some(done) = mapping.fader_mut().advance(elapsed) {
                if done.target_visual < visual_count {
                    mapping.set_visual(done.target_visual);
                    completed.push(done);
                } else {
                    log::warn!(
                        "Fade on output {} targets removed visual {}",
                        done.mapping,
                        done.target_visual
                    );
                }
            }
        }

        if self.random_mode {
            self.since_shuffle += elapsed;
            let interval = Duration::from_millis(self.settings.random_interval_ms as u64);
            if self.since_shuffle >= interval {
                self.since_shuffle = Duration::ZERO;
                shuffler::manual_shuffle(self, rng);
            }
        }

        completed
    }
}

fn status_line<I, T>(command: ValidCommand, values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let mut line = command.as_str().to_string();
    for value in values {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line
}
