use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::args::{arg, clamp_channel, int_arg, tokenize};
use super::error::DispatchError;
use crate::effect::effect::{Effect, EffectName};
use crate::engine::EngineState;
use crate::generator::generator::{Generator, GeneratorName};
use crate::messages::{Reply, UnknownCommand, ValidCommand};
use crate::output::fader::{FadeComplete, FaderKind};
use crate::selector::{Selector, SelectorError};
use crate::shuffler;
use crate::visual::visual::Visual;

type HandlerResult = Result<Option<Reply>, DispatchError>;

/// Process one message from the control surface.
///
/// `use_transition` decides whether output changes go through the output's
/// fader or are applied on the spot. Failures are logged and swallowed; the
/// only observable result is whether the client needs a full status push.
pub fn process_message<S: AsRef<str>>(
    state: &mut EngineState,
    msg: &[S],
    use_transition: bool,
) -> Option<Reply> {
    let tag = msg.first()?.as_ref();

    let command = match tag.parse::<ValidCommand>() {
        Ok(command) => command,
        Err(UnknownCommand(_)) => {
            let tokens: String = msg.iter().map(|t| format!("{}; ", t.as_ref())).collect();
            log::info!("Ignored command <{}>", tokens);
            return None;
        }
    };

    match handle(command, state, msg, use_transition) {
        Ok(reply) => reply,
        Err(err) => {
            log::warn!("Ignored command {}: {}", command, err);
            None
        }
    }
}

/// Replay status lines without transitions, e.g. when loading a preset.
///
/// Session and persistence commands in the lines are skipped with a warning.
pub fn apply_status<S: AsRef<str>>(state: &mut EngineState, lines: &[S]) {
    for line in lines {
        let tokens = tokenize(line.as_ref());
        let refused = match tokens.first().map(|tag| tag.parse::<ValidCommand>()) {
            Some(Ok(command)) => !command.is_replayable(),
            _ => false,
        };
        if refused {
            log::warn!("Ignored stored status line <{}>", line.as_ref());
            continue;
        }
        process_message(state, &tokens, false);
    }
}

fn handle<S: AsRef<str>>(
    command: ValidCommand,
    state: &mut EngineState,
    msg: &[S],
    use_transition: bool,
) -> HandlerResult {
    match command {
        ValidCommand::Status => Ok(Some(Reply::Status)),

        ValidCommand::ChangeGeneratorA => fan_out_visuals(state, msg, Visual::set_generator1_index),
        ValidCommand::ChangeGeneratorB => fan_out_visuals(state, msg, Visual::set_generator2_index),
        ValidCommand::ChangeEffectA => fan_out_visuals(state, msg, Visual::set_effect1_index),
        ValidCommand::ChangeEffectB => fan_out_visuals(state, msg, Visual::set_effect2_index),
        ValidCommand::ChangeMixer => fan_out_visuals(state, msg, Visual::set_mixer_index),

        ValidCommand::ChangeOutput => change_output(state, msg, use_transition),
        ValidCommand::ChangeOutputEffect => change_output_effect(state, msg),
        ValidCommand::ChangeFader => change_fader(state, msg),

        ValidCommand::ChangeTint => change_tint(state, msg),
        ValidCommand::ChangeThresholdValue => change_threshold(state, msg),
        ValidCommand::ChangePresent => {
            let index = int_arg(msg, 1)?;
            state.presets_mut().select(index);
            Ok(None)
        }
        ValidCommand::ChangeShufflerSelect => change_shuffler_select(state, msg),

        ValidCommand::SavePresent => save_present(state),
        ValidCommand::LoadPresent => load_present(state),

        ValidCommand::Blinken => {
            let file = arg(msg, 1)?;
            state.assets_mut().blinken_file = Some(file.to_string());
            match state.generators_mut().get_mut(GeneratorName::Blinkenlights) {
                Some(Generator::Blinkenlights(blink)) => blink.load_file(file)?,
                _ => return Err(mismatch("blinkenlights generator")),
            }
            Ok(None)
        }
        ValidCommand::Image => {
            let file = arg(msg, 1)?;
            state.assets_mut().image_file = Some(file.to_string());
            match state.generators_mut().get_mut(GeneratorName::Image) {
                Some(Generator::Image(image)) => image.load_file(file)?,
                _ => return Err(mismatch("image generator")),
            }
            Ok(None)
        }
        ValidCommand::ImageZoomer => {
            let file = arg(msg, 1)?;
            state.assets_mut().image_zoomer_file = Some(file.to_string());
            match state.generators_mut().get_mut(GeneratorName::ImageZoomer) {
                Some(Generator::ImageZoomer(zoomer)) => zoomer.load_image(file)?,
                _ => return Err(mismatch("image zoomer generator")),
            }
            Ok(None)
        }
        ValidCommand::Textdef => {
            let lut = int_arg(msg, 1)?;
            state.assets_mut().texture_deformation_lut = Some(lut);
            match state
                .generators_mut()
                .get_mut(GeneratorName::TextureDeformation)
            {
                Some(Generator::TextureDeformation(texture)) => texture.change_lut(lut)?,
                _ => return Err(mismatch("texture deformation generator")),
            }
            Ok(None)
        }
        ValidCommand::TextdefFile => {
            let file = arg(msg, 1)?;
            state.assets_mut().texture_deformation_file = Some(file.to_string());
            match state
                .generators_mut()
                .get_mut(GeneratorName::TextureDeformation)
            {
                Some(Generator::TextureDeformation(texture)) => texture.load_file(file)?,
                _ => return Err(mismatch("texture deformation generator")),
            }
            Ok(None)
        }
        ValidCommand::Textwr => {
            let text = arg(msg, 1)?;
            state.assets_mut().text = Some(text.to_string());
            match state.generators_mut().get_mut(GeneratorName::Textwriter) {
                Some(Generator::Textwriter(writer)) => writer.create_text_image(text),
                _ => return Err(mismatch("text writer generator")),
            }
            Ok(None)
        }

        ValidCommand::Random => {
            let mode = arg(msg, 1)?;
            if mode.eq_ignore_ascii_case("ON") {
                state.set_random_mode(true);
            } else if mode.eq_ignore_ascii_case("OFF") {
                state.set_random_mode(false);
                return Ok(Some(Reply::Status));
            }
            Ok(None)
        }
        ValidCommand::Randomize => {
            shuffler::manual_shuffle(state, &mut rand::rng());
            Ok(Some(Reply::Status))
        }
    }
}

fn mismatch(expected: &'static str) -> DispatchError {
    DispatchError::KindMismatch { expected }
}

/// Token i+1 goes to visual i. Stops at the first bad token; earlier visuals keep their update
fn fan_out_visuals<S: AsRef<str>>(
    state: &mut EngineState,
    msg: &[S],
    apply: fn(&mut Visual, i32) -> Result<(), SelectorError>,
) -> HandlerResult {
    for index in 0..state.visual_count() {
        let value = int_arg(msg, index + 1)?;
        let visual = state.visual_mut(index).ok_or(DispatchError::MissingSlot {
            kind: "visual",
            index,
        })?;
        apply(visual, value)?;
    }
    Ok(None)
}

fn change_output<S: AsRef<str>>(
    state: &mut EngineState,
    msg: &[S],
    use_transition: bool,
) -> HandlerResult {
    for index in 0..state.output_count() {
        let requested = int_arg(msg, index + 1)?;
        let new_visual = state
            .check_visual(requested)
            .ok_or(DispatchError::UnknownVisual(requested))?;
        let current = state
            .fx_input_for_output(index)
            .ok_or(DispatchError::MissingSlot {
                kind: "output",
                index,
            })?;

        if current == new_visual {
            continue;
        }

        if use_transition {
            if let Some(mapping) = state.output_mut(index) {
                // a running fade keeps its target; the new request is dropped
                mapping.fader_mut().start(new_visual, index);
            }
        } else {
            state.map_input_to_output(index, new_visual);
        }
    }
    Ok(None)
}

fn change_output_effect<S: AsRef<str>>(state: &mut EngineState, msg: &[S]) -> HandlerResult {
    for index in 0..state.output_count() {
        let effect = EffectName::from_index(int_arg(msg, index + 1)?)?;
        let mapping = state.output_mut(index).ok_or(DispatchError::MissingSlot {
            kind: "output",
            index,
        })?;
        mapping.effect = effect;
    }
    Ok(None)
}

fn change_fader<S: AsRef<str>>(state: &mut EngineState, msg: &[S]) -> HandlerResult {
    for index in 0..state.output_count() {
        let kind = FaderKind::from_index(int_arg(msg, index + 1)?)?;
        let fader = state.new_fader(kind);
        let mapping = state.output_mut(index).ok_or(DispatchError::MissingSlot {
            kind: "output",
            index,
        })?;
        // never interrupt a running transition
        mapping.replace_fader(fader);
    }
    Ok(None)
}

fn change_tint<S: AsRef<str>>(state: &mut EngineState, msg: &[S]) -> HandlerResult {
    let r = clamp_channel(int_arg(msg, 1)?);
    let g = clamp_channel(int_arg(msg, 2)?);
    let b = clamp_channel(int_arg(msg, 3)?);

    match state.effects_mut().get_mut(EffectName::Tint) {
        Some(Effect::Tint(tint)) => tint.set_color(r, g, b),
        _ => return Err(mismatch("tint effect")),
    }
    state.set_tint(r, g, b);
    Ok(None)
}

fn change_threshold<S: AsRef<str>>(state: &mut EngineState, msg: &[S]) -> HandlerResult {
    let value = clamp_channel(int_arg(msg, 1)?);

    match state.effects_mut().get_mut(EffectName::Threshold) {
        Some(Effect::Threshold(threshold)) => threshold.set_threshold(value),
        _ => return Err(mismatch("threshold effect")),
    }
    state.set_threshold(value);
    Ok(None)
}

/// Only the literal "1" selects a visual; any other token deselects it
fn change_shuffler_select<S: AsRef<str>>(state: &mut EngineState, msg: &[S]) -> HandlerResult {
    for index in 0..state.shuffler_select().len() {
        let selected = arg(msg, index + 1)? == "1";
        state.set_shuffler_select(index, selected);
    }
    Ok(None)
}

fn save_present(state: &mut EngineState) -> HandlerResult {
    let index = state.presets().selected();
    let status = state.current_status();
    let preset = state
        .presets_mut()
        .get_mut(index)
        .ok_or(DispatchError::MissingSlot {
            kind: "preset",
            index,
        })?;
    preset.set_status(status);

    state
        .persist_presets()
        .map_err(DispatchError::Persistence)?;
    Ok(None)
}

fn load_present(state: &mut EngineState) -> HandlerResult {
    let index = state.presets().selected();
    let status = state
        .presets()
        .get(index)
        .ok_or(DispatchError::MissingSlot {
            kind: "preset",
            index,
        })?
        .status()
        .map(<[String]>::to_vec);

    if let Some(lines) = status {
        apply_status(state, &lines);
    }
    Ok(Some(Reply::Status))
}

/// Shared handle serialising access to the engine.
///
/// Every call holds the engine lock for its whole duration, so a message is
/// applied as one batch relative to messages from other threads.
#[derive(Clone)]
pub struct Dispatcher {
    state: Arc<Mutex<EngineState>>,
}

impl Dispatcher {
    pub fn new(state: EngineState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> Arc<Mutex<EngineState>> {
        Arc::clone(&self.state)
    }

    pub fn process<S: AsRef<str>>(&self, msg: &[S], use_transition: bool) -> Option<Reply> {
        let mut state = self.state.lock();
        process_message(&mut state, msg, use_transition)
    }

    /// Tokenize and process one line of text
    pub fn process_line(&self, line: &str, use_transition: bool) -> Option<Reply> {
        self.process(&tokenize(line), use_transition)
    }

    /// Lines to send to a client after `Reply::Status`
    pub fn status(&self) -> Vec<String> {
        self.state.lock().full_status()
    }

    pub fn tick(&self, elapsed: Duration) -> Vec<FadeComplete> {
        self.state.lock().tick(elapsed)
    }
}
