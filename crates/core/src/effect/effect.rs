use serde::{Deserialize, Serialize};

use crate::selector::Selector;

// Effect types
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum EffectName {
    Passthru,
    Inverter,
    Rotozoom,
    BeatVerticalShift,
    BeatHorizontalShift,
    Voluminize,
    Tint,
    Threshold,
    Emboss,
}

impl Selector for EffectName {
    const KIND: &'static str = "effect";

    fn all() -> &'static [Self] {
        &[
            EffectName::Passthru,
            EffectName::Inverter,
            EffectName::Rotozoom,
            EffectName::BeatVerticalShift,
            EffectName::BeatHorizontalShift,
            EffectName::Voluminize,
            EffectName::Tint,
            EffectName::Threshold,
            EffectName::Emboss,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Colour multiplier applied per channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    r: u8,
    g: u8,
    b: u8,
}

impl Tint {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.r = r;
        self.g = g;
        self.b = b;
    }

    pub fn color(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Black/white cut-off on pixel brightness
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    value: u8,
}

impl Threshold {
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    pub fn set_threshold(&mut self, value: u8) {
        self.value = value;
    }

    pub fn threshold(&self) -> u8 {
        self.value
    }
}

/// A registry entry. Only effects with parameters carry state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Stateless(EffectName),
    Tint(Tint),
    Threshold(Threshold),
}

impl Effect {
    pub fn name(&self) -> EffectName {
        match self {
            Effect::Stateless(name) => *name,
            Effect::Tint(_) => EffectName::Tint,
            Effect::Threshold(_) => EffectName::Threshold,
        }
    }
}

/// All effects, one instance per `EffectName`, in index order
#[derive(Clone, Debug)]
pub struct EffectRegistry {
    effects: Vec<Effect>,
}

impl EffectRegistry {
    pub fn new(tint: (u8, u8, u8), threshold: u8) -> Self {
        let effects = EffectName::all()
            .iter()
            .map(|name| match name {
                EffectName::Tint => Effect::Tint(Tint::new(tint.0, tint.1, tint.2)),
                EffectName::Threshold => Effect::Threshold(Threshold::new(threshold)),
                other => Effect::Stateless(*other),
            })
            .collect();

        Self { effects }
    }

    pub fn get(&self, name: EffectName) -> Option<&Effect> {
        self.effects.get(name.index())
    }

    pub fn get_mut(&mut self, name: EffectName) -> Option<&mut Effect> {
        self.effects.get_mut(name.index())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
