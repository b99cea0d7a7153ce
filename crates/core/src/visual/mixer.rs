use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Ways of combining the two layers of a visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixerName {
    Passthru,
    Add,
    Multiply,
    Mix,
    NegativeMultiply,
    Checkbox,
    Voluminize,
    Either,
    Subtract,
}

impl Selector for MixerName {
    const KIND: &'static str = "mixer";

    fn all() -> &'static [Self] {
        &[
            MixerName::Passthru,
            MixerName::Add,
            MixerName::Multiply,
            MixerName::Mix,
            MixerName::NegativeMultiply,
            MixerName::Checkbox,
            MixerName::Voluminize,
            MixerName::Either,
            MixerName::Subtract,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }
}
