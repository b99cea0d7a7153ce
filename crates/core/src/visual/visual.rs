use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mixer::MixerName;
use crate::effect::effect::EffectName;
use crate::generator::generator::GeneratorName;
use crate::selector::{Selector, SelectorError};

/// A visual slot: two generator layers, each run through an effect, combined by a mixer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    pub generator1: GeneratorName,
    pub generator2: GeneratorName,
    pub effect1: EffectName,
    pub effect2: EffectName,
    pub mixer: MixerName,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            generator1: GeneratorName::Plasma,
            generator2: GeneratorName::Passthru,
            effect1: EffectName::Passthru,
            effect2: EffectName::Passthru,
            mixer: MixerName::Passthru,
        }
    }
}

impl Visual {
    pub fn set_generator1_index(&mut self, index: i32) -> Result<(), SelectorError> {
        self.generator1 = GeneratorName::from_index(index)?;
        Ok(())
    }

    pub fn set_generator2_index(&mut self, index: i32) -> Result<(), SelectorError> {
        self.generator2 = GeneratorName::from_index(index)?;
        Ok(())
    }

    pub fn set_effect1_index(&mut self, index: i32) -> Result<(), SelectorError> {
        self.effect1 = EffectName::from_index(index)?;
        Ok(())
    }

    pub fn set_effect2_index(&mut self, index: i32) -> Result<(), SelectorError> {
        self.effect2 = EffectName::from_index(index)?;
        Ok(())
    }

    pub fn set_mixer_index(&mut self, index: i32) -> Result<(), SelectorError> {
        self.mixer = MixerName::from_index(index)?;
        Ok(())
    }

    /// Pick a random generator, effect and mixer for every layer
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generator1 = pick(rng);
        self.generator2 = pick(rng);
        self.effect1 = pick(rng);
        self.effect2 = pick(rng);
        self.mixer = pick(rng);
    }
}

fn pick<T: Selector, R: Rng + ?Sized>(rng: &mut R) -> T {
    T::all()[rng.random_range(0..T::count())]
}
