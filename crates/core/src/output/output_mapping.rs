use super::fader::Fader;
use crate::effect::effect::EffectName;

/// Binds one physical output to a visual, with an output effect and a fader
#[derive(Clone, Debug, PartialEq)]
pub struct OutputMapping {
    visual: usize,
    pub effect: EffectName,
    fader: Fader,
}

impl OutputMapping {
    pub fn new(visual: usize, fader: Fader) -> Self {
        Self {
            visual,
            effect: EffectName::Passthru,
            fader,
        }
    }

    /// Visual currently feeding this output
    pub fn visual(&self) -> usize {
        self.visual
    }

    pub fn set_visual(&mut self, visual: usize) {
        self.visual = visual;
    }

    pub fn fader(&self) -> &Fader {
        &self.fader
    }

    pub fn fader_mut(&mut self) -> &mut Fader {
        &mut self.fader
    }

    /// Swap in a new fader unless the current one is mid-transition
    pub fn replace_fader(&mut self, fader: Fader) -> bool {
        if self.fader.is_running() {
            return false;
        }
        self.fader = fader;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::output::fader::FaderKind;

    #[test]
    fn test_running_fader_is_not_replaced() {
        let fade = Duration::from_millis(500);
        let mut mapping = OutputMapping::new(0, Fader::new(FaderKind::Crossfading, fade));
        mapping.fader_mut().start(1, 0);

        assert!(!mapping.replace_fader(Fader::new(FaderKind::SlideUpsideDown, fade)));
        assert_eq!(mapping.fader().kind(), FaderKind::Crossfading);
        assert!(mapping.fader().is_running());
    }
}
