use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Transition styles between two visuals on one output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaderKind {
    Switch,
    Crossfading,
    SlideUpsideDown,
    SlideLeftRight,
}

impl Selector for FaderKind {
    const KIND: &'static str = "fader";

    fn all() -> &'static [Self] {
        &[
            FaderKind::Switch,
            FaderKind::Crossfading,
            FaderKind::SlideUpsideDown,
            FaderKind::SlideLeftRight,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaderState {
    Idle,
    Running {
        target_visual: usize,
        mapping: usize,
        elapsed: Duration,
    },
}

/// Emitted by `Fader::advance` once the transition is over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeComplete {
    pub target_visual: usize,
    pub mapping: usize,
}

/// One-shot transition of an output to a new visual.
///
/// A running fader can't be restarted; the owner of the output mapping
/// applies the new input once `advance` reports completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fader {
    kind: FaderKind,
    duration: Duration,
    state: FaderState,
}

impl Fader {
    /// `Switch` ignores `fade_time` and completes on the next advance
    pub fn new(kind: FaderKind, fade_time: Duration) -> Self {
        let duration = match kind {
            FaderKind::Switch => Duration::ZERO,
            _ => fade_time,
        };

        Self {
            kind,
            duration,
            state: FaderState::Idle,
        }
    }

    pub fn kind(&self) -> FaderKind {
        self.kind
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> FaderState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, FaderState::Running { .. })
    }

    /// Begin fading `mapping` over to `target_visual`. Returns false if a fade is already running
    pub fn start(&mut self, target_visual: usize, mapping: usize) -> bool {
        if self.is_running() {
            return false;
        }

        self.state = FaderState::Running {
            target_visual,
            mapping,
            elapsed: Duration::ZERO,
        };
        true
    }

    /// Visual the running fade is heading to
    pub fn target(&self) -> Option<usize> {
        match self.state {
            FaderState::Running { target_visual, .. } => Some(target_visual),
            FaderState::Idle => None,
        }
    }

    /// 0.0 when idle or just started, 1.0 when done
    pub fn progress(&self) -> f32 {
        match self.state {
            FaderState::Idle => 0.0,
            FaderState::Running { elapsed, .. } => {
                if self.duration.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
                }
            }
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Option<FadeComplete> {
        let FaderState::Running {
            target_visual,
            mapping,
            elapsed,
        } = self.state
        else {
            return None;
        };

        let elapsed = elapsed + dt;
        if elapsed >= self.duration {
            self.state = FaderState::Idle;
            Some(FadeComplete {
                target_visual,
                mapping,
            })
        } else {
            self.state = FaderState::Running {
                target_visual,
                mapping,
                elapsed,
            };
            None
        }
    }
}
