use rand::Rng;

use crate::engine::EngineState;

/// Re-roll generators, effects and mixer of every visual whose shuffler flag is set.
/// Returns the number of visuals touched
pub fn manual_shuffle<R: Rng + ?Sized>(state: &mut EngineState, rng: &mut R) -> usize {
    let mut shuffled = 0;
    for index in 0..state.visual_count() {
        if !state.shuffler_select().get(index).copied().unwrap_or(false) {
            continue;
        }
        if let Some(visual) = state.visual_mut(index) {
            visual.randomize(rng);
            shuffled += 1;
        }
    }

    log::debug!("Shuffled {} visuals", shuffled);
    shuffled
}
