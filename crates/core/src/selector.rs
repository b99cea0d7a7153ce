use thiserror::Error;

/// Index handed in by the control surface that doesn't name a registry entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {kind} with index {index}")]
pub struct SelectorError {
    pub kind: &'static str,
    pub index: i32,
}

/// Closed set of registry entries addressed by their position.
///
/// The control surface only ever talks in integer indices, so every
/// registry (generators, effects, mixers, faders) maps its variants onto
/// `0..all().len()` in declaration order.
pub trait Selector: Copy + Sized + 'static {
    /// Human readable registry name used in errors
    const KIND: &'static str;

    fn all() -> &'static [Self];

    fn index(self) -> usize;

    fn from_index(index: i32) -> Result<Self, SelectorError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::all().get(i).copied())
            .ok_or(SelectorError {
                kind: Self::KIND,
                index,
            })
    }

    fn count() -> usize {
        Self::all().len()
    }
}
