use thiserror::Error;

use crate::generator::loaders::GeneratorError;
use crate::selector::SelectorError;

/// Why a command was ignored
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing argument {index}")]
    MissingArgument { index: usize },

    #[error("argument {index} is not an integer: {value:?}")]
    InvalidInteger { index: usize, value: String },

    #[error(transparent)]
    UnknownSelector(#[from] SelectorError),

    #[error("no visual with index {0}")]
    UnknownVisual(i32),

    #[error("no {kind} slot at index {index}")]
    MissingSlot { kind: &'static str, index: usize },

    #[error("registry entry is not a {expected}")]
    KindMismatch { expected: &'static str },

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("failed to persist presets: {0:#}")]
    Persistence(anyhow::Error),
}
