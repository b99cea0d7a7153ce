mod args;
mod dispatcher;
mod error;

pub use args::{clamp_channel, tokenize};
pub use dispatcher::{apply_status, process_message, Dispatcher};
pub use error::DispatchError;
