pub mod fader;
pub mod output_mapping;
