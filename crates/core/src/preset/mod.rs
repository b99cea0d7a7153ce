pub mod preset;
pub mod preset_library;
