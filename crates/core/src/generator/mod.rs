pub mod generator;
pub mod loaders;
