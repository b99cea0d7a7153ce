pub mod mixer;
pub mod visual;
