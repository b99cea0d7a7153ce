pub mod effect;
