// Character movement and ability unlock framework

pub mod core;
pub mod engine;
pub mod game;
