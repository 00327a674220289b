// Gameplay: abilities, movement, characters and their configuration

pub mod abilities;
pub mod characters;
pub mod config;
pub mod movement;
