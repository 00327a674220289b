// Engine-side modules: assets, timing, input, physics

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
