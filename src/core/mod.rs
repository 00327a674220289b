// Core helpers shared by every subsystem

pub mod math;
