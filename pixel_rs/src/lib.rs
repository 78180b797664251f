//! Headless simulation built on top of `pixel_ecs`.

pub use game::Game;

pub mod components;
pub mod config;
pub mod game;
pub mod logger;
pub mod systems;
