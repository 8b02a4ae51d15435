pub mod config;
pub mod hazard;
pub mod snake_game;
