pub mod board;
pub mod snake_game_screen;
pub mod snake_mediator;
