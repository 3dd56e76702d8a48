pub mod config;
pub mod food;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod snake_game;
pub mod snake_player;
