pub mod catalog;
pub mod constants;
pub mod content;
pub mod ranking;
pub mod shared_wheel_game;
