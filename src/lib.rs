pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod render;

pub mod app;
pub mod config;
pub mod game_loop;
pub mod resource_path;
pub mod storage;

pub use error::{Error, Result};
