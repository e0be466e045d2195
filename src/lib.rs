pub mod app_dirs;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod placement;
pub mod round;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::{GameError, Result};
