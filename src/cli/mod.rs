mod config;
pub use self::config::{Config, DEFAULT_PROFILE};

pub mod actions;

mod start;
pub use self::start::{Program, setup, start};

mod commands;
mod dispatch;
