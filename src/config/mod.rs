//! Configuration loading for the portfolio viewer.
//!
//! Settings live in `conf/config.toml` when present. Missing or invalid
//! entries fall back to defaults so the window still opens.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LogLevel, ThemeMode};
