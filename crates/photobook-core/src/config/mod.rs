//! Configuration for the page-turning engine and its host.
//!
//! Settings live in `conf/config.toml`, grouped into `[book]`, `[covers]`,
//! `[input]` and `[logging]` tables. Any missing or invalid entries fall back
//! to defaults so a book can always be opened.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{BookConfig, LogLevel};
