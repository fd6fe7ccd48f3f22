use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Book behaviour and host settings, flattened from the TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    /// Treat the last image as adjacent to the first; there are no covers.
    pub wrap_around: bool,
    /// Duration of a full, unhurried turn.
    pub page_flip_duration_ms: u64,
    /// Initial cursor position; see [`BookConfig::initial_page`].
    pub start_page: Option<i64>,
    /// Front cover art.
    pub start_page_image: Option<String>,
    /// Back cover art.
    pub end_page_image: Option<String>,
    /// Whether pointer drags may turn pages.
    pub page_buttons: bool,
    pub flick_speed_factor: f64,
    /// Pointer coordinate width of the open book, for hosts that cannot
    /// measure it from the first image.
    pub book_width: Option<f64>,
    pub log_level: LogLevel,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            wrap_around: crate::config::defaults::default_wrap_around(),
            page_flip_duration_ms: crate::config::defaults::default_page_flip_duration_ms(),
            start_page: None,
            start_page_image: None,
            end_page_image: None,
            page_buttons: crate::config::defaults::default_page_buttons(),
            flick_speed_factor: crate::config::defaults::default_flick_speed_factor(),
            book_width: None,
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl BookConfig {
    pub fn page_flip_duration(&self) -> Duration {
        Duration::from_millis(self.page_flip_duration_ms)
    }

    /// Starting cursor position: the configured page, or the closed front
    /// cover (`-1`) unless the book wraps around, which starts on image 0.
    pub fn initial_page(&self) -> i64 {
        match self.start_page {
            Some(page) => page,
            None if self.wrap_around => 0,
            None => -1,
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
