use super::defaults;
use super::models::{BookConfig, LogLevel};
use serde::Deserialize;

/// On-disk layout of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    book: BookTable,
    #[serde(default)]
    covers: CoversTable,
    #[serde(default)]
    input: InputTable,
    #[serde(default)]
    logging: LoggingTable,
}

impl From<ConfigTables> for BookConfig {
    fn from(tables: ConfigTables) -> Self {
        BookConfig {
            wrap_around: tables.book.wrap_around,
            page_flip_duration_ms: tables.book.page_flip_duration_ms,
            start_page: tables.book.start_page,
            start_page_image: tables.covers.start_page_image,
            end_page_image: tables.covers.end_page_image,
            page_buttons: tables.input.page_buttons,
            flick_speed_factor: tables.input.flick_speed_factor,
            book_width: tables.input.book_width,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&BookConfig> for ConfigTables {
    fn from(config: &BookConfig) -> Self {
        ConfigTables {
            book: BookTable {
                wrap_around: config.wrap_around,
                page_flip_duration_ms: config.page_flip_duration_ms,
                start_page: config.start_page,
            },
            covers: CoversTable {
                start_page_image: config.start_page_image.clone(),
                end_page_image: config.end_page_image.clone(),
            },
            input: InputTable {
                page_buttons: config.page_buttons,
                flick_speed_factor: config.flick_speed_factor,
                book_width: config.book_width,
            },
            logging: LoggingTable {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct BookTable {
    #[serde(default = "defaults::default_wrap_around")]
    wrap_around: bool,
    #[serde(default = "defaults::default_page_flip_duration_ms")]
    page_flip_duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_page: Option<i64>,
}

impl Default for BookTable {
    fn default() -> Self {
        BookTable {
            wrap_around: defaults::default_wrap_around(),
            page_flip_duration_ms: defaults::default_page_flip_duration_ms(),
            start_page: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct CoversTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_page_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_page_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct InputTable {
    #[serde(default = "defaults::default_page_buttons")]
    page_buttons: bool,
    #[serde(default = "defaults::default_flick_speed_factor")]
    flick_speed_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    book_width: Option<f64>,
}

impl Default for InputTable {
    fn default() -> Self {
        InputTable {
            page_buttons: defaults::default_page_buttons(),
            flick_speed_factor: defaults::default_flick_speed_factor(),
            book_width: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingTable {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingTable {
    fn default() -> Self {
        LoggingTable {
            log_level: defaults::default_log_level(),
        }
    }
}
