use super::models::BookConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> BookConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return BookConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            BookConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<BookConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &BookConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").expect("empty config parses");
        assert_eq!(cfg, BookConfig::default());
        assert_eq!(cfg.page_flip_duration_ms, 1000);
        assert!(cfg.page_buttons);
        assert_eq!(cfg.flick_speed_factor, 0.5);
        assert_eq!(cfg.initial_page(), -1);
    }

    #[test]
    fn tables_map_onto_flat_settings() {
        let cfg = parse_config(
            r#"
            [book]
            wrap_around = true
            page_flip_duration_ms = 600

            [covers]
            start_page_image = "covers/front.jpg"

            [input]
            page_buttons = false
            book_width = 1200.0

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("valid config");
        assert!(cfg.wrap_around);
        assert_eq!(cfg.page_flip_duration().as_millis(), 600);
        assert_eq!(cfg.start_page_image.as_deref(), Some("covers/front.jpg"));
        assert_eq!(cfg.end_page_image, None);
        assert!(!cfg.page_buttons);
        assert_eq!(cfg.book_width, Some(1200.0));
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert_eq!(cfg.initial_page(), 0, "wrapping books open on image 0");
    }

    #[test]
    fn settings_are_only_read_from_their_tables() {
        let cfg = parse_config("wrap_around = true\nflick_speed_factor = 2.0\n")
            .expect("stray top-level keys are ignored");
        assert_eq!(cfg, BookConfig::default());

        let cfg = parse_config("[input]\nflick_speed_factor = 2.0\n").expect("valid config");
        assert_eq!(cfg.flick_speed_factor, 2.0);
        assert_eq!(cfg.page_flip_duration_ms, 1000);
    }

    #[test]
    fn explicit_start_page_wins() {
        let cfg = parse_config("[book]\nstart_page = 3\n").expect("valid config");
        assert_eq!(cfg.initial_page(), 3);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(parse_config("[logging]\nlog_level = \"loud\"\n").is_err());
        assert!(parse_config("[book]\npage_flip_duration_ms = \"slow\"\n").is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let cfg = BookConfig {
            wrap_around: true,
            start_page: Some(2),
            end_page_image: Some("back.png".to_string()),
            log_level: LogLevel::Trace,
            ..BookConfig::default()
        };
        let text = serialize_config(&cfg).expect("serializes");
        assert!(text.contains("[book]"));
        assert_eq!(parse_config(&text).expect("parses"), cfg);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(cfg, BookConfig::default());
    }

    #[test]
    fn log_level_labels_match_filter_strings() {
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }
}
