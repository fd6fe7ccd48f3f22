//! Entry point for the headless photo book.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Discover the page images and build the book.
//! - Run the turn script and print JSON records to stdout.

mod driver;
mod library;

use crate::driver::{Driver, parse_script};
use anyhow::{Context, Result, anyhow};
use photobook_core::Book;
use photobook_core::config::load_config;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

struct Args {
    image_dir: PathBuf,
    script: Option<PathBuf>,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        dir = %args.image_dir.display(),
        level = %config.log_level,
        wrap_around = config.wrap_around,
        "Starting photo book"
    );

    let images = library::load_sequence(&args.image_dir, &config)?;
    let width = library::book_width(&images, &config)?;
    let script = read_script(args.script.as_deref())?;
    let commands = parse_script(&script).context("Failed to parse the turn script")?;

    let book = Book::new(images, &config);
    let mut driver = Driver::new(book, width);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver.run(&commands, &mut out)?;
    info!(
        commands = commands.len(),
        current = driver.book().current_image(),
        in_flight = driver.scene().pages.len(),
        "Script finished"
    );
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let image_dir = args
        .next()
        .ok_or_else(|| anyhow!("Usage: photobook <image-dir> [script-file]"))?;
    let image_dir = PathBuf::from(image_dir);
    if !image_dir.is_dir() {
        return Err(anyhow!("Not a directory: {}", image_dir.display()));
    }
    let script = args.next().map(PathBuf::from);
    Ok(Args { image_dir, script })
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
