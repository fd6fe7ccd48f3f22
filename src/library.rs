//! Image directory discovery.
//!
//! Every jpg/jpeg/png/webp file in the directory becomes one spread, in
//! file name order. Dimensions are probed from the file headers; an image
//! that cannot be probed is kept without them.

use anyhow::{Context, Result, anyhow};
use photobook_core::{BookConfig, ImageRef, ImageSequence};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn probe(path: &Path) -> ImageRef {
    let image = ImageRef::new(path.display().to_string());
    match image::image_dimensions(path) {
        Ok((width, height)) => {
            debug!(path = %path.display(), width, height, "Probed image");
            image.with_dimensions(width, height)
        }
        Err(err) => {
            warn!(path = %path.display(), "Could not read image dimensions: {err}");
            image
        }
    }
}

pub fn discover_images(dir: &Path) -> Result<Vec<ImageRef>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths.iter().map(|path| probe(path)).collect())
}

/// Images of `dir` plus the configured cover art.
pub fn load_sequence(dir: &Path, config: &BookConfig) -> Result<ImageSequence> {
    let images = discover_images(dir)?;
    info!(dir = %dir.display(), count = images.len(), "Discovered images");
    let front = config
        .start_page_image
        .as_deref()
        .map(|path| probe(Path::new(path)));
    let back = config
        .end_page_image
        .as_deref()
        .map(|path| probe(Path::new(path)));
    Ok(ImageSequence::new(images).with_covers(front, back))
}

/// Pointer coordinate width of the open book: the first image's width,
/// otherwise the configured width.
pub fn book_width(images: &ImageSequence, config: &BookConfig) -> Result<f64> {
    images
        .iter()
        .next()
        .and_then(|image| image.width)
        .map(f64::from)
        .or(config.book_width)
        .filter(|width| *width > 0.0)
        .ok_or_else(|| anyhow!("Cannot determine the book width; set input.book_width"))
}
