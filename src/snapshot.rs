//! PNG export of a rendered frame.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::info;
use twod_canvas::render::{Framebuffer, Surface};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("framebuffer {width}x{height} does not match its pixel data")]
    Size { width: u32, height: u32 },
    #[error("could not write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Write `frame` to `path` as a PNG.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the image cannot be encoded or written.
pub fn save_png(frame: &Framebuffer, path: &Path) -> Result<(), SnapshotError> {
    let (width, height) = frame.size();
    let image = RgbaImage::from_raw(width, height, frame.to_rgba_bytes()).ok_or(SnapshotError::Size { width, height })?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| SnapshotError::Write { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), width, height, "snapshot written");
    Ok(())
}
