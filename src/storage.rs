// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for exported strips

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default export directory: `~/Pictures/photobooth`
///
/// Falls back to `./photobooth` when no pictures directory is known.
pub fn default_export_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photobooth")
}

/// Save an encoded strip under a timestamped name
///
/// Creates the directory if needed and returns the written path.
pub async fn save_export(bytes: &[u8], dir: &Path) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let filename = format!("booth_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);

    tokio::fs::write(&path, bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Export saved");
    Ok(path)
}
