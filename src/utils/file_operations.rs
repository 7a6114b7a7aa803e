use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename for the `index`-th selected wallpaper.
/// Pure function
pub fn wallpaper_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("reddit-{index}"))
}

/// Create the output directory when it is missing. Single level only: a
/// missing parent is an error, matching `fs::create_dir`.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir(path)
        .with_context(|| format!("Failed to create output directory {}", path.display()))
}

/// Copy a selected image into the output directory, overwriting any previous
/// wallpaper with the same index.
pub fn copy_wallpaper(source: &Path, output_dir: &Path, index: usize) -> Result<PathBuf> {
    let destination = wallpaper_path(output_dir, index);
    fs::copy(source, &destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })?;
    Ok(destination)
}
