use std::path::Path;
use tempfile::NamedTempFile;

/// A downloaded image together with its decoded pixel dimensions.
///
/// Owns its backing temp file: dropping the candidate removes the file, so a
/// skipped candidate cleans up immediately while a kept one stays on disk
/// until the caller has finished copying it.
#[derive(Debug)]
pub struct Candidate {
    pub url: String,
    pub width: u32,
    pub height: u32,
    file: NamedTempFile,
}

impl Candidate {
    pub fn new(url: String, file: NamedTempFile, width: u32, height: u32) -> Self {
        Self {
            url,
            width,
            height,
            file,
        }
    }

    /// Path of the backing temp file, valid for the lifetime of the candidate.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Both dimensions must reach the minimum; a wide-but-short image fails.
    pub fn meets_minimum(&self, min_width: u32, min_height: u32) -> bool {
        self.width >= min_width && self.height >= min_height
    }
}
