use crate::models::{Candidate, Post};
use crate::services::listing_source::ListingSource;
use anyhow::Result;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Downloads a URL into a local temp file.
///
/// Seam between the candidate filter and the network, so the filter can be
/// driven entirely from fixtures in tests.
#[allow(async_fn_in_trait)]
pub trait ImageFetcher {
    async fn fetch_to_temp(&self, url: &str) -> Result<NamedTempFile>;
}

/// Guess a MIME type from the URL path extension alone. Never touches the
/// network; query string and fragment are ignored.
pub fn guess_mime_type(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = Path::new(path).extension()?.to_str()?;

    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tiff" | "tif" => Some("image/tiff"),
        "ico" => Some("image/x-icon"),
        "svg" => Some("image/svg+xml"),
        "html" | "htm" => Some("text/html"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Read image dimensions from file content. Temp files carry no extension,
/// so the format has to be sniffed from the bytes, not the path.
fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// Streaming filter over a listing source: sniff the link type, download,
/// decode, and keep only images at least `min_width` x `min_height`.
pub struct CandidateFilter<'a, F> {
    source: ListingSource<'a>,
    fetcher: &'a F,
    min_width: u32,
    min_height: u32,
}

impl<'a, F: ImageFetcher> CandidateFilter<'a, F> {
    pub fn new(
        source: ListingSource<'a>,
        fetcher: &'a F,
        min_width: u32,
        min_height: u32,
    ) -> Self {
        Self {
            source,
            fetcher,
            min_width,
            min_height,
        }
    }

    /// Next candidate passing the type, decode, and size checks.
    ///
    /// Pulls one listing item at a time, so an infinite random source is
    /// fine. `Ok(None)` means the source is exhausted or cancelled.
    pub async fn next(&mut self) -> Result<Option<Candidate>> {
        while let Some(post) = self.source.next().await? {
            if let Some(candidate) = self.probe(post).await? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Evaluate a single listing item. `Ok(None)` is a skip; download errors
    /// propagate to the caller.
    async fn probe(&self, post: Post) -> Result<Option<Candidate>> {
        info!("Loading from url {}", post.url);
        let mime = guess_mime_type(&post.url);
        debug!("URL {} type {:?} posted {}", post.url, mime, post.created());

        // Non-image links are rejected on the sniff alone; nothing is fetched.
        if !mime.is_some_and(|m| m.starts_with("image/")) {
            return Ok(None);
        }

        let file = self.fetcher.fetch_to_temp(&post.url).await?;
        let (width, height) = match probe_dimensions(file.path()) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                debug!("Cannot decode image from {}: {:#}", post.url, e);
                // `file` drops here, removing the temp file.
                return Ok(None);
            }
        };

        let candidate = Candidate::new(post.url, file, width, height);
        if candidate.meets_minimum(self.min_width, self.min_height) {
            info!("Image is big enough @ {}x{}", width, height);
            Ok(Some(candidate))
        } else {
            debug!("Image {} too small @ {}x{}", candidate.url, width, height);
            Ok(None)
        }
    }
}
