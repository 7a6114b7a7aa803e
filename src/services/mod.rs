pub mod filter;
pub mod listing_source;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;

pub use filter::{guess_mime_type, CandidateFilter, ImageFetcher};
pub use listing_source::{CancelToken, ListingSource};
pub use selection::{select_wallpapers, SelectedWallpaper, SelectionConfig, SelectionReport};
