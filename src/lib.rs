pub mod client;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use client::RedditClient;
pub use models::{Candidate, ListingError, Post, TimePeriod};
pub use services::{
    select_wallpapers, CancelToken, CandidateFilter, ImageFetcher, ListingSource,
    SelectionConfig, SelectionReport,
};
pub use utils::{apply_wallpapers, ensure_output_dir};

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub selection: SelectionConfig,
    pub time_period: TimePeriod,
    pub random: bool,
    pub subreddits: Vec<String>,
    pub verbosity: u8,
}

impl AppConfig {
    /// Combined subreddit set in listing-query form (`a+b+c`).
    pub fn combined_subreddits(&self) -> String {
        self.subreddits.join("+")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            time_period: TimePeriod::All,
            random: false,
            subreddits: Vec::new(),
            verbosity: 0,
        }
    }
}
