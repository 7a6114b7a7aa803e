pub mod candidate;
pub mod listing;

pub use candidate::Candidate;
pub use listing::{parse_listing, parse_random_response, ListingError, Post, TimePeriod};
