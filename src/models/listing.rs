use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while decoding listing responses.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("unknown time period '{0}', expected one of hour, day, week, month, year")]
    UnknownPeriod(String),
    #[error("listing response is not in the expected shape: {0}")]
    Malformed(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Time window for the top listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    #[default]
    All,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimePeriod {
    /// Value for the listing `t` query parameter. `None` means no window,
    /// which the remote treats as all-time.
    pub fn as_query_param(&self) -> Option<&'static str> {
        match self {
            TimePeriod::All => None,
            TimePeriod::Hour => Some("hour"),
            TimePeriod::Day => Some("day"),
            TimePeriod::Week => Some("week"),
            TimePeriod::Month => Some("month"),
            TimePeriod::Year => Some("year"),
        }
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(TimePeriod::All),
            "hour" => Ok(TimePeriod::Hour),
            "day" => Ok(TimePeriod::Day),
            "week" => Ok(TimePeriod::Week),
            "month" => Ok(TimePeriod::Month),
            "year" => Ok(TimePeriod::Year),
            other => Err(ListingError::UnknownPeriod(other.to_string())),
        }
    }
}

/// One submission from a subreddit listing. Read-only input to the pipeline;
/// only `url` drives selection, the rest feeds log output.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_utc: f64,
}

impl Post {
    /// Submission time as UTC. The listing carries it as a float epoch.
    pub fn created(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created_utc as i64, 0).unwrap_or_default()
    }
}

/// Listing envelope: `{"kind": "Listing", "data": {"children": [{"data": {...}}]}}`.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Post,
}

/// Unwrap the posts out of a listing envelope.
pub fn parse_listing(value: serde_json::Value) -> Result<Vec<Post>, ListingError> {
    let listing: Listing = serde_json::from_value(value)?;
    Ok(listing.data.children.into_iter().map(|t| t.data).collect())
}

/// The random endpoint answers with `[post listing, comment listing]` after
/// its redirect; some error shapes come back as a bare object instead.
pub fn parse_random_response(value: serde_json::Value) -> Result<Post, ListingError> {
    let first = match value {
        serde_json::Value::Array(mut parts) if !parts.is_empty() => parts.remove(0),
        object @ serde_json::Value::Object(_) => object,
        _ => return Err(ListingError::Malformed("expected a listing object or array")),
    };

    parse_listing(first)?
        .into_iter()
        .next()
        .ok_or(ListingError::Malformed("random listing contains no posts"))
}
