use crate::models::{parse_listing, parse_random_response, Post, TimePeriod};
use crate::services::ImageFetcher;
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of the top listing; no pagination beyond it.
const LISTING_LIMIT: u32 = 100;

/// Client for the reddit listing API and for downloading image URLs.
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("rotate-wallpaper/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Top posts for the combined subreddit set (`a+b+c`), single page.
    pub async fn top_listing(&self, subreddits: &str, period: TimePeriod) -> Result<Vec<Post>> {
        let url = format!("{}/r/{}/top.json", self.base_url, subreddits);
        let mut request = self
            .http
            .get(&url)
            .query(&[("limit", LISTING_LIMIT.to_string())]);
        if let Some(t) = period.as_query_param() {
            request = request.query(&[("t", t)]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch top listing from {url}"))?;
        if !response.status().is_success() {
            anyhow::bail!("Listing request to {} returned {}", url, response.status());
        }

        let value = response
            .json()
            .await
            .context("Failed to read top listing body")?;
        let posts = parse_listing(value).context("Failed to parse top listing")?;
        debug!("Top listing for {} returned {} posts", subreddits, posts.len());
        Ok(posts)
    }

    /// One random post from the combined subreddit set. `unique` defeats
    /// caching between otherwise identical requests.
    pub async fn random_post(&self, subreddits: &str, unique: u32) -> Result<Post> {
        let url = format!("{}/r/{}/random.json", self.base_url, subreddits);
        let response = self
            .http
            .get(&url)
            .query(&[("unique", unique.to_string())])
            .send()
            .await
            .with_context(|| format!("Failed to fetch random post from {url}"))?;
        if !response.status().is_success() {
            anyhow::bail!("Random request to {} returned {}", url, response.status());
        }

        let value = response
            .json()
            .await
            .context("Failed to read random listing body")?;
        let post = parse_random_response(value).context("Failed to parse random listing")?;
        debug!("Random pick from {}: {}", subreddits, post.url);
        Ok(post)
    }
}

impl ImageFetcher for RedditClient {
    /// Download an image URL into a fresh temp file.
    async fn fetch_to_temp(&self, url: &str) -> Result<NamedTempFile> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {url}"))?;
        if !response.status().is_success() {
            anyhow::bail!("Download of {} returned {}", url, response.status());
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {url}"))?;

        let mut file = NamedTempFile::new().context("Failed to create temp file")?;
        file.write_all(&bytes)
            .context("Failed to write downloaded image to temp file")?;
        Ok(file)
    }
}
