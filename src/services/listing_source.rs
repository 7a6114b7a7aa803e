use crate::client::RedditClient;
use crate::models::{Post, TimePeriod};
use anyhow::Result;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Cooperative cancellation flag shared between the signal handler and the
/// random retry loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Arm the token from Ctrl-C. Installing the handler replaces the default
    /// SIGINT termination, so only callers that actually consult the token
    /// (the random retry loop) should call this.
    pub fn cancel_on_ctrl_c(&self) {
        let cancel = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }
}

/// Uniqueness token range for random listing requests.
const UNIQUE_TOKEN_MAX: u32 = 99_999;

/// Lazy sequence of listing items. Restartable only by reconstruction.
pub enum ListingSource<'a> {
    /// Finite: one fetched page of top posts.
    Top(std::vec::IntoIter<Post>),
    /// Infinite: one random post per pull, retrying on error until cancelled.
    Random {
        client: &'a RedditClient,
        subreddits: String,
        cancel: CancelToken,
    },
}

impl<'a> ListingSource<'a> {
    /// Top listing for the combined subreddit set, optionally time-windowed.
    pub async fn top(
        client: &RedditClient,
        subreddits: &str,
        period: TimePeriod,
    ) -> Result<ListingSource<'static>> {
        let posts = client.top_listing(subreddits, period).await?;
        Ok(ListingSource::Top(posts.into_iter()))
    }

    /// Source over an already-known set of posts.
    pub fn from_posts(posts: Vec<Post>) -> ListingSource<'static> {
        ListingSource::Top(posts.into_iter())
    }

    pub fn random(client: &'a RedditClient, subreddits: String, cancel: CancelToken) -> Self {
        ListingSource::Random {
            client,
            subreddits,
            cancel,
        }
    }

    /// Next listing item. `Ok(None)` when a finite source is exhausted or the
    /// random source is cancelled.
    pub async fn next(&mut self) -> Result<Option<Post>> {
        match self {
            ListingSource::Top(posts) => Ok(posts.next()),
            ListingSource::Random {
                client,
                subreddits,
                cancel,
            } => {
                // Retries forever with no backoff and no attempt limit; a
                // cancellation signal is the only exit.
                loop {
                    if cancel.is_cancelled() {
                        info!("Cancelled, stopping random listing");
                        return Ok(None);
                    }
                    let unique = rand::thread_rng().gen_range(0..=UNIQUE_TOKEN_MAX);
                    match client.random_post(subreddits, unique).await {
                        Ok(post) => return Ok(Some(post)),
                        Err(e) => {
                            debug!("Cannot load random submission, trying again: {:#}", e)
                        }
                    }
                }
            }
        }
    }
}
