use reqwest::Client;

use crate::{cache::CacheGate, error::FeedError};

pub const USER_AGENT: &str = concat!("yweather/", env!("CARGO_PKG_VERSION"));

/// Single-shot HTTP retrieval of one feed URL.
#[derive(Debug, Clone)]
pub struct Fetcher {
    url: String,
    http: Client,
}

impl Fetcher {
    pub fn new(url: String) -> Result<Self, FeedError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FeedError::Retrieval {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, http })
    }

    /// GET the feed and return the body. A transport error or non-success
    /// status fails the run; there is no retry.
    pub async fn get(&self) -> Result<Vec<u8>, FeedError> {
        let retrieval = |source: reqwest::Error| FeedError::Retrieval {
            url: self.url.clone(),
            source,
        };

        tracing::info!(url = %self.url, "fetching feed");
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(retrieval)?;
        let body = res.bytes().await.map_err(retrieval)?;
        Ok(body.to_vec())
    }

    /// Fetch the feed and overwrite the cache entry with the response.
    pub async fn fetch_into(&self, cache: &CacheGate) -> Result<Vec<u8>, FeedError> {
        let body = self.get().await?;
        cache.store(&body);
        Ok(body)
    }
}
