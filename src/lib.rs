//! yweather
//!
//! Fetches the current weather and forecast for a location, caches the raw
//! response on disk, and renders it as an Openbox pipe menu.
//!
//! The pipeline is linear: resolve the [`Config`], consult the
//! [`CacheGate`], fetch on a miss, parse with the [`feed`] parser for the
//! configured format, extract a [`WeatherSnapshot`] and [`menu::render`] it.
//! The binary crate calls [`run`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod menu;
pub mod snapshot;

pub use cache::CacheGate;
pub use config::{Config, ResponseFormat, UnitSystem};
pub use error::FeedError;
pub use feed::{Element, Scope, WeatherFeed};
pub use fetch::Fetcher;
pub use snapshot::{ForecastEntry, WeatherSnapshot};

/// Raw feed bytes for `config`, from the cache when fresh, otherwise from
/// the network (which refreshes the cache).
pub async fn retrieve(config: &Config) -> Result<Vec<u8>, FeedError> {
    let cache = CacheGate::for_config(config);
    if let Some(bytes) = cache.read_fresh() {
        return Ok(bytes);
    }
    tracing::debug!(path = %cache.path().display(), "cache miss");
    Fetcher::new(config.request_url())?.fetch_into(&cache).await
}

/// Run the whole pipeline and return the rendered menu.
pub async fn run(config: &Config) -> Result<String, FeedError> {
    let bytes = retrieve(config).await?;
    let feed = feed::parse(config.format, &bytes)?;
    let snapshot = WeatherSnapshot::extract(feed.as_ref());
    Ok(menu::render(&snapshot, config.units, config.header))
}
