use thiserror::Error;

/// Fatal errors of the weather pipeline.
///
/// Every variant ends the run: the message is printed once and no menu is
/// produced.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Unsupported format {0} specified.")]
    UnsupportedFormat(String),

    #[error("Couldn't retrieve {url}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unsupported or corrupt feed data")]
    CorruptFeed,

    #[error("Configuration error: {0:#}")]
    Config(anyhow::Error),
}
