use thiserror::Error;

/// Failure classification for a single page fetch.
///
/// The fetcher never panics and never retries; every outcome crosses this
/// boundary as an explicit value. A failed page ends that category's
/// pagination, nothing more.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Transport-level failure: connection refused, TLS error, timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
