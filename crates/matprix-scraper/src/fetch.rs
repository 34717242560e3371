//! Rate-limited page fetching.
//!
//! One [`PageFetcher`] is shared by every category crawl of a run. Each
//! `fetch` sleeps a uniform random duration inside the configured jitter
//! interval before issuing the request — politeness towards the target
//! host, not a correctness requirement, and skippable with a zero interval
//! so tests run instantly.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;

use matprix_core::ScrapingParams;

use crate::error::ScraperError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// HTTP fetcher with politeness delay and explicit failure classification.
///
/// `fetch` returns the raw body for 2xx responses and a typed
/// [`ScraperError`] for everything else. Retry policy, if any, belongs to
/// the caller; here there is none.
pub struct PageFetcher {
    client: Client,
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with configured timeouts and a browser-like
    /// request profile suited to French retail storefronts.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(params: &ScrapingParams) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(BROWSER_UA)
            .build()?;
        Ok(Self {
            client,
            delay_min_ms: params.delay_min_ms,
            delay_max_ms: params.delay_max_ms,
        })
    }

    /// Fetches one page, returning its body text.
    ///
    /// Suspends for the politeness delay first. Never panics: transport
    /// failures and non-2xx statuses both come back as `Err`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScraperError::Http`] — network failure or timeout.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.politeness_delay().await;

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    async fn politeness_delay(&self) {
        if self.delay_max_ms == 0 {
            return;
        }
        // Guard against an inverted interval: `random_range` panics on an
        // empty range, and callers are not required to normalize first.
        let min = self.delay_min_ms.min(self.delay_max_ms);
        // The rng handle is not Send; draw the delay before suspending.
        let delay_ms = rand::rng().random_range(min..=self.delay_max_ms);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}
