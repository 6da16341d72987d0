//! HTTP client for fetching product pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Fetches product page HTML with a fixed timeout and a browser-like header set.
///
/// Redirects are followed. Any final 4xx/5xx status is a
/// [`ScraperError::UnexpectedStatus`]; there are no retries.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_timeout(Duration::from_secs(timeout_secs), user_agent)
    }

    /// Like [`PageClient::new`] with a sub-second timeout resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for a 4xx or 5xx response.
    /// - [`ScraperError::Http`] for invalid URLs, transport failures and timeouts.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,*/*;q=0.8",
            )
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
