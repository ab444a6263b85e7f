//! HTTP fetch collaborator with retry, backoff, and politeness delay.
//!
//! The extraction core never talks to the network itself; it takes a
//! [`Page`] and returns data. This module owns the request side: a shared
//! `reqwest` client, a default client-identifier header, per-request
//! politeness delay, and retry with exponential backoff and jitter for
//! transient failures.
//!
//! # Retry Strategy
//!
//! - Transport errors and the status codes in [`RETRY_STATUSES`] are retried
//!   up to `max_retries` times
//! - Delay doubles per attempt from `base_delay`, capped at `max_delay`
//! - Random jitter (0-250ms) added to prevent thundering herd

use std::time::Duration;

use rand::{Rng, rng};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::page::Page;

/// Status codes worth retrying: server hiccups, timeouts, rate limiting,
/// and the portal's interstitial 403.
pub const RETRY_STATUSES: &[u16] = &[500, 502, 503, 504, 522, 524, 408, 429, 403];

/// Knobs for the fetch collaborator. `Default` matches the crawl profile
/// the portal tolerates: identified client, one-second politeness delay,
/// ten requests in flight.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Client identifier sent as `User-Agent` when the caller supplies none.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry attempts after the first try.
    pub max_retries: usize,
    /// Initial backoff delay; doubles per attempt.
    pub base_delay: Duration,
    /// Backoff cap.
    pub max_delay: Duration,
    /// Politeness pause before every request.
    pub download_delay: Duration,
    /// Upper bound on concurrently in-flight article fetches.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Spider for Naver News".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            download_delay: Duration::from_secs(1),
            concurrency: 10,
        }
    }
}

/// Turns URLs into [`Page`]s.
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
    default_agent: HeaderValue,
}

impl Fetcher {
    /// Build a fetcher from a [`FetchConfig`].
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Network`] when the HTTP client cannot be constructed,
    /// [`ScrapeError::Format`] when the configured user agent is not a
    /// valid header value.
    pub fn new(config: FetchConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let default_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ScrapeError::Format(format!("user agent {:?}: {e}", config.user_agent))
        })?;
        Ok(Self {
            client,
            config,
            default_agent,
        })
    }

    /// The configured concurrency bound, for the crawl driver's stream.
    pub fn concurrency(&self) -> usize {
        self.config.concurrency
    }

    /// Fetch a URL with default headers.
    pub async fn fetch(&self, url: &str) -> Result<Page, ScrapeError> {
        self.fetch_with_headers(url, HeaderMap::new()).await
    }

    /// Fetch a URL, retrying transient failures, and parse the body.
    ///
    /// A `User-Agent` is inserted when `headers` does not carry one.
    #[instrument(level = "debug", skip_all, fields(%url))]
    pub async fn fetch_with_headers(
        &self,
        url: &str,
        mut headers: HeaderMap,
    ) -> Result<Page, ScrapeError> {
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, self.default_agent.clone());
        }

        let mut attempt = 0usize;
        loop {
            attempt += 1;
            if !self.config.download_delay.is_zero() {
                sleep(self.config.download_delay).await;
            }

            let sent = self
                .client
                .get(url)
                .headers(headers.clone())
                .send()
                .await;

            match sent {
                Ok(response) => {
                    let status = response.status();
                    let retryable = RETRY_STATUSES.contains(&status.as_u16());
                    match response.error_for_status() {
                        Ok(response) => {
                            let resolved: Url = response.url().clone();
                            let body = response.text().await?;
                            debug!(status = %status, bytes = body.len(), "Fetched page");
                            return Ok(Page::from_html(resolved, body));
                        }
                        Err(e) if retryable && attempt <= self.config.max_retries => {
                            warn!(attempt, status = %status, error = %e, "Retryable status; backing off");
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Err(e) if attempt <= self.config.max_retries => {
                    warn!(attempt, error = %e, "Transport error; backing off");
                }
                Err(e) => return Err(e.into()),
            }

            let backoff = self
                .config
                .base_delay
                .saturating_mul(2u32.saturating_pow((attempt - 1) as u32))
                .min(self.config.max_delay);
            let jitter = Duration::from_millis(rng().random_range(0..250));
            sleep(backoff + jitter).await;
        }
    }
}
