//! HTTP client for directions pages.
//!
//! Requests the public directions page for a pair of coordinates and
//! returns its body as text. Transient failures are retried with an
//! exponential backoff.

use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::domain::LatLon;

use super::PageFetcher;
use super::error::FetchError;

/// Default base URL for directions pages.
const DEFAULT_BASE_URL: &str = "https://www.google.com/maps/dir";

/// Default maximum number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

const DEFAULT_USER_AGENT: &str = concat!("drivetime/", env!("CARGO_PKG_VERSION"));

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL; coordinates are appended as path segments
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry, in seconds; doubles after each retry
    pub retry_delay_secs: u64,
}

impl FetchConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: 2,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry count and the initial retry delay.
    pub fn with_retries(mut self, max_retries: u32, delay_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_secs = delay_secs;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for directions pages.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl MapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// URL of the directions page between two points.
    pub fn directions_url(&self, origin: LatLon, destination: LatLon) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            super::directions_path(origin, destination)
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            && !is_textual(content_type)
        {
            return Err(FetchError::NotText {
                content_type: content_type.to_string(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    fn backoff(&self) -> ExponentialBackoff {
        let initial = Duration::from_secs(self.config.retry_delay_secs);
        ExponentialBackoff {
            current_interval: initial,
            initial_interval: initial,
            max_interval: initial * 32,
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

impl PageFetcher for MapsClient {
    async fn fetch(&self, origin: LatLon, destination: LatLon) -> Result<String, FetchError> {
        let url = self.directions_url(origin, destination);
        let mut backoff = self.backoff();
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(body) => {
                    debug!(%url, bytes = body.len(), "fetched directions page");
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = backoff
                        .next_backoff()
                        .unwrap_or(Duration::from_secs(self.config.retry_delay_secs));
                    warn!(%url, attempt, ?delay, error = %e, "fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Content types that can be scanned as text.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime.ends_with("json") || mime.ends_with("javascript")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 2);
        assert!(config.user_agent.starts_with("drivetime/"));
    }

    #[test]
    fn config_builders() {
        let config = FetchConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .with_retries(0, 1);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_delay_secs, 1);
    }

    #[test]
    fn directions_url_has_both_coordinates() {
        let client = MapsClient::new(FetchConfig::new().with_base_url("https://maps.test/dir/"))
            .unwrap();
        let url = client.directions_url(
            LatLon::new(37.403, -121.97),
            LatLon::new(37.4419, -122.143),
        );
        assert_eq!(url, "https://maps.test/dir/37.403,-121.97/37.4419,-122.143");
    }

    #[test]
    fn textual_content_types() {
        assert!(is_textual("text/html; charset=UTF-8"));
        assert!(is_textual("application/json"));
        assert!(is_textual("application/javascript"));
        assert!(!is_textual("image/png"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let config = FetchConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2)
            .with_retries(0, 0);
        let client = MapsClient::new(config).unwrap();

        let result = client
            .fetch(LatLon::new(1.0, 2.0), LatLon::new(3.0, 4.0))
            .await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }
}
