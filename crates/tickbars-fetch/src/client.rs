//! HTTP client for downloading bi5 files.

use bytes::Bytes;
use rand::Rng;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::url::BASE_URL;

/// Configuration for the download client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum concurrent hour downloads.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total attempts per file, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub base_delay: Duration,
    /// Upper bound of the uniform random jitter added to each delay.
    pub jitter: Duration,
    /// Extra wait added when the server answers 503 or 429.
    pub throttle_penalty: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Feed root the tick URLs are built from.
    pub base_url: String,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout: Duration::from_secs(30),
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            jitter: Duration::from_secs(1),
            throttle_penalty: Duration::from_secs(10),
            max_delay: Duration::from_secs(300),
            base_url: BASE_URL.to_string(),
            user_agent: format!("tickbars/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur during downloads.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server kept answering with an error status.
    #[error("Server error: {status} after {attempts} attempts")]
    ServerError {
        /// HTTP status code of the last response.
        status: u16,
        /// Number of attempts made.
        attempts: u32,
    },
}

/// Outcome of a single failed attempt.
#[derive(Debug)]
enum Failure {
    Status(StatusCode),
    Transport(reqwest::Error),
}

impl Failure {
    fn is_throttled(&self) -> bool {
        matches!(
            self,
            Self::Status(StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS)
        )
    }

    fn into_error(self, attempts: u32) -> DownloadError {
        match self {
            Self::Status(status) => DownloadError::ServerError {
                status: status.as_u16(),
                attempts,
            },
            Self::Transport(e) => DownloadError::Http(e),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(status) => write!(f, "status {status}"),
            Self::Transport(e) => write!(f, "{e}"),
        }
    }
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
    config: ClientConfig,
}

impl DownloadClient {
    /// Creates a new download client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads a single bi5 file, returning the compressed bytes.
    ///
    /// Returns `Ok(None)` if the file does not exist (404), which is how the
    /// feed reports hours without trading. Every other failure is retried
    /// until `max_attempts` is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails after all attempts.
    pub async fn download(&self, url: &str) -> Result<Option<Bytes>, DownloadError> {
        let mut attempts = 0;

        loop {
            let failure = match self.client.get(url).send().await {
                Ok(response) if response.status() == StatusCode::NOT_FOUND => return Ok(None),
                Ok(response) if response.status().is_success() => match response.bytes().await {
                    Ok(body) => return Ok(Some(body)),
                    Err(e) => Failure::Transport(e),
                },
                Ok(response) => Failure::Status(response.status()),
                Err(e) if e.is_builder() => return Err(e.into()),
                Err(e) => Failure::Transport(e),
            };

            attempts += 1;
            if attempts >= self.config.max_attempts {
                tracing::warn!(url, attempts, "giving up: {failure}");
                return Err(failure.into_error(attempts));
            }

            let delay = self.backoff_delay(attempts - 1, failure.is_throttled());
            tracing::debug!(url, attempts, delay_ms = delay.as_millis() as u64, "retrying: {failure}");
            tokio::time::sleep(delay).await;
        }
    }

    /// Delay before the retry that follows failed attempt `retry` (0-based).
    ///
    /// `base_delay * 2^retry`, plus uniform jitter in `[0, jitter)`, plus the
    /// throttle penalty for 503/429 answers, capped at `max_delay`.
    fn backoff_delay(&self, retry: u32, throttled: bool) -> Duration {
        let base_ms = self.config.base_delay.as_millis() as u64;
        let exp_ms = base_ms.saturating_mul(1u64 << retry.min(20));

        let jitter_ms = self.config.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..jitter_ms)
        };

        let penalty = if throttled {
            self.config.throttle_penalty.as_millis() as u64
        } else {
            0
        };

        let total = exp_ms.saturating_add(jitter).saturating_add(penalty);
        Duration::from_millis(total).min(self.config.max_delay)
    }
}
