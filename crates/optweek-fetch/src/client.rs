//! Kite Connect HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use optweek_types::{Candle, DateRange, Instrument, Interval};
use reqwest::{Client, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::parse::{parse_candles, parse_data, parse_error, parse_instruments, parse_ltp};
use crate::url::{self, API_VERSION};
use crate::{Broker, FetchError, Profile, Session, session_checksum};

/// Configuration for the broker client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum concurrent historical requests.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// REST API root.
    pub base_url: String,
    /// Interactive login page.
    pub login_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 3, // Historical endpoint allows 3 requests per second
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("optweek/{}", env!("CARGO_PKG_VERSION")),
            base_url: url::API_BASE_URL.to_string(),
            login_url: url::LOGIN_URL.to_string(),
        }
    }
}

/// Kite Connect client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct KiteClient {
    client: Client,
    config: ClientConfig,
    api_key: String,
    access_token: Option<String>,
}

impl KiteClient {
    /// Creates a client for the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default(), api_key)
    }

    /// Uses an access token from an earlier login.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the access token, if a session exists.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the login page URL that yields a request token.
    #[must_use]
    pub fn login_url(&self) -> String {
        url::login_url(&self.config.login_url, &self.api_key)
    }

    /// Exchanges a request token for a session and keeps its access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker rejects the token or checksum.
    pub async fn generate_session(
        &mut self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<Session, FetchError> {
        let checksum = session_checksum(&self.api_key, request_token, api_secret);
        let endpoint = self.endpoint(url::SESSION_TOKEN_PATH);
        let form = [
            ("api_key", self.api_key.as_str()),
            ("request_token", request_token),
            ("checksum", checksum.as_str()),
        ];
        let body = self
            .send(|| {
                self.client
                    .post(&endpoint)
                    .header("X-Kite-Version", API_VERSION)
                    .form(&form)
            })
            .await?;
        let session: Session = parse_data(&body)?;
        debug!(user_id = %session.user_id, "Session created");
        self.access_token = Some(session.access_token.clone());
        Ok(session)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorization(&self) -> Result<String, FetchError> {
        let token = self.access_token.as_deref().ok_or(FetchError::MissingAccessToken)?;
        Ok(format!("token {}:{token}", self.api_key))
    }

    /// Sends an authenticated GET request and returns the raw body.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Bytes, FetchError> {
        let authorization = self.authorization()?;
        let endpoint = self.endpoint(path);
        self.send(|| {
            self.client
                .get(&endpoint)
                .query(query)
                .header("X-Kite-Version", API_VERSION)
                .header("Authorization", &authorization)
        })
        .await
    }

    /// Sends a request, retrying server errors, rate limiting and transient
    /// network failures.
    async fn send<F>(&self, build: F) -> Result<Bytes, FetchError>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempts = 0;

        loop {
            match build().send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            warn!(status = status.as_u16(), attempts, ?delay, "Retrying request");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        let body = response.bytes().await.unwrap_or_default();
                        return Err(parse_error(status.as_u16(), &body));
                    }

                    let body = response.bytes().await?;
                    if !status.is_success() {
                        return Err(parse_error(status.as_u16(), &body));
                    }
                    return Ok(body);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempts, ?delay, "Retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter of up to +-25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl Broker for KiteClient {
    async fn profile(&self) -> Result<Profile, FetchError> {
        let body = self.get(url::PROFILE_PATH, &[]).await?;
        parse_data(&body)
    }

    async fn instruments(&self, exchange: &str) -> Result<Vec<Instrument>, FetchError> {
        let body = self.get(&url::instruments_path(exchange), &[]).await?;
        let instruments = parse_instruments(&body)?;
        debug!(exchange, count = instruments.len(), "Fetched instruments");
        Ok(instruments)
    }

    async fn ltp(&self, keys: &[String]) -> Result<HashMap<String, Decimal>, FetchError> {
        let query: Vec<(&str, String)> = keys.iter().map(|k| ("i", k.clone())).collect();
        let body = self.get(url::LTP_PATH, &query).await?;
        parse_ltp(&body)
    }

    async fn historical_data(
        &self,
        token: u64,
        range: DateRange,
        interval: Interval,
    ) -> Result<Vec<Candle>, FetchError> {
        let body = self
            .get(&url::historical_path(token, interval), &url::historical_query(range))
            .await?;
        parse_candles(&body)
    }
}
