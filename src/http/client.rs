//! reqwest-backed transport
//!
//! Every request goes through the rate limiter, gets the configured auth
//! applied and is retried on transient failures according to the
//! [`RetryPolicy`].

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{SendRequest, Transport};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Wait applied to a 429 without a usable `Retry-After` header
const DEFAULT_RETRY_AFTER_SECS: u64 = 10;

// ============================================================================
// Configuration
// ============================================================================

/// When and how long to wait before retrying a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Growth of the delay between attempts
    pub backoff: BackoffType,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound on any delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Fail on the first error
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt + 1`
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self
                .initial_backoff
                .saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_backoff
                .saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.max_backoff)
    }
}

/// Configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Host that request paths are resolved against
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retry behaviour
    pub retry: RetryPolicy,
    /// Client-side rate limit; `None` disables it
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: StringMap::new(),
            user_agent: format!("crm-cdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Outcome of a single attempt
enum Attempt {
    Done(Response),
    Retry { wait: Option<Duration>, error: Error },
    Fail(Error),
}

/// HTTP transport with retry, rate limiting and auth
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Build a client
    pub fn new(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(auth),
            rate_limiter,
        })
    }

    /// The client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Whether requests pass through a rate limiter
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Absolute URL for a request path; absolute URLs pass through
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Send a request, retrying transient failures.
    ///
    /// Returns the first 2xx response. Any other status ends up as
    /// [`Error::HttpStatus`] carrying the response body, or
    /// [`Error::RateLimited`] when 429s outlast the retries. Timeouts and
    /// connection failures that outlast them are wrapped in
    /// [`Error::MaxRetriesExceeded`].
    pub async fn execute(&self, request: &SendRequest) -> Result<Response> {
        let url = self.url_for(&request.path);
        let policy = self.config.retry;
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }

            match self.attempt(request, &url).await {
                Attempt::Done(response) => {
                    debug!("{} {} -> {}", request.method, url, response.status());
                    return Ok(response);
                }
                Attempt::Fail(error) => return Err(error),
                Attempt::Retry { error, .. } if attempt >= policy.max_retries => {
                    return Err(exhausted(error, policy.max_retries));
                }
                Attempt::Retry { wait, error } => {
                    let delay = wait.unwrap_or_else(|| policy.delay(attempt));
                    attempt += 1;
                    warn!(
                        "{} {} failed ({}), retry {}/{} in {:?}",
                        request.method, url, error, attempt, policy.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn attempt(&self, request: &SendRequest, url: &str) -> Attempt {
        let mut builder = self
            .client
            .request(request.method.into(), url)
            .query(&request.query_pairs());
        for (key, value) in &self.config.default_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let builder = self.authenticator.apply(builder);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retry {
                    wait: None,
                    error: Error::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    },
                }
            }
            Err(e) if e.is_connect() => {
                return Attempt::Retry {
                    wait: None,
                    error: Error::Http(e),
                }
            }
            Err(e) => return Attempt::Fail(Error::Http(e)),
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Done(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response);
            return Attempt::Retry {
                wait: Some(Duration::from_secs(retry_after)),
                error: Error::RateLimited {
                    retry_after_seconds: retry_after,
                },
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    "Failed to read {} error body from {}: {}",
                    status.as_u16(),
                    url,
                    e
                );
                String::new()
            }
        };
        let error = Error::http_status(status.as_u16(), body);
        if error.is_retryable() {
            Attempt::Retry { wait: None, error }
        } else {
            Attempt::Fail(error)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    /// An empty body (e.g. `204 No Content`) decodes as `null`.
    async fn send(&self, request: SendRequest) -> Result<JsonValue> {
        let text = self.execute(&request).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            Error::malformed(
                request.path.as_str(),
                format!("response is not valid JSON: {e}"),
            )
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("retry", &self.config.retry)
            .field("auth", &self.authenticator.config().kind())
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Error for a request whose last retry failed.
///
/// Status errors keep their own variant so the response body and
/// `Retry-After` stay available; connection failures and timeouts are
/// wrapped once at least one retry was made.
fn exhausted(last: Error, max_retries: u32) -> Error {
    match last {
        Error::HttpStatus { .. } | Error::RateLimited { .. } => last,
        _ if max_retries == 0 => last,
        last => Error::MaxRetriesExceeded {
            max_retries,
            last: Box::new(last),
        },
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
