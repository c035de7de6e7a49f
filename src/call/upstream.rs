//! The CallMeBot HTTP API behind a trait.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::call::CallParameters;
use crate::error::ConfigError;

/// Public CallMeBot endpoint for Telegram voice calls.
pub const CALLMEBOT_API_URL: &str = "http://api.callmebot.com/start.php";

/// How long to wait for CallMeBot to answer, connect included.
///
/// Larger than the longest ring timeout the caller can request, since
/// CallMeBot may hold the response while the call rings.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(130);

/// Status and raw body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Ways the upstream exchange can fail before a response is in hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("upstream did not respond in time")]
    Timeout,

    #[error("{0}")]
    Transport(String),

    /// Response arrived but could not be read, or any other failure.
    #[error("{0}")]
    Other(String),
}

/// Something that can place a call with already-normalized parameters.
#[async_trait]
pub trait UpstreamCaller: Send + Sync {
    async fn send(&self, params: &CallParameters) -> Result<UpstreamResponse, UpstreamError>;
}

/// CallMeBot over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http_client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpUpstream {
    /// Client for `base_url` that gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url =
            reqwest::Url::parse(base_url).map_err(|e| ConfigError::InvalidUpstreamUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("callmebot-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }
}

#[async_trait]
impl UpstreamCaller for HttpUpstream {
    async fn send(&self, params: &CallParameters) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Other(format!("Failed to read response body: {}", e))
            }
        })?;

        Ok(UpstreamResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_connect() || err.is_request() || err.is_redirect() {
        UpstreamError::Transport(error_chain(&err))
    } else {
        UpstreamError::Other(error_chain(&err))
    }
}

/// `reqwest` hides the interesting part (DNS, refused, TLS) in the source chain.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
