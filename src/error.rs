use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Why a voice call was not placed.
///
/// Every variant is an outcome handed back to the caller as data inside a
/// [`CallResult`](crate::call::CallResult); none of them is ever propagated
/// out of [`CallInvoker::invoke`](crate::call::CallInvoker::invoke).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The supplied API key did not match the configured one.
    #[error("Invalid API Key")]
    InvalidCredential,

    /// No Telegram username or phone number was given.
    #[error("Missing username")]
    MissingRecipient,

    /// No text to speak was given.
    #[error("Missing text message")]
    MissingMessage,

    /// CallMeBot answered with something other than HTTP 200.
    #[error("API request failed with status code: {status}")]
    UpstreamRejected { status: u16 },

    /// CallMeBot did not answer within the client timeout.
    #[error("Request timeout")]
    Timeout,

    /// DNS, connect, TLS or other transport failure.
    #[error("Request error: {0}")]
    Transport(String),

    /// Anything else, including a panic inside the upstream caller.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CallError {
    /// Machine-readable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallError::InvalidCredential => ErrorKind::InvalidCredential,
            CallError::MissingRecipient => ErrorKind::MissingRecipient,
            CallError::MissingMessage => ErrorKind::MissingMessage,
            CallError::UpstreamRejected { .. } => ErrorKind::UpstreamRejected,
            CallError::Timeout => ErrorKind::Timeout,
            CallError::Transport(_) => ErrorKind::TransportError,
            CallError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Human-readable explanation suitable for an LLM or a terminal.
    pub fn human_message(&self) -> String {
        match self {
            CallError::InvalidCredential => "Please provide a valid API Key".to_string(),
            CallError::MissingRecipient => {
                "Please provide a Telegram username or phone number".to_string()
            }
            CallError::MissingMessage => "Please provide a text message to be spoken".to_string(),
            CallError::UpstreamRejected { status } => {
                format!("CallMeBot API rejected the call with HTTP status {}", status)
            }
            CallError::Timeout => {
                "CallMeBot API did not respond within the specified time".to_string()
            }
            CallError::Transport(detail) | CallError::Unknown(detail) => detail.clone(),
        }
    }
}

/// Error classification exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidCredential,
    MissingRecipient,
    MissingMessage,
    UpstreamRejected,
    Timeout,
    TransportError,
    Unknown,
}

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`FileSettings`](crate::config::FileSettings).
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Neither file, environment nor flags chose an auth mode.
    #[error(
        "No auth mode configured. Set `auth = \"api-key\"` (with MCP_API_KEY) or \
         `auth = \"open\"` (development only) in the config file, CALLMEBOT_MCP_AUTH, or --auth"
    )]
    MissingAuthMode,

    /// `api-key` mode chosen without a key to check against.
    #[error("Auth mode is api-key but no API key is configured (set MCP_API_KEY)")]
    MissingApiKey,

    /// Upstream URL does not parse.
    #[error("Invalid upstream URL '{url}': {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
