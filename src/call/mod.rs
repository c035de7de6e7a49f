//! Voice call placement: parameter normalization, the upstream seam and the
//! invoker that ties them together.

pub mod auth;
pub mod invoker;
pub mod upstream;

pub use auth::{timing_safe_eq, AuthKind, AuthMode};
pub use invoker::CallInvoker;
pub use upstream::{HttpUpstream, UpstreamCaller, UpstreamError, UpstreamResponse};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CallError, ErrorKind};

/// Default voice, a Google Cloud TTS voice name.
pub const DEFAULT_LANGUAGE: &str = "en-US-Standard-B";

/// Default number of times the message is repeated during the call.
pub const DEFAULT_REPEAT: i64 = 2;

/// Default ring timeout forwarded to CallMeBot, in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Longest message CallMeBot accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 256;

pub const MIN_REPEAT: i64 = 1;
pub const MAX_REPEAT: i64 = 10;
pub const MIN_TIMEOUT_SECS: i64 = 5;
pub const MAX_TIMEOUT_SECS: i64 = 120;

/// Whether a text transcript is sent alongside (or instead of) the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CarbonCopy {
    /// Always send the transcript.
    #[default]
    Yes,
    /// Never send the transcript.
    No,
    /// Send the transcript only when the call is not answered.
    Missed,
    /// Send only the transcript, no call.
    Only,
}

impl CarbonCopy {
    /// Parse a caller-supplied mode, falling back to [`CarbonCopy::Yes`]
    /// for anything unrecognised.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "yes" => CarbonCopy::Yes,
            "no" => CarbonCopy::No,
            "missed" => CarbonCopy::Missed,
            "only" => CarbonCopy::Only,
            _ => CarbonCopy::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CarbonCopy::Yes => "yes",
            CarbonCopy::No => "no",
            CarbonCopy::Missed => "missed",
            CarbonCopy::Only => "only",
        }
    }
}

/// A call request exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Telegram username (`@user`) or phone number (`+331234567890`).
    pub recipient: String,
    pub message: String,
    pub language: String,
    pub repeat: i64,
    pub carbon_copy: String,
    pub timeout_secs: i64,
}

impl CallRequest {
    /// Request with every optional parameter at its default.
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            repeat: DEFAULT_REPEAT,
            carbon_copy: CarbonCopy::default().as_str().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_repeat(mut self, repeat: i64) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_carbon_copy(mut self, carbon_copy: impl Into<String>) -> Self {
        self.carbon_copy = carbon_copy.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: i64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate and coerce into the bounds CallMeBot accepts.
    ///
    /// Empty recipient or message is rejected; everything else is coerced:
    /// the message is truncated, the carbon-copy mode falls back to `yes`,
    /// and repeat/timeout are clamped. The language tag is passed through.
    pub fn normalize(self) -> Result<CallParameters, CallError> {
        if self.recipient.is_empty() {
            return Err(CallError::MissingRecipient);
        }
        if self.message.is_empty() {
            return Err(CallError::MissingMessage);
        }

        Ok(CallParameters {
            username: self.recipient,
            text: truncate_chars(self.message, MAX_MESSAGE_CHARS),
            language: self.language,
            repeat: clamp(self.repeat, MIN_REPEAT, MAX_REPEAT),
            carbon_copy: CarbonCopy::parse_or_default(&self.carbon_copy),
            timeout: clamp(self.timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        })
    }
}

fn clamp(value: i64, min: i64, max: i64) -> u32 {
    // Bounds are small positive constants, so the cast cannot truncate.
    value.clamp(min, max) as u32
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

/// Normalized parameters, as sent upstream and echoed back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CallParameters {
    pub username: String,
    pub text: String,
    pub language: String,
    pub repeat: u32,
    pub carbon_copy: CarbonCopy,
    pub timeout: u32,
}

impl CallParameters {
    /// CallMeBot query string pairs, in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user", self.username.clone()),
            ("text", self.text.clone()),
            ("lang", self.language.clone()),
            ("rpt", self.repeat.to_string()),
            ("cc", self.carbon_copy.as_str().to_string()),
            ("timeout", self.timeout.to_string()),
        ]
    }
}

/// Outcome of one invocation. Built fresh per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    /// CallMeBot accepted the call (HTTP 200).
    Placed {
        parameters: CallParameters,
        upstream_body: String,
    },
    /// The call was not placed.
    Failed {
        error: CallError,
        upstream_body: Option<String>,
    },
}

impl CallResult {
    pub(crate) fn failed(error: CallError) -> Self {
        CallResult::Failed {
            error,
            upstream_body: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, CallResult::Placed { .. })
    }

    pub fn error(&self) -> Option<&CallError> {
        match self {
            CallResult::Placed { .. } => None,
            CallResult::Failed { error, .. } => Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(CallError::kind)
    }

    pub fn human_message(&self) -> String {
        match self {
            CallResult::Placed { parameters, .. } => {
                format!("Successfully initiated voice call to {}", parameters.username)
            }
            CallResult::Failed { error, .. } => error.human_message(),
        }
    }

    pub fn echoed_parameters(&self) -> Option<&CallParameters> {
        match self {
            CallResult::Placed { parameters, .. } => Some(parameters),
            CallResult::Failed { .. } => None,
        }
    }

    /// Raw CallMeBot response text, when a response was received.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            CallResult::Placed { upstream_body, .. } => Some(upstream_body),
            CallResult::Failed { upstream_body, .. } => upstream_body.as_deref(),
        }
    }
}

/// Flat wire view of a [`CallResult`], returned by the MCP tool and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CallReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Short error label, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    /// Normalized parameters actually sent, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CallParameters>,
    /// Raw CallMeBot response text, passed through unparsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_response: Option<String>,
}

impl From<CallResult> for CallReport {
    fn from(result: CallResult) -> Self {
        let message = result.human_message();
        match result {
            CallResult::Placed {
                parameters,
                upstream_body,
            } => CallReport {
                success: true,
                error_kind: None,
                error: None,
                message,
                details: Some(parameters),
                api_response: Some(upstream_body),
            },
            CallResult::Failed {
                error,
                upstream_body,
            } => CallReport {
                success: false,
                error_kind: Some(error.kind()),
                error: Some(error.to_string()),
                message,
                details: None,
                api_response: upstream_body,
            },
        }
    }
}
