use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::call::{CallRequest, CarbonCopy, DEFAULT_LANGUAGE, DEFAULT_REPEAT, DEFAULT_TIMEOUT_SECS};

/// Input for the `call_telegram_user` tool.
///
/// `username` and `text` default to empty so that omitting them yields a
/// structured MISSING_* result instead of a protocol-level error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CallTelegramUserInput {
    /// MCP server API key (required when the server runs in api-key mode)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Telegram username (e.g. @myuser) or phone number (e.g. +331234567890)
    #[serde(default)]
    pub username: String,
    /// Text message to be spoken (max 256 characters, longer text is truncated)
    #[serde(default)]
    pub text: String,
    /// Voice language, default en-US-Standard-B. See Google Cloud TTS for available voices
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Number of times to repeat the message, 1-10 (default 2)
    #[serde(default = "default_repeat")]
    pub repeat: i64,
    /// Text copy option: yes, no, missed or only (default yes)
    #[serde(default = "default_carbon_copy")]
    pub carbon_copy: String,
    /// Call timeout in seconds, 5-120 (default 30, only honoured on dedicated bots)
    #[serde(default = "default_timeout")]
    pub timeout: i64,
}

impl CallTelegramUserInput {
    /// Split into the caller's credential and the call request.
    pub fn into_parts(self) -> (Option<String>, CallRequest) {
        let request = CallRequest::new(self.username, self.text)
            .with_language(self.lang)
            .with_repeat(self.repeat)
            .with_carbon_copy(self.carbon_copy)
            .with_timeout_secs(self.timeout);
        (self.api_key, request)
    }
}

fn default_lang() -> String {
    DEFAULT_LANGUAGE.into()
}

fn default_repeat() -> i64 {
    DEFAULT_REPEAT
}

fn default_carbon_copy() -> String {
    CarbonCopy::default().as_str().into()
}

fn default_timeout() -> i64 {
    DEFAULT_TIMEOUT_SECS
}
