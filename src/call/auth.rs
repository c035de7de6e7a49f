//! Caller authentication for the call tool.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CallError, ConfigError};

/// Which auth mode the operator picked, before the key is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AuthKind {
    /// Accept every caller. Development only.
    Open,
    /// Require callers to present the configured API key.
    ApiKey,
}

/// Resolved authentication policy held by the invoker.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    Open,
    ApiKey(String),
}

impl AuthMode {
    /// Resolve a mode choice against the configured key.
    ///
    /// An `api-key` choice with no (or an empty) key is a configuration
    /// error rather than a fallback to open.
    pub fn resolve(kind: AuthKind, api_key: Option<String>) -> Result<Self, ConfigError> {
        match kind {
            AuthKind::Open => Ok(AuthMode::Open),
            AuthKind::ApiKey => match api_key {
                Some(key) if !key.is_empty() => Ok(AuthMode::ApiKey(key)),
                _ => Err(ConfigError::MissingApiKey),
            },
        }
    }

    pub fn kind(&self) -> AuthKind {
        match self {
            AuthMode::Open => AuthKind::Open,
            AuthMode::ApiKey(_) => AuthKind::ApiKey,
        }
    }

    /// Check a caller-supplied key.
    pub fn verify(&self, provided: Option<&str>) -> Result<(), CallError> {
        match self {
            AuthMode::Open => Ok(()),
            AuthMode::ApiKey(expected) => match provided {
                Some(key) if timing_safe_eq(key, expected) => Ok(()),
                _ => Err(CallError::InvalidCredential),
            },
        }
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Open => f.write_str("Open"),
            AuthMode::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// String equality whose running time does not depend on where the inputs
/// differ.
///
/// Only equal-length inputs are compared in constant time. A length mismatch
/// returns early, so timing still reveals whether the lengths match.
pub fn timing_safe_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut out = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        out |= x ^ y;
    }
    out == 0
}
