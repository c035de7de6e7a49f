//! Settings layering: built-in defaults, then an optional TOML file, then
//! environment variables and command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::Deserialize;

use crate::call::auth::{AuthKind, AuthMode};
use crate::call::upstream::{CALLMEBOT_API_URL, DEFAULT_CLIENT_TIMEOUT};
use crate::error::ConfigError;

/// Settings that can come from the environment or flags.
///
/// Anything set here wins over the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Settings file (default: <config dir>/callmebot-mcp/config.toml, if present)
    #[arg(long = "config", env = "CALLMEBOT_MCP_CONFIG", global = true)]
    pub config_path: Option<PathBuf>,

    /// Caller authentication: `api-key` (requires MCP_API_KEY) or `open` (development only)
    #[arg(long, value_enum, env = "CALLMEBOT_MCP_AUTH", global = true)]
    pub auth: Option<AuthKind>,

    /// API key callers must present in api-key mode
    #[arg(
        long = "server-api-key",
        id = "server_api_key",
        env = "MCP_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// CallMeBot endpoint
    #[arg(long, env = "CALLMEBOT_API_URL", global = true)]
    pub upstream_url: Option<String>,

    /// Seconds to wait for CallMeBot to respond
    #[arg(long, env = "CALLMEBOT_CLIENT_TIMEOUT_SECS", global = true)]
    pub client_timeout_secs: Option<u64>,
}

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub upstream_url: Option<String>,
    pub client_timeout_secs: Option<u64>,
    pub auth: Option<AuthKind>,
    pub api_key: Option<String>,
}

impl FileSettings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub upstream_url: String,
    pub client_timeout: Duration,
    pub auth: AuthMode,
}

impl Settings {
    /// Load the settings file (explicit path, or the default location if it
    /// exists) and apply `args` on top.
    pub fn load(args: &SettingsArgs) -> Result<Self, ConfigError> {
        let file = match &args.config_path {
            Some(path) => FileSettings::from_path(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::info!("Using config file: {}", path.display());
                    FileSettings::from_path(&path)?
                }
                None => FileSettings::default(),
            },
        };
        Self::resolve(file, args)
    }

    /// Merge file settings with overrides. The auth mode has no default.
    pub fn resolve(file: FileSettings, args: &SettingsArgs) -> Result<Self, ConfigError> {
        let auth_kind = args
            .auth
            .or(file.auth)
            .ok_or(ConfigError::MissingAuthMode)?;
        let api_key = args.api_key.clone().or(file.api_key);
        let auth = AuthMode::resolve(auth_kind, api_key)?;

        let upstream_url = args
            .upstream_url
            .clone()
            .or(file.upstream_url)
            .unwrap_or_else(|| CALLMEBOT_API_URL.to_string());

        let client_timeout = args
            .client_timeout_secs
            .or(file.client_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CLIENT_TIMEOUT);

        Ok(Self {
            upstream_url,
            client_timeout,
            auth,
        })
    }
}

/// `<config dir>/callmebot-mcp/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("callmebot-mcp").join("config.toml"))
}
