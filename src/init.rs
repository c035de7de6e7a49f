//! Shared initialization logic for MCP and CLI modes.

use anyhow::Result;
use std::sync::Arc;

use crate::call::{AuthMode, CallInvoker, HttpUpstream, UpstreamCaller, MAX_TIMEOUT_SECS};
use crate::config::{Settings, SettingsArgs};

/// Application context shared between the MCP server and CLI commands.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub invoker: CallInvoker,
}

impl AppContext {
    /// Resolve settings and build the HTTP-backed invoker.
    pub fn new(args: &SettingsArgs) -> Result<Self> {
        let settings = Settings::load(args)?;

        tracing::info!(
            upstream = %settings.upstream_url,
            client_timeout_secs = settings.client_timeout.as_secs(),
            auth = ?settings.auth.kind(),
            "Settings resolved"
        );
        if settings.auth == AuthMode::Open {
            tracing::warn!(
                "Auth mode is OPEN: any caller can place calls. Use --auth api-key outside development."
            );
        }

        if settings.client_timeout.as_secs() <= MAX_TIMEOUT_SECS as u64 {
            tracing::warn!(
                "Client timeout ({}s) does not exceed the longest ring timeout ({}s); long calls may be reported as timeouts",
                settings.client_timeout.as_secs(),
                MAX_TIMEOUT_SECS
            );
        }

        let upstream: Arc<dyn UpstreamCaller> = Arc::new(HttpUpstream::new(
            &settings.upstream_url,
            settings.client_timeout,
        )?);

        Ok(Self::with_upstream(settings, upstream))
    }

    /// Context around an arbitrary upstream (tests, alternative transports).
    pub fn with_upstream(settings: Settings, upstream: Arc<dyn UpstreamCaller>) -> Self {
        let invoker = CallInvoker::new(upstream, settings.auth.clone());
        Self { settings, invoker }
    }
}
