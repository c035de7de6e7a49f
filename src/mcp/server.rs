use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::{Json, Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use tracing::instrument;

use crate::call::{CallInvoker, CallReport};
use crate::init::AppContext;
use crate::mcp::CallTelegramUserInput;

/// MCP server exposing CallMeBot voice calls.
#[derive(Clone)]
pub struct CallMeBotServer {
    pub(crate) invoker: CallInvoker,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CallMeBotServer {
    pub fn new(invoker: CallInvoker) -> Self {
        Self {
            invoker,
            tool_router: Self::tool_router(),
        }
    }

    /// Create server from shared AppContext (used by the binary).
    pub fn from_context(ctx: &AppContext) -> Self {
        Self::new(ctx.invoker.clone())
    }

    // Failures are reported inside the CallReport, so this never returns Err.
    #[tool(description = "Make a voice call to a Telegram user with TTS (Text-to-Speech)")]
    #[instrument(name = "mcp.call_telegram_user", skip_all)]
    pub async fn call_telegram_user(
        &self,
        request: Parameters<CallTelegramUserInput>,
    ) -> Result<Json<CallReport>, McpError> {
        let Parameters(input) = request;
        Ok(Json(self.handle_call_telegram_user(input).await))
    }
}

#[tool_handler]
impl ServerHandler for CallMeBotServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "callmebot-mcp".to_string(),
                title: Some("CallMeBot Telegram Voice Call".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"# CallMeBot Telegram Voice Call

One tool: call_telegram_user places a text-to-speech voice call to a Telegram user.

- username: @handle or phone number in international format (+331234567890)
- text: spoken message, truncated to 256 characters
- repeat: 1-10, timeout: 5-120 seconds (out-of-range values are clamped)
- carbon_copy: yes | no | missed | only (anything else means yes)

The result always has `success`; on failure `error_kind` says why
(MISSING_RECIPIENT, MISSING_MESSAGE, INVALID_CREDENTIAL, UPSTREAM_REJECTED,
TIMEOUT, TRANSPORT_ERROR, UNKNOWN). Calls are not retried.
"#
                .to_string(),
            ),
        }
    }
}

/// Run MCP server on stdio transport.
pub async fn run_mcp_server(ctx: AppContext) -> anyhow::Result<()> {
    let server = CallMeBotServer::from_context(&ctx);

    tracing::info!(
        "Starting CallMeBot MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    tracing::info!("MCP server listening on stdio");

    tokio::select! {
        result = service.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("MCP server shutting down");
    Ok(())
}
