//! Streamable HTTP transport, stateless, for hosting behind a load balancer
//! or on serverless platforms.

use std::net::SocketAddr;
use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};

use crate::init::AppContext;
use crate::mcp::CallMeBotServer;

/// Path the MCP endpoint is mounted under.
pub const MCP_PATH: &str = "/mcp";

/// Router serving the MCP endpoint at [`MCP_PATH`].
pub fn router(server: CallMeBotServer) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    );
    axum::Router::new().nest_service(MCP_PATH, service)
}

/// Run MCP server on streamable HTTP transport until ctrl-c.
pub async fn run_http_server(ctx: AppContext, bind: SocketAddr) -> anyhow::Result<()> {
    let server = CallMeBotServer::from_context(&ctx);

    tracing::info!(
        "Starting CallMeBot MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        "MCP server listening on http://{}{}",
        listener.local_addr()?,
        MCP_PATH
    );

    axum::serve(listener, router(server))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("MCP server shutting down");
    Ok(())
}
