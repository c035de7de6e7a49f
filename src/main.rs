//! callmebot-mcp - Telegram voice calls via CallMeBot, as an MCP tool
//!
//! Usage:
//!   callmebot-mcp --auth api-key serve                      MCP server on stdio
//!   callmebot-mcp --auth api-key serve --transport http     MCP server on HTTP
//!   callmebot-mcp --auth open call @alice "Hello"           Place one call
//!   callmebot-mcp --help                                    Show all commands

use anyhow::Result;
use clap::Parser;

use callmebot_mcp::cli::output::OutputMode;
use callmebot_mcp::cli::{Cli, Commands, Transport};
use callmebot_mcp::init::AppContext;
use callmebot_mcp::mcp::http::run_http_server;
use callmebot_mcp::mcp::server::run_mcp_server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr (safe for MCP stdio transport)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("callmebot_mcp=info".parse()?),
        )
        .init();

    let ctx = AppContext::new(&cli.settings)?;

    match &cli.command {
        Commands::Serve { transport, bind } => match transport {
            Transport::Stdio => run_mcp_server(ctx).await?,
            Transport::Http => run_http_server(ctx, *bind).await?,
        },
        cmd => {
            let mode = OutputMode::from_json_flag(cli.json);
            let placed = callmebot_mcp::cli::execute(cmd, &ctx, mode).await?;
            if !placed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
