//! CLI interface for callmebot-mcp.

pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;

use crate::call::{CallReport, CallRequest, DEFAULT_LANGUAGE, DEFAULT_REPEAT, DEFAULT_TIMEOUT_SECS};
use crate::config::SettingsArgs;
use crate::init::AppContext;
use output::{print_report, OutputMode};

/// CallMeBot Telegram voice calls as an MCP tool
#[derive(Parser)]
#[command(name = "callmebot-mcp", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server
    Serve {
        /// Transport to serve on
        #[arg(long, value_enum, default_value_t = Transport::Stdio)]
        transport: Transport,
        /// Listen address for the http transport
        #[arg(long, env = "CALLMEBOT_MCP_BIND", default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },

    /// Place a single voice call and print the result
    Call {
        /// Telegram username (@myuser) or phone number (+331234567890)
        username: String,
        /// Text to be spoken (max 256 characters)
        text: String,
        /// Voice language
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        lang: String,
        /// Times to repeat the message (1-10)
        #[arg(long, default_value_t = DEFAULT_REPEAT, allow_negative_numbers = true)]
        repeat: i64,
        /// Text copy option: yes, no, missed, only
        #[arg(long, default_value = "yes")]
        carbon_copy: String,
        /// Call timeout in seconds (5-120)
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, allow_negative_numbers = true)]
        timeout: i64,
        /// API key to present (api-key mode)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// stdin/stdout, for local MCP clients
    Stdio,
    /// Stateless streamable HTTP at /mcp
    Http,
}

/// Execute a non-server command. Returns whether the call succeeded.
pub async fn execute(
    command: &Commands,
    ctx: &AppContext,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    match command {
        Commands::Serve { .. } => unreachable!("serve handled in main"),
        Commands::Call {
            username,
            text,
            lang,
            repeat,
            carbon_copy,
            timeout,
            api_key,
        } => {
            let request = CallRequest::new(username.as_str(), text.as_str())
                .with_language(lang.as_str())
                .with_repeat(*repeat)
                .with_carbon_copy(carbon_copy.as_str())
                .with_timeout_secs(*timeout);

            let report: CallReport = ctx
                .invoker
                .invoke(request, api_key.as_deref())
                .await
                .into();
            print_report(&report, mode);
            Ok(report.success)
        }
    }
}
