pub mod call;
pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod mcp;

pub use call::{CallInvoker, CallReport, CallRequest, CallResult};
pub use error::{CallError, ConfigError, ErrorKind};
