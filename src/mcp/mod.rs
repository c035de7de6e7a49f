pub mod http;
pub mod server;
pub mod tools;
pub mod types;

pub use server::CallMeBotServer;
pub use types::*;
