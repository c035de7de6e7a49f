pub mod fake_callmebot;
pub mod stub;

// Re-export commonly used test utilities
pub use fake_callmebot::spawn_fake_callmebot;
pub use stub::{keyed_invoker, open_invoker, StubReply, StubUpstream};
