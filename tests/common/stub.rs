//! Recording stub for the upstream seam.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use callmebot_mcp::call::{
    AuthMode, CallInvoker, CallParameters, UpstreamCaller, UpstreamError, UpstreamResponse,
};

/// What the stub answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    Respond { status: u16, body: String },
    Fail(UpstreamError),
    Panic,
}

/// Upstream double that records every request it sees.
pub struct StubUpstream {
    reply: StubReply,
    calls: Mutex<Vec<CallParameters>>,
}

impl StubUpstream {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(StubReply::Respond {
            status: 200,
            body: body.to_string(),
        })
    }

    pub fn status(status: u16, body: &str) -> Arc<Self> {
        Self::new(StubReply::Respond {
            status,
            body: body.to_string(),
        })
    }

    pub fn calls(&self) -> Vec<CallParameters> {
        self.calls.lock().expect("stub lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("stub lock poisoned").len()
    }
}

#[async_trait]
impl UpstreamCaller for StubUpstream {
    async fn send(&self, params: &CallParameters) -> Result<UpstreamResponse, UpstreamError> {
        self.calls
            .lock()
            .expect("stub lock poisoned")
            .push(params.clone());
        match &self.reply {
            StubReply::Respond { status, body } => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            StubReply::Fail(err) => Err(err.clone()),
            StubReply::Panic => panic!("stub upstream exploded"),
        }
    }
}

/// Open-mode invoker around a stub.
pub fn open_invoker(stub: &Arc<StubUpstream>) -> CallInvoker {
    CallInvoker::new(stub.clone(), AuthMode::Open)
}

/// Api-key-mode invoker around a stub.
pub fn keyed_invoker(stub: &Arc<StubUpstream>, key: &str) -> CallInvoker {
    CallInvoker::new(stub.clone(), AuthMode::ApiKey(key.to_string()))
}
