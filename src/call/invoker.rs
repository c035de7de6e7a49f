use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::call::{
    AuthMode, CallParameters, CallRequest, CallResult, UpstreamCaller, UpstreamError,
    UpstreamResponse,
};
use crate::error::CallError;

/// Validates, normalizes and places voice calls.
///
/// Holds only immutable configuration and a shared upstream handle, so one
/// invoker can serve any number of concurrent invocations.
#[derive(Clone)]
pub struct CallInvoker {
    upstream: Arc<dyn UpstreamCaller>,
    auth: AuthMode,
}

impl CallInvoker {
    pub fn new(upstream: Arc<dyn UpstreamCaller>, auth: AuthMode) -> Self {
        Self { upstream, auth }
    }

    /// Place one call. Always returns a result, never an error or a panic.
    ///
    /// Order: credential check, validation, normalization, one upstream
    /// attempt. Nothing touches the network unless the first three pass.
    pub async fn invoke(&self, request: CallRequest, api_key: Option<&str>) -> CallResult {
        let invocation_id = uuid::Uuid::new_v4();

        if let Err(err) = self.auth.verify(api_key) {
            warn!(%invocation_id, "Rejected call: invalid API key");
            return CallResult::failed(err);
        }

        let params = match request.normalize() {
            Ok(params) => params,
            Err(err) => {
                warn!(%invocation_id, error = %err, "Rejected call: invalid parameters");
                return CallResult::failed(err);
            }
        };

        info!(
            %invocation_id,
            recipient = %params.username,
            language = %params.language,
            repeat = params.repeat,
            carbon_copy = params.carbon_copy.as_str(),
            timeout = params.timeout,
            "Placing voice call"
        );

        let outcome = AssertUnwindSafe(self.upstream.send(&params))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(response)) => map_response(params, response),
            Ok(Err(err)) => CallResult::failed(map_upstream_error(err)),
            Err(panic) => CallResult::failed(CallError::Unknown(panic_message(panic))),
        };

        match result.error() {
            None => info!(%invocation_id, "Voice call initiated"),
            Some(err @ CallError::UpstreamRejected { .. }) => {
                warn!(%invocation_id, error = %err, "CallMeBot rejected the call")
            }
            Some(err) => error!(%invocation_id, error = %err, "Voice call failed"),
        }

        result
    }
}

fn map_response(parameters: CallParameters, response: UpstreamResponse) -> CallResult {
    if response.status == 200 {
        CallResult::Placed {
            parameters,
            upstream_body: response.body,
        }
    } else {
        CallResult::Failed {
            error: CallError::UpstreamRejected {
                status: response.status,
            },
            upstream_body: Some(response.body),
        }
    }
}

fn map_upstream_error(err: UpstreamError) -> CallError {
    match err {
        UpstreamError::Timeout => CallError::Timeout,
        UpstreamError::Transport(detail) => CallError::Transport(detail),
        UpstreamError::Other(detail) => CallError::Unknown(detail),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("upstream caller panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("upstream caller panicked: {}", msg)
    } else {
        "upstream caller panicked".to_string()
    }
}
