use crate::call::CallReport;
use crate::mcp::{CallMeBotServer, CallTelegramUserInput};

impl CallMeBotServer {
    /// Run one `call_telegram_user` invocation through the invoker.
    pub async fn handle_call_telegram_user(&self, input: CallTelegramUserInput) -> CallReport {
        let (api_key, request) = input.into_parts();
        self.invoker
            .invoke(request, api_key.as_deref())
            .await
            .into()
    }
}
