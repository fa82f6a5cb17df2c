//! Command implementations.

pub mod control;
pub mod devices;
pub mod preview;
pub mod search;
pub mod status;
pub mod text;

pub use control::run_control;
pub use devices::run_devices;
pub use preview::run_preview;
pub use search::run_search;
pub use status::run_status;
pub use text::run_text;

use serde_json::Value;

use echo_music_core::{Dispatch, DispatchClient, DispatchResult};

use crate::error::CliError;

/// Resolves when the user presses Ctrl+C.
async fn interrupt_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; never interrupt.
        std::future::pending::<()>().await;
    }
}

/// Dispatch a request, stopping early on Ctrl+C.
pub(crate) async fn execute(client: &DispatchClient, request: Dispatch) -> Result<Value, CliError> {
    let result = client.dispatch_until(request, interrupt_signal()).await?;
    into_body(result)
}

/// Map a dispatch outcome to the response body or a CLI error.
pub(crate) fn into_body(result: DispatchResult) -> Result<Value, CliError> {
    match result {
        DispatchResult::Completed(body) => Ok(body),
        DispatchResult::Failed(reason) => Err(CliError::DispatchFailed(reason)),
        DispatchResult::Interrupted => Err(CliError::Interrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_body() {
        assert_eq!(
            into_body(DispatchResult::Completed(json!({"ok": 1}))).unwrap(),
            json!({"ok": 1})
        );
        assert!(matches!(
            into_body(DispatchResult::Failed("device offline".to_string())),
            Err(CliError::DispatchFailed(reason)) if reason == "device offline"
        ));
        assert!(matches!(
            into_body(DispatchResult::Interrupted),
            Err(CliError::Interrupted)
        ));
    }
}
