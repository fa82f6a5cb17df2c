//! Response normalization for proxy replies.

use serde_json::{json, Value};

use crate::dispatch::DispatchResult;

/// Extract an upstream error message from a parsed body.
///
/// The proxy reports failures as `{"error": ...}`, sometimes alongside
/// `"success": false`.
pub fn upstream_error(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(msg)) => return Some(msg.clone()),
        Some(Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }

    if body.get("success") == Some(&Value::Bool(false)) {
        let msg = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Command failed");
        return Some(msg.to_string());
    }

    None
}

/// Turn an HTTP status and raw body into a dispatch result.
pub fn normalize_response(status: u16, body: &str) -> DispatchResult {
    let success = (200..300).contains(&status);
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return if success {
            DispatchResult::Completed(json!({}))
        } else {
            DispatchResult::Failed(format!("HTTP {}", status))
        };
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => {
            if let Some(error) = upstream_error(&value) {
                DispatchResult::Failed(error)
            } else if success {
                DispatchResult::Completed(value)
            } else {
                DispatchResult::Failed(format!("HTTP {}: {}", status, trimmed))
            }
        }
        Err(e) if success => DispatchResult::Failed(format!("Malformed response body: {}", e)),
        Err(_) => DispatchResult::Failed(format!("HTTP {}: {}", status, trimmed)),
    }
}
