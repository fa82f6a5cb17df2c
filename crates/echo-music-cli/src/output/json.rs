//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use echo_music_core::protocol::{BehaviorCommand, SequenceDocument};
use echo_music_core::{DeviceRecord, MusicStatus, ProxyStatus};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_music_status(&self, status: &MusicStatus) -> String {
        let mut output = serde_json::to_value(status).unwrap_or(json!({}));

        if let Some(percent) = status.progress_percent() {
            if let Value::Object(ref mut map) = output {
                map.insert(
                    "progressPercent".to_string(),
                    json!((percent * 10.0).round() / 10.0),
                );
            }
        }

        Self::to_json(&output)
    }

    fn format_devices(&self, status: &ProxyStatus, target: Option<&DeviceRecord>) -> String {
        Self::to_json(&json!({
            "connected": status.connected,
            "devices": status.devices.list,
            "count": status.devices.list.len(),
            "target": target
        }))
    }

    fn format_command_result(&self, command: &str, result: &Value) -> String {
        Self::to_json(&json!({
            "command": command,
            "success": true,
            "result": result
        }))
    }

    fn format_preview(&self, document: &SequenceDocument, behavior: &BehaviorCommand) -> String {
        Self::to_json(&json!({
            "behavior": behavior,
            "sequence": document
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}
