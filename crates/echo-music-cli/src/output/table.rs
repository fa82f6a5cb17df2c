//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use echo_music_core::protocol::{BehaviorCommand, SequenceDocument};
use echo_music_core::{DeviceRecord, MusicStatus, ProxyStatus};

use super::{format_progress, OutputFormatter};

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn or_unknown(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("Unknown")
    }

    fn is_target(device: &DeviceRecord, target: Option<&DeviceRecord>) -> bool {
        // The target's serial has been normalized, so compare on the stripped form.
        target.map_or(false, |t| {
            t.device_type == device.device_type
                && t.serial_number == echo_music_core::device::normalize_serial(&device.serial_number)
        })
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_music_status(&self, status: &MusicStatus) -> String {
        let mut lines = Vec::new();

        let playing = if status.is_playing {
            "Yes".green()
        } else {
            "No".red()
        };
        lines.push("Music Status:".to_string());
        lines.push(format!("  Playing:  {}", playing));

        if status.is_playing {
            lines.push(format!("  Track:    {}", Self::or_unknown(&status.track_name)));
            lines.push(format!("  Artist:   {}", Self::or_unknown(&status.artist)));
            lines.push(format!("  Album:    {}", Self::or_unknown(&status.album)));
            lines.push(format!("  Provider: {}", Self::or_unknown(&status.provider)));

            if let Some(progress) = format_progress(status) {
                lines.push(format!("  Progress: {}", progress));
            }
        }

        lines.join("\n")
    }

    fn format_devices(&self, status: &ProxyStatus, target: Option<&DeviceRecord>) -> String {
        if !status.connected {
            return "Proxy is not connected to the voice service.".to_string();
        }
        if status.devices.list.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["", "Name", "Family", "Type", "Serial"]);

        for device in &status.devices.list {
            let marker = if Self::is_target(device, target) {
                Cell::new("*").fg(Color::Green)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                marker,
                Cell::new(device.display_name()),
                Cell::new(&device.family),
                Cell::new(&device.device_type),
                Cell::new(&device.serial_number),
            ]);
        }

        let footer = match target {
            Some(t) => format!("Target: {} ({})", t.display_name(), t.device_type),
            None => "No target device matches the configured family".yellow().to_string(),
        };

        format!(
            "{}\n\nFound {} device(s)\n{}",
            table,
            status.devices.list.len(),
            footer
        )
    }

    fn format_command_result(&self, command: &str, result: &Value) -> String {
        let detail = result
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::to_string_pretty(result).unwrap_or_default());

        format!("{} {}\n{}", "[OK]".green(), command, detail)
    }

    fn format_preview(&self, document: &SequenceDocument, behavior: &BehaviorCommand) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Behavior: {} ({})", behavior.behavior_id, behavior.status));

        for operation in document.operations() {
            lines.push(format!("  Operation: {}", operation.type_tag));
            for (key, value) in &operation.payload {
                let shown = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                lines.push(format!("    {:<20} {}", key, shown));
            }
        }

        lines.push(String::new());
        lines.push(
            serde_json::to_string_pretty(behavior).unwrap_or_default(),
        );
        lines.join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
