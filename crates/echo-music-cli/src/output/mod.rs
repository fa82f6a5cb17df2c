//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use serde_json::Value;

use echo_music_core::protocol::{BehaviorCommand, SequenceDocument};
use echo_music_core::{DeviceRecord, MusicStatus, ProxyStatus};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the current playback status
    fn format_music_status(&self, status: &MusicStatus) -> String;

    /// Format the proxy's device snapshot, marking the resolved target
    fn format_devices(&self, status: &ProxyStatus, target: Option<&DeviceRecord>) -> String;

    /// Format the proxy's reply to a command
    fn format_command_result(&self, command: &str, result: &Value) -> String;

    /// Format a behavior sequence built for preview
    fn format_preview(&self, document: &SequenceDocument, behavior: &BehaviorCommand) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}

/// Render playback position as `30s / 200s (15.0%)`.
pub fn format_progress(status: &MusicStatus) -> Option<String> {
    let percent = status.progress_percent()?;
    let progress = status.media_progress?;
    let length = status.media_length?;
    Some(format!("{}s / {}s ({:.1}%)", progress, length, percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress() {
        let status = MusicStatus {
            is_playing: true,
            media_progress: Some(30.0),
            media_length: Some(200.0),
            ..Default::default()
        };
        assert_eq!(format_progress(&status).as_deref(), Some("30s / 200s (15.0%)"));
    }

    #[test]
    fn test_format_progress_unknown_length() {
        let status = MusicStatus {
            media_progress: Some(30.0),
            ..Default::default()
        };
        assert_eq!(format_progress(&status), None);
    }
}
