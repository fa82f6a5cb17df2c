//! Wire and domain types shared by the core and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Marker the proxy substitutes for hidden parts of a serial number.
pub const REDACTION_MARKER: &str = "...";

/// Device family that supports music transport commands.
pub const ECHO_FAMILY: &str = "ECHO";

/// A device as reported by the proxy's status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default)]
    pub family: String,
    #[serde(rename = "type", default)]
    pub device_type: String,
    #[serde(rename = "serialNumber", default)]
    pub serial_number: String,
    #[serde(rename = "name", default)]
    pub friendly_name: String,
}

impl DeviceRecord {
    /// Whether the serial number still carries a redaction marker.
    pub fn is_masked(&self) -> bool {
        self.serial_number.contains(REDACTION_MARKER)
    }

    pub fn display_name(&self) -> &str {
        if self.friendly_name.is_empty() {
            "Unknown"
        } else {
            &self.friendly_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub list: Vec<DeviceRecord>,
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub devices: DeviceList,
}

/// Response of `GET /api/music`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicStatus {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_length: Option<f64>,
}

impl MusicStatus {
    /// Playback progress in percent, when both position and length are known.
    pub fn progress_percent(&self) -> Option<f64> {
        match (self.media_progress, self.media_length) {
            (Some(progress), Some(length)) if length > 0.0 => Some(progress / length * 100.0),
            _ => None,
        }
    }
}

/// Account fields carried in every device-scoped operation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub customer_id: String,
    pub locale: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            customer_id: crate::config::DEFAULT_CUSTOMER_ID.to_string(),
            locale: crate::config::DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Canonical command identifiers understood by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Status,
    Play,
    Pause,
    Next,
    Previous,
    Forward,
    Rewind,
    Search,
    TextCommand,
}

impl CommandId {
    /// The fixed playback-control commands.
    pub const TRANSPORT: [CommandId; 6] = [
        CommandId::Play,
        CommandId::Pause,
        CommandId::Next,
        CommandId::Previous,
        CommandId::Forward,
        CommandId::Rewind,
    ];

    pub fn is_transport(&self) -> bool {
        Self::TRANSPORT.contains(self)
    }

    /// Name used on the command line and in the proxy's control endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::Status => "status",
            CommandId::Play => "play",
            CommandId::Pause => "pause",
            CommandId::Next => "next",
            CommandId::Previous => "prev",
            CommandId::Forward => "forward",
            CommandId::Rewind => "rewind",
            CommandId::Search => "search",
            CommandId::TextCommand => "text",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(CommandId::Status),
            "play" => Ok(CommandId::Play),
            "pause" => Ok(CommandId::Pause),
            "next" => Ok(CommandId::Next),
            "prev" | "previous" => Ok(CommandId::Previous),
            "forward" => Ok(CommandId::Forward),
            "rewind" => Ok(CommandId::Rewind),
            "search" => Ok(CommandId::Search),
            "text" => Ok(CommandId::TextCommand),
            _ => Err(CommandError::UnknownCommand(s.to_string())),
        }
    }
}

/// A parsed invocation: which command, and the tokens that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: CommandId,
    pub raw_args: Vec<String>,
}

impl CommandSpec {
    pub fn new(command: CommandId, raw_args: Vec<String>) -> Self {
        Self { command, raw_args }
    }

    /// Parse `<command> [args...]` tokens.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, CommandError> {
        let (first, rest) = tokens
            .split_first()
            .ok_or_else(|| CommandError::UnknownCommand(String::new()))?;
        let command = first.as_ref().parse()?;
        Ok(Self {
            command,
            raw_args: rest.iter().map(|t| t.as_ref().to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_parse() {
        assert_eq!("play".parse::<CommandId>(), Ok(CommandId::Play));
        assert_eq!("PREV".parse::<CommandId>(), Ok(CommandId::Previous));
        assert_eq!("previous".parse::<CommandId>(), Ok(CommandId::Previous));
        assert_eq!("text".parse::<CommandId>(), Ok(CommandId::TextCommand));
        assert_eq!(
            "shuffle".parse::<CommandId>(),
            Err(CommandError::UnknownCommand("shuffle".to_string()))
        );
    }

    #[test]
    fn test_transport_set() {
        assert!(CommandId::Rewind.is_transport());
        assert!(!CommandId::Search.is_transport());
        assert!(!CommandId::Status.is_transport());
    }

    #[test]
    fn test_command_spec_parse() {
        let spec = CommandSpec::parse(&["search", "jazz", "music"]).unwrap();
        assert_eq!(spec.command, CommandId::Search);
        assert_eq!(spec.raw_args, vec!["jazz", "music"]);

        let empty: [&str; 0] = [];
        assert!(CommandSpec::parse(&empty).is_err());
    }

    #[test]
    fn test_proxy_status_deserialize() {
        let json = r#"{
            "connected": true,
            "devices": {"list": [
                {"family": "ECHO", "type": "A3S5BH2HU6VAYF", "serialNumber": "G090...1234", "name": "Kitchen"}
            ]}
        }"#;
        let status: ProxyStatus = serde_json::from_str(json).unwrap();
        assert!(status.connected);
        assert_eq!(status.devices.list.len(), 1);
        assert_eq!(status.devices.list[0].device_type, "A3S5BH2HU6VAYF");
        assert!(status.devices.list[0].is_masked());
    }

    #[test]
    fn test_proxy_status_missing_devices() {
        let status: ProxyStatus = serde_json::from_str(r#"{"connected": false}"#).unwrap();
        assert!(!status.connected);
        assert!(status.devices.list.is_empty());
    }

    #[test]
    fn test_music_status_progress() {
        let status: MusicStatus = serde_json::from_str(
            r#"{"isPlaying": true, "trackName": "Song A", "mediaProgress": 30, "mediaLength": 200}"#,
        )
        .unwrap();
        let percent = status.progress_percent().unwrap();
        assert!((percent - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_music_status_progress_needs_length() {
        let status = MusicStatus {
            media_progress: Some(30.0),
            media_length: Some(0.0),
            ..Default::default()
        };
        assert_eq!(status.progress_percent(), None);
    }
}
