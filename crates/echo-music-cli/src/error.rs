//! Error types for the echo-music CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use echo_music_core::error::CoreError;
use thiserror::Error;

// Re-export core error types so command modules can use them via crate::error
pub use echo_music_core::error::{CommandError, ConfigError, DeviceError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Device(_) => exit_codes::DEVICE_ERROR,
                CoreError::Command(_) => exit_codes::INVALID_ARGS,
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
                CoreError::Transport(_) => exit_codes::NETWORK_ERROR,
                CoreError::Upstream(_) => exit_codes::DEVICE_ERROR,
            },
            CliError::DispatchFailed(_) => exit_codes::NETWORK_ERROR,
            CliError::Interrupted => exit_codes::INTERRUPTED,
            CliError::Other(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

// Conversions from core error subtypes to CliError
impl From<DeviceError> for CliError {
    fn from(e: DeviceError) -> Self {
        CliError::Core(CoreError::Device(e))
    }
}

impl From<CommandError> for CliError {
    fn from(e: CommandError) -> Self {
        CliError::Core(CoreError::Command(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::from(DeviceError::NotConnected).exit_code(),
            exit_codes::DEVICE_ERROR
        );
        assert_eq!(
            CliError::from(CommandError::EmptyCommand).exit_code(),
            exit_codes::INVALID_ARGS
        );
        assert_eq!(
            CliError::Core(CoreError::Transport("refused".to_string())).exit_code(),
            exit_codes::NETWORK_ERROR
        );
        assert_eq!(CliError::Interrupted.exit_code(), exit_codes::INTERRUPTED);
        assert_eq!(
            CliError::Other("encode failed".to_string()).exit_code(),
            exit_codes::GENERAL_ERROR
        );
    }

    #[test]
    fn test_core_message_passes_through() {
        let err = CliError::from(CommandError::UnknownCommand("shuffle".to_string()));
        assert_eq!(err.to_string(), "Command error: Unknown command: shuffle");
    }
}
