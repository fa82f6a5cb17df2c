//! Error types for echo-music core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Proxy returned an error: {0}")]
    Upstream(String),
}

/// Device resolution errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Proxy is not connected to the voice service")]
    NotConnected,

    #[error("No device found: {0}")]
    NoDeviceFound(String),
}

/// Command translation and sequence building errors.
///
/// These are raised before any request leaves the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command text is empty")]
    EmptyCommand,

    #[error("Invalid search: {0}")]
    InvalidSearch(String),

    #[error("Sequence needs at least one operation")]
    EmptySequence,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
