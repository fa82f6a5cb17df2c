//! Shared core library for the echo-music harness.
//!
//! Resolves the target device from the proxy's status snapshot, translates
//! user commands into operation descriptors and behavior sequences, and
//! dispatches them to the local proxy.

pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod types;

pub use config::HarnessConfig;
pub use dispatch::{Dispatch, DispatchClient, DispatchResult};
pub use error::{CommandError, ConfigError, CoreError, DeviceError, Result};
pub use types::{CommandId, DeviceIdentity, DeviceRecord, MusicStatus, ProxyStatus};
