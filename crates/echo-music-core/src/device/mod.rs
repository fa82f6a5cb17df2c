//! Device selection.
//!
//! Picks the device a command should target from the proxy's status snapshot.

pub mod resolver;

pub use resolver::{normalize_serial, resolve};
