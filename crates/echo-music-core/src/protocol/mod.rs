//! Protocol layer for proxy communication.
//!
//! This module builds operation payloads and behavior sequences, and
//! interprets the bodies the proxy sends back.

pub mod commands;
pub mod legacy;
pub mod response;
pub mod sequence;

pub use commands::{CommandTranslator, OperationDescriptor, Translation};
pub use sequence::{BehaviorCommand, SequenceDocument};
