//! Dispatch of translated commands to the proxy.
//!
//! Every command family goes through [`DispatchClient`]; which proxy endpoint
//! serves it is an internal detail of the client.

pub mod client;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::CommandError;
use crate::protocol::commands::{CommandTranslator, Translation, SEARCH_OPERATION, TEXT_OPERATION};
use crate::types::{CommandId, CommandSpec};

pub use client::DispatchClient;

/// Normalized outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum DispatchResult {
    /// The proxy accepted the request; carries the response body
    Completed(Value),
    /// Transport or upstream failure, with the reason
    Failed(String),
    /// Cancelled before the proxy answered
    Interrupted,
}

impl DispatchResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, DispatchResult::Completed(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            DispatchResult::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// One request to the proxy, by command family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    StatusQuery,
    Transport(CommandId),
    Search { provider: String, phrase: String },
    Text(String),
}

impl Dispatch {
    /// Translate a parsed invocation into a dispatch request.
    pub fn from_spec(translator: &CommandTranslator, spec: &CommandSpec) -> Result<Self, CommandError> {
        let operation = match translator.translate_spec(spec)? {
            Translation::StatusQuery => return Ok(Dispatch::StatusQuery),
            Translation::Operation(op) => op,
        };

        if spec.command.is_transport() {
            return Ok(Dispatch::Transport(spec.command));
        }

        let field = |key: &str| operation.field(key).unwrap_or_default().to_string();
        match operation.type_tag.as_str() {
            SEARCH_OPERATION => Ok(Dispatch::Search {
                provider: field("provider"),
                phrase: field("searchPhrase"),
            }),
            TEXT_OPERATION => Ok(Dispatch::Text(field("text"))),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Command lifecycle stages, logged as the client moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolving,
    Translating,
    Dispatching,
    Completed,
    Failed,
    Interrupted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Resolving => "resolving",
            Stage::Translating => "translating",
            Stage::Dispatching => "dispatching",
            Stage::Completed => "completed",
            Stage::Failed => "failed",
            Stage::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}

impl From<&DispatchResult> for Stage {
    fn from(result: &DispatchResult) -> Self {
        match result {
            DispatchResult::Completed(_) => Stage::Completed,
            DispatchResult::Failed(_) => Stage::Failed,
            DispatchResult::Interrupted => Stage::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator() -> CommandTranslator {
        CommandTranslator::new("SPOTIFY")
    }

    fn dispatch(tokens: &[&str]) -> Result<Dispatch, CommandError> {
        let spec = CommandSpec::parse(tokens)?;
        Dispatch::from_spec(&translator(), &spec)
    }

    #[test]
    fn test_routes_by_family() {
        assert_eq!(dispatch(&["status"]), Ok(Dispatch::StatusQuery));
        assert_eq!(dispatch(&["prev"]), Ok(Dispatch::Transport(CommandId::Previous)));
        assert_eq!(
            dispatch(&["search", "amazon_music", "lofi", "beats"]),
            Ok(Dispatch::Search {
                provider: "AMAZON_MUSIC".to_string(),
                phrase: "lofi beats".to_string(),
            })
        );
        assert_eq!(
            dispatch(&["text", "play", "jazz"]),
            Ok(Dispatch::Text("play jazz".to_string()))
        );
    }

    #[test]
    fn test_validation_happens_before_dispatch() {
        assert_eq!(dispatch(&["text"]), Err(CommandError::EmptyCommand));
        assert!(matches!(dispatch(&["search"]), Err(CommandError::InvalidSearch(_))));
        assert_eq!(
            dispatch(&["volume", "5"]),
            Err(CommandError::UnknownCommand("volume".to_string()))
        );
    }

    #[test]
    fn test_result_serialization() {
        let value = serde_json::to_value(DispatchResult::Failed("device offline".to_string())).unwrap();
        assert_eq!(value, json!({"outcome": "failed", "detail": "device offline"}));

        let value = serde_json::to_value(DispatchResult::Interrupted).unwrap();
        assert_eq!(value, json!({"outcome": "interrupted"}));
    }

    #[test]
    fn test_stage_from_result() {
        assert_eq!(Stage::from(&DispatchResult::Interrupted), Stage::Interrupted);
        assert_eq!(Stage::from(&DispatchResult::Completed(json!({}))).to_string(), "completed");
    }
}
