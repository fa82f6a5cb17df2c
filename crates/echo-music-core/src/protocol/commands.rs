//! Command translation.
//!
//! Maps a [`CommandId`] and its raw arguments to the operation descriptor the
//! proxy protocol expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CommandError;
use crate::types::{CommandId, CommandSpec, DeviceIdentity, DeviceRecord};

/// Operation type for a provider search.
pub const SEARCH_OPERATION: &str = "Alexa.Music.PlaySearchPhrase";

/// Operation type for a free-text utterance.
pub const TEXT_OPERATION: &str = "Alexa.TextCommand";

/// Providers recognised as the leading token of a search.
pub const KNOWN_PROVIDERS: &[&str] = &[
    "SPOTIFY",
    "AMAZON_MUSIC",
    "CLOUDPLAYER",
    "TUNEIN",
    "APPLE_MUSIC",
    "DEEZER",
    "I_HEART_RADIO",
    "PANDORA",
    "SIRIUSXM",
];

/// Fields every device-scoped payload starts with.
pub const DEVICE_FIELDS: [&str; 4] = ["deviceType", "deviceSerialNumber", "customerId", "locale"];

/// Check if a token names a known music provider
pub fn is_known_provider(token: &str) -> bool {
    let upper = token.to_uppercase();
    KNOWN_PROVIDERS.iter().any(|p| *p == upper)
}

/// Protocol type tag for a transport command, `None` outside the fixed set.
pub fn transport_type_tag(command: CommandId) -> Option<&'static str> {
    match command {
        CommandId::Play => Some("PlayCommand"),
        CommandId::Pause => Some("PauseCommand"),
        CommandId::Next => Some("NextCommand"),
        CommandId::Previous => Some("PreviousCommand"),
        CommandId::Forward => Some("ForwardCommand"),
        CommandId::Rewind => Some("RewindCommand"),
        _ => None,
    }
}

/// A single protocol operation: its type tag and payload fields.
///
/// The payload keeps insertion order, which is also the order fields are
/// written on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(rename = "operationPayload", default)]
    pub payload: Map<String, Value>,
}

impl OperationDescriptor {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Build a descriptor from structured key/value pairs.
    pub fn from_pairs<K, V, I>(type_tag: impl Into<String>, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            type_tag: type_tag.into(),
            payload: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Return a copy with the device and account fields placed first.
    pub fn scoped_to(&self, device: &DeviceRecord, identity: &DeviceIdentity) -> Self {
        let mut payload = Map::new();
        payload.insert("deviceType".to_string(), device.device_type.clone().into());
        payload.insert(
            "deviceSerialNumber".to_string(),
            device.serial_number.clone().into(),
        );
        payload.insert("customerId".to_string(), identity.customer_id.clone().into());
        payload.insert("locale".to_string(), identity.locale.clone().into());

        for (key, value) in &self.payload {
            if !payload.contains_key(key) {
                payload.insert(key.clone(), value.clone());
            }
        }

        Self {
            type_tag: self.type_tag.clone(),
            payload,
        }
    }

    pub fn is_device_scoped(&self) -> bool {
        DEVICE_FIELDS.iter().all(|f| self.payload.contains_key(*f))
    }
}

/// Outcome of translating a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// Read-only status query, routed straight to the status endpoint
    StatusQuery,
    /// A mutating operation for the target device
    Operation(OperationDescriptor),
}

impl Translation {
    pub fn into_operation(self) -> Option<OperationDescriptor> {
        match self {
            Translation::StatusQuery => None,
            Translation::Operation(op) => Some(op),
        }
    }
}

/// Build a validated search operation.
pub fn search_operation(provider: &str, phrase: &str) -> Result<OperationDescriptor, CommandError> {
    let provider = provider.trim();
    let phrase = phrase.trim();

    if provider.is_empty() {
        return Err(CommandError::InvalidSearch(
            "provider is missing".to_string(),
        ));
    }
    if phrase.is_empty() {
        return Err(CommandError::InvalidSearch(
            "search phrase is empty".to_string(),
        ));
    }

    Ok(OperationDescriptor::new(SEARCH_OPERATION)
        .with_field("provider", provider.to_uppercase())
        .with_field("searchPhrase", phrase))
}

/// Build a validated free-text operation.
pub fn text_operation(text: &str) -> Result<OperationDescriptor, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::EmptyCommand);
    }
    Ok(OperationDescriptor::new(TEXT_OPERATION).with_field("text", text))
}

/// Translates commands using the configured default provider.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    default_provider: String,
}

impl CommandTranslator {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            default_provider: default_provider.into(),
        }
    }

    pub fn translate<S: AsRef<str>>(
        &self,
        command: CommandId,
        raw_args: &[S],
    ) -> Result<Translation, CommandError> {
        match command {
            CommandId::Status => Ok(Translation::StatusQuery),
            CommandId::Search => {
                let (provider, phrase) = self.split_search_args(raw_args);
                search_operation(&provider, &phrase).map(Translation::Operation)
            }
            CommandId::TextCommand => {
                text_operation(&join_args(raw_args)).map(Translation::Operation)
            }
            transport => transport_type_tag(transport)
                .map(|tag| Translation::Operation(OperationDescriptor::new(tag)))
                .ok_or_else(|| CommandError::UnknownCommand(transport.to_string())),
        }
    }

    pub fn translate_spec(&self, spec: &CommandSpec) -> Result<Translation, CommandError> {
        self.translate(spec.command, spec.raw_args.as_slice())
    }

    /// Split search tokens into `(provider, phrase)`.
    ///
    /// The first token is taken as the provider only when it names a known
    /// provider and a phrase follows it.
    pub fn split_search_args<S: AsRef<str>>(&self, raw_args: &[S]) -> (String, String) {
        match raw_args.split_first() {
            Some((first, rest)) if !rest.is_empty() && is_known_provider(first.as_ref()) => {
                (first.as_ref().to_uppercase(), join_args(rest))
            }
            _ => (self.default_provider.clone(), join_args(raw_args)),
        }
    }
}

fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
