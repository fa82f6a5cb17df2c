//! Compatibility parser for the old payload-fragment format.
//!
//! Older callers built payloads by string concatenation, passing fragments
//! such as `,"musicProviderId":"SPOTIFY","searchPhrase":"jazz"`. This module
//! pulls the known fields out of such a fragment. Anything it does not
//! recognise is dropped rather than reported.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::commands::OperationDescriptor;

/// A marker and the fields read when the fragment mentions it.
struct MarkerGroup {
    marker: &'static str,
    fields: &'static [&'static str],
}

/// Checked in order; only the first group whose marker appears is read.
const MARKER_GROUPS: &[MarkerGroup] = &[
    MarkerGroup {
        marker: "musicProviderId",
        fields: &["musicProviderId", "searchPhrase"],
    },
    MarkerGroup {
        marker: "textToSpeak",
        fields: &["textToSpeak"],
    },
    MarkerGroup {
        marker: "text",
        fields: &["text"],
    },
];

/// One `"key":"value"` pattern per known field.
static FIELD_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    MARKER_GROUPS
        .iter()
        .flat_map(|group| group.fields.iter().copied())
        .map(|key| {
            let pattern = format!(r#""{}"\s*:\s*"([^"]+)""#, regex::escape(key));
            (key, Regex::new(&pattern).expect("valid field pattern"))
        })
        .collect()
});

/// Extract the first non-empty `"key":"value"` pair for `key` from `fragment`.
fn extract_quoted(fragment: &str, key: &str) -> Option<String> {
    FIELD_PATTERNS
        .get(key)?
        .captures(fragment)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

/// Parse a legacy fragment into payload fields.
///
/// The group is chosen by marker presence alone. A chosen group whose values
/// are missing or malformed yields an empty map; later groups are not tried.
pub fn parse_fragment(fragment: &str) -> Map<String, Value> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix(',').unwrap_or(fragment);

    let Some(group) = MARKER_GROUPS.iter().find(|g| fragment.contains(g.marker)) else {
        return Map::new();
    };

    group
        .fields
        .iter()
        .filter_map(|key| extract_quoted(fragment, key).map(|v| (key.to_string(), Value::from(v))))
        .collect()
}

impl OperationDescriptor {
    /// Build a descriptor from a legacy payload fragment.
    pub fn from_legacy_fragment(type_tag: impl Into<String>, fragment: &str) -> Self {
        Self {
            type_tag: type_tag.into(),
            payload: parse_fragment(fragment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_and_phrase() {
        let fields = parse_fragment(r#","musicProviderId":"SPOTIFY","searchPhrase":"jazz music""#);
        assert_eq!(
            Value::Object(fields),
            json!({"musicProviderId": "SPOTIFY", "searchPhrase": "jazz music"})
        );
    }

    #[test]
    fn test_search_phrase_without_provider_marker_is_text() {
        let fields = parse_fragment(r#""text":"hello","searchPhrase":"jazz""#);
        assert_eq!(Value::Object(fields), json!({"text": "hello"}));
    }

    #[test]
    fn test_chosen_group_does_not_fall_through() {
        assert!(parse_fragment(r#","musicProviderId":"","text":"hi""#).is_empty());
        assert!(parse_fragment(r#","textToSpeak":"","text":"hi""#).is_empty());
    }

    #[test]
    fn test_provider_group_keeps_partial_match() {
        let fields = parse_fragment(r#","musicProviderId":"TUNEIN","searchPhrase":"""#);
        assert_eq!(Value::Object(fields), json!({"musicProviderId": "TUNEIN"}));
    }

    #[test]
    fn test_text_to_speak_before_text() {
        let fields = parse_fragment(r#","textToSpeak":"good morning""#);
        assert_eq!(Value::Object(fields), json!({"textToSpeak": "good morning"}));

        let fields = parse_fragment(r#","text":"play jazz""#);
        assert_eq!(Value::Object(fields), json!({"text": "play jazz"}));
    }

    #[test]
    fn test_first_value_wins() {
        let fields = parse_fragment(r#""text":"one","text":"two""#);
        assert_eq!(Value::Object(fields), json!({"text": "one"}));
    }

    #[test]
    fn test_unrecognised_fragment_is_empty() {
        assert!(parse_fragment("").is_empty());
        assert!(parse_fragment(r#","volume":"5""#).is_empty());
        assert!(parse_fragment(r#","searchPhrase":"#).is_empty());
    }

    #[test]
    fn test_descriptor_from_fragment() {
        let descriptor = OperationDescriptor::from_legacy_fragment(
            "Alexa.Speak",
            r#","textToSpeak":"dinner is ready""#,
        );
        assert_eq!(descriptor.type_tag, "Alexa.Speak");
        assert_eq!(descriptor.field("textToSpeak"), Some("dinner is ready"));
    }
}
