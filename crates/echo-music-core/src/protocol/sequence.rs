//! Behavior-sequence documents.
//!
//! A sequence wraps operations in a parallel node so they can be submitted
//! through the preview behavior mechanism used for announcements.

use serde::{Deserialize, Serialize};

use super::commands::OperationDescriptor;
use crate::error::CommandError;

pub const SEQUENCE_TYPE: &str = "com.amazon.alexa.behaviors.model.Sequence";
pub const PARALLEL_NODE_TYPE: &str = "com.amazon.alexa.behaviors.model.ParallelNode";
pub const OPERATION_NODE_TYPE: &str =
    "com.amazon.alexa.behaviors.model.OpaquePayloadOperationNode";

pub const PREVIEW_BEHAVIOR_ID: &str = "PREVIEW";
pub const BEHAVIOR_ENABLED: &str = "ENABLED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDocument {
    #[serde(rename = "@type")]
    pub sequence_type: String,
    pub start_node: ParallelNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelNode {
    #[serde(rename = "@type")]
    pub node_type: String,
    pub nodes_to_execute: Vec<OperationNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationNode {
    #[serde(rename = "@type")]
    pub node_type: String,
    #[serde(flatten)]
    pub operation: OperationDescriptor,
}

impl From<OperationDescriptor> for OperationNode {
    fn from(operation: OperationDescriptor) -> Self {
        Self {
            node_type: OPERATION_NODE_TYPE.to_string(),
            operation,
        }
    }
}

/// Envelope accepted by the preview behavior endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorCommand {
    pub behavior_id: String,
    /// The sequence document, JSON-encoded as a string
    pub sequence_json: String,
    pub status: String,
}

/// Wrap operations in a parallel-node sequence document.
pub fn build<I>(descriptors: I) -> Result<SequenceDocument, CommandError>
where
    I: IntoIterator<Item = OperationDescriptor>,
{
    let nodes: Vec<OperationNode> = descriptors.into_iter().map(OperationNode::from).collect();

    if nodes.is_empty() {
        return Err(CommandError::EmptySequence);
    }

    Ok(SequenceDocument {
        sequence_type: SEQUENCE_TYPE.to_string(),
        start_node: ParallelNode {
            node_type: PARALLEL_NODE_TYPE.to_string(),
            nodes_to_execute: nodes,
        },
    })
}

impl SequenceDocument {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.start_node.nodes_to_execute.iter().map(|n| &n.operation)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_behavior_command(&self) -> Result<BehaviorCommand, serde_json::Error> {
        Ok(BehaviorCommand {
            behavior_id: PREVIEW_BEHAVIOR_ID.to_string(),
            sequence_json: self.encode()?,
            status: BEHAVIOR_ENABLED.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::{search_operation, text_operation};
    use serde_json::{json, Value};

    fn play() -> OperationDescriptor {
        OperationDescriptor::new("PlayCommand")
            .with_field("deviceType", "A3S5BH2HU6VAYF")
            .with_field("deviceSerialNumber", "G0911234")
            .with_field("customerId", "amzn1.account.placeholder")
            .with_field("locale", "en-US")
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(build(Vec::<OperationDescriptor>::new()), Err(CommandError::EmptySequence));
    }

    #[test]
    fn test_single_operation() {
        let descriptor = play();
        let doc = build(vec![descriptor.clone()]).unwrap();

        assert_eq!(doc.sequence_type, SEQUENCE_TYPE);
        assert_eq!(doc.start_node.node_type, PARALLEL_NODE_TYPE);
        assert_eq!(doc.start_node.nodes_to_execute.len(), 1);

        let child = &doc.start_node.nodes_to_execute[0];
        assert_eq!(child.node_type, OPERATION_NODE_TYPE);
        assert_eq!(child.operation, descriptor);

        let child_keys: Vec<&String> = child.operation.payload.keys().collect();
        let original_keys: Vec<&String> = descriptor.payload.keys().collect();
        assert_eq!(child_keys, original_keys);
    }

    #[test]
    fn test_operations_keep_order() {
        let doc = build(vec![
            text_operation("good night").unwrap(),
            search_operation("TUNEIN", "rain sounds").unwrap(),
        ])
        .unwrap();

        let tags: Vec<&str> = doc.operations().map(|op| op.type_tag.as_str()).collect();
        assert_eq!(tags, vec!["Alexa.TextCommand", "Alexa.Music.PlaySearchPhrase"]);
    }

    #[test]
    fn test_wire_shape() {
        let doc = build(vec![OperationDescriptor::new("PauseCommand").with_field("locale", "en-US")]).unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            json!({
                "@type": SEQUENCE_TYPE,
                "startNode": {
                    "@type": PARALLEL_NODE_TYPE,
                    "nodesToExecute": [{
                        "@type": OPERATION_NODE_TYPE,
                        "type": "PauseCommand",
                        "operationPayload": {"locale": "en-US"}
                    }]
                }
            })
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let doc = build(vec![play(), search_operation("SPOTIFY", "jazz").unwrap()]).unwrap();
        let encoded = doc.encode().unwrap();
        let decoded = SequenceDocument::decode(&encoded).unwrap();

        assert_eq!(decoded, doc);
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            serde_json::to_value(&doc).unwrap()
        );
    }

    #[test]
    fn test_decode_accepts_reordered_fields() {
        let json = format!(
            r#"{{"startNode":{{"nodesToExecute":[{{"operationPayload":{{"b":"2","a":"1"}},"type":"NextCommand","@type":"{}"}}],"@type":"{}"}},"@type":"{}"}}"#,
            OPERATION_NODE_TYPE, PARALLEL_NODE_TYPE, SEQUENCE_TYPE
        );
        let decoded = SequenceDocument::decode(&json).unwrap();
        let expected = build(vec![OperationDescriptor::new("NextCommand")
            .with_field("a", "1")
            .with_field("b", "2")])
        .unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_behavior_command_envelope() {
        let doc = build(vec![play()]).unwrap();
        let command = doc.to_behavior_command().unwrap();

        assert_eq!(command.behavior_id, "PREVIEW");
        assert_eq!(command.status, "ENABLED");

        let inner: SequenceDocument = serde_json::from_str(&command.sequence_json).unwrap();
        assert_eq!(inner, doc);

        let value = serde_json::to_value(&command).unwrap();
        assert!(value.get("sequenceJson").map(Value::is_string).unwrap_or(false));
    }
}
