//! AOM to JSON

use crate::repr::{ContentStyle, JsonNode, style_of};
use aom_core::{AomError, AomResult, Body, Content, NATIVE_INTEGER_MAX, NATIVE_INTEGER_MIN, Node, Tag, UniversalType};
use b64_ct::{STANDARD, ToBase64};
use serde_json::Value;

/// Convert a node into its JSON representation
pub fn to_json_node(node: &Node) -> JsonNode {
    let (content, children) = match node.body() {
        Body::Empty => (None, None),
        Body::Content(content) => (Some(content_to_value(node.tag(), content)), None),
        Body::Children(children) => (None, Some(children.iter().map(to_json_node).collect())),
    };
    JsonNode {
        tag_class: node.tag_class(),
        ty: node.tag().into(),
        encoding: node.encoding(),
        content,
        children,
    }
}

/// Convert a node sequence into a JSON array
pub fn to_value(nodes: &[Node]) -> AomResult<Value> {
    let repr: Vec<JsonNode> = nodes.iter().map(to_json_node).collect();
    serde_json::to_value(repr).map_err(|e| AomError::Serialization(e.to_string()))
}

/// Render a node sequence as compact JSON text
pub fn to_string(nodes: &[Node]) -> AomResult<String> {
    let repr: Vec<JsonNode> = nodes.iter().map(to_json_node).collect();
    serde_json::to_string(&repr).map_err(|e| AomError::Serialization(e.to_string()))
}

/// Render a node sequence as indented JSON text
pub fn to_string_pretty(nodes: &[Node]) -> AomResult<String> {
    let repr: Vec<JsonNode> = nodes.iter().map(to_json_node).collect();
    serde_json::to_string_pretty(&repr).map_err(|e| AomError::Serialization(e.to_string()))
}

fn content_to_value(tag: Tag, content: &Content) -> Value {
    let style = style_of(tag);
    match content {
        Content::Integer(value) if (NATIVE_INTEGER_MIN..=NATIVE_INTEGER_MAX).contains(value) => {
            Value::from(*value)
        }
        Content::Integer(value) => Value::String(value.to_string()),
        Content::BigInteger(value) => Value::String(value.to_string()),
        Content::Boolean(value) => Value::Bool(*value),
        Content::Text(text) if style == ContentStyle::Opaque => {
            Value::String(text.as_bytes().to_base64(STANDARD))
        }
        Content::Text(text) => Value::String(text.clone()),
        Content::Bytes(bytes) => bytes_to_value(tag, style, bytes),
    }
}

/// Opaque types carry base64. Text types carry a string only when the octets
/// fit the type's character set; anything else is an octet array, which reads
/// back as the same pre-encoded octets.
fn bytes_to_value(tag: Tag, style: ContentStyle, bytes: &[u8]) -> Value {
    if style == ContentStyle::Opaque {
        return Value::String(bytes.to_base64(STANDARD));
    }
    if style == ContentStyle::Text {
        if let Some(text) = bytes_as_text(tag, bytes) {
            return Value::String(text.to_string());
        }
    }
    Value::Array(bytes.iter().map(|&b| Value::from(b)).collect())
}

/// Octets that the DER encoder would write back unchanged from text
fn bytes_as_text(tag: Tag, bytes: &[u8]) -> Option<&str> {
    match tag.universal()? {
        UniversalType::Utf8String => std::str::from_utf8(bytes).ok(),
        // Octets of an identifier are not its dotted form
        UniversalType::ObjectIdentifier | UniversalType::RelativeOid => None,
        _ if bytes.is_ascii() => std::str::from_utf8(bytes).ok(),
        _ => None,
    }
}
