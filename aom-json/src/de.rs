//! JSON to AOM
//!
//! Input is walked as a `serde_json::Value` so every shape problem can be
//! reported precisely. Registry misses keep their own error kinds
//! (`UnknownTagClass`, `UnknownUniversalType`, `UnknownEncodingForm`); every
//! other problem is `InvalidJson`.

use crate::repr::{ContentStyle, style_of};
use aom_core::{
    AomError, AomResult, Body, Content, EncodingForm, Key, Node, Tag, TagClass, UniversalType,
};
use b64_ct::FromBase64;
use num_bigint::BigInt;
use serde_json::{Map, Value};

fn invalid(reason: impl Into<String>) -> AomError {
    AomError::InvalidJson(reason.into())
}

/// Parse JSON text holding one node object or an array of nodes
pub fn from_slice(input: &[u8]) -> AomResult<Vec<Node>> {
    let value: Value = serde_json::from_slice(input).map_err(|e| invalid(e.to_string()))?;
    from_value(&value)
}

pub fn from_str(input: &str) -> AomResult<Vec<Node>> {
    from_slice(input.as_bytes())
}

/// Convert a JSON value holding one node object or a non-empty array of nodes
pub fn from_value(value: &Value) -> AomResult<Vec<Node>> {
    match value {
        Value::Null => Err(invalid("AOM JSON must not be null")),
        Value::Array(items) if items.is_empty() => Err(invalid("AOM JSON root must not be an empty array")),
        Value::Array(items) => items.iter().map(node_from_value).collect(),
        Value::Object(_) => Ok(vec![node_from_value(value)?]),
        _ => Err(invalid("AOM JSON must be an object or an array")),
    }
}

fn node_from_value(value: &Value) -> AomResult<Node> {
    let Value::Object(map) = value else {
        return Err(invalid(format!("node must be an object, found {}", value)));
    };
    if map.is_empty() {
        return Err(invalid("node must not be an empty object"));
    }

    let tag_class = TagClass::resolve(key_field(map, "tagClass")?)?;
    let encoding = EncodingForm::resolve(key_field(map, "encoding")?)?;
    let tag = tag_field(map, tag_class)?;

    let body = match encoding {
        EncodingForm::Constructed => Body::Children(children_field(map, tag)?),
        EncodingForm::Primitive => {
            if map.contains_key("children") {
                return Err(invalid(format!("primitive {} cannot carry children", tag)));
            }
            match map.get("content") {
                None | Some(Value::Null) if tag.is_contentless() => Body::Empty,
                None | Some(Value::Null) => {
                    return Err(invalid(format!("primitive {} requires content", tag)));
                }
                Some(content) => Body::Content(content_from_value(tag, content)?),
            }
        }
    };

    Node::from_parts(tag, encoding, body).map_err(|e| invalid(e.to_string()))
}

/// A registry key given as a symbolic name or a numeric value
fn key_field<'a>(map: &'a Map<String, Value>, field: &str) -> AomResult<Key<'a>> {
    match map.get(field) {
        Some(Value::String(name)) => Ok(Key::Name(name)),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Key::Value)
            .ok_or_else(|| invalid(format!("{} value {} is out of range", field, number))),
        Some(other) => Err(invalid(format!("{} must be a name or a number, found {}", field, other))),
        None => Err(invalid(format!("node is missing {}", field))),
    }
}

fn tag_field(map: &Map<String, Value>, tag_class: TagClass) -> AomResult<Tag> {
    match key_field(map, "type")? {
        Key::Name(name) if tag_class == TagClass::Universal => {
            Ok(Tag::Universal(UniversalType::resolve(name)?))
        }
        Key::Name(name) => Err(invalid(format!(
            "{} tags need a numeric type, found \"{}\"",
            tag_class, name
        ))),
        Key::Value(number) => Tag::new(tag_class, number),
    }
}

/// Children of a constructed node; a `content` array is read as children too
fn children_field(map: &Map<String, Value>, tag: Tag) -> AomResult<Vec<Node>> {
    let items = match (map.get("children"), map.get("content")) {
        (Some(_), Some(_)) => {
            return Err(invalid(format!("{} carries both content and children", tag)));
        }
        (Some(Value::Array(items)), None) | (None, Some(Value::Array(items))) => items,
        (None, None) => {
            return Err(invalid(format!("constructed {} requires children", tag)));
        }
        _ => return Err(invalid(format!("children of {} must be an array", tag))),
    };
    items.iter().map(node_from_value).collect()
}

fn content_from_value(tag: Tag, value: &Value) -> AomResult<Content> {
    match value {
        Value::Bool(flag) => Ok(Content::Boolean(*flag)),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Ok(Content::integer(n))
            } else if let Some(n) = number.as_u64() {
                Ok(Content::integer(BigInt::from(n)))
            } else {
                Err(invalid(format!("{} content {} is not an integer", tag, number)))
            }
        }
        Value::String(text) => string_content(tag, text),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(Content::Bytes)
            .ok_or_else(|| invalid(format!("{} content array must hold octets (0-255)", tag))),
        other => Err(invalid(format!("unsupported content {} for {}", other, tag))),
    }
}

/// String content is read according to the node's type
fn string_content(tag: Tag, text: &str) -> AomResult<Content> {
    match style_of(tag) {
        ContentStyle::Integer => text
            .parse::<BigInt>()
            .map(Content::integer)
            .map_err(|_| invalid(format!("{} content \"{}\" is not a decimal integer", tag, text))),
        ContentStyle::Boolean => Err(invalid(format!("{} content must be true or false", tag))),
        ContentStyle::Text => Ok(Content::Text(text.to_string())),
        ContentStyle::Opaque => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            compact
                .from_base64()
                .map(Content::Bytes)
                .map_err(|e| invalid(format!("{} content is not base64: {:?}", tag, e)))
        }
    }
}
