//! Node shape shared by the JSON serializer and deserializer
//!
//! ```text
//! { "tagClass": "universal", "type": "sequence", "encoding": "constructed",
//!   "children": [ { "tagClass": "universal", "type": "integer",
//!                   "encoding": "primitive", "content": 7 } ] }
//! ```

use aom_core::{EncodingForm, Tag, TagClass, UniversalType};
use serde::Serialize;
use serde_json::Value;

/// `type` field: symbolic name for Universal tags, raw number otherwise
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonType {
    Universal(UniversalType),
    Number(u8),
}

impl From<Tag> for JsonType {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Universal(ty) => JsonType::Universal(ty),
            other => JsonType::Number(other.number()),
        }
    }
}

/// One node of the JSON object model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonNode {
    pub tag_class: TagClass,
    #[serde(rename = "type")]
    pub ty: JsonType,
    pub encoding: EncodingForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<JsonNode>>,
}

/// How string content is read for a given tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentStyle {
    /// Decimal digits
    Integer,
    Boolean,
    /// Plain text, dotted object identifiers included
    Text,
    /// Standard base64
    Opaque,
}

pub(crate) fn style_of(tag: Tag) -> ContentStyle {
    let Tag::Universal(ty) = tag else {
        return ContentStyle::Opaque;
    };
    match ty {
        UniversalType::Integer | UniversalType::Enumerated => ContentStyle::Integer,
        UniversalType::Boolean => ContentStyle::Boolean,
        UniversalType::ObjectIdentifier
        | UniversalType::RelativeOid
        | UniversalType::NumericString
        | UniversalType::PrintableString
        | UniversalType::Ia5String
        | UniversalType::ObjectDescriptor
        | UniversalType::VisibleString
        | UniversalType::UtcTime
        | UniversalType::GeneralizedTime
        | UniversalType::Utf8String => ContentStyle::Text,
        _ => ContentStyle::Opaque,
    }
}
