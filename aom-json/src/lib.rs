//! JSON representation of the ASN.1 abstract object model
//!
//! Each node becomes an object with `tagClass`, `type` and `encoding`
//! members, plus `content` for primitive nodes or `children` for constructed
//! ones. NULL and EOC carry neither.
//!
//! Content is written as follows:
//!
//! - native integers as numbers, wider integers as decimal strings
//! - booleans as booleans
//! - text and object identifiers as strings
//! - octets of opaque types (OCTET STRING, BIT STRING, non-Universal tags)
//!   as standard base64 strings
//!
//! On the way back, string content is read by the node's type: decimal for
//! INTEGER and ENUMERATED, text for OIDs and the string types, base64 for
//! everything else. An array of octets is accepted for any primitive type and
//! taken as already-encoded content.

pub mod codec;
pub mod de;
pub mod repr;
pub mod ser;

pub use codec::{JSON_ENCODING, JsonCodec};
pub use de::{from_slice, from_str, from_value};
pub use repr::{JsonNode, JsonType};
pub use ser::{to_json_node, to_string, to_string_pretty, to_value};
