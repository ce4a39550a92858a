//! JSON as a registrable encoding

use crate::{de, ser};
use aom_core::{AomResult, Codec, Deserializer, Node, Serializer};

/// Name the JSON codec registers under
pub const JSON_ENCODING: &str = "JSON";

/// JSON serializer and deserializer for the node shape in [`crate::repr`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Codec producing compact JSON
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec producing indented JSON
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonCodec {
    fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>> {
        log::debug!("serializing {} nodes to JSON", nodes.len());
        let text = if self.pretty {
            ser::to_string_pretty(nodes)?
        } else {
            ser::to_string(nodes)?
        };
        Ok(text.into_bytes())
    }
}

impl Deserializer for JsonCodec {
    fn deserialize(&self, input: &[u8]) -> AomResult<Vec<Node>> {
        de::from_slice(input)
    }
}

impl Codec for JsonCodec {
    fn encoding(&self) -> &str {
        JSON_ENCODING
    }

    fn serializer(&self) -> Option<&dyn Serializer> {
        Some(self)
    }

    fn deserializer(&self) -> Option<&dyn Deserializer> {
        Some(self)
    }
}
