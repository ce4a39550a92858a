//! DER as a registrable encoding

use crate::decoder::{DecodeOptions, decode_with_options};
use crate::encoder::encode;
use aom_core::{AomResult, Codec, Deserializer, Node, Serializer};

/// Name the DER codec registers under
pub const DER_ENCODING: &str = "DER";

/// DER serializer and deserializer
#[derive(Debug, Clone, Copy, Default)]
pub struct DerCodec {
    options: DecodeOptions,
}

impl DerCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// DER codec decoding with custom options
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }
}

impl Serializer for DerCodec {
    fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>> {
        encode(nodes)
    }
}

impl Deserializer for DerCodec {
    fn deserialize(&self, input: &[u8]) -> AomResult<Vec<Node>> {
        decode_with_options(input, self.options)
    }
}

impl Codec for DerCodec {
    fn encoding(&self) -> &str {
        DER_ENCODING
    }

    fn serializer(&self) -> Option<&dyn Serializer> {
        Some(self)
    }

    fn deserializer(&self) -> Option<&dyn Deserializer> {
        Some(self)
    }
}
