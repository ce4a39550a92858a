//! PEM-armored DER as a registrable encoding

use crate::armor::{der_to_pem, pem_to_der};
use aom_core::{AomError, AomResult, Codec, Deserializer, Node, Serializer};
use aom_der::DecodeOptions;

/// Name the PEM codec registers under
pub const PEM_ENCODING: &str = "PEM";

/// Label written when none is chosen
pub const DEFAULT_LABEL: &str = "ASN1 DATA";

/// PEM serializer and deserializer
///
/// Deserializing decodes the DER of every block in order and concatenates the
/// resulting nodes. Serializing writes the DER of all nodes as one block under
/// the codec's label.
#[derive(Debug, Clone)]
pub struct PemCodec {
    label: String,
    options: DecodeOptions,
}

impl PemCodec {
    pub fn new() -> Self {
        Self::with_label(DEFAULT_LABEL)
    }

    /// PEM codec writing blocks under `label`, e.g. `"CERTIFICATE REQUEST"`
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            options: DecodeOptions::default(),
        }
    }

    /// Use custom DER decoder options
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for PemCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for PemCodec {
    fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>> {
        let der = aom_der::encode(nodes)?;
        Ok(der_to_pem(&self.label, &der)?.into_bytes())
    }
}

impl Deserializer for PemCodec {
    fn deserialize(&self, input: &[u8]) -> AomResult<Vec<Node>> {
        let text = std::str::from_utf8(input)
            .map_err(|e| AomError::InvalidPem(format!("input is not text: {}", e)))?;
        let der = pem_to_der(text)?;
        aom_der::decode_with_options(&der, self.options)
    }
}

impl Codec for PemCodec {
    fn encoding(&self) -> &str {
        PEM_ENCODING
    }

    fn serializer(&self) -> Option<&dyn Serializer> {
        Some(self)
    }

    fn deserializer(&self) -> Option<&dyn Deserializer> {
        Some(self)
    }
}
