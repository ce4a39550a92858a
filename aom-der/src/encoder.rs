//! DER encoder for the abstract object model
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use aom_core::Node;
//! use aom_der::DerEncoder;
//!
//! let mut encoder = DerEncoder::new();
//! encoder.encode_node(&Node::sequence(vec![Node::integer(12345), Node::null()]))?;
//! let bytes = encoder.into_bytes();
//! # Ok::<(), aom_core::AomError>(())
//! ```

use crate::content::encode_content;
use crate::types::{DerLength, Identifier};
use aom_core::{AomError, AomResult, Body, EncodingForm, Node};

/// DER encoder
///
/// Each node becomes one TLV triplet. Lengths always use the definite form
/// with the minimal number of octets.
///
/// # Error Handling
///
/// Encoding fails with `Serialization` when a node uses an encoding form its
/// Universal type does not allow, or when its content cannot be expressed
/// for its tag.
pub struct DerEncoder {
    buffer: Vec<u8>,
}

impl DerEncoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create an encoder with initial buffer capacity in bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Append a TLV triplet with already-encoded content
    ///
    /// # Arguments
    /// * `identifier` - Identifier octet fields
    /// * `value` - Content octets, already encoded
    ///
    /// The length always uses the shortest definite form.
    pub fn encode_tlv(&mut self, identifier: Identifier, value: &[u8]) {
        self.buffer.push(identifier.encode());
        self.buffer.extend_from_slice(&DerLength::new(value.len()).encode());
        self.buffer.extend_from_slice(value);
    }

    /// Append the encoding of `node` and all of its descendants
    ///
    /// # Arguments
    /// * `node` - Node to encode; constructed nodes are encoded recursively
    ///
    /// # Encoding Process
    /// 1. Check the node's encoding form against its tag's legal forms
    /// 2. Build the identifier octet from class, form and tag number
    /// 3. Encode the content: children in stored order, or the content
    ///    codec for primitive nodes
    /// 4. Write identifier, length and content
    ///
    /// # Why Encode Children First?
    /// DER only has definite lengths, so a parent's length octets cannot be
    /// written before the size of its encoded children is known.
    ///
    /// # Performance
    /// Each constructed level encodes into its own buffer that is then
    /// copied into the parent, so content is copied once per nesting level.
    pub fn encode_node(&mut self, node: &Node) -> AomResult<()> {
        let tag = node.tag();
        let form = node.encoding();
        if !tag.legal_forms().allows(form) {
            return Err(AomError::Serialization(format!(
                "illegal encoding {} for {}",
                form, tag
            )));
        }

        let identifier = Identifier::new(tag, form);
        match (node.body(), form) {
            (Body::Children(children), EncodingForm::Constructed) => {
                // Children are encoded first so the parent length is known
                let mut inner = DerEncoder::new();
                for child in children {
                    inner.encode_node(child)?;
                }
                self.encode_tlv(identifier, inner.as_bytes());
            }
            (Body::Content(content), EncodingForm::Primitive) => {
                let value = encode_content(tag, Some(content))?;
                self.encode_tlv(identifier, &value);
            }
            (Body::Empty, EncodingForm::Primitive) => {
                let value = encode_content(tag, None)?;
                self.encode_tlv(identifier, &value);
            }
            _ => {
                return Err(AomError::Serialization(format!(
                    "{} {} has a body that does not match its encoding",
                    form, tag
                )));
            }
        }
        Ok(())
    }

    /// Get the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for DerEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a list of top-level nodes back to back
pub fn encode(nodes: &[Node]) -> AomResult<Vec<u8>> {
    let mut encoder = DerEncoder::new();
    for node in nodes {
        encoder.encode_node(node)?;
    }
    Ok(encoder.into_bytes())
}

/// Encode a single node
pub fn encode_node(node: &Node) -> AomResult<Vec<u8>> {
    encode(std::slice::from_ref(node))
}
