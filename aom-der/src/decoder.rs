//! DER decoder for the abstract object model
//!
//! Reads TLV triplets from a byte buffer and builds [`Node`] trees. Every
//! position the decoder reports in an error is an absolute offset into the
//! buffer it was given.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use aom_der::DerDecoder;
//!
//! let data = [0x30, 0x03, 0x02, 0x01, 0x07];
//! let mut decoder = DerDecoder::new(&data);
//! let node = decoder.decode_node()?;
//! # Ok::<(), aom_core::AomError>(())
//! ```

use crate::content::decode_content;
use crate::types::{DerLength, Identifier};
use aom_core::{AomError, AomResult, EncodingForm, Node};

/// Default nesting limit; top-level nodes sit at depth 1
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest node accepted. A node deeper than this fails with
    /// `UnsupportedAsn1Data`.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// DER decoder
///
/// # Position Tracking
///
/// The decoder keeps a position that advances as nodes are decoded, so a
/// buffer holding several concatenated nodes can be read one node at a time.
/// A constructed node's children are bounded by the parent's content length;
/// they never read past it.
///
/// # Error Handling
///
/// - `InvalidAsn1Data`: truncated or malformed input, illegal encoding form
///   for a Universal type, non-canonical content
/// - `UnsupportedAsn1Data`: long-form tag numbers, lengths over six octets,
///   nesting beyond [`DecodeOptions::max_depth`]
pub struct DerDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
    options: DecodeOptions,
}

impl<'a> DerDecoder<'a> {
    /// Create a decoder with default options
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_options(buffer, DecodeOptions::default())
    }

    pub fn with_options(buffer: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            buffer,
            position: 0,
            options,
        }
    }

    /// Start decoding at an absolute offset
    ///
    /// # Error Handling
    /// Returns `InvalidAsn1Data` when `offset` lies past the end of `buffer`.
    pub fn at_offset(buffer: &'a [u8], offset: usize, options: DecodeOptions) -> AomResult<Self> {
        if offset > buffer.len() {
            return Err(AomError::invalid_data(
                offset,
                0,
                format!("offset {} lies past the end of a {} byte buffer", offset, buffer.len()),
            ));
        }
        Ok(Self {
            buffer,
            position: offset,
            options,
        })
    }

    /// Current absolute position in the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// Decode the next top-level node
    pub fn decode_node(&mut self) -> AomResult<Node> {
        self.decode_element(self.buffer.len(), 1)
    }

    /// Decode top-level nodes until the buffer is exhausted
    ///
    /// # Returns
    /// Returns the nodes in buffer order; an exhausted decoder returns an
    /// empty list.
    ///
    /// # Error Handling
    /// The first failing node aborts the whole call. Nodes decoded before it
    /// are discarded.
    pub fn decode_all(&mut self) -> AomResult<Vec<Node>> {
        let mut nodes = Vec::new();
        while self.has_remaining() {
            nodes.push(self.decode_node()?);
        }
        Ok(nodes)
    }

    /// Decode one TLV whose encoding must end at or before `limit`
    ///
    /// # Arguments
    /// * `limit` - Absolute end of the enclosing window: the buffer end for a
    ///   top-level node, the parent's content end for a child
    /// * `depth` - Nesting level of this node, 1 for top-level nodes
    ///
    /// # Decoding Process
    /// 1. Check the depth limit
    /// 2. Decode the identifier octet and resolve the tag
    /// 3. Decode the length, reading no further than `limit`
    /// 4. Check that the content fits the window
    /// 5. Check the encoding form against the tag's legal forms
    /// 6. Recurse into the content window (constructed) or run the content
    ///    codec (primitive)
    ///
    /// # Why Bound by `limit`?
    /// A child whose declared length runs past its parent's content must
    /// fail at the child's own offset, with the bytes its parent actually
    /// holds as the available count.
    ///
    /// # Performance
    /// Recursion depth equals nesting depth and is capped by
    /// [`DecodeOptions::max_depth`]. Content octets are copied once, into
    /// the node's content.
    fn decode_element(&mut self, limit: usize, depth: usize) -> AomResult<Node> {
        let start = self.position;
        if depth > self.options.max_depth {
            return Err(AomError::unsupported(
                start,
                format!(
                    "nesting depth {} exceeds the limit of {}",
                    depth, self.options.max_depth
                ),
            ));
        }

        let Some(&octet) = self.buffer[..limit].get(start) else {
            return Err(AomError::invalid_data(start, 0, "missing identifier octet"));
        };
        let identifier = Identifier::decode(octet, start)?;
        let tag = identifier.tag()?;
        self.position += 1;

        let (length, consumed) = DerLength::decode(&self.buffer[self.position..limit], self.position)?;
        self.position += consumed;

        let available = limit - self.position;
        let length = length.value();
        if length > available as u64 {
            return Err(AomError::invalid_data(
                self.position,
                available,
                format!(
                    "need {} content bytes but only {} remain ({} missing)",
                    length,
                    available,
                    length - available as u64
                ),
            ));
        }
        let end = self.position + length as usize;

        let form = identifier.form();
        if !tag.legal_forms().allows(form) {
            return Err(AomError::invalid_data(
                start,
                limit - start,
                format!("{} must not use the {} encoding", tag, form),
            ));
        }

        log::trace!(
            "decoding {} {} at offset {} ({} content bytes, depth {})",
            form,
            tag,
            start,
            length,
            depth
        );

        let node = match form {
            EncodingForm::Constructed => {
                let mut children = Vec::new();
                while self.position < end {
                    children.push(self.decode_element(end, depth + 1)?);
                }
                Node::constructed(tag, children)
            }
            EncodingForm::Primitive => {
                let body = decode_content(tag, &self.buffer[self.position..end], self.position)?;
                self.position = end;
                Node::from_parts(tag, form, body)?
            }
        };

        Ok(node)
    }
}

/// Decode every top-level node in `input`
///
/// An empty input yields an empty list.
pub fn decode(input: &[u8]) -> AomResult<Vec<Node>> {
    decode_with_options(input, DecodeOptions::default())
}

pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> AomResult<Vec<Node>> {
    DerDecoder::with_options(input, options).decode_all()
}

/// Decode the single node starting at absolute `offset`
///
/// # Returns
/// Returns `Ok((node, next_offset))`, where `next_offset` is the position just
/// past the node's encoding.
pub fn decode_at(buffer: &[u8], offset: usize) -> AomResult<(Node, usize)> {
    let mut decoder = DerDecoder::at_offset(buffer, offset, DecodeOptions::default())?;
    let node = decoder.decode_node()?;
    Ok((node, decoder.position()))
}
