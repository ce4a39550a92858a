//! DER (Distinguished Encoding Rules) codec for the ASN.1 abstract object model
//!
//! Every node is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Identifier] [Length] [Content]
//! ```
//!
//! ## Identifier
//!
//! One octet holding the tag class (2 bits), the encoding form (1 bit) and the
//! tag number (5 bits). Tag numbers above 30 need the long tag form, which is
//! not supported.
//!
//! ## Length
//!
//! - **Short form**: one octet for lengths 0-127
//! - **Long form**: `0x80 | k` followed by `k` big-endian octets, `k` at most 6
//!
//! Indefinite lengths are not DER and are rejected.
//!
//! ## Content
//!
//! - **Primitive nodes**: content octets interpreted per Universal type
//!   (INTEGER, BOOLEAN, OBJECT IDENTIFIER, character strings); everything else
//!   is kept as raw octets
//! - **Constructed nodes**: the concatenated encodings of the children
//!
//! # Implementation Notes
//!
//! 1. **Absolute offsets**: errors report positions in the original buffer,
//!    nested or not.
//! 2. **Depth limit**: nesting deeper than [`DecodeOptions::max_depth`] is
//!    rejected rather than risking the stack.
//! 3. **SET ordering**: children of a SET are encoded in the order stored on
//!    the node; no canonical sort is applied.

pub mod codec;
pub mod content;
pub mod decoder;
pub mod encoder;
pub mod oid;
pub mod types;

pub use codec::{DER_ENCODING, DerCodec};
pub use content::{decode_content, encode_content};
pub use decoder::{DEFAULT_MAX_DEPTH, DecodeOptions, DerDecoder, decode, decode_at, decode_with_options};
pub use encoder::{DerEncoder, encode, encode_node};
pub use oid::{decode_oid, decode_relative_oid, encode_oid, encode_relative_oid};
pub use types::{DerLength, Identifier};
