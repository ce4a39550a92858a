//! ASN.1 abstract object model (AOM)
//!
//! Transcodes between DER (ITU-T X.690) bytes and an in-memory node tree,
//! and between that tree and JSON or PEM text.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `aom-core`: type registry, nodes, content values, errors, codec traits
//! - `aom-der`: DER decoder and encoder, content and OID codecs
//! - `aom-json`: JSON representation of nodes
//! - `aom-pem`: PEM armor around DER
//!
//! This crate ties them together behind an [`EncodingRegistry`].
//!
//! # Usage
//!
//! ```no_run
//! use aom::Node;
//!
//! let der = aom::serialize(&[Node::sequence(vec![Node::integer(1), Node::null()])], "DER")?;
//! let nodes = aom::deserialize(&der, "DER")?;
//! let json = aom::serialize(&nodes, "JSON")?;
//! # Ok::<(), aom::AomError>(())
//! ```

pub mod registry;

pub use registry::{EncodingRegistry, deserialize, register, serialize};

// Re-export core types
pub use aom_core::{
    AomError, AomResult, Body, Codec, Content, Deserializer, EncodingForm, Key, LegalForms, Node,
    Serializer, Tag, TagClass, UniversalType,
};

pub use aom_der::{DER_ENCODING, DecodeOptions, DerCodec};
pub use aom_json::{JSON_ENCODING, JsonCodec};
pub use aom_pem::{PEM_ENCODING, PemCodec};

// Re-export the encodings
pub mod der {
    pub use aom_der::*;
}

pub mod json {
    pub use aom_json::*;
}

pub mod pem {
    pub use aom_pem::*;
}
