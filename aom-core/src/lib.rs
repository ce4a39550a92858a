//! Core types for the ASN.1 abstract object model (AOM)
//!
//! This crate provides the type registry (tag classes, encoding forms and the
//! Universal types), the node tree every codec produces and consumes, the
//! error type, and the codec traits the encoding registry dispatches through.

pub mod codec;
pub mod content;
pub mod error;
pub mod node;
pub mod types;

pub use codec::{Codec, Deserializer, Serializer};
pub use content::{Content, NATIVE_INTEGER_BYTES, NATIVE_INTEGER_MAX, NATIVE_INTEGER_MIN};
pub use error::{AomError, AomResult};
pub use node::{Body, Node, Tag};
pub use types::{EncodingForm, Key, LegalForms, TagClass, UniversalType};
