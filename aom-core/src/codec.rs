//! Extension points for encodings
//!
//! An encoding (DER, JSON, PEM, ...) is a [`Codec`] that declares its name and
//! exposes a [`Serializer`], a [`Deserializer`], or both. The encoding registry
//! dispatches to codecs through these traits only.

use crate::error::AomResult;
use crate::node::Node;

/// Turns a sequence of top-level nodes into bytes
pub trait Serializer: Send + Sync {
    fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>>;
}

/// Turns bytes into a sequence of top-level nodes
pub trait Deserializer: Send + Sync {
    fn deserialize(&self, input: &[u8]) -> AomResult<Vec<Node>>;
}

/// An encoding implementation that can be registered by name
pub trait Codec: Send + Sync {
    /// Encoding name this implementation answers to, e.g. `"DER"`
    fn encoding(&self) -> &str;

    /// Serialization capability, if any
    fn serializer(&self) -> Option<&dyn Serializer> {
        None
    }

    /// Deserialization capability, if any
    fn deserializer(&self) -> Option<&dyn Deserializer> {
        None
    }
}
