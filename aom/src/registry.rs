//! Encoding registry
//!
//! Maps an encoding name to the codecs registered under it. Lookups take the
//! first registered codec with the needed capability, so registering a second
//! codec under a name only adds a fallback for a missing capability.
//!
//! A process-wide registry holding the DER, JSON and PEM codecs is built on
//! first use. Registration takes a write lock; it is meant to happen at
//! startup, after which the registry is only read.

use aom_core::{AomError, AomResult, Codec, Node};
use aom_der::DerCodec;
use aom_json::JsonCodec;
use aom_pem::PemCodec;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Name-keyed list of codecs
#[derive(Default)]
pub struct EncodingRegistry {
    codecs: HashMap<String, Vec<Arc<dyn Codec>>>,
}

impl EncodingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the DER, JSON and PEM codecs
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(DerCodec::new()));
        registry.insert(Arc::new(JsonCodec::new()));
        registry.insert(Arc::new(PemCodec::new()));
        registry
    }

    /// Register a codec under `name`
    ///
    /// # Error Handling
    /// - `MissingEncoding`: `name` is empty
    /// - `InvalidExtension`: the codec can neither serialize nor deserialize,
    ///   or it declares an encoding name other than `name`
    pub fn register(&mut self, name: &str, codec: Arc<dyn Codec>) -> AomResult<()> {
        if name.is_empty() {
            return Err(AomError::MissingEncoding);
        }
        if codec.serializer().is_none() && codec.deserializer().is_none() {
            return Err(AomError::InvalidExtension(format!(
                "codec for \"{}\" neither serializes nor deserializes",
                name
            )));
        }
        if codec.encoding() != name {
            return Err(AomError::InvalidExtension(format!(
                "codec declares encoding \"{}\" but was registered as \"{}\"",
                codec.encoding(),
                name
            )));
        }
        self.insert(codec);
        Ok(())
    }

    fn insert(&mut self, codec: Arc<dyn Codec>) {
        log::debug!("registering codec for {}", codec.encoding());
        self.codecs
            .entry(codec.encoding().to_string())
            .or_default()
            .push(codec);
    }

    /// Registered encoding names, sorted
    pub fn encodings(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Serialize top-level nodes with the encoding registered as `name`
    ///
    /// # Error Handling
    /// - `MissingEncoding`: `name` is empty
    /// - `UnsupportedEncoding`: no codec under `name` can serialize
    /// - `InvalidContent`: `nodes` is empty
    pub fn serialize(&self, nodes: &[Node], name: &str) -> AomResult<Vec<u8>> {
        let serializer = self
            .lookup(name)?
            .iter()
            .find_map(|codec| codec.serializer())
            .ok_or_else(|| AomError::UnsupportedEncoding(format!("no serializer registered for \"{}\"", name)))?;
        if nodes.is_empty() {
            return Err(AomError::InvalidContent("nothing to serialize".to_string()));
        }
        serializer.serialize(nodes)
    }

    /// Deserialize `input` with the encoding registered as `name`
    ///
    /// # Error Handling
    /// - `MissingEncoding`: `name` is empty
    /// - `UnsupportedEncoding`: no codec under `name` can deserialize
    /// - `InvalidContent`: `input` is empty
    pub fn deserialize(&self, input: &[u8], name: &str) -> AomResult<Vec<Node>> {
        let deserializer = self
            .lookup(name)?
            .iter()
            .find_map(|codec| codec.deserializer())
            .ok_or_else(|| AomError::UnsupportedEncoding(format!("no deserializer registered for \"{}\"", name)))?;
        if input.is_empty() {
            return Err(AomError::InvalidContent("nothing to deserialize".to_string()));
        }
        deserializer.deserialize(input)
    }

    fn lookup(&self, name: &str) -> AomResult<&[Arc<dyn Codec>]> {
        if name.is_empty() {
            return Err(AomError::MissingEncoding);
        }
        self.codecs
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AomError::UnsupportedEncoding(name.to_string()))
    }
}

static REGISTRY: once_cell::sync::Lazy<RwLock<EncodingRegistry>> =
    once_cell::sync::Lazy::new(|| RwLock::new(EncodingRegistry::with_defaults()));

/// Register a codec with the process-wide registry
pub fn register(name: &str, codec: Arc<dyn Codec>) -> AomResult<()> {
    REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .register(name, codec)
}

/// Serialize with the process-wide registry
pub fn serialize(nodes: &[Node], name: &str) -> AomResult<Vec<u8>> {
    REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .serialize(nodes, name)
}

/// Deserialize with the process-wide registry
pub fn deserialize(input: &[u8], name: &str) -> AomResult<Vec<Node>> {
    REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .deserialize(input, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aom_core::Serializer;

    struct Inert;

    impl Codec for Inert {
        fn encoding(&self) -> &str {
            "INERT"
        }
    }

    struct Shout;

    impl Serializer for Shout {
        fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>> {
            Ok(format!("{} NODES", nodes.len()).into_bytes())
        }
    }

    impl Codec for Shout {
        fn encoding(&self) -> &str {
            "SHOUT"
        }

        fn serializer(&self) -> Option<&dyn Serializer> {
            Some(self)
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = EncodingRegistry::new();
        assert!(registry.encodings().is_empty());
        assert!(matches!(
            registry.serialize(&[Node::null()], "DER"),
            Err(AomError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let registry = EncodingRegistry::with_defaults();
        assert_eq!(registry.encodings(), vec!["DER", "JSON", "PEM"]);
        let der = registry.serialize(&[Node::integer(5)], "DER").unwrap();
        assert_eq!(der, vec![0x02, 0x01, 0x05]);
        assert_eq!(registry.deserialize(&der, "DER").unwrap(), vec![Node::integer(5)]);
    }

    #[test]
    fn test_register_rejects_inert_codec() {
        let mut registry = EncodingRegistry::new();
        assert!(matches!(
            registry.register("INERT", Arc::new(Inert)),
            Err(AomError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_register_rejects_name_mismatch() {
        let mut registry = EncodingRegistry::new();
        assert!(matches!(
            registry.register("LOUD", Arc::new(Shout)),
            Err(AomError::InvalidExtension(_))
        ));
        assert!(matches!(
            registry.register("", Arc::new(Shout)),
            Err(AomError::MissingEncoding)
        ));
    }

    #[test]
    fn test_serialize_only_codec() {
        let mut registry = EncodingRegistry::new();
        registry.register("SHOUT", Arc::new(Shout)).unwrap();
        assert_eq!(registry.serialize(&[Node::null()], "SHOUT").unwrap(), b"1 NODES");
        assert!(matches!(
            registry.deserialize(b"1 NODES", "SHOUT"),
            Err(AomError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_argument_validation() {
        let registry = EncodingRegistry::with_defaults();
        assert!(matches!(registry.serialize(&[Node::null()], ""), Err(AomError::MissingEncoding)));
        assert!(matches!(registry.deserialize(b"x", ""), Err(AomError::MissingEncoding)));
        assert!(matches!(registry.serialize(&[], "DER"), Err(AomError::InvalidContent(_))));
        assert!(matches!(registry.deserialize(&[], "DER"), Err(AomError::InvalidContent(_))));
        assert!(matches!(
            registry.deserialize(b"x", "der"),
            Err(AomError::UnsupportedEncoding(_))
        ));
    }
}
