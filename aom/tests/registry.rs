//! Process-wide registry behavior

use aom::{AomError, AomResult, Codec, Deserializer, Node, Serializer};
use std::sync::Arc;

/// Hex text of the DER encoding
struct HexCodec;

impl Serializer for HexCodec {
    fn serialize(&self, nodes: &[Node]) -> AomResult<Vec<u8>> {
        Ok(hex::encode(aom::der::encode(nodes)?).into_bytes())
    }
}

impl Deserializer for HexCodec {
    fn deserialize(&self, input: &[u8]) -> AomResult<Vec<Node>> {
        let der = hex::decode(input).map_err(|e| AomError::InvalidContent(e.to_string()))?;
        aom::der::decode(&der)
    }
}

impl Codec for HexCodec {
    fn encoding(&self) -> &str {
        "HEX"
    }

    fn serializer(&self) -> Option<&dyn Serializer> {
        Some(self)
    }

    fn deserializer(&self) -> Option<&dyn Deserializer> {
        Some(self)
    }
}

/// Declares an encoding but offers no capability
struct Hollow;

impl Codec for Hollow {
    fn encoding(&self) -> &str {
        "HOLLOW"
    }
}

#[test]
fn test_register_custom_codec() {
    aom::register("HEX", Arc::new(HexCodec)).unwrap();

    let nodes = vec![Node::sequence(vec![Node::integer(7)])];
    let text = aom::serialize(&nodes, "HEX").unwrap();
    assert_eq!(text, b"3003020107");
    assert_eq!(aom::deserialize(&text, "HEX").unwrap(), nodes);
}

#[test]
fn test_register_rejects_hollow_codec() {
    assert!(matches!(
        aom::register("HOLLOW", Arc::new(Hollow)),
        Err(AomError::InvalidExtension(_))
    ));
    assert!(matches!(
        aom::serialize(&[Node::null()], "HOLLOW"),
        Err(AomError::UnsupportedEncoding(_))
    ));
}

#[test]
fn test_default_encodings() {
    let nodes = vec![Node::boolean(true)];
    let der = aom::serialize(&nodes, aom::DER_ENCODING).unwrap();
    assert_eq!(der, vec![0x01, 0x01, 0xFF]);

    let json = aom::serialize(&nodes, aom::JSON_ENCODING).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "tagClass": "universal", "type": "boolean", "encoding": "primitive", "content": true }])
    );

    let pem = aom::serialize(&nodes, aom::PEM_ENCODING).unwrap();
    assert_eq!(pem, b"-----BEGIN ASN1 DATA-----\nAQH/\n-----END ASN1 DATA-----\n");
}

#[test]
fn test_error_kinds() {
    assert!(matches!(aom::serialize(&[Node::null()], ""), Err(AomError::MissingEncoding)));
    assert!(matches!(aom::deserialize(b"\x05\x00", ""), Err(AomError::MissingEncoding)));
    assert!(matches!(
        aom::serialize(&[Node::null()], "BER"),
        Err(AomError::UnsupportedEncoding(_))
    ));
    assert!(matches!(
        aom::deserialize(b"\x05\x00", "json"),
        Err(AomError::UnsupportedEncoding(_))
    ));
    assert!(matches!(aom::serialize(&[], "DER"), Err(AomError::InvalidContent(_))));
    assert!(matches!(aom::deserialize(b"", "JSON"), Err(AomError::InvalidContent(_))));
    assert!(matches!(aom::deserialize(b"null", "JSON"), Err(AomError::InvalidJson(_))));
    assert!(matches!(aom::deserialize(b"MIIB", "PEM"), Err(AomError::InvalidPem(_))));
}
