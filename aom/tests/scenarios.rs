//! Round trips of hand-built object models through every default encoding

use aom::{AomError, Content, DecodeOptions, Node, Tag, UniversalType};
use num_bigint::BigInt;

const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

fn mixed_sequence() -> Node {
    let sequence = Node::sequence(vec![
        Node::integer(-MAX_SAFE_INTEGER),
        Node::integer(MAX_SAFE_INTEGER),
        Node::null(),
        Node::boolean(true),
        Node::printable_string("nice marmot"),
    ]);
    Node::sequence(vec![sequence.clone(), sequence.clone(), sequence])
}

/// SETs nested `depth` deep, the innermost one empty
fn nested_sets(depth: usize) -> Node {
    let mut node = Node::set(vec![]);
    for _ in 1..depth {
        node = Node::set(vec![node]);
    }
    node
}

fn assert_round_trips(node: &Node) {
    let nodes = vec![node.clone()];
    for encoding in ["DER", "JSON", "PEM"] {
        let bytes = aom::serialize(&nodes, encoding).unwrap();
        assert_eq!(aom::deserialize(&bytes, encoding).unwrap(), nodes, "{}", encoding);
    }
}

#[test]
fn test_mixed_sequence() {
    let node = mixed_sequence();
    assert_round_trips(&node);

    let der = aom::serialize(&[node], "DER").unwrap();
    let inner = hex::decode(
        [
            "3024",
            "0207e0000000000001",
            "02071fffffffffffff",
            "0500",
            "0101ff",
            "130b6e696365206d61726d6f74",
        ]
        .concat(),
    )
    .unwrap();
    let mut expected = vec![0x30, 0x72];
    for _ in 0..3 {
        expected.extend_from_slice(&inner);
    }
    assert_eq!(der, expected);
}

#[test]
fn test_max_safe_integer() {
    let node = Node::sequence(vec![Node::integer(MAX_SAFE_INTEGER)]);
    let der = aom::serialize(std::slice::from_ref(&node), "DER").unwrap();
    assert_eq!(der, hex::decode("300902071fffffffffffff").unwrap());

    let decoded = aom::deserialize(&der, "DER").unwrap();
    let value = decoded[0].children().unwrap()[0].content().unwrap();
    assert_eq!(value.to_big_integer(), Some(BigInt::from(MAX_SAFE_INTEGER)));
    assert_eq!(decoded, vec![node]);
}

#[test]
fn test_big_integer() {
    let raw = vec![0x42u8; 256];
    let node = Node::sequence(vec![Node::big_integer(BigInt::from_signed_bytes_be(&raw))]);
    assert_round_trips(&node);

    let der = aom::serialize(&[node], "DER").unwrap();
    let mut expected = hex::decode("3082010402820100").unwrap();
    expected.extend_from_slice(&raw);
    assert_eq!(der, expected);
}

#[test]
fn test_sets_all_the_way_down() {
    let node = nested_sets(24);
    assert_round_trips(&node);

    let der = aom::serialize(std::slice::from_ref(&node), "DER").unwrap();
    assert_eq!(der.len(), 48);
    assert!(der.chunks(2).all(|pair| pair[0] == 0x31));

    // Innermost SET sits at depth 24
    let codec = aom::DerCodec::with_options(DecodeOptions { max_depth: 23 });
    assert!(matches!(
        aom::Deserializer::deserialize(&codec, &der),
        Err(AomError::UnsupportedAsn1Data { .. })
    ));
    let codec = aom::DerCodec::with_options(DecodeOptions { max_depth: 24 });
    assert_eq!(aom::Deserializer::deserialize(&codec, &der).unwrap(), vec![node]);
}

#[test]
fn test_length_form_boundary() {
    let short = aom::serialize(&[Node::octet_string(&[0xAA; 127])], "DER").unwrap();
    assert_eq!(&short[..2], &[0x04, 0x7F]);
    assert_eq!(short.len(), 129);

    let long = aom::serialize(&[Node::octet_string(&[0xAA; 128])], "DER").unwrap();
    assert_eq!(&long[..3], &[0x04, 0x81, 0x80]);
    assert_eq!(long.len(), 131);
}

#[test]
fn test_concatenated_top_level_values() {
    let nodes = vec![Node::integer(1), Node::sequence(vec![]), Node::utf8_string("z")];
    let der = aom::serialize(&nodes, "DER").unwrap();
    assert_eq!(aom::deserialize(&der, "DER").unwrap(), nodes);
}

#[test]
fn test_tagged_values() {
    let node = Node::sequence(vec![
        Node::constructed(Tag::ContextSpecific(0), vec![Node::integer(2)]),
        Node::primitive(Tag::ContextSpecific(1), b"raw".to_vec()),
        Node::constructed(Tag::Application(3), vec![Node::null()]),
        Node::primitive(Tag::Private(30), vec![0x00, 0xFF]),
    ]);
    assert_round_trips(&node);

    let der = aom::serialize(&[node], "DER").unwrap();
    assert_eq!(&der[2..4], &[0xA0, 0x03]);
}

#[test]
fn test_string_types() {
    let node = Node::sequence(vec![
        Node::printable_string("Complyify LLC"),
        Node::ia5_string("comply@whiterabbit.wtf"),
        Node::numeric_string("0123 456"),
        Node::utf8_string("\u{1F9A6} otter"),
        Node::primitive(Tag::Universal(UniversalType::UtcTime), "250101000000Z"),
        Node::primitive(Tag::Universal(UniversalType::GeneralizedTime), "20250101000000Z"),
        Node::primitive(Tag::Universal(UniversalType::VisibleString), "visible"),
    ]);
    assert_round_trips(&node);
}

#[test]
fn test_object_identifiers() {
    let node = Node::sequence(vec![
        Node::oid("1.2.840.113549.1.1.1"),
        Node::oid("2.999.3"),
        Node::relative_oid("8571.3.2"),
        Node::enumerated(-3),
    ]);
    assert_round_trips(&node);

    let der = aom::serialize(&[Node::oid("1.2.840.113549.1.1.1")], "DER").unwrap();
    assert_eq!(der, hex::decode("06092a864886f70d010101").unwrap());
}

#[test]
fn test_pre_encoded_integer_content() {
    // Bytes content is written as is, even when it is not minimal
    let node = Node::primitive(Tag::Universal(UniversalType::Integer), vec![0x00, 0x01]);
    let der = aom::serialize(&[node], "DER").unwrap();
    assert_eq!(der, vec![0x02, 0x02, 0x00, 0x01]);
    let decoded = aom::deserialize(&der, "DER").unwrap();
    assert_eq!(decoded[0].content(), Some(&Content::Integer(1)));
}

#[test]
fn test_empty_nodes() {
    for tag in [
        Tag::Universal(UniversalType::OctetString),
        Tag::Universal(UniversalType::Utf8String),
        Tag::Universal(UniversalType::Null),
        Tag::ContextSpecific(3),
    ] {
        assert_round_trips(&Node::empty(tag).unwrap());
    }
    assert!(matches!(
        Node::empty(Tag::Universal(UniversalType::Integer)),
        Err(AomError::InvalidContent(_))
    ));

    // Empty INTEGER octets built by hand never reach the wire
    let node = Node::primitive(Tag::Universal(UniversalType::Integer), Vec::<u8>::new());
    assert!(matches!(aom::serialize(&[node], "DER"), Err(AomError::Serialization(_))));
}

#[test]
fn test_non_ascii_printable_string_survives_json() {
    // UTF-8 "é" inside a PrintableString is kept as octets, not text
    let der = vec![0x30, 0x04, 0x13, 0x02, 0xC3, 0xA9];
    let nodes = aom::deserialize(&der, "DER").unwrap();
    let json = aom::serialize(&nodes, "JSON").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value[0]["children"][0]["content"], serde_json::json!([0xC3, 0xA9]));

    let back = aom::deserialize(&json, "JSON").unwrap();
    assert_eq!(aom::serialize(&back, "DER").unwrap(), der);
}

#[test]
fn test_serialization_errors() {
    let cases = [
        Node::constructed(Tag::Universal(UniversalType::Boolean), vec![]),
        Node::primitive(Tag::Universal(UniversalType::Set), vec![0x00]),
        Node::primitive(Tag::Universal(UniversalType::Integer), "seven"),
        Node::primitive(Tag::Universal(UniversalType::PrintableString), "caf\u{e9}"),
        Node::oid("7.1"),
        Node::primitive(Tag::Universal(UniversalType::Boolean), vec![0x01]),
    ];
    for node in cases {
        assert!(
            matches!(aom::serialize(std::slice::from_ref(&node), "DER"), Err(AomError::Serialization(_))),
            "{:?}",
            node
        );
    }
}
