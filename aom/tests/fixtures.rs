//! Fixture-driven tests against DER produced by OpenSSL
//!
//! ```bash
//! openssl genrsa -traditional -out rsa.pem 1024
//! openssl rsa -in rsa.pem -traditional -outform DER -out rsa_private_key_1024.der
//! openssl req -new -key rsa.pem -sha1 -config req.cnf -outform DER -out pkcs10.der
//! openssl req -in pkcs10.der -inform DER -outform PEM -out pkcs10.pem
//! ```
//!
//! `req.cnf` sets `string_mask = default` so the subject uses PrintableString.

use aom::{Content, EncodingForm, Node, Tag, TagClass, UniversalType};
use num_bigint::BigInt;

const PKCS10_DER: &[u8] = include_bytes!("data/pkcs10.der");
const PKCS10_PEM: &str = include_str!("data/pkcs10.pem");
const RSA_KEY_DER: &[u8] = include_bytes!("data/rsa_private_key_1024.der");

fn children(node: &Node) -> &[Node] {
    node.children().expect("constructed node")
}

fn text(node: &Node) -> &str {
    node.content().and_then(Content::as_text).expect("text content")
}

#[test]
fn test_pkcs10_structure() {
    let nodes = aom::deserialize(PKCS10_DER, "DER").unwrap();
    assert_eq!(nodes.len(), 1);

    let root = &nodes[0];
    assert_eq!(root.tag(), Tag::Universal(UniversalType::Sequence));
    let parts = children(root);
    assert_eq!(parts.len(), 3);

    // certificationRequestInfo
    let info = children(&parts[0]);
    assert_eq!(info.len(), 4);
    assert_eq!(info[0], Node::integer(0));

    let subject = children(&info[1]);
    assert_eq!(subject.len(), 7);
    let expected = [
        ("2.5.4.6", "US"),
        ("2.5.4.8", "Texas"),
        ("2.5.4.7", "Austin"),
        ("2.5.4.10", "Complyify LLC"),
        ("2.5.4.11", "Engineering"),
        ("2.5.4.3", "Test Cert for Testing Only Plz"),
    ];
    for (rdn, (oid, value)) in subject.iter().zip(expected) {
        assert_eq!(rdn.tag(), Tag::Universal(UniversalType::Set));
        let attribute = children(&children(rdn)[0]);
        assert_eq!(attribute[0], Node::oid(oid));
        assert_eq!(attribute[1], Node::printable_string(value));
    }
    let email = children(&children(&subject[6])[0]);
    assert_eq!(email[0], Node::oid("1.2.840.113549.1.9.1"));
    assert_eq!(email[1].tag(), Tag::Universal(UniversalType::Ia5String));
    assert_eq!(text(&email[1]), "comply@whiterabbit.wtf");

    let spki = children(&info[2]);
    assert_eq!(
        spki[0],
        Node::sequence(vec![Node::oid("1.2.840.113549.1.1.1"), Node::null()])
    );
    assert_eq!(spki[1].tag(), Tag::Universal(UniversalType::BitString));
    assert_eq!(spki[1].content().and_then(Content::as_bytes).map(<[u8]>::len), Some(141));

    // attributes [0], present but empty
    assert_eq!(info[3].tag_class(), TagClass::ContextSpecific);
    assert_eq!(info[3].encoding(), EncodingForm::Constructed);
    assert_eq!(info[3].children().map(<[Node]>::len), Some(0));

    assert_eq!(
        parts[1],
        Node::sequence(vec![Node::oid("1.2.840.113549.1.1.5"), Node::null()])
    );
    assert_eq!(parts[2].tag(), Tag::Universal(UniversalType::BitString));
}

#[test]
fn test_pkcs10_der_round_trip() {
    let nodes = aom::deserialize(PKCS10_DER, "DER").unwrap();
    assert_eq!(aom::serialize(&nodes, "DER").unwrap(), PKCS10_DER);
}

#[test]
fn test_pkcs10_pem() {
    let from_pem = aom::deserialize(PKCS10_PEM.as_bytes(), "PEM").unwrap();
    let from_der = aom::deserialize(PKCS10_DER, "DER").unwrap();
    assert_eq!(from_pem, from_der);

    assert_eq!(aom::pem::pem_to_der(PKCS10_PEM).unwrap(), PKCS10_DER);
    assert_eq!(
        aom::pem::der_to_pem("CERTIFICATE REQUEST", PKCS10_DER).unwrap(),
        PKCS10_PEM
    );
}

#[test]
fn test_pkcs10_json_round_trip() {
    let nodes = aom::deserialize(PKCS10_DER, "DER").unwrap();
    let json = aom::serialize(&nodes, "JSON").unwrap();
    let back = aom::deserialize(&json, "JSON").unwrap();
    assert_eq!(back, nodes);
    assert_eq!(aom::serialize(&back, "DER").unwrap(), PKCS10_DER);
}

#[test]
fn test_pkcs10_truncated() {
    let truncated = &PKCS10_DER[..PKCS10_DER.len() - 1];
    match aom::deserialize(truncated, "DER") {
        Err(aom::AomError::InvalidAsn1Data {
            offset,
            available,
            reason,
        }) => {
            assert_eq!(offset, 4);
            assert_eq!(available, 492);
            assert!(reason.contains("(1 missing)"), "{}", reason);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_rsa_private_key() {
    let expected = [
        "0",
        "118972690447413383996864756231705922232526459023333112402963189612967491444787006166326295750730123754247041601745001439665345770529739929617257371938128979490531844697517970403933050324417346436062803293205029819517154080978643956933799157698055407893647965164896646108610568221901832766019736492574749569959",
        "65537",
        "43332440010677288798772628152811699706889338494086720372594585288638998135207071382428379077008835528234079726469829018185327426378151153088544386654304258963892515811448578598257200994106991705363743164533328620997337745934126590226548211306445354529784453348684061322029457971817985457517508131002203059873",
        "10917400914575416729558215422366898052970429658657014193126279522928271829198138948394387758370117351024302687472115604963763329104433061303447922607522281",
        "10897528759668188149283338818508386913264777525207032028237674056630072342436060150716205541729866012746513122147312576421924050930556279550330722884321039",
        "5351004046233296247720661546870767646634971718195532445971014096395958736248266159578932871116543472383579518851630338017394840433535236510510920090923153",
        "621390435553657004651904071971036847809183722350713012336911789517777443942865202606565148075812278402028160237186735707901340896401861798367119511401311",
        "3295596380514894541528533459307584757290542022798439724364511357243723428100993712627871545246252657132554600226541531572898439079308034101992657634282688",
    ];

    let nodes = aom::deserialize(RSA_KEY_DER, "DER").unwrap();
    assert_eq!(nodes.len(), 1);
    let fields = children(&nodes[0]);
    assert_eq!(fields.len(), 9);

    for (field, decimal) in fields.iter().zip(expected) {
        assert_eq!(field.tag(), Tag::Universal(UniversalType::Integer));
        let value = field.content().and_then(Content::to_big_integer).unwrap();
        assert_eq!(value, decimal.parse::<BigInt>().unwrap());
    }
    assert!(matches!(fields[0].content(), Some(Content::Integer(0))));
    assert!(matches!(fields[2].content(), Some(Content::Integer(65537))));
    assert!(matches!(fields[1].content(), Some(Content::BigInteger(_))));

    assert_eq!(aom::serialize(&nodes, "DER").unwrap(), RSA_KEY_DER);
}
