//! Per-type content codecs
//!
//! Converts the content octets of a primitive TLV to and from the semantic
//! value kept in the object model. Types without a dedicated codec, and every
//! non-Universal tag, pass their octets through unchanged.

use crate::oid;
use aom_core::{AomError, AomResult, Body, Content, NATIVE_INTEGER_BYTES, Tag, UniversalType};
use num_bigint::BigInt;

/// How a tag's content octets are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    /// NULL, EOC: no content at all
    Empty,
    /// INTEGER, ENUMERATED: two's complement
    Integer,
    Boolean,
    ObjectIdentifier,
    RelativeOid,
    /// Character strings restricted to ASCII
    Ascii,
    Utf8,
    /// Raw octets
    Opaque,
}

fn kind_of(tag: Tag) -> ContentKind {
    let Tag::Universal(ty) = tag else {
        return ContentKind::Opaque;
    };
    match ty {
        UniversalType::EndOfContent | UniversalType::Null => ContentKind::Empty,
        UniversalType::Integer | UniversalType::Enumerated => ContentKind::Integer,
        UniversalType::Boolean => ContentKind::Boolean,
        UniversalType::ObjectIdentifier => ContentKind::ObjectIdentifier,
        UniversalType::RelativeOid => ContentKind::RelativeOid,
        UniversalType::NumericString
        | UniversalType::PrintableString
        | UniversalType::Ia5String
        | UniversalType::ObjectDescriptor
        | UniversalType::VisibleString
        | UniversalType::UtcTime
        | UniversalType::GeneralizedTime => ContentKind::Ascii,
        UniversalType::Utf8String => ContentKind::Utf8,
        _ => ContentKind::Opaque,
    }
}

/// Decode the content octets of a primitive TLV
///
/// `offset` is the absolute position of the first content octet.
pub fn decode_content(tag: Tag, bytes: &[u8], offset: usize) -> AomResult<Body> {
    let content = match kind_of(tag) {
        ContentKind::Empty => {
            if !bytes.is_empty() {
                return Err(AomError::invalid_data(
                    offset,
                    bytes.len(),
                    format!("{} must have empty content, found {} bytes", tag, bytes.len()),
                ));
            }
            return Ok(Body::Empty);
        }
        ContentKind::Integer => decode_integer(bytes, offset)?,
        ContentKind::Boolean => Content::Boolean(decode_boolean(bytes, offset)?),
        ContentKind::ObjectIdentifier => Content::Text(oid::decode_oid(bytes, offset)?),
        ContentKind::RelativeOid => Content::Text(oid::decode_relative_oid(bytes, offset)?),
        ContentKind::Ascii if bytes.is_ascii() => {
            Content::Text(bytes.iter().map(|&b| b as char).collect())
        }
        ContentKind::Utf8 => match std::str::from_utf8(bytes) {
            Ok(text) => Content::Text(text.to_string()),
            Err(_) => Content::Bytes(bytes.to_vec()),
        },
        ContentKind::Ascii | ContentKind::Opaque => Content::Bytes(bytes.to_vec()),
    };
    Ok(Body::Content(content))
}

/// Encode the content of a primitive node
///
/// Byte contents are taken as already-encoded octets for every type that
/// carries content. For BOOLEAN, INTEGER, ENUMERATED and the object
/// identifiers those octets must be something the decoder accepts.
///
/// # Error Handling
/// Returns `Serialization` when the content kind cannot be encoded for the
/// tag, e.g. text for an INTEGER or non-ASCII text for a PrintableString.
pub fn encode_content(tag: Tag, content: Option<&Content>) -> AomResult<Vec<u8>> {
    let kind = kind_of(tag);
    let content = match (kind, content) {
        (ContentKind::Empty, None) => return Ok(Vec::new()),
        (ContentKind::Empty, Some(content)) => {
            return Err(AomError::Serialization(format!(
                "{} cannot carry content, found {}",
                tag,
                content.kind()
            )));
        }
        (_, None) => {
            return Err(AomError::Serialization(format!("{} requires content", tag)));
        }
        (_, Some(content)) => content,
    };

    match (kind, content) {
        (
            ContentKind::Integer
            | ContentKind::Boolean
            | ContentKind::ObjectIdentifier
            | ContentKind::RelativeOid,
            Content::Bytes(bytes),
        ) => {
            // Pre-encoded octets must decode back as the same type
            decode_content(tag, bytes, 0).map_err(|e| {
                AomError::Serialization(format!("pre-encoded {} content is not valid: {}", tag, e))
            })?;
            Ok(bytes.clone())
        }
        (_, Content::Bytes(bytes)) => Ok(bytes.clone()),
        (ContentKind::Integer, Content::Integer(value)) => Ok(encode_integer(*value)),
        (ContentKind::Integer, Content::BigInteger(value)) => Ok(value.to_signed_bytes_be()),
        (ContentKind::Boolean, Content::Boolean(value)) => Ok(vec![if *value { 0xFF } else { 0x00 }]),
        (ContentKind::ObjectIdentifier, Content::Text(dotted)) => oid::encode_oid(dotted),
        (ContentKind::RelativeOid, Content::Text(dotted)) => oid::encode_relative_oid(dotted),
        (ContentKind::Ascii, Content::Text(text)) => {
            if !text.is_ascii() {
                return Err(AomError::Serialization(format!(
                    "cannot encode non-ASCII text {:?} as {}",
                    text, tag
                )));
            }
            Ok(text.as_bytes().to_vec())
        }
        (ContentKind::Utf8 | ContentKind::Opaque, Content::Text(text)) => Ok(text.as_bytes().to_vec()),
        (_, other) => Err(AomError::Serialization(format!(
            "cannot encode {} content as {}",
            other.kind(),
            tag
        ))),
    }
}

/// Decode big-endian two's complement, natively up to six octets
///
/// # Decoding Format
/// - Up to [`NATIVE_INTEGER_BYTES`] octets: sign-extended into an `i64`
/// - Wider content: `BigInt` from the signed big-endian octets
///
/// Non-minimal content (a redundant leading 0x00 or 0xFF) is accepted.
fn decode_integer(bytes: &[u8], offset: usize) -> AomResult<Content> {
    if bytes.is_empty() {
        return Err(AomError::invalid_data(offset, 0, "empty integer encoding"));
    }

    if bytes.len() > NATIVE_INTEGER_BYTES {
        return Ok(Content::BigInteger(BigInt::from_signed_bytes_be(bytes)));
    }

    let mut value = 0i64;
    for &byte in bytes {
        value = (value << 8) | (byte as i64);
    }

    // Sign extend: fill upper bits with the sign bit
    let shift = 64 - (bytes.len() * 8);
    value = (value << shift) >> shift;

    Ok(Content::Integer(value))
}

/// Minimal two's complement representation of a native integer
///
/// # Minimal Encoding
/// DER requires the fewest octets that keep the sign: 127 is `7F`, 128 is
/// `00 80` and -129 is `FF 7F`.
fn encode_integer(value: i64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }

    let mut bytes = Vec::new();
    if value < 0 {
        let mut temp = value;
        while temp != -1 {
            bytes.push((temp & 0xFF) as u8);
            temp >>= 8;
        }
        // Keep the sign bit set on the leading octet
        if bytes.is_empty() || (bytes[bytes.len() - 1] & 0x80) == 0 {
            bytes.push(0xFF);
        }
    } else {
        let mut temp = value;
        while temp > 0 {
            bytes.push((temp & 0xFF) as u8);
            temp >>= 8;
        }
        // Keep the sign bit clear on the leading octet
        if (bytes[bytes.len() - 1] & 0x80) != 0 {
            bytes.push(0x00);
        }
    }

    bytes.reverse(); // Big-endian
    bytes
}

fn decode_boolean(bytes: &[u8], offset: usize) -> AomResult<bool> {
    match bytes {
        [0x00] => Ok(false),
        [0xFF] => Ok(true),
        [other] => Err(AomError::invalid_data(
            offset,
            1,
            format!("boolean must be 0x00 or 0xff in DER, found {:#04x}", other),
        )),
        _ => Err(AomError::invalid_data(
            offset,
            bytes.len(),
            format!("boolean must have exactly 1 content byte, found {}", bytes.len()),
        )),
    }
}
