//! Semantic content values carried by primitive AOM nodes

use num_bigint::BigInt;
use std::fmt;

/// Widest INTEGER content, in octets, held as a native `i64`
///
/// Wider integers are held as [`BigInt`]. Six two's-complement octets cover
/// `-2^47 ..= 2^47 - 1`.
pub const NATIVE_INTEGER_BYTES: usize = 6;

/// Smallest native integer value
pub const NATIVE_INTEGER_MIN: i64 = -(1i64 << 47);

/// Largest native integer value
pub const NATIVE_INTEGER_MAX: i64 = (1i64 << 47) - 1;

/// Content of a primitive node
///
/// Equality compares encoded values: integers compare numerically whichever
/// representation holds them, and text compares equal to the byte sequence of
/// its UTF-8 encoding.
#[derive(Debug, Clone)]
pub enum Content {
    /// Integer within the native range
    Integer(i64),
    /// Integer outside the native range
    BigInteger(BigInt),
    /// Boolean value
    Boolean(bool),
    /// Decoded text, also used for dotted object identifiers
    Text(String),
    /// Opaque octets
    Bytes(Vec<u8>),
}

impl Content {
    /// Build integer content, choosing the native representation when the
    /// value fits it
    pub fn integer(value: impl Into<BigInt>) -> Self {
        let value = value.into();
        match i64::try_from(&value) {
            Ok(native) if (NATIVE_INTEGER_MIN..=NATIVE_INTEGER_MAX).contains(&native) => {
                Content::Integer(native)
            }
            _ => Content::BigInteger(value),
        }
    }

    /// Integer value regardless of representation
    pub fn to_big_integer(&self) -> Option<BigInt> {
        match self {
            Content::Integer(value) => Some(BigInt::from(*value)),
            Content::BigInteger(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Text value, if this is text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Raw bytes, if this is opaque content
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Content::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Short description of the content kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Integer(_) => "integer",
            Content::BigInteger(_) => "big integer",
            Content::Boolean(_) => "boolean",
            Content::Text(_) => "text",
            Content::Bytes(_) => "bytes",
        }
    }

    fn is_integer(&self) -> bool {
        matches!(self, Content::Integer(_) | Content::BigInteger(_))
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Integer(a), Content::Integer(b)) => a == b,
            (a, b) if a.is_integer() && b.is_integer() => a.to_big_integer() == b.to_big_integer(),
            (Content::Boolean(a), Content::Boolean(b)) => a == b,
            (Content::Text(a), Content::Text(b)) => a == b,
            (Content::Bytes(a), Content::Bytes(b)) => a == b,
            (Content::Text(text), Content::Bytes(bytes))
            | (Content::Bytes(bytes), Content::Text(text)) => text.as_bytes() == bytes.as_slice(),
            _ => false,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Integer(value) => write!(f, "{}", value),
            Content::BigInteger(value) => write!(f, "{}", value),
            Content::Boolean(value) => write!(f, "{}", value),
            Content::Text(text) => write!(f, "{:?}", text),
            Content::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Content {
    fn from(value: i64) -> Self {
        Content::integer(value)
    }
}

impl From<BigInt> for Content {
    fn from(value: BigInt) -> Self {
        Content::integer(value)
    }
}

impl From<bool> for Content {
    fn from(value: bool) -> Self {
        Content::Boolean(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Content {
    fn from(value: Vec<u8>) -> Self {
        Content::Bytes(value)
    }
}

impl From<&[u8]> for Content {
    fn from(value: &[u8]) -> Self {
        Content::Bytes(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_normalizes_to_native() {
        assert!(matches!(Content::integer(BigInt::from(42)), Content::Integer(42)));
        assert!(matches!(
            Content::integer(NATIVE_INTEGER_MIN),
            Content::Integer(NATIVE_INTEGER_MIN)
        ));
        assert!(matches!(
            Content::integer(NATIVE_INTEGER_MAX + 1),
            Content::BigInteger(_)
        ));
    }

    #[test]
    fn test_integer_equality_across_representations() {
        let max_safe = (1i64 << 53) - 1;
        assert_eq!(Content::Integer(max_safe), Content::BigInteger(BigInt::from(max_safe)));
        assert_ne!(Content::Integer(1), Content::BigInteger(BigInt::from(2)));
        assert_ne!(Content::Integer(1), Content::Boolean(true));
    }

    #[test]
    fn test_text_equals_its_utf8_bytes() {
        assert_eq!(Content::from("US"), Content::from(b"US".to_vec()));
        assert_ne!(Content::from("US"), Content::from(b"UK".to_vec()));
    }
}
