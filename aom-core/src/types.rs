//! ASN.1 type registry (tag classes, encoding forms, Universal types)
//!
//! All tables here are immutable and process-wide. Lookups accept either the
//! symbolic name of an entry or its numeric value, see [`Key`].

use crate::error::{AomError, AomResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookup key for the registry: a symbolic name or a numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Symbolic name, e.g. `"context specific"` or `"printableString"`
    Name(&'a str),
    /// Numeric value, e.g. `0x80` for a tag class or `19` for a Universal type
    Value(u8),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name.as_str())
    }
}

impl From<u8> for Key<'_> {
    fn from(value: u8) -> Self {
        Key::Value(value)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "\"{}\"", name),
            Key::Value(value) => write!(f, "{:#04x}", value),
        }
    }
}

/// Names compare without case, spaces, dashes or underscores, so that
/// `"context specific"`, `"ContextSpecific"` and `"CONTEXT_SPECIFIC"` agree.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn name_matches(candidate: &str, normalized_key: &str) -> bool {
    normalize(candidate) == normalized_key
}

/// ASN.1 tag class
///
/// The discriminant is the class bits already shifted into place in the
/// identifier octet (bits 8-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagClass {
    /// Universal class (00)
    #[serde(rename = "universal")]
    Universal = 0x00,
    /// Application class (01)
    #[serde(rename = "application")]
    Application = 0x40,
    /// Context-specific class (10)
    #[serde(rename = "context specific")]
    ContextSpecific = 0x80,
    /// Private class (11)
    #[serde(rename = "private")]
    Private = 0xC0,
}

impl TagClass {
    /// All tag classes in identifier order
    pub const ALL: [TagClass; 4] = [
        TagClass::Universal,
        TagClass::Application,
        TagClass::ContextSpecific,
        TagClass::Private,
    ];

    /// Bits 8-7 of an identifier octet
    pub const MASK: u8 = 0xC0;

    /// Get tag class from an identifier octet (bits 8-7)
    pub fn from_identifier(octet: u8) -> Self {
        match octet & Self::MASK {
            0x00 => TagClass::Universal,
            0x40 => TagClass::Application,
            0x80 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Class bits as they appear in the identifier octet
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Symbolic name used by the JSON object model
    pub fn name(self) -> &'static str {
        match self {
            TagClass::Universal => "universal",
            TagClass::Application => "application",
            TagClass::ContextSpecific => "context specific",
            TagClass::Private => "private",
        }
    }

    /// Resolve a tag class from its symbolic name or its numeric value
    ///
    /// # Error Handling
    /// Returns `UnknownTagClass` when nothing matches the key.
    pub fn resolve<'a>(key: impl Into<Key<'a>>) -> AomResult<Self> {
        let key = key.into();
        let found = match key {
            Key::Name(name) => {
                let wanted = normalize(name);
                Self::ALL.into_iter().find(|class| name_matches(class.name(), &wanted))
            }
            Key::Value(value) => Self::ALL.into_iter().find(|class| class.value() == value),
        };
        found.ok_or_else(|| AomError::UnknownTagClass(key.to_string()))
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoding form of a value (bit 6 of the identifier octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingForm {
    /// Content octets are the value itself
    #[serde(rename = "primitive")]
    Primitive = 0x00,
    /// Content octets are a series of nested TLVs
    #[serde(rename = "constructed")]
    Constructed = 0x20,
}

impl EncodingForm {
    /// Both encoding forms
    pub const ALL: [EncodingForm; 2] = [EncodingForm::Primitive, EncodingForm::Constructed];

    /// Bit 6 of an identifier octet
    pub const MASK: u8 = 0x20;

    /// Get encoding form from an identifier octet (bit 6)
    pub fn from_identifier(octet: u8) -> Self {
        if octet & Self::MASK != 0 {
            EncodingForm::Constructed
        } else {
            EncodingForm::Primitive
        }
    }

    /// Form bit as it appears in the identifier octet
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Symbolic name used by the JSON object model
    pub fn name(self) -> &'static str {
        match self {
            EncodingForm::Primitive => "primitive",
            EncodingForm::Constructed => "constructed",
        }
    }

    /// Resolve an encoding form from its symbolic name or its numeric value
    ///
    /// # Error Handling
    /// Returns `UnknownEncodingForm` when nothing matches the key.
    pub fn resolve<'a>(key: impl Into<Key<'a>>) -> AomResult<Self> {
        let key = key.into();
        let found = match key {
            Key::Name(name) => {
                let wanted = normalize(name);
                Self::ALL.into_iter().find(|form| name_matches(form.name(), &wanted))
            }
            Key::Value(value) => Self::ALL.into_iter().find(|form| form.value() == value),
        };
        found.ok_or_else(|| AomError::UnknownEncodingForm(key.to_string()))
    }
}

impl fmt::Display for EncodingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoding forms a type may legally use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalForms {
    /// Primitive encoding only
    Primitive,
    /// Constructed encoding only
    Constructed,
    /// Either form
    Either,
}

impl LegalForms {
    /// Check whether `form` is allowed
    pub fn allows(self, form: EncodingForm) -> bool {
        match self {
            LegalForms::Primitive => form == EncodingForm::Primitive,
            LegalForms::Constructed => form == EncodingForm::Constructed,
            LegalForms::Either => true,
        }
    }
}

/// The 31 Universal class types (tag numbers 0-30)
///
/// The discriminant is the Universal tag number. Tag number 31 introduces
/// long-form tag numbers and has no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniversalType {
    #[serde(rename = "endOfContent")]
    EndOfContent = 0,
    #[serde(rename = "boolean")]
    Boolean = 1,
    #[serde(rename = "integer")]
    Integer = 2,
    #[serde(rename = "bitString")]
    BitString = 3,
    #[serde(rename = "octetString")]
    OctetString = 4,
    #[serde(rename = "null")]
    Null = 5,
    #[serde(rename = "oid")]
    ObjectIdentifier = 6,
    #[serde(rename = "odesc")]
    ObjectDescriptor = 7,
    #[serde(rename = "external")]
    External = 8,
    #[serde(rename = "float")]
    Real = 9,
    #[serde(rename = "enumerated")]
    Enumerated = 10,
    #[serde(rename = "embeddedPDV")]
    EmbeddedPdv = 11,
    #[serde(rename = "utf8String")]
    Utf8String = 12,
    #[serde(rename = "roid")]
    RelativeOid = 13,
    #[serde(rename = "reserved14")]
    Reserved14 = 14,
    #[serde(rename = "reserved15")]
    Reserved15 = 15,
    #[serde(rename = "sequence")]
    Sequence = 16,
    #[serde(rename = "set")]
    Set = 17,
    #[serde(rename = "numericString")]
    NumericString = 18,
    #[serde(rename = "printableString")]
    PrintableString = 19,
    #[serde(rename = "t61String")]
    T61String = 20,
    #[serde(rename = "videotexString")]
    VideotexString = 21,
    #[serde(rename = "ia5String")]
    Ia5String = 22,
    #[serde(rename = "utcTime")]
    UtcTime = 23,
    #[serde(rename = "generalizedTime")]
    GeneralizedTime = 24,
    #[serde(rename = "graphicString")]
    GraphicString = 25,
    #[serde(rename = "visibleString")]
    VisibleString = 26,
    #[serde(rename = "generalString")]
    GeneralString = 27,
    #[serde(rename = "universalString")]
    UniversalString = 28,
    #[serde(rename = "characterString")]
    CharacterString = 29,
    #[serde(rename = "bmpString")]
    BmpString = 30,
}

impl UniversalType {
    /// Every Universal type, indexed by tag number
    pub const ALL: [UniversalType; 31] = [
        UniversalType::EndOfContent,
        UniversalType::Boolean,
        UniversalType::Integer,
        UniversalType::BitString,
        UniversalType::OctetString,
        UniversalType::Null,
        UniversalType::ObjectIdentifier,
        UniversalType::ObjectDescriptor,
        UniversalType::External,
        UniversalType::Real,
        UniversalType::Enumerated,
        UniversalType::EmbeddedPdv,
        UniversalType::Utf8String,
        UniversalType::RelativeOid,
        UniversalType::Reserved14,
        UniversalType::Reserved15,
        UniversalType::Sequence,
        UniversalType::Set,
        UniversalType::NumericString,
        UniversalType::PrintableString,
        UniversalType::T61String,
        UniversalType::VideotexString,
        UniversalType::Ia5String,
        UniversalType::UtcTime,
        UniversalType::GeneralizedTime,
        UniversalType::GraphicString,
        UniversalType::VisibleString,
        UniversalType::GeneralString,
        UniversalType::UniversalString,
        UniversalType::CharacterString,
        UniversalType::BmpString,
    ];

    /// Universal tag number (0-30)
    pub fn tag_number(self) -> u8 {
        self as u8
    }

    /// Look up a type by tag number
    pub fn from_tag_number(number: u8) -> Option<Self> {
        Self::ALL.get(number as usize).copied()
    }

    /// Symbolic name used by the JSON object model
    pub fn name(self) -> &'static str {
        match self {
            UniversalType::EndOfContent => "endOfContent",
            UniversalType::Boolean => "boolean",
            UniversalType::Integer => "integer",
            UniversalType::BitString => "bitString",
            UniversalType::OctetString => "octetString",
            UniversalType::Null => "null",
            UniversalType::ObjectIdentifier => "oid",
            UniversalType::ObjectDescriptor => "odesc",
            UniversalType::External => "external",
            UniversalType::Real => "float",
            UniversalType::Enumerated => "enumerated",
            UniversalType::EmbeddedPdv => "embeddedPDV",
            UniversalType::Utf8String => "utf8String",
            UniversalType::RelativeOid => "roid",
            UniversalType::Reserved14 => "reserved14",
            UniversalType::Reserved15 => "reserved15",
            UniversalType::Sequence => "sequence",
            UniversalType::Set => "set",
            UniversalType::NumericString => "numericString",
            UniversalType::PrintableString => "printableString",
            UniversalType::T61String => "t61String",
            UniversalType::VideotexString => "videotexString",
            UniversalType::Ia5String => "ia5String",
            UniversalType::UtcTime => "utcTime",
            UniversalType::GeneralizedTime => "generalizedTime",
            UniversalType::GraphicString => "graphicString",
            UniversalType::VisibleString => "visibleString",
            UniversalType::GeneralString => "generalString",
            UniversalType::UniversalString => "universalString",
            UniversalType::CharacterString => "characterString",
            UniversalType::BmpString => "bmpString",
        }
    }

    /// Name as written in X.680
    pub fn asn1_name(self) -> &'static str {
        match self {
            UniversalType::EndOfContent => "EOC",
            UniversalType::Boolean => "BOOLEAN",
            UniversalType::Integer => "INTEGER",
            UniversalType::BitString => "BIT STRING",
            UniversalType::OctetString => "OCTET STRING",
            UniversalType::Null => "NULL",
            UniversalType::ObjectIdentifier => "OBJECT IDENTIFIER",
            UniversalType::ObjectDescriptor => "ObjectDescriptor",
            UniversalType::External => "EXTERNAL",
            UniversalType::Real => "REAL",
            UniversalType::Enumerated => "ENUMERATED",
            UniversalType::EmbeddedPdv => "EMBEDDED PDV",
            UniversalType::Utf8String => "UTF8String",
            UniversalType::RelativeOid => "RELATIVE-OID",
            UniversalType::Reserved14 => "RESERVED 14",
            UniversalType::Reserved15 => "RESERVED 15",
            UniversalType::Sequence => "SEQUENCE",
            UniversalType::Set => "SET",
            UniversalType::NumericString => "NumericString",
            UniversalType::PrintableString => "PrintableString",
            UniversalType::T61String => "T61String",
            UniversalType::VideotexString => "VideotexString",
            UniversalType::Ia5String => "IA5String",
            UniversalType::UtcTime => "UTCTime",
            UniversalType::GeneralizedTime => "GeneralizedTime",
            UniversalType::GraphicString => "GraphicString",
            UniversalType::VisibleString => "VisibleString",
            UniversalType::GeneralString => "GeneralString",
            UniversalType::UniversalString => "UniversalString",
            UniversalType::CharacterString => "CHARACTER STRING",
            UniversalType::BmpString => "BMPString",
        }
    }

    /// Types whose content is never zero octets long in DER
    pub fn needs_content_octets(self) -> bool {
        matches!(
            self,
            UniversalType::Boolean
                | UniversalType::Integer
                | UniversalType::ObjectIdentifier
                | UniversalType::Enumerated
                | UniversalType::RelativeOid
        )
    }

    /// Encoding forms this type may use
    pub fn legal_forms(self) -> LegalForms {
        match self {
            UniversalType::EndOfContent
            | UniversalType::Boolean
            | UniversalType::Integer
            | UniversalType::Null
            | UniversalType::ObjectIdentifier
            | UniversalType::Real
            | UniversalType::Enumerated
            | UniversalType::RelativeOid => LegalForms::Primitive,
            UniversalType::External
            | UniversalType::EmbeddedPdv
            | UniversalType::Sequence
            | UniversalType::Set => LegalForms::Constructed,
            _ => LegalForms::Either,
        }
    }

    /// Resolve a Universal type from its symbolic name, its X.680 name or its
    /// tag number
    ///
    /// # Error Handling
    /// Returns `UnknownUniversalType` when nothing matches the key.
    pub fn resolve<'a>(key: impl Into<Key<'a>>) -> AomResult<Self> {
        let key = key.into();
        let found = match key {
            Key::Name(name) => {
                let wanted = normalize(name);
                Self::ALL.into_iter().find(|ty| {
                    name_matches(ty.name(), &wanted) || name_matches(ty.asn1_name(), &wanted)
                })
            }
            Key::Value(value) => Self::from_tag_number(value),
        };
        found.ok_or_else(|| AomError::UnknownUniversalType(key.to_string()))
    }
}

impl fmt::Display for UniversalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
