//! Abstract object model nodes
//!
//! A [`Node`] is an immutable value: it is built once (by a decoder, by a
//! typed constructor, or from another representation) and then handed to an
//! encoder. There are no setters.

use crate::content::Content;
use crate::error::{AomError, AomResult};
use crate::types::{EncodingForm, LegalForms, TagClass, UniversalType};
use num_bigint::BigInt;
use std::fmt;

/// Highest tag number that fits the low five bits of an identifier octet
pub const MAX_SHORT_TAG_NUMBER: u8 = 30;

/// Tag of a node: its class together with its type
///
/// Universal tags name one of the 31 well-known types; the other classes carry
/// a raw tag number (0-30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Universal(UniversalType),
    Application(u8),
    ContextSpecific(u8),
    Private(u8),
}

impl Tag {
    /// Create a tag from a class and a tag number
    ///
    /// # Error Handling
    /// Returns `UnknownUniversalType` for a Universal number above 30 and
    /// `UnsupportedAsn1Data` for any other class with a number above 30
    /// (long-form tag numbers are not supported).
    pub fn new(class: TagClass, number: u8) -> AomResult<Self> {
        if class == TagClass::Universal {
            return UniversalType::resolve(number).map(Tag::Universal);
        }
        if number > MAX_SHORT_TAG_NUMBER {
            return Err(AomError::unsupported(
                0,
                format!("{} tag number {} needs the long tag form", class, number),
            ));
        }
        Ok(match class {
            TagClass::Application => Tag::Application(number),
            TagClass::ContextSpecific => Tag::ContextSpecific(number),
            _ => Tag::Private(number),
        })
    }

    /// Tag class
    pub fn class(&self) -> TagClass {
        match self {
            Tag::Universal(_) => TagClass::Universal,
            Tag::Application(_) => TagClass::Application,
            Tag::ContextSpecific(_) => TagClass::ContextSpecific,
            Tag::Private(_) => TagClass::Private,
        }
    }

    /// Tag number (0-30)
    pub fn number(&self) -> u8 {
        match self {
            Tag::Universal(ty) => ty.tag_number(),
            Tag::Application(n) | Tag::ContextSpecific(n) | Tag::Private(n) => *n,
        }
    }

    /// Universal type, if this is a Universal tag
    pub fn universal(&self) -> Option<UniversalType> {
        match self {
            Tag::Universal(ty) => Some(*ty),
            _ => None,
        }
    }

    /// Encoding forms allowed for this tag; non-Universal tags allow both
    pub fn legal_forms(&self) -> LegalForms {
        match self {
            Tag::Universal(ty) => ty.legal_forms(),
            _ => LegalForms::Either,
        }
    }

    /// NULL and EOC never carry content
    pub fn is_contentless(&self) -> bool {
        matches!(
            self,
            Tag::Universal(UniversalType::Null) | Tag::Universal(UniversalType::EndOfContent)
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Universal(ty) => write!(f, "{}", ty),
            other => write!(f, "[{} {}]", other.class(), other.number()),
        }
    }
}

/// What a node holds besides its tag and encoding form
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Nothing at all (NULL, EOC)
    Empty,
    /// Semantic value of a primitive node
    Content(Content),
    /// Nested nodes of a constructed node, in stored order
    Children(Vec<Node>),
}

/// A node of the abstract object model
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: Tag,
    encoding: EncodingForm,
    body: Body,
}

impl Node {
    /// Build a node from its parts, checking the model invariants
    ///
    /// - constructed nodes carry children, primitive nodes never do
    /// - NULL and EOC carry neither content nor children
    /// - only NULL and EOC may be empty
    ///
    /// The encoding form is not checked against the tag's legal forms here;
    /// the DER encoder does that.
    pub fn from_parts(tag: Tag, encoding: EncodingForm, body: Body) -> AomResult<Self> {
        match (&body, encoding) {
            (Body::Children(_), EncodingForm::Primitive) => {
                return Err(AomError::InvalidContent(format!(
                    "primitive {} cannot carry children",
                    tag
                )));
            }
            (Body::Content(_) | Body::Empty, EncodingForm::Constructed) => {
                return Err(AomError::InvalidContent(format!(
                    "constructed {} must carry children",
                    tag
                )));
            }
            (Body::Content(_), _) if tag.is_contentless() => {
                return Err(AomError::InvalidContent(format!("{} cannot carry content", tag)));
            }
            (Body::Empty, _) if !tag.is_contentless() => {
                return Err(AomError::InvalidContent(format!("{} requires content", tag)));
            }
            _ => {}
        }
        Ok(Self { tag, encoding, body })
    }

    /// Primitive node with content
    pub fn primitive(tag: Tag, content: impl Into<Content>) -> Self {
        Self {
            tag,
            encoding: EncodingForm::Primitive,
            body: Body::Content(content.into()),
        }
    }

    /// Constructed node with children
    pub fn constructed(tag: Tag, children: Vec<Node>) -> Self {
        Self {
            tag,
            encoding: EncodingForm::Constructed,
            body: Body::Children(children),
        }
    }

    /// Primitive node with no content octets
    ///
    /// NULL and EOC get an empty body; any other tag gets empty byte content.
    ///
    /// # Error Handling
    /// Returns `InvalidContent` for BOOLEAN, INTEGER, ENUMERATED, OBJECT
    /// IDENTIFIER and RELATIVE-OID, which DER never encodes empty.
    pub fn empty(tag: Tag) -> AomResult<Self> {
        if tag.universal().is_some_and(UniversalType::needs_content_octets) {
            return Err(AomError::InvalidContent(format!(
                "{} cannot have empty content",
                tag
            )));
        }
        let body = if tag.is_contentless() {
            Body::Empty
        } else {
            Body::Content(Content::Bytes(Vec::new()))
        };
        Ok(Self {
            tag,
            encoding: EncodingForm::Primitive,
            body,
        })
    }

    fn universal(ty: UniversalType, content: impl Into<Content>) -> Self {
        Self::primitive(Tag::Universal(ty), content)
    }

    pub fn sequence(children: Vec<Node>) -> Self {
        Self::constructed(Tag::Universal(UniversalType::Sequence), children)
    }

    /// SET node; children keep the order given here
    pub fn set(children: Vec<Node>) -> Self {
        Self::constructed(Tag::Universal(UniversalType::Set), children)
    }

    pub fn null() -> Self {
        Self {
            tag: Tag::Universal(UniversalType::Null),
            encoding: EncodingForm::Primitive,
            body: Body::Empty,
        }
    }

    pub fn end_of_content() -> Self {
        Self {
            tag: Tag::Universal(UniversalType::EndOfContent),
            encoding: EncodingForm::Primitive,
            body: Body::Empty,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::universal(UniversalType::Boolean, value)
    }

    pub fn integer(value: i64) -> Self {
        Self::universal(UniversalType::Integer, Content::integer(value))
    }

    pub fn big_integer(value: BigInt) -> Self {
        Self::universal(UniversalType::Integer, Content::integer(value))
    }

    pub fn enumerated(value: i64) -> Self {
        Self::universal(UniversalType::Enumerated, Content::integer(value))
    }

    /// OBJECT IDENTIFIER in dotted form, e.g. `"1.2.840.113549.1.1.1"`
    pub fn oid(dotted: &str) -> Self {
        Self::universal(UniversalType::ObjectIdentifier, dotted)
    }

    /// RELATIVE-OID in dotted form, e.g. `"8571.3.2"`
    pub fn relative_oid(dotted: &str) -> Self {
        Self::universal(UniversalType::RelativeOid, dotted)
    }

    pub fn printable_string(text: &str) -> Self {
        Self::universal(UniversalType::PrintableString, text)
    }

    pub fn ia5_string(text: &str) -> Self {
        Self::universal(UniversalType::Ia5String, text)
    }

    pub fn numeric_string(text: &str) -> Self {
        Self::universal(UniversalType::NumericString, text)
    }

    pub fn utf8_string(text: &str) -> Self {
        Self::universal(UniversalType::Utf8String, text)
    }

    pub fn octet_string(bytes: &[u8]) -> Self {
        Self::universal(UniversalType::OctetString, bytes)
    }

    /// BIT STRING; `bytes` includes the leading unused-bits octet
    pub fn bit_string(bytes: &[u8]) -> Self {
        Self::universal(UniversalType::BitString, bytes)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn tag_class(&self) -> TagClass {
        self.tag.class()
    }

    pub fn encoding(&self) -> EncodingForm {
        self.encoding
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Content of a primitive node
    pub fn content(&self) -> Option<&Content> {
        match &self.body {
            Body::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Children of a constructed node
    pub fn children(&self) -> Option<&[Node]> {
        match &self.body {
            Body::Children(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_constructed(&self) -> bool {
        self.encoding == EncodingForm::Constructed
    }
}
