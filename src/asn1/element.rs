//! The element tree: a closed set of node variants representing any parsed
//! or constructed ASN.1 value.
//!
//! Trees are immutable values, built once (by the parser or the builder)
//! and consumed once into bytes or absorbed by a parent structure. Adding a
//! new variant is a compile-time exhaustiveness change everywhere the tree
//! is matched.

use {
    super::{
        string::Asn1String,
        time::Asn1Time,
        value, Asn1Error, ObjectIdentifier, Result, Tag,
    },
    chrono::{DateTime, Utc},
};

/// An ASN.1 element.
///
/// `SET OF` is not a distinct variant: it is a [`Set`](Self::Set) whose
/// children share one tag, produced by [`Asn1Element::set_of`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asn1Element {
    /// Leaf with opaque content; semantics determined by the tag.
    Primitive { tag: Tag, content: Vec<u8> },

    /// Primitive OCTET STRING holding raw bytes.
    PrimitiveOctetString { content: Vec<u8> },

    /// SEQUENCE; child order is semantically significant and preserved
    /// verbatim.
    Sequence { children: Vec<Asn1Element> },

    /// SET; DER canonicality requires children sorted by tag, which is a
    /// construction-time concern. Parsed sets keep their wire order.
    Set { children: Vec<Asn1Element> },

    /// Constructed element under an override (or otherwise non-universal)
    /// tag.
    Tagged { tag: Tag, children: Vec<Asn1Element> },

    /// Constructed OCTET STRING whose content is itself a DER tree, as used
    /// for wrapped extension values and fragmented BER octet strings.
    EncapsulatingOctetString { children: Vec<Asn1Element> },
}

impl Asn1Element {
    /// The element's tag, the uniform key used for sorting and matching.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Primitive { tag, .. } => *tag,
            Self::PrimitiveOctetString { .. } => Tag::OCTET_STRING,
            Self::Sequence { .. } => Tag::SEQUENCE,
            Self::Set { .. } => Tag::SET,
            Self::Tagged { tag, .. } => *tag,
            Self::EncapsulatingOctetString { .. } => Tag::OCTET_STRING_CONSTRUCTED,
        }
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "Primitive",
            Self::PrimitiveOctetString { .. } => "PrimitiveOctetString",
            Self::Sequence { .. } => "Sequence",
            Self::Set { .. } => "Set",
            Self::Tagged { .. } => "Tagged",
            Self::EncapsulatingOctetString { .. } => "EncapsulatingOctetString",
        }
    }

    fn unexpected(&self, expected: &'static str) -> Asn1Error {
        Asn1Error::UnexpectedElementType {
            expected,
            actual: self.variant_name(),
        }
    }

    // Variant-checked projections.

    /// Tag and content of a leaf. [`PrimitiveOctetString`]
    /// (Self::PrimitiveOctetString) projects as a leaf with the OCTET
    /// STRING tag.
    pub fn as_primitive(&self) -> Result<(Tag, &[u8])> {
        match self {
            Self::Primitive { tag, content } => Ok((*tag, content)),
            Self::PrimitiveOctetString { content } => Ok((Tag::OCTET_STRING, content)),
            _ => Err(self.unexpected("Primitive")),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Asn1Element]> {
        match self {
            Self::Sequence { children } => Ok(children),
            _ => Err(self.unexpected("Sequence")),
        }
    }

    pub fn as_set(&self) -> Result<&[Asn1Element]> {
        match self {
            Self::Set { children } => Ok(children),
            _ => Err(self.unexpected("Set")),
        }
    }

    pub fn as_tagged(&self) -> Result<(Tag, &[Asn1Element])> {
        match self {
            Self::Tagged { tag, children } => Ok((*tag, children)),
            _ => Err(self.unexpected("Tagged")),
        }
    }

    pub fn as_octet_string(&self) -> Result<&[u8]> {
        match self {
            Self::PrimitiveOctetString { content } => Ok(content),
            Self::Primitive {
                tag: Tag::OCTET_STRING,
                content,
            } => Ok(content),
            _ => Err(self.unexpected("PrimitiveOctetString")),
        }
    }

    pub fn as_encapsulating_octet_string(&self) -> Result<&[Asn1Element]> {
        match self {
            Self::EncapsulatingOctetString { children } => Ok(children),
            _ => Err(self.unexpected("EncapsulatingOctetString")),
        }
    }

    /// Children of any constructed variant.
    pub fn children(&self) -> Option<&[Asn1Element]> {
        match self {
            Self::Sequence { children }
            | Self::Set { children }
            | Self::Tagged { children, .. }
            | Self::EncapsulatingOctetString { children } => Some(children),
            Self::Primitive { .. } | Self::PrimitiveOctetString { .. } => None,
        }
    }

    // Constructors.

    pub fn sequence(children: Vec<Asn1Element>) -> Self {
        Self::Sequence { children }
    }

    /// SET with children stable-sorted by ascending tag; ties keep insertion
    /// order.
    pub fn set(mut children: Vec<Asn1Element>) -> Self {
        children.sort_by_key(Asn1Element::tag);
        Self::Set { children }
    }

    /// SET OF: all children must share one tag ([`Asn1Error::TagMismatch`]
    /// otherwise); sorted by ascending full-encoding byte sequence.
    pub fn set_of(children: Vec<Asn1Element>) -> Result<Self> {
        if let Some(first) = children.first() {
            let expected = first.tag();
            if let Some(odd) = children.iter().find(|child| child.tag() != expected) {
                return Err(Asn1Error::TagMismatch {
                    expected,
                    actual: odd.tag(),
                });
            }
        }
        let mut keyed: Vec<(Vec<u8>, Asn1Element)> = children
            .into_iter()
            .map(|child| (child.to_der(), child))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(Self::Set {
            children: keyed.into_iter().map(|(_, child)| child).collect(),
        })
    }

    /// Wraps `children` under an EXPLICIT context-specific tag.
    pub fn explicitly_tagged(number: u64, children: Vec<Asn1Element>) -> Self {
        Self::Tagged {
            tag: Tag::explicit(number),
            children,
        }
    }

    /// Replaces this element's tag with an IMPLICIT context-specific tag,
    /// preserving the primitive/constructed nature of the value.
    pub fn with_implicit_tag(self, number: u64) -> Self {
        match self {
            Self::Primitive { content, .. } => Self::Primitive {
                tag: Tag::implicit(number, false),
                content,
            },
            Self::PrimitiveOctetString { content } => Self::Primitive {
                tag: Tag::implicit(number, false),
                content,
            },
            Self::Sequence { children }
            | Self::Set { children }
            | Self::Tagged { children, .. }
            | Self::EncapsulatingOctetString { children } => Self::Tagged {
                tag: Tag::implicit(number, true),
                children,
            },
        }
    }

    pub fn null() -> Self {
        Self::Primitive {
            tag:     Tag::NULL,
            content: Vec::new(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::Primitive {
            tag:     Tag::BOOLEAN,
            content: value::encode_boolean(value),
        }
    }

    pub fn integer(value: i64) -> Self {
        Self::Primitive {
            tag:     Tag::INTEGER,
            content: value::encode_i64(value),
        }
    }

    pub fn integer_u64(value: u64) -> Self {
        Self::Primitive {
            tag:     Tag::INTEGER,
            content: value::encode_u64(value),
        }
    }

    /// INTEGER from an unsigned big-endian magnitude (keys, serials).
    pub fn integer_unsigned(magnitude: &[u8]) -> Self {
        Self::Primitive {
            tag:     Tag::INTEGER,
            content: value::encode_unsigned_bytes(magnitude),
        }
    }

    /// INTEGER from pre-encoded two's-complement content, validated for
    /// minimality.
    pub fn integer_content(content: Vec<u8>) -> Result<Self> {
        value::check_integer_content(&content)?;
        Ok(Self::Primitive {
            tag: Tag::INTEGER,
            content,
        })
    }

    pub fn octet_string(content: impl Into<Vec<u8>>) -> Self {
        Self::PrimitiveOctetString {
            content: content.into(),
        }
    }

    pub fn encapsulating_octet_string(children: Vec<Asn1Element>) -> Self {
        Self::EncapsulatingOctetString { children }
    }

    pub fn bit_string(bits: &[u8]) -> Self {
        Self::Primitive {
            tag:     Tag::BIT_STRING,
            content: value::encode_bit_string(bits),
        }
    }

    pub fn oid(oid: &ObjectIdentifier) -> Result<Self> {
        Ok(Self::Primitive {
            tag:     Tag::OBJECT_IDENTIFIER,
            content: oid.encode_content()?,
        })
    }

    pub fn string(value: &Asn1String) -> Self {
        Self::Primitive {
            tag:     value.tag(),
            content: value.value().as_bytes().to_vec(),
        }
    }

    pub fn utf8_string(value: impl Into<String>) -> Self {
        Self::string(&Asn1String::utf8(value))
    }

    pub fn printable_string(value: impl Into<String>) -> Result<Self> {
        Ok(Self::string(&Asn1String::printable(value)?))
    }

    pub fn time(value: Asn1Time) -> Self {
        Self::Primitive {
            tag:     value.tag(),
            content: value.encode_content(),
        }
    }

    // Typed readers. Each verifies the tag, then the content grammar.

    fn expect_content(&self, expected: Tag) -> Result<&[u8]> {
        let (tag, content) = self.as_primitive()?;
        if tag != expected {
            return Err(Asn1Error::TagMismatch {
                expected,
                actual: tag,
            });
        }
        Ok(content)
    }

    pub fn read_boolean(&self) -> Result<bool> {
        value::decode_boolean(self.expect_content(Tag::BOOLEAN)?)
    }

    pub fn read_integer(&self) -> Result<i128> {
        value::decode_integer(self.expect_content(Tag::INTEGER)?)
    }

    pub fn read_u64(&self) -> Result<u64> {
        let value = self.read_integer()?;
        u64::try_from(value).map_err(|_| {
            Asn1Error::invalid_content(format!("INTEGER {value} is out of range for u64"))
        })
    }

    /// Raw minimal two's-complement INTEGER content, for values wider than
    /// 128 bits (moduli, serial numbers).
    pub fn read_integer_bytes(&self) -> Result<&[u8]> {
        let content = self.expect_content(Tag::INTEGER)?;
        value::check_integer_content(content)?;
        Ok(content)
    }

    pub fn read_bit_string(&self) -> Result<&[u8]> {
        value::decode_bit_string(self.expect_content(Tag::BIT_STRING)?)
    }

    pub fn read_octet_string(&self) -> Result<&[u8]> {
        self.as_octet_string()
    }

    pub fn read_oid(&self) -> Result<ObjectIdentifier> {
        ObjectIdentifier::decode_content(self.expect_content(Tag::OBJECT_IDENTIFIER)?)
    }

    pub fn read_string(&self) -> Result<Asn1String> {
        let (tag, content) = self.as_primitive()?;
        Asn1String::decode_content(tag, content)
    }

    pub fn read_time(&self) -> Result<Asn1Time> {
        let (tag, content) = self.as_primitive()?;
        Asn1Time::decode_content(tag, content)
    }

    pub fn read_instant(&self) -> Result<DateTime<Utc>> {
        Ok(self.read_time()?.instant())
    }

    pub fn read_null(&self) -> Result<()> {
        let content = self.expect_content(Tag::NULL)?;
        if content.is_empty() {
            Ok(())
        } else {
            Err(Asn1Error::invalid_content("NULL content must be empty"))
        }
    }
}
