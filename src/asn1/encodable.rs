//! The generic encode/decode contract higher-level types implement against
//! the element tree.
//!
//! One fallible core (`Result`) carries all the logic; the `*_or_none`
//! adapters are thin boundary conveniences with identical success-path
//! semantics. Byte- and hex-level wrappers compose with the parser and the
//! encoder.

use super::{element::Asn1Element, Result, Tag};

/// Types that can render themselves as an ASN.1 element.
pub trait Asn1Encode {
    /// Builds the TLV tree for this value. Fails with a structured ASN.1
    /// error when the value is internally inconsistent.
    fn encode_to_tlv(&self) -> Result<Asn1Element>;

    /// Directly produces the DER encoding.
    fn encode_to_der(&self) -> Result<Vec<u8>> {
        Ok(self.encode_to_tlv()?.to_der())
    }

    /// Hex rendering of the DER encoding, for embedding in text formats.
    fn encode_to_der_hex(&self) -> Result<String> {
        Ok(self.encode_to_tlv()?.to_der_hex())
    }

    /// Error-free version of [`Asn1Encode::encode_to_tlv`].
    fn encode_to_tlv_or_none(&self) -> Option<Asn1Element> {
        self.encode_to_tlv().ok()
    }

    /// Error-free version of [`Asn1Encode::encode_to_der`].
    fn encode_to_der_or_none(&self) -> Option<Vec<u8>> {
        self.encode_to_der().ok()
    }
}

/// Types that can be recovered from an ASN.1 element.
pub trait Asn1Decode: Sized {
    /// Processes an element into an instance. Fails on structurally wrong
    /// input: wrong tag, wrong child count or types.
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self>;

    /// Directly decodes from DER bytes.
    fn decode_from_der(src: &[u8]) -> Result<Self> {
        Self::decode_from_tlv(&Asn1Element::parse(src)?)
    }

    /// Decodes from a hex rendering of DER bytes.
    fn decode_from_der_hex(src: &str) -> Result<Self> {
        Self::decode_from_tlv(&Asn1Element::parse_der_hex(src)?)
    }

    /// Error-free version of [`Asn1Decode::decode_from_tlv`].
    fn decode_from_tlv_or_none(src: &Asn1Element) -> Option<Self> {
        Self::decode_from_tlv(src).ok()
    }

    /// Error-free version of [`Asn1Decode::decode_from_der`].
    fn decode_from_der_or_none(src: &[u8]) -> Option<Self> {
        Self::decode_from_der(src).ok()
    }
}

/// Tag-verifying decode with an optional implicit-tag override, letting one
/// routine serve both universally-tagged and context-specific-retagged
/// occurrences of the same structure.
pub trait Asn1DecodeTagged: Asn1Decode {
    /// Same as [`Asn1Decode::decode_from_tlv`], but with `tag_override` the
    /// element is expected to carry that (implicit) tag instead of the
    /// type's universal one.
    fn decode_from_tlv_tagged(src: &Asn1Element, tag_override: Option<Tag>) -> Result<Self>;

    fn decode_from_der_tagged(src: &[u8], tag_override: Option<Tag>) -> Result<Self> {
        Self::decode_from_tlv_tagged(&Asn1Element::parse(src)?, tag_override)
    }

    /// Error-free version of [`Asn1DecodeTagged::decode_from_tlv_tagged`].
    fn decode_from_tlv_tagged_or_none(src: &Asn1Element, tag_override: Option<Tag>) -> Option<Self> {
        Self::decode_from_tlv_tagged(src, tag_override).ok()
    }
}

/// An element trivially encodes as itself; useful where generic code wants
/// to pass raw trees through contract-shaped interfaces.
impl Asn1Encode for Asn1Element {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        Ok(self.clone())
    }
}

impl Asn1Decode for Asn1Element {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        Ok(src.clone())
    }
}
