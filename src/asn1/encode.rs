//! DER serialization of element trees.
//!
//! Encoding is a pure fold over the tree: tag octets, minimal definite
//! length, content. Constructed nodes concatenate each child's full
//! encoding in stored order; SET sorting happened at construction, never
//! here, so a parsed tree re-encodes to its original bytes.

use {
    super::{length, Asn1Element},
    bytes::{BufMut, BytesMut},
};

impl Asn1Element {
    /// The complete DER encoding of this element.
    pub fn to_der(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(self.der_len());
        self.write_der(&mut buffer);
        buffer.to_vec()
    }

    /// Hex rendering of the DER bytes, the matched inverse of
    /// [`Asn1Element::parse_der_hex`].
    pub fn to_der_hex(&self) -> String {
        hex::encode_upper(self.to_der())
    }

    pub fn write_der<B: BufMut>(&self, buffer: &mut B) {
        self.tag().write_der(buffer);
        length::write_length(buffer, self.content_len());
        match self {
            Self::Primitive { content, .. } | Self::PrimitiveOctetString { content } => {
                buffer.put_slice(content);
            }
            Self::Sequence { children }
            | Self::Set { children }
            | Self::Tagged { children, .. }
            | Self::EncapsulatingOctetString { children } => {
                for child in children {
                    child.write_der(buffer);
                }
            }
        }
    }

    /// Total encoded size: tag, length octets, content.
    pub fn der_len(&self) -> usize {
        let content_len = self.content_len();
        self.tag().encoded_len() + length::encoded_len(content_len) + content_len
    }

    fn content_len(&self) -> usize {
        match self {
            Self::Primitive { content, .. } | Self::PrimitiveOctetString { content } => {
                content.len()
            }
            Self::Sequence { children }
            | Self::Set { children }
            | Self::Tagged { children, .. }
            | Self::EncapsulatingOctetString { children } => {
                children.iter().map(Self::der_len).sum()
            }
        }
    }
}
