//! Tag octets: class, constructed bit, multi-byte tag numbers.

use {
    super::{Asn1Error, Result},
    bytes::BufMut,
    std::{
        cmp::Ordering,
        fmt::{self, Display, Formatter},
    },
};

/// The four ASN.1 tag classes, from the top two bits of the leading octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    const fn bits(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::ContextSpecific => 0x80,
            Self::Private => 0xc0,
        }
    }
}

/// A fully decoded ASN.1 tag.
///
/// Tag numbers up to [`u64::MAX`] are supported; continuation sequences
/// overflowing that fail with [`Asn1Error::MalformedTag`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Tag {
    pub class:       TagClass,
    pub constructed: bool,
    pub number:      u64,
}

impl Tag {
    pub const BIT_STRING: Tag = Tag::universal(3);
    pub const BOOLEAN: Tag = Tag::universal(1);
    pub const GENERALIZED_TIME: Tag = Tag::universal(24);
    pub const INTEGER: Tag = Tag::universal(2);
    pub const NULL: Tag = Tag::universal(5);
    pub const OBJECT_IDENTIFIER: Tag = Tag::universal(6);
    pub const OCTET_STRING: Tag = Tag::universal(4);
    /// Constructed OCTET STRING, the shell of an encapsulated DER tree.
    pub const OCTET_STRING_CONSTRUCTED: Tag = Tag::universal(4).as_constructed();
    pub const PRINTABLE_STRING: Tag = Tag::universal(19);
    pub const SEQUENCE: Tag = Tag::universal(16).as_constructed();
    pub const SET: Tag = Tag::universal(17).as_constructed();
    pub const UTC_TIME: Tag = Tag::universal(23);
    pub const UTF8_STRING: Tag = Tag::universal(12);

    pub const fn universal(number: u64) -> Self {
        Self {
            class: TagClass::Universal,
            constructed: false,
            number,
        }
    }

    pub const fn as_constructed(self) -> Self {
        Self {
            class: self.class,
            constructed: true,
            number: self.number,
        }
    }

    /// Context-specific override tag for EXPLICIT tagging. Explicit tagging
    /// wraps the inner TLV, so the override is always constructed.
    pub const fn explicit(number: u64) -> Self {
        Self {
            class: TagClass::ContextSpecific,
            constructed: true,
            number,
        }
    }

    /// Context-specific override tag for IMPLICIT tagging. Implicit tagging
    /// replaces the inner tag, inheriting the wrapped value's constructed
    /// flag.
    pub const fn implicit(number: u64, constructed: bool) -> Self {
        Self {
            class: TagClass::ContextSpecific,
            constructed,
            number,
        }
    }

    /// Reads tag octets from the start of `input`. Returns the tag and the
    /// number of bytes consumed. `at` is the absolute offset of `input`,
    /// used for error context only.
    pub fn parse(input: &[u8], at: usize) -> Result<(Self, usize)> {
        let first = *input.first().ok_or(Asn1Error::MalformedTag {
            offset: at,
            reason: "unexpected end of input",
        })?;
        let class = match first >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        };
        let constructed = first & 0x20 != 0;
        if first & 0x1f != 0x1f {
            let tag = Self {
                class,
                constructed,
                number: u64::from(first & 0x1f),
            };
            return Ok((tag, 1));
        }

        // High tag number form: base-128 continuation octets.
        let mut number = 0u64;
        for (i, &byte) in input[1..].iter().enumerate() {
            number = number
                .checked_shl(7)
                .filter(|_| number >> 57 == 0)
                .ok_or(Asn1Error::MalformedTag {
                    offset: at,
                    reason: "tag number overflow",
                })?
                | u64::from(byte & 0x7f);
            if byte & 0x80 == 0 {
                let tag = Self {
                    class,
                    constructed,
                    number,
                };
                return Ok((tag, i + 2));
            }
        }
        Err(Asn1Error::MalformedTag {
            offset: at,
            reason: "unterminated continuation sequence",
        })
    }

    /// Writes the minimal encoding of this tag.
    pub fn write_der<B: BufMut>(&self, buffer: &mut B) {
        let leading = self.class.bits() | if self.constructed { 0x20 } else { 0x00 };
        if self.number < 0x1f {
            buffer.put_u8(leading | self.number as u8);
        } else {
            buffer.put_u8(leading | 0x1f);
            let septets = (63 - self.number.leading_zeros() as usize) / 7;
            for i in (0..=septets).rev() {
                let septet = (self.number >> (7 * i)) as u8 & 0x7f;
                buffer.put_u8(if i == 0 { septet } else { septet | 0x80 });
            }
        }
    }

    pub fn encoded_len(&self) -> usize {
        if self.number < 0x1f {
            1
        } else {
            2 + (63 - self.number.leading_zeros() as usize) / 7
        }
    }

    fn leading_octet(&self) -> u8 {
        let low = if self.number < 0x1f {
            self.number as u8
        } else {
            0x1f
        };
        self.class.bits() | if self.constructed { 0x20 } else { 0x00 } | low
    }
}

/// Lexicographic order of the encoded tag octets, the DER SET sort key.
/// Minimal base-128 encodings of equal leading octets compare the same as
/// the numbers themselves.
impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.leading_octet(), self.number).cmp(&(other.leading_octet(), other.number))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let class = match self.class {
            TagClass::Universal => "UNIVERSAL",
            TagClass::Application => "APPLICATION",
            TagClass::ContextSpecific => "CONTEXT",
            TagClass::Private => "PRIVATE",
        };
        let form = if self.constructed {
            "constructed"
        } else {
            "primitive"
        };
        write!(f, "[{class} {}] ({form})", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_low_tag() {
        let (tag, consumed) = Tag::parse(&[0x30], 0).unwrap();
        assert_eq!(tag, Tag::SEQUENCE);
        assert_eq!(consumed, 1);

        let (tag, consumed) = Tag::parse(&[0x02, 0x01], 0).unwrap();
        assert_eq!(tag, Tag::INTEGER);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_high_tag_number_roundtrip() {
        // Tag number 31 forces the continuation-octet form.
        for number in [31, 127, 128, 16383, 16384, u64::from(u32::MAX)] {
            let tag = Tag::implicit(number, true);
            let mut bytes = Vec::new();
            tag.write_der(&mut bytes);
            assert_eq!(bytes.len(), tag.encoded_len());
            let (parsed, consumed) = Tag::parse(&bytes, 0).unwrap();
            assert_eq!(parsed, tag);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn test_tag_number_31_wire_form() {
        let mut bytes = Vec::new();
        Tag::explicit(31).write_der(&mut bytes);
        assert_eq!(bytes, [0xbf, 0x1f]);
    }

    #[test]
    fn test_unterminated_continuation() {
        let err = Tag::parse(&[0x1f, 0x81], 3).unwrap_err();
        assert!(matches!(err, Asn1Error::MalformedTag { offset: 3, .. }));
    }

    #[test]
    fn test_tag_number_overflow() {
        let mut bytes = vec![0x1f];
        bytes.extend([0xff; 10]);
        bytes.push(0x7f);
        let err = Tag::parse(&bytes, 0).unwrap_err();
        assert!(matches!(err, Asn1Error::MalformedTag { .. }));
    }

    #[test]
    fn test_sort_order_matches_encoding() {
        let mut tags = vec![
            Tag::explicit(0),
            Tag::SET,
            Tag::BOOLEAN,
            Tag::implicit(40, false),
            Tag::INTEGER,
        ];
        tags.sort();
        let encodings: Vec<Vec<u8>> = tags
            .iter()
            .map(|tag| {
                let mut bytes = Vec::new();
                tag.write_der(&mut bytes);
                bytes
            })
            .collect();
        let mut sorted = encodings.clone();
        sorted.sort();
        assert_eq!(encodings, sorted);
    }
}
