//! ASN.1 character string types.

use {
    super::{Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, Result, Tag},
    std::fmt::{self, Display, Formatter},
};

/// A UTF8String or PrintableString value.
///
/// PrintableString enforces its restricted character set at construction,
/// so an instance is always encodable.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Asn1String {
    Utf8(String),
    Printable(String),
}

impl Asn1String {
    pub fn utf8(value: impl Into<String>) -> Self {
        Self::Utf8(value.into())
    }

    /// Fails with [`Asn1Error::InvalidContent`] when `value` contains
    /// characters outside the PrintableString set (letters, digits, space,
    /// and `'()+,-./:=?`).
    pub fn printable(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match value.chars().find(|&c| !is_printable(c)) {
            None => Ok(Self::Printable(value)),
            Some(c) => Err(Asn1Error::invalid_content(format!(
                "character {c:?} is not allowed in a PrintableString"
            ))),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Utf8(value) | Self::Printable(value) => value,
        }
    }

    pub fn tag(&self) -> Tag {
        match self {
            Self::Utf8(_) => Tag::UTF8_STRING,
            Self::Printable(_) => Tag::PRINTABLE_STRING,
        }
    }

    pub(crate) fn decode_content(tag: Tag, content: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(content)
            .map_err(|_| Asn1Error::invalid_content("string content is not valid UTF-8"))?;
        match tag {
            Tag::UTF8_STRING => Ok(Self::utf8(text)),
            Tag::PRINTABLE_STRING => Self::printable(text),
            _ => Err(Asn1Error::TagMismatch {
                expected: Tag::UTF8_STRING,
                actual:   tag,
            }),
        }
    }
}

impl Asn1Encode for Asn1String {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        Ok(Asn1Element::string(self))
    }
}

impl Asn1Decode for Asn1String {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        src.read_string()
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?')
}

impl Display for Asn1String {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_charset() {
        assert!(Asn1String::printable("Test User 1, c=AT (dev)").is_ok());
        assert!(Asn1String::printable("name@example.com").is_err());
        assert!(Asn1String::printable("stern*").is_err());
        assert!(Asn1String::printable("umlaut ä").is_err());
    }

    #[test]
    fn test_utf8_accepts_anything() {
        let s = Asn1String::utf8("grüezi 👋");
        assert_eq!(s.tag(), Tag::UTF8_STRING);
        assert_eq!(s.value(), "grüezi 👋");
    }

    #[test]
    fn test_decode_by_tag() {
        let s = Asn1String::decode_content(Tag::PRINTABLE_STRING, b"Hello").unwrap();
        assert_eq!(s, Asn1String::Printable("Hello".into()));
        // Printable charset is enforced on decode too.
        assert!(Asn1String::decode_content(Tag::PRINTABLE_STRING, b"a@b").is_err());
        assert!(Asn1String::decode_content(Tag::UTF8_STRING, &[0xff, 0xfe]).is_err());
        assert!(Asn1String::decode_content(Tag::INTEGER, b"Hello").is_err());
    }
}
