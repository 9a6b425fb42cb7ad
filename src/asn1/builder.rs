//! Declarative construction of element trees.
//!
//! Each nesting call opens a fresh child builder, runs the caller's closure
//! against it, and folds the produced children into the enclosing node
//! under the collection's semantics (sequences append in order, sets apply
//! the DER sorting rules). The only fallible construction is SET OF tag
//! homogeneity; the first such error is recorded and surfaced by the root
//! constructor, so well-formed blocks never fail and nothing is swallowed.
//!
//! ```
//! use x690_tlv::asn1::asn1_sequence;
//!
//! let element = asn1_sequence(|b| {
//!     b.int(3)
//!         .utf8_string("Foo")
//!         .set_of(|b| b.int(3).int(1).int(2))
//!         .tagged(0, |b| b.bool(true))
//! })
//! .unwrap();
//! ```

use {
    super::{
        element::Asn1Element, string::Asn1String, time::Asn1Time, Asn1Encode, Asn1Error,
        ObjectIdentifier, Result,
    },
    chrono::{DateTime, Utc},
};

/// Collector for the children of one nesting level.
#[derive(Debug, Default)]
pub struct Asn1Builder {
    elements: Vec<Asn1Element>,
    error:    Option<Asn1Error>,
}

impl Asn1Builder {
    fn push(mut self, element: Asn1Element) -> Self {
        self.elements.push(element);
        self
    }

    fn push_result(self, element: Result<Asn1Element>) -> Self {
        match element {
            Ok(element) => self.push(element),
            Err(error) => self.fail(error),
        }
    }

    fn fail(mut self, error: Asn1Error) -> Self {
        self.error.get_or_insert(error);
        self
    }

    fn finish(self) -> Result<Vec<Asn1Element>> {
        match self.error {
            None => Ok(self.elements),
            Some(error) => Err(error),
        }
    }

    /// Appends an already-built element.
    pub fn append(self, element: Asn1Element) -> Self {
        self.push(element)
    }

    /// Appends anything implementing the encodable contract.
    pub fn encodable(self, value: &impl Asn1Encode) -> Self {
        let element = value.encode_to_tlv();
        self.push_result(element)
    }

    pub fn bool(self, value: bool) -> Self {
        self.push(Asn1Element::boolean(value))
    }

    pub fn int(self, value: i64) -> Self {
        self.push(Asn1Element::integer(value))
    }

    pub fn uint(self, value: u64) -> Self {
        self.push(Asn1Element::integer_u64(value))
    }

    pub fn null(self) -> Self {
        self.push(Asn1Element::null())
    }

    pub fn octet_string(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.push(Asn1Element::octet_string(bytes))
    }

    pub fn bit_string(self, bits: &[u8]) -> Self {
        self.push(Asn1Element::bit_string(bits))
    }

    pub fn oid(self, oid: &ObjectIdentifier) -> Self {
        let element = Asn1Element::oid(oid);
        self.push_result(element)
    }

    pub fn utf8_string(self, value: impl Into<String>) -> Self {
        self.push(Asn1Element::utf8_string(value))
    }

    pub fn printable_string(self, value: impl Into<String>) -> Self {
        let element = Asn1Element::printable_string(value);
        self.push_result(element)
    }

    pub fn string(self, value: &Asn1String) -> Self {
        self.push(Asn1Element::string(value))
    }

    pub fn time(self, value: Asn1Time) -> Self {
        self.push(Asn1Element::time(value))
    }

    pub fn utc_time(self, instant: DateTime<Utc>) -> Self {
        self.time(Asn1Time::with_format(instant, super::TimeFormat::Utc))
    }

    pub fn generalized_time(self, instant: DateTime<Utc>) -> Self {
        self.time(Asn1Time::with_format(
            instant,
            super::TimeFormat::Generalized,
        ))
    }

    /// Nested SEQUENCE; children keep the closure's order.
    pub fn sequence(self, init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Self {
        self.nest(init, |children| Ok(Asn1Element::sequence(children)))
    }

    /// Nested SET; children are sorted by tag.
    pub fn set(self, init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Self {
        self.nest(init, |children| Ok(Asn1Element::set(children)))
    }

    /// Nested SET OF; children must share one tag and are sorted by their
    /// encoding.
    pub fn set_of(self, init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Self {
        self.nest(init, Asn1Element::set_of)
    }

    /// The closure's result is encapsulated into an OCTET STRING.
    pub fn octet_string_encapsulated(self, init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Self {
        self.nest(init, |children| {
            Ok(Asn1Element::encapsulating_octet_string(children))
        })
    }

    /// EXPLICITLY tags and encapsulates the closure's result.
    pub fn tagged(self, number: u64, init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Self {
        self.nest(init, move |children| {
            Ok(Asn1Element::explicitly_tagged(number, children))
        })
    }

    fn nest(
        self,
        init: impl FnOnce(Asn1Builder) -> Asn1Builder,
        fold: impl FnOnce(Vec<Asn1Element>) -> Result<Asn1Element>,
    ) -> Self {
        match init(Asn1Builder::default()).finish().and_then(fold) {
            Ok(element) => self.push(element),
            Err(error) => self.fail(error),
        }
    }
}

fn root(
    init: impl FnOnce(Asn1Builder) -> Asn1Builder,
    fold: impl FnOnce(Vec<Asn1Element>) -> Result<Asn1Element>,
) -> Result<Asn1Element> {
    fold(init(Asn1Builder::default()).finish()?)
}

/// Creates a new SEQUENCE.
pub fn asn1_sequence(init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Result<Asn1Element> {
    root(init, |children| Ok(Asn1Element::sequence(children)))
}

/// Creates a new SET. Children are sorted by tag.
pub fn asn1_set(init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Result<Asn1Element> {
    root(init, |children| Ok(Asn1Element::set(children)))
}

/// Creates a new SET OF. Children must share one tag and are sorted by
/// their encoded value.
pub fn asn1_set_of(init: impl FnOnce(Asn1Builder) -> Asn1Builder) -> Result<Asn1Element> {
    root(init, Asn1Element::set_of)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::asn1::Tag, anyhow::Result};

    #[test]
    fn test_builder_matches_direct_construction() -> Result<()> {
        let built = asn1_sequence(|b| {
            b.int(3)
                .bool(false)
                .sequence(|b| b.null().utf8_string("Foo"))
        })?;
        let direct = Asn1Element::sequence(vec![
            Asn1Element::integer(3),
            Asn1Element::boolean(false),
            Asn1Element::sequence(vec![Asn1Element::null(), Asn1Element::utf8_string("Foo")]),
        ]);
        assert_eq!(built, direct);
        Ok(())
    }

    #[test]
    fn test_set_of_sorting_from_builder() -> Result<()> {
        // DER encoding enforces sorting here, so the result switches those.
        let set = asn1_set_of(|b| {
            b.printable_string("World")
                .printable_string("Hello")
        })?;
        let children = set.as_set()?;
        assert_eq!(children[0].read_string()?.value(), "Hello");
        assert_eq!(children[1].read_string()?.value(), "World");
        Ok(())
    }

    #[test]
    fn test_set_sorts_by_tag_from_builder() -> Result<()> {
        let set = asn1_set(|b| {
            b.printable_string("World")
                .printable_string("Hello")
                .utf8_string("!!!")
        })?;
        let children = set.as_set()?;
        // UTF8String (12) sorts before PrintableString (19); equal tags keep
        // insertion order.
        assert_eq!(children[0].tag(), Tag::UTF8_STRING);
        assert_eq!(children[1].read_string()?.value(), "World");
        assert_eq!(children[2].read_string()?.value(), "Hello");
        Ok(())
    }

    #[test]
    fn test_set_of_mixed_tags_propagates() {
        let result = asn1_sequence(|b| b.set_of(|b| b.int(1).bool(true)));
        assert!(matches!(
            result,
            Err(crate::asn1::Asn1Error::TagMismatch { .. })
        ));
    }

    #[test]
    fn test_tagged_applies_explicit_tag() -> Result<()> {
        let element = asn1_sequence(|b| b.tagged(31, |b| b.bool(false)))?;
        let children = element.as_sequence()?;
        let (tag, inner) = children[0].as_tagged()?;
        assert_eq!(tag, Tag::explicit(31));
        assert!(!inner[0].read_boolean()?);
        Ok(())
    }

    #[test]
    fn test_octet_string_encapsulated() -> Result<()> {
        let element = asn1_sequence(|b| {
            b.octet_string_encapsulated(|b| b.printable_string("Hello").printable_string("World"))
        })?;
        let children = element.as_sequence()?;
        let inner = children[0].as_encapsulating_octet_string()?;
        assert_eq!(inner.len(), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_printable_string_surfaces() {
        assert!(asn1_sequence(|b| b.printable_string("nope@example")).is_err());
    }
}
