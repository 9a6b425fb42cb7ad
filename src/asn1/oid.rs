//! Object identifiers: dotted-arc values with the X.690 base-128 wire form.

use {
    super::{Asn1Decode, Asn1DecodeTagged, Asn1Element, Asn1Encode, Asn1Error, Result, Tag},
    std::{
        borrow::Cow,
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

/// An OBJECT IDENTIFIER as a sequence of arcs.
///
/// The wire form packs the first two arcs into a single base-128 value
/// `40 * arc1 + arc2`, so `arc1 <= 2`, and `arc2 < 40` when `arc1 < 2`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectIdentifier(Cow<'static, [u64]>);

impl ObjectIdentifier {
    /// Builds an OID from its arcs, validating the root-arc constraints.
    pub fn new(arcs: impl Into<Vec<u64>>) -> Result<Self> {
        let oid = Self(Cow::Owned(arcs.into()));
        oid.check()?;
        Ok(oid)
    }

    /// Constructs from a static arc table without validation; intended for
    /// the well-known OID constants. Invalid arcs surface on encode.
    pub const fn from_static(arcs: &'static [u64]) -> Self {
        Self(Cow::Borrowed(arcs))
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    fn check(&self) -> Result<()> {
        let arcs = self.arcs();
        if arcs.len() < 2 {
            return Err(Asn1Error::invalid_content(
                "OBJECT IDENTIFIER needs at least two arcs",
            ));
        }
        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
            return Err(Asn1Error::invalid_content(format!(
                "invalid OBJECT IDENTIFIER root arcs {}.{}",
                arcs[0], arcs[1]
            )));
        }
        Ok(())
    }

    pub(crate) fn encode_content(&self) -> Result<Vec<u8>> {
        self.check()?;
        let arcs = self.arcs();
        let first = 40 * arcs[0] + arcs[1];
        let mut content = Vec::with_capacity(arcs.len() + 4);
        put_base128(&mut content, first);
        for &arc in &arcs[2..] {
            put_base128(&mut content, arc);
        }
        Ok(content)
    }

    pub(crate) fn decode_content(content: &[u8]) -> Result<Self> {
        if content.is_empty() {
            return Err(Asn1Error::invalid_content(
                "OBJECT IDENTIFIER content is empty",
            ));
        }
        let mut arcs = Vec::new();
        let mut value = 0u64;
        let mut continuing = false;
        for &byte in content {
            if !continuing && byte == 0x80 {
                return Err(Asn1Error::invalid_content(
                    "OBJECT IDENTIFIER arc has a leading zero octet",
                ));
            }
            if value >> 57 != 0 {
                return Err(Asn1Error::invalid_content("OBJECT IDENTIFIER arc overflow"));
            }
            value = value << 7 | u64::from(byte & 0x7f);
            continuing = byte & 0x80 != 0;
            if !continuing {
                if arcs.is_empty() {
                    let (first, second) = match value {
                        0..=39 => (0, value),
                        40..=79 => (1, value - 40),
                        _ => (2, value - 80),
                    };
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(value);
                }
                value = 0;
            }
        }
        if continuing {
            return Err(Asn1Error::invalid_content(
                "OBJECT IDENTIFIER ends mid-arc",
            ));
        }
        Ok(Self(Cow::Owned(arcs)))
    }
}

fn put_base128(content: &mut Vec<u8>, value: u64) {
    let septets = if value == 0 {
        0
    } else {
        (63 - value.leading_zeros() as usize) / 7
    };
    for i in (0..=septets).rev() {
        let septet = (value >> (7 * i)) as u8 & 0x7f;
        content.push(if i == 0 { septet } else { septet | 0x80 });
    }
}

impl Asn1Encode for ObjectIdentifier {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        Asn1Element::oid(self)
    }
}

impl Asn1Decode for ObjectIdentifier {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        src.read_oid()
    }
}

/// OIDs occur implicitly retagged in several ICAO and PKIX structures; the
/// content grammar is tag-independent, so one routine serves both.
impl Asn1DecodeTagged for ObjectIdentifier {
    fn decode_from_tlv_tagged(src: &Asn1Element, tag_override: Option<Tag>) -> Result<Self> {
        match tag_override {
            None => src.read_oid(),
            Some(expected) => {
                let (actual, content) = src.as_primitive()?;
                if actual != expected {
                    return Err(Asn1Error::TagMismatch { expected, actual });
                }
                Self::decode_content(content)
            }
        }
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut arcs = self.arcs().iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
            for arc in arcs {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Asn1Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>().map_err(|_| {
                    Asn1Error::invalid_content(format!("invalid OBJECT IDENTIFIER arc {arc:?}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(arcs)
    }
}
