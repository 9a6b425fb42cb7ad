//! Signature values and their wire forms.
//!
//! Native providers hand over ECDSA signatures as fixed-width raw `r ‖ s`
//! blocks while the X.509 world expects DER `SEQUENCE { r, s }`; RSA and
//! HMAC signatures are opaque blocks in both worlds. Conversions here are
//! bit-for-bit in both directions.

use {
    super::{magnitude, SignatureAlgorithm},
    crate::asn1::{asn1_sequence, Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, Result},
};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CryptoSignature {
    EcDsa {
        /// Big-endian r, no leading zeros.
        r: Vec<u8>,
        /// Big-endian s, no leading zeros.
        s: Vec<u8>,
    },
    /// Raw fixed-width signature block (RSA or HMAC).
    RsaOrHmac(Vec<u8>),
}

impl CryptoSignature {
    /// Splits a provider-layout ECDSA signature (`r ‖ s`, equal fixed
    /// widths) into its components.
    pub fn ecdsa_from_raw(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() || raw.len() % 2 != 0 {
            return Err(Asn1Error::invalid_content(format!(
                "raw ECDSA signature of {} bytes cannot be split into r and s",
                raw.len()
            )));
        }
        let (r, s) = raw.split_at(raw.len() / 2);
        Ok(Self::EcDsa {
            r: trim_zeros(r),
            s: trim_zeros(s),
        })
    }

    /// Reassembles the provider layout, padding each component to
    /// `width` bytes.
    pub fn ecdsa_to_raw(&self, width: usize) -> Result<Vec<u8>> {
        let Self::EcDsa { r, s } = self else {
            return Err(Asn1Error::UnexpectedElementType {
                expected: "EcDsa",
                actual:   "RsaOrHmac",
            });
        };
        if r.len() > width || s.len() > width {
            return Err(Asn1Error::invalid_content(format!(
                "signature components of {} and {} bytes exceed width {width}",
                r.len(),
                s.len()
            )));
        }
        let mut raw = vec![0; 2 * width];
        raw[width - r.len()..width].copy_from_slice(r);
        raw[2 * width - s.len()..].copy_from_slice(s);
        Ok(raw)
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self::RsaOrHmac(bytes.into())
    }

    /// The bits carried in a certificate's `signatureValue` BIT STRING:
    /// the DER `SEQUENCE { r, s }` for ECDSA, the raw block otherwise.
    pub(crate) fn wire_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::EcDsa { .. } => self.encode_to_der(),
            Self::RsaOrHmac(bytes) => Ok(bytes.clone()),
        }
    }

    /// Inverse of [`CryptoSignature::wire_bytes`]; the algorithm decides
    /// which layout the bits are in.
    pub(crate) fn from_wire_bytes(algorithm: SignatureAlgorithm, bits: &[u8]) -> Result<Self> {
        if algorithm.is_ec() {
            Self::decode_from_der(bits)
        } else {
            Ok(Self::RsaOrHmac(bits.to_vec()))
        }
    }
}

fn trim_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

impl Asn1Encode for CryptoSignature {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        match self {
            Self::EcDsa { r, s } => asn1_sequence(|b| {
                b.append(Asn1Element::integer_unsigned(r))
                    .append(Asn1Element::integer_unsigned(s))
            }),
            Self::RsaOrHmac(bytes) => Ok(Asn1Element::bit_string(bytes)),
        }
    }
}

impl Asn1Decode for CryptoSignature {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        match src {
            Asn1Element::Sequence { .. } => {
                let [r, s] = src.as_sequence()? else {
                    return Err(Asn1Error::invalid_content(
                        "ECDSA signature must be a two-element SEQUENCE",
                    ));
                };
                Ok(Self::EcDsa {
                    r: magnitude(r.read_integer_bytes()?)?,
                    s: magnitude(s.read_integer_bytes()?)?,
                })
            }
            Asn1Element::Primitive { .. } => Ok(Self::RsaOrHmac(src.read_bit_string()?.to_vec())),
            _ => Err(Asn1Error::UnexpectedElementType {
                expected: "Sequence",
                actual:   src.variant_name(),
            }),
        }
    }
}
