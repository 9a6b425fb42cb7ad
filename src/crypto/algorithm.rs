//! Signature and digest algorithm identifiers.

use {
    super::oids,
    crate::asn1::{
        asn1_sequence, Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, ObjectIdentifier, Result,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Digest {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Digest {
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Self::Sha1 => oids::SHA1,
            Self::Sha256 => oids::SHA256,
            Self::Sha384 => oids::SHA384,
            Self::Sha512 => oids::SHA512,
        }
    }
}

/// The signature algorithms this crate can name in an X.509
/// `AlgorithmIdentifier`. Actual signing and verification belong to a
/// native provider; only the encoding lives here.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SignatureAlgorithm {
    /// ECDSA with SHA-2 over a named curve.
    Es256,
    Es384,
    Es512,
    /// RSA PKCS#1 v1.5.
    Rs1,
    Rs256,
    Rs384,
    Rs512,
    /// HMAC with SHA-2.
    Hs256,
    Hs384,
    Hs512,
}

impl SignatureAlgorithm {
    pub fn digest(self) -> Digest {
        match self {
            Self::Rs1 => Digest::Sha1,
            Self::Es256 | Self::Rs256 | Self::Hs256 => Digest::Sha256,
            Self::Es384 | Self::Rs384 | Self::Hs384 => Digest::Sha384,
            Self::Es512 | Self::Rs512 | Self::Hs512 => Digest::Sha512,
        }
    }

    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Self::Es256 => oids::ECDSA_WITH_SHA256,
            Self::Es384 => oids::ECDSA_WITH_SHA384,
            Self::Es512 => oids::ECDSA_WITH_SHA512,
            Self::Rs1 => oids::SHA1_WITH_RSA_ENCRYPTION,
            Self::Rs256 => oids::SHA256_WITH_RSA_ENCRYPTION,
            Self::Rs384 => oids::SHA384_WITH_RSA_ENCRYPTION,
            Self::Rs512 => oids::SHA512_WITH_RSA_ENCRYPTION,
            Self::Hs256 => oids::HMAC_WITH_SHA256,
            Self::Hs384 => oids::HMAC_WITH_SHA384,
            Self::Hs512 => oids::HMAC_WITH_SHA512,
        }
    }

    /// Signatures in ECDSA form are DER `SEQUENCE { r, s }`; everything
    /// else is a fixed-width raw block.
    pub fn is_ec(self) -> bool {
        matches!(self, Self::Es256 | Self::Es384 | Self::Es512)
    }

    /// RSA and HMAC identifiers carry an explicit NULL parameter field,
    /// ECDSA ones omit it.
    fn has_null_parameters(self) -> bool {
        !self.is_ec()
    }

    fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        let all = [
            Self::Es256,
            Self::Es384,
            Self::Es512,
            Self::Rs1,
            Self::Rs256,
            Self::Rs384,
            Self::Rs512,
            Self::Hs256,
            Self::Hs384,
            Self::Hs512,
        ];
        all.into_iter().find(|algorithm| algorithm.oid() == *oid)
    }
}

impl Asn1Encode for SignatureAlgorithm {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        asn1_sequence(|b| {
            let b = b.oid(&self.oid());
            if self.has_null_parameters() {
                b.null()
            } else {
                b
            }
        })
    }
}

impl Asn1Decode for SignatureAlgorithm {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let children = src.as_sequence()?;
        let (oid_elem, parameters) = match children {
            [oid_elem] => (oid_elem, None),
            [oid_elem, parameters] => (oid_elem, Some(parameters)),
            _ => {
                return Err(Asn1Error::invalid_content(format!(
                    "AlgorithmIdentifier with {} children",
                    children.len()
                )))
            }
        };
        let oid = oid_elem.read_oid()?;
        let algorithm = Self::from_oid(&oid).ok_or_else(|| {
            Asn1Error::invalid_content(format!("unrecognized signature algorithm {oid}"))
        })?;
        match parameters {
            Some(parameters) => parameters.read_null()?,
            None if algorithm.has_null_parameters() => {
                return Err(Asn1Error::invalid_content(format!(
                    "{oid} requires NULL parameters"
                )))
            }
            None => {}
        }
        Ok(algorithm)
    }
}
