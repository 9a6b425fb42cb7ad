//! Cryptographic data types: keys, signatures, certificates.
//!
//! Everything here is pure structure over the ASN.1 layer. Key material
//! and signature bits stay raw byte fields shaped for hand-off to a native
//! provider; no arithmetic is ever performed on them.

mod algorithm;
mod certificate;
pub mod oids;
mod public_key;
mod signature;

pub use self::{
    algorithm::{Digest, SignatureAlgorithm},
    certificate::{DistinguishedName, TbsCertificate, X509Certificate, X509Extension},
    public_key::{CryptoPublicKey, EcCurve},
    signature::CryptoSignature,
};
use crate::asn1::{Asn1Error, Result};

/// Strips the sign byte off validated INTEGER content, yielding the
/// unsigned big-endian magnitude. Negative values have no magnitude here
/// and are rejected.
pub(crate) fn magnitude(content: &[u8]) -> Result<Vec<u8>> {
    match content {
        [sign, ..] if *sign >= 0x80 => Err(Asn1Error::invalid_content(
            "expected a non-negative INTEGER",
        )),
        [0x00, rest @ ..] if !rest.is_empty() => Ok(rest.to_vec()),
        _ => Ok(content.to_vec()),
    }
}
