//! Public keys and their `SubjectPublicKeyInfo` encoding.
//!
//! Key material stays raw: big-endian byte fields a native provider can
//! consume directly (RSA modulus and exponent, EC coordinates plus a named
//! curve). Only the X.509 wire form is implemented here.

use {
    super::{magnitude, oids},
    crate::asn1::{
        asn1_sequence, Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, ObjectIdentifier, Result,
    },
};

/// The named curves this crate can express.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EcCurve {
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl EcCurve {
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Self::Secp256r1 => oids::SECP256R1,
            Self::Secp384r1 => oids::SECP384R1,
            Self::Secp521r1 => oids::SECP521R1,
        }
    }

    /// Width of a field element in bytes; coordinates are padded to this.
    pub fn coordinate_bytes(self) -> usize {
        match self {
            Self::Secp256r1 => 32,
            Self::Secp384r1 => 48,
            Self::Secp521r1 => 66,
        }
    }

    fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [Self::Secp256r1, Self::Secp384r1, Self::Secp521r1]
            .into_iter()
            .find(|curve| curve.oid() == *oid)
    }
}

/// A public key as raw provider-ready material.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CryptoPublicKey {
    Rsa {
        /// Big-endian modulus, no leading zeros.
        modulus:         Vec<u8>,
        /// Big-endian public exponent, no leading zeros.
        public_exponent: Vec<u8>,
    },
    Ec {
        curve: EcCurve,
        /// Big-endian x coordinate, padded to the curve width.
        x:     Vec<u8>,
        /// Big-endian y coordinate, padded to the curve width.
        y:     Vec<u8>,
    },
}

impl CryptoPublicKey {
    pub fn rsa(modulus: &[u8], public_exponent: &[u8]) -> Result<Self> {
        let modulus = trim_zeros(modulus);
        let public_exponent = trim_zeros(public_exponent);
        if modulus.is_empty() || public_exponent.is_empty() {
            return Err(Asn1Error::invalid_content(
                "RSA modulus and exponent must be nonzero",
            ));
        }
        Ok(Self::Rsa {
            modulus,
            public_exponent,
        })
    }

    /// Coordinates shorter than the curve width are padded with leading
    /// zeros; longer ones are rejected.
    pub fn ec_from_coordinates(curve: EcCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        Ok(Self::Ec {
            curve,
            x: pad_to(curve, x)?,
            y: pad_to(curve, y)?,
        })
    }
}

fn trim_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

fn pad_to(curve: EcCurve, coordinate: &[u8]) -> Result<Vec<u8>> {
    let width = curve.coordinate_bytes();
    let trimmed = trim_zeros(coordinate);
    if trimmed.len() > width {
        return Err(Asn1Error::invalid_content(format!(
            "coordinate of {} bytes exceeds the {width}-byte field of {curve:?}",
            trimmed.len()
        )));
    }
    let mut padded = vec![0; width - trimmed.len()];
    padded.extend_from_slice(&trimmed);
    Ok(padded)
}

impl Asn1Encode for CryptoPublicKey {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        match self {
            Self::Rsa {
                modulus,
                public_exponent,
            } => {
                // The BIT STRING wraps a DER PKCS#1 RSAPublicKey.
                let rsa_public_key = Asn1Element::sequence(vec![
                    Asn1Element::integer_unsigned(modulus),
                    Asn1Element::integer_unsigned(public_exponent),
                ]);
                asn1_sequence(|b| {
                    b.sequence(|b| b.oid(&oids::RSA_ENCRYPTION).null())
                        .bit_string(&rsa_public_key.to_der())
                })
            }
            Self::Ec { curve, x, y } => {
                // Uncompressed SEC1 point.
                let mut point = Vec::with_capacity(1 + x.len() + y.len());
                point.push(0x04);
                point.extend_from_slice(x);
                point.extend_from_slice(y);
                asn1_sequence(|b| {
                    b.sequence(|b| b.oid(&oids::EC_PUBLIC_KEY).oid(&curve.oid()))
                        .bit_string(&point)
                })
            }
        }
    }
}

impl Asn1Decode for CryptoPublicKey {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let children = src.as_sequence()?;
        let [algorithm, subject_public_key] = children else {
            return Err(Asn1Error::invalid_content(format!(
                "SubjectPublicKeyInfo with {} children",
                children.len()
            )));
        };
        let algorithm = algorithm.as_sequence()?;
        let oid = algorithm
            .first()
            .ok_or_else(|| Asn1Error::invalid_content("empty AlgorithmIdentifier"))?
            .read_oid()?;
        let key_bytes = subject_public_key.read_bit_string()?;

        if oid == oids::RSA_ENCRYPTION {
            match algorithm {
                [_, parameters] => parameters.read_null()?,
                [_] => {}
                _ => {
                    return Err(Asn1Error::invalid_content(
                        "rsaEncryption with extra parameters",
                    ))
                }
            }
            let rsa_public_key = Asn1Element::parse(key_bytes)?;
            let [modulus, public_exponent] = rsa_public_key.as_sequence()? else {
                return Err(Asn1Error::invalid_content(
                    "RSAPublicKey must be a two-element SEQUENCE",
                ));
            };
            Ok(Self::Rsa {
                modulus:         magnitude(modulus.read_integer_bytes()?)?,
                public_exponent: magnitude(public_exponent.read_integer_bytes()?)?,
            })
        } else if oid == oids::EC_PUBLIC_KEY {
            let [_, parameters] = algorithm else {
                return Err(Asn1Error::invalid_content(
                    "id-ecPublicKey requires namedCurve parameters",
                ));
            };
            let curve_oid = parameters.read_oid()?;
            let curve = EcCurve::from_oid(&curve_oid).ok_or_else(|| {
                Asn1Error::invalid_content(format!("unsupported named curve {curve_oid}"))
            })?;
            let width = curve.coordinate_bytes();
            match key_bytes {
                [0x04, coordinates @ ..] if coordinates.len() == 2 * width => {
                    Ok(Self::Ec {
                        curve,
                        x: coordinates[..width].to_vec(),
                        y: coordinates[width..].to_vec(),
                    })
                }
                [0x04, ..] => Err(Asn1Error::invalid_content(format!(
                    "EC point of {} bytes does not match {curve:?}",
                    key_bytes.len()
                ))),
                _ => Err(Asn1Error::invalid_content(
                    "only uncompressed EC points are supported",
                )),
            }
        } else {
            Err(Asn1Error::invalid_content(format!(
                "unsupported public key algorithm {oid}"
            )))
        }
    }
}
