//! X.509 certificate structures.
//!
//! Only the tag/encoding layer lives here: building and parsing the
//! `TBSCertificate` shape bit-for-bit. Chain building, trust decisions and
//! signature verification belong to a native provider.

use {
    super::{oids, CryptoPublicKey, CryptoSignature, SignatureAlgorithm},
    crate::asn1::{
        asn1_sequence, Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, Asn1String, Asn1Time,
        ObjectIdentifier, Result, Tag,
    },
};

/// A single attribute of a distinguished name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DistinguishedName {
    CommonName(Asn1String),
    Country(Asn1String),
    Organization(Asn1String),
    OrganizationalUnit(Asn1String),
    Other {
        oid:   ObjectIdentifier,
        value: Asn1String,
    },
}

impl DistinguishedName {
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Self::CommonName(_) => oids::AT_COMMON_NAME,
            Self::Country(_) => oids::AT_COUNTRY,
            Self::Organization(_) => oids::AT_ORGANIZATION,
            Self::OrganizationalUnit(_) => oids::AT_ORGANIZATIONAL_UNIT,
            Self::Other { oid, .. } => oid.clone(),
        }
    }

    pub fn value(&self) -> &Asn1String {
        match self {
            Self::CommonName(value)
            | Self::Country(value)
            | Self::Organization(value)
            | Self::OrganizationalUnit(value)
            | Self::Other { value, .. } => value,
        }
    }

    fn from_parts(oid: ObjectIdentifier, value: Asn1String) -> Self {
        if oid == oids::AT_COMMON_NAME {
            Self::CommonName(value)
        } else if oid == oids::AT_COUNTRY {
            Self::Country(value)
        } else if oid == oids::AT_ORGANIZATION {
            Self::Organization(value)
        } else if oid == oids::AT_ORGANIZATIONAL_UNIT {
            Self::OrganizationalUnit(value)
        } else {
            Self::Other { oid, value }
        }
    }
}

/// One attribute per relative distinguished name, the common CA practice.
impl Asn1Encode for DistinguishedName {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        let attribute = asn1_sequence(|b| b.oid(&self.oid()).string(self.value()))?;
        Asn1Element::set_of(vec![attribute])
    }
}

impl Asn1Decode for DistinguishedName {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let [attribute] = src.as_set()? else {
            return Err(Asn1Error::invalid_content(
                "multi-attribute RDNs are not supported",
            ));
        };
        let [oid, value] = attribute.as_sequence()? else {
            return Err(Asn1Error::invalid_content(
                "AttributeTypeAndValue must be a two-element SEQUENCE",
            ));
        };
        Ok(Self::from_parts(oid.read_oid()?, value.read_string()?))
    }
}

fn encode_name(name: &[DistinguishedName]) -> Result<Asn1Element> {
    let rdns = name
        .iter()
        .map(Asn1Encode::encode_to_tlv)
        .collect::<Result<Vec<_>>>()?;
    Ok(Asn1Element::sequence(rdns))
}

fn decode_name(src: &Asn1Element) -> Result<Vec<DistinguishedName>> {
    src.as_sequence()?
        .iter()
        .map(DistinguishedName::decode_from_tlv)
        .collect()
}

/// An X.509 v3 extension. The value holds the DER content of the extnValue
/// OCTET STRING.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct X509Extension {
    pub oid:      ObjectIdentifier,
    pub critical: bool,
    pub value:    Vec<u8>,
}

impl X509Extension {
    pub fn new(oid: ObjectIdentifier, critical: bool, value: impl Into<Vec<u8>>) -> Self {
        Self {
            oid,
            critical,
            value: value.into(),
        }
    }

    /// Builds the extension value from an element tree.
    pub fn from_value_tree(oid: ObjectIdentifier, critical: bool, value: &Asn1Element) -> Self {
        Self::new(oid, critical, value.to_der())
    }

    /// Parses the wrapped extension value as its own DER tree.
    pub fn value_tree(&self) -> Result<Asn1Element> {
        Asn1Element::parse(&self.value)
    }
}

impl Asn1Encode for X509Extension {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        // DEFAULT FALSE criticality is omitted when false, per DER.
        asn1_sequence(|b| {
            let b = b.oid(&self.oid);
            let b = if self.critical { b.bool(true) } else { b };
            b.octet_string(self.value.clone())
        })
    }
}

impl Asn1Decode for X509Extension {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let (oid, critical, value) = match src.as_sequence()? {
            [oid, value] => (oid, false, value),
            [oid, critical, value] => (oid, critical.read_boolean()?, value),
            children => {
                return Err(Asn1Error::invalid_content(format!(
                    "Extension with {} children",
                    children.len()
                )))
            }
        };
        Ok(Self {
            oid: oid.read_oid()?,
            critical,
            value: value.read_octet_string()?.to_vec(),
        })
    }
}

/// The to-be-signed portion of a certificate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TbsCertificate {
    /// Zero-based version; 2 means v3. Versions other than v1 are encoded
    /// in an explicit `[0]` tag, v1 is omitted as the default.
    pub version: u64,

    /// The serial number's INTEGER content, verbatim. CAs are required to
    /// issue positive serials, but what was on the wire round-trips.
    pub serial_number: Vec<u8>,

    pub signature_algorithm: SignatureAlgorithm,
    pub issuer:              Vec<DistinguishedName>,
    pub valid_from:          Asn1Time,
    pub valid_until:         Asn1Time,
    pub subject:             Vec<DistinguishedName>,
    pub public_key:          CryptoPublicKey,

    /// Empty means the `[3]` extensions tag is absent.
    pub extensions: Vec<X509Extension>,
}

impl Asn1Encode for TbsCertificate {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        let serial = Asn1Element::integer_content(self.serial_number.clone())?;
        let algorithm = self.signature_algorithm.encode_to_tlv()?;
        let issuer = encode_name(&self.issuer)?;
        let subject = encode_name(&self.subject)?;
        let public_key = self.public_key.encode_to_tlv()?;
        let extensions = if self.extensions.is_empty() {
            None
        } else {
            let extensions = self
                .extensions
                .iter()
                .map(Asn1Encode::encode_to_tlv)
                .collect::<Result<Vec<_>>>()?;
            Some(Asn1Element::explicitly_tagged(3, vec![
                Asn1Element::sequence(extensions),
            ]))
        };

        asn1_sequence(|b| {
            let b = if self.version == 0 {
                b
            } else {
                let version = self.version;
                b.tagged(0, |b| b.uint(version))
            };
            let b = b
                .append(serial)
                .append(algorithm)
                .append(issuer)
                .sequence(|b| b.time(self.valid_from).time(self.valid_until))
                .append(subject)
                .append(public_key);
            match extensions {
                Some(extensions) => b.append(extensions),
                None => b,
            }
        })
    }
}

impl Asn1Decode for TbsCertificate {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let mut children = src.as_sequence()?.iter().peekable();

        let version = match children.next_if(|child| child.tag() == Tag::explicit(0)) {
            Some(wrapper) => {
                let (_, inner) = wrapper.as_tagged()?;
                let [version] = inner else {
                    return Err(Asn1Error::invalid_content(
                        "version tag must wrap a single INTEGER",
                    ));
                };
                version.read_u64()?
            }
            None => 0,
        };

        let serial_number = field(&mut children, "serialNumber")?
            .read_integer_bytes()?
            .to_vec();
        let signature_algorithm =
            SignatureAlgorithm::decode_from_tlv(field(&mut children, "signature")?)?;
        let issuer = decode_name(field(&mut children, "issuer")?)?;

        let [valid_from, valid_until] = field(&mut children, "validity")?.as_sequence()? else {
            return Err(Asn1Error::invalid_content(
                "validity must hold exactly two times",
            ));
        };
        let valid_from = valid_from.read_time()?;
        let valid_until = valid_until.read_time()?;

        let subject = decode_name(field(&mut children, "subject")?)?;
        let public_key = CryptoPublicKey::decode_from_tlv(field(&mut children, "subjectPublicKeyInfo")?)?;

        let extensions = match children.next() {
            None => Vec::new(),
            Some(wrapper) => {
                let (tag, inner) = wrapper.as_tagged()?;
                if tag != Tag::explicit(3) {
                    return Err(Asn1Error::TagMismatch {
                        expected: Tag::explicit(3),
                        actual:   tag,
                    });
                }
                let [list] = inner else {
                    return Err(Asn1Error::invalid_content(
                        "extensions tag must wrap a single SEQUENCE",
                    ));
                };
                list.as_sequence()?
                    .iter()
                    .map(X509Extension::decode_from_tlv)
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self {
            version,
            serial_number,
            signature_algorithm,
            issuer,
            valid_from,
            valid_until,
            subject,
            public_key,
            extensions,
        })
    }
}

fn field<'a>(
    children: &mut impl Iterator<Item = &'a Asn1Element>,
    name: &str,
) -> Result<&'a Asn1Element> {
    children
        .next()
        .ok_or_else(|| Asn1Error::invalid_content(format!("TBSCertificate is missing {name}")))
}

/// A complete certificate: TBS structure, algorithm, signature bits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct X509Certificate {
    pub tbs_certificate:     TbsCertificate,
    pub signature_algorithm: SignatureAlgorithm,
    pub signature:           CryptoSignature,
}

impl Asn1Encode for X509Certificate {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        // X.509 requires the outer algorithm to repeat the TBS one; refusing
        // here keeps inconsistent state from ever reaching the wire.
        if self.signature_algorithm != self.tbs_certificate.signature_algorithm {
            return Err(Asn1Error::invalid_content(
                "certificate and TBSCertificate name different signature algorithms",
            ));
        }
        let tbs = self.tbs_certificate.encode_to_tlv()?;
        let algorithm = self.signature_algorithm.encode_to_tlv()?;
        let signature = Asn1Element::bit_string(&self.signature.wire_bytes()?);
        asn1_sequence(|b| b.append(tbs).append(algorithm).append(signature))
    }
}

impl Asn1Decode for X509Certificate {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let [tbs, algorithm, signature] = src.as_sequence()? else {
            return Err(Asn1Error::invalid_content(
                "Certificate must be a three-element SEQUENCE",
            ));
        };
        let tbs_certificate = TbsCertificate::decode_from_tlv(tbs)?;
        let signature_algorithm = SignatureAlgorithm::decode_from_tlv(algorithm)?;
        let signature =
            CryptoSignature::from_wire_bytes(signature_algorithm, signature.read_bit_string()?)?;
        Ok(Self {
            tbs_certificate,
            signature_algorithm,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        anyhow::Result,
        chrono::{TimeZone, Utc},
        hex_literal::hex,
    };

    fn test_tbs() -> Result<TbsCertificate> {
        Ok(TbsCertificate {
            version: 2,
            serial_number: vec![0x01, 0xf4],
            signature_algorithm: SignatureAlgorithm::Es256,
            issuer: vec![
                DistinguishedName::Country(Asn1String::printable("AT")?),
                DistinguishedName::CommonName(Asn1String::printable("Test CA")?),
            ],
            valid_from: Asn1Time::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            valid_until: Asn1Time::new(Utc.with_ymd_and_hms(2034, 1, 1, 0, 0, 0).unwrap()),
            subject: vec![DistinguishedName::CommonName(Asn1String::utf8("Leaf"))],
            public_key: CryptoPublicKey::ec_from_coordinates(
                super::super::EcCurve::Secp256r1,
                &[0x11; 32],
                &[0x22; 32],
            )?,
            extensions: vec![X509Extension::from_value_tree(
                ObjectIdentifier::from_static(&[2, 5, 29, 19]),
                true,
                &Asn1Element::sequence(vec![Asn1Element::boolean(true)]),
            )],
        })
    }

    #[test]
    fn test_certificate_roundtrip() -> Result<()> {
        let certificate = X509Certificate {
            tbs_certificate:     test_tbs()?,
            signature_algorithm: SignatureAlgorithm::Es256,
            signature:           CryptoSignature::EcDsa {
                r: vec![0x42; 32],
                s: vec![0x24; 31],
            },
        };
        let der = certificate.encode_to_der()?;
        let decoded = X509Certificate::decode_from_der(&der)?;
        assert_eq!(decoded, certificate);
        // Re-encoding is byte-identical.
        assert_eq!(decoded.encode_to_der()?, der);
        Ok(())
    }

    #[test]
    fn test_version_tag_layout() -> Result<()> {
        let tlv = test_tbs()?.encode_to_tlv()?;
        // First child: [0] EXPLICIT { INTEGER 2 }.
        assert_eq!(tlv.as_sequence()?[0].to_der(), hex!("a003020102"));
        Ok(())
    }

    #[test]
    fn test_v1_omits_version_and_extensions() -> Result<()> {
        let mut tbs = test_tbs()?;
        tbs.version = 0;
        tbs.extensions.clear();
        let tlv = tbs.encode_to_tlv()?;
        let children = tlv.as_sequence()?;
        // Straight to the serial number, nothing trailing the key info.
        assert_eq!(children.len(), 6);
        assert_eq!(children[0].read_integer()?, 500);

        let decoded = TbsCertificate::decode_from_tlv(&tlv)?;
        assert_eq!(decoded, tbs);
        Ok(())
    }

    #[test]
    fn test_extension_criticality_default() -> Result<()> {
        let lax = X509Extension::new(
            ObjectIdentifier::from_static(&[2, 5, 29, 14]),
            false,
            hex!("0404deadbeef").to_vec(),
        );
        let tlv = lax.encode_to_tlv()?;
        // No BOOLEAN child when not critical.
        assert_eq!(tlv.as_sequence()?.len(), 2);
        assert_eq!(X509Extension::decode_from_tlv(&tlv)?, lax);
        Ok(())
    }

    #[test]
    fn test_extension_value_tree() -> Result<()> {
        let tbs = test_tbs()?;
        let tree = tbs.extensions[0].value_tree()?;
        assert!(tree.as_sequence()?[0].read_boolean()?);
        Ok(())
    }

    #[test]
    fn test_algorithm_mismatch_refused() -> Result<()> {
        let certificate = X509Certificate {
            tbs_certificate:     test_tbs()?,
            signature_algorithm: SignatureAlgorithm::Es384,
            signature:           CryptoSignature::EcDsa {
                r: vec![0x42],
                s: vec![0x24],
            },
        };
        assert!(matches!(
            certificate.encode_to_tlv(),
            Err(Asn1Error::InvalidContent { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_rsa_certificate_signature_layout() -> Result<()> {
        let mut tbs = test_tbs()?;
        tbs.signature_algorithm = SignatureAlgorithm::Rs256;
        tbs.public_key = CryptoPublicKey::rsa(&hex!("e1c2d7cff95f4dbeb7"), &hex!("010001"))?;
        let certificate = X509Certificate {
            tbs_certificate:     tbs,
            signature_algorithm: SignatureAlgorithm::Rs256,
            signature:           CryptoSignature::raw(vec![0x5a; 128]),
        };
        let decoded = X509Certificate::decode_from_der(&certificate.encode_to_der()?)?;
        assert_eq!(decoded.signature, CryptoSignature::raw(vec![0x5a; 128]));
        Ok(())
    }
}
