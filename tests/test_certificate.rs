//! End-to-end tests for the crypto data types layer.

use {
    anyhow::{ensure, Result},
    chrono::{TimeZone, Utc},
    hex_literal::hex,
    x690_tlv::{
        asn1::{
            Asn1Decode, Asn1DecodeTagged, Asn1Element, Asn1Encode, Asn1String, Asn1Time,
            ObjectIdentifier, Tag,
        },
        crypto::{
            oids, CryptoPublicKey, CryptoSignature, DistinguishedName, EcCurve,
            SignatureAlgorithm, TbsCertificate, X509Certificate, X509Extension,
        },
    },
};

fn ec_key() -> Result<CryptoPublicKey> {
    let key = CryptoPublicKey::ec_from_coordinates(
        EcCurve::Secp256r1,
        &hex!("3dd29bbe5907fd21a152ada4895faae7acc55f5e50efbfde5ab0c6eb54f198d6"),
        &hex!("15913635f0fdf5beb383e00355f82d3c41ed0df2e28363433dfb73856a15dc9f"),
    )?;
    Ok(key)
}

fn certificate() -> Result<X509Certificate> {
    let tbs = TbsCertificate {
        version: 2,
        serial_number: vec![0x0a, 0x42],
        signature_algorithm: SignatureAlgorithm::Es256,
        issuer: vec![
            DistinguishedName::Country(Asn1String::printable("AT")?),
            DistinguishedName::Organization(Asn1String::printable("Example Org")?),
            DistinguishedName::CommonName(Asn1String::printable("Example Root CA")?),
        ],
        valid_from: Asn1Time::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        valid_until: Asn1Time::new(Utc.with_ymd_and_hms(2054, 3, 1, 0, 0, 0).unwrap()),
        subject: vec![DistinguishedName::CommonName(Asn1String::utf8(
            "Example Leaf",
        ))],
        public_key: ec_key()?,
        extensions: vec![
            X509Extension::from_value_tree(
                ObjectIdentifier::from_static(&[2, 5, 29, 19]),
                true,
                &Asn1Element::sequence(vec![]),
            ),
            X509Extension::new(
                ObjectIdentifier::from_static(&[2, 5, 29, 14]),
                false,
                hex!("0414deadbeefdeadbeefdeadbeefdeadbeefdeadbeef").to_vec(),
            ),
        ],
    };
    Ok(X509Certificate {
        tbs_certificate:     tbs,
        signature_algorithm: SignatureAlgorithm::Es256,
        signature:           CryptoSignature::ecdsa_from_raw(&[0x5a; 64])?,
    })
}

#[test]
fn test_certificate_roundtrips_bit_for_bit() -> Result<()> {
    let certificate = certificate()?;
    let der = certificate.encode_to_der()?;
    let decoded = X509Certificate::decode_from_der(&der)?;
    ensure!(decoded == certificate);
    ensure!(decoded.encode_to_der()? == der);
    Ok(())
}

#[test]
fn test_validity_spans_the_time_threshold() -> Result<()> {
    // notBefore lands in UTCTime, notAfter in GeneralizedTime; both come
    // back from the tag alone.
    let certificate = certificate()?;
    let der = certificate.encode_to_der()?;
    let decoded = X509Certificate::decode_from_der(&der)?;
    ensure!(
        decoded.tbs_certificate.valid_from.tag() == Tag::UTC_TIME,
        "notBefore should be UTCTime"
    );
    ensure!(
        decoded.tbs_certificate.valid_until.tag() == Tag::GENERALIZED_TIME,
        "notAfter should be GeneralizedTime"
    );
    Ok(())
}

#[test]
fn test_spki_matches_independent_encoding() -> Result<()> {
    // SubjectPublicKeyInfo for P-256 as produced by OpenSSL: fixed 27-byte
    // header before the uncompressed point.
    let der = ec_key()?.encode_to_der()?;
    ensure!(der.len() == 91);
    ensure!(der[..26] == hex!("3059301306072a8648ce3d020106082a8648ce3d030107034200"));
    ensure!(der[26] == 0x04);
    Ok(())
}

#[test]
fn test_rsa_key_wraps_pkcs1() -> Result<()> {
    let key = CryptoPublicKey::rsa(
        &hex!(
            "00af3e9ad1f5c7a2440ab1643b9a2cbb8cf527c31c6a6eaec7727db5f62bc2c1"
            "9a62dd8b3f71b3552a5e61c21e61a76e250c07e5a3dba9659f3a345c6663f14589"
        ),
        &hex!("010001"),
    )?;
    let der = key.encode_to_der()?;
    let decoded = CryptoPublicKey::decode_from_der(&der)?;
    ensure!(decoded == key);

    // The BIT STRING payload parses as PKCS#1 RSAPublicKey on its own.
    let spki = Asn1Element::parse(&der)?;
    let bits = spki.as_sequence()?[1].read_bit_string()?.to_vec();
    let rsa_public_key = Asn1Element::parse(&bits)?;
    ensure!(rsa_public_key.as_sequence()?.len() == 2);
    ensure!(rsa_public_key.as_sequence()?[1].read_integer()? == 65537);
    Ok(())
}

#[test]
fn test_ecdsa_provider_layout_roundtrip() -> Result<()> {
    // Fixed-width raw r‖s from a provider, through DER, and back.
    let mut raw = vec![0u8; 64];
    raw[..32].copy_from_slice(&[0xc3; 32]);
    raw[32..].copy_from_slice(&[0x07; 32]);
    let signature = CryptoSignature::ecdsa_from_raw(&raw)?;
    let der = signature.encode_to_der()?;
    let restored = CryptoSignature::decode_from_der(&der)?;
    ensure!(restored.ecdsa_to_raw(EcCurve::Secp256r1.coordinate_bytes())? == raw);
    Ok(())
}

#[test]
fn test_tag_override_decoding() -> Result<()> {
    // The same OID decodes universally tagged and implicitly retagged
    // through one routine.
    let oid = oids::EC_PUBLIC_KEY;
    let universal = oid.encode_to_tlv()?;
    ensure!(ObjectIdentifier::decode_from_tlv_tagged(&universal, None)? == oid);

    let retagged = universal.clone().with_implicit_tag(7);
    let parsed = Asn1Element::parse(&retagged.to_der())?;
    ensure!(
        ObjectIdentifier::decode_from_tlv_tagged(&parsed, Some(Tag::implicit(7, false)))? == oid
    );
    // The override is verified, not assumed.
    ensure!(
        ObjectIdentifier::decode_from_tlv_tagged(&parsed, Some(Tag::implicit(8, false))).is_err()
    );
    Ok(())
}

#[test]
fn test_extension_values_are_nested_der() -> Result<()> {
    let certificate = certificate()?;
    let decoded = X509Certificate::decode_from_der(&certificate.encode_to_der()?)?;
    let extensions = &decoded.tbs_certificate.extensions;
    ensure!(extensions.len() == 2);
    ensure!(extensions[0].critical);
    ensure!(extensions[0].value_tree()? == Asn1Element::sequence(vec![]));
    ensure!(!extensions[1].critical);
    ensure!(
        extensions[1].value_tree()?.read_octet_string()?
            == hex!("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef")
    );
    Ok(())
}

#[test]
fn test_wrong_structures_are_rejected() -> Result<()> {
    let not_a_certificate = Asn1Element::sequence(vec![Asn1Element::integer(1)]);
    ensure!(X509Certificate::decode_from_tlv(&not_a_certificate).is_err());
    ensure!(TbsCertificate::decode_from_tlv(&not_a_certificate).is_err());
    ensure!(CryptoPublicKey::decode_from_tlv(&not_a_certificate).is_err());
    ensure!(X509Certificate::decode_from_tlv_or_none(&not_a_certificate).is_none());
    Ok(())
}
