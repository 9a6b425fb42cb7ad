//! Scalar content codecs: booleans, two's-complement integers, bit strings.
//!
//! These operate on raw content bytes only; tags and lengths are the
//! concern of the element tree and the TLV layers.

use super::{Asn1Error, Result};

/// DER BOOLEAN content: 0xff for true, 0x00 for false.
pub(crate) fn encode_boolean(value: bool) -> Vec<u8> {
    vec![if value { 0xff } else { 0x00 }]
}

/// BER accepts any nonzero octet as true.
pub(crate) fn decode_boolean(content: &[u8]) -> Result<bool> {
    match content {
        [octet] => Ok(*octet != 0),
        _ => Err(Asn1Error::invalid_content(format!(
            "BOOLEAN content must be exactly one octet, got {}",
            content.len()
        ))),
    }
}

/// Minimal two's-complement encoding of a signed integer: no leading 0x00 or
/// 0xff byte beyond the one needed to fix the sign of the most significant
/// bit.
pub(crate) fn encode_i64(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = match bytes[start] {
            0x00 => bytes[start + 1] < 0x80,
            0xff => bytes[start + 1] >= 0x80,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Minimal two's-complement encoding of an unsigned integer; a leading zero
/// byte keeps the most significant bit from reading as a sign.
pub(crate) fn encode_u64(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let trim = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    if bytes[trim] >= 0x80 {
        let mut content = Vec::with_capacity(9 - trim);
        content.push(0x00);
        content.extend_from_slice(&bytes[trim..]);
        content
    } else {
        bytes[trim..].to_vec()
    }
}

/// Minimal INTEGER content from an unsigned big-endian magnitude (RSA
/// moduli, EC coordinates, serial numbers).
pub(crate) fn encode_unsigned_bytes(magnitude: &[u8]) -> Vec<u8> {
    let trim = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    // All zero (or empty) means the value is 0.
    let trimmed: &[u8] = if trim == magnitude.len() {
        &[0x00]
    } else {
        &magnitude[trim..]
    };
    if trimmed[0] >= 0x80 {
        let mut content = Vec::with_capacity(trimmed.len() + 1);
        content.push(0x00);
        content.extend_from_slice(trimmed);
        content
    } else {
        trimmed.to_vec()
    }
}

/// Checks INTEGER content for DER minimality: nonempty, and no superfluous
/// leading 0x00/0xff byte.
pub(crate) fn check_integer_content(content: &[u8]) -> Result<()> {
    match content {
        [] => Err(Asn1Error::invalid_content("INTEGER content is empty")),
        [0x00, next, ..] if *next < 0x80 => Err(Asn1Error::invalid_content(
            "INTEGER has a superfluous leading 0x00 byte",
        )),
        [0xff, next, ..] if *next >= 0x80 => Err(Asn1Error::invalid_content(
            "INTEGER has a superfluous leading 0xff byte",
        )),
        _ => Ok(()),
    }
}

/// Decodes minimal two's-complement content into an `i128`, which covers the
/// full range of both fixed-width encode helpers.
pub(crate) fn decode_integer(content: &[u8]) -> Result<i128> {
    check_integer_content(content)?;
    if content.len() > 16 {
        return Err(Asn1Error::invalid_content(format!(
            "INTEGER of {} bytes exceeds 128 bits; read it as raw bytes",
            content.len()
        )));
    }
    let mut bytes = if content[0] >= 0x80 {
        [0xff; 16]
    } else {
        [0x00; 16]
    };
    bytes[16 - content.len()..].copy_from_slice(content);
    Ok(i128::from_be_bytes(bytes))
}

/// BIT STRING content: a one-byte unused-bits count followed by the bits.
/// Only whole-byte bit strings are supported, so the count is always zero.
pub(crate) fn encode_bit_string(bits: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(bits.len() + 1);
    content.push(0x00);
    content.extend_from_slice(bits);
    content
}

pub(crate) fn decode_bit_string(content: &[u8]) -> Result<&[u8]> {
    match content {
        [] => Err(Asn1Error::invalid_content(
            "BIT STRING content is missing the unused-bits octet",
        )),
        [0x00, bits @ ..] => Ok(bits),
        [unused, ..] => Err(Asn1Error::invalid_content(format!(
            "BIT STRING with {unused} unused bits; only whole-byte strings are supported"
        ))),
    }
}
