//! Length octets: short form, minimal long form, indefinite detection.

use {
    super::{Asn1Error, Result},
    bytes::BufMut,
};

/// Outcome of reading length octets. Indefinite form is surfaced to the
/// parser, which decides per its [`Leniency`](super::Leniency) settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DecodedLength {
    Definite {
        length:  usize,
        /// False when the long form carried a leading zero byte or encoded a
        /// value below 128. BER permits this, DER forbids it.
        minimal: bool,
    },
    Indefinite,
}

/// Reads length octets from the start of `input`. Returns the decoded length
/// and the number of bytes consumed. `at` is the absolute offset of `input`,
/// used for error context only.
pub(crate) fn parse_length(input: &[u8], at: usize) -> Result<(DecodedLength, usize)> {
    let first = *input.first().ok_or(Asn1Error::MalformedLength {
        offset: at,
        reason: "unexpected end of input",
    })?;
    if first < 0x80 {
        let decoded = DecodedLength::Definite {
            length:  first as usize,
            minimal: true,
        };
        return Ok((decoded, 1));
    }
    if first == 0x80 {
        return Ok((DecodedLength::Indefinite, 1));
    }
    if first == 0xff {
        return Err(Asn1Error::MalformedLength {
            offset: at,
            reason: "reserved length octet 0xff",
        });
    }

    const BYTES: usize = usize::BITS as usize / 8;
    let count = (first & 0x7f) as usize;
    if count > BYTES {
        return Err(Asn1Error::MalformedLength {
            offset: at,
            reason: "length overflows usize",
        });
    }
    let octets = input
        .get(1..1 + count)
        .ok_or(Asn1Error::MalformedLength {
            offset: at,
            reason: "unexpected end of input",
        })?;
    let mut bytes = [0; BYTES];
    bytes[BYTES - count..].copy_from_slice(octets);
    let length = usize::from_be_bytes(bytes);
    let decoded = DecodedLength::Definite {
        length,
        minimal: octets[0] != 0 && length >= 0x80,
    };
    Ok((decoded, 1 + count))
}

/// Writes the minimal definite-form encoding of `length`.
pub(crate) fn write_length<B: BufMut>(buffer: &mut B, length: usize) {
    if length < 0x80 {
        buffer.put_u8(length as u8);
    } else {
        let be = length.to_be_bytes();
        let trim = be.iter().position(|&b| b != 0).unwrap_or(0);
        let trimmed = &be[trim..];
        buffer.put_u8(0x80 | trimmed.len() as u8);
        buffer.put_slice(trimmed);
    }
}

pub(crate) fn encoded_len(length: usize) -> usize {
    if length < 0x80 {
        1
    } else {
        2 + (usize::BITS as usize / 8 - 1) - length.leading_zeros() as usize / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definite(length: usize, minimal: bool) -> DecodedLength {
        DecodedLength::Definite { length, minimal }
    }

    #[test]
    fn test_short_form() {
        assert_eq!(parse_length(&[0x00], 0).unwrap(), (definite(0, true), 1));
        assert_eq!(parse_length(&[0x7f], 0).unwrap(), (definite(127, true), 1));
        let mut bytes = Vec::new();
        write_length(&mut bytes, 127);
        assert_eq!(bytes, [0x7f]);
    }

    #[test]
    fn test_long_form_minimal() {
        assert_eq!(
            parse_length(&[0x81, 0x80], 0).unwrap(),
            (definite(128, true), 2)
        );
        assert_eq!(
            parse_length(&[0x82, 0x01, 0x00], 0).unwrap(),
            (definite(256, true), 3)
        );
        let mut bytes = Vec::new();
        write_length(&mut bytes, 256);
        assert_eq!(bytes, [0x82, 0x01, 0x00]);
        assert_eq!(encoded_len(256), 3);
    }

    #[test]
    fn test_long_form_non_minimal() {
        // Leading zero byte.
        assert_eq!(
            parse_length(&[0x82, 0x00, 0x80], 0).unwrap(),
            (definite(128, false), 3)
        );
        // Long form for a value below 128.
        assert_eq!(
            parse_length(&[0x81, 0x05], 0).unwrap(),
            (definite(5, false), 2)
        );
    }

    #[test]
    fn test_indefinite_and_reserved() {
        assert_eq!(
            parse_length(&[0x80], 0).unwrap(),
            (DecodedLength::Indefinite, 1)
        );
        assert!(matches!(
            parse_length(&[0xff], 7).unwrap_err(),
            Asn1Error::MalformedLength { offset: 7, .. }
        ));
    }

    #[test]
    fn test_roundtrip_boundaries() {
        for length in [0, 1, 127, 128, 255, 256, 65535, 65536, 0x0100_0000] {
            let mut bytes = Vec::new();
            write_length(&mut bytes, length);
            assert_eq!(bytes.len(), encoded_len(length));
            let (decoded, consumed) = parse_length(&bytes, 0).unwrap();
            assert_eq!(decoded, definite(length, true));
            assert_eq!(consumed, bytes.len());
        }
    }
}
