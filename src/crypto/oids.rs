//! Well-known object identifiers.
//!
//! Values per RFC 3279/5480 (keys, curves, ECDSA), RFC 8017 (RSA),
//! RFC 4231 (HMAC) and X.520 (attribute types).

use crate::asn1::ObjectIdentifier;

pub const RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 1]);
pub const SHA1_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 5]);
pub const SHA256_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 11]);
pub const SHA384_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 12]);
pub const SHA512_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 13]);

pub const EC_PUBLIC_KEY: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 2, 1]);
pub const ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 4, 3, 2]);
pub const ECDSA_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 4, 3, 3]);
pub const ECDSA_WITH_SHA512: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 4, 3, 4]);

pub const SECP256R1: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 10045, 3, 1, 7]);
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 132, 0, 34]);
pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 132, 0, 35]);

pub const HMAC_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 9]);
pub const HMAC_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 10]);
pub const HMAC_WITH_SHA512: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 11]);

pub const SHA1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 14, 3, 2, 26]);
pub const SHA256: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 1]);
pub const SHA384: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 2]);
pub const SHA512: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 3]);

pub const AT_COMMON_NAME: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 5, 4, 3]);
pub const AT_COUNTRY: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 5, 4, 6]);
pub const AT_ORGANIZATION: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 5, 4, 10]);
pub const AT_ORGANIZATIONAL_UNIT: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 5, 4, 11]);
