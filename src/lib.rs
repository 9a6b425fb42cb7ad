//! ITU-T X.690 ASN.1 BER/DER tag-length-value codec and the cryptographic
//! data types built on it.
//!
//! The [`asn1`] module is the core: a typed element tree with exact binary
//! encode/decode, DER canonicalization (SET ordering, minimal lengths,
//! definite lengths only) and implicit/explicit tag overrides. The
//! [`crypto`] module layers X.509-shaped data types (public keys,
//! signatures, algorithm identifiers, certificates, timestamps) on top via
//! the [`asn1::Asn1Encode`]/[`asn1::Asn1Decode`] contract.
//!
//! Everything is a pure function over immutable buffers and immutable
//! trees: no I/O, no shared state, safe to call concurrently without
//! coordination. The only resource bound is the parser's recursion cap.
//!
//! Bridging to platform crypto providers (signing, verification, key
//! generation, certificate stores) is deliberately out of scope; the
//! boundary is raw byte fields and bit-for-bit signature layouts.

pub mod asn1;
pub mod crypto;
