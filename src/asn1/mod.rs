//! Pure ASN.1 types and the BER/DER codec, no application logic.
//!
//! The central type is [`Asn1Element`], a closed tree of node variants
//! covering any parsed or constructed value. Trees come from
//! [`Asn1Element::parse`] or the builder ([`asn1_sequence`] and friends)
//! and serialize through [`Asn1Element::to_der`].
//!
//! A goal is for parsing to be exactly reversible. DER guarantees this on
//! paper, but real-world data is not always DER compliant, so the parser
//! stores what was actually on the wire (SET order, opaque unknown tags)
//! and the encoder reproduces it verbatim; canonical ordering is applied
//! when trees are *constructed*, never when they are re-encoded. BER
//! deviations the strict mode rejects can be explicitly tolerated via
//! [`ParseOptions`].

mod builder;
mod element;
mod encodable;
mod encode;
mod error;
mod length;
mod oid;
mod parse;
mod string;
mod tag;
mod time;
mod value;

pub use self::{
    builder::{asn1_sequence, asn1_set, asn1_set_of, Asn1Builder},
    element::Asn1Element,
    encodable::{Asn1Decode, Asn1DecodeTagged, Asn1Encode},
    error::{Asn1Error, Result},
    oid::ObjectIdentifier,
    parse::{Leniency, ParseOptions},
    string::Asn1String,
    tag::{Tag, TagClass},
    time::{Asn1Time, TimeFormat},
};
