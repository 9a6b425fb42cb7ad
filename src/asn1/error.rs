//! Error taxonomy for the ASN.1 codec.
//!
//! Every failure carries enough context (byte offsets, expected vs. actual)
//! to pinpoint the offending octets. Malformed input is never transient, so
//! nothing here is retried; all errors propagate to the caller.

use {super::Tag, thiserror::Error};

pub type Result<T, E = Asn1Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Asn1Error {
    /// Tag octets could not be decoded (unterminated continuation sequence,
    /// buffer exhaustion, or a tag number too large to represent).
    #[error("malformed tag at offset {offset}: {reason}")]
    MalformedTag { offset: usize, reason: &'static str },

    /// Length octets are invalid, forbidden-indefinite, or overflowing.
    #[error("malformed length at offset {offset}: {reason}")]
    MalformedLength { offset: usize, reason: &'static str },

    /// A declared length exceeds the remaining buffer.
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        offset:    usize,
        needed:    usize,
        available: usize,
    },

    /// Bytes remain after a complete top-level element.
    #[error("{remaining} extra bytes after complete element at offset {offset}")]
    ExtraData { offset: usize, remaining: usize },

    /// Constructed content ended in a partial child element.
    #[error("malformed child element at offset {offset}")]
    MalformedChild {
        offset: usize,
        source: Box<Asn1Error>,
    },

    /// A SET OF contained heterogeneous tags, or a decode routine was handed
    /// an element with a tag it does not accept.
    #[error("tag mismatch: expected {expected}, got {actual}")]
    TagMismatch { expected: Tag, actual: Tag },

    /// A typed read found content that does not satisfy the expected grammar
    /// (bad character set, bad time syntax, inconsistent sign byte, ...).
    #[error("invalid content: {reason}")]
    InvalidContent { reason: String },

    /// A variant-checked projection was applied to the wrong element variant.
    #[error("unexpected element type: expected {expected}, got {actual}")]
    UnexpectedElementType {
        expected: &'static str,
        actual:   &'static str,
    },

    /// Structural nesting exceeded the parser's recursion cap.
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },
}

impl Asn1Error {
    /// Shorthand for [`Asn1Error::InvalidContent`].
    pub fn invalid_content(reason: impl Into<String>) -> Self {
        Self::InvalidContent {
            reason: reason.into(),
        }
    }
}
