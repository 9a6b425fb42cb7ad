//! Recursive-descent TLV parser.
//!
//! Strict DER by default; the two BER deviations real-world data exhibits
//! (indefinite lengths, non-minimal lengths) are gated behind explicit
//! [`Leniency`] settings. The parser never re-sorts SET children: what was
//! on the wire is what ends up in the tree, so parse-then-encode
//! round-trips byte-for-byte.

use {
    super::{
        length::{self, DecodedLength},
        Asn1Element, Asn1Error, Result, Tag, TagClass,
    },
    tracing::warn,
};

/// How to handle correctable deviations from DER when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leniency {
    /// Accept silently.
    Allow,

    /// Accept, but log a warning.
    Warn,

    /// Be strict and return an error.
    Strict,
}

/// Decode-side configuration.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// BER indefinite lengths on constructed elements. Never valid in DER.
    pub indefinite_length: Leniency,

    /// Non-canonical length encodings (leading zero bytes, long form for
    /// short values).
    pub non_minimal_length: Leniency,

    /// Recursion cap; nesting beyond this fails with
    /// [`Asn1Error::NestingTooDeep`] instead of exhausting the call stack.
    pub max_depth: usize,
}

/// Default behaviour is strict DER.
impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indefinite_length:  Leniency::Strict,
            non_minimal_length: Leniency::Strict,
            max_depth:          128,
        }
    }
}

fn lenient(leniency: Leniency, error: Asn1Error) -> Result<()> {
    match leniency {
        Leniency::Strict => Err(error),
        Leniency::Warn => {
            warn!(%error, "accepting BER deviation");
            Ok(())
        }
        Leniency::Allow => Ok(()),
    }
}

/// Byte cursor over a window of the input; offsets stay absolute so errors
/// point into the original buffer.
struct Cursor<'a> {
    input: &'a [u8],
    pos:   usize,
    end:   usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.end - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..self.end]
    }

    fn peek_pair(&self) -> Option<(u8, u8)> {
        match self.rest() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Asn1Error::TruncatedInput {
                offset:    self.pos,
                needed:    count,
                available: self.remaining(),
            });
        }
        let slice = &self.input[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }
}

impl Asn1Element {
    /// Parses exactly one element from `input`, with strict DER settings.
    /// Fails with [`Asn1Error::ExtraData`] if bytes remain afterwards.
    pub fn parse(input: &[u8]) -> Result<Self> {
        Self::parse_with_options(input, &ParseOptions::default())
    }

    pub fn parse_with_options(input: &[u8], options: &ParseOptions) -> Result<Self> {
        let mut cursor = Cursor {
            input,
            pos: 0,
            end: input.len(),
        };
        let element = parse_element(&mut cursor, options, 0)?;
        if cursor.remaining() > 0 {
            return Err(Asn1Error::ExtraData {
                offset:    cursor.pos,
                remaining: cursor.remaining(),
            });
        }
        Ok(element)
    }

    /// Parses an element from a hex rendering of its DER bytes, the inverse
    /// of [`Asn1Element::to_der_hex`].
    pub fn parse_der_hex(input: &str) -> Result<Self> {
        let bytes = hex::decode(input.trim())
            .map_err(|e| Asn1Error::invalid_content(format!("invalid hex string: {e}")))?;
        Self::parse(&bytes)
    }
}

fn parse_element(cursor: &mut Cursor, options: &ParseOptions, depth: usize) -> Result<Asn1Element> {
    if depth > options.max_depth {
        return Err(Asn1Error::NestingTooDeep {
            offset: cursor.pos,
            limit:  options.max_depth,
        });
    }

    let tag_offset = cursor.pos;
    let (tag, tag_len) = Tag::parse(cursor.rest(), tag_offset)?;
    cursor.pos += tag_len;

    let length_offset = cursor.pos;
    let (decoded, length_len) = length::parse_length(cursor.rest(), length_offset)?;
    cursor.pos += length_len;

    match decoded {
        DecodedLength::Indefinite => {
            if !tag.constructed {
                return Err(Asn1Error::MalformedLength {
                    offset: length_offset,
                    reason: "indefinite length on a primitive element",
                });
            }
            lenient(options.indefinite_length, Asn1Error::MalformedLength {
                offset: length_offset,
                reason: "indefinite length is forbidden in DER",
            })?;
            let children = parse_indefinite_children(cursor, options, depth)?;
            Ok(assemble(tag, Content::Children(children)))
        }
        DecodedLength::Definite { length, minimal } => {
            if !minimal {
                lenient(options.non_minimal_length, Asn1Error::MalformedLength {
                    offset: length_offset,
                    reason: "length encoding is not minimal",
                })?;
            }
            let content_offset = cursor.pos;
            let content = cursor.take(length)?;
            if tag.constructed {
                let mut inner = Cursor {
                    input: cursor.input,
                    pos:   content_offset,
                    end:   content_offset + length,
                };
                let children = parse_children(&mut inner, options, depth)?;
                Ok(assemble(tag, Content::Children(children)))
            } else {
                Ok(assemble(tag, Content::Bytes(content.to_vec())))
            }
        }
    }
}

/// Constructed content is a concatenation of complete child TLVs; a
/// trailing partial element is a [`Asn1Error::MalformedChild`].
fn parse_children(
    cursor: &mut Cursor,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Asn1Element>> {
    let mut children = Vec::new();
    while cursor.remaining() > 0 {
        let child_offset = cursor.pos;
        let child = parse_element(cursor, options, depth + 1).map_err(|error| {
            // Exhaustion inside the window means the last child is partial;
            // other malformations keep their own diagnosis.
            let partial = matches!(
                error,
                Asn1Error::TruncatedInput { .. }
                    | Asn1Error::MalformedTag {
                        reason: "unexpected end of input",
                        ..
                    }
                    | Asn1Error::MalformedLength {
                        reason: "unexpected end of input",
                        ..
                    }
            );
            if partial {
                Asn1Error::MalformedChild {
                    offset: child_offset,
                    source: Box::new(error),
                }
            } else {
                error
            }
        })?;
        children.push(child);
    }
    Ok(children)
}

/// BER indefinite form: children run until the end-of-contents octets.
fn parse_indefinite_children(
    cursor: &mut Cursor,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Asn1Element>> {
    let mut children = Vec::new();
    loop {
        match cursor.peek_pair() {
            Some((0x00, 0x00)) => {
                cursor.pos += 2;
                return Ok(children);
            }
            None => {
                return Err(Asn1Error::TruncatedInput {
                    offset:    cursor.pos,
                    needed:    2,
                    available: cursor.remaining(),
                })
            }
            Some(_) => children.push(parse_element(cursor, options, depth + 1)?),
        }
    }
}

enum Content {
    Bytes(Vec<u8>),
    Children(Vec<Asn1Element>),
}

/// Tag class and constructed bit select the concrete variant. Unrecognized
/// primitive tags are retained as opaque leaves, never an error.
fn assemble(tag: Tag, content: Content) -> Asn1Element {
    match content {
        Content::Bytes(content) => {
            if tag == Tag::OCTET_STRING {
                Asn1Element::PrimitiveOctetString { content }
            } else {
                Asn1Element::Primitive { tag, content }
            }
        }
        Content::Children(children) => match (tag.class, tag.number) {
            (TagClass::Universal, 16) => Asn1Element::Sequence { children },
            (TagClass::Universal, 17) => Asn1Element::Set { children },
            (TagClass::Universal, 4) => Asn1Element::EncapsulatingOctetString { children },
            _ => Asn1Element::Tagged { tag, children },
        },
    }
}
