//! ASN.1 TIME (required since GENERALIZED TIME and UTC TIME exist).

use {
    super::{Asn1Decode, Asn1Element, Asn1Encode, Asn1Error, Result, Tag},
    chrono::{DateTime, TimeZone, Utc},
};

/// The two time formats and their tags.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TimeFormat {
    /// UTCTime, `YYMMDDHHMMSSZ`.
    Utc,
    /// GeneralizedTime, `YYYYMMDDHHMMSSZ`.
    Generalized,
}

/// A timestamp together with its chosen wire format.
///
/// Instants strictly before 2050-01-01T00:00:00Z default to UTCTime, later
/// ones to GeneralizedTime, per RFC 5280. Decoding selects the parsing
/// grammar from the tag, not from the threshold. Equality considers both
/// the instant and the format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Asn1Time {
    instant: DateTime<Utc>,
    format:  TimeFormat,
}

impl Asn1Time {
    /// Picks the format from the 2050 threshold. Sub-second precision is
    /// truncated; neither grammar carries fractions.
    pub fn new(instant: DateTime<Utc>) -> Self {
        let format = if instant < generalized_time_threshold() {
            TimeFormat::Utc
        } else {
            TimeFormat::Generalized
        };
        Self::with_format(instant, format)
    }

    /// Forces a specific format regardless of the threshold.
    pub fn with_format(instant: DateTime<Utc>, format: TimeFormat) -> Self {
        let instant = Utc
            .timestamp_opt(instant.timestamp(), 0)
            .single()
            .unwrap_or(instant);
        Self { instant, format }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn tag(&self) -> Tag {
        match self.format {
            TimeFormat::Utc => Tag::UTC_TIME,
            TimeFormat::Generalized => Tag::GENERALIZED_TIME,
        }
    }

    pub(crate) fn encode_content(&self) -> Vec<u8> {
        let pattern = match self.format {
            TimeFormat::Utc => "%y%m%d%H%M%SZ",
            TimeFormat::Generalized => "%Y%m%d%H%M%SZ",
        };
        self.instant.format(pattern).to_string().into_bytes()
    }

    pub(crate) fn decode_content(tag: Tag, content: &[u8]) -> Result<Self> {
        let format = match tag {
            Tag::UTC_TIME => TimeFormat::Utc,
            Tag::GENERALIZED_TIME => TimeFormat::Generalized,
            _ => {
                return Err(Asn1Error::TagMismatch {
                    expected: Tag::UTC_TIME,
                    actual:   tag,
                })
            }
        };
        let text = std::str::from_utf8(content)
            .map_err(|_| Asn1Error::invalid_content("time content is not ASCII"))?;
        let (year, rest) = match format {
            TimeFormat::Utc => {
                let (yy, rest) = split_digits(text, 2)?;
                // RFC 5280 pivot for two-digit years.
                let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
                (year, rest)
            }
            TimeFormat::Generalized => {
                let (year, rest) = split_digits(text, 4)?;
                (year, rest)
            }
        };
        let (month, rest) = split_digits(rest, 2)?;
        let (day, rest) = split_digits(rest, 2)?;
        let (hour, rest) = split_digits(rest, 2)?;
        let (minute, rest) = split_digits(rest, 2)?;
        let (second, rest) = split_digits(rest, 2)?;
        if rest != "Z" {
            return Err(Asn1Error::invalid_content(format!(
                "time {text:?} does not end in Z"
            )));
        }
        let instant = Utc
            .with_ymd_and_hms(
                year as i32,
                month as u32,
                day as u32,
                hour as u32,
                minute as u32,
                second as u32,
            )
            .single()
            .ok_or_else(|| Asn1Error::invalid_content(format!("invalid date-time {text:?}")))?;
        Ok(Self { instant, format })
    }
}

/// Splits `count` leading ASCII digits off `text`.
fn split_digits(text: &str, count: usize) -> Result<(u64, &str)> {
    let (digits, rest) = text
        .split_at_checked(count)
        .ok_or_else(|| Asn1Error::invalid_content(format!("time {text:?} is too short")))?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Asn1Error::invalid_content(format!(
            "expected digits, got {digits:?}"
        )));
    }
    let value = digits
        .parse()
        .map_err(|_| Asn1Error::invalid_content(format!("invalid digits {digits:?}")))?;
    Ok((value, rest))
}

fn generalized_time_threshold() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 1, 0, 0, 0).single().unwrap()
}

impl Asn1Encode for Asn1Time {
    fn encode_to_tlv(&self) -> Result<Asn1Element> {
        Ok(Asn1Element::Primitive {
            tag:     self.tag(),
            content: self.encode_content(),
        })
    }
}

impl Asn1Decode for Asn1Time {
    fn decode_from_tlv(src: &Asn1Element) -> Result<Self> {
        let (tag, content) = src.as_primitive()?;
        Self::decode_content(tag, content)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, anyhow::Result};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn test_utc_time_content() {
        let time = Asn1Time::new(at(2020, 1, 1, 0, 0, 0));
        assert_eq!(time.format(), TimeFormat::Utc);
        assert_eq!(time.tag(), Tag::UTC_TIME);
        assert_eq!(time.encode_content(), b"200101000000Z");
    }

    #[test]
    fn test_threshold_selects_format() {
        // Strictly before 2050-01-01T00:00:00Z is UTCTime, at or after is
        // GeneralizedTime.
        let before = Asn1Time::new(at(2049, 12, 31, 23, 59, 59));
        assert_eq!(before.format(), TimeFormat::Utc);
        let exactly = Asn1Time::new(at(2050, 1, 1, 0, 0, 0));
        assert_eq!(exactly.format(), TimeFormat::Generalized);
        assert_eq!(exactly.encode_content(), b"20500101000000Z");
    }

    #[test]
    fn test_format_override() {
        let time = Asn1Time::with_format(at(2020, 6, 1, 12, 0, 0), TimeFormat::Generalized);
        assert_eq!(time.encode_content(), b"20200601120000Z");
    }

    #[test]
    fn test_decode_selects_grammar_from_tag() -> Result<()> {
        let utc = Asn1Time::decode_content(Tag::UTC_TIME, b"200101000000Z")?;
        assert_eq!(utc.instant(), at(2020, 1, 1, 0, 0, 0));
        assert_eq!(utc.format(), TimeFormat::Utc);

        let gen = Asn1Time::decode_content(Tag::GENERALIZED_TIME, b"20500101000000Z")?;
        assert_eq!(gen.instant(), at(2050, 1, 1, 0, 0, 0));
        assert_eq!(gen.format(), TimeFormat::Generalized);
        Ok(())
    }

    #[test]
    fn test_utc_year_pivot() -> Result<()> {
        let nineties = Asn1Time::decode_content(Tag::UTC_TIME, b"970315120000Z")?;
        assert_eq!(nineties.instant(), at(1997, 3, 15, 12, 0, 0));
        let twenties = Asn1Time::decode_content(Tag::UTC_TIME, b"490315120000Z")?;
        assert_eq!(twenties.instant(), at(2049, 3, 15, 12, 0, 0));
        Ok(())
    }

    #[test]
    fn test_bad_grammar() {
        for content in [
            b"200101000000".as_slice(),  // missing Z
            b"2001010000Z".as_slice(),   // too short
            b"20AB01000000Z".as_slice(), // non-digit
            b"201301000000Z".as_slice(), // month 13
        ] {
            assert!(Asn1Time::decode_content(Tag::UTC_TIME, content).is_err());
        }
    }

    #[test]
    fn test_equality_considers_format() {
        let instant = at(2020, 1, 1, 0, 0, 0);
        let utc = Asn1Time::new(instant);
        let gen = Asn1Time::with_format(instant, TimeFormat::Generalized);
        assert_eq!(utc.instant(), gen.instant());
        assert_ne!(utc, gen);
    }
}
