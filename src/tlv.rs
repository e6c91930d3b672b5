use std::{fmt, str::FromStr};

use log::trace;

use crate::error::{Error, Result};

/// Largest value length a two-digit length field can carry.
pub const MAX_VALUE_LEN: usize = 99;

/// Two-digit numeric field identifier, `00` through `99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u8);

impl Tag {
    pub const fn new(id: u8) -> Self {
        assert!(id < 100, "tag must fit in two decimal digits");
        Self(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_two_digits(s)
            .map(Tag)
            .ok_or_else(|| Error::InvalidTag(s.to_string()))
    }
}

fn parse_two_digits(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [hi @ b'0'..=b'9', lo @ b'0'..=b'9'] => Some((hi - b'0') * 10 + (lo - b'0')),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Nested(Vec<Tlv>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub t: Tag,
    pub v: Value,
}

impl Tlv {
    pub fn text(t: Tag, v: impl Into<String>) -> Self {
        Self {
            t,
            v: Value::Text(v.into()),
        }
    }

    pub fn nested(t: Tag, children: Vec<Tlv>) -> Self {
        Self {
            t,
            v: Value::Nested(children),
        }
    }

    /// Encodes this field, descending into nested values. Empty values
    /// encode to the empty string.
    pub fn encode(&self) -> Result<String> {
        match &self.v {
            Value::Text(text) => format_tlv(self.t, Some(text)),
            Value::Nested(children) => {
                let inner = build_tlv(children)?;
                format_tlv(self.t, Some(&inner))
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.v {
            Value::Text(text) => Some(text),
            Value::Nested(_) => None,
        }
    }

    /// Re-reads a text value as a nested TLV sequence.
    pub fn parse_nested(&self) -> Result<Vec<Tlv>> {
        match &self.v {
            Value::Text(text) => parse_tlv(text),
            Value::Nested(children) => Ok(children.clone()),
        }
    }
}

/// Formats one `tag + length + value` triple. An absent or empty value
/// yields the empty string so optional fields drop out of the payload.
pub fn format_tlv(tag: Tag, value: Option<&str>) -> Result<String> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(String::new()),
    };

    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(Error::ValueTooLong { tag, len });
    }

    trace!("tlv {tag} len {len:02}");

    Ok(format!("{tag}{len:02}{value}"))
}

pub fn build_tlv(elements: &[Tlv]) -> Result<String> {
    let mut out = String::new();

    for el in elements {
        out.push_str(&el.encode()?);
    }

    Ok(out)
}

/// Splits a TLV string into its top-level fields. Values are returned as
/// text; use [`Tlv::parse_nested`] to descend.
pub fn parse_tlv(buf: &str) -> Result<Vec<Tlv>> {
    let chars: Vec<char> = buf.chars().collect();
    let mut result = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if i + 4 > chars.len() {
            return Err(Error::Truncated(i));
        }

        let tag: String = chars[i..i + 2].iter().collect();
        let tag = tag.parse::<Tag>()?;

        let length: String = chars[i + 2..i + 4].iter().collect();
        let len = parse_two_digits(&length).ok_or(Error::InvalidLength(length))? as usize;

        if i + 4 + len > chars.len() {
            return Err(Error::Truncated(i));
        }

        let value: String = chars[i + 4..i + 4 + len].iter().collect();
        result.push(Tlv::text(tag, value));
        i += 4 + len;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T01: Tag = Tag::new(1);

    #[test]
    fn formats_tag_length_value() {
        assert_eq!(format_tlv(T01, Some("test")).unwrap(), "0104test");
        assert_eq!(format_tlv(Tag::new(59), Some("My Store")).unwrap(), "5908My Store");
    }

    #[test]
    fn omits_absent_and_empty() {
        assert_eq!(format_tlv(T01, Some("")).unwrap(), "");
        assert_eq!(format_tlv(T01, None).unwrap(), "");
    }

    #[test]
    fn rejects_overlong_value() {
        let value = "x".repeat(100);
        assert_eq!(
            format_tlv(T01, Some(&value)),
            Err(Error::ValueTooLong { tag: T01, len: 100 })
        );
        assert!(format_tlv(T01, Some(&value[..99])).is_ok());
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(format_tlv(T01, Some("Hà Nội")).unwrap(), "0106Hà Nội");
    }

    #[test]
    fn nested_encoding() {
        let routing = Tlv::nested(
            T01,
            vec![
                Tlv::text(Tag::new(0), "970436"),
                Tlv::text(Tag::new(1), "1234567890"),
            ],
        );
        assert_eq!(routing.encode().unwrap(), "0124000697043601101234567890");
    }

    #[test]
    fn empty_nested_is_omitted() {
        let empty = Tlv::nested(Tag::new(62), vec![Tlv::text(Tag::new(8), "")]);
        assert_eq!(empty.encode().unwrap(), "");
    }

    #[test]
    fn tag_parsing() {
        assert_eq!("38".parse::<Tag>().unwrap(), Tag::new(38));
        assert_eq!(Tag::new(5).to_string(), "05");
        assert!("3".parse::<Tag>().is_err());
        assert!("3a".parse::<Tag>().is_err());
        assert!("٣٨".parse::<Tag>().is_err());
    }

    #[test]
    fn parse_splits_fields() {
        let fields = parse_tlv("0104test5802VN").unwrap();
        assert_eq!(
            fields,
            vec![Tlv::text(T01, "test"), Tlv::text(Tag::new(58), "VN")]
        );
    }

    #[test]
    fn parse_descends_into_nested() {
        let fields = parse_tlv("62230819Thanh toan don hang").unwrap();
        let inner = fields[0].parse_nested().unwrap();
        assert_eq!(inner, vec![Tlv::text(Tag::new(8), "Thanh toan don hang")]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_tlv("010"), Err(Error::Truncated(0)));
        assert_eq!(parse_tlv("0105abc"), Err(Error::Truncated(0)));
        assert_eq!(parse_tlv("0102ab58"), Err(Error::Truncated(6)));
        assert_eq!(parse_tlv("01xxab"), Err(Error::InvalidLength("xx".into())));
        assert_eq!(parse_tlv("A102ab"), Err(Error::InvalidTag("A1".into())));
    }
}
