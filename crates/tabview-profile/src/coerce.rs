//! Value coercions used for type classification.
//!
//! Text is interpreted the way a browser would interpret a form value:
//! numbers follow the `Number(text)` grammar, dates a set of common
//! calendar formats, booleans the literal words `true` / `false`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tabview_model::CellValue;

/// Coerces a cell to a finite number.
///
/// Booleans and empty cells never coerce.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(text) => parse_number(text),
        _ => None,
    }
}

/// Parses text with browser number semantics.
///
/// Surrounding whitespace is ignored. Accepts decimal and exponent forms
/// with an optional sign and unsigned `0x` / `0o` / `0b` integers.
/// Whitespace-only text and non-finite results do not count.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return Some(value).filter(|v| v.is_finite());
    }

    // Rust's float grammar also admits "inf" and "nan"; restrict to the
    // characters a decimal literal can contain.
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let mut value = 0.0f64;
    for ch in text[2..].chars() {
        let digit = ch.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%a %B %d %Y",
    "%a, %d %B %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
];

/// True when a cell holds text that reads as a calendar date or date-time.
///
/// Only text cells are considered; numbers are not reinterpreted as
/// timestamps.
pub fn is_date(value: &CellValue) -> bool {
    match value {
        CellValue::Text(text) => parse_date(text).is_some(),
        _ => false,
    }
}

/// Parses the date portion of a textual date or date-time.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    // Year-month, e.g. "2024-03".
    if text.len() == 7 && text.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok();
    }
    None
}

/// True for `true` / `false` in any letter case, boolean cells, and values
/// that coerce to exactly 0 or 1.
pub fn is_boolean(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(_) => true,
        CellValue::Text(text)
            if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false") =>
        {
            true
        }
        other => matches!(to_number(other), Some(n) if n == 0.0 || n == 1.0),
    }
}
