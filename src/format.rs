//! Presentation formatting shared by every domain adapter and renderer.
//!
//! All functions are total: absent or unusable input yields [`PLACEHOLDER`], never a panic
//! and never a literal like "null". The inverse parsers at the bottom of the module read the
//! display strings back so renderers that support typed cells agree with what adapters
//! printed.

use chrono::{NaiveDate, NaiveDateTime};

/// Display value for any absent, blank or invalid field.
pub const PLACEHOLDER: &str = "—";

/// Display pattern for date-only values (DD/MM/YYYY)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Display pattern for date + time values
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_PREFIX: &str = "$ ";
const CURRENCY_PRECISION: usize = 2;

/// Connector words kept lowercase by [`capitalize_text`] unless they open the text.
const CONNECTORS: &[&str] =
    &["a", "al", "con", "de", "del", "e", "el", "en", "la", "las", "los", "o", "para", "por", "u", "y"];

/// Format a date as DD/MM/YYYY.
pub fn format_date(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a timestamp as DD/MM/YYYY HH:MM.
pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a flag as "Sí" / "No".
pub fn format_boolean(value: Option<bool>) -> String {
    match value {
        Some(true) => "Sí".to_string(),
        Some(false) => "No".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a number with fixed precision, `.` as thousands separator and `,` as decimal
/// separator (1234.5 → "1.234,50" at precision 2).
pub fn format_number(value: Option<f64>, precision: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // "-0,00" is not a useful display value
    if value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

/// Format a monetary amount: "$ " followed by the number at two decimals.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{}", CURRENCY_PREFIX, format_number(Some(v), CURRENCY_PRECISION)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Trimmed free text, or the placeholder when blank.
pub fn format_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Normalize the casing of user-entered text.
///
/// Whitespace is collapsed, every significant word gets an uppercase first letter and a
/// lowercase remainder, and connector words ("de", "la", "y", ...) stay lowercase unless they
/// are the first word. Applying the function to its own output returns the same string.
pub fn capitalize_text(value: Option<&str>) -> String {
    let Some(text) = value else {
        return PLACEHOLDER.to_string();
    };

    let words: Vec<String> = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && CONNECTORS.contains(&lower.as_str()) { lower } else { capitalize_word(&lower) }
        })
        .collect();

    if words.is_empty() { PLACEHOLDER.to_string() } else { words.join(" ") }
}

/// Uppercase the first character of an already-lowercased word.
fn capitalize_word(lower: &str) -> String {
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    // Characters whose uppercase form expands (e.g. 'ß' → "SS") are left alone so the
    // result stays stable under repeated application.
    let head = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => first,
    };

    let mut out = String::with_capacity(lower.len());
    out.push(head);
    out.extend(chars);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Whole days elapsed since `from`, clamped at zero for dates after `today`.
pub fn days_since(from: NaiveDate, today: NaiveDate) -> i64 {
    days_between(from, today).max(0)
}

//
// Inverse parsers (display string → typed value)
//

/// Parse a DD/MM/YYYY display string.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse a DD/MM/YYYY HH:MM display string.
pub fn parse_display_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT).ok()
}

/// Parse a number produced by [`format_number`] or [`format_currency`].
pub fn parse_display_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_prefix(CURRENCY_PREFIX.trim_end()).unwrap_or(s).trim_start();
    if s.is_empty() || s == PLACEHOLDER {
        return None;
    }

    let normalized: String = s
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
