//! # Text Helpers
//!
//! Small formatting helpers shared by both skins.

use chrono::DateTime;
use regex::Regex;
use std::sync::OnceLock;

/// The value of an optional text field, or `None` when it is missing or empty
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render a start/end pair as `2019–2021`, `2019–Present` or `–2021`
pub fn pretty_year_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.filter(|s| !s.is_empty());
    let end = end.filter(|s| !s.is_empty());
    match (start, end) {
        (None, None) => String::new(),
        (Some(start), None) | (Some(start), Some("Present")) => format!("{start}–Present"),
        (None, Some(end)) => format!("–{end}"),
        (Some(start), Some(end)) => format!("{start}–{end}"),
    }
}

/// Join the non-empty parts with `separator`
pub fn join_non_empty<'a, I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^https?://").expect("valid scheme pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Add `https://` to URLs written without a scheme
///
/// `mailto:` and `tel:` links are left alone. An empty input stays empty.
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if scheme_pattern().is_match(url) || url.starts_with("mailto:") || url.starts_with("tel:") {
        return url.to_string();
    }
    format!("https://{url}")
}

/// `tel:` link for a phone number as people write it
pub fn tel_url(phone: &str) -> String {
    format!("tel:{}", whitespace_pattern().replace_all(phone, ""))
}

/// Calendar date (`YYYY-MM-DD`, UTC) of an RFC 3339 timestamp
///
/// Returns an empty string for missing or unparseable input.
pub fn format_iso_date(iso: Option<&str>) -> String {
    iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.naive_utc().format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
