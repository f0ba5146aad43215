// Field value coercions for the metadata mapping layer
//
// The APIs ship numbers as strings, dates in several shapes and language
// names instead of codes. Everything here is total: bad input maps to None
// (or "und" for languages), never to an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

static DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
static DATE_DASH_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
static DATE_SLASH_FORMAT: &[FormatItem<'static>] = format_description!("[year]/[month]/[day]");

/// Trimmed, non-empty string
pub fn str_or_none(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Integer from a number or a numeric string
pub fn int_or_none(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String that looks like an http(s) URL
pub fn url_or_none(value: &Value) -> Option<String> {
    let s = str_or_none(value)?;
    if s.starts_with("http://") || s.starts_with("https://") {
        Some(s)
    } else {
        None
    }
}

/// Strip tags, decode common entities, collapse whitespace
pub fn clean_html(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Last path segment of a URL, without query or fragment
pub fn url_basename(url: &str) -> String {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Split a ", "-separated people list
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Date string in one of the known shapes to YYYYMMDD
pub fn unified_strdate(raw: &str) -> Option<String> {
    let date = parse_date(raw.trim())?;
    Some(format!(
        "{:04}{:02}{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    ))
}

/// Datetime (or bare date) string to unix seconds, UTC assumed
pub fn unified_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = PrimitiveDateTime::parse(raw, DATETIME_FORMAT) {
        return Some(dt.assume_utc().unix_timestamp());
    }
    parse_date(raw).map(|d| d.midnight().assume_utc().unix_timestamp())
}

fn parse_date(raw: &str) -> Option<Date> {
    if let Ok(dt) = PrimitiveDateTime::parse(raw, DATETIME_FORMAT) {
        return Some(dt.date());
    }
    for format in [DATE_DASH_FORMAT, DATE_SLASH_FORMAT] {
        if let Ok(date) = Date::parse(raw, format) {
            return Some(date);
        }
    }
    None
}

/// Site language label (or ISO 639-1 code) to an ISO 639-2 code.
///
/// The catalog only ever reports this set; anything else is "und".
pub fn normalize_language(raw: &str) -> String {
    let code = match raw.trim().to_lowercase().as_str() {
        "hindi" | "hi" => "hin",
        "english" | "en" => "eng",
        "punjabi" | "pa" => "pan",
        "tamil" | "ta" => "tam",
        "telugu" | "te" => "tel",
        "marathi" | "mr" => "mar",
        "gujarati" | "gu" => "guj",
        "bengali" | "bn" => "ben",
        "kannada" | "kn" => "kan",
        "malayalam" | "ml" => "mal",
        "urdu" | "ur" => "urd",
        "bhojpuri" | "bho" => "bho",
        "rajasthani" | "raj" => "raj",
        "odia" | "or" => "ori",
        "assamese" | "as" => "asm",
        _ => "und",
    };
    code.to_string()
}
