// Regex-level HTML helpers
//
// The scraping here is attribute-level only (find one tag, read one
// attribute, or pull an embedded JSON blob), so a full DOM parser would be
// dead weight. Patterns are anchored to tag boundaries and never try to
// understand nesting.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref ATTR_RE: Regex =
        Regex::new(r#"([a-zA-Z_:][a-zA-Z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .unwrap();
}

/// Attribute map of a single opening tag
pub fn extract_attributes(tag_html: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(tag_html)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (name, value.to_string())
        })
        .collect()
}

/// First opening `tag` whose `attr` value matches `value_re`, as raw HTML
pub fn find_element_html<'h>(
    html: &'h str,
    tag: &str,
    attr: &str,
    value_re: &Regex,
) -> Option<&'h str> {
    let tag_re = Regex::new(&format!(r"(?s)<{}\b[^>]*>", regex::escape(tag))).ok()?;
    let found = tag_re
        .find_iter(html)
        .map(|m| m.as_str())
        .find(|tag_html| {
            extract_attributes(tag_html)
                .get(attr)
                .map_or(false, |value| value_re.is_match(value))
        });
    found
}

/// First balanced JSON object following `anchor_re`.
///
/// String literals and escapes are honored while counting braces, so
/// embedded "{"/"}" inside values do not derail the scan.
pub fn search_json_after(text: &str, anchor_re: &Regex) -> Option<Value> {
    let anchor = anchor_re.find(text)?;
    let rest = &text[anchor.end()..];
    let start = rest.find(|c: char| !c.is_whitespace())?;
    if !rest[start..].starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in rest[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let blob = &rest[start..start + offset + ch.len_utf8()];
                    return serde_json::from_str(blob).ok();
                }
            }
            _ => {}
        }
    }
    None
}
