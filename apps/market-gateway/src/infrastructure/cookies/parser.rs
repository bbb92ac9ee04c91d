//! Cookie string parsing.

use std::collections::BTreeMap;

/// Parse a cookie string into name/value pairs.
///
/// Accepted layouts, tried in order: `"a=1; b=2"`, one `a=1` per line, and a
/// single `a=1`. Entries without `=` or with an empty name are skipped.
/// Names and values are trimmed.
#[must_use]
pub fn parse_cookie_string(raw: &str) -> BTreeMap<String, String> {
    let entries: Vec<&str> = if raw.contains("; ") {
        raw.split("; ").collect()
    } else if raw.contains('\n') {
        raw.trim().lines().collect()
    } else {
        vec![raw]
    };

    entries
        .into_iter()
        .filter_map(|entry| entry.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Render a cookie string as a `Cookie` header value, or `None` when it
/// holds no usable pairs.
#[must_use]
pub fn cookie_header_value(raw: &str) -> Option<String> {
    let pairs = parse_cookie_string(raw);
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "),
    )
}
