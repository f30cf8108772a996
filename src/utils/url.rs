//! URL query utilities.
//!
//! Encoding follows `encodeURIComponent`, so URLs built here match what the
//! server-rendered page itself produces.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Bytes escaped by `encodeURIComponent`: everything but ASCII alphanumerics
/// and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decode a form-encoded query component (`+` is a space).
///
/// Malformed escapes are kept literally.
pub fn decode_component(value: &str) -> String {
    percent_decode_str(&value.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Split a query string (with or without the leading `?`) into raw pairs.
fn raw_pairs(search: &str) -> impl Iterator<Item = (&str, &str)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// First decoded value of `key` in `search`.
pub fn query_value(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Remove every occurrence of `key` from `search`.
///
/// Returns the remaining query with a leading `?`, or an empty string when
/// nothing is left. Untouched pairs keep their original encoding.
pub fn strip_query_param(search: &str, key: &str) -> String {
    let kept: Vec<String> = raw_pairs(search)
        .filter(|(k, _)| decode_component(k) != key)
        .map(|(k, v)| if v.is_empty() { k.to_string() } else { format!("{}={}", k, v) })
        .collect();

    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

/// Build `base?key=v1&key=v2...` with one encoded pair per value.
pub fn repeated_param_url<S: AsRef<str>>(base: &str, key: &str, values: &[S]) -> String {
    let query: Vec<String> = values
        .iter()
        .map(|v| format!("{}={}", encode_component(key), encode_component(v.as_ref())))
        .collect();

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query.join("&"))
    }
}
