//! Comma-separated value lists.

use super::escape::escape;
use super::split::Splitter;

/// Encodes a comma-joined list, escaping each value.
///
/// Absence markers encode as the empty string.
#[must_use]
pub fn encode_list<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let encoded: Vec<String> = values
        .into_iter()
        .map(|v| v.map(escape).unwrap_or_default())
        .collect();
    encoded.join(",")
}

/// Decodes a comma-joined list: escape-aware split, per-token unescape, trim.
///
/// An empty input decodes to an empty list. Decoding never nullifies blank
/// values.
#[must_use]
pub fn decode_list(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    Splitter::new(',')
        .unescape(true)
        .split(text)
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}
