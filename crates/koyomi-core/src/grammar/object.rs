//! Key-value object blocks.
//!
//! An object block is an ordered mapping from an upper-cased key to an
//! ordered sequence of value tokens (e.g. `A=one;B=two,three`).

use super::escape::escape;
use super::split::Splitter;

/// Insertion-ordered multi-map with case-insensitive keys.
///
/// Keys are canonicalized to upper case on insert; multiple values per key
/// are preserved in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ObjectMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a value under a key (case-folded to upper).
    pub fn put(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().to_ascii_uppercase();
        if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            values.push(value.into());
        } else {
            self.entries.push((key, vec![value.into()]));
        }
    }

    /// Returns the values for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = key.to_ascii_uppercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value for a key, if present.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)?.first().map(String::as_str)
    }

    /// Returns whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Decodes object-block text into an [`ObjectMap`].
///
/// Fields split on `;` (escape-aware); each field splits on its *first* `=`
/// only; text after it is kept verbatim, further `=` characters are not
/// special. A field without `=` produces one empty-string value. Values are
/// comma-split and unescaped. An empty input decodes to an empty map.
#[must_use]
pub fn decode_object(text: &str) -> ObjectMap {
    let mut map = ObjectMap::new();
    if text.trim().is_empty() {
        return map;
    }

    for field in Splitter::new(';').split(text) {
        let field = field.unwrap_or_default();
        if field.is_empty() {
            continue;
        }

        match field.find('=') {
            Some(pos) => {
                let key = &field[..pos];
                for value in Splitter::new(',').unescape(true).split(&field[pos + 1..]) {
                    map.put(key, value.unwrap_or_default());
                }
            }
            None => map.put(&field, String::new()),
        }
    }

    map
}

/// Encodes an [`ObjectMap`] as object-block text.
#[must_use]
pub fn encode_object(map: &ObjectMap) -> String {
    let fields: Vec<String> = map
        .iter()
        .map(|(key, values)| {
            let joined: Vec<String> = values.iter().map(|v| escape(v)).collect();
            format!("{key}={}", joined.join(","))
        })
        .collect();
    fields.join(";")
}
