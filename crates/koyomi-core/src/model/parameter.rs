//! Property parameters.

/// Insertion-ordered parameter multi-map with case-insensitive names.
///
/// Names are canonicalized to upper case on insert. Cloning produces an
/// independent copy; mutating the clone never affects the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, Vec<String>)>,
}

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a value under a parameter name.
    pub fn put(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_uppercase();
        if let Some((_, values)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            values.push(value.into());
        } else {
            self.entries.push((name, vec![value.into()]));
        }
    }

    /// Sets a parameter, replacing any existing values under the name.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.remove(name.as_ref());
        self.put(name, value);
    }

    /// Removes a parameter entirely.
    pub fn remove(&mut self, name: &str) {
        let name = name.to_ascii_uppercase();
        self.entries.retain(|(n, _)| *n != name);
    }

    /// Returns the values for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let name = name.to_ascii_uppercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value for a parameter, if present.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    /// Returns whether a parameter is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the TZID parameter value if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.first("TZID")
    }

    /// Returns the VALUE parameter if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.first("VALUE")
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_fold_to_upper() {
        let mut params = Parameters::new();
        params.put("tzid", "America/New_York");
        assert_eq!(params.tzid(), Some("America/New_York"));
        assert!(params.has("TZID"));
    }

    #[test]
    fn multiple_values_keep_order() {
        let mut params = Parameters::new();
        params.put("DELEGATED-TO", "mailto:a@example.com");
        params.put("DELEGATED-TO", "mailto:b@example.com");
        assert_eq!(
            params.get("delegated-to"),
            Some(
                &[
                    "mailto:a@example.com".to_string(),
                    "mailto:b@example.com".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn remove_strips_all_values() {
        let mut params = Parameters::new();
        params.put("TZID", "X");
        params.put("VALUE", "DATE");
        params.remove("tzid");
        assert!(params.tzid().is_none());
        assert_eq!(params.value_type(), Some("DATE"));
    }
}
