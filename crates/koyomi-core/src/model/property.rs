//! Calendar properties.

use super::parameter::Parameters;
use super::value::{ResolvedInstant, Value};

/// A parsed calendar property.
///
/// The raw value text is preserved alongside the typed value for round-trip
/// fidelity and for deferred re-interpretation (timezone resolution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Parameters,
    /// Parsed value.
    pub value: Value,
    /// Original raw value text.
    pub raw_value: String,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            value: Value::Text(value.clone()),
            raw_value: value,
        }
    }

    /// Creates a property with an instant value and its raw text.
    #[must_use]
    pub fn instant(
        name: impl Into<String>,
        instant: ResolvedInstant,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            value: Value::Instant(instant),
            raw_value: raw_value.into(),
        }
    }

    /// Creates a property with an arbitrary typed value and its raw text.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            value,
            raw_value: raw_value.into(),
        }
    }

    /// Attaches parameters.
    #[must_use]
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the value as an instant if it is a date-time value.
    #[must_use]
    pub fn as_instant(&self) -> Option<&ResolvedInstant> {
        self.value.as_instant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_upper_cased() {
        let prop = Property::text("summary", "Meeting");
        assert_eq!(prop.name, "SUMMARY");
        assert_eq!(prop.as_text(), Some("Meeting"));
    }

    #[test]
    fn params_attach() {
        let mut params = Parameters::new();
        params.put("TZID", "Europe/Paris");
        let prop = Property::text("DTSTART", "x").with_params(params);
        assert_eq!(prop.params.tzid(), Some("Europe/Paris"));
    }
}
