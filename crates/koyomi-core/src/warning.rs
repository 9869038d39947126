//! Recoverable-warning records.
//!
//! Data-level problems never abort an object; they are resolved locally with
//! a fallback value plus exactly one warning.

use std::fmt;

/// Classifies a recoverable warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A named timezone could not be resolved; the default zone was used.
    UnresolvedTimezone,
    /// A TZID had no matching timezone-definition component but resolved
    /// directly as a standard zone name.
    TimezoneFallback,
    /// No recognized data-type element was found; the value was decoded as
    /// plain text with an unresolved data type.
    UndeterminedType,
    /// A structured or multi-valued JSON shape was decoded through the
    /// plain-text fallback rather than a native structured decode.
    StructuredFallback,
    /// Malformed per-property XML content was preserved as a raw XML value.
    MalformedPropertyXml,
    /// A scribe determined the property instance was unusable and omitted
    /// it from the object.
    SkippedProperty,
}

impl WarningKind {
    /// Returns a short label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnresolvedTimezone => "unresolved timezone",
            Self::TimezoneFallback => "timezone fallback",
            Self::UndeterminedType => "undetermined data type",
            Self::StructuredFallback => "structured fallback decode",
            Self::MalformedPropertyXml => "malformed property XML",
            Self::SkippedProperty => "skipped property",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable warning attached to the object being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Warning class.
    pub kind: WarningKind,
    /// Name of the property the warning belongs to, when known.
    pub property: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl Warning {
    /// Creates a warning with no property attribution.
    #[must_use]
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            property: None,
            message: message.into(),
        }
    }

    /// Attributes this warning to a property.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{property}: {}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}
