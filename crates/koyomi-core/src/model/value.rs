//! Typed property values.

use chrono::{DateTime, NaiveDate, Utc};

/// Which zone intent produced an instant.
///
/// Needed so the same absolute instant can be written back without losing
/// its original form: a UTC stamp, a floating/local wall-clock, or a named
/// zone reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneRef {
    /// The text carried a trailing UTC marker.
    Utc,
    /// Floating time: no zone attached, interpreted in the consumer's zone.
    Local,
    /// A named timezone reference (raw TZID, or resolved zone name).
    Named(String),
}

/// An absolute point in time plus the zone intent that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstant {
    /// The absolute timestamp.
    pub utc: DateTime<Utc>,
    /// The zone that produced it.
    pub zone: ZoneRef,
}

impl ResolvedInstant {
    /// Creates a UTC-intent instant.
    #[must_use]
    pub const fn utc(utc: DateTime<Utc>) -> Self {
        Self {
            utc,
            zone: ZoneRef::Utc,
        }
    }

    /// Creates a floating-intent instant.
    #[must_use]
    pub const fn local(utc: DateTime<Utc>) -> Self {
        Self {
            utc,
            zone: ZoneRef::Local,
        }
    }

    /// Creates a named-zone instant.
    #[must_use]
    pub fn named(utc: DateTime<Utc>, tzid: impl Into<String>) -> Self {
        Self {
            utc,
            zone: ZoneRef::Named(tzid.into()),
        }
    }
}

/// A parsed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unescaped text.
    Text(String),
    /// A comma-list of text values.
    List(Vec<String>),
    /// A date-time with zone intent.
    Instant(ResolvedInstant),
    /// A date without time-of-day.
    Date(NaiveDate),
    /// Raw XML content preserved verbatim.
    Xml(String),
}

impl Value {
    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a list if it is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the value as an instant if it is a date-time value.
    #[must_use]
    pub fn as_instant(&self) -> Option<&ResolvedInstant> {
        match self {
            Self::Instant(instant) => Some(instant),
            _ => None,
        }
    }

    /// Returns the value as a date if it is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns the value as raw XML if it is a preserved-XML value.
    #[must_use]
    pub fn as_xml(&self) -> Option<&str> {
        match self {
            Self::Xml(xml) => Some(xml),
            _ => None,
        }
    }
}
