//! Calendar value data types and their xCal element names.

use std::fmt;

/// A declared value data type (the `VALUE` parameter vocabulary, which is
/// also the xCal data-element naming vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Inline binary data.
    Binary,
    /// TRUE/FALSE.
    Boolean,
    /// A calendar user address.
    CalAddress,
    /// A date without time-of-day.
    Date,
    /// A date with time-of-day.
    DateTime,
    /// A duration of time.
    Duration,
    /// A floating-point number.
    Float,
    /// An integer.
    Integer,
    /// A period of time.
    Period,
    /// A recurrence rule.
    Recur,
    /// Plain text.
    Text,
    /// A time-of-day.
    Time,
    /// A URI.
    Uri,
    /// A UTC offset.
    UtcOffset,
}

impl ValueType {
    /// Returns the xCal element name for this data type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::CalAddress => "cal-address",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Duration => "duration",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Period => "period",
            Self::Recur => "recur",
            Self::Text => "text",
            Self::Time => "time",
            Self::Uri => "uri",
            Self::UtcOffset => "utc-offset",
        }
    }

    /// Parses a data type from an element or parameter name
    /// (case-insensitive). Returns `None` for unrecognized names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "binary" => Some(Self::Binary),
            "boolean" => Some(Self::Boolean),
            "cal-address" => Some(Self::CalAddress),
            "date" => Some(Self::Date),
            "date-time" => Some(Self::DateTime),
            "duration" => Some(Self::Duration),
            "float" => Some(Self::Float),
            "integer" => Some(Self::Integer),
            "period" => Some(Self::Period),
            "recur" => Some(Self::Recur),
            "text" => Some(Self::Text),
            "time" => Some(Self::Time),
            "uri" => Some(Self::Uri),
            "utc-offset" => Some(Self::UtcOffset),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
