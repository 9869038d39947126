//! Calendar date-time parsing and writing.
//!
//! Both directions support the basic (`yyyymmdd['T'hhmmss]`) and extended
//! (dash/colon-separated) layouts. There is no process-global zone: the
//! default zone used for floating text is an explicit builder field, UTC
//! unless configured.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::warning::{Warning, WarningKind};

/// Error raised for date-time text that does not match either layout.
#[derive(Debug, Error)]
pub enum DateTimeError {
    /// The text is not a valid basic or extended date or date-time.
    #[error("invalid date-time text: {0}")]
    InvalidFormat(String),
}

/// Zone interpretation requested for a parse.
#[derive(Debug, Clone)]
enum ZoneChoice<'a> {
    Default,
    Named(&'a str),
    Fixed(Tz),
}

/// Builder-style parser for calendar date-time text.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use koyomi_core::datetime::InstantParser;
///
/// let mut warnings = Vec::new();
/// let instant = InstantParser::new("20130611T134302Z")
///     .parse(&mut warnings)
///     .unwrap();
/// assert_eq!(instant, Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap());
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct InstantParser<'a> {
    text: &'a str,
    zone: ZoneChoice<'a>,
    default_zone: Tz,
}

impl<'a> InstantParser<'a> {
    /// Creates a parser for the given text.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            zone: ZoneChoice::Default,
            default_zone: Tz::UTC,
        }
    }

    /// Requests interpretation in the named zone.
    ///
    /// If the name cannot be resolved, parsing falls back to the default
    /// zone and signals exactly one recoverable warning.
    #[must_use]
    pub const fn named_zone(mut self, tzid: &'a str) -> Self {
        self.zone = ZoneChoice::Named(tzid);
        self
    }

    /// Requests interpretation in a concrete zone. Always succeeds; no
    /// warning channel needed.
    #[must_use]
    pub const fn zone(mut self, tz: Tz) -> Self {
        self.zone = ZoneChoice::Fixed(tz);
        self
    }

    /// Sets the zone used when no explicit zone applies.
    #[must_use]
    pub const fn default_zone(mut self, tz: Tz) -> Self {
        self.default_zone = tz;
        self
    }

    /// Parses the text into an absolute instant.
    ///
    /// A trailing `Z` forces UTC regardless of any zone request. Date-only
    /// text resolves to midnight in the effective zone.
    ///
    /// ## Errors
    /// Returns an error if the text matches neither the basic nor the
    /// extended layout.
    pub fn parse(self, warnings: &mut Vec<Warning>) -> Result<DateTime<Utc>, DateTimeError> {
        let (naive, is_utc) = parse_naive(self.text)?;
        if is_utc {
            return Ok(Utc.from_utc_datetime(&naive));
        }

        let tz = match self.zone {
            ZoneChoice::Default => self.default_zone,
            ZoneChoice::Fixed(tz) => tz,
            ZoneChoice::Named(tzid) => match Tz::from_str(tzid) {
                Ok(tz) => tz,
                Err(_) => {
                    tracing::debug!(tzid, "unknown timezone, falling back to the default zone");
                    warnings.push(Warning::new(
                        WarningKind::UnresolvedTimezone,
                        format!("unknown timezone {tzid:?}, using the default zone"),
                    ));
                    self.default_zone
                }
            },
        };

        Ok(resolve_local(naive, tz))
    }
}

/// Zone rendering requested for a write.
#[derive(Debug, Clone)]
enum WriteZone {
    Utc,
    Named(String),
    Fixed(Tz),
    Floating,
}

/// Builder-style writer for calendar date-time text.
///
/// The default renders the instant as UTC with a trailing marker.
#[derive(Debug, Clone)]
pub struct InstantWriter {
    instant: DateTime<Utc>,
    include_time: bool,
    extended: bool,
    zone: WriteZone,
    default_zone: Tz,
}

impl InstantWriter {
    /// Creates a writer for the given instant.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            include_time: true,
            extended: false,
            zone: WriteZone::Utc,
            default_zone: Tz::UTC,
        }
    }

    /// Whether to include the time-of-day (default true). `false` uses the
    /// date-only layout.
    #[must_use]
    pub const fn time(mut self, include_time: bool) -> Self {
        self.include_time = include_time;
        self
    }

    /// Whether to use dash/colon separators (default false).
    #[must_use]
    pub const fn extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// Renders the instant's wall-clock in the named zone, with no UTC
    /// marker and no zone suffix. Falls back silently to UTC rendering if
    /// the name cannot be resolved; `None` keeps UTC rendering.
    #[must_use]
    pub fn named_zone(mut self, tzid: Option<&str>) -> Self {
        if let Some(tzid) = tzid {
            self.zone = WriteZone::Named(tzid.to_string());
        }
        self
    }

    /// Renders the instant's wall-clock in a concrete zone.
    #[must_use]
    pub fn zone(mut self, tz: Tz) -> Self {
        self.zone = WriteZone::Fixed(tz);
        self
    }

    /// `true` renders wall-clock in the default zone with no suffix.
    /// `false` is inert and does not cancel any other zone option.
    #[must_use]
    pub fn floating(mut self, floating: bool) -> Self {
        if floating {
            self.zone = WriteZone::Floating;
        }
        self
    }

    /// Sets the zone used for floating rendering.
    #[must_use]
    pub const fn default_zone(mut self, tz: Tz) -> Self {
        self.default_zone = tz;
        self
    }

    /// Renders the instant as text.
    #[must_use]
    pub fn write(&self) -> String {
        let (naive, utc_marker) = match &self.zone {
            WriteZone::Utc => (self.instant.naive_utc(), true),
            WriteZone::Named(tzid) => match Tz::from_str(tzid) {
                Ok(tz) => (self.instant.with_timezone(&tz).naive_local(), false),
                Err(_) => (self.instant.naive_utc(), true),
            },
            WriteZone::Fixed(tz) => (self.instant.with_timezone(tz).naive_local(), false),
            WriteZone::Floating => (
                self.instant.with_timezone(&self.default_zone).naive_local(),
                false,
            ),
        };

        if !self.include_time {
            let layout = if self.extended { "%Y-%m-%d" } else { "%Y%m%d" };
            return naive.format(layout).to_string();
        }

        let layout = if self.extended {
            "%Y-%m-%dT%H:%M:%S"
        } else {
            "%Y%m%dT%H%M%S"
        };
        let mut text = naive.format(layout).to_string();
        if utc_marker {
            text.push('Z');
        }
        text
    }
}

/// Parses date or date-time text in either layout, returning the wall-clock
/// value and whether a trailing UTC marker was present.
fn parse_naive(text: &str) -> Result<(NaiveDateTime, bool), DateTimeError> {
    let (text, is_utc) = match text.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (text, false),
    };

    let extended = text.contains('-');
    let naive = if text.contains('T') {
        let layout = if extended {
            "%Y-%m-%dT%H:%M:%S"
        } else {
            "%Y%m%dT%H%M%S"
        };
        NaiveDateTime::parse_from_str(text, layout)
            .map_err(|err| DateTimeError::InvalidFormat(format!("{text:?}: {err}")))?
    } else {
        let layout = if extended { "%Y-%m-%d" } else { "%Y%m%d" };
        NaiveDate::parse_from_str(text, layout)
            .map_err(|err| DateTimeError::InvalidFormat(format!("{text:?}: {err}")))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| DateTimeError::InvalidFormat(text.to_string()))?
    };

    Ok((naive, is_utc))
}

/// Parses date-only text in either layout.
///
/// ## Errors
/// Returns an error if the text is not a bare date in the basic or extended
/// layout.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateTimeError> {
    let layout = if text.contains('-') {
        "%Y-%m-%d"
    } else {
        "%Y%m%d"
    };
    NaiveDate::parse_from_str(text, layout)
        .map_err(|err| DateTimeError::InvalidFormat(format!("{text:?}: {err}")))
}

/// Interprets a wall-clock value in a zone.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant;
/// non-existent local times (DST gap) are interpreted against the
/// post-transition offset.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        chrono::LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&naive).fix();
            Utc.from_utc_datetime(&(naive - offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    // +01:00, no DST, so local wall-clock arithmetic stays fixed
    const LOCAL: Tz = chrono_tz::Etc::GMTMinus1;
    const JOHANNESBURG: Tz = chrono_tz::Africa::Johannesburg; // +02:00

    fn datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
    }

    #[test]
    fn parse_utc_marker() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611T134302Z")
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_default_zone() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611T144302")
            .default_zone(LOCAL)
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_named_zone() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611T154302")
            .named_zone("Africa/Johannesburg")
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_zone_object() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611T154302")
            .zone(JOHANNESBURG)
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_unresolvable_named_zone_warns_once() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611T144302")
            .named_zone("invalid/timezone")
            .default_zone(LOCAL)
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnresolvedTimezone);
    }

    #[test]
    fn parse_extended_layout() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("2013-06-11T13:43:02Z")
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, datetime());
    }

    #[test]
    fn parse_date_only() {
        let mut warnings = Vec::new();
        let actual = InstantParser::new("20130611")
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(actual, Utc.with_ymd_and_hms(2013, 6, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_invalid_text() {
        let mut warnings = Vec::new();
        assert!(InstantParser::new("not-a-date").parse(&mut warnings).is_err());
        assert!(InstantParser::new("20130611TT").parse(&mut warnings).is_err());
    }

    #[test]
    fn write_default_is_utc() {
        assert_eq!(InstantWriter::new(datetime()).write(), "20130611T134302Z");
    }

    #[test]
    fn write_extended() {
        let actual = InstantWriter::new(datetime()).extended(true).write();
        assert_eq!(actual, "2013-06-11T13:43:02Z");
    }

    #[test]
    fn write_date_only() {
        let actual = InstantWriter::new(datetime()).time(false).write();
        assert_eq!(actual, "20130611");

        let actual = InstantWriter::new(datetime())
            .time(false)
            .extended(true)
            .write();
        assert_eq!(actual, "2013-06-11");
    }

    #[test]
    fn write_named_zone() {
        let actual = InstantWriter::new(datetime())
            .named_zone(Some("Africa/Johannesburg"))
            .write();
        assert_eq!(actual, "20130611T154302");

        let actual = InstantWriter::new(datetime())
            .named_zone(Some("Africa/Johannesburg"))
            .extended(true)
            .write();
        assert_eq!(actual, "2013-06-11T15:43:02");
    }

    #[test]
    fn write_zone_object() {
        let actual = InstantWriter::new(datetime()).zone(JOHANNESBURG).write();
        assert_eq!(actual, "20130611T154302");
    }

    #[test]
    fn write_invalid_named_zone_falls_back_to_utc() {
        let actual = InstantWriter::new(datetime())
            .named_zone(Some("invalid/timezone"))
            .write();
        assert_eq!(actual, "20130611T134302Z");
    }

    #[test]
    fn write_named_zone_none_keeps_utc() {
        let actual = InstantWriter::new(datetime()).named_zone(None).write();
        assert_eq!(actual, "20130611T134302Z");
    }

    #[test]
    fn write_floating() {
        let actual = InstantWriter::new(datetime())
            .floating(true)
            .default_zone(LOCAL)
            .write();
        assert_eq!(actual, "20130611T144302");
    }

    #[test]
    fn write_floating_false_is_inert() {
        let actual = InstantWriter::new(datetime())
            .floating(false)
            .default_zone(LOCAL)
            .write();
        assert_eq!(actual, "20130611T134302Z");

        let actual = InstantWriter::new(datetime())
            .zone(JOHANNESBURG)
            .floating(false)
            .write();
        assert_eq!(actual, "20130611T154302");
    }

    #[test]
    fn parse_write_round_trip() {
        let mut warnings = Vec::new();
        let parsed = InstantParser::new("20130611T134302Z")
            .parse(&mut warnings)
            .unwrap();
        assert_eq!(InstantWriter::new(parsed).write(), "20130611T134302Z");
    }
}
