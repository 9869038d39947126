//! Date and date-time scribe.
//!
//! Date-time text with a `TZID` parameter cannot be fully interpreted until
//! the enclosing object's timezone definitions are known, so this scribe
//! parses a provisional instant in the default zone and defers the zone
//! binding through the parse context.

use koyomi_core::datetime::{InstantParser, InstantWriter, parse_date};
use koyomi_core::model::{Parameters, Property, ResolvedInstant, Value, ZoneRef};

use super::{PropertyScribe, ScribeError};
use crate::context::{ParseContext, PendingZone, WriteContext};
use crate::datatype::ValueType;
use crate::element::{XCAL_NS, XmlElement};

/// Scribe for DATE and DATE-TIME valued properties (DTSTART, DTSTAMP, ...).
#[derive(Debug, Clone, Copy)]
pub struct DateScribe;

impl DateScribe {
    fn write_value(property: &Property, ctx: &WriteContext, extended: bool) -> String {
        match &property.value {
            Value::Date(date) => {
                let layout = if extended { "%Y-%m-%d" } else { "%Y%m%d" };
                date.format(layout).to_string()
            }
            Value::Instant(instant) => {
                let writer = InstantWriter::new(instant.utc)
                    .extended(extended)
                    .default_zone(ctx.default_zone());
                match &instant.zone {
                    ZoneRef::Utc => writer.write(),
                    ZoneRef::Named(tzid) => writer.named_zone(Some(tzid)).write(),
                    ZoneRef::Local => writer.floating(true).write(),
                }
            }
            Value::Text(_) | Value::List(_) | Value::Xml(_) => property.raw_value.clone(),
        }
    }
}

impl PropertyScribe for DateScribe {
    fn data_type(&self, _name: &str) -> Option<ValueType> {
        Some(ValueType::DateTime)
    }

    fn write_text(&self, property: &Property, ctx: &WriteContext) -> String {
        Self::write_value(property, ctx, false)
    }

    fn parse_text(
        &self,
        name: &str,
        text: &str,
        data_type: Option<ValueType>,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        let date_only = data_type == Some(ValueType::Date) || !text.contains('T');
        if date_only {
            let date =
                parse_date(text).map_err(|err| ScribeError::CannotParse(err.to_string()))?;
            return Ok(Property::new(name, Value::Date(date), text).with_params(params));
        }

        if text.ends_with('Z') {
            let mut warnings = Vec::new();
            let utc = InstantParser::new(text)
                .parse(&mut warnings)
                .map_err(|err| ScribeError::CannotParse(err.to_string()))?;
            return Ok(
                Property::new(name, Value::Instant(ResolvedInstant::utc(utc)), text)
                    .with_params(params),
            );
        }

        // Provisional: interpreted in the default zone, corrected by the
        // timezone-resolution pass once the object closes.
        let mut warnings = Vec::new();
        let utc = InstantParser::new(text)
            .zone(ctx.default_zone())
            .parse(&mut warnings)
            .map_err(|err| ScribeError::CannotParse(err.to_string()))?;

        let instant = match params.tzid() {
            Some(tzid) => {
                let tzid = tzid.to_string();
                ctx.defer_zone(PendingZone::Zoned {
                    tzid: tzid.clone(),
                    raw: text.to_string(),
                });
                ResolvedInstant::named(utc, tzid)
            }
            None => {
                ctx.defer_zone(PendingZone::Floating);
                ResolvedInstant::local(utc)
            }
        };
        Ok(Property::new(name, Value::Instant(instant), text).with_params(params))
    }

    // xCal date-times use the extended layout; the element name tracks
    // whether the value carries a time-of-day.
    fn write_xml(&self, property: &Property, ctx: &WriteContext) -> XmlElement {
        let value_type = if matches!(property.value, Value::Date(_)) {
            ValueType::Date
        } else {
            ValueType::DateTime
        };
        let mut element = XmlElement::new(XCAL_NS, value_type.as_str());
        element.append_text(&Self::write_value(property, ctx, true));
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    const PARIS: Tz = chrono_tz::Europe::Paris;

    #[test]
    fn parse_utc_marker() {
        let mut ctx = ParseContext::new(Tz::UTC);
        let prop = DateScribe
            .parse_text(
                "DTSTART",
                "20130611T134302Z",
                Some(ValueType::DateTime),
                Parameters::new(),
                &mut ctx,
            )
            .unwrap();

        let instant = prop.as_instant().unwrap();
        assert_eq!(instant.zone, ZoneRef::Utc);
        assert_eq!(
            instant.utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
        );
        assert_eq!(ctx.take_pending(), None);
    }

    #[test]
    fn parse_with_tzid_defers_binding() {
        let mut params = Parameters::new();
        params.put("TZID", "Europe/Paris");

        let mut ctx = ParseContext::new(Tz::UTC);
        let prop = DateScribe
            .parse_text(
                "DTSTART",
                "20130611T154302",
                Some(ValueType::DateTime),
                params,
                &mut ctx,
            )
            .unwrap();

        assert_eq!(
            prop.as_instant().unwrap().zone,
            ZoneRef::Named("Europe/Paris".to_string())
        );
        assert_eq!(
            ctx.take_pending(),
            Some(PendingZone::Zoned {
                tzid: "Europe/Paris".to_string(),
                raw: "20130611T154302".to_string(),
            })
        );
    }

    #[test]
    fn parse_floating_defers_marker() {
        let mut ctx = ParseContext::new(Tz::UTC);
        let prop = DateScribe
            .parse_text(
                "DTSTART",
                "20130611T134302",
                Some(ValueType::DateTime),
                Parameters::new(),
                &mut ctx,
            )
            .unwrap();

        assert_eq!(prop.as_instant().unwrap().zone, ZoneRef::Local);
        assert_eq!(ctx.take_pending(), Some(PendingZone::Floating));
    }

    #[test]
    fn parse_date_only() {
        let mut ctx = ParseContext::new(Tz::UTC);
        let prop = DateScribe
            .parse_text(
                "DTSTART",
                "2013-06-11",
                Some(ValueType::Date),
                Parameters::new(),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(
            prop.value.as_date(),
            NaiveDate::from_ymd_opt(2013, 6, 11)
        );
        assert_eq!(ctx.take_pending(), None);
    }

    #[test]
    fn parse_invalid_is_cannot_parse() {
        let mut ctx = ParseContext::new(Tz::UTC);
        let err = DateScribe
            .parse_text(
                "DTSTART",
                "20130611TT",
                Some(ValueType::DateTime),
                Parameters::new(),
                &mut ctx,
            )
            .unwrap_err();
        assert!(matches!(err, ScribeError::CannotParse(_)));
    }

    #[test]
    fn write_named_zone() {
        let utc = Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap();
        let prop = Property::instant("DTSTART", ResolvedInstant::named(utc, PARIS.name()), "");

        let ctx = WriteContext::new(Tz::UTC);
        assert_eq!(DateScribe.write_text(&prop, &ctx), "20130611T154302");
    }

    #[test]
    fn write_xml_extended_with_marker() {
        let utc = Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap();
        let prop = Property::instant("DTSTAMP", ResolvedInstant::utc(utc), "");

        let element = DateScribe.write_xml(&prop, &WriteContext::new(Tz::UTC));
        assert_eq!(element.name, "date-time");
        assert_eq!(element.namespace, XCAL_NS);
        assert_eq!(element.text_content(), "2013-06-11T13:43:02Z");
    }
}
