//! Deferred timezone resolution.
//!
//! Date-time properties carrying a `TZID` parameter are parsed provisionally
//! while streaming; once a calendar object closes, this pass resolves every
//! distinct identifier (against the object's own `VTIMEZONE` definitions,
//! then as an IANA name), re-derives each affected instant from its raw text
//! under the resolved zone, and strips the now-redundant parameter.
//!
//! Affected properties are addressed by index paths, so correction is a
//! lookup into the finished component tree rather than shared mutable state
//! with the reader.

use std::str::FromStr;

use chrono_tz::Tz;
use koyomi_core::datetime::InstantParser;
use koyomi_core::model::{Component, Property, ResolvedInstant, Value};
use koyomi_core::warning::{Warning, WarningKind};

use crate::context::PendingZone;

/// Index path to one property in a component tree: child indices from the
/// root, then the property's index within that component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    /// Child-component indices from the root, outermost first.
    pub components: Vec<usize>,
    /// Property index within the addressed component.
    pub property: usize,
}

impl PropertyPath {
    fn lookup_mut<'a>(&self, root: &'a mut Component) -> Option<&'a mut Property> {
        let mut component = root;
        for &index in &self.components {
            component = component.children.get_mut(index)?;
        }
        component.properties.get_mut(self.property)
    }
}

/// The zone assignment a property ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyZone {
    /// Interpreted under a resolved named zone.
    Named(String),
    /// Floating: no zone attached, interpreted in the default zone.
    Floating,
}

/// Per-object zone assignments produced by the resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneInfo {
    zones: Vec<(String, Tz)>,
    properties: Vec<(PropertyPath, PropertyZone)>,
}

impl TimezoneInfo {
    /// The zone a raw timezone identifier resolved to, if it was seen.
    #[must_use]
    pub fn resolved(&self, tzid: &str) -> Option<Tz> {
        self.zones
            .iter()
            .find(|(id, _)| id == tzid)
            .map(|(_, tz)| *tz)
    }

    /// Distinct raw identifiers in first-seen order with their zones.
    #[must_use]
    pub fn zones(&self) -> &[(String, Tz)] {
        &self.zones
    }

    /// Zone assignment per affected property.
    #[must_use]
    pub fn properties(&self) -> &[(PropertyPath, PropertyZone)] {
        &self.properties
    }

    /// Whether the addressed property was floating.
    #[must_use]
    pub fn is_floating(&self, path: &PropertyPath) -> bool {
        self.properties
            .iter()
            .any(|(p, zone)| p == path && *zone == PropertyZone::Floating)
    }
}

/// Resolves every deferred zone binding of a finished calendar object.
pub(crate) fn resolve_timezones(
    root: &mut Component,
    pending: Vec<(PropertyPath, PendingZone)>,
    default_zone: Tz,
    warnings: &mut Vec<Warning>,
) -> TimezoneInfo {
    let mut info = TimezoneInfo::default();

    // Distinct identifiers, first-seen order
    for (_, zone) in &pending {
        if let PendingZone::Zoned { tzid, .. } = zone {
            if info.resolved(tzid).is_none() {
                let tz = resolve_identifier(root, tzid, default_zone, warnings);
                info.zones.push((tzid.clone(), tz));
            }
        }
    }

    for (path, zone) in pending {
        match zone {
            PendingZone::Zoned { tzid, raw } => {
                let Some(tz) = info.resolved(&tzid) else {
                    continue;
                };
                if let Some(property) = path.lookup_mut(root) {
                    correct_instant(property, &raw, tz, warnings);
                }
                info.properties
                    .push((path, PropertyZone::Named(tz.name().to_string())));
            }
            PendingZone::Floating => {
                info.properties.push((path, PropertyZone::Floating));
            }
        }
    }

    info
}

/// Resolves one raw identifier against the object's timezone definitions,
/// then as a standard zone name.
fn resolve_identifier(
    root: &Component,
    tzid: &str,
    default_zone: Tz,
    warnings: &mut Vec<Warning>,
) -> Tz {
    let defined = root
        .timezones()
        .iter()
        .any(|tz| tz.timezone_id() == Some(tzid));

    match (defined, Tz::from_str(tzid)) {
        (true, Ok(tz)) => tz,
        (true, Err(_)) => {
            // The object defines the zone but its rules are not expanded
            // here; fall back without a warning.
            tracing::debug!(tzid, "defined timezone is not an IANA name, using default zone");
            default_zone
        }
        (false, Ok(tz)) => {
            warnings.push(Warning::new(
                WarningKind::TimezoneFallback,
                format!("no timezone definition for {tzid:?}, resolved as a standard zone name"),
            ));
            tz
        }
        (false, Err(_)) => {
            tracing::warn!(tzid, "unresolvable timezone identifier");
            warnings.push(Warning::new(
                WarningKind::UnresolvedTimezone,
                format!("{tzid:?} has no definition and is not a standard zone name"),
            ));
            default_zone
        }
    }
}

/// Re-derives an instant from its raw text under the resolved zone and
/// strips the `TZID` parameter.
fn correct_instant(property: &mut Property, raw: &str, tz: Tz, warnings: &mut Vec<Warning>) {
    match InstantParser::new(raw).zone(tz).parse(warnings) {
        Ok(utc) => {
            property.value = Value::Instant(ResolvedInstant::named(utc, tz.name()));
            property.params.remove("TZID");
        }
        Err(err) => {
            tracing::warn!(raw, %err, "raw date text no longer parses during zone correction");
        }
    }
}
