//! Per-document codec context.
//!
//! A context carries the explicit default timezone (there is no process-wide
//! default) and accumulates non-fatal warnings while a single calendar object
//! is decoded. Timezone bindings discovered during property parsing are
//! deferred here until the whole object is available and its `VTIMEZONE`
//! definitions can be consulted.

use chrono_tz::Tz;
use koyomi_core::warning::Warning;

/// A timezone binding recorded while parsing a date-time property, resolved
/// after the enclosing calendar object closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingZone {
    /// The property carried a `TZID` parameter; `raw` is the unparsed
    /// date-time text, re-parsed once the identifier resolves.
    Zoned { tzid: String, raw: String },
    /// The property had neither `TZID` nor a UTC designator.
    Floating,
}

/// Mutable state shared by scribes while one calendar object is parsed.
#[derive(Debug)]
pub struct ParseContext {
    default_zone: Tz,
    warnings: Vec<Warning>,
    pending: Option<PendingZone>,
}

impl ParseContext {
    #[must_use]
    pub const fn new(default_zone: Tz) -> Self {
        Self {
            default_zone,
            warnings: Vec::new(),
            pending: None,
        }
    }

    /// The zone used when a timezone identifier cannot be resolved.
    #[must_use]
    pub const fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// Records a non-fatal warning against the current property.
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Appends warnings produced by a nested parser.
    pub fn extend_warnings(&mut self, warnings: Vec<Warning>) {
        self.warnings.extend(warnings);
    }

    /// Defers a timezone binding for the property currently being parsed.
    pub fn defer_zone(&mut self, zone: PendingZone) {
        self.pending = Some(zone);
    }

    /// Takes the deferred zone binding, if the last property recorded one.
    pub fn take_pending(&mut self) -> Option<PendingZone> {
        self.pending.take()
    }

    /// Drains all accumulated warnings.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// State shared by scribes while a calendar object is written.
#[derive(Debug, Clone, Copy)]
pub struct WriteContext {
    default_zone: Tz,
}

impl WriteContext {
    #[must_use]
    pub const fn new(default_zone: Tz) -> Self {
        Self { default_zone }
    }

    #[must_use]
    pub const fn default_zone(&self) -> Tz {
        self.default_zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koyomi_core::warning::{Warning, WarningKind};

    #[test]
    fn pending_zone_is_taken_once() {
        let mut ctx = ParseContext::new(Tz::UTC);
        ctx.defer_zone(PendingZone::Floating);
        assert_eq!(ctx.take_pending(), Some(PendingZone::Floating));
        assert_eq!(ctx.take_pending(), None);
    }

    #[test]
    fn warnings_drain() {
        let mut ctx = ParseContext::new(Tz::UTC);
        ctx.warn(Warning::new(WarningKind::SkippedProperty, "skipped"));
        assert_eq!(ctx.take_warnings().len(), 1);
        assert!(ctx.warnings().is_empty());
    }
}
