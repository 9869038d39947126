//! Calendar encodings and streaming.
//!
//! Builds on [`koyomi_core`] to move calendar objects in and out of the xCal
//! (RFC 6321) and jCal (RFC 7265) encodings:
//!
//! - [`xcal`]: the streaming xCal reader, yielding one fully-resolved
//!   calendar object per `<vcalendar>` element.
//! - [`scribe`]: per-property codecs with generic fallback machinery.
//! - [`jcal`]: jCal value shapes and their plain-text re-encoding.
//! - [`timezone`]: the deferred timezone-resolution pass.

pub mod context;
pub mod datatype;
pub mod element;
pub mod jcal;
pub mod scribe;
pub mod timezone;
pub mod xcal;

pub use context::{ParseContext, PendingZone, WriteContext};
pub use datatype::ValueType;
pub use element::{XCAL_NS, XmlElement, XmlNode};
pub use jcal::JCalValue;
pub use scribe::{
    DateScribe, PropertyScribe, RawXmlScribe, ScribeError, ScribeIndex, TextListScribe, TextScribe,
};
pub use timezone::{PropertyPath, PropertyZone, TimezoneInfo};
pub use xcal::{XCalError, XCalReader, XCalResult};
