//! Calendar object model.
//!
//! Plain data holders built incrementally by the streaming readers;
//! ownership passes to the caller on each successful read.

mod component;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use parameter::Parameters;
pub use property::Property;
pub use value::{ResolvedInstant, Value, ZoneRef};
