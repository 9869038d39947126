//! Streaming xCal (RFC 6321) reading.
//!
//! [`XCalReader`] walks an XML event stream with an explicit structural
//! state stack and yields one fully-resolved calendar object per
//! `<vcalendar>` element, without holding the whole document in memory.

mod error;
mod read;

pub use error::{XCalError, XCalResult};
pub use read::{ElementType, XCalReader};
