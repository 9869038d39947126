//! Core codecs for calendar data interchange.
//!
//! This crate holds the pieces shared by every encoding of the calendar
//! grammar:
//!
//! - [`grammar`]: the value grammar codec (escaping, escape-aware
//!   tokenization, list / semi-structured / structured field iteration, and
//!   key-value object blocks).
//! - [`datetime`]: the date-time codec, parsing and writing calendar
//!   date-time text with explicit zone configuration.
//! - [`model`]: the calendar object model (components, properties,
//!   parameters, typed values).
//! - [`warning`]: recoverable-warning records shared by all decoders.
//!
//! Everything here is pure with respect to its arguments and requires no
//! synchronization.

pub mod datetime;
pub mod grammar;
pub mod model;
pub mod warning;
