//! The calendar value grammar codec.
//!
//! Escaping, escape-aware tokenization, list / semi-structured / structured
//! field iteration, and key-value object blocks. Every function here is pure
//! and requires no synchronization.

mod escape;
mod list;
mod object;
mod split;
mod structured;

pub use escape::{escape, unescape};
pub use list::{decode_list, encode_list};
pub use object::{ObjectMap, decode_object, encode_object};
pub use split::{Splitter, Token};
pub use structured::{FieldValue, SemiStructuredIter, StructuredIter, encode_structured};
