//! jCal (RFC 7265) value shapes.
//!
//! A jCal property value arrives in one of four JSON shapes. Scribes that
//! only understand iCalendar text receive these through a fallback that
//! re-encodes each shape into the equivalent iCalendar value grammar.

use koyomi_core::grammar::{FieldValue, ObjectMap, encode_list, encode_object, encode_structured};
use serde_json::Value as Json;

/// A property value as it appears in a jCal document.
#[derive(Debug, Clone, PartialEq)]
pub enum JCalValue {
    /// A single scalar value.
    Single(Json),
    /// Multiple scalar values (a JSON array of scalars).
    Multi(Vec<Json>),
    /// A structured value: an array whose entries are fields, each field a
    /// scalar or an array of scalars.
    Structured(Vec<Vec<Json>>),
    /// An object value: string keys mapped to scalars or scalar arrays.
    Object(ObjectMap),
}

impl JCalValue {
    /// Coerces a JSON scalar to iCalendar text.
    ///
    /// Strings pass through, `null` becomes the empty string, booleans and
    /// numbers use their JSON rendering.
    #[must_use]
    pub fn scalar_text(value: &Json) -> String {
        match value {
            Json::String(s) => s.clone(),
            Json::Null => String::new(),
            Json::Bool(b) => b.to_string(),
            Json::Number(n) => n.to_string(),
            Json::Array(_) | Json::Object(_) => String::new(),
        }
    }

    /// Re-encodes this value into iCalendar text per the value grammar.
    #[must_use]
    pub fn to_ical_text(&self) -> String {
        match self {
            Self::Single(value) => Self::scalar_text(value),
            Self::Multi(values) => {
                let texts: Vec<String> = values.iter().map(Self::scalar_text).collect();
                encode_list(texts.iter().map(|t| Some(t.as_str())))
            }
            Self::Structured(fields) => {
                let encoded: Vec<FieldValue> = fields
                    .iter()
                    .map(|field| match field.as_slice() {
                        [] => FieldValue::Absent,
                        // A lone null or empty string is an empty component list
                        [single] if Self::scalar_text(single).is_empty() => FieldValue::Absent,
                        [single] => FieldValue::value(Self::scalar_text(single)),
                        many => FieldValue::Values(
                            many.iter().map(|v| Some(Self::scalar_text(v))).collect(),
                        ),
                    })
                    .collect();
                encode_structured(&encoded)
            }
            Self::Object(map) => encode_object(map),
        }
    }
}
