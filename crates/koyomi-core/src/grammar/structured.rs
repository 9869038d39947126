//! Semi-structured and structured field iteration.
//!
//! A calendar value text is a sequence of fields separated by `;`, each
//! field further split into components by `,`. The semi-structured view
//! treats each field as one fully-unescaped string; the structured view
//! exposes the component sequence per field.

use std::collections::VecDeque;

use super::escape::{escape, unescape};
use super::split::{Splitter, Token};

/// Iterates over the `;`-separated fields of a value, fully unescaping each
/// (so escaped commas and semicolons resolve to literal characters).
///
/// Implements [`Iterator`]: the outer `None` means the field count is
/// exhausted, which is distinct from a present-but-blank field (`Some("")`
/// or `Some(None)` under `nullify_empty`).
#[derive(Debug)]
pub struct SemiStructuredIter {
    fields: std::vec::IntoIter<Token>,
}

impl SemiStructuredIter {
    /// Splits raw value text on the field delimiter.
    #[must_use]
    pub fn from_text(text: &str, nullify_empty: bool) -> Self {
        let fields = Splitter::new(';')
            .unescape(true)
            .nullify_empty(nullify_empty)
            .split(text);
        Self {
            fields: fields.into_iter(),
        }
    }

    /// Builds the iterator from already-segmented fields.
    ///
    /// Each field's components are re-joined with `,`, matching what raw
    /// text yields when a field contains unescaped literal commas.
    #[must_use]
    pub fn from_fields(fields: Vec<Vec<String>>, nullify_empty: bool) -> Self {
        let fields: Vec<Token> = fields
            .into_iter()
            .map(|components| {
                let joined = components.join(",");
                if nullify_empty && joined.is_empty() {
                    None
                } else {
                    Some(joined)
                }
            })
            .collect();
        Self {
            fields: fields.into_iter(),
        }
    }

    /// Reports whether another field exists, blank or not.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.fields.len() > 0
    }
}

impl Iterator for SemiStructuredIter {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.fields.next()
    }
}

/// Iterates over structured fields, exposing the ordered component sequence
/// for each.
///
/// A blank field and a field past the end both yield an empty component
/// sequence; use [`StructuredIter::has_next`] when the two cases must be
/// told apart.
#[derive(Debug)]
pub struct StructuredIter {
    fields: VecDeque<Vec<String>>,
}

impl StructuredIter {
    /// Splits raw value text on the field delimiter, then each field on the
    /// component delimiter, unescaping components.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let fields = Splitter::new(';')
            .split(text)
            .into_iter()
            .map(|field| {
                let field = field.unwrap_or_default();
                if field.is_empty() {
                    Vec::new()
                } else {
                    Splitter::new(',')
                        .unescape(true)
                        .split(&field)
                        .into_iter()
                        .map(Option::unwrap_or_default)
                        .collect()
                }
            })
            .collect();
        Self { fields }
    }

    /// Builds the iterator from an already-segmented source with the same
    /// shape (field list, each single- or multi-valued).
    #[must_use]
    pub fn from_fields(fields: Vec<Vec<String>>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    /// Returns the component sequence for the next field.
    ///
    /// Empty both when the field is blank and when iteration is past the
    /// end.
    pub fn next_component(&mut self) -> Vec<String> {
        self.fields.pop_front().unwrap_or_default()
    }

    /// Returns the first component of the next field, or `None` if the
    /// field has no components.
    pub fn next_string(&mut self) -> Option<String> {
        self.next_component().into_iter().next()
    }

    /// Reports whether another field exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// One positional field of a structured value, for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Encodes to an empty field.
    Absent,
    /// A single value, escaped on encode.
    Value(String),
    /// An ordered component sequence, joined by `,` with each component
    /// escaped; absence markers become the empty string.
    Values(Vec<Option<String>>),
}

impl FieldValue {
    /// Convenience constructor taking any value with a canonical text form.
    #[must_use]
    pub fn value(v: impl ToString) -> Self {
        Self::Value(v.to_string())
    }

    /// Convenience constructor for a component sequence.
    #[must_use]
    pub fn values<'a, I>(components: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self::Values(
            components
                .into_iter()
                .map(|c| c.map(str::to_string))
                .collect(),
        )
    }
}

/// Encodes positional fields into structured value text.
#[must_use]
pub fn encode_structured(fields: &[FieldValue]) -> String {
    let encoded: Vec<String> = fields
        .iter()
        .map(|field| match field {
            FieldValue::Absent => String::new(),
            FieldValue::Value(v) => escape(v),
            FieldValue::Values(components) => {
                let parts: Vec<String> = components
                    .iter()
                    .map(|c| c.as_deref().map(escape).unwrap_or_default())
                    .collect();
                parts.join(",")
            }
        })
        .collect();
    encoded.join(";")
}
