//! Property scribes.
//!
//! A scribe converts one property between its typed model form and each
//! encoding. The trait carries generic fallback bodies as default methods, so
//! a minimal scribe only supplies the plain-text direction; the property name
//! is an argument everywhere, letting one scribe serve many property names.

mod date;
mod raw;
mod text;

use std::collections::HashMap;

use koyomi_core::model::{Parameters, Property};
use koyomi_core::warning::{Warning, WarningKind};
use serde_json::Value as Json;
use thiserror::Error;

use crate::context::{ParseContext, WriteContext};
use crate::datatype::ValueType;
use crate::element::{XCAL_NS, XmlElement};
use crate::jcal::JCalValue;

pub use date::DateScribe;
pub use raw::RawXmlScribe;
pub use text::{TextListScribe, TextScribe};

/// Why a scribe declined to produce a property.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScribeError {
    /// The property instance is unusable and should be omitted from the
    /// object, with a warning.
    #[error("property skipped: {0}")]
    Skip(String),
    /// The value could not be interpreted; the caller preserves the raw
    /// content instead.
    #[error("cannot parse value: {0}")]
    CannotParse(String),
}

/// Converts one property between model form and each encoding.
pub trait PropertyScribe {
    /// The data type this scribe declares when none is carried by the
    /// encoding.
    fn data_type(&self, _name: &str) -> Option<ValueType> {
        Some(ValueType::Text)
    }

    /// Renders the property's value as plain iCalendar text.
    fn write_text(&self, property: &Property, ctx: &WriteContext) -> String;

    /// Parses plain iCalendar text into a property.
    ///
    /// ## Errors
    /// [`ScribeError::Skip`] omits the property; [`ScribeError::CannotParse`]
    /// asks the caller to preserve the raw content.
    fn parse_text(
        &self,
        name: &str,
        text: &str,
        data_type: Option<ValueType>,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError>;

    /// Returns the parameters to write for a property.
    ///
    /// The returned set is independent of the property's own, so writers may
    /// adjust it without mutating the model.
    fn prepare_parameters(&self, property: &Property, _ctx: &WriteContext) -> Parameters {
        property.params.clone()
    }

    /// Parses the accumulated xCal content of a property element.
    ///
    /// The default takes the first child in the xCal namespace whose name is
    /// a recognized data type and parses its text under that type. With no
    /// such child the element's descendant text is flattened and parsed with
    /// an unresolved data type, plus one warning.
    ///
    /// ## Errors
    /// See [`PropertyScribe::parse_text`].
    fn parse_xml(
        &self,
        name: &str,
        element: &XmlElement,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        parse_xml_fallback(self, name, element, params, ctx)
    }

    /// Parses a jCal value.
    ///
    /// The default re-encodes each shape into iCalendar text through the
    /// value grammar and delegates to [`PropertyScribe::parse_text`],
    /// recording one warning per property so callers can tell a fallback
    /// decode from a native one.
    ///
    /// ## Errors
    /// See [`PropertyScribe::parse_text`].
    fn parse_json(
        &self,
        name: &str,
        value: &JCalValue,
        data_type: Option<ValueType>,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        parse_json_fallback(self, name, value, data_type, params, ctx)
    }

    /// Writes the property as an xCal data element.
    fn write_xml(&self, property: &Property, ctx: &WriteContext) -> XmlElement {
        let name = self
            .data_type(&property.name)
            .map_or("unknown", ValueType::as_str);
        let mut element = XmlElement::new(XCAL_NS, name);
        element.append_text(&self.write_text(property, ctx));
        element
    }

    /// Writes the property as a jCal value.
    fn write_json(&self, property: &Property, ctx: &WriteContext) -> JCalValue {
        JCalValue::Single(Json::String(self.write_text(property, ctx)))
    }
}

/// Generic xCal decode; shared so overriding scribes can still reach it.
pub(crate) fn parse_xml_fallback<S: PropertyScribe + ?Sized>(
    scribe: &S,
    name: &str,
    element: &XmlElement,
    params: Parameters,
    ctx: &mut ParseContext,
) -> Result<Property, ScribeError> {
    let typed = element.child_elements().find_map(|child| {
        if child.namespace != XCAL_NS {
            return None;
        }
        ValueType::parse(&child.name).map(|vt| (vt, child))
    });

    match typed {
        Some((value_type, child)) => {
            scribe.parse_text(name, &child.text_content(), Some(value_type), params, ctx)
        }
        None => {
            ctx.warn(
                Warning::new(
                    WarningKind::UndeterminedType,
                    "no recognized data-type element, parsed as plain text",
                )
                .with_property(name),
            );
            scribe.parse_text(name, &element.text_content(), None, params, ctx)
        }
    }
}

/// Generic jCal decode; shared so overriding scribes can still reach it.
pub(crate) fn parse_json_fallback<S: PropertyScribe + ?Sized>(
    scribe: &S,
    name: &str,
    value: &JCalValue,
    data_type: Option<ValueType>,
    params: Parameters,
    ctx: &mut ParseContext,
) -> Result<Property, ScribeError> {
    let shape = match value {
        JCalValue::Single(_) => "scalar",
        JCalValue::Multi(_) => "multi-valued",
        JCalValue::Structured(_) => "structured",
        JCalValue::Object(_) => "object",
    };
    ctx.warn(
        Warning::new(
            WarningKind::StructuredFallback,
            format!("{shape} JSON value decoded through the plain-text fallback"),
        )
        .with_property(name),
    );
    scribe.parse_text(name, &value.to_ical_text(), data_type, params, ctx)
}

/// Registry mapping property names to scribes.
///
/// Unregistered properties in the xCal namespace fall back to the generic
/// text scribe; property elements outside the xCal namespace are handled by
/// the raw-XML preserving scribe.
pub struct ScribeIndex {
    scribes: HashMap<String, Box<dyn PropertyScribe + Send + Sync>>,
    generic: TextScribe,
    raw: RawXmlScribe,
}

impl ScribeIndex {
    /// Creates an index with the standard scribes registered.
    #[must_use]
    pub fn new() -> Self {
        let mut index = Self {
            scribes: HashMap::new(),
            generic: TextScribe,
            raw: RawXmlScribe,
        };

        for name in [
            "CALSCALE", "METHOD", "PRODID", "VERSION", "CLASS", "COMMENT", "DESCRIPTION",
            "LOCATION", "STATUS", "SUMMARY", "TRANSP", "TZID", "TZNAME", "ACTION", "UID",
            "RELATED-TO", "URL",
        ] {
            index.register(name, TextScribe);
        }
        for name in ["CATEGORIES", "RESOURCES"] {
            index.register(name, TextListScribe);
        }
        for name in [
            "COMPLETED",
            "DTEND",
            "DUE",
            "DTSTART",
            "RECURRENCE-ID",
            "CREATED",
            "DTSTAMP",
            "LAST-MODIFIED",
        ] {
            index.register(name, DateScribe);
        }

        index
    }

    /// Registers (or replaces) the scribe for a property name.
    pub fn register(
        &mut self,
        name: impl AsRef<str>,
        scribe: impl PropertyScribe + Send + Sync + 'static,
    ) {
        self.scribes
            .insert(name.as_ref().to_ascii_uppercase(), Box::new(scribe));
    }

    /// Returns the scribe for an xCal-namespace property name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> &(dyn PropertyScribe + Send + Sync) {
        match self.scribes.get(&name.to_ascii_uppercase()) {
            Some(scribe) => scribe.as_ref(),
            None => &self.generic,
        }
    }

    /// Returns the scribe used for property elements outside the xCal
    /// namespace.
    #[must_use]
    pub const fn raw_xml(&self) -> &RawXmlScribe {
        &self.raw
    }
}

impl Default for ScribeIndex {
    fn default() -> Self {
        Self::new()
    }
}
