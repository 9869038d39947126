//! Raw-XML preserving scribe.

use koyomi_core::model::{Parameters, Property, Value};

use super::{PropertyScribe, ScribeError};
use crate::context::{ParseContext, WriteContext};
use crate::datatype::ValueType;
use crate::element::XmlElement;

/// Scribe for property elements outside the xCal namespace, and for values
/// that failed to parse: the XML content is kept verbatim.
#[derive(Debug, Clone, Copy)]
pub struct RawXmlScribe;

impl RawXmlScribe {
    /// Builds a property that preserves an element subtree verbatim.
    #[must_use]
    pub fn preserve(name: &str, element: &XmlElement, params: Parameters) -> Property {
        let xml = element.to_xml();
        Property::new(name, Value::Xml(xml.clone()), xml).with_params(params)
    }
}

impl PropertyScribe for RawXmlScribe {
    fn data_type(&self, _name: &str) -> Option<ValueType> {
        None
    }

    fn write_text(&self, property: &Property, _ctx: &WriteContext) -> String {
        property
            .value
            .as_xml()
            .unwrap_or(&property.raw_value)
            .to_string()
    }

    fn parse_text(
        &self,
        name: &str,
        text: &str,
        _data_type: Option<ValueType>,
        params: Parameters,
        _ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        Ok(Property::new(name, Value::Xml(text.to_string()), text).with_params(params))
    }

    fn parse_xml(
        &self,
        name: &str,
        element: &XmlElement,
        params: Parameters,
        _ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        Ok(Self::preserve(name, element, params))
    }
}
