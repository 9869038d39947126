//! Text and text-list scribes.

use koyomi_core::grammar::{decode_list, encode_list, escape, unescape};
use koyomi_core::model::{Parameters, Property, Value};
use serde_json::Value as Json;

use super::{PropertyScribe, ScribeError, parse_json_fallback, parse_xml_fallback};
use crate::context::{ParseContext, WriteContext};
use crate::datatype::ValueType;
use crate::element::{XCAL_NS, XmlElement};
use crate::jcal::JCalValue;

/// Scribe for single-value text properties. Also the generic fallback for
/// unregistered xCal properties.
#[derive(Debug, Clone, Copy)]
pub struct TextScribe;

impl PropertyScribe for TextScribe {
    fn write_text(&self, property: &Property, _ctx: &WriteContext) -> String {
        match property.as_text() {
            Some(text) => escape(text),
            None => property.raw_value.clone(),
        }
    }

    fn parse_text(
        &self,
        name: &str,
        text: &str,
        _data_type: Option<ValueType>,
        params: Parameters,
        _ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        Ok(Property::new(name, Value::Text(unescape(text)), text).with_params(params))
    }
}

/// Scribe for comma-list text properties such as CATEGORIES and RESOURCES.
#[derive(Debug, Clone, Copy)]
pub struct TextListScribe;

impl PropertyScribe for TextListScribe {
    fn write_text(&self, property: &Property, _ctx: &WriteContext) -> String {
        match property.value.as_list() {
            Some(values) => encode_list(values.iter().map(|v| Some(v.as_str()))),
            None => property.raw_value.clone(),
        }
    }

    fn parse_text(
        &self,
        name: &str,
        text: &str,
        _data_type: Option<ValueType>,
        params: Parameters,
        _ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        Ok(Property::new(name, Value::List(decode_list(text)), text).with_params(params))
    }

    // Each list item is its own data element in xCal; the single-child
    // default would drop all but the first.
    fn parse_xml(
        &self,
        name: &str,
        element: &XmlElement,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        let items: Vec<String> = element
            .child_elements()
            .filter(|child| child.namespace == XCAL_NS && ValueType::parse(&child.name).is_some())
            .map(XmlElement::text_content)
            .collect();
        if items.is_empty() {
            return parse_xml_fallback(self, name, element, params, ctx);
        }
        let raw = encode_list(items.iter().map(|v| Some(v.as_str())));
        Ok(Property::new(name, Value::List(items), raw).with_params(params))
    }

    // Multi-valued is the native jCal shape for a list property; other
    // shapes go through the generic fallback.
    fn parse_json(
        &self,
        name: &str,
        value: &JCalValue,
        data_type: Option<ValueType>,
        params: Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Property, ScribeError> {
        if let JCalValue::Multi(values) = value {
            let decoded: Vec<String> = values.iter().map(JCalValue::scalar_text).collect();
            let raw = encode_list(decoded.iter().map(|v| Some(v.as_str())));
            return Ok(Property::new(name, Value::List(decoded), raw).with_params(params));
        }
        parse_json_fallback(self, name, value, data_type, params, ctx)
    }

    fn write_json(&self, property: &Property, ctx: &WriteContext) -> JCalValue {
        match property.value.as_list() {
            Some(values) => {
                JCalValue::Multi(values.iter().map(|v| Json::String(v.clone())).collect())
            }
            None => JCalValue::Single(Json::String(self.write_text(property, ctx))),
        }
    }
}
