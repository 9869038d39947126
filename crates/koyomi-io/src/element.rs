//! Lightweight owned XML element tree.
//!
//! The streaming reader accumulates each property's XML content into this
//! structure so scribes can inspect typed children, and so arbitrary nested
//! markup inside a property can be preserved verbatim.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// The xCal XML namespace (RFC 6321).
pub const XCAL_NS: &str = "urn:ietf:params:xml:ns:icalendar-2.0";

/// One node of XML content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A child element.
    Element(XmlElement),
    /// A text run.
    Text(String),
}

/// An owned XML element: namespace, local name, attributes, content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace URI (empty when the element is in no namespace).
    pub namespace: String,
    /// Local name.
    pub name: String,
    /// Attributes in order of appearance (namespace declarations excluded).
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub nodes: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an empty element.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            attributes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Appends a text node, merging with a trailing text node if present.
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(existing)) = self.nodes.last_mut() {
            existing.push_str(text);
        } else {
            self.nodes.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Appends a child element.
    pub fn append_child(&mut self, child: XmlElement) {
        self.nodes.push(XmlNode::Element(child));
    }

    /// Iterates direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Returns all descendant text concatenated in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Serializes this element (and subtree) to an XML string.
    ///
    /// Prefix-less output; each element that changes namespace relative to
    /// its parent declares it with a default `xmlns`.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut writer = Writer::new(Vec::new());
        // Writing into a Vec cannot fail
        if write_element(&mut writer, self, "").is_err() {
            return String::new();
        }
        String::from_utf8(writer.into_inner()).unwrap_or_default()
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElement,
    parent_ns: &str,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    if element.namespace != parent_ns {
        start.push_attribute(("xmlns", element.namespace.as_str()));
    }
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.nodes.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for node in &element.nodes {
        match node {
            XmlNode::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            XmlNode::Element(child) => write_element(writer, child, &element.namespace)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
