//! The streaming xCal reader.

use std::io::BufRead;

use chrono_tz::Tz;
use koyomi_core::model::{Component, ICalendar};
use koyomi_core::warning::{Warning, WarningKind};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{XCalError, XCalResult};
use crate::context::{ParseContext, PendingZone};
use crate::element::{XCAL_NS, XmlElement};
use crate::scribe::{PropertyScribe, RawXmlScribe, ScribeError, ScribeIndex};
use crate::timezone::{PropertyPath, TimezoneInfo, resolve_timezones};

/// Structural meaning of one open element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// The `<icalendar>` document root.
    ICalendar,
    /// A `<vcalendar>` or nested component element.
    Component,
    /// A `<properties>` wrapper.
    Properties,
    /// A `<components>` wrapper.
    Components,
    /// A property element.
    Property,
    /// The `<parameters>` wrapper of a property.
    Parameters,
    /// One parameter element.
    Parameter,
    /// One parameter value element.
    ParameterValue,
    /// An element with no structural meaning at its position.
    Foreign,
}

/// A component still being filled, with the zone bindings of its properties
/// expressed relative to itself.
#[derive(Debug)]
struct OpenComponent {
    component: Component,
    pending: Vec<(PropertyPath, PendingZone)>,
}

impl OpenComponent {
    fn new(name: &str) -> Self {
        Self {
            component: Component::named(name),
            pending: Vec::new(),
        }
    }
}

/// A property element being accumulated.
#[derive(Debug)]
struct PropertyBuild {
    name: String,
    namespace: String,
    root: XmlElement,
    /// Open descendants of the property element, innermost last.
    open: Vec<XmlElement>,
    params: koyomi_core::model::Parameters,
}

/// Streaming reader converting an xCal XML stream into calendar objects.
///
/// Each [`XCalReader::read_next`] call consumes events until one
/// `<vcalendar>` element has closed, runs the timezone-resolution pass over
/// it, and returns the finished object. Warnings and zone assignments for
/// the most recently returned object stay available until the next call.
pub struct XCalReader<R: BufRead> {
    reader: Reader<R>,
    stack: Vec<ElementType>,
    /// One namespace-declaration frame per open element.
    ns_scopes: Vec<Vec<(String, String)>>,
    text: String,
    components: Vec<OpenComponent>,
    property: Option<PropertyBuild>,
    param_name: Option<String>,
    index: ScribeIndex,
    ctx: ParseContext,
    default_zone: Tz,
    warnings: Vec<Warning>,
    tz_info: TimezoneInfo,
    closed: bool,
}

impl<'a> XCalReader<&'a [u8]> {
    /// Creates a reader over in-memory xCal text.
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self::from_reader(text.as_bytes())
    }
}

impl<R: BufRead> XCalReader<R> {
    /// Creates a reader over a buffered XML stream.
    #[must_use]
    pub fn from_reader(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        // Text is collected untrimmed; entity references split a run into
        // several events and per-event trimming would eat interior spaces.
        // Whitespace-only runs are dropped where the text is consumed.
        config.expand_empty_elements = true;

        Self {
            reader,
            stack: Vec::new(),
            ns_scopes: Vec::new(),
            text: String::new(),
            components: Vec::new(),
            property: None,
            param_name: None,
            index: ScribeIndex::new(),
            ctx: ParseContext::new(Tz::UTC),
            default_zone: Tz::UTC,
            warnings: Vec::new(),
            tz_info: TimezoneInfo::default(),
            closed: false,
        }
    }

    /// Sets the zone used when a timezone identifier cannot be resolved and
    /// when floating date-times are interpreted.
    #[must_use]
    pub fn with_default_zone(mut self, tz: Tz) -> Self {
        self.default_zone = tz;
        self.ctx = ParseContext::new(tz);
        self
    }

    /// Registers (or replaces) the scribe for a property name. Call before
    /// reading begins.
    pub fn register_scribe(
        &mut self,
        name: impl AsRef<str>,
        scribe: impl PropertyScribe + Send + Sync + 'static,
    ) {
        self.index.register(name, scribe);
    }

    /// Warnings attached to the most recently returned object.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Zone assignments of the most recently returned object.
    #[must_use]
    pub fn timezone_info(&self) -> &TimezoneInfo {
        &self.tz_info
    }

    /// Stops reading. Subsequent [`XCalReader::read_next`] calls return
    /// end-of-stream; calling again is harmless.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Reads the next calendar object from the stream.
    ///
    /// Returns `Ok(None)` at end-of-stream or after [`XCalReader::close`].
    ///
    /// ## Errors
    /// Returns an error only for malformed underlying XML; data-level
    /// problems become warnings on the returned object instead.
    #[tracing::instrument(skip(self))]
    pub fn read_next(&mut self) -> XCalResult<Option<ICalendar>> {
        if self.closed {
            return Ok(None);
        }
        self.warnings.clear();
        self.tz_info = TimezoneInfo::default();

        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref event)) => {
                    let (namespace, local, attributes) = self.decode_start(event)?;
                    self.handle_start(&namespace, &local, attributes);
                }
                Ok(Event::End(_)) => {
                    if let Some(object) = self.handle_end() {
                        tracing::debug!(
                            warnings = self.warnings.len(),
                            "calendar object complete"
                        );
                        return Ok(Some(object));
                    }
                }
                Ok(Event::Text(ref event)) => {
                    let decoded = self.reader.decoder().decode(event.as_ref())?;
                    self.text.push_str(&decoded);
                }
                Ok(Event::CData(ref event)) => {
                    let decoded = self.reader.decoder().decode(event.as_ref())?;
                    self.text.push_str(&decoded);
                }
                Ok(Event::GeneralRef(ref event)) => {
                    let resolved = match event.resolve_char_ref() {
                        Ok(resolved) => resolved,
                        Err(err) => {
                            self.closed = true;
                            return Err(XCalError::from(err));
                        }
                    };
                    if let Some(ch) = resolved {
                        self.text.push(ch);
                    } else {
                        let name = event.decode()?;
                        match name.as_ref() {
                            "amp" => self.text.push('&'),
                            "lt" => self.text.push('<'),
                            "gt" => self.text.push('>'),
                            "apos" => self.text.push('\''),
                            "quot" => self.text.push('"'),
                            // Unknown general entities are kept verbatim.
                            other => {
                                self.text.push('&');
                                self.text.push_str(other);
                                self.text.push(';');
                            }
                        }
                    }
                }
                Ok(Event::Eof) => return Ok(None),
                Ok(_) => {}
                Err(err) => {
                    self.closed = true;
                    return Err(XCalError::from(err));
                }
            }
        }
    }

    /// Decodes an element's namespace, local name, and ordinary attributes,
    /// pushing its namespace-declaration frame.
    fn decode_start(
        &mut self,
        event: &BytesStart<'_>,
    ) -> XCalResult<(String, String, Vec<(String, String)>)> {
        let mut declarations = Vec::new();
        let mut attributes = Vec::new();
        for attr in event.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = self.reader.decoder().decode(&attr.value)?.into_owned();
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push((prefix.to_string(), value));
            } else if key == "xmlns" {
                declarations.push((String::new(), value));
            } else {
                attributes.push((key, value));
            }
        }
        self.ns_scopes.push(declarations);

        let qname = event.name();
        let name = std::str::from_utf8(qname.as_ref())?;
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", name),
        };
        let namespace = self.resolve_prefix(prefix).to_string();
        Ok((namespace, local.to_string(), attributes))
    }

    fn resolve_prefix(&self, prefix: &str) -> &str {
        self.ns_scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p == prefix)
            .map_or("", |(_, ns)| ns.as_str())
    }

    /// Innermost structural state, skipping foreign frames.
    fn innermost_structural(&self) -> Option<ElementType> {
        self.stack
            .iter()
            .rev()
            .copied()
            .find(|state| *state != ElementType::Foreign)
    }

    /// Routes buffered character data to the property element tree, or
    /// discards it outside one.
    fn flush_text_to_tree(&mut self) {
        let text = std::mem::take(&mut self.text);
        if self.innermost_structural() != Some(ElementType::Property) {
            return;
        }
        // A run that is all whitespace is document formatting, not content.
        if text.trim().is_empty() {
            return;
        }
        if let Some(build) = &mut self.property {
            match build.open.last_mut() {
                Some(element) => element.append_text(&text),
                None => build.root.append_text(&text),
            }
        }
    }

    fn handle_start(&mut self, namespace: &str, local: &str, attributes: Vec<(String, String)>) {
        self.flush_text_to_tree();

        let xcal = namespace == XCAL_NS;
        let pushed = match self.stack.last().copied() {
            None => {
                if xcal && local == "icalendar" {
                    ElementType::ICalendar
                } else {
                    ElementType::Foreign
                }
            }
            Some(ElementType::ICalendar) => {
                if xcal && local == "vcalendar" {
                    self.components.push(OpenComponent::new(local));
                    ElementType::Component
                } else {
                    ElementType::Foreign
                }
            }
            Some(ElementType::Component) => match (xcal, local) {
                (true, "properties") => ElementType::Properties,
                (true, "components") => ElementType::Components,
                _ => ElementType::Foreign,
            },
            Some(ElementType::Components) => {
                if xcal {
                    self.components.push(OpenComponent::new(local));
                    ElementType::Component
                } else {
                    ElementType::Foreign
                }
            }
            Some(ElementType::Properties) => {
                let mut root = XmlElement::new(namespace, local);
                root.attributes = attributes;
                self.property = Some(PropertyBuild {
                    name: local.to_ascii_uppercase(),
                    namespace: namespace.to_string(),
                    root,
                    open: Vec::new(),
                    params: koyomi_core::model::Parameters::new(),
                });
                ElementType::Property
            }
            Some(ElementType::Property) => {
                if xcal && local == "parameters" {
                    ElementType::Parameters
                } else {
                    self.descend_property_element(namespace, local, attributes);
                    ElementType::Foreign
                }
            }
            Some(ElementType::Parameters) => {
                if xcal {
                    self.param_name = Some(local.to_ascii_uppercase());
                    ElementType::Parameter
                } else {
                    ElementType::Foreign
                }
            }
            Some(ElementType::Parameter) => {
                if xcal {
                    ElementType::ParameterValue
                } else {
                    ElementType::Foreign
                }
            }
            Some(ElementType::ParameterValue) => ElementType::Foreign,
            Some(ElementType::Foreign) => {
                if self.innermost_structural() == Some(ElementType::Property) {
                    self.descend_property_element(namespace, local, attributes);
                }
                ElementType::Foreign
            }
        };
        self.stack.push(pushed);
    }

    fn descend_property_element(
        &mut self,
        namespace: &str,
        local: &str,
        attributes: Vec<(String, String)>,
    ) {
        if let Some(build) = &mut self.property {
            let mut element = XmlElement::new(namespace, local);
            element.attributes = attributes;
            build.open.push(element);
        }
    }

    /// Handles an element close; returns a finished calendar object when the
    /// closing element was a `<vcalendar>`.
    fn handle_end(&mut self) -> Option<ICalendar> {
        self.ns_scopes.pop();
        let popped = self.stack.pop()?;

        match popped {
            ElementType::ParameterValue => {
                let value = std::mem::take(&mut self.text);
                if let (Some(name), Some(build)) = (&self.param_name, &mut self.property) {
                    build.params.put(name, value.trim());
                }
            }
            ElementType::Parameter => {
                self.param_name = None;
                self.text.clear();
            }
            ElementType::Foreign => {
                self.flush_text_to_tree();
                if self.innermost_structural() == Some(ElementType::Property) {
                    if let Some(build) = &mut self.property {
                        if let Some(element) = build.open.pop() {
                            match build.open.last_mut() {
                                Some(parent) => parent.append_child(element),
                                None => build.root.append_child(element),
                            }
                        }
                    }
                }
            }
            ElementType::Property => {
                // The Property frame is already popped; route remaining text
                // to the element root directly.
                let text = std::mem::take(&mut self.text);
                if let Some(build) = &mut self.property {
                    if !text.trim().is_empty() {
                        build.root.append_text(&text);
                    }
                }
                self.finish_property();
            }
            ElementType::Component => {
                self.text.clear();
                return self.finish_component();
            }
            ElementType::ICalendar
            | ElementType::Properties
            | ElementType::Components
            | ElementType::Parameters => {
                self.text.clear();
            }
        }
        None
    }

    /// Dispatches a finished property element to its scribe and attaches the
    /// result to the innermost open component.
    fn finish_property(&mut self) {
        let Some(build) = self.property.take() else {
            return;
        };
        let fallback_params = build.params.clone();

        let result = if build.namespace == XCAL_NS {
            self.index
                .lookup(&build.name)
                .parse_xml(&build.name, &build.root, build.params, &mut self.ctx)
        } else {
            self.index
                .raw_xml()
                .parse_xml(&build.name, &build.root, build.params, &mut self.ctx)
        };

        let property = match result {
            Ok(property) => property,
            Err(ScribeError::Skip(reason)) => {
                self.ctx.take_pending();
                self.ctx.warn(
                    Warning::new(WarningKind::SkippedProperty, reason)
                        .with_property(&build.name),
                );
                return;
            }
            Err(ScribeError::CannotParse(reason)) => {
                self.ctx.take_pending();
                self.ctx.warn(
                    Warning::new(WarningKind::MalformedPropertyXml, reason)
                        .with_property(&build.name),
                );
                RawXmlScribe::preserve(&build.name, &build.root, fallback_params)
            }
        };

        let pending = self.ctx.take_pending();
        if let Some(open) = self.components.last_mut() {
            let index = open.component.properties.len();
            open.component.add_property(property);
            if let Some(zone) = pending {
                open.pending.push((
                    PropertyPath {
                        components: Vec::new(),
                        property: index,
                    },
                    zone,
                ));
            }
        }
    }

    /// Closes the innermost component, re-basing its zone bindings; when it
    /// was the object root, runs the resolution pass and yields the object.
    fn finish_component(&mut self) -> Option<ICalendar> {
        let closed = self.components.pop()?;

        if let Some(parent) = self.components.last_mut() {
            let child_index = parent.component.children.len();
            for (mut path, zone) in closed.pending {
                path.components.insert(0, child_index);
                parent.pending.push((path, zone));
            }
            parent.component.add_child(closed.component);
            return None;
        }

        let mut root = closed.component;
        self.warnings = self.ctx.take_warnings();
        self.tz_info = resolve_timezones(
            &mut root,
            closed.pending,
            self.default_zone,
            &mut self.warnings,
        );
        Some(ICalendar::new(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use koyomi_core::model::{Value, ZoneRef};
    use test_log::test;

    fn wrap(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <icalendar xmlns=\"{XCAL_NS}\">{body}</icalendar>"
        )
    }

    #[test]
    fn reads_single_object() {
        let xml = wrap(
            "<vcalendar>\
               <properties>\
                 <version><text>2.0</text></version>\
                 <prodid><text>-//Example//EN</text></prodid>\
               </properties>\
               <components>\
                 <vevent>\
                   <properties>\
                     <uid><text>1</text></uid>\
                     <summary><text>Team meeting</text></summary>\
                   </properties>\
                 </vevent>\
               </components>\
             </vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        assert_eq!(object.version(), Some("2.0"));
        assert_eq!(object.prodid(), Some("-//Example//EN"));
        let events = object.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].property("SUMMARY").and_then(|p| p.as_text()),
            Some("Team meeting")
        );
        assert!(reader.warnings().is_empty());
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn sibling_objects_reset_warnings() {
        let xml = wrap(
            "<vcalendar>\
               <properties><x-foo><unknown>1</unknown></x-foo></properties>\
             </vcalendar>\
             <vcalendar>\
               <properties><version><text>2.0</text></version></properties>\
             </vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);

        let first = reader.read_next().unwrap().unwrap();
        assert_eq!(
            first.root.property("X-FOO").and_then(|p| p.as_text()),
            Some("1")
        );
        assert_eq!(reader.warnings().len(), 1);
        assert_eq!(reader.warnings()[0].kind, WarningKind::UndeterminedType);

        let second = reader.read_next().unwrap().unwrap();
        assert_eq!(second.version(), Some("2.0"));
        assert!(reader.warnings().is_empty());

        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn multi_valued_parameter_collected() {
        let xml = wrap(
            "<vcalendar><properties>\
               <summary>\
                 <parameters>\
                   <member>\
                     <cal-address>mailto:a@example.com</cal-address>\
                     <cal-address>mailto:b@example.com</cal-address>\
                   </member>\
                 </parameters>\
                 <text>x</text>\
               </summary>\
             </properties></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();
        let summary = object.root.property("SUMMARY").unwrap();
        assert_eq!(
            summary.params.get("MEMBER"),
            Some(
                &[
                    "mailto:a@example.com".to_string(),
                    "mailto:b@example.com".to_string(),
                ][..]
            )
        );
        assert_eq!(summary.as_text(), Some("x"));
    }

    #[test]
    fn entity_references_resolved_in_text() {
        let xml = wrap(
            "<vcalendar><properties>\
               <summary><text>R&amp;D &lt;lab&gt; &#65;&#x2013; &quot;q&apos;</text></summary>\
             </properties></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();
        let summary = object.root.property("SUMMARY").unwrap();
        assert_eq!(summary.as_text(), Some("R&D <lab> A\u{2013} \"q'"));
        assert!(reader.warnings().is_empty());
    }

    #[test]
    fn foreign_parameter_elements_ignored() {
        let xml = wrap(
            "<vcalendar><properties>\
               <summary>\
                 <parameters xmlns:m=\"http://example.com/m\">\
                   <m:tag><m:text>WORK</m:text></m:tag>\
                   <language><text>en</text></language>\
                 </parameters>\
                 <text>x</text>\
               </summary>\
             </properties></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();
        let summary = object.root.property("SUMMARY").unwrap();
        assert_eq!(summary.params.get("LANGUAGE"), Some(&["en".to_string()][..]));
        assert!(summary.params.get("TAG").is_none());
        assert_eq!(summary.as_text(), Some("x"));
    }

    #[test]
    fn list_property_items() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <categories><text>WORK</text><text>TRAVEL</text></categories>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();
        let categories = object.events()[0].property("CATEGORIES").unwrap();
        assert_eq!(
            categories.value.as_list(),
            Some(&["WORK".to_string(), "TRAVEL".to_string()][..])
        );
    }

    #[test]
    fn foreign_property_preserved_as_xml() {
        let xml = wrap(
            "<vcalendar><properties>\
               <m:widget xmlns:m=\"http://example.com\">\
                 <m:inner>payload</m:inner>\
               </m:widget>\
             </properties></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();
        let widget = object.root.property("WIDGET").unwrap();
        let xml_value = widget.value.as_xml().unwrap();
        assert!(xml_value.contains("xmlns=\"http://example.com\""));
        assert!(xml_value.contains("<inner>payload</inner>"));
        assert!(reader.warnings().is_empty());
    }

    #[test]
    fn tzid_with_definition_resolves_silently() {
        let xml = wrap(
            "<vcalendar><components>\
               <vtimezone><properties>\
                 <tzid><text>Europe/Paris</text></tzid>\
               </properties></vtimezone>\
               <vevent><properties>\
                 <dtstart>\
                   <parameters><tzid><text>Europe/Paris</text></tzid></parameters>\
                   <date-time>2013-06-11T15:43:02</date-time>\
                 </dtstart>\
               </properties></vevent>\
             </components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        assert!(reader.warnings().is_empty());
        assert_eq!(
            reader.timezone_info().resolved("Europe/Paris"),
            Some(chrono_tz::Europe::Paris)
        );

        let dtstart = object.events()[0].property("DTSTART").unwrap();
        assert_eq!(dtstart.params.tzid(), None);
        let instant = dtstart.as_instant().unwrap();
        assert_eq!(
            instant.utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
        );
        assert_eq!(instant.zone, ZoneRef::Named("Europe/Paris".to_string()));
    }

    #[test]
    fn tzid_without_definition_warns_fallback() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <dtstart>\
                 <parameters><tzid><text>Europe/Paris</text></tzid></parameters>\
                 <date-time>2013-06-11T15:43:02</date-time>\
               </dtstart>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        assert_eq!(reader.warnings().len(), 1);
        assert_eq!(reader.warnings()[0].kind, WarningKind::TimezoneFallback);
        let instant = object.events()[0].property("DTSTART").unwrap().as_instant();
        assert_eq!(
            instant.unwrap().utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
        );
    }

    #[test]
    fn unknown_tzid_uses_default_zone() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <dtstart>\
                 <parameters><tzid><text>Custom/Zone</text></tzid></parameters>\
                 <date-time>2013-06-11T15:43:02</date-time>\
               </dtstart>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        assert_eq!(reader.warnings().len(), 1);
        assert_eq!(reader.warnings()[0].kind, WarningKind::UnresolvedTimezone);
        assert_eq!(reader.timezone_info().resolved("Custom/Zone"), Some(Tz::UTC));
        // Wall clock interpreted in the default zone (UTC)
        let instant = object.events()[0].property("DTSTART").unwrap().as_instant();
        assert_eq!(
            instant.unwrap().utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 15, 43, 2).unwrap()
        );
    }

    #[test]
    fn floating_datetime_flagged() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <dtstart><date-time>2013-06-11T13:43:02</date-time></dtstart>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        let instant = object.events()[0]
            .property("DTSTART")
            .unwrap()
            .as_instant()
            .unwrap();
        assert_eq!(instant.zone, ZoneRef::Local);

        let info = reader.timezone_info();
        assert_eq!(info.properties().len(), 1);
        assert!(info.is_floating(&PropertyPath {
            components: vec![0],
            property: 0,
        }));
    }

    #[test]
    fn nested_component_zone_correction() {
        let xml = wrap(
            "<vcalendar><components><vevent>\
               <properties><uid><text>1</text></uid></properties>\
               <components><valarm><properties>\
                 <dtstart>\
                   <parameters><tzid><text>Europe/Paris</text></tzid></parameters>\
                   <date-time>2013-06-11T15:43:02</date-time>\
                 </dtstart>\
               </properties></valarm></components>\
             </vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        let alarm = &object.events()[0].children[0];
        let instant = alarm.property("DTSTART").unwrap().as_instant().unwrap();
        assert_eq!(
            instant.utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
        );
    }

    #[test]
    fn undeterminable_date_preserved_as_raw_xml() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <dtstart><date-time>not-a-date</date-time></dtstart>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader = XCalReader::from_text(&xml);
        let object = reader.read_next().unwrap().unwrap();

        assert_eq!(reader.warnings().len(), 1);
        assert_eq!(
            reader.warnings()[0].kind,
            WarningKind::MalformedPropertyXml
        );
        let dtstart = object.events()[0].property("DTSTART").unwrap();
        assert!(matches!(dtstart.value, Value::Xml(_)));
    }

    #[test]
    fn close_is_idempotent() {
        let xml = wrap("<vcalendar><properties/></vcalendar>");
        let mut reader = XCalReader::from_text(&xml);
        reader.close();
        reader.close();
        assert!(reader.read_next().unwrap().is_none());
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let mut reader =
            XCalReader::from_text("<icalendar xmlns=\"urn:x\"><vcalendar></icalendar>");
        assert!(reader.read_next().is_err());
        // The stream stays closed afterwards
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn non_default_zone_for_floating() {
        let xml = wrap(
            "<vcalendar><components><vevent><properties>\
               <dtstart><date-time>2013-06-11T15:43:02</date-time></dtstart>\
             </properties></vevent></components></vcalendar>",
        );

        let mut reader =
            XCalReader::from_text(&xml).with_default_zone(chrono_tz::Europe::Paris);
        let object = reader.read_next().unwrap().unwrap();
        let instant = object.events()[0]
            .property("DTSTART")
            .unwrap()
            .as_instant()
            .unwrap();
        // Paris summer time is UTC+2
        assert_eq!(
            instant.utc,
            Utc.with_ymd_and_hms(2013, 6, 11, 13, 43, 2).unwrap()
        );
    }
}
