//! Calendar components.

use super::property::Property;

/// Component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component.
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Parses a component kind from a name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

/// A calendar component: properties plus nested sub-components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    /// Component kind, when recognized.
    pub kind: Option<ComponentKind>,
    /// Component name (normalized to uppercase, preserved for X-components).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components in order of appearance.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a component from its name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: Some(ComponentKind::parse(&name)),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::named("VCALENDAR")
    }

    /// Adds a property.
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        let name = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn properties_named(&self, name: &str) -> Vec<&Property> {
        let name = name.to_ascii_uppercase();
        self.properties.iter().filter(|p| p.name == name).collect()
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children
            .iter()
            .filter(|c| c.kind == Some(kind))
            .collect()
    }

    /// Returns all VTIMEZONE children.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Timezone)
    }

    /// Returns all VEVENT children.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Event)
    }

    /// Returns the declared timezone identifier of a VTIMEZONE component.
    #[must_use]
    pub fn timezone_id(&self) -> Option<&str> {
        self.property("TZID")?.as_text()
    }
}

/// Top-level calendar object: a convenience wrapper around a VCALENDAR
/// component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Wraps a root component.
    #[must_use]
    pub const fn new(root: Component) -> Self {
        Self { root }
    }

    /// Returns the VERSION property value, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.property("VERSION")?.as_text()
    }

    /// Returns the PRODID property value, if present.
    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.property("PRODID")?.as_text()
    }

    /// Returns all VEVENT components.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events()
    }

    /// Returns all VTIMEZONE components.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.timezones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse() {
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("vtodo"), ComponentKind::Todo);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Unknown);
    }

    #[test]
    fn named_preserves_custom_names() {
        let c = Component::named("x-thing");
        assert_eq!(c.name, "X-THING");
        assert_eq!(c.kind, Some(ComponentKind::Unknown));
    }

    #[test]
    fn timezone_lookup() {
        let mut tz = Component::named("VTIMEZONE");
        tz.add_property(Property::text("TZID", "America/New_York"));

        let mut root = Component::calendar();
        root.add_child(tz);

        let ical = ICalendar::new(root);
        assert_eq!(ical.timezones().len(), 1);
        assert_eq!(
            ical.timezones()[0].timezone_id(),
            Some("America/New_York")
        );
    }
}
