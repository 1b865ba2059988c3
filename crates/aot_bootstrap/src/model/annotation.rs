// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::ClassName;

use super::names;

/// Access level of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible to the package and to subclasses.
    Protected,
    /// No modifier: visible within the declaring package only.
    Package,
    /// Visible within the declaring class only.
    Private,
}

impl Visibility {
    /// Whether this is [`Visibility::Public`].
    pub fn is_public(self) -> bool {
        self == Self::Public
    }

    /// Whether this is [`Visibility::Private`].
    pub fn is_private(self) -> bool {
        self == Self::Private
    }
}

/// An annotation present on a type, member or parameter.
///
/// Attribute values are kept in their source form, e.g. `required = "false"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    type_name: ClassName,
    attributes: Vec<(String, String)>,
}

impl Annotation {
    /// An annotation of type `type_name` without attributes.
    pub fn of(type_name: impl Into<ClassName>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
        }
    }

    /// `@Autowired`
    pub fn autowired() -> Self {
        Self::of(names::AUTOWIRED)
    }

    /// `@EventListener`
    pub fn event_listener() -> Self {
        Self::of(names::EVENT_LISTENER)
    }

    /// `@Configuration`
    pub fn configuration() -> Self {
        Self::of(names::CONFIGURATION)
    }

    /// Sets the attribute `name` to its source form `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// The annotation type.
    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    /// The source form of the attribute `name`, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn is(&self, canonical_name: &str) -> bool {
        self.type_name.canonical_name() == canonical_name
    }
}

/// Lookup of annotations by type on anything that carries them.
pub(crate) fn find<'a>(annotations: &'a [Annotation], canonical_name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|annotation| annotation.is(canonical_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_looked_up_by_name() {
        let annotation = Annotation::autowired().with("required", "false");
        assert_eq!(annotation.attribute("required"), Some("false"));
        assert_eq!(annotation.attribute("value"), None);
        assert!(annotation.is(names::AUTOWIRED));
    }

    #[test]
    fn find_matches_canonical_name() {
        let annotations = [Annotation::configuration(), Annotation::event_listener()];
        assert!(find(&annotations, names::EVENT_LISTENER).is_some());
        assert!(find(&annotations, names::AUTOWIRED).is_none());
    }
}
