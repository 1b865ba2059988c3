// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

const JAVA_LANG: &str = "java.lang";

/// A fully-qualified reference to a top-level or nested class.
///
/// Nested classes keep every enclosing simple name, so `com.example.Outer.Inner` is stored as the
/// package `com.example` plus the simple names `["Outer", "Inner"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// Creates a top-level class name.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Parses a canonical (`a.b.Outer.Inner`) or binary (`a.b.Outer$Inner`) class name.
    ///
    /// Package segments are the leading segments that start with a lowercase letter.
    pub fn parse(name: &str) -> Self {
        let segments: Vec<&str> = name.split('.').collect();
        let split = segments
            .iter()
            .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));

        let package = segments[..split].join(".");
        let simple_names = segments[split..]
            .iter()
            .flat_map(|segment| segment.split('$'))
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self { package, simple_names }
    }

    /// Returns the class nested in this one with the given simple name.
    #[must_use]
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// The package, empty for the default package.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    /// The simple names from the outermost class to this one.
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// The outermost class enclosing this one, or this class if it is top-level.
    #[must_use]
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// The directly enclosing class, if this class is nested.
    pub fn enclosing(&self) -> Option<Self> {
        (self.simple_names.len() > 1).then(|| Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// Whether the class is declared inside another class.
    pub fn is_nested(&self) -> bool {
        self.simple_names.len() > 1
    }

    /// `com.example.Outer.Inner`
    pub fn canonical_name(&self) -> String {
        self.join('.')
    }

    /// `com.example.Outer$Inner`, the name used by reflection and class loaders.
    pub fn reflection_name(&self) -> String {
        self.join('$')
    }

    /// Whether the class lives in `java.lang` and never needs an import.
    pub fn is_java_lang(&self) -> bool {
        self.package == JAVA_LANG
    }

    fn join(&self, nested_separator: char) -> String {
        let nested = self.simple_names.join(&nested_separator.to_string());
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// The eight Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `char`
    Char,
}

impl PrimitiveType {
    /// Every primitive type, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Char,
    ];

    /// The Java keyword naming the type, e.g. `int`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
        }
    }

    /// The wrapper class in `java.lang`.
    pub fn boxed(self) -> ClassName {
        let simple_name = match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Char => "Character",
        };
        ClassName::new(JAVA_LANG, simple_name)
    }

    /// The primitive a wrapper class unboxes to.
    pub fn unboxed(class_name: &ClassName) -> Option<Self> {
        Self::ALL.into_iter().find(|primitive| primitive.boxed() == *class_name)
    }

    /// The primitive type named by `keyword`, if any.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|primitive| primitive.keyword() == keyword)
    }

    /// Identity or widening primitive conversion (JLS 5.1.2).
    pub fn widens_to(self, target: Self) -> bool {
        use PrimitiveType::{Byte, Char, Double, Float, Int, Long, Short};

        self == target
            || matches!(
                (self, target),
                (Byte, Short | Int | Long | Float | Double)
                    | (Short | Char, Int | Long | Float | Double)
                    | (Int, Long | Float | Double)
                    | (Long, Float | Double)
                    | (Float, Double)
            )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_nested_name() {
        let name = ClassName::parse("com.example.Outer.Inner");
        assert_eq!(name.package_name(), "com.example");
        assert_eq!(name.simple_names(), ["Outer", "Inner"]);
        assert_eq!(name.reflection_name(), "com.example.Outer$Inner");
    }

    #[test]
    fn parse_binary_nested_name() {
        let name = ClassName::parse("com.example.Outer$Inner");
        assert_eq!(name.canonical_name(), "com.example.Outer.Inner");
        assert_eq!(name.enclosing(), Some(ClassName::new("com.example", "Outer")));
        assert_eq!(name.top_level(), ClassName::new("com.example", "Outer"));
    }

    #[test]
    fn parse_default_package() {
        let name = ClassName::parse("Sample");
        assert_eq!(name.package_name(), "");
        assert_eq!(name.canonical_name(), "Sample");
    }

    #[test]
    fn boxing_round_trips() {
        for primitive in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::unboxed(&primitive.boxed()), Some(primitive));
        }
    }

    #[test]
    fn widening() {
        assert!(PrimitiveType::Byte.widens_to(PrimitiveType::Long));
        assert!(PrimitiveType::Char.widens_to(PrimitiveType::Int));
        assert!(!PrimitiveType::Char.widens_to(PrimitiveType::Short));
        assert!(!PrimitiveType::Long.widens_to(PrimitiveType::Int));
        assert!(!PrimitiveType::Boolean.widens_to(PrimitiveType::Int));
    }
}
