// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::fmt;

use crate::{ClassName, PrimitiveType};

/// A possibly generic reference to a Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// A primitive type such as `int`.
    Primitive(PrimitiveType),
    /// A class or interface, with its generic arguments when parameterized.
    Class {
        /// The raw class.
        name: ClassName,
        /// Generic arguments, empty for raw types.
        generics: Vec<TypeName>,
    },
    /// An array of the component type.
    Array(Box<TypeName>),
    /// A type variable such as `T` that was not resolved to a concrete type.
    Variable(String),
}

impl TypeName {
    /// A raw class type.
    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::Class {
            name: name.into(),
            generics: Vec::new(),
        }
    }

    /// A class type with generic arguments.
    pub fn parameterized(name: impl Into<ClassName>, generics: impl IntoIterator<Item = Self>) -> Self {
        Self::Class {
            name: name.into(),
            generics: generics.into_iter().collect(),
        }
    }

    /// An array of `component`.
    pub fn array_of(component: Self) -> Self {
        Self::Array(Box::new(component))
    }

    /// A type variable named `name`.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// The class this type erases to, if it is a class type.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            Self::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Generic arguments; empty for raw and non-class types.
    pub fn generics(&self) -> &[Self] {
        match self {
            Self::Class { generics, .. } => generics,
            _ => &[],
        }
    }

    /// The element type of an array.
    pub fn component_type(&self) -> Option<&Self> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    /// The primitive type, for primitive types.
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    /// Whether this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Whether this is an unresolved type variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Whether this is a class type with generic arguments.
    pub fn has_generics(&self) -> bool {
        !self.generics().is_empty()
    }

    /// Whether a type variable appears anywhere in this type.
    pub fn has_unresolvable_generics(&self) -> bool {
        match self {
            Self::Primitive(_) => false,
            Self::Variable(_) => true,
            Self::Array(component) => component.has_unresolvable_generics(),
            Self::Class { generics, .. } => generics.iter().any(Self::has_unresolvable_generics),
        }
    }

    /// The erasure of this type: generic arguments dropped at every level.
    #[must_use]
    pub fn raw(&self) -> Self {
        match self {
            Self::Class { name, .. } => Self::class(name.clone()),
            Self::Array(component) => Self::array_of(component.raw()),
            other => other.clone(),
        }
    }

    /// The wrapper type for primitives, this type otherwise.
    #[must_use]
    pub fn boxed(&self) -> Self {
        match self {
            Self::Primitive(primitive) => Self::class(primitive.boxed()),
            other => other.clone(),
        }
    }

    /// Replaces type variables bound in `bindings`.
    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, Self>) -> Self {
        match self {
            Self::Variable(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Array(component) => Self::array_of(component.substitute(bindings)),
            Self::Class { name, generics } => Self::Class {
                name: name.clone(),
                generics: generics.iter().map(|generic| generic.substitute(bindings)).collect(),
            },
            Self::Primitive(_) => self.clone(),
        }
    }

    /// Every class referenced by this type, generic arguments and array components included.
    pub fn referenced_classes(&self) -> Vec<ClassName> {
        let mut classes = Vec::new();
        self.collect_classes(&mut classes);
        classes
    }

    fn collect_classes(&self, classes: &mut Vec<ClassName>) {
        match self {
            Self::Class { name, generics } => {
                classes.push(name.clone());
                for generic in generics {
                    generic.collect_classes(classes);
                }
            }
            Self::Array(component) => component.collect_classes(classes),
            Self::Primitive(_) | Self::Variable(_) => {}
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(value: ClassName) -> Self {
        Self::class(value)
    }
}

impl From<&ClassName> for TypeName {
    fn from(value: &ClassName) -> Self {
        Self::class(value.clone())
    }
}

impl From<PrimitiveType> for TypeName {
    fn from(value: PrimitiveType) -> Self {
        Self::Primitive(value)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Variable(name) => f.write_str(name),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Class { name, generics } => {
                write!(f, "{name}")?;
                if !generics.is_empty() {
                    f.write_str("<")?;
                    for (index, generic) in generics.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{generic}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}
