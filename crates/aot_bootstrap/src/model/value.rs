// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::{ClassName, TypeName};

use super::definition::BeanDefinition;
use super::names;

/// A configured value: a constructor argument, a property value or a singleton instance.
#[derive(Debug, Clone, PartialEq)]
pub enum BeanValue {
    /// The `null` literal.
    Null,
    /// A `boolean`.
    Boolean(bool),
    /// A `byte`.
    Byte(i8),
    /// A `short`.
    Short(i16),
    /// An `int`.
    Int(i32),
    /// A `long`.
    Long(i64),
    /// A `float`.
    Float(f32),
    /// A `double`.
    Double(f64),
    /// A `char`.
    Char(char),
    /// A `java.lang.String`.
    String(String),
    /// A constant of an enum type.
    Enum {
        /// The enum type.
        type_name: ClassName,
        /// The name of the constant.
        constant: String,
    },
    /// A class literal.
    Class(TypeName),
    /// An array of values.
    Array {
        /// The declared component type.
        component: TypeName,
        /// The elements, in order.
        elements: Vec<BeanValue>,
    },
    /// A `java.util.List` of values.
    List(Vec<BeanValue>),
    /// A `java.util.Set` of values, in iteration order.
    Set(Vec<BeanValue>),
    /// A reference to another bean by name.
    Reference(String),
    /// An anonymous bean defined in place.
    Inner(Box<BeanDefinition>),
    /// An instance of `type_name` that has no source representation.
    Opaque {
        /// The type of the instance.
        type_name: TypeName,
    },
}

impl BeanValue {
    /// A reference to the bean named `bean_name`.
    pub fn reference(bean_name: impl Into<String>) -> Self {
        Self::Reference(bean_name.into())
    }

    /// The constant `constant` of the enum type `type_name`.
    pub fn enum_constant(type_name: impl Into<ClassName>, constant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }

    /// A class literal for `type_name`.
    pub fn class(type_name: impl Into<TypeName>) -> Self {
        Self::Class(type_name.into())
    }

    /// An array of `component` holding `elements`.
    pub fn array(component: impl Into<TypeName>, elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Array {
            component: component.into(),
            elements: elements.into_iter().collect(),
        }
    }

    /// A list holding `elements`.
    pub fn list(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::List(elements.into_iter().collect())
    }

    /// A set holding `elements`.
    pub fn set(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(elements.into_iter().collect())
    }

    /// An anonymous bean created from `definition`.
    pub fn inner(definition: BeanDefinition) -> Self {
        Self::Inner(Box::new(definition))
    }

    /// An instance of `type_name` without a literal form.
    pub fn opaque(type_name: impl Into<TypeName>) -> Self {
        Self::Opaque {
            type_name: type_name.into(),
        }
    }

    /// Whether the value can be written as a source literal without consulting the container.
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Reference(_) | Self::Inner(_) | Self::Opaque { .. } => false,
            Self::Array { elements, .. } | Self::List(elements) | Self::Set(elements) => elements.iter().all(Self::is_literal),
            _ => true,
        }
    }

    /// The runtime type of a self-describing value.
    ///
    /// Primitive literals report their wrapper class, as a boxed instance would. `None` for
    /// `null`, which matches any reference type, and for references and inner beans, whose type
    /// only the bean factory knows.
    pub fn literal_type(&self) -> Option<TypeName> {
        let class = |name: &str| Some(TypeName::class(ClassName::parse(name)));
        match self {
            Self::Null | Self::Reference(_) | Self::Inner(_) => None,
            Self::Boolean(_) => class("java.lang.Boolean"),
            Self::Byte(_) => class("java.lang.Byte"),
            Self::Short(_) => class("java.lang.Short"),
            Self::Int(_) => class("java.lang.Integer"),
            Self::Long(_) => class("java.lang.Long"),
            Self::Float(_) => class("java.lang.Float"),
            Self::Double(_) => class("java.lang.Double"),
            Self::Char(_) => class("java.lang.Character"),
            Self::String(_) => class(names::STRING),
            Self::Enum { type_name, .. } => Some(TypeName::class(type_name.clone())),
            Self::Class(type_name) => Some(TypeName::parameterized(ClassName::parse(names::CLASS), [type_name.raw().boxed()])),
            Self::Array { component, .. } => Some(TypeName::array_of(component.clone())),
            Self::List(elements) => Some(collection_type(names::LIST, elements)),
            Self::Set(elements) => Some(collection_type(names::SET, elements)),
            Self::Opaque { type_name } => Some(type_name.clone()),
        }
    }
}

/// `List<E>` when every element has the same known type, the raw collection type otherwise.
fn collection_type(collection: &str, elements: &[BeanValue]) -> TypeName {
    let collection = ClassName::parse(collection);
    let mut types = elements.iter().map(BeanValue::literal_type);
    match types.next() {
        Some(Some(first)) if types.all(|other| other.as_ref() == Some(&first)) => TypeName::parameterized(collection, [first]),
        _ => TypeName::class(collection),
    }
}

impl From<bool> for BeanValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i8> for BeanValue {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<i16> for BeanValue {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for BeanValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for BeanValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for BeanValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for BeanValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<char> for BeanValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for BeanValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for BeanValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
