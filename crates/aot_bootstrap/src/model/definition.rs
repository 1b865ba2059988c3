// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use javagen::{ClassName, TypeName};

use super::value::BeanValue;

/// The role hint of a bean definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// A bean defined by the application.
    #[default]
    Application,
    /// Supporting part of a larger configuration.
    Support,
    /// Internal to the container, of no interest to the user.
    Infrastructure,
}

impl Role {
    /// The numeric code the container uses for this role.
    pub fn code(self) -> i32 {
        match self {
            Self::Application => 0,
            Self::Support => 1,
            Self::Infrastructure => 2,
        }
    }
}

/// A constructor argument, optionally with the declared type it is meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentValue {
    value: BeanValue,
    type_name: Option<TypeName>,
}

impl ArgumentValue {
    /// An argument whose type is inferred from `value`.
    pub fn new(value: impl Into<BeanValue>) -> Self {
        Self {
            value: value.into(),
            type_name: None,
        }
    }

    /// An argument with an explicitly declared type.
    pub fn typed(value: impl Into<BeanValue>, type_name: impl Into<TypeName>) -> Self {
        Self {
            value: value.into(),
            type_name: Some(type_name.into()),
        }
    }

    /// The configured value.
    pub fn value(&self) -> &BeanValue {
        &self.value
    }

    /// The declared type, if any.
    pub fn type_name(&self) -> Option<&TypeName> {
        self.type_name.as_ref()
    }
}

/// Constructor or factory method arguments, by index and in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorArguments {
    indexed: BTreeMap<usize, ArgumentValue>,
    generic: Vec<ArgumentValue>,
}

impl ConstructorArguments {
    /// Whether no argument is configured.
    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty() && self.generic.is_empty()
    }

    /// The number of arguments, indexed and generic.
    pub fn len(&self) -> usize {
        self.indexed.len() + self.generic.len()
    }

    /// Sets the argument at `index`, replacing any previous one.
    pub fn add_indexed(&mut self, index: usize, argument: ArgumentValue) {
        self.indexed.insert(index, argument);
    }

    /// Appends an argument without a position.
    pub fn add_generic(&mut self, argument: ArgumentValue) {
        self.generic.push(argument);
    }

    /// Indexed arguments in index order, followed by the generic ones.
    pub fn ordered(&self) -> Vec<&ArgumentValue> {
        self.indexed.values().chain(&self.generic).collect()
    }
}

/// A qualifier attached to a bean definition, e.g. `@Qualifier("primary")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qualifier {
    type_name: ClassName,
    value: Option<String>,
}

impl Qualifier {
    /// A qualifier of annotation type `type_name`, with an optional `value` attribute.
    pub fn new(type_name: impl Into<ClassName>, value: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value,
        }
    }

    /// The qualifier annotation type.
    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    /// The `value` attribute, if set.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A registered recipe for creating a bean.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeanDefinition {
    bean_class: Option<ClassName>,
    target_type: Option<TypeName>,
    factory_bean_name: Option<String>,
    factory_method_name: Option<String>,
    constructor_arguments: ConstructorArguments,
    properties: Vec<(String, BeanValue)>,
    role: Role,
    primary: bool,
    scope: Option<String>,
    lazy_init: bool,
    qualifiers: Vec<Qualifier>,
    is_abstract: bool,
}

impl BeanDefinition {
    /// Starts a definition for instances of `bean_class`.
    pub fn builder(bean_class: impl Into<ClassName>) -> BeanDefinitionBuilder {
        BeanDefinitionBuilder {
            definition: Self {
                bean_class: Some(bean_class.into()),
                ..Self::default()
            },
        }
    }

    /// Starts a definition without a bean class, e.g. one created by an instance factory method.
    pub fn anonymous() -> BeanDefinitionBuilder {
        BeanDefinitionBuilder {
            definition: Self::default(),
        }
    }

    /// `None` for anonymous definitions.
    pub fn bean_class(&self) -> Option<&ClassName> {
        self.bean_class.as_ref()
    }

    /// The resolved type of the bean, when more precise than the bean class.
    pub fn target_type(&self) -> Option<&TypeName> {
        self.target_type.as_ref()
    }

    /// The name of the bean declaring the factory method, for instance factory methods.
    pub fn factory_bean_name(&self) -> Option<&str> {
        self.factory_bean_name.as_deref()
    }

    /// The name of the method producing the bean.
    pub fn factory_method_name(&self) -> Option<&str> {
        self.factory_method_name.as_deref()
    }

    /// The configured constructor or factory method arguments.
    pub fn constructor_arguments(&self) -> &ConstructorArguments {
        &self.constructor_arguments
    }

    /// Property values in declaration order.
    pub fn properties(&self) -> &[(String, BeanValue)] {
        &self.properties
    }

    /// The role hint, [`Role::Application`] unless set.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the bean is the primary autowiring candidate.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// `None` for the default singleton scope.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Whether the bean is created on first access.
    pub fn is_lazy_init(&self) -> bool {
        self.lazy_init
    }

    /// Qualifiers restricting autowiring candidates.
    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    /// Whether the definition only serves as a parent template.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}

/// Builds a [`BeanDefinition`].
#[derive(Debug, Clone)]
pub struct BeanDefinitionBuilder {
    definition: BeanDefinition,
}

impl BeanDefinitionBuilder {
    /// Creates the bean by calling `method`: a static method of the bean class, or an instance
    /// method of the factory bean if one is set.
    #[must_use]
    pub fn factory_method(mut self, method: impl Into<String>) -> Self {
        self.definition.factory_method_name = Some(method.into());
        self
    }

    /// Produces the bean by calling the factory method on the bean named `bean_name`.
    #[must_use]
    pub fn factory_bean(mut self, bean_name: impl Into<String>) -> Self {
        self.definition.factory_bean_name = Some(bean_name.into());
        self
    }

    /// Sets the resolved type of the bean.
    #[must_use]
    pub fn target_type(mut self, target_type: impl Into<TypeName>) -> Self {
        self.definition.target_type = Some(target_type.into());
        self
    }

    /// Appends a generic constructor argument.
    #[must_use]
    pub fn constructor_arg(mut self, value: impl Into<BeanValue>) -> Self {
        self.definition.constructor_arguments.add_generic(ArgumentValue::new(value));
        self
    }

    /// Appends a generic constructor argument referencing the bean named `bean_name`.
    #[must_use]
    pub fn constructor_arg_reference(self, bean_name: impl Into<String>) -> Self {
        self.constructor_arg(BeanValue::reference(bean_name))
    }

    /// Sets the constructor argument at `index`.
    #[must_use]
    pub fn indexed_constructor_arg(mut self, index: usize, value: impl Into<BeanValue>) -> Self {
        self.definition
            .constructor_arguments
            .add_indexed(index, ArgumentValue::new(value));
        self
    }

    /// Appends a generic constructor argument with an explicitly declared type.
    #[must_use]
    pub fn typed_constructor_arg(mut self, value: impl Into<BeanValue>, type_name: impl Into<TypeName>) -> Self {
        self.definition
            .constructor_arguments
            .add_generic(ArgumentValue::typed(value, type_name));
        self
    }

    /// Sets the property `name` to `value`.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<BeanValue>) -> Self {
        self.definition.properties.push((name.into(), value.into()));
        self
    }

    /// Sets the role hint.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.definition.role = role;
        self
    }

    /// Marks the bean as the primary autowiring candidate.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.definition.primary = true;
        self
    }

    /// Sets the scope, e.g. `prototype`.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.definition.scope = Some(scope.into());
        self
    }

    /// Creates the bean on first access.
    #[must_use]
    pub fn lazy_init(mut self) -> Self {
        self.definition.lazy_init = true;
        self
    }

    /// Adds a qualifier.
    #[must_use]
    pub fn qualifier(mut self, qualifier: Qualifier) -> Self {
        self.definition.qualifiers.push(qualifier);
        self
    }

    /// Marks the definition as a parent template only.
    #[must_use]
    pub fn abstract_definition(mut self) -> Self {
        self.definition.is_abstract = true;
        self
    }

    /// Returns the definition.
    pub fn build(self) -> BeanDefinition {
        self.definition
    }
}
