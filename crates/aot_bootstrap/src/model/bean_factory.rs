// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use javagen::{ClassName, TypeName};

use super::definition::BeanDefinition;
use super::names;
use super::registry::TypeRegistry;
use super::value::BeanValue;

/// The container state the generator works from: known types, bean definitions in
/// registration order, and singletons registered as ready-made instances.
#[derive(Debug, Clone, Default)]
pub struct BeanFactory {
    registry: TypeRegistry,
    definitions: Vec<(String, BeanDefinition)>,
    singletons: BTreeMap<String, BeanValue>,
}

impl BeanFactory {
    /// An empty factory over the types of `registry`.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry,
            definitions: Vec::new(),
            singletons: BTreeMap::new(),
        }
    }

    /// The known types.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Mutable access to the known types, to register more of them.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Registers `definition` under `name`, replacing an existing definition in place.
    pub fn register_bean_definition(&mut self, name: impl Into<String>, definition: BeanDefinition) -> &mut Self {
        let name = name.into();
        match self.definitions.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = definition,
            None => self.definitions.push((name, definition)),
        }
        self
    }

    /// Registers a ready-made instance under `name`, replacing a previous one.
    pub fn register_singleton(&mut self, name: impl Into<String>, value: impl Into<BeanValue>) -> &mut Self {
        self.singletons.insert(name.into(), value.into());
        self
    }

    /// Bean definitions in registration order.
    pub fn bean_definitions(&self) -> impl Iterator<Item = (&str, &BeanDefinition)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    /// The definition registered under `name`.
    pub fn bean_definition(&self, name: &str) -> Option<&BeanDefinition> {
        self.definitions
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, definition)| definition)
    }

    /// The singleton instance registered under `name`.
    pub fn singleton(&self, name: &str) -> Option<&BeanValue> {
        self.singletons.get(name)
    }

    /// The type of the bean named `name`, from its singleton instance or its definition.
    pub fn bean_type(&self, name: &str) -> Option<TypeName> {
        if let Some(value) = self.singletons.get(name) {
            return self.value_type(value);
        }
        self.bean_definition(name).and_then(|definition| self.definition_type(definition))
    }

    /// The type of the objects `definition` produces.
    ///
    /// This is the target type if set, else the return type of the factory method, else the bean
    /// class. A factory bean produces the object type it declares rather than itself.
    pub fn definition_type(&self, definition: &BeanDefinition) -> Option<TypeName> {
        let produced = definition
            .target_type()
            .cloned()
            .or_else(|| self.factory_method_return_type(definition))
            .or_else(|| definition.bean_class().cloned().map(TypeName::class))?;
        if definition.target_type().is_some() {
            return Some(produced);
        }
        Some(self.factory_bean_object_type(&produced).unwrap_or(produced))
    }

    /// The return type of the factory method of `definition`.
    ///
    /// With configured arguments, overloads are narrowed to those accepting them. Without, every
    /// overload is a candidate since its parameters are autowired. `None` when the remaining
    /// overloads disagree on the return type.
    fn factory_method_return_type(&self, definition: &BeanDefinition) -> Option<TypeName> {
        let method_name = definition.factory_method_name()?;
        let factory_class = self.factory_class(definition)?;
        let arguments = definition.constructor_arguments().ordered();
        let mut return_types = self
            .registry
            .methods_in_hierarchy(&factory_class)
            .into_iter()
            .filter(|method| method.method_name() == Some(method_name))
            .filter(|method| arguments.is_empty() || method.parameter_count() == arguments.len())
            .filter(|method| {
                method.parameter_types().zip(&arguments).all(|(parameter, argument)| {
                    argument
                        .type_name()
                        .cloned()
                        .or_else(|| self.value_type(argument.value()))
                        .is_none_or(|value_type| self.registry.is_assignable(parameter, &value_type))
                })
            })
            .filter_map(|method| method.return_type().cloned());
        let first = return_types.next()?;
        return_types.all(|other| other == first).then_some(first)
    }

    /// The class declaring the factory method: the factory bean's type, or the bean class.
    pub(crate) fn factory_class(&self, definition: &BeanDefinition) -> Option<ClassName> {
        match definition.factory_bean_name() {
            Some(factory_bean) => self.bean_type(factory_bean)?.raw_class().cloned(),
            None => definition.bean_class().cloned(),
        }
    }

    fn factory_bean_object_type(&self, produced: &TypeName) -> Option<TypeName> {
        let factory = self
            .registry
            .as_super(produced, &ClassName::parse(names::FACTORY_BEAN))?;
        factory.generics().first().cloned()
    }

    /// The type of a configured value, consulting the factory for references and inner beans.
    pub fn value_type(&self, value: &BeanValue) -> Option<TypeName> {
        match value {
            BeanValue::Reference(name) => self.bean_type(name),
            BeanValue::Inner(definition) => self.definition_type(definition),
            other => other.literal_type(),
        }
    }

    /// Replaces references to singletons that have a literal form by that form, element-wise
    /// for collections. Anything else is returned unchanged.
    pub fn resolve_value_if_necessary(&self, value: &BeanValue) -> BeanValue {
        match value {
            BeanValue::Reference(name) => match self.singletons.get(name) {
                Some(singleton) if singleton.is_literal() => singleton.clone(),
                _ => value.clone(),
            },
            BeanValue::List(elements) => BeanValue::List(self.resolve_all(elements)),
            BeanValue::Set(elements) => BeanValue::Set(self.resolve_all(elements)),
            BeanValue::Array { component, elements } => BeanValue::Array {
                component: component.clone(),
                elements: self.resolve_all(elements),
            },
            other => other.clone(),
        }
    }

    fn resolve_all(&self, values: &[BeanValue]) -> Vec<BeanValue> {
        values.iter().map(|value| self.resolve_value_if_necessary(value)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Executable, TypeDescriptor};

    fn factory() -> BeanFactory {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::builder("com.example.SampleConfiguration")
                .method(Executable::method(
                    "com.example.SampleConfiguration",
                    "stringBean",
                    ClassName::parse(names::STRING),
                ))
                .build(),
        );
        registry.register(
            TypeDescriptor::builder("com.example.StringFactoryBean")
                .implements(TypeName::parameterized(
                    ClassName::parse(names::FACTORY_BEAN),
                    [ClassName::parse(names::STRING).into()],
                ))
                .build(),
        );
        let mut factory = BeanFactory::new(registry);
        factory
            .register_bean_definition("configuration", BeanDefinition::builder("com.example.SampleConfiguration").build())
            .register_bean_definition(
                "stringBean",
                BeanDefinition::anonymous()
                    .factory_bean("configuration")
                    .factory_method("stringBean")
                    .build(),
            )
            .register_bean_definition("fromFactoryBean", BeanDefinition::builder("com.example.StringFactoryBean").build())
            .register_singleton("counter", 42);
        factory
    }

    #[test]
    fn bean_type_follows_factory_methods() {
        let factory = factory();
        assert_eq!(factory.bean_type("stringBean"), Some(ClassName::parse(names::STRING).into()));
        assert_eq!(
            factory.bean_type("configuration"),
            Some(ClassName::parse("com.example.SampleConfiguration").into())
        );
    }

    #[test]
    fn bean_type_unwraps_factory_beans() {
        assert_eq!(factory().bean_type("fromFactoryBean"), Some(ClassName::parse(names::STRING).into()));
    }

    #[test]
    fn singleton_references_resolve_to_literals() {
        let factory = factory();
        assert_eq!(factory.resolve_value_if_necessary(&BeanValue::reference("counter")), BeanValue::Int(42));
        assert_eq!(
            factory.resolve_value_if_necessary(&BeanValue::list([BeanValue::reference("configuration")])),
            BeanValue::list([BeanValue::reference("configuration")])
        );
        assert_eq!(factory.value_type(&BeanValue::reference("counter")), Some(ClassName::parse("java.lang.Integer").into()));
    }

    #[test]
    fn overloaded_factory_methods_follow_arguments() {
        let mut factory = factory();
        let owner = "com.example.Converters";
        factory.registry_mut().register(
            TypeDescriptor::builder(owner)
                .method(
                    Executable::static_method(owner, "create", ClassName::parse(names::STRING))
                        .param("value", ClassName::parse(names::STRING)),
                )
                .method(
                    Executable::static_method(owner, "create", ClassName::parse("java.lang.Integer"))
                        .param("value", ClassName::parse("java.lang.Integer")),
                )
                .build(),
        );

        let from_int = BeanDefinition::builder(owner).factory_method("create").constructor_arg(42).build();
        assert_eq!(factory.definition_type(&from_int), Some(ClassName::parse("java.lang.Integer").into()));
        let from_string = BeanDefinition::builder(owner).factory_method("create").constructor_arg("42").build();
        assert_eq!(factory.definition_type(&from_string), Some(ClassName::parse(names::STRING).into()));
        let unconfigured = BeanDefinition::builder(owner).factory_method("create").build();
        assert_eq!(factory.definition_type(&unconfigured), Some(ClassName::parse(owner).into()));
    }

    #[test]
    fn registering_twice_replaces_in_place() {
        let mut factory = factory();
        factory.register_bean_definition("configuration", BeanDefinition::builder("com.example.Other").build());
        let names: Vec<&str> = factory.bean_definitions().map(|(name, _)| name).collect();
        assert_eq!(names, ["configuration", "stringBean", "fromFactoryBean"]);
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(BeanFactory: Send, Sync, Clone, std::fmt::Debug);
        static_assertions::assert_impl_all!(BeanValue: Send, Sync, Clone, std::fmt::Debug);
    }
}
