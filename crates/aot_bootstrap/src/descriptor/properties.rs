// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::{ClassName, TypeName};

use super::PropertyDescriptor;
use crate::model::{BeanDefinition, BeanFactory, TypeDescriptor};

/// Lists the property values of a bean definition, in definition order.
#[derive(Debug, Clone, Copy)]
pub struct PropertiesSupplier<'a> {
    bean_factory: &'a BeanFactory,
}

impl<'a> PropertiesSupplier<'a> {
    /// Resolves property types against the types of `bean_factory`.
    pub fn new(bean_factory: &'a BeanFactory) -> Self {
        Self { bean_factory }
    }

    /// Values are resolved through the bean factory. The declared type of each property comes
    /// from its setter on `class`, or from a field of the same name.
    pub fn detect_properties(&self, definition: &BeanDefinition, class: &ClassName) -> Vec<PropertyDescriptor> {
        definition
            .properties()
            .iter()
            .map(|(name, value)| {
                PropertyDescriptor::new(
                    name.clone(),
                    self.bean_factory.resolve_value_if_necessary(value),
                    self.declared_type(class, name),
                )
            })
            .collect()
    }

    fn declared_type(&self, class: &ClassName, property: &str) -> Option<TypeName> {
        let registry = self.bean_factory.registry();
        let setter = setter_name(property);
        let from_setter = registry
            .methods_in_hierarchy(class)
            .into_iter()
            .find(|method| !method.is_static() && method.method_name() == Some(setter.as_str()) && method.parameter_count() == 1)
            .and_then(|method| method.parameter_types().next().cloned());
        from_setter.or_else(|| {
            registry
                .superclass_chain(class)
                .into_iter()
                .flat_map(TypeDescriptor::fields)
                .find(|field| !field.is_static() && field.name() == property)
                .map(|field| field.type_name().clone())
        })
    }
}

/// `name` becomes `setName`.
pub(crate) fn setter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use javagen::PrimitiveType;

    use super::*;
    use crate::model::{BeanValue, Executable, Field, TypeRegistry};

    #[test]
    fn setter_names_capitalize() {
        assert_eq!(setter_name("name"), "setName");
        assert_eq!(setter_name("x"), "setX");
    }

    #[test]
    fn properties_keep_definition_order_and_resolve_types() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::builder("com.example.Sample")
                .method(Executable::void_method("com.example.Sample", "setCounter").param("counter", PrimitiveType::Int))
                .field(Field::new("com.example.Sample", "name", ClassName::parse("java.lang.String")))
                .build(),
        );
        let mut factory = BeanFactory::new(registry);
        factory.register_singleton("answer", 42);
        let definition = BeanDefinition::builder("com.example.Sample")
            .property("name", "test")
            .property("counter", BeanValue::reference("answer"))
            .property("unknown", true)
            .build();

        let properties = PropertiesSupplier::new(&factory).detect_properties(&definition, &ClassName::parse("com.example.Sample"));
        let names: Vec<&str> = properties.iter().map(PropertyDescriptor::name).collect();
        assert_eq!(names, ["name", "counter", "unknown"]);
        assert_eq!(properties[0].declared_type().map(ToString::to_string).as_deref(), Some("java.lang.String"));
        assert_eq!(properties[1].declared_type(), Some(&TypeName::Primitive(PrimitiveType::Int)));
        assert_eq!(properties[1].value(), &BeanValue::Int(42));
        assert_eq!(properties[2].declared_type(), None);
    }
}
