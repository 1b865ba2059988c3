// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::{ClassName, PrimitiveType, TypeName};

use crate::model::names;
use crate::model::{BeanDefinition, BeanFactory, Executable, TypeDescriptor, TypeRegistry};
use crate::{Error, Result};

/// How loosely a configured value may bind to a parameter. Tiers are tried in order and each
/// one accepts everything the previous one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    /// The value is assignable to the parameter.
    Assignable,
    /// The value is assignable to the element type of an array or collection parameter.
    AssignableElement,
    /// The container can convert the value, e.g. a `String` to a `Class` or an `int`.
    TypeConversion,
}

impl Tier {
    const ALL: [Self; 3] = [Self::Assignable, Self::AssignableElement, Self::TypeConversion];
}

/// Determines the constructor or factory method that creates the instances of a bean
/// definition.
///
/// Overloads are disambiguated against the types of the configured constructor arguments. A
/// definition may legitimately resolve to no executable, in which case the bean is not
/// registered. More than one equally compatible candidate is an error.
#[derive(Debug, Clone, Copy)]
pub struct BeanInstanceExecutableSupplier<'a> {
    bean_factory: &'a BeanFactory,
}

impl<'a> BeanInstanceExecutableSupplier<'a> {
    /// Resolves executables against the types and beans of `bean_factory`.
    pub fn new(bean_factory: &'a BeanFactory) -> Self {
        Self { bean_factory }
    }

    fn registry(&self) -> &'a TypeRegistry {
        self.bean_factory.registry()
    }

    /// Returns the executable to invoke to create an instance of `definition`.
    ///
    /// # Errors
    ///
    /// Fails if several candidates are equally compatible with the configured arguments, if a
    /// factory bean does not produce the definition's target type, or if the bean class or factory
    /// class cannot be determined.
    pub fn detect_bean_instance_executable(&self, definition: &BeanDefinition) -> Result<Option<Executable>> {
        let executable = if let Some(method_name) = definition.factory_method_name() {
            self.resolve_factory_method(definition, method_name)?
        } else {
            let Some(bean_class) = definition.bean_class() else {
                return Ok(None);
            };
            let descriptor = self.registry().require(bean_class)?;
            if self
                .registry()
                .is_subtype(bean_class, &ClassName::parse(names::FACTORY_BEAN))
            {
                self.resolve_factory_bean_constructor(definition, descriptor)?
            } else {
                self.resolve_constructor(definition, descriptor)?
            }
        };

        match &executable {
            Some(executable) => tracing::event!(
                name: "aot_bootstrap.executable.resolved",
                tracing::Level::TRACE,
                executable = %executable,
            ),
            None => tracing::event!(
                name: "aot_bootstrap.executable.unresolved",
                tracing::Level::DEBUG,
                bean.class = definition.bean_class().map(ClassName::canonical_name),
                factory.method = definition.factory_method_name(),
            ),
        }
        Ok(executable)
    }

    fn resolve_factory_method(&self, definition: &BeanDefinition, method_name: &str) -> Result<Option<Executable>> {
        let factory_class = self
            .bean_factory
            .factory_class(definition)
            .ok_or_else(|| Error::MissingBeanClass {
                bean_name: definition.factory_bean_name().unwrap_or(method_name).to_string(),
            })?;

        let candidates: Vec<&Executable> = self
            .registry()
            .methods_in_hierarchy(&factory_class)
            .into_iter()
            .filter(|method| method.method_name() == Some(method_name))
            .filter(|method| {
                if method.is_static() {
                    method.declaring_class() == &factory_class
                } else {
                    !method.visibility().is_private()
                }
            })
            .collect();

        match candidates.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some((*single).clone())),
            _ => self.select_candidate(&factory_class, &candidates, definition),
        }
    }

    fn resolve_factory_bean_constructor(
        &self,
        definition: &BeanDefinition,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<Executable>> {
        if let Some(target_type) = definition.target_type() {
            let registry = self.registry();
            let factory_type = descriptor.name();
            let produced = registry
                .as_super(&TypeName::class(factory_type.clone()), &ClassName::parse(names::FACTORY_BEAN))
                .and_then(|factory| factory.generics().first().cloned());
            let bounds = registry.type_parameter_bounds(factory_type);
            if let Some(produced) = produced
                && !registry.is_assignable_with_bounds(&produced, target_type, &bounds)
            {
                return Err(Error::IncompatibleTargetType {
                    target_type: target_type.to_string(),
                    factory_type: factory_type.canonical_name(),
                });
            }
        }
        Ok(descriptor.constructors().first().cloned())
    }

    fn resolve_constructor(&self, definition: &BeanDefinition, descriptor: &TypeDescriptor) -> Result<Option<Executable>> {
        if descriptor.is_abstract() {
            return Ok(None);
        }
        let constructors = descriptor.constructors();
        if let [single] = constructors {
            return Ok(Some(single.clone()));
        }
        let autowired: Vec<&Executable> = constructors
            .iter()
            .filter(|constructor| constructor.has_annotation(names::AUTOWIRED))
            .collect();
        if let [single] = autowired.as_slice() {
            return Ok(Some((*single).clone()));
        }
        let candidates: Vec<&Executable> = constructors.iter().collect();
        self.select_candidate(descriptor.name(), &candidates, definition)
    }

    /// Picks the single candidate that accepts the configured arguments, trying each tier in turn.
    fn select_candidate(
        &self,
        owner: &ClassName,
        candidates: &[&Executable],
        definition: &BeanDefinition,
    ) -> Result<Option<Executable>> {
        let value_types = self.argument_types(definition);
        let candidates: Vec<&Executable> = candidates
            .iter()
            .copied()
            .filter(|candidate| candidate.parameter_count() == value_types.len())
            .collect();

        for tier in Tier::ALL {
            let matches: Vec<&Executable> = candidates
                .iter()
                .copied()
                .filter(|candidate| self.accepts(candidate, &value_types, tier))
                .collect();
            match matches.as_slice() {
                [] => {}
                [single] => return Ok(Some((*single).clone())),
                _ => {
                    return Err(Error::AmbiguousExecutable {
                        type_name: owner.canonical_name(),
                        value_types: value_types
                            .iter()
                            .map(|value_type| value_type.as_ref().map_or_else(|| "?".to_string(), ToString::to_string))
                            .collect::<Vec<_>>()
                            .join(", "),
                        candidates: matches.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
                    });
                }
            }
        }
        Ok(None)
    }

    /// The types of the configured arguments in binding order; `None` when the type is unknown.
    fn argument_types(&self, definition: &BeanDefinition) -> Vec<Option<TypeName>> {
        definition
            .constructor_arguments()
            .ordered()
            .into_iter()
            .map(|argument| {
                argument
                    .type_name()
                    .cloned()
                    .or_else(|| self.bean_factory.value_type(argument.value()))
            })
            .collect()
    }

    fn accepts(&self, candidate: &Executable, value_types: &[Option<TypeName>], tier: Tier) -> bool {
        candidate
            .parameter_types()
            .zip(value_types)
            .all(|(parameter, value)| value.as_ref().is_none_or(|value| self.binds(parameter, value, tier)))
    }

    fn binds(&self, parameter: &TypeName, value: &TypeName, tier: Tier) -> bool {
        let registry = self.registry();
        if registry.is_assignable(parameter, value) {
            return true;
        }
        let parameter_element = element_type(parameter);
        if tier >= Tier::AssignableElement
            && parameter_element.is_some_and(|element| registry.is_assignable(element, value))
        {
            return true;
        }
        tier >= Tier::TypeConversion
            && (is_convertible(parameter, value)
                || parameter_element.is_some_and(|element| {
                    is_convertible(element, value) || element_type(value).is_some_and(|value| is_convertible(element, value))
                }))
    }
}

/// The element type of an array or of a parameterized `Collection`, `List` or `Set`.
fn element_type(ty: &TypeName) -> Option<&TypeName> {
    match ty {
        TypeName::Array(component) => Some(component),
        TypeName::Class { name, generics } if generics.len() == 1 => {
            matches!(name.canonical_name().as_str(), names::COLLECTION | names::LIST | names::SET).then(|| &generics[0])
        }
        _ => None,
    }
}

/// Conversions the container applies to configured values: between simple types, and from a
/// class name to a `Class`.
fn is_convertible(target: &TypeName, source: &TypeName) -> bool {
    let is_class = |ty: &TypeName| ty.raw_class().is_some_and(|name| name.canonical_name() == names::CLASS);
    let is_string = |ty: &TypeName| ty.raw_class().is_some_and(|name| name.canonical_name() == names::STRING);
    (is_class(target) && is_string(source)) || (is_string(target) && is_class(source)) || (is_simple(target) && is_simple(source))
}

fn is_simple(ty: &TypeName) -> bool {
    match ty {
        TypeName::Primitive(_) => true,
        TypeName::Class { name, .. } => PrimitiveType::unboxed(name).is_some() || name.canonical_name() == names::STRING,
        _ => false,
    }
}
