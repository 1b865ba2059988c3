// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Resolution of bean definitions into [`BeanInstanceDescriptor`]s: how an instance is created,
//! what is injected into it, and which properties are set.

mod executable;
mod injection;
mod properties;

pub use executable::BeanInstanceExecutableSupplier;
pub use injection::InjectionPointsSupplier;
pub use properties::PropertiesSupplier;

use javagen::{ClassName, TypeName};

use crate::Result;
use crate::model::names;
use crate::model::{BeanDefinition, BeanFactory, BeanValue, Executable, Field, Parameter, TypeRegistry};

/// How a dependency is looked up in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// A single matching bean.
    Single,
    /// All matching beans, as an array.
    Array,
    /// All matching beans, as a collection.
    Collection,
    /// A lazy handle resolving matching beans on demand.
    Provider,
}

impl DependencyKind {
    /// Classifies `injection_type`; `None` if it still contains type variables.
    pub fn of(injection_type: &TypeName, registry: &TypeRegistry) -> Option<Self> {
        if injection_type.has_unresolvable_generics() {
            return None;
        }
        let Some(class) = injection_type.raw_class() else {
            return Some(if injection_type.is_array() { Self::Array } else { Self::Single });
        };
        let is_a = |ancestor: &str| registry.is_subtype(class, &ClassName::parse(ancestor));
        if is_a(names::OBJECT_FACTORY) || is_a(names::JAVAX_PROVIDER) {
            Some(Self::Provider)
        } else if is_a(names::COLLECTION) {
            Some(Self::Collection)
        } else {
            Some(Self::Single)
        }
    }
}

/// The member through which a dependency is injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectedMember {
    /// A parameter of the instance creator.
    Parameter {
        /// The position of the parameter.
        index: usize,
        /// The parameter itself.
        parameter: Parameter,
    },
    /// An autowired field.
    Field(Field),
    /// An autowired method.
    Method(Executable),
}

/// A dependency that the container resolves and injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    member: InjectedMember,
    injection_type: TypeName,
    required: bool,
    dependency_kind: Option<DependencyKind>,
}

impl MemberDescriptor {
    /// Describes `member`, deriving the dependency kind from `injection_type`.
    pub fn new(member: InjectedMember, injection_type: TypeName, required: bool, registry: &TypeRegistry) -> Self {
        let dependency_kind = DependencyKind::of(&injection_type, registry);
        Self {
            member,
            injection_type,
            required,
            dependency_kind,
        }
    }

    /// The member the dependency is injected through.
    pub fn member(&self) -> &InjectedMember {
        &self.member
    }

    /// The declared type of the injected value. For methods, the type of the first parameter.
    pub fn injection_type(&self) -> &TypeName {
        &self.injection_type
    }

    /// Whether resolution fails when no candidate bean exists.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The container wrapper around the dependency, if any.
    pub fn dependency_kind(&self) -> Option<DependencyKind> {
        self.dependency_kind
    }
}

/// The executable creating the bean instance, with one [`MemberDescriptor`] per parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceCreator {
    executable: Executable,
    parameters: Vec<MemberDescriptor>,
}

impl InstanceCreator {
    /// Describes every parameter of `executable` as a required dependency.
    pub fn new(executable: Executable, registry: &TypeRegistry) -> Self {
        let parameters = executable
            .parameters()
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                MemberDescriptor::new(
                    InjectedMember::Parameter {
                        index,
                        parameter: parameter.clone(),
                    },
                    parameter.type_name().clone(),
                    true,
                    registry,
                )
            })
            .collect();
        Self { executable, parameters }
    }

    /// The constructor or factory method.
    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    /// Positionally aligned with the executable's parameters.
    pub fn parameters(&self) -> &[MemberDescriptor] {
        &self.parameters
    }
}

/// A property value to set on the bean after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    value: BeanValue,
    declared_type: Option<TypeName>,
}

impl PropertyDescriptor {
    /// A property `name` set to `value`.
    pub fn new(name: impl Into<String>, value: BeanValue, declared_type: Option<TypeName>) -> Self {
        Self {
            name: name.into(),
            value,
            declared_type,
        }
    }

    /// The property name, e.g. `name` for `setName`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured value.
    pub fn value(&self) -> &BeanValue {
        &self.value
    }

    /// The type of the setter parameter or field backing the property, when known.
    pub fn declared_type(&self) -> Option<&TypeName> {
        self.declared_type.as_ref()
    }
}

/// Everything needed to write the registration of one bean.
#[derive(Debug, Clone, PartialEq)]
pub struct BeanInstanceDescriptor {
    bean_type: TypeName,
    user_class: ClassName,
    instance_creator: Option<InstanceCreator>,
    injection_points: Vec<MemberDescriptor>,
    properties: Vec<PropertyDescriptor>,
}

impl BeanInstanceDescriptor {
    /// Starts a descriptor for beans of `bean_type`.
    pub fn of(bean_type: impl Into<TypeName>) -> BeanInstanceDescriptorBuilder {
        let bean_type = bean_type.into();
        let user_class = bean_type
            .raw_class()
            .cloned()
            .unwrap_or_else(|| ClassName::parse(names::OBJECT));
        BeanInstanceDescriptorBuilder {
            descriptor: Self {
                bean_type,
                user_class,
                instance_creator: None,
                injection_points: Vec::new(),
                properties: Vec::new(),
            },
        }
    }

    /// The type of the bean, with its generics.
    pub fn bean_type(&self) -> &TypeName {
        &self.bean_type
    }

    /// The class of the bean type.
    pub fn user_class(&self) -> &ClassName {
        &self.user_class
    }

    /// `None` for beans the writer cannot instantiate.
    pub fn instance_creator(&self) -> Option<&InstanceCreator> {
        self.instance_creator.as_ref()
    }

    /// Autowired fields and methods, applied after creation.
    pub fn injection_points(&self) -> &[MemberDescriptor] {
        &self.injection_points
    }

    /// Property values, in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
}

/// Builds a [`BeanInstanceDescriptor`].
#[derive(Debug, Clone)]
pub struct BeanInstanceDescriptorBuilder {
    descriptor: BeanInstanceDescriptor,
}

impl BeanInstanceDescriptorBuilder {
    /// Sets the executable creating the instance.
    #[must_use]
    pub fn instance_creator(mut self, instance_creator: InstanceCreator) -> Self {
        self.descriptor.instance_creator = Some(instance_creator);
        self
    }

    /// Appends injection points.
    #[must_use]
    pub fn injection_points(mut self, injection_points: impl IntoIterator<Item = MemberDescriptor>) -> Self {
        self.descriptor.injection_points.extend(injection_points);
        self
    }

    /// Appends property values.
    #[must_use]
    pub fn properties(mut self, properties: impl IntoIterator<Item = PropertyDescriptor>) -> Self {
        self.descriptor.properties.extend(properties);
        self
    }

    /// Returns the descriptor.
    pub fn build(self) -> BeanInstanceDescriptor {
        self.descriptor
    }
}

/// Creates the [`BeanInstanceDescriptor`] of a bean definition.
pub trait BeanInstanceDescriptorFactory {
    /// Returns `None` when the definition has no usable instance creator, in which case the bean
    /// is not registered.
    ///
    /// # Errors
    ///
    /// Fails when the instance creator cannot be resolved unambiguously.
    fn create(&self, definition: &BeanDefinition) -> Result<Option<BeanInstanceDescriptor>>;
}

/// Resolves descriptors with [`BeanInstanceExecutableSupplier`], [`InjectionPointsSupplier`] and
/// [`PropertiesSupplier`].
#[derive(Debug, Clone, Copy)]
pub struct DefaultBeanInstanceDescriptorFactory<'a> {
    bean_factory: &'a BeanFactory,
}

impl<'a> DefaultBeanInstanceDescriptorFactory<'a> {
    /// A factory resolving against the types and beans of `bean_factory`.
    pub fn new(bean_factory: &'a BeanFactory) -> Self {
        Self { bean_factory }
    }
}

impl BeanInstanceDescriptorFactory for DefaultBeanInstanceDescriptorFactory<'_> {
    fn create(&self, definition: &BeanDefinition) -> Result<Option<BeanInstanceDescriptor>> {
        let Some(executable) = BeanInstanceExecutableSupplier::new(self.bean_factory).detect_bean_instance_executable(definition)?
        else {
            return Ok(None);
        };
        let registry = self.bean_factory.registry();
        let bean_type = definition
            .target_type()
            .cloned()
            .or_else(|| executable.return_type().cloned())
            .unwrap_or_else(|| TypeName::class(executable.declaring_class().clone()));
        let instance_class = executable
            .return_type()
            .and_then(TypeName::raw_class)
            .unwrap_or_else(|| executable.declaring_class())
            .clone();

        let injection_points = InjectionPointsSupplier::new(registry).detect_injection_points(&instance_class, &executable);
        let properties = PropertiesSupplier::new(self.bean_factory).detect_properties(definition, &instance_class);
        let instance_creator = InstanceCreator::new(executable, registry);

        Ok(Some(
            BeanInstanceDescriptor::of(bean_type)
                .instance_creator(instance_creator)
                .injection_points(injection_points)
                .properties(properties)
                .build(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use javagen::PrimitiveType;

    use super::*;
    use crate::model::{Annotation, TypeDescriptor};

    fn parameterized(class: &str, element: &str) -> TypeName {
        TypeName::parameterized(ClassName::parse(class), [ClassName::parse(element).into()])
    }

    #[test]
    fn dependency_kinds() {
        let registry = TypeRegistry::new();
        let kind = |ty: TypeName| DependencyKind::of(&ty, &registry);
        assert_eq!(kind(ClassName::parse(names::STRING).into()), Some(DependencyKind::Single));
        assert_eq!(kind(PrimitiveType::Int.into()), Some(DependencyKind::Single));
        assert_eq!(kind(TypeName::array_of(ClassName::parse(names::STRING).into())), Some(DependencyKind::Array));
        assert_eq!(kind(parameterized(names::LIST, names::STRING)), Some(DependencyKind::Collection));
        assert_eq!(kind(parameterized(names::OBJECT_PROVIDER, names::STRING)), Some(DependencyKind::Provider));
        assert_eq!(kind(TypeName::variable("T")), None);
    }

    #[test]
    fn instance_creator_aligns_parameters() {
        let registry = TypeRegistry::new();
        let executable = Executable::constructor("com.example.Sample")
            .param("name", ClassName::parse(names::STRING))
            .param("values", parameterized(names::LIST, names::STRING));
        let creator = InstanceCreator::new(executable, &registry);
        assert_eq!(creator.parameters().len(), creator.executable().parameter_count());
        assert!(matches!(creator.parameters()[1].member(), InjectedMember::Parameter { index: 1, .. }));
        assert_eq!(creator.parameters()[1].dependency_kind(), Some(DependencyKind::Collection));
    }

    #[test]
    fn factory_builds_complete_descriptor() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::builder("com.example.Sample")
                .field(
                    crate::model::Field::new("com.example.Sample", "environment", ClassName::parse("com.example.Environment"))
                        .annotated(Annotation::autowired()),
                )
                .method(Executable::void_method("com.example.Sample", "setName").param("name", ClassName::parse(names::STRING)))
                .build(),
        );
        let factory = BeanFactory::new(registry);
        let definition = BeanDefinition::builder("com.example.Sample").property("name", "test").build();

        let descriptor = DefaultBeanInstanceDescriptorFactory::new(&factory)
            .create(&definition)
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.user_class(), &ClassName::parse("com.example.Sample"));
        assert!(descriptor.instance_creator().is_some());
        assert_eq!(descriptor.injection_points().len(), 1);
        assert_eq!(descriptor.properties()[0].declared_type(), Some(&ClassName::parse(names::STRING).into()));
    }
}
