// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{HashMap, HashSet, VecDeque};

use javagen::{ClassName, PrimitiveType, TypeName};

use super::annotation::Visibility;
use super::member::Executable;
use super::names;
use super::type_descriptor::TypeDescriptor;
use crate::{Error, Result};

/// The types known to the generator, and the Java type rules evaluated over them.
///
/// This is the generator's view of a class loader. [`TypeRegistry::new`] preloads the JDK and
/// container types that resolution relies on; application types are added with
/// [`register`](Self::register). Types that are absent are treated as public classes without
/// supertypes, except that everything is an `Object`.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<ClassName, TypeDescriptor>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry preloaded with the JDK and container types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for descriptor in preloaded_types() {
            registry.register(descriptor);
        }
        registry
    }

    /// A registry without any type, not even the JDK ones.
    pub fn empty() -> Self {
        Self { types: HashMap::new() }
    }

    /// Adds a type, replacing any previous descriptor with the same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name().clone(), descriptor);
        self
    }

    /// The descriptor of the type named `name`.
    pub fn get(&self, name: &ClassName) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Whether a type named `name` is known.
    pub fn contains(&self, name: &ClassName) -> bool {
        self.types.contains_key(name)
    }

    /// Like [`get`](Self::get), failing with [`Error::UnknownType`] for absent types.
    pub fn require(&self, name: &ClassName) -> Result<&TypeDescriptor> {
        self.get(name).ok_or_else(|| Error::UnknownType {
            type_name: name.canonical_name(),
        })
    }

    /// The direct supertypes of `ty`, with the type arguments of `ty` substituted.
    ///
    /// For a raw type the supertypes keep the declared type variables.
    pub fn direct_supertypes(&self, ty: &TypeName) -> Vec<TypeName> {
        let TypeName::Class { name, generics } = ty else {
            return Vec::new();
        };
        let Some(descriptor) = self.get(name) else {
            return Vec::new();
        };
        let bindings: HashMap<String, TypeName> = if generics.len() == descriptor.type_parameters().len() {
            descriptor
                .type_parameters()
                .iter()
                .map(|parameter| parameter.name().to_string())
                .zip(generics.iter().cloned())
                .collect()
        } else {
            HashMap::new()
        };
        descriptor.supertypes().map(|supertype| supertype.substitute(&bindings)).collect()
    }

    /// Views `ty` as its supertype `class`, e.g. `ArrayList<String>` as `List<String>`.
    ///
    /// Returns `None` if `class` is not a supertype of `ty`.
    pub fn as_super(&self, ty: &TypeName, class: &ClassName) -> Option<TypeName> {
        if class.canonical_name() == names::OBJECT && matches!(ty, TypeName::Class { .. } | TypeName::Array(_)) {
            return Some(TypeName::class(class.clone()));
        }
        let mut visited = HashSet::new();
        self.find_super(ty, class, &mut visited)
    }

    fn find_super(&self, ty: &TypeName, class: &ClassName, visited: &mut HashSet<ClassName>) -> Option<TypeName> {
        let raw = ty.raw_class()?;
        if raw == class {
            return Some(ty.clone());
        }
        if !visited.insert(raw.clone()) {
            return None;
        }
        self.direct_supertypes(ty)
            .iter()
            .find_map(|supertype| self.find_super(supertype, class, visited))
    }

    /// Whether `class` is `ancestor` or one of its subtypes.
    pub fn is_subtype(&self, class: &ClassName, ancestor: &ClassName) -> bool {
        self.as_super(&TypeName::class(class.clone()), ancestor).is_some()
    }

    /// Java assignment compatibility: can a value of type `source` be assigned to `target`?
    ///
    /// Covers identity, primitive widening, boxing and unboxing, reference widening through the
    /// supertype graph and array covariance. Generic arguments are compared exactly, except that
    /// raw types and type variables match anything.
    pub fn is_assignable(&self, target: &TypeName, source: &TypeName) -> bool {
        self.is_assignable_with_bounds(target, source, &HashMap::new())
    }

    /// Like [`is_assignable`](Self::is_assignable), but a type variable of `target` listed in
    /// `bounds` only matches types assignable to its bound.
    pub fn is_assignable_with_bounds(&self, target: &TypeName, source: &TypeName, bounds: &HashMap<String, TypeName>) -> bool {
        if target == source {
            return true;
        }
        match (target, source) {
            (TypeName::Variable(name), _) => self.within_bound(name, source, bounds),
            (_, TypeName::Variable(_)) => true,
            (TypeName::Primitive(target), TypeName::Primitive(source)) => source.widens_to(*target),
            (TypeName::Primitive(target), TypeName::Class { name, .. }) => {
                PrimitiveType::unboxed(name).is_some_and(|source| source.widens_to(*target))
            }
            (TypeName::Class { .. }, TypeName::Primitive(source)) => {
                self.is_assignable_with_bounds(target, &TypeName::class(source.boxed()), bounds)
            }
            (TypeName::Array(target), TypeName::Array(source)) => {
                if target.is_primitive() || source.is_primitive() {
                    target == source
                } else {
                    self.is_assignable_with_bounds(target, source, bounds)
                }
            }
            (TypeName::Class { name, .. }, TypeName::Array(_)) => {
                matches!(name.canonical_name().as_str(), names::OBJECT | names::CLONEABLE | names::SERIALIZABLE)
            }
            (TypeName::Class { name, generics }, TypeName::Class { .. }) => {
                let Some(view) = self.as_super(source, name) else {
                    return false;
                };
                if generics.is_empty() || view.generics().is_empty() {
                    return true;
                }
                generics.len() == view.generics().len()
                    && generics
                        .iter()
                        .zip(view.generics())
                        .all(|(target, source)| self.type_argument_matches(target, source, bounds))
            }
            _ => false,
        }
    }

    fn type_argument_matches(&self, target: &TypeName, source: &TypeName, bounds: &HashMap<String, TypeName>) -> bool {
        match (target, source) {
            (TypeName::Variable(name), _) => self.within_bound(name, source, bounds),
            (_, TypeName::Variable(_)) => true,
            (
                TypeName::Class {
                    name: target_name,
                    generics: target_generics,
                },
                TypeName::Class {
                    name: source_name,
                    generics: source_generics,
                },
            ) => {
                target_name == source_name
                    && (target_generics.is_empty()
                        || source_generics.is_empty()
                        || (target_generics.len() == source_generics.len()
                            && target_generics
                                .iter()
                                .zip(source_generics)
                                .all(|(target, source)| self.type_argument_matches(target, source, bounds))))
            }
            (TypeName::Array(target), TypeName::Array(source)) => self.type_argument_matches(target, source, bounds),
            _ => target == source,
        }
    }

    fn within_bound(&self, variable: &str, source: &TypeName, bounds: &HashMap<String, TypeName>) -> bool {
        bounds
            .get(variable)
            .is_none_or(|bound| self.is_assignable_with_bounds(bound, source, bounds))
    }

    /// The first declared bound of each bounded type parameter of `class`.
    pub fn type_parameter_bounds(&self, class: &ClassName) -> HashMap<String, TypeName> {
        self.get(class)
            .map(|descriptor| {
                descriptor
                    .type_parameters()
                    .iter()
                    .filter_map(|parameter| {
                        parameter
                            .bounds()
                            .first()
                            .map(|bound| (parameter.name().to_string(), bound.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `class` followed by its superclasses, nearest first. Unknown types end the chain.
    pub fn superclass_chain(&self, class: &ClassName) -> Vec<&TypeDescriptor> {
        let mut chain: Vec<&TypeDescriptor> = Vec::new();
        let mut next = self.get(class);
        while let Some(descriptor) = next {
            if chain.iter().any(|known| known.name() == descriptor.name()) {
                break;
            }
            chain.push(descriptor);
            next = descriptor.superclass().and_then(TypeName::raw_class).and_then(|name| self.get(name));
        }
        chain
    }

    /// `class`, its superclass chain, then every interface they implement, breadth first and
    /// without duplicates.
    pub fn hierarchy(&self, class: &ClassName) -> Vec<&TypeDescriptor> {
        let mut hierarchy = self.superclass_chain(class);
        let mut seen: HashSet<&ClassName> = hierarchy.iter().copied().map(TypeDescriptor::name).collect();
        let mut queue: VecDeque<&ClassName> = hierarchy
            .iter()
            .copied()
            .flat_map(TypeDescriptor::interfaces)
            .filter_map(TypeName::raw_class)
            .collect();
        while let Some(name) = queue.pop_front() {
            if !seen.insert(name) {
                continue;
            }
            if let Some(descriptor) = self.get(name) {
                queue.extend(descriptor.interfaces().iter().filter_map(TypeName::raw_class));
                hierarchy.push(descriptor);
            }
        }
        hierarchy
    }

    /// Methods visible on `class`: its own, then inherited ones not overridden along the way.
    pub fn methods_in_hierarchy(&self, class: &ClassName) -> Vec<&Executable> {
        let mut methods: Vec<&Executable> = Vec::new();
        for descriptor in self.hierarchy(class) {
            for method in descriptor.methods() {
                if !methods.iter().any(|known| known.same_signature(method)) {
                    methods.push(method);
                }
            }
        }
        methods
    }

    /// The declared visibility of `class`; unknown types are public.
    pub fn visibility(&self, class: &ClassName) -> Visibility {
        self.get(class).map_or(Visibility::Public, TypeDescriptor::visibility)
    }

    /// Whether `class` and every class enclosing it are public.
    pub fn is_accessible_from_anywhere(&self, class: &ClassName) -> bool {
        let mut current = Some(class.clone());
        while let Some(name) = current {
            if !self.visibility(&name).is_public() {
                return false;
            }
            current = name.enclosing();
        }
        true
    }
}

fn class(name: &str) -> TypeName {
    TypeName::class(ClassName::parse(name))
}

fn generic(name: &str, generics: impl IntoIterator<Item = TypeName>) -> TypeName {
    TypeName::parameterized(ClassName::parse(name), generics)
}

fn variable(name: &str) -> TypeName {
    TypeName::variable(name)
}

#[cfg_attr(test, mutants::skip)] // Static data.
fn preloaded_types() -> Vec<TypeDescriptor> {
    let mut types = vec![
        TypeDescriptor::builder(names::OBJECT).build(),
        TypeDescriptor::builder(names::SERIALIZABLE).interface().build(),
        TypeDescriptor::builder(names::CLONEABLE).interface().build(),
        TypeDescriptor::builder(names::COMPARABLE)
            .interface()
            .type_parameter("T", [])
            .build(),
        TypeDescriptor::builder(names::CHAR_SEQUENCE).interface().build(),
        TypeDescriptor::builder(names::STRING)
            .implements(class(names::SERIALIZABLE))
            .implements(generic(names::COMPARABLE, [class(names::STRING)]))
            .implements(class(names::CHAR_SEQUENCE))
            .build(),
        TypeDescriptor::builder(names::NUMBER)
            .abstract_type()
            .implements(class(names::SERIALIZABLE))
            .build(),
        TypeDescriptor::builder(names::CLASS)
            .type_parameter("T", [])
            .implements(class(names::SERIALIZABLE))
            .no_implicit_constructor()
            .build(),
        TypeDescriptor::builder(names::ENUM)
            .abstract_type()
            .type_parameter("E", [generic(names::ENUM, [variable("E")])])
            .implements(generic(names::COMPARABLE, [variable("E")]))
            .implements(class(names::SERIALIZABLE))
            .build(),
        TypeDescriptor::builder(names::ITERABLE)
            .interface()
            .type_parameter("T", [])
            .build(),
        TypeDescriptor::builder(names::COLLECTION)
            .interface()
            .type_parameter("E", [])
            .implements(generic(names::ITERABLE, [variable("E")]))
            .build(),
        TypeDescriptor::builder(names::LIST)
            .interface()
            .type_parameter("E", [])
            .implements(generic(names::COLLECTION, [variable("E")]))
            .build(),
        TypeDescriptor::builder(names::SET)
            .interface()
            .type_parameter("E", [])
            .implements(generic(names::COLLECTION, [variable("E")]))
            .build(),
        TypeDescriptor::builder(names::MAP)
            .interface()
            .type_parameter("K", [])
            .type_parameter("V", [])
            .build(),
        TypeDescriptor::builder(names::COLLECTIONS).no_implicit_constructor().build(),
        TypeDescriptor::builder(names::LOCALE)
            .implements(class(names::SERIALIZABLE))
            .implements(class(names::CLONEABLE))
            .method(Executable::static_method(names::LOCALE, "getDefault", class(names::LOCALE)))
            .build(),
        TypeDescriptor::builder(names::TEMPORAL_UNIT).interface().build(),
        TypeDescriptor::builder(names::CHRONO_UNIT)
            .enumeration()
            .superclass(generic(names::ENUM, [class(names::CHRONO_UNIT)]))
            .implements(class(names::TEMPORAL_UNIT))
            .build(),
        TypeDescriptor::builder(names::FACTORY_BEAN)
            .interface()
            .type_parameter("T", [])
            .method(Executable::method(names::FACTORY_BEAN, "getObject", variable("T")))
            .build(),
        TypeDescriptor::builder(names::OBJECT_FACTORY)
            .interface()
            .type_parameter("T", [])
            .method(Executable::method(names::OBJECT_FACTORY, "getObject", variable("T")))
            .build(),
        TypeDescriptor::builder(names::OBJECT_PROVIDER)
            .interface()
            .type_parameter("T", [])
            .implements(generic(names::OBJECT_FACTORY, [variable("T")]))
            .implements(generic(names::ITERABLE, [variable("T")]))
            .build(),
        TypeDescriptor::builder(names::JAVAX_PROVIDER)
            .interface()
            .type_parameter("T", [])
            .build(),
        TypeDescriptor::builder(names::AUTOWIRED).annotation_type().build(),
        TypeDescriptor::builder(names::EVENT_LISTENER).annotation_type().build(),
        TypeDescriptor::builder(names::CONFIGURATION).annotation_type().build(),
        TypeDescriptor::builder(names::APPLICATION_EVENT)
            .abstract_type()
            .implements(class(names::SERIALIZABLE))
            .build(),
    ];

    for primitive in PrimitiveType::ALL {
        let boxed = primitive.boxed();
        let mut builder = TypeDescriptor::builder(boxed.clone())
            .implements(class(names::SERIALIZABLE))
            .implements(generic(names::COMPARABLE, [TypeName::class(boxed.clone())]))
            .no_implicit_constructor()
            .method(
                Executable::static_method(boxed.clone(), "valueOf", TypeName::class(boxed.clone())).param("value", primitive),
            )
            .method(
                Executable::static_method(boxed.clone(), "valueOf", TypeName::class(boxed.clone()))
                    .param("value", class(names::STRING)),
            );
        if !matches!(primitive, PrimitiveType::Boolean | PrimitiveType::Char) {
            builder = builder.superclass(class(names::NUMBER));
        }
        types.push(builder.build());
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::builder("com.example.NumberHolder")
                .type_parameter("T", [class(names::NUMBER)])
                .build(),
        );
        registry.register(
            TypeDescriptor::builder("com.example.NumberHolderFactoryBean")
                .type_parameter("T", [class(names::NUMBER)])
                .implements(generic(names::FACTORY_BEAN, [generic("com.example.NumberHolder", [variable("T")])]))
                .build(),
        );
        registry
    }

    fn list_of(element: &str) -> TypeName {
        generic(names::LIST, [class(element)])
    }

    #[test]
    fn primitive_widening_and_boxing() {
        let registry = registry();
        let int = TypeName::Primitive(PrimitiveType::Int);
        let long = TypeName::Primitive(PrimitiveType::Long);
        assert!(registry.is_assignable(&long, &int));
        assert!(!registry.is_assignable(&int, &long));
        assert!(registry.is_assignable(&int, &class("java.lang.Integer")));
        assert!(registry.is_assignable(&class(names::NUMBER), &int));
        assert!(registry.is_assignable(&class(names::OBJECT), &long));
        assert!(!registry.is_assignable(&class(names::STRING), &int));
    }

    #[test]
    fn reference_widening_follows_supertypes() {
        let registry = registry();
        assert!(registry.is_assignable(&class(names::NUMBER), &class("java.lang.Long")));
        assert!(registry.is_assignable(&class(names::CHAR_SEQUENCE), &class(names::STRING)));
        assert!(!registry.is_assignable(&class(names::STRING), &class(names::OBJECT)));
        assert!(registry.is_assignable(&class(names::OBJECT), &class("com.unknown.Type")));
    }

    #[test]
    fn generics_are_invariant_unless_raw() {
        let registry = registry();
        assert!(registry.is_assignable(&list_of(names::STRING), &list_of(names::STRING)));
        assert!(!registry.is_assignable(&list_of(names::NUMBER), &list_of("java.lang.Integer")));
        assert!(registry.is_assignable(&class(names::LIST), &list_of("java.lang.Integer")));
        assert!(registry.is_assignable(&generic(names::COLLECTION, [class(names::STRING)]), &list_of(names::STRING)));
        assert!(registry.is_assignable(&generic(names::ITERABLE, [variable("T")]), &list_of(names::STRING)));
    }

    #[test]
    fn arrays_are_covariant_for_references_only() {
        let registry = registry();
        let numbers = TypeName::array_of(class(names::NUMBER));
        let integers = TypeName::array_of(class("java.lang.Integer"));
        let ints = TypeName::array_of(TypeName::Primitive(PrimitiveType::Int));
        let longs = TypeName::array_of(TypeName::Primitive(PrimitiveType::Long));
        assert!(registry.is_assignable(&numbers, &integers));
        assert!(!registry.is_assignable(&integers, &numbers));
        assert!(!registry.is_assignable(&longs, &ints));
        assert!(registry.is_assignable(&class(names::OBJECT), &ints));
    }

    #[test]
    fn as_super_substitutes_type_arguments() {
        let registry = registry();
        let view = registry.as_super(&list_of(names::STRING), &ClassName::parse(names::ITERABLE));
        assert_eq!(view, Some(generic(names::ITERABLE, [class(names::STRING)])));

        let factory = registry.as_super(
            &class("com.example.NumberHolderFactoryBean"),
            &ClassName::parse(names::FACTORY_BEAN),
        );
        assert_eq!(factory.map(|ty| ty.to_string()).as_deref(), Some("org.springframework.beans.factory.FactoryBean<com.example.NumberHolder<T>>"));
    }

    #[test]
    fn bounded_variables_check_their_bound() {
        let registry = registry();
        let bounds = registry.type_parameter_bounds(&ClassName::parse("com.example.NumberHolderFactoryBean"));
        let produced = generic("com.example.NumberHolder", [variable("T")]);
        let integer_holder = generic("com.example.NumberHolder", [class("java.lang.Integer")]);
        let string_holder = generic("com.example.NumberHolder", [class(names::STRING)]);
        assert!(registry.is_assignable_with_bounds(&produced, &integer_holder, &bounds));
        assert!(!registry.is_assignable_with_bounds(&produced, &string_holder, &bounds));
        assert!(registry.is_assignable(&produced, &string_holder));
    }

    #[test]
    fn hierarchy_lists_classes_before_interfaces() {
        let mut registry = registry();
        registry.register(
            TypeDescriptor::builder("com.example.Base")
                .implements(class("com.example.Api"))
                .build(),
        );
        registry.register(TypeDescriptor::builder("com.example.Api").interface().build());
        registry.register(
            TypeDescriptor::builder("com.example.Impl")
                .superclass(class("com.example.Base"))
                .implements(class(names::SERIALIZABLE))
                .build(),
        );
        let names: Vec<String> = registry
            .hierarchy(&ClassName::parse("com.example.Impl"))
            .iter()
            .map(|descriptor| descriptor.name().simple_name().to_string())
            .collect();
        assert_eq!(names, ["Impl", "Base", "Serializable", "Api"]);
    }

    #[test]
    fn accessibility_includes_enclosing_classes() {
        let mut registry = registry();
        registry.register(
            TypeDescriptor::builder(ClassName::parse("com.example.Outer"))
                .visibility(Visibility::Package)
                .build(),
        );
        registry.register(TypeDescriptor::builder(ClassName::parse("com.example.Outer$Inner")).build());
        assert!(!registry.is_accessible_from_anywhere(&ClassName::parse("com.example.Outer$Inner")));
        assert!(registry.is_accessible_from_anywhere(&ClassName::parse("com.example.Other")));
    }

    #[test]
    fn require_reports_unknown_types() {
        let registry = TypeRegistry::empty();
        let error = registry.require(&ClassName::parse("com.example.Missing"));
        assert!(matches!(error, Err(Error::UnknownType { type_name }) if type_name == "com.example.Missing"));
    }
}
