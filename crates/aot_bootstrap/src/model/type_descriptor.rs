// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::{ClassName, TypeName};

use super::annotation::{self, Annotation, Visibility};
use super::member::{Executable, Field};

/// The sort of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// A class, possibly abstract.
    #[default]
    Class,
    /// An interface.
    Interface,
    /// An enum type.
    Enum,
    /// An annotation type.
    Annotation,
}

/// A declared type variable with its upper bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    name: String,
    bounds: Vec<TypeName>,
}

impl TypeParameter {
    /// The variable name, e.g. `T`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper bounds; empty when the variable is unbounded.
    pub fn bounds(&self) -> &[TypeName] {
        &self.bounds
    }
}

/// The structure of a loaded class: what the container introspection knows about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: ClassName,
    kind: TypeKind,
    visibility: Visibility,
    is_abstract: bool,
    type_parameters: Vec<TypeParameter>,
    superclass: Option<TypeName>,
    interfaces: Vec<TypeName>,
    constructors: Vec<Executable>,
    methods: Vec<Executable>,
    fields: Vec<Field>,
    annotations: Vec<Annotation>,
}

impl TypeDescriptor {
    /// Starts a public, concrete class named `name`.
    pub fn builder(name: impl Into<ClassName>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            descriptor: Self {
                name: name.into(),
                kind: TypeKind::Class,
                visibility: Visibility::Public,
                is_abstract: false,
                type_parameters: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                constructors: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
                annotations: Vec::new(),
            },
            implicit_constructor: true,
        }
    }

    /// The fully qualified name.
    pub fn name(&self) -> &ClassName {
        &self.name
    }

    /// The sort of declaration.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The access level.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the type cannot be instantiated directly: abstract classes and interfaces.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract || matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    /// Whether the type is an interface.
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    /// Declared type variables in declaration order.
    pub fn type_parameters(&self) -> &[TypeParameter] {
        &self.type_parameters
    }

    /// The declared superclass; `None` implies `java.lang.Object`.
    pub fn superclass(&self) -> Option<&TypeName> {
        self.superclass.as_ref()
    }

    /// Directly implemented interfaces, with their generics.
    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// The direct supertypes: the superclass first, then the interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeName> {
        self.superclass.iter().chain(&self.interfaces)
    }

    /// Declared constructors.
    pub fn constructors(&self) -> &[Executable] {
        &self.constructors
    }

    /// Declared methods, excluding inherited ones.
    pub fn methods(&self) -> &[Executable] {
        &self.methods
    }

    /// Declared fields, excluding inherited ones.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Annotations on the type.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether the type is annotated with `annotation_type`.
    pub fn has_annotation(&self, annotation_type: &ClassName) -> bool {
        self.annotations.iter().any(|annotation| annotation.type_name() == annotation_type)
    }

    pub(crate) fn find_annotation(&self, canonical_name: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, canonical_name)
    }

    /// This type as a generic type using its own type variables, e.g. `List<E>`.
    pub fn generic_type(&self) -> TypeName {
        TypeName::parameterized(
            self.name.clone(),
            self.type_parameters
                .iter()
                .map(|parameter| TypeName::variable(parameter.name.clone())),
        )
    }
}

/// Builds a [`TypeDescriptor`].
///
/// Like a Java compiler, [`build`](Self::build) adds an implicit no-argument constructor to a
/// concrete class that declares none.
#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
    implicit_constructor: bool,
}

impl TypeDescriptorBuilder {
    /// Sets the sort of declaration.
    #[must_use]
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.descriptor.kind = kind;
        self
    }

    /// Declares an interface.
    #[must_use]
    pub fn interface(self) -> Self {
        self.kind(TypeKind::Interface)
    }

    /// Declares an enum type.
    #[must_use]
    pub fn enumeration(self) -> Self {
        self.kind(TypeKind::Enum)
    }

    /// Declares an annotation type.
    #[must_use]
    pub fn annotation_type(self) -> Self {
        self.kind(TypeKind::Annotation)
    }

    /// Sets the access level.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.descriptor.visibility = visibility;
        self
    }

    /// Marks the class `abstract`.
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.descriptor.is_abstract = true;
        self
    }

    /// Declares the type variable `name` with its upper `bounds`.
    #[must_use]
    pub fn type_parameter(mut self, name: impl Into<String>, bounds: impl IntoIterator<Item = TypeName>) -> Self {
        self.descriptor.type_parameters.push(TypeParameter {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        });
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn superclass(mut self, superclass: impl Into<TypeName>) -> Self {
        self.descriptor.superclass = Some(superclass.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<TypeName>) -> Self {
        self.descriptor.interfaces.push(interface.into());
        self
    }

    /// Adds a constructor.
    #[must_use]
    pub fn constructor(mut self, constructor: Executable) -> Self {
        self.descriptor.constructors.push(constructor);
        self
    }

    /// Suppresses the implicit no-argument constructor, e.g. for types whose constructors are
    /// all private and therefore not listed.
    #[must_use]
    pub fn no_implicit_constructor(mut self) -> Self {
        self.implicit_constructor = false;
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn method(mut self, method: Executable) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    /// Adds `annotation` to the type.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.descriptor.annotations.push(annotation);
        self
    }

    /// Returns the descriptor.
    pub fn build(self) -> TypeDescriptor {
        let mut descriptor = self.descriptor;
        if self.implicit_constructor && descriptor.kind == TypeKind::Class && descriptor.constructors.is_empty() {
            let visibility = descriptor.visibility;
            descriptor
                .constructors
                .push(Executable::constructor(descriptor.name.clone()).with_visibility(visibility));
        }
        descriptor
    }
}
