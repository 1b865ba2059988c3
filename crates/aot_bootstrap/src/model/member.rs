// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use javagen::{ClassName, TypeName};

use super::annotation::{self, Annotation, Visibility};

/// A parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
    type_name: TypeName,
    annotations: Vec<Annotation>,
}

impl Parameter {
    /// A parameter named `name` of type `type_name`.
    pub fn new(name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            annotations: Vec::new(),
        }
    }

    /// Adds `annotation` to the parameter.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Annotations on the parameter.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// Whether an executable is a constructor or a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutableKind {
    /// A constructor.
    Constructor,
    /// A method named `name`.
    Method {
        /// The method name.
        name: String,
        /// `None` for `void` methods.
        return_type: Option<TypeName>,
        /// Whether the method is `static`.
        is_static: bool,
    },
}

/// A constructor or method of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Executable {
    declaring_class: ClassName,
    kind: ExecutableKind,
    parameters: Vec<Parameter>,
    visibility: Visibility,
    annotations: Vec<Annotation>,
    varargs: bool,
}

impl Executable {
    /// A public constructor without parameters.
    pub fn constructor(declaring_class: impl Into<ClassName>) -> Self {
        Self::with_kind(declaring_class.into(), ExecutableKind::Constructor)
    }

    /// A public instance method without parameters.
    pub fn method(declaring_class: impl Into<ClassName>, name: impl Into<String>, return_type: impl Into<TypeName>) -> Self {
        Self::with_kind(
            declaring_class.into(),
            ExecutableKind::Method {
                name: name.into(),
                return_type: Some(return_type.into()),
                is_static: false,
            },
        )
    }

    /// A public instance method returning `void`, such as a setter.
    pub fn void_method(declaring_class: impl Into<ClassName>, name: impl Into<String>) -> Self {
        Self::with_kind(
            declaring_class.into(),
            ExecutableKind::Method {
                name: name.into(),
                return_type: None,
                is_static: false,
            },
        )
    }

    /// A public static method without parameters.
    pub fn static_method(
        declaring_class: impl Into<ClassName>,
        name: impl Into<String>,
        return_type: impl Into<TypeName>,
    ) -> Self {
        Self::with_kind(
            declaring_class.into(),
            ExecutableKind::Method {
                name: name.into(),
                return_type: Some(return_type.into()),
                is_static: true,
            },
        )
    }

    fn with_kind(declaring_class: ClassName, kind: ExecutableKind) -> Self {
        Self {
            declaring_class,
            kind,
            parameters: Vec::new(),
            visibility: Visibility::Public,
            annotations: Vec::new(),
            varargs: false,
        }
    }

    /// Appends a parameter named `name` of type `type_name`.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    /// Appends `parameter`.
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the access level, public unless set.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Adds `annotation` to the executable.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Marks the last parameter, which must be an array, as a variable arity parameter.
    #[must_use]
    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    /// The class declaring the executable.
    pub fn declaring_class(&self) -> &ClassName {
        &self.declaring_class
    }

    /// Whether this is a constructor or a method.
    pub fn kind(&self) -> &ExecutableKind {
        &self.kind
    }

    /// Whether this is a constructor.
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, ExecutableKind::Constructor)
    }

    /// The method name, or `None` for constructors.
    pub fn method_name(&self) -> Option<&str> {
        match &self.kind {
            ExecutableKind::Method { name, .. } => Some(name),
            ExecutableKind::Constructor => None,
        }
    }

    /// The generic return type, or `None` for constructors and `void` methods.
    pub fn return_type(&self) -> Option<&TypeName> {
        match &self.kind {
            ExecutableKind::Method { return_type, .. } => return_type.as_ref(),
            ExecutableKind::Constructor => None,
        }
    }

    /// Always `false` for constructors.
    pub fn is_static(&self) -> bool {
        matches!(self.kind, ExecutableKind::Method { is_static: true, .. })
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Declared parameter types in declaration order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeName> {
        self.parameters.iter().map(Parameter::type_name)
    }

    /// The access level.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Annotations on the executable.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether the last parameter is a variable arity array.
    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub(crate) fn has_annotation(&self, canonical_name: &str) -> bool {
        annotation::find(&self.annotations, canonical_name).is_some()
    }

    /// Whether both executables have the same name and parameter types, i.e. one overrides or
    /// hides the other.
    pub(crate) fn same_signature(&self, other: &Self) -> bool {
        self.method_name() == other.method_name()
            && self.parameters.len() == other.parameters.len()
            && self
                .parameter_types()
                .zip(other.parameter_types())
                .all(|(left, right)| left.raw() == right.raw())
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExecutableKind::Constructor => write!(f, "{}(", self.declaring_class)?,
            ExecutableKind::Method { name, .. } => write!(f, "{}.{name}(", self.declaring_class)?,
        }
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter.type_name)?;
        }
        f.write_str(")")
    }
}

/// A field of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    declaring_class: ClassName,
    name: String,
    type_name: TypeName,
    visibility: Visibility,
    is_static: bool,
    annotations: Vec<Annotation>,
}

impl Field {
    /// A private instance field.
    pub fn new(declaring_class: impl Into<ClassName>, name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        Self {
            declaring_class: declaring_class.into(),
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::Private,
            is_static: false,
            annotations: Vec::new(),
        }
    }

    /// Sets the access level, public unless set.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the field `static`.
    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Adds `annotation` to the field.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The class declaring the field.
    pub fn declaring_class(&self) -> &ClassName {
        &self.declaring_class
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared field type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The access level.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the field is `static`.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Annotations on the field.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub(crate) fn has_annotation(&self, canonical_name: &str) -> bool {
        annotation::find(&self.annotations, canonical_name).is_some()
    }
}
