// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{ClassName, CodeBlock, MethodSpec, Modifier, TypeName};

/// A class declaration: header, optional static initializer and methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub(crate) name: String,
    pub(crate) javadoc: Option<String>,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) superinterfaces: Vec<TypeName>,
    pub(crate) static_block: CodeBlock,
    pub(crate) methods: Vec<MethodSpec>,
}

impl TypeSpec {
    /// Starts a class named `name`.
    pub fn class_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder {
            spec: Self {
                name: name.into(),
                javadoc: None,
                modifiers: Vec::new(),
                superinterfaces: Vec::new(),
                static_block: CodeBlock::default(),
                methods: Vec::new(),
            },
        }
    }

    /// The simple name of the class.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods in the order they were added.
    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub(crate) fn referenced_types(&self) -> Vec<ClassName> {
        let mut types: Vec<ClassName> = self.superinterfaces.iter().flat_map(TypeName::referenced_classes).collect();
        types.extend(self.static_block.referenced_types());
        for method in &self.methods {
            types.extend(method.referenced_types());
        }
        types
    }
}

/// Builds a [`TypeSpec`].
#[derive(Debug, Clone)]
pub struct TypeSpecBuilder {
    spec: TypeSpec,
}

impl TypeSpecBuilder {
    /// Sets the Javadoc text, written without the comment delimiters.
    #[must_use]
    pub fn javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.spec.javadoc = Some(javadoc.into());
        self
    }

    /// Adds modifiers, kept in conventional order without duplicates.
    #[must_use]
    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.spec.modifiers.extend(modifiers);
        self.spec.modifiers.sort();
        self.spec.modifiers.dedup();
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn superinterface(mut self, ty: impl Into<TypeName>) -> Self {
        self.spec.superinterfaces.push(ty.into());
        self
    }

    /// Sets the body of the `static { ... }` initializer; an empty block omits it.
    #[must_use]
    pub fn static_block(mut self, block: CodeBlock) -> Self {
        self.spec.static_block = block;
        self
    }

    /// Appends `method`.
    #[must_use]
    pub fn method(mut self, method: MethodSpec) -> Self {
        self.spec.methods.push(method);
        self
    }

    /// Appends `methods`.
    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodSpec>) -> Self {
        self.spec.methods.extend(methods);
        self
    }

    /// Returns the type.
    pub fn build(self) -> TypeSpec {
        self.spec
    }
}
