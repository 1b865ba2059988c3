// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::{ClassName, CodeBlock, TypeName};

/// Java declaration modifiers, in the order they are conventionally written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `abstract`
    Abstract,
    /// `static`
    Static,
    /// `final`
    Final,
}

impl Modifier {
    /// The Java keyword of the modifier.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for Modifier {
    #[cfg_attr(test, mutants::skip)] // Delegates to keyword().
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub(crate) name: String,
    pub(crate) javadoc: Option<String>,
    pub(crate) annotations: Vec<ClassName>,
    pub(crate) modifiers: Vec<Modifier>,
    pub(crate) return_type: Option<TypeName>,
    pub(crate) parameters: Vec<(TypeName, String)>,
    pub(crate) body: CodeBlock,
}

impl MethodSpec {
    /// Starts a method named `name`.
    pub fn builder(name: impl Into<String>) -> MethodSpecBuilder {
        MethodSpecBuilder {
            spec: Self {
                name: name.into(),
                javadoc: None,
                annotations: Vec::new(),
                modifiers: Vec::new(),
                return_type: None,
                parameters: Vec::new(),
                body: CodeBlock::default(),
            },
        }
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method body.
    pub fn body(&self) -> &CodeBlock {
        &self.body
    }

    /// Types referenced by the signature and the body.
    pub(crate) fn referenced_types(&self) -> Vec<ClassName> {
        let mut types = self.annotations.clone();
        if let Some(return_type) = &self.return_type {
            types.extend(return_type.referenced_classes());
        }
        for (ty, _) in &self.parameters {
            types.extend(ty.referenced_classes());
        }
        types.extend(self.body.referenced_types());
        types
    }
}

/// Builds a [`MethodSpec`].
#[derive(Debug, Clone)]
pub struct MethodSpecBuilder {
    spec: MethodSpec,
}

impl MethodSpecBuilder {
    /// Sets the Javadoc text, written without the comment delimiters.
    #[must_use]
    pub fn javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.spec.javadoc = Some(javadoc.into());
        self
    }

    /// Adds a marker annotation such as `@Override`.
    #[must_use]
    pub fn annotation(mut self, annotation: impl Into<ClassName>) -> Self {
        self.spec.annotations.push(annotation.into());
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

    /// Sets the return type; methods without one return `void`.
    #[must_use]
    pub fn returns(mut self, return_type: impl Into<TypeName>) -> Self {
        self.spec.return_type = Some(return_type.into());
        self
    }

    /// Appends a parameter of type `ty` named `name`.
    #[must_use]
    pub fn parameter(mut self, ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        self.spec.parameters.push((ty.into(), name.into()));
        self
    }

    /// Appends `body` to the method body.
    #[must_use]
    pub fn code(mut self, body: &CodeBlock) -> Self {
        let mut builder = CodeBlock::builder();
        builder.add_code(&self.spec.body).add_code(body);
        self.spec.body = builder.build();
        self
    }

    /// Returns the method.
    pub fn build(self) -> MethodSpec {
        self.spec
    }
}
