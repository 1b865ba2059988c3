// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashSet;

use javagen::{ClassName, CodeBlock, CodeBlockBuilder, JavaFile, MethodSpec, Modifier, TypeName, TypeSpec};

/// One generated compilation unit: the main bootstrap class, or the helper class of a package.
///
/// Routines keep the order in which they were added. Their names are unique within the class.
#[derive(Debug, Clone)]
pub struct BootstrapClass {
    class_name: ClassName,
    superinterface: Option<TypeName>,
    static_block: CodeBlockBuilder,
    methods: Vec<MethodSpec>,
    method_names: HashSet<String>,
}

impl BootstrapClass {
    /// Creates an empty class named `class_name`.
    pub fn new(class_name: ClassName) -> Self {
        Self {
            class_name,
            superinterface: None,
            static_block: CodeBlock::builder(),
            methods: Vec::new(),
            method_names: HashSet::new(),
        }
    }

    /// The fully qualified name of the class.
    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }

    /// The package the class is declared in.
    pub fn package_name(&self) -> &str {
        self.class_name.package_name()
    }

    /// Declares `superinterface` as implemented by the class.
    pub fn set_superinterface(&mut self, superinterface: impl Into<TypeName>) {
        self.superinterface = Some(superinterface.into());
    }

    /// The statements of the `static { }` initializer; nothing is rendered while it is empty.
    pub fn static_block_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut self.static_block
    }

    /// Reserves a routine name derived from `name`, appending a counter on clashes:
    /// `registerSample`, then `registerSample1`, `registerSample2`.
    pub fn unique_method_name(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut counter = 0;
        while self.method_names.contains(&candidate) {
            counter += 1;
            candidate = format!("{name}{counter}");
        }
        self.method_names.insert(candidate.clone());
        candidate
    }

    /// Appends `method` to the class.
    pub fn add_method(&mut self, method: MethodSpec) {
        self.method_names.insert(method.name().to_string());
        self.methods.push(method);
    }

    /// Adds `method` ahead of every routine added so far.
    pub fn add_method_first(&mut self, method: MethodSpec) {
        self.method_names.insert(method.name().to_string());
        self.methods.insert(0, method);
    }

    /// Methods in the order they were added.
    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    /// Whether a method named `name` was added.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|method| method.name() == name)
    }

    /// Renders this class. Classes without a superinterface only hold static routines and are
    /// declared `final`.
    pub fn to_java_file(&self, indent: &str) -> JavaFile {
        let mut builder = TypeSpec::class_builder(self.class_name.simple_name()).modifiers([Modifier::Public]);
        builder = match &self.superinterface {
            Some(superinterface) => builder.superinterface(superinterface.clone()),
            None => builder.modifiers([Modifier::Final]),
        };
        let type_spec = builder
            .static_block(self.static_block.build())
            .methods(self.methods.iter().cloned())
            .build();
        JavaFile::builder(self.package_name(), type_spec).indent(indent).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_get_a_counter() {
        let mut class = BootstrapClass::new(ClassName::new("com.example", "ContextBootstrapInitializer"));
        assert_eq!(class.unique_method_name("registerSample"), "registerSample");
        assert_eq!(class.unique_method_name("registerSample"), "registerSample1");
        assert_eq!(class.unique_method_name("registerSample"), "registerSample2");
        assert_eq!(class.unique_method_name("registerOther"), "registerOther");
    }

    #[test]
    fn added_methods_reserve_their_name() {
        let mut class = BootstrapClass::new(ClassName::new("com.example", "ContextBootstrapInitializer"));
        class.add_method(MethodSpec::builder("initialize").build());
        assert!(class.has_method("initialize"));
        assert_eq!(class.unique_method_name("initialize"), "initialize1");
    }

    #[test]
    fn helper_classes_are_final() {
        let mut class = BootstrapClass::new(ClassName::new("com.example", "ContextBootstrapInitializer"));
        class.add_method(
            MethodSpec::builder("registerSample")
                .modifiers([Modifier::Public, Modifier::Static])
                .build(),
        );
        let source = class.to_java_file("  ").to_source();
        assert!(source.contains("public final class ContextBootstrapInitializer {"));
        assert!(source.contains("public static void registerSample() {"));
        assert!(!source.contains("static {"));
    }
}
