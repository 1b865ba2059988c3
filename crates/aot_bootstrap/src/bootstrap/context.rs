// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use javagen::ClassName;

use super::BootstrapClass;
use crate::native::NativeConfigurationRegistry;

/// The output state of a generation pass: the main bootstrap class, one helper class per package
/// that needed one, and the native-image metadata gathered along the way.
#[derive(Debug)]
pub struct BootstrapWriterContext {
    main: BootstrapClass,
    helpers: BTreeMap<String, BootstrapClass>,
    native_configuration: NativeConfigurationRegistry,
}

impl BootstrapWriterContext {
    /// A context whose main class is `package.class_name`.
    pub fn new(package: &str, class_name: &str) -> Self {
        Self {
            main: BootstrapClass::new(ClassName::new(package, class_name)),
            helpers: BTreeMap::new(),
            native_configuration: NativeConfigurationRegistry::default(),
        }
    }

    /// The package of the main class.
    pub fn main_package(&self) -> &str {
        self.main.package_name()
    }

    /// The class holding the `initialize` method.
    pub fn main_class(&self) -> &BootstrapClass {
        &self.main
    }

    /// Mutable access to the main class.
    pub fn main_class_mut(&mut self) -> &mut BootstrapClass {
        &mut self.main
    }

    /// The class hosting code for `package`, created on first use.
    ///
    /// Helper classes share the simple name of the main class. The main package maps to the main
    /// class itself.
    pub fn bootstrap_class(&mut self, package: &str) -> &mut BootstrapClass {
        if package == self.main.package_name() {
            return &mut self.main;
        }
        let simple_name = self.main.class_name().simple_name();
        self.helpers.entry(package.to_string()).or_insert_with(|| {
            tracing::event!(
                name: "aot_bootstrap.bootstrap_class.created",
                tracing::Level::DEBUG,
                package = package,
            );
            BootstrapClass::new(ClassName::new(package, simple_name))
        })
    }

    /// Helper classes in package order.
    pub fn helper_classes(&self) -> impl Iterator<Item = &BootstrapClass> {
        self.helpers.values()
    }

    /// The main class followed by the helper classes.
    pub fn bootstrap_classes(&self) -> impl Iterator<Item = &BootstrapClass> {
        std::iter::once(&self.main).chain(self.helpers.values())
    }

    /// Reflection entries collected while writing.
    pub fn native_configuration(&self) -> &NativeConfigurationRegistry {
        &self.native_configuration
    }

    /// Mutable access to the reflection entries.
    pub fn native_configuration_mut(&mut self) -> &mut NativeConfigurationRegistry {
        &mut self.native_configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_classes_are_created_once_per_package() {
        let mut context = BootstrapWriterContext::new("org.springframework.aot", "ContextBootstrapInitializer");
        context.bootstrap_class("com.example.b").unique_method_name("registerB");
        context.bootstrap_class("com.example.a").unique_method_name("registerA");
        assert_eq!(context.bootstrap_class("com.example.b").unique_method_name("registerB"), "registerB1");

        let packages: Vec<&str> = context.helper_classes().map(BootstrapClass::package_name).collect();
        assert_eq!(packages, ["com.example.a", "com.example.b"]);
        assert_eq!(
            context.helper_classes().next().map(|class| class.class_name().canonical_name()),
            Some("com.example.a.ContextBootstrapInitializer".to_string())
        );
    }

    #[test]
    fn main_package_maps_to_main_class() {
        let mut context = BootstrapWriterContext::new("com.example", "ContextBootstrapInitializer");
        context.bootstrap_class("com.example").unique_method_name("registerSample");
        assert_eq!(context.helper_classes().count(), 0);
        assert_eq!(context.main_class_mut().unique_method_name("registerSample"), "registerSample1");
        assert_eq!(context.bootstrap_classes().count(), 1);
    }
}
