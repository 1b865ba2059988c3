// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;

/// The package the main bootstrap class is generated in by default.
pub const DEFAULT_BOOTSTRAP_PACKAGE: &str = "org.springframework.aot";

/// The simple name of every generated bootstrap class by default.
pub const DEFAULT_CLASS_NAME: &str = "ContextBootstrapInitializer";

/// Options of a [`ContextBootstrapGenerator`](crate::ContextBootstrapGenerator) pass.
///
/// With the `serde` feature the options can be read from the configuration of the host build,
/// using kebab-case keys. Missing keys keep their default.
///
/// # Examples
///
/// ```
/// use aot_bootstrap::GeneratorOptions;
///
/// let options = GeneratorOptions::default()
///     .bootstrap_package("com.example.aot")
///     .remove_yaml_support(true)
///     .exclude_type("com.example.Unwanted");
///
/// assert_eq!(options.bootstrap_package_name(), "com.example.aot");
/// assert!(options.is_excluded("com.example.Unwanted"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct GeneratorOptions {
    bootstrap_package: String,
    class_name: String,
    remove_yaml_support: bool,
    remove_xml_support: bool,
    remove_spel_support: bool,
    force_native_code_path: bool,
    detect_hibernate: bool,
    exclude_types: BTreeSet<String>,
    indent: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            bootstrap_package: DEFAULT_BOOTSTRAP_PACKAGE.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            remove_yaml_support: false,
            remove_xml_support: false,
            remove_spel_support: false,
            force_native_code_path: true,
            detect_hibernate: true,
            exclude_types: BTreeSet::new(),
            indent: "  ".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// The package of the main bootstrap class.
    #[must_use]
    pub fn bootstrap_package(mut self, package: impl Into<String>) -> Self {
        self.bootstrap_package = package.into();
        self
    }

    /// The simple name shared by the main and the helper bootstrap classes.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Disables YAML configuration support at runtime.
    #[must_use]
    pub fn remove_yaml_support(mut self, remove: bool) -> Self {
        self.remove_yaml_support = remove;
        self
    }

    /// Disables XML bean definition support at runtime.
    #[must_use]
    pub fn remove_xml_support(mut self, remove: bool) -> Self {
        self.remove_xml_support = remove;
        self
    }

    /// Disables the expression language at runtime.
    #[must_use]
    pub fn remove_spel_support(mut self, remove: bool) -> Self {
        self.remove_spel_support = remove;
        self
    }

    /// Makes the generated bootstrap fail fast when it is not running as a native image.
    #[must_use]
    pub fn force_native_code_path(mut self, force: bool) -> Self {
        self.force_native_code_path = force;
        self
    }

    /// Disables the Hibernate bytecode provider when Hibernate is on the classpath.
    #[must_use]
    pub fn detect_hibernate(mut self, detect: bool) -> Self {
        self.detect_hibernate = detect;
        self
    }

    /// Never registers beans whose type has this canonical name.
    #[must_use]
    pub fn exclude_type(mut self, canonical_name: impl Into<String>) -> Self {
        self.exclude_types.insert(canonical_name.into());
        self
    }

    /// Never registers beans whose type has one of these canonical names.
    #[must_use]
    pub fn exclude_types(mut self, canonical_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_types.extend(canonical_names.into_iter().map(Into::into));
        self
    }

    /// The indentation unit of generated sources.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// The package of the main bootstrap class.
    pub fn bootstrap_package_name(&self) -> &str {
        &self.bootstrap_package
    }

    /// The simple name of the bootstrap classes.
    pub fn bootstrap_class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether YAML support is disabled through a system property.
    pub fn is_yaml_support_removed(&self) -> bool {
        self.remove_yaml_support
    }

    /// Whether XML support is disabled through a system property.
    pub fn is_xml_support_removed(&self) -> bool {
        self.remove_xml_support
    }

    /// Whether SpEL support is disabled through a system property.
    pub fn is_spel_support_removed(&self) -> bool {
        self.remove_spel_support
    }

    /// Whether the native code path is forced on.
    pub fn is_native_code_path_forced(&self) -> bool {
        self.force_native_code_path
    }

    /// Whether the Hibernate bytecode provider is disabled.
    pub fn is_hibernate_detected(&self) -> bool {
        self.detect_hibernate
    }

    /// Whether beans of the type named `canonical_name` are skipped.
    pub fn is_excluded(&self, canonical_name: &str) -> bool {
        self.exclude_types.contains(canonical_name)
    }

    /// The indentation unit of generated sources.
    pub fn indent_unit(&self) -> &str {
        &self.indent
    }
}
