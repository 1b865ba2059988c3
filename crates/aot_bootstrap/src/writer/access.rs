// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;

use javagen::{ClassName, TypeName};

use crate::descriptor::{BeanInstanceDescriptor, InjectedMember};
use crate::model::{BeanValue, TypeRegistry, Visibility};
use crate::{Error, Result};

/// Where the registration code of a bean can live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// Every element the registration touches is public; any package will do.
    Public,
    /// Some elements are only visible within `package`, so the code must be written there.
    PackageProtected {
        /// The package hosting the registration code.
        package: String,
    },
}

impl Accessibility {
    /// The package the registration code must be written in, if any.
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Public => None,
            Self::PackageProtected { package } => Some(package),
        }
    }
}

/// Finds the non-public classes and members a registration needs to reference.
///
/// Private fields and methods are reached through reflection and never constrain the package.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedAccessAnalyzer<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> ProtectedAccessAnalyzer<'a> {
    /// Checks access against the types of `registry`.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Computes the accessibility of the registration of `descriptor`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConflictingPackageAccess`] when non-public elements of more than one
    /// package are involved.
    pub fn analyze(&self, bean_name: &str, descriptor: &BeanInstanceDescriptor) -> Result<Accessibility> {
        let mut packages = BTreeSet::new();
        self.check_type(descriptor.bean_type(), &mut packages);
        self.check_class(descriptor.user_class(), &mut packages);

        if let Some(creator) = descriptor.instance_creator() {
            let executable = creator.executable();
            self.check_member(executable.declaring_class(), executable.visibility(), &mut packages);
            if let Some(return_type) = executable.return_type() {
                self.check_type(return_type, &mut packages);
            }
            for parameter_type in executable.parameter_types() {
                self.check_type(parameter_type, &mut packages);
            }
        }

        for injection_point in descriptor.injection_points() {
            match injection_point.member() {
                InjectedMember::Field(field) if !field.visibility().is_private() => {
                    self.check_member(field.declaring_class(), field.visibility(), &mut packages);
                    self.check_type(field.type_name(), &mut packages);
                }
                InjectedMember::Method(method) if !method.visibility().is_private() => {
                    self.check_member(method.declaring_class(), method.visibility(), &mut packages);
                    for parameter_type in method.parameter_types() {
                        self.check_type(parameter_type, &mut packages);
                    }
                }
                _ => {}
            }
        }

        for property in descriptor.properties() {
            for class in value_classes(property.value()) {
                self.check_class(&class, &mut packages);
            }
        }

        let mut packages = packages.into_iter();
        match (packages.next(), packages.next()) {
            (None, _) => Ok(Accessibility::Public),
            (Some(package), None) => Ok(Accessibility::PackageProtected { package }),
            (Some(first), Some(second)) => {
                let mut all = vec![first, second];
                all.extend(packages);
                Err(Error::ConflictingPackageAccess {
                    bean_name: bean_name.to_string(),
                    packages: all,
                })
            }
        }
    }

    fn check_member(&self, declaring_class: &ClassName, visibility: Visibility, packages: &mut BTreeSet<String>) {
        if !visibility.is_public() {
            packages.insert(declaring_class.package_name().to_string());
        }
        self.check_class(declaring_class, packages);
    }

    fn check_type(&self, ty: &TypeName, packages: &mut BTreeSet<String>) {
        for class in ty.referenced_classes() {
            self.check_class(&class, packages);
        }
    }

    fn check_class(&self, class: &ClassName, packages: &mut BTreeSet<String>) {
        if !self.registry.is_accessible_from_anywhere(class) {
            packages.insert(class.package_name().to_string());
        }
    }
}

/// The classes a value literal names: enum types and class literals.
fn value_classes(value: &BeanValue) -> Vec<ClassName> {
    match value {
        BeanValue::Enum { type_name, .. } => vec![type_name.clone()],
        BeanValue::Class(type_name) => type_name.referenced_classes(),
        BeanValue::Array { component, elements } => component
            .referenced_classes()
            .into_iter()
            .chain(elements.iter().flat_map(value_classes))
            .collect(),
        BeanValue::List(elements) | BeanValue::Set(elements) => elements.iter().flat_map(value_classes).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{InstanceCreator, MemberDescriptor};
    use crate::model::{Executable, Field, TypeDescriptor};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDescriptor::builder("com.example.Public").build());
        registry.register(
            TypeDescriptor::builder("com.example.one.Hidden")
                .visibility(Visibility::Package)
                .build(),
        );
        registry.register(
            TypeDescriptor::builder("com.example.two.Hidden")
                .visibility(Visibility::Package)
                .build(),
        );
        registry
    }

    fn class(name: &str) -> TypeName {
        TypeName::class(ClassName::parse(name))
    }

    #[test]
    fn public_registration() {
        let registry = registry();
        let descriptor = BeanInstanceDescriptor::of(class("com.example.Public"))
            .instance_creator(InstanceCreator::new(Executable::constructor("com.example.Public"), &registry))
            .build();
        let accessibility = ProtectedAccessAnalyzer::new(&registry).analyze("bean", &descriptor).unwrap();
        assert_eq!(accessibility, Accessibility::Public);
    }

    #[test]
    fn package_private_parameter_type() {
        let registry = registry();
        let creator = Executable::constructor("com.example.Public").param("hidden", class("com.example.one.Hidden"));
        let descriptor = BeanInstanceDescriptor::of(class("com.example.Public"))
            .instance_creator(InstanceCreator::new(creator, &registry))
            .build();
        let accessibility = ProtectedAccessAnalyzer::new(&registry).analyze("bean", &descriptor).unwrap();
        assert_eq!(accessibility.package(), Some("com.example.one"));
    }

    #[test]
    fn protected_constructor_uses_declaring_package() {
        let registry = registry();
        let creator = Executable::constructor("com.example.Public").with_visibility(Visibility::Protected);
        let descriptor = BeanInstanceDescriptor::of(class("com.example.Public"))
            .instance_creator(InstanceCreator::new(creator, &registry))
            .build();
        let accessibility = ProtectedAccessAnalyzer::new(&registry).analyze("bean", &descriptor).unwrap();
        assert_eq!(accessibility.package(), Some("com.example"));
    }

    #[test]
    fn private_fields_do_not_constrain() {
        let registry = registry();
        let field = Field::new("com.example.Public", "secret", class("com.example.Public"));
        let descriptor = BeanInstanceDescriptor::of(class("com.example.Public"))
            .injection_points([MemberDescriptor::new(
                InjectedMember::Field(field.clone()),
                field.type_name().clone(),
                true,
                &registry,
            )])
            .build();
        let accessibility = ProtectedAccessAnalyzer::new(&registry).analyze("bean", &descriptor).unwrap();
        assert_eq!(accessibility, Accessibility::Public);
    }

    #[test]
    fn conflicting_packages() {
        let registry = registry();
        let creator = Executable::constructor("com.example.Public")
            .param("one", class("com.example.one.Hidden"))
            .param("two", class("com.example.two.Hidden"));
        let descriptor = BeanInstanceDescriptor::of(class("com.example.Public"))
            .instance_creator(InstanceCreator::new(creator, &registry))
            .build();
        let error = ProtectedAccessAnalyzer::new(&registry).analyze("bean", &descriptor).unwrap_err();
        assert!(matches!(
            error,
            Error::ConflictingPackageAccess { bean_name, packages }
                if bean_name == "bean" && packages == ["com.example.one", "com.example.two"]
        ));
    }
}
