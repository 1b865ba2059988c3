// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use javagen::{ClassName, TypeName};

use super::{InjectedMember, MemberDescriptor};
use crate::model::names;
use crate::model::{Annotation, Executable, TypeRegistry};

/// Detects the `@Autowired` fields and methods of a class.
///
/// Members are listed superclass first, and within a class fields before methods, in
/// declaration order. Static members, methods overridden further down the hierarchy and the
/// instance creator itself are skipped.
#[derive(Debug, Clone, Copy)]
pub struct InjectionPointsSupplier<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> InjectionPointsSupplier<'a> {
    /// Detects injection points among the types of `registry`.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Autowired fields and methods of `class` and its superclasses, superclass members first.
    ///
    /// Static members and `instance_creator` itself are skipped, as are methods overridden by a
    /// subclass.
    pub fn detect_injection_points(&self, class: &ClassName, instance_creator: &Executable) -> Vec<MemberDescriptor> {
        let chain = self.registry.superclass_chain(class);
        let mut injection_points = Vec::new();
        for (depth, descriptor) in chain.iter().enumerate().rev() {
            for field in descriptor.fields() {
                if field.is_static() {
                    continue;
                }
                if let Some(autowired) = autowired(field.annotations()) {
                    injection_points.push(MemberDescriptor::new(
                        InjectedMember::Field(field.clone()),
                        field.type_name().clone(),
                        is_required(autowired),
                        self.registry,
                    ));
                }
            }
            for method in descriptor.methods() {
                if method.is_static() || method == instance_creator {
                    continue;
                }
                let overridden = chain[..depth]
                    .iter()
                    .any(|subclass| subclass.methods().iter().any(|other| other.same_signature(method)));
                if overridden {
                    continue;
                }
                if let Some(autowired) = autowired(method.annotations()) {
                    let injection_type = method
                        .parameters()
                        .first()
                        .map_or_else(|| TypeName::class(ClassName::parse(names::OBJECT)), |parameter| parameter.type_name().clone());
                    injection_points.push(MemberDescriptor::new(
                        InjectedMember::Method(method.clone()),
                        injection_type,
                        is_required(autowired),
                        self.registry,
                    ));
                }
            }
        }
        injection_points
    }
}

fn autowired(annotations: &[Annotation]) -> Option<&Annotation> {
    annotations.iter().find(|annotation| annotation.is(names::AUTOWIRED))
}

fn is_required(autowired: &Annotation) -> bool {
    autowired.attribute("required") != Some("false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, TypeDescriptor};

    fn string() -> TypeName {
        ClassName::parse(names::STRING).into()
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::builder("com.example.Base")
                .field(Field::new("com.example.Base", "counter", string()).annotated(Annotation::autowired()))
                .method(
                    Executable::void_method("com.example.Base", "setName")
                        .param("name", string())
                        .annotated(Annotation::autowired()),
                )
                .method(
                    Executable::void_method("com.example.Base", "setOverridden")
                        .param("value", string())
                        .annotated(Annotation::autowired()),
                )
                .build(),
        );
        registry.register(
            TypeDescriptor::builder("com.example.Sample")
                .superclass(TypeName::class(ClassName::parse("com.example.Base")))
                .field(
                    Field::new("com.example.Sample", "environment", string())
                        .annotated(Annotation::autowired().with("required", "false")),
                )
                .field(
                    Field::new("com.example.Sample", "shared", string())
                        .static_field()
                        .annotated(Annotation::autowired()),
                )
                .field(Field::new("com.example.Sample", "plain", string()))
                .method(Executable::void_method("com.example.Sample", "setOverridden").param("value", string()))
                .build(),
        );
        registry
    }

    fn member_name(descriptor: &MemberDescriptor) -> String {
        match descriptor.member() {
            InjectedMember::Field(field) => field.name().to_string(),
            InjectedMember::Method(method) => method.method_name().unwrap_or_default().to_string(),
            InjectedMember::Parameter { parameter, .. } => parameter.name().to_string(),
        }
    }

    #[test]
    fn superclass_members_come_first() {
        let registry = registry();
        let creator = Executable::constructor("com.example.Sample");
        let points = InjectionPointsSupplier::new(&registry).detect_injection_points(&ClassName::parse("com.example.Sample"), &creator);
        let names: Vec<String> = points.iter().map(member_name).collect();
        assert_eq!(names, ["counter", "setName", "environment"]);
    }

    #[test]
    fn optional_injection_is_not_required() {
        let registry = registry();
        let creator = Executable::constructor("com.example.Sample");
        let points = InjectionPointsSupplier::new(&registry).detect_injection_points(&ClassName::parse("com.example.Sample"), &creator);
        assert!(points[0].is_required());
        assert!(!points[2].is_required());
    }

    #[test]
    fn instance_creator_is_not_an_injection_point() {
        let registry = registry();
        let creator = Executable::void_method("com.example.Base", "setName")
            .param("name", string())
            .annotated(Annotation::autowired());
        let points = InjectionPointsSupplier::new(&registry).detect_injection_points(&ClassName::parse("com.example.Base"), &creator);
        let names: Vec<String> = points.iter().map(member_name).collect();
        assert_eq!(names, ["counter", "setOverridden"]);
    }
}
