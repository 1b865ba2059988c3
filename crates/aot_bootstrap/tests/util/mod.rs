// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A small sample application shared by the integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of the fixtures")]

use aot_bootstrap::model::{Annotation, BeanDefinition, BeanFactory, Executable, TypeDescriptor, TypeRegistry, Visibility};
use javagen::TypeName;

pub const SAMPLE: &str = "com.example.sample";

pub fn class(name: &str) -> TypeName {
    TypeName::class(name)
}

pub fn string() -> TypeName {
    class("java.lang.String")
}

pub fn integer() -> TypeName {
    class("java.lang.Integer")
}

/// The canonical name of a sample type.
pub fn sample(simple_name: &str) -> String {
    format!("{SAMPLE}.{simple_name}")
}

pub fn sample_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    let simple = sample("SimpleConfiguration");
    registry.register(
        TypeDescriptor::builder(simple.as_str())
            .annotated(Annotation::configuration())
            .method(Executable::method(simple.as_str(), "stringBean", string()))
            .method(Executable::method(simple.as_str(), "integerBean", integer()))
            .build(),
    );

    let metadata = sample("MetadataConfiguration");
    registry.register(
        TypeDescriptor::builder(metadata.as_str())
            .method(Executable::method(metadata.as_str(), "primaryBean", string()))
            .method(Executable::method(metadata.as_str(), "infrastructureBean", string()))
            .build(),
    );

    let protected = format!("{SAMPLE}.visibility.ProtectedConfiguration");
    registry.register(
        TypeDescriptor::builder(protected.as_str())
            .visibility(Visibility::Package)
            .method(Executable::method(protected.as_str(), "protectedBean", string()))
            .build(),
    );

    let holder = sample("ArgumentHolder");
    registry.register(
        TypeDescriptor::builder(holder.as_str())
            .constructor(Executable::constructor(holder.as_str()).param("name", string()))
            .constructor(Executable::constructor(holder.as_str()).param("counter", integer()))
            .build(),
    );

    let listener = sample("StartupListener");
    registry.register(
        TypeDescriptor::builder(listener.as_str())
            .method(
                Executable::void_method(listener.as_str(), "onStartup")
                    .param("event", class("org.springframework.context.ApplicationEvent"))
                    .annotated(Annotation::event_listener()),
            )
            .method(Executable::void_method(listener.as_str(), "ignored"))
            .build(),
    );

    let number_holder = sample("NumberHolder");
    registry.register(
        TypeDescriptor::builder(number_holder.as_str())
            .type_parameter("N", [class("java.lang.Number")])
            .build(),
    );
    registry.register(
        TypeDescriptor::builder(sample("NumberHolderFactoryBean").as_str())
            .type_parameter("T", [class("java.lang.Number")])
            .implements(TypeName::parameterized(
                "org.springframework.beans.factory.FactoryBean",
                [TypeName::parameterized(number_holder.as_str(), [TypeName::variable("T")])],
            ))
            .build(),
    );
    registry
}

pub fn bean_factory<'a>(definitions: impl IntoIterator<Item = (&'a str, BeanDefinition)>) -> BeanFactory {
    let mut bean_factory = BeanFactory::new(sample_registry());
    for (name, definition) in definitions {
        bean_factory.register_bean_definition(name, definition);
    }
    bean_factory
}

/// The statements of the `initialize` routine of a rendered main class, without their indentation.
pub fn initialize_body(source: &str) -> String {
    let start = "public void initialize(GenericApplicationContext context) {\n";
    let body = source.split_once(start).map_or("", |(_, rest)| rest);
    let body = body.split_once("\n  }\n").map_or(body, |(body, _)| body);
    body.lines()
        .map(|line| line.strip_prefix("    ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}
