// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]
#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

//! Integration tests for the generation of complete bootstrap classes.

use aot_bootstrap::descriptor::BeanInstanceDescriptor;
use aot_bootstrap::model::{BeanDefinition, Role};
use aot_bootstrap::{
    BeanRegistrationWriter, BeanRegistrationWriterOptions, BootstrapWriterContext, ContextBootstrapGenerator, Error,
    GeneratorOptions,
};
use javagen::CodeBlockBuilder;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

mod util;

use util::{bean_factory, initialize_body, sample, string};

#[test]
fn bean_methods_without_parameters() {
    let simple = sample("SimpleConfiguration");
    let factory = bean_factory([
        ("simpleConfiguration", BeanDefinition::builder(simple.as_str()).build()),
        (
            "stringBean",
            BeanDefinition::builder(simple.as_str()).factory_method("stringBean").build(),
        ),
        (
            "integerBean",
            BeanDefinition::builder(simple.as_str()).factory_method("integerBean").build(),
        ),
    ]);

    let sources = ContextBootstrapGenerator::default().generate(&factory).unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(
        initialize_body(sources[0].content()),
        "\
// infrastructure
DefaultListableBeanFactory beanFactory = context.getDefaultListableBeanFactory();
beanFactory.setAutowireCandidateResolver(new ContextAnnotationAutowireCandidateResolver());
BeanDefinitionRegistrar.of(\"simpleConfiguration\", SimpleConfiguration.class)
    .instanceSupplier(() -> new SimpleConfiguration()).register(context);
BeanDefinitionRegistrar.of(\"stringBean\", String.class).withFactoryMethod(SimpleConfiguration.class, \"stringBean\")
    .instanceSupplier(() -> context.getBean(SimpleConfiguration.class).stringBean()).register(context);
BeanDefinitionRegistrar.of(\"integerBean\", Integer.class).withFactoryMethod(SimpleConfiguration.class, \"integerBean\")
    .instanceSupplier(() -> context.getBean(SimpleConfiguration.class).integerBean()).register(context);"
    );
}

#[test]
fn main_class_structure() {
    let sources = ContextBootstrapGenerator::default().generate(&bean_factory([])).unwrap();
    let content = sources[0].content();
    assert!(content.starts_with("package org.springframework.aot;\n"));
    assert!(content.contains("import org.springframework.context.support.GenericApplicationContext;\n"));
    assert!(content.contains(
        "public class ContextBootstrapInitializer implements ApplicationContextInitializer<GenericApplicationContext> {\n"
    ));
    assert!(content.contains("  @Override\n  public void initialize(GenericApplicationContext context) {\n"));
}

#[test]
fn primary_and_infrastructure_beans() {
    let metadata = sample("MetadataConfiguration");
    let factory = bean_factory([
        (
            "primaryBean",
            BeanDefinition::builder(metadata.as_str())
                .factory_method("primaryBean")
                .primary()
                .build(),
        ),
        (
            "infrastructureBean",
            BeanDefinition::builder(metadata.as_str())
                .factory_method("infrastructureBean")
                .role(Role::Infrastructure)
                .build(),
        ),
    ]);

    let sources = ContextBootstrapGenerator::default().generate(&factory).unwrap();
    let body = initialize_body(sources[0].content());
    assert!(body.contains(
        "    .instanceSupplier(() -> context.getBean(MetadataConfiguration.class).primaryBean()).customize((bd) -> bd.setPrimary(true)).register(context);"
    ), "{body}");
    assert!(body.contains(
        "    .instanceSupplier(() -> context.getBean(MetadataConfiguration.class).infrastructureBean()).customize((bd) -> bd.setRole(2)).register(context);"
    ), "{body}");
}

#[test]
fn package_private_configuration_uses_helper_class() {
    let protected = format!("{}.visibility.ProtectedConfiguration", util::SAMPLE);
    let factory = bean_factory([(
        "protectedBean",
        BeanDefinition::builder(protected.as_str())
            .factory_method("protectedBean")
            .build(),
    )]);

    let sources = ContextBootstrapGenerator::default().generate(&factory).unwrap();
    assert_eq!(sources.len(), 2);
    let body = initialize_body(sources[0].content());
    assert!(
        body.ends_with("com.example.sample.visibility.ContextBootstrapInitializer.registerProtectedConfiguration_protectedBean(context);"),
        "{body}"
    );

    let helper = &sources[1];
    assert_eq!(helper.package(), "com.example.sample.visibility");
    assert_eq!(
        helper.content(),
        "\
package com.example.sample.visibility;

import org.springframework.aot.beans.factory.BeanDefinitionRegistrar;
import org.springframework.context.support.GenericApplicationContext;

public final class ContextBootstrapInitializer {
  public static void registerProtectedConfiguration_protectedBean(GenericApplicationContext context) {
    BeanDefinitionRegistrar.of(\"protectedBean\", String.class).withFactoryMethod(ProtectedConfiguration.class, \"protectedBean\")
        .instanceSupplier(() -> context.getBean(ProtectedConfiguration.class).protectedBean()).register(context);
  }
}
"
    );
}

#[test]
fn event_listeners_are_registered_after_beans() {
    let factory = bean_factory([(
        "startupListener",
        BeanDefinition::builder(sample("StartupListener").as_str()).build(),
    )]);

    let context = ContextBootstrapGenerator::default().write_context(&factory).unwrap();
    let source = context.main_class().to_java_file("  ").to_source();
    let body = initialize_body(&source);
    assert!(body.ends_with(
        "context.registerBean(\"org.springframework.aot.EventListenerRegistrar\", EventListenerRegistrar.class, () -> new EventListenerRegistrar(context, ContextBootstrapInitializer.getEventListenersMetadata()));"
    ), "{body}");
    assert!(source.contains(
        "  public static List<EventListenerMetadata> getEventListenersMetadata() {\n    return List.of(\n      \
         EventListenerMetadata.forBean(\"startupListener\", StartupListener.class).annotatedMethod(\"onStartup\", ApplicationEvent.class)\n    );\n  }\n"
    ), "{source}");

    let entries = context.native_configuration().reflection().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].methods(), ["onStartup(org.springframework.context.ApplicationEvent)"]);
}

#[test]
#[traced_test]
fn excluded_types_are_skipped() {
    let metadata = sample("MetadataConfiguration");
    let factory = bean_factory([
        ("metadataConfiguration", BeanDefinition::builder(metadata.as_str()).build()),
        (
            "simpleConfiguration",
            BeanDefinition::builder(sample("SimpleConfiguration").as_str()).build(),
        ),
    ]);

    let generator = ContextBootstrapGenerator::new(GeneratorOptions::default().exclude_type(metadata.as_str()));
    let sources = generator.generate(&factory).unwrap();
    let body = initialize_body(sources[0].content());
    assert!(!body.contains("metadataConfiguration"), "{body}");
    assert!(body.contains("\"simpleConfiguration\""), "{body}");
    assert!(logs_contain("excluded type"));
    assert!(logs_contain("metadataConfiguration"));
}

#[test]
#[traced_test]
fn abstract_types_are_skipped() {
    let mut factory = bean_factory([]);
    factory.registry_mut().register(
        aot_bootstrap::model::TypeDescriptor::builder("com.example.sample.Base")
            .abstract_type()
            .build(),
    );
    factory.register_bean_definition("base", BeanDefinition::builder("com.example.sample.Base").build());

    let sources = ContextBootstrapGenerator::default().generate(&factory).unwrap();
    assert!(!sources[0].content().contains("\"base\""));
    assert!(logs_contain("no instance creator"));
}

#[derive(Debug)]
struct CommentWriter {
    descriptor: BeanInstanceDescriptor,
}

impl BeanRegistrationWriter for CommentWriter {
    fn write_bean_registration(&self, _context: &mut BootstrapWriterContext, code: &mut CodeBlockBuilder) -> aot_bootstrap::Result<()> {
        code.add("// registered elsewhere\n", &[]);
        Ok(())
    }

    fn bean_instance_descriptor(&self) -> &BeanInstanceDescriptor {
        &self.descriptor
    }
}

#[test]
fn custom_writers_replace_the_default() {
    let simple = sample("SimpleConfiguration");
    let factory = bean_factory([
        ("simpleConfiguration", BeanDefinition::builder(simple.as_str()).build()),
        (
            "stringBean",
            BeanDefinition::builder(simple.as_str()).factory_method("stringBean").build(),
        ),
    ]);
    let writer_options = BeanRegistrationWriterOptions::builder()
        .with_writer_factory(|bean_name, _definition| {
            (bean_name == "stringBean").then(|| {
                Box::new(CommentWriter {
                    descriptor: BeanInstanceDescriptor::of(string()).build(),
                }) as Box<dyn BeanRegistrationWriter>
            })
        })
        .build();

    let sources = ContextBootstrapGenerator::default()
        .with_writer_options(writer_options)
        .generate(&factory)
        .unwrap();
    let body = initialize_body(sources[0].content());
    assert!(body.ends_with("    .instanceSupplier(() -> new SimpleConfiguration()).register(context);\n// registered elsewhere"), "{body}");
}

#[test]
fn custom_writers_describe_the_registered_class() {
    let simple = sample("SimpleConfiguration");
    let factory = bean_factory([("simpleConfiguration", BeanDefinition::builder(simple.as_str()).build())]);
    let descriptor_type = util::class(simple.as_str());
    let writer_options = BeanRegistrationWriterOptions::builder()
        .with_writer_factory(move |_bean_name, _definition| {
            Some(Box::new(CommentWriter {
                descriptor: BeanInstanceDescriptor::of(descriptor_type.clone()).build(),
            }) as Box<dyn BeanRegistrationWriter>)
        })
        .build();

    let context = ContextBootstrapGenerator::default()
        .with_writer_options(writer_options)
        .write_context(&factory)
        .unwrap();
    let entries = context.native_configuration().reflection().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].type_name().canonical_name(), simple);
}

#[test]
fn ambiguous_constructors_stop_the_pass() {
    let factory = bean_factory([(
        "holder",
        BeanDefinition::builder(sample("ArgumentHolder").as_str())
            .constructor_arg(aot_bootstrap::model::BeanValue::Null)
            .build(),
    )]);
    let error = ContextBootstrapGenerator::default().generate(&factory).unwrap_err();
    assert!(matches!(error, Error::AmbiguousExecutable { .. }), "{error}");
}

#[test]
fn sources_are_written_below_package_directories() {
    let directory = std::env::temp_dir().join(format!("aot_bootstrap_write_{}", std::process::id()));
    let sources = ContextBootstrapGenerator::new(GeneratorOptions::default().bootstrap_package("com.example.aot"))
        .generate(&bean_factory([]))
        .unwrap();

    let path = sources[0].write_to(&directory).unwrap();
    assert_eq!(path, directory.join("com/example/aot/ContextBootstrapInitializer.java"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), sources[0].content());
    std::fs::remove_dir_all(&directory).unwrap();
}
