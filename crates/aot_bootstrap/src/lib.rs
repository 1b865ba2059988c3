// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Ahead-of-time generation of the code that bootstraps a dependency-injection container.
//!
//! At build time, the fully resolved configuration of a container is described as a
//! [`model::BeanFactory`]: bean definitions, the singletons they refer to, and a
//! [`model::TypeRegistry`] standing in for the class loader. This crate turns it into Java sources
//! that register every bean with explicit constructor and factory method calls, so the container
//! starts without reflection or classpath scanning.
//!
//! The pass runs in three stages:
//!
//! 1. For every bean definition, [`descriptor::BeanInstanceExecutableSupplier`] picks the
//!    constructor or factory method to call, resolving overloads against the configured
//!    arguments.
//! 2. The injection points and properties are collected into a [`descriptor::BeanInstanceDescriptor`].
//! 3. [`writer::DefaultBeanRegistrationWriter`] emits the registration. Registrations that touch
//!    package-private elements are moved into a helper class of that package.
//!
//! [`ContextBootstrapGenerator`] drives the pass and renders the resulting classes.
//!
//! # Example
//!
//! ```
//! use aot_bootstrap::model::{BeanDefinition, BeanFactory, Executable, TypeDescriptor, TypeRegistry};
//! use aot_bootstrap::{ContextBootstrapGenerator, GeneratorOptions};
//! use javagen::ClassName;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDescriptor::builder("com.example.Greeter")
//!         .constructor(Executable::constructor("com.example.Greeter").param("greeting", ClassName::parse("java.lang.String")))
//!         .build(),
//! );
//! let mut bean_factory = BeanFactory::new(registry);
//! bean_factory.register_bean_definition(
//!     "greeter",
//!     BeanDefinition::builder("com.example.Greeter").constructor_arg("Hello").build(),
//! );
//!
//! let generator = ContextBootstrapGenerator::new(GeneratorOptions::default().bootstrap_package("com.example.aot"));
//! let sources = generator.generate(&bean_factory)?;
//! assert!(sources[0].content().contains(r#".instanceSupplier(() -> new Greeter("Hello")).register(context);"#));
//! # Ok::<(), aot_bootstrap::Error>(())
//! ```
//!
//! # Features
//!
//! * `serde` - (de)serialization of [`GeneratorOptions`], so they can be read from the
//!   configuration of the host build.

mod bootstrap;
mod config;
pub mod descriptor;
mod error;
mod event;
pub mod model;
mod native;
pub mod writer;

pub use bootstrap::{BootstrapClass, BootstrapWriterContext, ContextBootstrapGenerator, GeneratedSource};
pub use config::{DEFAULT_BOOTSTRAP_PACKAGE, DEFAULT_CLASS_NAME, GeneratorOptions};
pub use error::{Error, Result};
pub use event::{EventListenerMetadata, EventListenerMethodRegistrationGenerator};
pub use native::{NativeConfigurationRegistry, NativeReflectionEntry, ReflectionConfiguration};
pub use writer::{BeanRegistrationWriter, BeanRegistrationWriterOptions, BeanRegistrationWriterOptionsBuilder};
