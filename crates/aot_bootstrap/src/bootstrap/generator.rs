// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fs;
use std::path::{Path, PathBuf};

use javagen::{ClassName, CodeBlock, CodeBlockBuilder, MethodSpec, Modifier, TypeName};

use super::{BootstrapClass, BootstrapWriterContext};
use crate::config::GeneratorOptions;
use crate::descriptor::{BeanInstanceDescriptorFactory, DefaultBeanInstanceDescriptorFactory};
use crate::event::EventListenerMethodRegistrationGenerator;
use crate::model::names;
use crate::model::{BeanDefinition, BeanFactory};
use crate::writer::{BeanRegistrationWriter, BeanRegistrationWriterOptions, DefaultBeanRegistrationWriter};
use crate::{Error, Result};

/// A rendered bootstrap class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    package: String,
    class_name: String,
    relative_path: PathBuf,
    content: String,
}

impl GeneratedSource {
    fn render(class: &BootstrapClass, indent: &str) -> Self {
        let file = class.to_java_file(indent);
        Self {
            package: class.package_name().to_string(),
            class_name: class.class_name().simple_name().to_string(),
            relative_path: file.relative_path(),
            content: file.to_source(),
        }
    }

    /// The package of the generated class.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple name of the generated class.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// `com/example/ContextBootstrapInitializer.java` for a class of `com.example`.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// The Java source text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Writes the source below `directory`, creating package directories as needed, and returns
    /// the path of the written file.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] when a directory or the file cannot be written.
    pub fn write_to(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let path = directory.as_ref().join(&self.relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &self.content).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Generates the classes that bootstrap an application context from a [`BeanFactory`].
///
/// The main class implements `ApplicationContextInitializer<GenericApplicationContext>`. Its
/// `initialize` routine registers every bean in definition order, then the event listeners.
/// Registrations that need package access live in helper classes of the same simple name.
///
/// # Examples
///
/// ```
/// use aot_bootstrap::model::{BeanDefinition, BeanFactory, TypeDescriptor, TypeRegistry};
/// use aot_bootstrap::{ContextBootstrapGenerator, GeneratorOptions};
///
/// let mut registry = TypeRegistry::new();
/// registry.register(TypeDescriptor::builder("com.example.Greeter").build());
/// let mut bean_factory = BeanFactory::new(registry);
/// bean_factory.register_bean_definition("greeter", BeanDefinition::builder("com.example.Greeter").build());
///
/// let sources = ContextBootstrapGenerator::new(GeneratorOptions::default()).generate(&bean_factory)?;
/// assert_eq!(sources.len(), 1);
/// assert!(sources[0].content().contains(".instanceSupplier(() -> new Greeter()).register(context);"));
/// # Ok::<(), aot_bootstrap::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextBootstrapGenerator {
    options: GeneratorOptions,
    writer_options: BeanRegistrationWriterOptions,
}

impl ContextBootstrapGenerator {
    /// A generator using `options` and the default registration writers.
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            writer_options: BeanRegistrationWriterOptions::default(),
        }
    }

    /// Replaces the options selecting custom registration writers.
    #[must_use]
    pub fn with_writer_options(mut self, writer_options: BeanRegistrationWriterOptions) -> Self {
        self.writer_options = writer_options;
        self
    }

    /// The options this generator was created with.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Renders the main bootstrap class followed by the helper classes in package order.
    ///
    /// # Errors
    ///
    /// Stops at the first bean whose registration cannot be written.
    pub fn generate(&self, bean_factory: &BeanFactory) -> Result<Vec<GeneratedSource>> {
        let context = self.write_context(bean_factory)?;
        Ok(context
            .bootstrap_classes()
            .map(|class| GeneratedSource::render(class, self.options.indent_unit()))
            .collect())
    }

    /// Writes every bootstrap class without rendering them, which also exposes the native
    /// configuration gathered during the pass.
    ///
    /// # Errors
    ///
    /// Stops at the first bean whose registration cannot be written.
    pub fn write_context(&self, bean_factory: &BeanFactory) -> Result<BootstrapWriterContext> {
        let mut context = BootstrapWriterContext::new(self.options.bootstrap_package_name(), self.options.bootstrap_class_name());
        let main_class = context.main_class_mut();
        main_class.unique_method_name("initialize");
        self.write_static_block(main_class.static_block_mut());

        let mut code = CodeBlock::builder();
        code.add("// infrastructure\n", &[]);
        code.add_statement(
            "$T beanFactory = context.getDefaultListableBeanFactory()",
            &[ClassName::parse(names::DEFAULT_LISTABLE_BEAN_FACTORY).into()],
        );
        code.add_statement(
            "beanFactory.setAutowireCandidateResolver(new $T())",
            &[ClassName::parse(names::CONTEXT_ANNOTATION_AUTOWIRE_CANDIDATE_RESOLVER).into()],
        );

        let mut registered = 0_usize;
        for (bean_name, definition) in bean_factory.bean_definitions() {
            if self.write_bean(bean_factory, bean_name, definition, &mut context, &mut code)? {
                registered += 1;
            }
        }
        EventListenerMethodRegistrationGenerator::new(bean_factory).write_event_listeners_registration(&mut context, &mut code)?;

        let generic_application_context = ClassName::parse(names::GENERIC_APPLICATION_CONTEXT);
        let main_class = context.main_class_mut();
        main_class.set_superinterface(TypeName::parameterized(
            ClassName::parse(names::APPLICATION_CONTEXT_INITIALIZER),
            [TypeName::class(generic_application_context.clone())],
        ));
        main_class.add_method_first(
            MethodSpec::builder("initialize")
                .annotation(ClassName::parse(names::OVERRIDE))
                .modifiers([Modifier::Public])
                .parameter(generic_application_context, "context")
                .code(&code.build())
                .build(),
        );

        tracing::event!(
            name: "aot_bootstrap.generation.completed",
            tracing::Level::INFO,
            beans = registered,
            helper_classes = context.helper_classes().count(),
            reflection_entries = context.native_configuration().reflection().entries().len(),
        );
        Ok(context)
    }

    /// Writes the registration of one bean; `false` when the bean is skipped.
    fn write_bean(
        &self,
        bean_factory: &BeanFactory,
        bean_name: &str,
        definition: &BeanDefinition,
        context: &mut BootstrapWriterContext,
        code: &mut CodeBlockBuilder,
    ) -> Result<bool> {
        if definition.is_abstract() {
            skipped(bean_name, "abstract definition");
            return Ok(false);
        }
        let bean_type = bean_factory.definition_type(definition);
        let bean_class = bean_type.as_ref().and_then(TypeName::raw_class);
        if bean_class.is_some_and(|class| self.options.is_excluded(&class.canonical_name())) {
            skipped(bean_name, "excluded type");
            return Ok(false);
        }

        let user_class = if let Some(writer) = self.writer_options.writer_for(bean_name, definition) {
            writer.write_bean_registration(context, code)?;
            writer.bean_instance_descriptor().user_class().clone()
        } else {
            let Some(descriptor) = DefaultBeanInstanceDescriptorFactory::new(bean_factory).create(definition)? else {
                skipped(bean_name, "no instance creator");
                return Ok(false);
            };
            let writer = DefaultBeanRegistrationWriter::new(bean_factory, bean_name, definition.clone(), descriptor);
            writer.write_bean_registration(context, code)?;
            writer.bean_instance_descriptor().user_class().clone()
        };

        let configuration = ClassName::parse(names::CONFIGURATION);
        if bean_factory
            .registry()
            .get(&user_class)
            .is_some_and(|descriptor| descriptor.has_annotation(&configuration))
        {
            context.native_configuration_mut().reflection_mut().add_type(&user_class);
        }
        Ok(true)
    }

    fn write_static_block(&self, code: &mut CodeBlockBuilder) {
        let system = ClassName::parse(names::SYSTEM);
        let toggles = [
            (self.options.is_yaml_support_removed(), "spring.native.remove-yaml-support"),
            (self.options.is_xml_support_removed(), "spring.xml.ignore"),
            (self.options.is_spel_support_removed(), "spring.spel.ignore"),
        ];
        for (_, property) in toggles.iter().filter(|(enabled, _)| *enabled) {
            set_property(code, &system, property, "true");
        }
        if self.options.is_native_code_path_forced() {
            code.begin_control_flow("if (!$T.inNativeImage())", &[ClassName::parse(names::NATIVE_DETECTOR).into()]);
            set_property(code, &system, "org.graalvm.nativeimage.imagecode", "runtime");
            code.end_control_flow();
        }
        if self.options.is_hibernate_detected() {
            code.begin_control_flow(
                "if ($T.isPresent($S, null))",
                &[ClassName::parse(names::CLASS_UTILS).into(), "org.hibernate.Session".into()],
            );
            set_property(code, &system, "hibernate.bytecode.provider", "none");
            code.end_control_flow();
        }
    }
}

fn set_property(code: &mut CodeBlockBuilder, system: &ClassName, key: &str, value: &str) {
    code.add_statement("$T.setProperty($S, $S)", &[system.into(), key.into(), value.into()]);
}

fn skipped(bean_name: &str, reason: &'static str) {
    tracing::event!(
        name: "aot_bootstrap.bean.skipped",
        tracing::Level::DEBUG,
        bean.name = bean_name,
        reason,
    );
}
