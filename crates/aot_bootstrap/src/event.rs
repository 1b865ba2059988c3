// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Metadata for methods annotated with `@EventListener`, so that listeners can be registered
//! without scanning bean classes at runtime.

use std::collections::BTreeSet;

use javagen::{ClassName, CodeBlock, CodeBlockBuilder, MethodSpec, Modifier, TypeName};

use crate::bootstrap::BootstrapWriterContext;
use crate::model::names;
use crate::model::{Annotation, BeanFactory, Executable, TypeRegistry};
use crate::writer::ParameterWriter;
use crate::{Error, Result};

const METADATA_ROUTINE: &str = "getEventListenersMetadata";

/// An event listener method of a bean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListenerMetadata {
    bean_name: String,
    bean_type: ClassName,
    method: Executable,
}

impl EventListenerMetadata {
    /// The name of the bean declaring the listener.
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }

    /// The user class declaring the listener method.
    pub fn bean_type(&self) -> &ClassName {
        &self.bean_type
    }

    /// The annotated listener method.
    pub fn method(&self) -> &Executable {
        &self.method
    }
}

/// Writes the registration of every event listener method found on the beans of a factory.
#[derive(Debug, Clone, Copy)]
pub struct EventListenerMethodRegistrationGenerator<'a> {
    bean_factory: &'a BeanFactory,
}

impl<'a> EventListenerMethodRegistrationGenerator<'a> {
    /// Looks up listener methods on the beans of `bean_factory`.
    pub fn new(bean_factory: &'a BeanFactory) -> Self {
        Self { bean_factory }
    }

    /// Listener methods in bean definition order, then in the hierarchy order of each bean type.
    ///
    /// A method is a listener when it carries `@EventListener`, or an annotation that is itself
    /// annotated with `@EventListener`.
    pub fn detect_event_listeners(&self) -> Vec<EventListenerMetadata> {
        let registry = self.bean_factory.registry();
        let mut listeners = Vec::new();
        for (bean_name, definition) in self.bean_factory.bean_definitions() {
            if definition.is_abstract() {
                continue;
            }
            let Some(bean_type) = self
                .bean_factory
                .definition_type(definition)
                .and_then(|bean_type| bean_type.raw_class().cloned())
            else {
                continue;
            };
            for method in registry.methods_in_hierarchy(&bean_type) {
                if method.annotations().iter().any(|annotation| is_event_listener(registry, annotation)) {
                    listeners.push(EventListenerMetadata {
                        bean_name: bean_name.to_string(),
                        bean_type: bean_type.clone(),
                        method: method.clone(),
                    });
                }
            }
        }
        listeners
    }

    /// Writes the `getEventListenersMetadata` routine and, at the call site, the registration of
    /// the registrar that consumes it. Nothing is written when there are no listeners.
    ///
    /// The routine lives in the main class, unless a listener is not visible from there, in which
    /// case it moves to the bootstrap class of the listener's package.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConflictingPackageAccess`] when non-public listeners live in more than
    /// one package.
    pub fn write_event_listeners_registration(&self, context: &mut BootstrapWriterContext, code: &mut CodeBlockBuilder) -> Result<()> {
        let listeners = self.detect_event_listeners();
        if listeners.is_empty() {
            return Ok(());
        }
        let package = self.target_package(&listeners)?;
        let package = package.unwrap_or_else(|| context.main_package().to_string());

        let entries = listeners.iter().map(write_metadata);
        let mut body = CodeBlock::builder();
        body.add(
            "return $T.of(\n$>$L\n$<)",
            &[ClassName::parse(names::LIST).into(), CodeBlock::join(entries, ",\n").into()],
        );
        body.add(";\n", &[]);

        let metadata = ClassName::parse(names::EVENT_LISTENER_METADATA);
        let bootstrap_class = context.bootstrap_class(&package);
        let routine = bootstrap_class.unique_method_name(METADATA_ROUTINE);
        bootstrap_class.add_method(
            MethodSpec::builder(routine.as_str())
                .modifiers([Modifier::Public, Modifier::Static])
                .returns(TypeName::parameterized(ClassName::parse(names::LIST), [TypeName::class(metadata)]))
                .code(&body.build())
                .build(),
        );
        let bootstrap_class_name = bootstrap_class.class_name().clone();

        let registrar = ClassName::parse(names::EVENT_LISTENER_REGISTRAR);
        code.add_statement(
            "context.registerBean($S, $T.class, () -> new $T(context, $T.$N()))",
            &[
                names::EVENT_LISTENER_REGISTRAR_BEAN_NAME.into(),
                (&registrar).into(),
                registrar.into(),
                bootstrap_class_name.into(),
                routine.into(),
            ],
        );

        let reflection = context.native_configuration_mut().reflection_mut();
        for listener in &listeners {
            reflection.add_executable(listener.method());
        }

        tracing::event!(
            name: "aot_bootstrap.event_listeners.written",
            tracing::Level::DEBUG,
            listeners = listeners.len(),
            package = %package,
        );
        Ok(())
    }

    fn target_package(&self, listeners: &[EventListenerMetadata]) -> Result<Option<String>> {
        let registry = self.bean_factory.registry();
        let packages: BTreeSet<String> = listeners
            .iter()
            .filter(|listener| !registry.is_accessible_from_anywhere(&listener.bean_type) || !listener.method.visibility().is_public())
            .map(|listener| listener.bean_type.package_name().to_string())
            .collect();
        if packages.len() > 1 {
            return Err(Error::ConflictingPackageAccess {
                bean_name: names::EVENT_LISTENER_REGISTRAR_BEAN_NAME.to_string(),
                packages: packages.into_iter().collect(),
            });
        }
        Ok(packages.into_iter().next())
    }
}

fn is_event_listener(registry: &TypeRegistry, annotation: &Annotation) -> bool {
    annotation.is(names::EVENT_LISTENER)
        || registry
            .get(annotation.type_name())
            .is_some_and(|annotation_type| annotation_type.find_annotation(names::EVENT_LISTENER).is_some())
}

/// `EventListenerMetadata.forBean("name", Type.class).annotatedMethod("method", Event.class)`
fn write_metadata(listener: &EventListenerMetadata) -> CodeBlock {
    let method = listener.method();
    let parameter_types = ParameterWriter::new().write_executable_parameter_types(method);
    let mut code = CodeBlock::builder();
    code.add(
        "$T.forBean($S, $T.class)",
        &[
            ClassName::parse(names::EVENT_LISTENER_METADATA).into(),
            listener.bean_name().into(),
            listener.bean_type().into(),
        ],
    );
    let name = method.method_name().unwrap_or_default();
    if parameter_types.is_empty() {
        code.add(".annotatedMethod($S)", &[name.into()]);
    } else {
        code.add(".annotatedMethod($S, $L)", &[name.into(), parameter_types.into()]);
    }
    code.build()
}
