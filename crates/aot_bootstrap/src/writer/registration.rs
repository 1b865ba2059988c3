// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::RefCell;

use javagen::{ClassName, CodeBlock, CodeBlockBuilder, MethodSpec, Modifier, PrimitiveType, TypeName};

use super::access::ProtectedAccessAnalyzer;
use super::parameter::{InnerBeanWriter, ParameterWriter};
use crate::bootstrap::BootstrapWriterContext;
use crate::descriptor::{
    BeanInstanceDescriptor, BeanInstanceDescriptorFactory, DefaultBeanInstanceDescriptorFactory, DependencyKind, InjectedMember,
    InstanceCreator, MemberDescriptor,
};
use crate::model::names;
use crate::model::{BeanDefinition, BeanFactory, BeanValue, Executable, ExecutableKind, Field, Role};
use crate::native::ReflectionConfiguration;
use crate::{Error, Result};

/// Writes the code registering one bean.
pub trait BeanRegistrationWriter {
    /// Appends the registration to `code`, the body of the main `initialize` routine.
    ///
    /// Implementations may add routines to other classes of `context` and record reflection
    /// needs in its native configuration.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written or the registration cannot be hosted by a single
    /// package.
    fn write_bean_registration(&self, context: &mut BootstrapWriterContext, code: &mut CodeBlockBuilder) -> Result<()>;

    /// The descriptor the registration is written from.
    fn bean_instance_descriptor(&self) -> &BeanInstanceDescriptor;
}

/// Writes a `BeanDefinitionRegistrar` statement from a [`BeanInstanceDescriptor`].
///
/// ```text
/// BeanDefinitionRegistrar.of("sample", Sample.class).withConstructor(Dependency.class)
///     .instanceSupplier((instanceContext) -> instanceContext.create(context, (attributes) -> new Sample(attributes.get(0)))).register(context);
/// ```
///
/// When the registration touches non-public elements of a package other than the main one, the
/// statement is moved to a `registerX` routine of that package's bootstrap class and the call site
/// only invokes the routine.
#[derive(Debug)]
pub struct DefaultBeanRegistrationWriter<'a> {
    bean_factory: &'a BeanFactory,
    bean_name: String,
    definition: BeanDefinition,
    descriptor: BeanInstanceDescriptor,
    inner_depth: usize,
    reflection: RefCell<ReflectionConfiguration>,
}

impl<'a> DefaultBeanRegistrationWriter<'a> {
    /// Creates a writer for the bean `bean_name` described by `bean_instance_descriptor`.
    pub fn new(
        bean_factory: &'a BeanFactory,
        bean_name: impl Into<String>,
        definition: BeanDefinition,
        descriptor: BeanInstanceDescriptor,
    ) -> Self {
        Self {
            bean_factory,
            bean_name: bean_name.into(),
            definition,
            descriptor,
            inner_depth: 0,
            reflection: RefCell::default(),
        }
    }

    /// The name the bean is registered under.
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }

    /// The name of the helper routine when the registration cannot be written inline.
    fn routine_name(&self) -> String {
        let suffix = match self.descriptor.instance_creator().map(InstanceCreator::executable) {
            Some(executable) => match executable.method_name() {
                Some(method) => format!("{}_{method}", executable.declaring_class().simple_name()),
                None => executable.declaring_class().simple_names().join("_"),
            },
            None => self.descriptor.user_class().simple_names().join("_"),
        };
        format!("register{suffix}")
    }

    fn write_in_package(&self, package: &str, context: &mut BootstrapWriterContext, code: &mut CodeBlockBuilder) -> Result<()> {
        let routine = context.bootstrap_class(package).unique_method_name(&self.routine_name());
        let mut body = CodeBlock::builder();
        self.write_chain(false, &mut body)?;

        let method = MethodSpec::builder(routine.as_str())
            .modifiers([Modifier::Public, Modifier::Static])
            .parameter(ClassName::parse(names::GENERIC_APPLICATION_CONTEXT), "context")
            .code(&body.build())
            .build();
        let bootstrap_class = context.bootstrap_class(package);
        bootstrap_class.add_method(method);
        code.add_statement("$T.$N(context)", &[bootstrap_class.class_name().into(), routine.into()]);
        Ok(())
    }

    /// Writes the registrar chain: `of(...)` and `.register(context);` for a top-level bean,
    /// `inner(...)` and `.toBeanDefinition()` for an inner one.
    fn write_chain(&self, inner: bool, code: &mut CodeBlockBuilder) -> Result<()> {
        let Some(creator) = self.descriptor.instance_creator() else {
            return Err(Error::MissingInstanceCreator {
                bean_name: self.bean_name.clone(),
            });
        };
        let registrar = ClassName::parse(names::BEAN_DEFINITION_REGISTRAR);
        let bean_type = write_bean_type(self.descriptor.bean_type());
        if inner {
            code.add("$T.inner($L)", &[registrar.into(), bean_type.into()]);
        } else {
            code.add("$T.of($S, $L)", &[registrar.into(), self.bean_name.as_str().into(), bean_type.into()]);
        }
        write_executable_selection(creator.executable(), code);
        if !inner {
            code.add("\n$>$>", &[]);
        }

        code.add(".instanceSupplier(", &[]);
        self.write_instance_supplier(creator, code)?;
        code.add(")", &[]);
        self.write_customizers(code)?;

        if inner {
            code.add(".toBeanDefinition()", &[]);
        } else {
            code.add(".register(context);\n$<$<", &[]);
        }
        Ok(())
    }

    fn write_instance_supplier(&self, creator: &InstanceCreator, code: &mut CodeBlockBuilder) -> Result<()> {
        let executable = creator.executable();
        let direct_arguments = self.direct_arguments(creator)?;
        let injection_points = self.descriptor.injection_points();

        if injection_points.is_empty() {
            match direct_arguments {
                Some(arguments) => code.add("() -> $L", &[invocation(executable, arguments).into()]),
                None => code.add("(instanceContext) -> $L", &[attributes_creation(executable).into()]),
            };
            return Ok(());
        }

        let creation = match direct_arguments {
            Some(arguments) => invocation(executable, arguments),
            None => attributes_creation(executable),
        };
        let instance_type = executable
            .return_type()
            .cloned()
            .unwrap_or_else(|| TypeName::class(executable.declaring_class().clone()));
        code.add("(instanceContext) -> {\n$>", &[]);
        code.add_statement("$T bean = $L", &[instance_type.into(), creation.into()]);
        for injection_point in injection_points {
            self.write_injection_point(injection_point, code);
        }
        code.add_statement("return bean", &[]);
        code.add("$<}", &[]);
        Ok(())
    }

    /// The arguments of the instance creator when they can be written as literals, `None` when
    /// they have to be resolved by the container at runtime.
    fn direct_arguments(&self, creator: &InstanceCreator) -> Result<Option<Vec<CodeBlock>>> {
        let executable = creator.executable();
        if executable.parameter_count() == 0 {
            return Ok(Some(Vec::new()));
        }
        let needs_provider = creator
            .parameters()
            .iter()
            .any(|parameter| parameter.dependency_kind() == Some(DependencyKind::Provider));
        let arguments = self.definition.constructor_arguments().ordered();
        if needs_provider || arguments.len() != executable.parameter_count() {
            return Ok(None);
        }
        let values: Vec<BeanValue> = arguments
            .iter()
            .map(|argument| self.bean_factory.resolve_value_if_necessary(argument.value()))
            .collect();
        if !values.iter().all(BeanValue::is_literal) {
            return Ok(None);
        }
        let last = executable.parameter_count() - 1;
        let binds_directly = values
            .iter()
            .zip(executable.parameter_types())
            .enumerate()
            .all(|(index, (value, parameter_type))| {
                self.binds_directly(value, parameter_type, executable.is_varargs() && index == last)
            });
        if !binds_directly {
            return Ok(None);
        }
        let writer = ParameterWriter::new();
        values
            .iter()
            .zip(executable.parameter_types())
            .map(|(value, parameter_type)| writer.write_parameter_value(value, Some(parameter_type)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Whether `value` written as a literal compiles as an argument for `parameter_type`.
    ///
    /// Values matched only through element binding or type conversion are left to the container.
    fn binds_directly(&self, value: &BeanValue, parameter_type: &TypeName, varargs: bool) -> bool {
        let Some(value_type) = self.bean_factory.value_type(value) else {
            return !parameter_type.is_primitive();
        };
        let registry = self.bean_factory.registry();
        registry.is_assignable(parameter_type, &value_type)
            || takes_declared_form(value, parameter_type)
            || (varargs
                && parameter_type
                    .component_type()
                    .is_some_and(|component| registry.is_assignable(component, &value_type)))
    }

    fn write_injection_point(&self, injection_point: &MemberDescriptor, code: &mut CodeBlockBuilder) {
        match injection_point.member() {
            InjectedMember::Field(field) => self.write_field_injection(field, injection_point.is_required(), code),
            InjectedMember::Method(method) => self.write_method_injection(method, injection_point.is_required(), code),
            InjectedMember::Parameter { .. } => {}
        }
    }

    fn write_field_injection(&self, field: &Field, required: bool, code: &mut CodeBlockBuilder) {
        let field_type = field.type_name().raw();
        code.add("instanceContext.field($S, $T.class)", &[field.name().into(), (&field_type).into()]);
        write_resolution(required, code);
        if field.visibility().is_private() {
            self.reflection.borrow_mut().add_field(field);
            let reflection_utils = ClassName::parse(names::REFLECTION_UTILS);
            code.add("{\n$>", &[]);
            code.add_statement(
                "$T field = $T.findField($T.class, $S, $T.class)",
                &[
                    ClassName::parse(names::REFLECT_FIELD).into(),
                    (&reflection_utils).into(),
                    field.declaring_class().into(),
                    field.name().into(),
                    field_type.into(),
                ],
            );
            code.add_statement("$T.makeAccessible(field)", &[(&reflection_utils).into()]);
            code.add_statement("$T.setField(field, bean, attributes.get(0))", &[reflection_utils.into()]);
            code.add("$<});\n", &[]);
        } else {
            code.add("bean.$N = attributes.get(0));\n", &[field.name().into()]);
        }
    }

    fn write_method_injection(&self, method: &Executable, required: bool, code: &mut CodeBlockBuilder) {
        let name = method.method_name().unwrap_or_default();
        let parameter_types = ParameterWriter::new().write_executable_parameter_types(method);
        if parameter_types.is_empty() {
            code.add("instanceContext.method($S)", &[name.into()]);
        } else {
            code.add("instanceContext.method($S, $L)", &[name.into(), (&parameter_types).into()]);
        }
        write_resolution(required, code);
        let attributes = attribute_arguments(method.parameter_count());
        if method.visibility().is_private() {
            self.reflection.borrow_mut().add_executable(method);
            let reflection_utils = ClassName::parse(names::REFLECTION_UTILS);
            let lookup_arguments = if parameter_types.is_empty() {
                CodeBlock::of("$T.class, $S", &[method.declaring_class().into(), name.into()])
            } else {
                CodeBlock::of("$T.class, $S, $L", &[method.declaring_class().into(), name.into(), parameter_types.into()])
            };
            let invoke_arguments = if attributes.is_empty() {
                CodeBlock::of("method, bean", &[])
            } else {
                CodeBlock::of("method, bean, $L", &[attributes.into()])
            };
            code.add("{\n$>", &[]);
            code.add_statement(
                "$T method = $T.findMethod($L)",
                &[ClassName::parse(names::REFLECT_METHOD).into(), (&reflection_utils).into(), lookup_arguments.into()],
            );
            code.add_statement("$T.makeAccessible(method)", &[(&reflection_utils).into()]);
            code.add_statement("$T.invokeMethod($L)", &[reflection_utils.into(), invoke_arguments.into()]);
            code.add("$<});\n", &[]);
        } else {
            code.add("bean.$N($L));\n", &[name.into(), attributes.into()]);
        }
    }

    /// The parameter of the customizer lambda. Inner beans are written inside the customizer of
    /// their outer bean, so each level needs its own name.
    fn customizer_parameter(&self) -> String {
        match self.inner_depth {
            0 => "bd".to_string(),
            depth => format!("bd{depth}"),
        }
    }

    fn customizers(&self) -> Result<Vec<CodeBlock>> {
        let bd = self.customizer_parameter();
        let writer = ParameterWriter::with_inner_bean_writer(self);
        let mut customizers = Vec::new();
        for property in self.descriptor.properties() {
            let value = writer.write_parameter_value(property.value(), property.declared_type())?;
            customizers.push(CodeBlock::of(
                "$N.getPropertyValues().addPropertyValue($S, $L)",
                &[(&bd).into(), property.name().into(), value.into()],
            ));
        }
        if self.definition.is_primary() {
            customizers.push(CodeBlock::of("$N.setPrimary(true)", &[(&bd).into()]));
        }
        if let Some(scope) = self.definition.scope().filter(|scope| !scope.is_empty() && *scope != "singleton") {
            customizers.push(CodeBlock::of("$N.setScope($S)", &[(&bd).into(), scope.into()]));
        }
        let role = self.definition.role();
        if role != Role::Application {
            customizers.push(CodeBlock::of("$N.setRole($L)", &[(&bd).into(), role.code().into()]));
        }
        if self.definition.is_lazy_init() {
            customizers.push(CodeBlock::of("$N.setLazyInit(true)", &[(&bd).into()]));
        }
        let qualifier_type = ClassName::parse(names::AUTOWIRE_CANDIDATE_QUALIFIER);
        for qualifier in self.definition.qualifiers() {
            customizers.push(match qualifier.value() {
                Some(value) => CodeBlock::of(
                    "$N.addQualifier(new $T($T.class, $S))",
                    &[(&bd).into(), (&qualifier_type).into(), qualifier.type_name().into(), value.into()],
                ),
                None => CodeBlock::of(
                    "$N.addQualifier(new $T($T.class))",
                    &[(&bd).into(), (&qualifier_type).into(), qualifier.type_name().into()],
                ),
            });
        }
        Ok(customizers)
    }

    fn write_customizers(&self, code: &mut CodeBlockBuilder) -> Result<()> {
        let bd = self.customizer_parameter();
        match self.customizers()?.as_slice() {
            [] => {}
            [customizer] => {
                code.add(".customize(($N) -> $L)", &[bd.into(), customizer.into()]);
            }
            customizers => {
                code.add(".customize(($N) -> {\n$>", &[bd.into()]);
                for customizer in customizers {
                    code.add_statement("$L", &[customizer.into()]);
                }
                code.add("$<})", &[]);
            }
        }
        Ok(())
    }

    fn take_reflection(&self) -> ReflectionConfiguration {
        self.reflection.take()
    }
}

impl BeanRegistrationWriter for DefaultBeanRegistrationWriter<'_> {
    fn write_bean_registration(&self, context: &mut BootstrapWriterContext, code: &mut CodeBlockBuilder) -> Result<()> {
        let accessibility = ProtectedAccessAnalyzer::new(self.bean_factory.registry()).analyze(&self.bean_name, &self.descriptor)?;
        let package = accessibility.package().filter(|package| *package != context.main_package());
        match package {
            Some(package) => self.write_in_package(package, context, code)?,
            None => self.write_chain(false, code)?,
        }
        context.native_configuration_mut().reflection_mut().merge(self.take_reflection());

        tracing::event!(
            name: "aot_bootstrap.registration.written",
            tracing::Level::DEBUG,
            bean.name = %self.bean_name,
            routing = package.unwrap_or("main"),
        );
        Ok(())
    }

    fn bean_instance_descriptor(&self) -> &BeanInstanceDescriptor {
        &self.descriptor
    }
}

impl InnerBeanWriter for DefaultBeanRegistrationWriter<'_> {
    fn write_inner_bean(&self, definition: &BeanDefinition) -> Result<CodeBlock> {
        let Some(descriptor) = DefaultBeanInstanceDescriptorFactory::new(self.bean_factory).create(definition)? else {
            return Err(Error::UnsupportedValue {
                type_name: definition
                    .bean_class()
                    .map_or_else(|| "inner bean definition".to_string(), ClassName::canonical_name),
            });
        };
        let mut inner = DefaultBeanRegistrationWriter::new(self.bean_factory, self.bean_name.as_str(), definition.clone(), descriptor);
        inner.inner_depth = self.inner_depth + 1;
        let mut code = CodeBlock::builder();
        inner.write_chain(true, &mut code)?;
        self.reflection.borrow_mut().merge(inner.take_reflection());
        Ok(code.build())
    }
}

/// `Sample.class`, or `ResolvableType.forClassWithGenerics(...)` for a fully resolved generic type.
fn write_bean_type(bean_type: &TypeName) -> CodeBlock {
    if bean_type.has_unresolvable_generics() {
        return CodeBlock::of("$T.class", &[bean_type.raw().into()]);
    }
    generic_type(bean_type)
}

fn generic_type(ty: &TypeName) -> CodeBlock {
    let TypeName::Class { name, generics } = ty else {
        return CodeBlock::of("$T.class", &[ty.raw().into()]);
    };
    if generics.is_empty() {
        return CodeBlock::of("$T.class", &[name.into()]);
    }
    let resolvable_type = ClassName::parse(names::RESOLVABLE_TYPE);
    // forClassWithGenerics takes either classes only or resolvable types only.
    let nested = generics.iter().any(TypeName::has_generics);
    let arguments = generics.iter().map(|generic| {
        if !nested {
            CodeBlock::of("$T.class", &[generic.raw().into()])
        } else if generic.has_generics() {
            generic_type(generic)
        } else {
            CodeBlock::of("$T.forClass($T.class)", &[(&resolvable_type).into(), generic.raw().into()])
        }
    });
    CodeBlock::of(
        "$T.forClassWithGenerics($T.class, $L)",
        &[(&resolvable_type).into(), name.into(), CodeBlock::join(arguments, ", ").into()],
    )
}

/// `.withFactoryMethod(...)` for factory methods, `.withConstructor(...)` for constructors with
/// parameters.
fn write_executable_selection(executable: &Executable, code: &mut CodeBlockBuilder) {
    let parameter_types = ParameterWriter::new().write_executable_parameter_types(executable);
    match executable.method_name() {
        Some(method) => {
            code.add(".withFactoryMethod($T.class, $S", &[executable.declaring_class().into(), method.into()]);
            if !parameter_types.is_empty() {
                code.add(", $L", &[parameter_types.into()]);
            }
            code.add(")", &[]);
        }
        None if !parameter_types.is_empty() => {
            code.add(".withConstructor($L)", &[parameter_types.into()]);
        }
        None => {}
    }
}

/// Integral literals written for a `long`, `float` or `double` parameter take that type's form.
fn takes_declared_form(value: &BeanValue, parameter_type: &TypeName) -> bool {
    let target = match parameter_type {
        TypeName::Primitive(primitive) => Some(*primitive),
        TypeName::Class { name, .. } => PrimitiveType::unboxed(name),
        _ => None,
    };
    matches!(value, BeanValue::Byte(_) | BeanValue::Short(_) | BeanValue::Int(_))
        && matches!(target, Some(PrimitiveType::Long | PrimitiveType::Float | PrimitiveType::Double))
}

/// Opens the lambda receiving the resolved attributes of an injected member. Members that are not
/// required are only injected when all their dependencies resolve.
fn write_resolution(required: bool, code: &mut CodeBlockBuilder) {
    if required {
        code.add(".invoke(context, (attributes) -> ", &[]);
    } else {
        code.add(".resolve(context, false).ifResolved((attributes) -> ", &[]);
    }
}

/// `new Sample(a, b)`, `Sample.create(a, b)` or `context.getBean(Factory.class).create(a, b)`.
fn invocation(executable: &Executable, arguments: Vec<CodeBlock>) -> CodeBlock {
    let arguments = CodeBlock::join(arguments, ", ");
    match executable.kind() {
        ExecutableKind::Constructor => CodeBlock::of("new $T($L)", &[executable.declaring_class().into(), arguments.into()]),
        ExecutableKind::Method { name, is_static: true, .. } => CodeBlock::of(
            "$T.$N($L)",
            &[executable.declaring_class().into(), name.into(), arguments.into()],
        ),
        ExecutableKind::Method { name, .. } => CodeBlock::of(
            "context.getBean($T.class).$N($L)",
            &[executable.declaring_class().into(), name.into(), arguments.into()],
        ),
    }
}

/// Creation through the instance context, which resolves each argument at runtime.
fn attributes_creation(executable: &Executable) -> CodeBlock {
    let invocation = invocation(executable, vec![attribute_arguments(executable.parameter_count())]);
    CodeBlock::of("instanceContext.create(context, (attributes) -> $L)", &[invocation.into()])
}

/// `attributes.get(0), attributes.get(1)`, up to `count`.
fn attribute_arguments(count: usize) -> CodeBlock {
    CodeBlock::join((0..count).map(|index| CodeBlock::of("attributes.get($L)", &[index.into()])), ", ")
}
