// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use javagen::{Arg, ClassName, CodeBlock, PrimitiveType, TypeName, char_literal};

use crate::model::names;
use crate::model::{BeanDefinition, BeanValue, Executable};
use crate::{Error, Result};

/// Writes the creation expression of an inner bean definition.
pub trait InnerBeanWriter {
    /// # Errors
    ///
    /// Fails when the inner bean cannot be resolved or one of its values cannot be written.
    fn write_inner_bean(&self, definition: &BeanDefinition) -> Result<CodeBlock>;
}

/// Writes configured values as Java expressions.
///
/// The runtime shape of the value selects the expression. The declared type of the target, when
/// known, refines numeric literals (an `int` value for a `long` parameter is written `1L`) and is
/// propagated to collection elements.
#[derive(Clone, Copy, Default)]
pub struct ParameterWriter<'a> {
    inner_bean_writer: Option<&'a dyn InnerBeanWriter>,
}

impl fmt::Debug for ParameterWriter<'_> {
    #[cfg_attr(test, mutants::skip)] // Debug output is not part of the contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterWriter")
            .field("inner_bean_writer", &self.inner_bean_writer.is_some())
            .finish()
    }
}

impl<'a> ParameterWriter<'a> {
    /// A writer that rejects inner bean definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer delegating inner bean definitions to `inner_bean_writer`.
    pub fn with_inner_bean_writer(inner_bean_writer: &'a dyn InnerBeanWriter) -> Self {
        Self {
            inner_bean_writer: Some(inner_bean_writer),
        }
    }

    /// Writes `value` as an expression compatible with `declared_type`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValue`] for values without a source representation.
    pub fn write_parameter_value(&self, value: &BeanValue, declared_type: Option<&TypeName>) -> Result<CodeBlock> {
        let declared = declared_type.and_then(primitive_of);
        let code = match value {
            BeanValue::Null => CodeBlock::of("null", &[]),
            BeanValue::Boolean(value) => CodeBlock::of("$L", &[(*value).into()]),
            BeanValue::Byte(value) => integral(i64::from(*value), declared.unwrap_or(PrimitiveType::Byte)),
            BeanValue::Short(value) => integral(i64::from(*value), declared.unwrap_or(PrimitiveType::Short)),
            BeanValue::Int(value) => integral(i64::from(*value), declared.unwrap_or(PrimitiveType::Int)),
            BeanValue::Long(value) => integral(*value, PrimitiveType::Long),
            BeanValue::Float(value) => floating(f64::from(*value), format!("{value:?}F"), PrimitiveType::Float),
            BeanValue::Double(value) => floating(*value, format!("{value:?}"), PrimitiveType::Double),
            BeanValue::Char(value) => CodeBlock::of("$L", &[char_literal(*value).into()]),
            BeanValue::String(value) => CodeBlock::of("$S", &[value.into()]),
            BeanValue::Enum { type_name, constant } => CodeBlock::of("$T.$N", &[type_name.into(), constant.into()]),
            BeanValue::Class(type_name) => CodeBlock::of("$T.class", &[type_name.raw().into()]),
            BeanValue::Array { component, elements } => {
                let elements = self.write_all(elements, Some(component))?;
                if elements.is_empty() {
                    CodeBlock::of("new $T[] {}", &[component.raw().into()])
                } else {
                    CodeBlock::of(
                        "new $T[] { $L }",
                        &[component.raw().into(), CodeBlock::join(elements, ", ").into()],
                    )
                }
            }
            BeanValue::List(elements) => self.write_collection(elements, declared_type, names::LIST, "emptyList")?,
            BeanValue::Set(elements) => self.write_collection(elements, declared_type, names::SET, "emptySet")?,
            BeanValue::Reference(bean_name) => CodeBlock::of(
                "new $T($S)",
                &[ClassName::parse(names::RUNTIME_BEAN_REFERENCE).into(), bean_name.into()],
            ),
            BeanValue::Inner(definition) => match self.inner_bean_writer {
                Some(writer) => writer.write_inner_bean(definition)?,
                None => {
                    return Err(Error::UnsupportedValue {
                        type_name: definition
                            .bean_class()
                            .map_or_else(|| "inner bean definition".to_string(), ClassName::canonical_name),
                    });
                }
            },
            BeanValue::Opaque { type_name } => {
                return Err(Error::UnsupportedValue {
                    type_name: type_name.to_string(),
                });
            }
        };
        Ok(code)
    }

    /// Writes the parameter types of `executable` as class literals: `String.class, int.class`.
    pub fn write_executable_parameter_types(&self, executable: &Executable) -> CodeBlock {
        CodeBlock::join(
            executable
                .parameter_types()
                .map(|parameter| CodeBlock::of("$T.class", &[parameter.raw().into()])),
            ", ",
        )
    }

    fn write_collection(
        &self,
        elements: &[BeanValue],
        declared_type: Option<&TypeName>,
        collection: &str,
        empty_factory: &str,
    ) -> Result<CodeBlock> {
        if elements.is_empty() {
            return Ok(CodeBlock::of(
                "$T.$N()",
                &[ClassName::parse(names::COLLECTIONS).into(), empty_factory.into()],
            ));
        }
        let element_type = declared_type.and_then(|declared| declared.generics().first());
        let elements = self.write_all(elements, element_type)?;
        Ok(CodeBlock::of(
            "$T.of($L)",
            &[ClassName::parse(collection).into(), CodeBlock::join(elements, ", ").into()],
        ))
    }

    fn write_all(&self, values: &[BeanValue], declared_type: Option<&TypeName>) -> Result<Vec<CodeBlock>> {
        values
            .iter()
            .map(|value| self.write_parameter_value(value, declared_type))
            .collect()
    }
}

/// The primitive a declared type stands for, boxed or not.
fn primitive_of(declared: &TypeName) -> Option<PrimitiveType> {
    match declared {
        TypeName::Primitive(primitive) => Some(*primitive),
        TypeName::Class { name, .. } => PrimitiveType::unboxed(name),
        _ => None,
    }
}

/// An integral value written for `target`, which selects the suffix or cast.
fn integral(value: i64, target: PrimitiveType) -> CodeBlock {
    let literal = match target {
        PrimitiveType::Byte | PrimitiveType::Short if value < 0 => format!("({}) {value}", target.keyword()),
        PrimitiveType::Long => format!("{value}L"),
        PrimitiveType::Float => format!("{value}F"),
        PrimitiveType::Double => format!("{value}.0"),
        _ => value.to_string(),
    };
    CodeBlock::of("$L", &[literal.into()])
}

/// A floating point `literal`; non-finite values use the constants of the wrapper class.
fn floating(value: f64, literal: String, target: PrimitiveType) -> CodeBlock {
    let wrapper = TypeName::class(target.boxed());
    let constant = if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value.is_sign_positive() { "POSITIVE_INFINITY" } else { "NEGATIVE_INFINITY" })
    } else {
        None
    };
    if let Some(constant) = constant {
        return CodeBlock::of("$T.$N", &[Arg::Type(wrapper), constant.into()]);
    }
    CodeBlock::of("$L", &[literal.into()])
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn write(value: &BeanValue, declared: Option<&TypeName>) -> String {
        ParameterWriter::new()
            .write_parameter_value(value, declared)
            .unwrap()
            .snippet()
            .code()
            .to_string()
    }

    #[rstest]
    #[case(BeanValue::Short(0), "0")]
    #[case(BeanValue::Int(1), "1")]
    #[case(BeanValue::Long(2), "2L")]
    #[case(BeanValue::Double(2.5), "2.5")]
    #[case(BeanValue::Double(3.0), "3.0")]
    #[case(BeanValue::Float(2.7), "2.7F")]
    #[case(BeanValue::Char('c'), "'c'")]
    #[case(BeanValue::Byte(1), "1")]
    #[case(BeanValue::Byte(-1), "(byte) -1")]
    #[case(BeanValue::Short(-4), "(short) -4")]
    #[case(BeanValue::Boolean(true), "true")]
    #[case(BeanValue::Null, "null")]
    #[case(BeanValue::Float(f32::NAN), "Float.NaN")]
    #[case(BeanValue::Double(f64::NEG_INFINITY), "Double.NEGATIVE_INFINITY")]
    fn literals(#[case] value: BeanValue, #[case] expected: &str) {
        assert_eq!(write(&value, None), expected);
    }

    #[test]
    fn declared_type_selects_numeric_suffix() {
        let long = TypeName::Primitive(PrimitiveType::Long);
        let boxed_double = TypeName::class(PrimitiveType::Double.boxed());
        assert_eq!(write(&BeanValue::Int(4), Some(&long)), "4L");
        assert_eq!(write(&BeanValue::Int(4), Some(&boxed_double)), "4.0");
    }

    #[test]
    fn char_escapes_backslash() {
        assert_eq!(write(&BeanValue::Char('\\'), None), r"'\\'");
    }

    #[test]
    fn class_literal_uses_raw_type() {
        let list = TypeName::parameterized(ClassName::parse(names::LIST), [TypeName::class(ClassName::parse(names::STRING))]);
        assert_eq!(write(&BeanValue::class(list), None), "List.class");
        assert_eq!(write(&BeanValue::class(PrimitiveType::Int), None), "int.class");
    }

    #[test]
    fn references_create_runtime_bean_references() {
        let snippet = ParameterWriter::new()
            .write_parameter_value(&BeanValue::reference("dataSource"), None)
            .unwrap()
            .snippet();
        assert_eq!(snippet.code(), r#"new RuntimeBeanReference("dataSource")"#);
        assert!(snippet.has_import(names::RUNTIME_BEAN_REFERENCE));
    }

    #[test]
    fn inner_beans_need_a_writer() {
        let inner = BeanValue::inner(BeanDefinition::builder("com.example.Inner").build());
        let error = ParameterWriter::new().write_parameter_value(&inner, None).unwrap_err();
        assert!(matches!(error, Error::UnsupportedValue { type_name } if type_name == "com.example.Inner"));
    }

    #[test]
    fn opaque_values_are_unsupported() {
        let error = ParameterWriter::new()
            .write_parameter_value(&BeanValue::opaque(ClassName::parse("com.example.Thing")), None)
            .unwrap_err();
        assert!(error.to_string().contains("com.example.Thing"));
    }

    #[test]
    fn inner_bean_writer_is_used() {
        struct Fixed;

        impl InnerBeanWriter for Fixed {
            fn write_inner_bean(&self, _definition: &BeanDefinition) -> Result<CodeBlock> {
                Ok(CodeBlock::of("inner()", &[]))
            }
        }

        let inner = BeanValue::list([BeanValue::inner(BeanDefinition::builder("com.example.Inner").build())]);
        let code = ParameterWriter::with_inner_bean_writer(&Fixed)
            .write_parameter_value(&inner, None)
            .unwrap();
        assert_eq!(code.snippet().code(), "List.of(inner())");
    }
}
