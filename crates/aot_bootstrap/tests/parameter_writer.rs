// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]
#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

//! Integration tests for the Java expressions written for configured values.

use aot_bootstrap::Error;
use aot_bootstrap::model::{BeanValue, Executable};
use aot_bootstrap::writer::ParameterWriter;
use javagen::{PrimitiveType, TypeName};
use rstest::rstest;

mod util;

use util::{class, integer, string};

fn write(value: &BeanValue, declared: Option<&TypeName>) -> String {
    ParameterWriter::new()
        .write_parameter_value(value, declared)
        .unwrap()
        .snippet()
        .code()
        .to_string()
}

#[rstest]
#[case("test", r#""test""#)]
#[case("a\"b", r#""a\"b""#)]
#[case("back\\slash", r#""back\\slash""#)]
#[case("line\nbreak\ttab\r", r#""line\nbreak\ttab\r""#)]
fn strings_are_escaped(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(write(&BeanValue::from(value), None), expected);
}

#[test]
fn empty_collections_use_singletons() {
    assert_eq!(write(&BeanValue::list([]), None), "Collections.emptyList()");
    assert_eq!(write(&BeanValue::set([]), None), "Collections.emptySet()");
}

#[test]
fn list_keeps_element_order() {
    let list = BeanValue::list([BeanValue::from("a"), BeanValue::from("test")]);
    assert_eq!(write(&list, None), r#"List.of("a", "test")"#);
}

#[test]
fn set_elements_follow_declared_element_type() {
    let declared = TypeName::parameterized("java.util.Set", [class("java.lang.Long")]);
    let set = BeanValue::set([BeanValue::from(1), BeanValue::from(2)]);
    assert_eq!(write(&set, Some(&declared)), "Set.of(1L, 2L)");
}

#[test]
fn negative_narrow_integers_are_cast() {
    assert_eq!(write(&BeanValue::Byte(-1), None), "(byte) -1");
    assert_eq!(write(&BeanValue::Short(-32), None), "(short) -32");
    assert_eq!(write(&BeanValue::Int(-1), None), "-1");
}

#[test]
fn arrays() {
    let array = BeanValue::array(string(), [BeanValue::from("a"), BeanValue::from("b")]);
    assert_eq!(write(&array, None), r#"new String[] { "a", "b" }"#);
    assert_eq!(write(&BeanValue::array(PrimitiveType::Int, []), None), "new int[] {}");
}

#[test]
fn enums_and_class_literals() {
    let unit = BeanValue::enum_constant("java.time.temporal.ChronoUnit", "DAYS");
    let snippet = ParameterWriter::new().write_parameter_value(&unit, None).unwrap().snippet();
    assert_eq!(snippet.code(), "ChronoUnit.DAYS");
    assert!(snippet.has_import("java.time.temporal.ChronoUnit"));

    let array_class = BeanValue::class(TypeName::array_of(string()));
    assert_eq!(write(&array_class, None), "String[].class");
}

#[test]
fn unsupported_values_name_their_type() {
    let error = ParameterWriter::new()
        .write_parameter_value(&BeanValue::opaque(class("com.example.Widget")), None)
        .unwrap_err();
    assert!(matches!(&error, Error::UnsupportedValue { type_name } if type_name == "com.example.Widget"), "{error}");
}

#[test]
fn executable_parameter_types() {
    let executable = Executable::constructor("com.example.Sample")
        .param("name", string())
        .param("count", integer())
        .param("values", TypeName::parameterized("java.util.List", [string()]));
    let code = ParameterWriter::new().write_executable_parameter_types(&executable);
    assert_eq!(code.snippet().code(), "String.class, Integer.class, List.class");
}
