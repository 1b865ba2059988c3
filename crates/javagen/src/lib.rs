// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Builders for emitting Java source code.
//!
//! Code is assembled from format templates into [`CodeBlock`]s. Type references are kept as
//! tokens until a [`JavaFile`] is rendered, at which point every referenced class is either
//! imported and written by its simple name or, when two classes would share a simple name,
//! written fully qualified.
//!
//! # Example
//!
//! ```
//! use javagen::{ClassName, CodeBlock, JavaFile, MethodSpec, Modifier, TypeSpec};
//!
//! let list = ClassName::parse("java.util.List");
//! let method = MethodSpec::builder("names")
//!     .modifiers([Modifier::Public, Modifier::Static])
//!     .returns(list.clone())
//!     .code(&CodeBlock::of("return $T.of($S);\n", &[list.into(), "a".into()]))
//!     .build();
//! let class = TypeSpec::class_builder("Names")
//!     .modifiers([Modifier::Public])
//!     .method(method)
//!     .build();
//!
//! let source = JavaFile::builder("com.example", class).build().to_source();
//! assert!(source.contains("import java.util.List;"));
//! assert!(source.contains("    return List.of(\"a\");"));
//! ```

mod class_name;
mod code_block;
mod code_writer;
mod java_file;
mod method_spec;
mod snippet;
mod type_name;
mod type_spec;

pub use class_name::{ClassName, PrimitiveType};
pub use code_block::{Arg, CodeBlock, CodeBlockBuilder, char_literal, string_literal};
pub use java_file::{JavaFile, JavaFileBuilder};
pub use method_spec::{MethodSpec, MethodSpecBuilder, Modifier};
pub use snippet::Snippet;
pub use type_name::TypeName;
pub use type_spec::{TypeSpec, TypeSpecBuilder};
