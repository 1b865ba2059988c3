// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::code_writer::{CodeWriter, ImportManager};
use crate::{MethodSpec, Modifier, TypeSpec};

const DEFAULT_INDENT: &str = "  ";

/// A compilation unit: one top-level class in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    package: String,
    type_spec: TypeSpec,
    indent: String,
}

impl JavaFile {
    /// Starts a file declaring `type_spec` in `package`.
    pub fn builder(package: impl Into<String>, type_spec: TypeSpec) -> JavaFileBuilder {
        JavaFileBuilder {
            file: Self {
                package: package.into(),
                type_spec,
                indent: DEFAULT_INDENT.to_string(),
            },
        }
    }

    /// The package the type is declared in.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// The top-level type of the file.
    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    /// The path of this file relative to a source root, e.g. `com/example/Sample.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|segment| !segment.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", self.type_spec.name));
        path
    }

    /// Renders the compilation unit.
    pub fn to_source(&self) -> String {
        let imports = ImportManager::new(
            &self.package,
            Some(&self.type_spec.name),
            self.type_spec.referenced_types(),
        );
        let mut writer = CodeWriter::new(&self.indent, &imports);

        if !self.package.is_empty() {
            writer.emit(&format!("package {};\n\n", self.package));
        }
        if !imports.imports().is_empty() {
            for import in imports.imports() {
                writer.emit(&format!("import {import};\n"));
            }
            writer.emit("\n");
        }

        let spec = &self.type_spec;
        if let Some(javadoc) = &spec.javadoc {
            emit_javadoc(&mut writer, javadoc);
        }
        for modifier in &spec.modifiers {
            writer.emit(&format!("{modifier} "));
        }
        writer.emit(&format!("class {}", spec.name));
        if !spec.superinterfaces.is_empty() {
            let interfaces: Vec<String> = spec.superinterfaces.iter().map(|ty| writer.type_name(ty)).collect();
            writer.emit(&format!(" implements {}", interfaces.join(", ")));
        }
        writer.emit(" {\n");
        writer.indent();

        let mut first = true;
        if !spec.static_block.is_empty() {
            writer.emit("static {\n");
            writer.indent();
            writer.emit_block_lines(&spec.static_block);
            writer.unindent();
            writer.emit("}\n");
            first = false;
        }
        for method in &spec.methods {
            if !first {
                writer.emit("\n");
            }
            emit_method(&mut writer, method);
            first = false;
        }

        writer.unindent();
        writer.emit("}\n");
        writer.finish()
    }

    /// Writes the rendered source below `directory`, creating package directories as needed.
    pub fn write_to(&self, directory: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = directory.as_ref().join(self.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.to_source())?;
        Ok(path)
    }
}

/// Builds a [`JavaFile`].
#[derive(Debug, Clone)]
pub struct JavaFileBuilder {
    file: JavaFile,
}

impl JavaFileBuilder {
    /// The indentation unit, two spaces unless set.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.file.indent = indent.into();
        self
    }

    /// Returns the file.
    pub fn build(self) -> JavaFile {
        self.file
    }
}

fn emit_javadoc(writer: &mut CodeWriter<'_>, javadoc: &str) {
    writer.emit("/**\n");
    for line in javadoc.lines() {
        if line.is_empty() {
            writer.emit(" *\n");
        } else {
            writer.emit(&format!(" * {line}\n"));
        }
    }
    writer.emit(" */\n");
}

fn emit_method(writer: &mut CodeWriter<'_>, method: &MethodSpec) {
    if let Some(javadoc) = &method.javadoc {
        emit_javadoc(writer, javadoc);
    }
    for annotation in &method.annotations {
        let name = writer.type_name(&annotation.into());
        writer.emit(&format!("@{name}\n"));
    }
    let mut signature = String::new();
    for modifier in &method.modifiers {
        signature.push_str(modifier.keyword());
        signature.push(' ');
    }
    match &method.return_type {
        Some(return_type) => signature.push_str(&writer.type_name(return_type)),
        None => signature.push_str("void"),
    }
    let parameters: Vec<String> = method
        .parameters
        .iter()
        .map(|(ty, name)| format!("{} {name}", writer.type_name(ty)))
        .collect();
    writer.emit(&format!("{signature} {}({})", method.name, parameters.join(", ")));

    if method.modifiers.contains(&Modifier::Abstract) {
        writer.emit(";\n");
        return;
    }
    writer.emit(" {\n");
    writer.indent();
    writer.emit_block_lines(&method.body);
    writer.unindent();
    writer.emit("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_follows_package() {
        let file = JavaFile::builder("com.example", TypeSpec::class_builder("Sample").build()).build();
        assert_eq!(file.relative_path(), PathBuf::from("com/example/Sample.java"));
    }

    #[test]
    fn default_package_has_no_declaration() {
        let file = JavaFile::builder("", TypeSpec::class_builder("Sample").build()).build();
        assert_eq!(file.to_source(), "class Sample {\n}\n");
        assert_eq!(file.relative_path(), PathBuf::from("Sample.java"));
    }
}
