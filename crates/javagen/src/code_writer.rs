// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::code_block::CodePart;
use crate::{ClassName, CodeBlock, TypeName};

/// Decides, for one compilation unit, which classes are written by their simple name and which
/// ones must be imported.
///
/// A class is shortened when no other referenced class shares its simple name and it does not
/// collide with the class being declared. Everything else is written fully qualified.
#[derive(Debug, Default)]
pub(crate) struct ImportManager {
    short: HashSet<ClassName>,
    imports: Vec<String>,
}

impl ImportManager {
    pub(crate) fn new(own_package: &str, own_class: Option<&str>, referenced: impl IntoIterator<Item = ClassName>) -> Self {
        let mut by_simple_name: BTreeMap<String, BTreeSet<ClassName>> = BTreeMap::new();
        for class in referenced {
            let top_level = class.top_level();
            by_simple_name
                .entry(top_level.simple_name().to_string())
                .or_default()
                .insert(top_level);
        }

        let mut manager = Self::default();
        for (simple_name, candidates) in by_simple_name {
            let mut candidates = candidates.into_iter();
            let (Some(top_level), None) = (candidates.next(), candidates.next()) else {
                continue;
            };
            let is_own_class = top_level.package_name() == own_package && own_class == Some(simple_name.as_str());
            if own_class == Some(simple_name.as_str()) && !is_own_class {
                continue;
            }
            if !top_level.is_java_lang() && !top_level.package_name().is_empty() && top_level.package_name() != own_package {
                manager.imports.push(top_level.canonical_name());
            }
            manager.short.insert(top_level);
        }
        manager.imports.sort();
        manager
    }

    pub(crate) fn resolve(&self, class: &ClassName) -> String {
        if self.short.contains(&class.top_level()) {
            class.simple_names().join(".")
        } else {
            class.canonical_name()
        }
    }

    pub(crate) fn imports(&self) -> &[String] {
        &self.imports
    }
}

/// Writes code blocks as text, handling indentation and type names.
pub(crate) struct CodeWriter<'a> {
    out: String,
    indent: &'a str,
    level: usize,
    line_start: bool,
    imports: &'a ImportManager,
}

impl<'a> CodeWriter<'a> {
    pub(crate) fn new(indent: &'a str, imports: &'a ImportManager) -> Self {
        Self {
            out: String::new(),
            indent,
            level: 0,
            line_start: true,
            imports,
        }
    }

    pub(crate) fn emit(&mut self, text: &str) -> &mut Self {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.out.push('\n');
                self.line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.line_start {
                for _ in 0..self.level {
                    self.out.push_str(self.indent);
                }
                self.line_start = false;
            }
            self.out.push_str(line);
        }
        self
    }

    pub(crate) fn emit_block(&mut self, block: &CodeBlock) -> &mut Self {
        for part in block.parts() {
            match part {
                CodePart::Text(text) => {
                    self.emit(text);
                }
                CodePart::Type(ty) => {
                    let name = self.type_name(ty);
                    self.emit(&name);
                }
                CodePart::Indent => self.indent(),
                CodePart::Unindent => self.unindent(),
            }
        }
        self
    }

    /// Emits `block` and makes sure the output ends on a fresh line.
    pub(crate) fn emit_block_lines(&mut self, block: &CodeBlock) -> &mut Self {
        self.emit_block(block);
        if !self.line_start {
            self.emit("\n");
        }
        self
    }

    pub(crate) fn type_name(&self, ty: &TypeName) -> String {
        match ty {
            TypeName::Primitive(primitive) => primitive.keyword().to_string(),
            TypeName::Variable(name) => name.clone(),
            TypeName::Array(component) => format!("{}[]", self.type_name(component)),
            TypeName::Class { name, generics } => {
                let raw = self.imports.resolve(name);
                if generics.is_empty() {
                    raw
                } else {
                    let generics: Vec<String> = generics.iter().map(|generic| self.type_name(generic)).collect();
                    format!("{raw}<{}>", generics.join(", "))
                }
            }
        }
    }

    pub(crate) fn indent(&mut self) {
        self.level += 1;
    }

    pub(crate) fn unindent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
