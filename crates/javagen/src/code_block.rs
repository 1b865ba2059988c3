// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Write as _;

use crate::{ClassName, PrimitiveType, Snippet, TypeName};

/// A fragment of Java code with embedded type references.
///
/// Code blocks are assembled from format templates. Supported placeholders:
///
/// * `$T` a type, emitted by its simple name and recorded as an import.
/// * `$S` a string, emitted as a quoted and escaped Java string literal.
/// * `$L` a literal: raw text, a nested [`CodeBlock`] or a type.
/// * `$N` a name, emitted as raw text.
/// * `$>` / `$<` increase or decrease the indentation of the following lines.
/// * `$$` a dollar sign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CodePart {
    Text(String),
    Type(TypeName),
    Indent,
    Unindent,
}

/// An argument bound to a placeholder of a format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Bound to `$T`, imported when written to a file.
    Type(TypeName),
    /// Bound to `$L`, `$S` or `$N`.
    Text(String),
    /// Bound to `$L`, spliced in with its own arguments.
    Code(CodeBlock),
}

impl CodeBlock {
    /// Starts an empty block.
    pub fn builder() -> CodeBlockBuilder {
        CodeBlockBuilder::default()
    }

    /// Creates a code block from a single format template.
    pub fn of(format: &str, args: &[Arg]) -> Self {
        let mut builder = Self::builder();
        builder.add(format, args);
        builder.build()
    }

    /// Joins the blocks with `separator` emitted as plain text between them.
    pub fn join(blocks: impl IntoIterator<Item = Self>, separator: &str) -> Self {
        let mut builder = Self::builder();
        for (index, block) in blocks.into_iter().enumerate() {
            if index > 0 {
                builder.push_text(separator);
            }
            builder.extend_parts(block.parts);
        }
        builder.build()
    }

    /// Whether the block holds no code.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Every class this block references through `$T` (or a type passed to `$L`).
    pub fn referenced_types(&self) -> Vec<ClassName> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                CodePart::Type(ty) => Some(ty.referenced_classes()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Renders this block on its own, recording the imports it needs.
    pub fn snippet(&self) -> Snippet {
        Snippet::of(self)
    }

    pub(crate) fn parts(&self) -> &[CodePart] {
        &self.parts
    }
}

/// Incrementally builds a [`CodeBlock`].
#[derive(Debug, Clone, Default)]
pub struct CodeBlockBuilder {
    parts: Vec<CodePart>,
}

impl CodeBlockBuilder {
    /// Appends a format template.
    ///
    /// # Panics
    ///
    /// Panics if the template and the arguments do not line up; this is a bug in the caller.
    #[expect(clippy::panic, reason = "a malformed template is a programming error, not a runtime condition")]
    pub fn add(&mut self, format: &str, args: &[Arg]) -> &mut Self {
        let mut args = args.iter();
        let mut chars = format.chars();
        let mut text = String::new();

        while let Some(c) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }
            let Some(placeholder) = chars.next() else {
                panic!("dangling '$' at the end of format template '{format}'");
            };
            match placeholder {
                '$' => text.push('$'),
                '>' | '<' => {
                    self.push_text(&std::mem::take(&mut text));
                    self.parts.push(if placeholder == '>' { CodePart::Indent } else { CodePart::Unindent });
                }
                'T' | 'S' | 'L' | 'N' => {
                    let Some(arg) = args.next() else {
                        panic!("format template '{format}' has more placeholders than arguments");
                    };
                    self.push_text(&std::mem::take(&mut text));
                    self.push_arg(placeholder, arg, format);
                }
                other => panic!("unknown placeholder '${other}' in format template '{format}'"),
            }
        }
        self.push_text(&text);

        assert!(
            args.next().is_none(),
            "format template '{format}' has fewer placeholders than arguments"
        );
        self
    }

    /// Appends a format template terminated as a statement.
    pub fn add_statement(&mut self, format: &str, args: &[Arg]) -> &mut Self {
        self.add(format, args);
        self.push_text(";\n");
        self
    }

    /// Appends `block` as is.
    pub fn add_code(&mut self, block: &CodeBlock) -> &mut Self {
        self.extend_parts(block.parts.iter().cloned());
        self
    }

    /// Opens a `{` block, e.g. `if (condition) {`, and indents what follows.
    pub fn begin_control_flow(&mut self, format: &str, args: &[Arg]) -> &mut Self {
        self.add(format, args);
        self.push_text(" {\n");
        self.parts.push(CodePart::Indent);
        self
    }

    /// Closes the block opened by `begin_control_flow`.
    pub fn end_control_flow(&mut self) -> &mut Self {
        self.parts.push(CodePart::Unindent);
        self.push_text("}\n");
        self
    }

    /// Increases the indentation of the following lines by one level.
    pub fn indent(&mut self) -> &mut Self {
        self.parts.push(CodePart::Indent);
        self
    }

    /// Decreases the indentation of the following lines by one level.
    pub fn unindent(&mut self) -> &mut Self {
        self.parts.push(CodePart::Unindent);
        self
    }

    /// Whether nothing was added yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the block built so far.
    pub fn build(&self) -> CodeBlock {
        CodeBlock {
            parts: self.parts.clone(),
        }
    }

    #[expect(clippy::panic, reason = "a malformed template is a programming error, not a runtime condition")]
    fn push_arg(&mut self, placeholder: char, arg: &Arg, format: &str) {
        match (placeholder, arg) {
            ('T' | 'L', Arg::Type(ty)) => self.parts.push(CodePart::Type(ty.clone())),
            ('S', Arg::Text(value)) => self.push_text(&string_literal(value)),
            ('L' | 'N', Arg::Text(value)) => self.push_text(value),
            ('L', Arg::Code(block)) => self.extend_parts(block.parts.iter().cloned()),
            (placeholder, arg) => panic!("argument {arg:?} cannot be bound to '${placeholder}' in format template '{format}'"),
        }
    }

    fn extend_parts(&mut self, parts: impl IntoIterator<Item = CodePart>) {
        for part in parts {
            match part {
                CodePart::Text(text) => self.push_text(&text),
                other => self.parts.push(other),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(CodePart::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(CodePart::Text(text.to_string()));
        }
    }
}

/// Quotes and escapes `value` as a Java string literal.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\'' => literal.push('\''),
            other => push_escaped(&mut literal, other),
        }
    }
    literal.push('"');
    literal
}

/// Quotes and escapes `value` as a Java character literal.
pub fn char_literal(value: char) -> String {
    let mut literal = String::with_capacity(4);
    literal.push('\'');
    match value {
        '\'' => literal.push_str("\\'"),
        '"' => literal.push('"'),
        other => push_escaped(&mut literal, other),
    }
    literal.push('\'');
    literal
}

fn push_escaped(literal: &mut String, c: char) {
    match c {
        '\\' => literal.push_str("\\\\"),
        '\n' => literal.push_str("\\n"),
        '\r' => literal.push_str("\\r"),
        '\t' => literal.push_str("\\t"),
        '\u{8}' => literal.push_str("\\b"),
        '\u{c}' => literal.push_str("\\f"),
        c if c.is_control() => {
            let _ = write!(literal, "\\u{:04x}", u32::from(c));
        }
        c => literal.push(c),
    }
}

impl From<TypeName> for Arg {
    fn from(value: TypeName) -> Self {
        Self::Type(value)
    }
}

impl From<&TypeName> for Arg {
    fn from(value: &TypeName) -> Self {
        Self::Type(value.clone())
    }
}

impl From<ClassName> for Arg {
    fn from(value: ClassName) -> Self {
        Self::Type(TypeName::class(value))
    }
}

impl From<&ClassName> for Arg {
    fn from(value: &ClassName) -> Self {
        Self::Type(TypeName::class(value.clone()))
    }
}

impl From<PrimitiveType> for Arg {
    fn from(value: PrimitiveType) -> Self {
        Self::Type(TypeName::Primitive(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<CodeBlock> for Arg {
    fn from(value: CodeBlock) -> Self {
        Self::Code(value)
    }
}

impl From<&CodeBlock> for Arg {
    fn from(value: &CodeBlock) -> Self {
        Self::Code(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_text_is_merged() {
        let block = CodeBlock::of("a$$b$Lc", &["-".into()]);
        assert_eq!(block.parts(), [CodePart::Text("a$b-c".to_string())]);
    }

    #[test]
    fn types_are_kept_as_tokens() {
        let block = CodeBlock::of("new $T()", &[ClassName::parse("com.example.Sample").into()]);
        assert_eq!(block.referenced_types(), vec![ClassName::parse("com.example.Sample")]);
    }

    #[test]
    fn string_literal_escapes() {
        assert_eq!(string_literal("say \"hi\"\n\\"), r#""say \"hi\"\n\\""#);
        assert_eq!(string_literal("it's"), r#""it's""#);
    }

    #[test]
    fn char_literal_escapes() {
        assert_eq!(char_literal('\\'), r"'\\'");
        assert_eq!(char_literal('\''), r"'\''");
        assert_eq!(char_literal('c'), "'c'");
        assert_eq!(char_literal('\u{1}'), r"'\u0001'");
    }

    #[test]
    #[should_panic]
    fn missing_argument_panics() {
        let _ = CodeBlock::of("$S and $S", &["one".into()]);
    }

    #[test]
    #[should_panic]
    fn string_placeholder_rejects_types() {
        let _ = CodeBlock::of("$S", &[ClassName::parse("a.B").into()]);
    }

    #[test]
    fn join_inserts_separator() {
        let block = CodeBlock::join([CodeBlock::of("a", &[]), CodeBlock::of("b", &[])], ", ");
        assert_eq!(block.parts(), [CodePart::Text("a, b".to_string())]);
    }
}
