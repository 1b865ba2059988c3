// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::CodeBlock;
use crate::code_writer::{CodeWriter, ImportManager};

/// A code block rendered outside of any compilation unit.
///
/// Types are shortened the same way a file would shorten them, and the imports that would be
/// needed are kept alongside the code. Mostly useful to assert on generated fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    code: String,
    imports: Vec<String>,
}

impl Snippet {
    /// Renders `block` with simple names, collecting the imports they need.
    pub fn of(block: &CodeBlock) -> Self {
        let imports = ImportManager::new("", None, block.referenced_types());
        let mut writer = CodeWriter::new("  ", &imports);
        writer.emit_block(block);
        Self {
            code: writer.finish(),
            imports: imports.imports().to_vec(),
        }
    }

    /// The rendered code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Canonical names to import, sorted.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Whether `canonical_name` is among the imports.
    pub fn has_import(&self, canonical_name: &str) -> bool {
        self.imports.iter().any(|import| import == canonical_name)
    }
}

impl fmt::Display for Snippet {
    #[cfg_attr(test, mutants::skip)] // Delegates to code().
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
