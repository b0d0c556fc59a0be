//! Synthetic default imports and the pending list they are queued on.

use crate::ast::{
    identifier, import_declaration, import_default_specifier, string_literal, Statement,
};

/// A generated `import specifier_name from "module_path";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticImport {
    pub specifier_name: String,
    pub module_path: String,
}

impl SyntheticImport {
    pub fn new(specifier_name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            specifier_name: specifier_name.into(),
            module_path: module_path.into(),
        }
    }

    /// Import for a named specifier: `{ imported as local }` from `source`
    /// becomes `import local from "source/imported"`.
    pub fn for_named(local: &str, source_module: &str, imported: &str) -> Self {
        Self::new(local, member_path(source_module, imported))
    }

    /// Import for a property read off a namespace handle: `_.map` on
    /// `lodash/fp` becomes `import lodash_fp_map from "lodash/fp/map"`.
    pub fn for_member(source_module: &str, property: &str) -> Self {
        Self::new(
            member_specifier_name(source_module, property),
            member_path(source_module, property),
        )
    }

    /// Build the default-import statement node.
    pub fn to_statement(&self) -> Statement {
        create_default_import_statement(&self.specifier_name, &self.module_path)
    }
}

/// Build `import specifier from "import_path";`
pub fn create_default_import_statement(specifier: &str, import_path: &str) -> Statement {
    let default_specifier = import_default_specifier(identifier(specifier));
    Statement::Import(import_declaration(
        vec![default_specifier],
        string_literal(import_path),
    ))
}

/// `lodash/fp` + `map` -> `lodash/fp/map`
pub fn member_path(source_module: &str, member: &str) -> String {
    format!("{}/{}", source_module, member)
}

/// `lodash/fp` + `map` -> `lodash_fp_map`
pub fn member_specifier_name(source_module: &str, member: &str) -> String {
    format!("{}_{}", source_module.replace('/', "_"), member)
}

/// Ordered, append-only queue of synthetic imports for one traversal.
///
/// Entries are never deduplicated.
#[derive(Debug, Default)]
pub struct PendingImports {
    imports: Vec<SyntheticImport>,
}

impl PendingImports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, import: SyntheticImport) {
        self.imports.push(import);
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntheticImport> {
        self.imports.iter()
    }

    /// Consume the queue into statements, in insertion order.
    pub fn into_statements(self) -> Vec<Statement> {
        self.imports.iter().map(SyntheticImport::to_statement).collect()
    }
}
