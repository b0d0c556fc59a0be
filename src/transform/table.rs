//! Per-traversal table of namespace bindings.

use std::collections::HashMap;

/// Records that `local_name` refers to the whole namespace of
/// `source_module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local_name: String,
    pub source_module: String,
}

impl ImportBinding {
    pub fn new(local_name: impl Into<String>, source_module: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            source_module: source_module.into(),
        }
    }
}

/// Maps local names to the watched module they were imported from.
///
/// One table lives for exactly one traversal; registering a name twice
/// keeps the later binding.
#[derive(Debug, Default)]
pub struct ImportTable {
    bindings: HashMap<String, ImportBinding>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace binding.
    pub fn register(&mut self, binding: ImportBinding) {
        self.bindings.insert(binding.local_name.clone(), binding);
    }

    /// Look up the binding for a local name.
    pub fn resolve(&self, local_name: &str) -> Option<&ImportBinding> {
        self.bindings.get(local_name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut table = ImportTable::new();
        assert!(table.is_empty());

        table.register(ImportBinding::new("_", "lodash"));
        table.register(ImportBinding::new("fp", "lodash/fp"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("_").map(|b| b.source_module.as_str()), Some("lodash"));
        assert_eq!(table.resolve("fp").map(|b| b.source_module.as_str()), Some("lodash/fp"));
        assert!(table.resolve("R").is_none());
    }

    #[test]
    fn test_later_registration_wins() {
        let mut table = ImportTable::new();
        table.register(ImportBinding::new("_", "lodash"));
        table.register(ImportBinding::new("_", "lodash/fp"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("_"), Some(&ImportBinding::new("_", "lodash/fp")));
    }
}
