//! Classification of specifiers on watched import declarations.

use tracing::{debug, warn};

use super::emit::SyntheticImport;
use super::table::ImportBinding;
use super::SplitState;
use crate::ast::{
    import_declaration, is_import_default_specifier, is_import_namespace_specifier,
    is_import_specifier, is_import_type_specifier, ImportDeclaration, ImportSpecifier,
};

/// What a single import specifier turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A bare library member, rewritten to its own default import.
    Member(SyntheticImport),
    /// A handle to the whole namespace, resolved at use sites.
    Namespace(ImportBinding),
    /// A TypeScript `type` specifier. It has no runtime value, so it stays
    /// on an `import type` declaration from the original module.
    TypeOnly,
    /// Missing local or imported name.
    Skipped,
}

/// Classify one specifier of an import from `source_module`.
pub fn classify_specifier(specifier: &ImportSpecifier, source_module: &str) -> Classification {
    let Some(local) = specifier.local_name() else {
        return Classification::Skipped;
    };

    let imported = specifier.imported_name();
    if is_import_type_specifier(specifier) {
        return match imported {
            Some(_) => Classification::TypeOnly,
            None => Classification::Skipped,
        };
    }

    let is_default_import = is_import_default_specifier(specifier) || imported == Some("default");
    let is_namespaced = is_import_namespace_specifier(specifier);

    if is_import_specifier(specifier) && !is_default_import && !is_namespaced {
        match imported {
            Some(imported) => {
                Classification::Member(SyntheticImport::for_named(local, source_module, imported))
            }
            None => Classification::Skipped,
        }
    } else {
        Classification::Namespace(ImportBinding::new(local, source_module))
    }
}

/// Process every specifier of a watched import declaration, queueing
/// synthetic imports and registering namespace bindings on `state`.
///
/// Returns the `import type { ... }` declaration that replaces `decl` when
/// it carried type specifiers; otherwise the caller removes `decl`.
pub fn classify_import(
    decl: &ImportDeclaration,
    state: &mut SplitState,
) -> Option<ImportDeclaration> {
    let source_module = decl.source_value();
    let mut types = Vec::new();

    for specifier in &decl.specifiers {
        match classify_specifier(specifier, source_module) {
            Classification::Member(import) => {
                debug!(
                    local = %import.specifier_name,
                    path = %import.module_path,
                    "rewriting named import"
                );
                state.pending.push(import);
            }
            Classification::Namespace(binding) => {
                debug!(
                    local = %binding.local_name,
                    module = %binding.source_module,
                    "registering namespace binding"
                );
                state.table.register(binding);
            }
            Classification::TypeOnly => {
                debug!(module = source_module, ?specifier, "keeping type-only specifier");
                types.push(specifier.clone());
            }
            Classification::Skipped => {
                warn!(module = source_module, ?specifier, "skipping malformed import specifier");
            }
        }
    }

    if types.is_empty() {
        None
    } else {
        Some(import_declaration(types, decl.source.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{identifier, import_declaration, import_default_specifier, string_literal};

    fn named(imported: &str, local: &str) -> ImportSpecifier {
        ImportSpecifier::Named {
            imported: Some(identifier(imported)),
            local: Some(identifier(local)),
        }
    }

    #[test]
    fn test_named_specifier_is_member() {
        assert_eq!(
            classify_specifier(&named("get", "get"), "lodash/fp"),
            Classification::Member(SyntheticImport::new("get", "lodash/fp/get"))
        );
    }

    #[test]
    fn test_aliased_named_specifier_keeps_local_name() {
        assert_eq!(
            classify_specifier(&named("test", "foo"), "lodash"),
            Classification::Member(SyntheticImport::new("foo", "lodash/test"))
        );
    }

    #[test]
    fn test_namespace_handles() {
        let expected = Classification::Namespace(ImportBinding::new("ld", "lodash"));

        let default = import_default_specifier(identifier("ld"));
        let namespace = ImportSpecifier::Namespace {
            local: Some(identifier("ld")),
        };
        let aliased_default = named("default", "ld");

        assert_eq!(classify_specifier(&default, "lodash"), expected);
        assert_eq!(classify_specifier(&namespace, "lodash"), expected);
        assert_eq!(classify_specifier(&aliased_default, "lodash"), expected);
    }

    #[test]
    fn test_malformed_specifiers_are_skipped() {
        let no_local = ImportSpecifier::Default { local: None };
        let no_imported = ImportSpecifier::Named {
            imported: None,
            local: Some(identifier("x")),
        };

        assert_eq!(classify_specifier(&no_local, "lodash"), Classification::Skipped);
        assert_eq!(classify_specifier(&no_imported, "lodash"), Classification::Skipped);
    }

    #[test]
    fn test_classify_import_updates_state() {
        let decl = import_declaration(
            vec![
                import_default_specifier(identifier("_")),
                named("map", "map"),
                ImportSpecifier::Namespace { local: None },
                named("get", "g"),
            ],
            string_literal("lodash"),
        );

        let mut state = SplitState::default();
        assert_eq!(classify_import(&decl, &mut state), None);

        assert_eq!(state.table.len(), 1);
        assert!(state.table.resolve("_").is_some());
        let pending: Vec<_> = state.pending.iter().cloned().collect();
        assert_eq!(
            pending,
            vec![
                SyntheticImport::new("map", "lodash/map"),
                SyntheticImport::new("g", "lodash/get"),
            ]
        );
    }

    fn type_only(imported: &str, local: &str) -> ImportSpecifier {
        ImportSpecifier::Type {
            imported: Some(identifier(imported)),
            local: Some(identifier(local)),
        }
    }

    #[test]
    fn test_type_specifier_is_type_only() {
        assert_eq!(
            classify_specifier(&type_only("Dictionary", "Dictionary"), "lodash"),
            Classification::TypeOnly
        );
        assert_eq!(
            classify_specifier(&type_only("default", "Lodash"), "lodash"),
            Classification::TypeOnly
        );
    }

    #[test]
    fn test_classify_import_keeps_type_specifiers() {
        let decl = import_declaration(
            vec![
                type_only("Dictionary", "Dictionary"),
                named("get", "get"),
                type_only("List", "L"),
            ],
            string_literal("lodash"),
        );

        let mut state = SplitState::default();
        let retained = classify_import(&decl, &mut state).unwrap();

        assert_eq!(retained.source_value(), "lodash");
        assert_eq!(retained.raw, None);
        assert_eq!(
            retained.specifiers,
            vec![type_only("Dictionary", "Dictionary"), type_only("List", "L")]
        );
        let pending: Vec<_> = state.pending.iter().cloned().collect();
        assert_eq!(pending, vec![SyntheticImport::new("get", "lodash/get")]);
        assert!(state.table.is_empty());
    }
}
