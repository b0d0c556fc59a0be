//! Code generation for [`Program`] trees.
//!
//! Top-level statements are printed one per line. Parsed statements keep
//! their original text (with any rewritten sub-expressions substituted);
//! constructed import declarations are generated from their parts.

use std::fmt::Write;

use super::nodes::{ImportDeclaration, ImportSpecifier, Node, Part, Program, Statement};

/// Print a program back to source text.
pub fn print_program(program: &Program) -> String {
    program
        .body
        .iter()
        .map(print_statement)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a single top-level statement.
pub fn print_statement(statement: &Statement) -> String {
    match statement {
        Statement::Import(decl) => print_import(decl),
        Statement::Other(node) => {
            let mut out = String::new();
            write_node(&mut out, node);
            out
        }
    }
}

/// Print an import declaration, preferring its original text.
pub fn print_import(decl: &ImportDeclaration) -> String {
    if let Some(raw) = &decl.raw {
        return raw.clone();
    }

    let mut default = None;
    let mut namespace = None;
    let mut named = Vec::new();
    let type_only = !decl.specifiers.is_empty()
        && decl
            .specifiers
            .iter()
            .all(|spec| matches!(spec, ImportSpecifier::Type { .. }));

    for spec in &decl.specifiers {
        match spec {
            ImportSpecifier::Default { local } => default = local.as_ref().map(|id| id.name.as_str()),
            ImportSpecifier::Namespace { local } => {
                namespace = local.as_ref().map(|id| id.name.as_str())
            }
            ImportSpecifier::Named { imported, local } => {
                let (Some(imported), Some(local)) = (imported, local) else {
                    continue;
                };
                named.push(named_specifier(&imported.name, &local.name));
            }
            ImportSpecifier::Type { imported, local } => {
                let (Some(imported), Some(local)) = (imported, local) else {
                    continue;
                };
                let name = named_specifier(&imported.name, &local.name);
                if type_only {
                    named.push(name);
                } else {
                    named.push(format!("type {}", name));
                }
            }
        }
    }

    let mut clause = Vec::new();
    if let Some(name) = default {
        clause.push(name.to_string());
    }
    if let Some(name) = namespace {
        clause.push(format!("* as {}", name));
    }
    if !named.is_empty() {
        clause.push(format!("{{ {} }}", named.join(", ")));
    }

    let source = quote(&decl.source.value);
    if clause.is_empty() {
        format!("import {};", source)
    } else if type_only {
        format!("import type {} from {};", clause.join(", "), source)
    } else {
        format!("import {} from {};", clause.join(", "), source)
    }
}

fn named_specifier(imported: &str, local: &str) -> String {
    if imported == local {
        local.to_string()
    } else {
        format!("{} as {}", imported, local)
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Identifier(id) => out.push_str(&id.name),
        Node::Member(member) => {
            write_node(out, &member.object);
            out.push_str(&member.operator);
            out.push_str(&member.property.name);
        }
        Node::Syntax { parts, .. } => {
            for part in parts {
                match part {
                    Part::Text(text) => out.push_str(text),
                    Part::Node(child) => write_node(out, child),
                }
            }
        }
        Node::Token { text, .. } => out.push_str(text),
    }
}

/// Double-quote a string literal value.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::{
        identifier, import_declaration, import_default_specifier, string_literal,
    };
    use crate::ast::parse::{parse_module, SourceLanguage};

    #[test]
    fn test_print_constructed_default_import() {
        let decl = import_declaration(
            vec![import_default_specifier(identifier("get"))],
            string_literal("lodash/fp/get"),
        );
        assert_eq!(print_import(&decl), r#"import get from "lodash/fp/get";"#);
    }

    #[test]
    fn test_print_constructed_mixed_import() {
        let decl = import_declaration(
            vec![
                import_default_specifier(identifier("React")),
                ImportSpecifier::Named {
                    imported: Some(identifier("useState")),
                    local: Some(identifier("useState")),
                },
                ImportSpecifier::Named {
                    imported: Some(identifier("useEffect")),
                    local: Some(identifier("effect")),
                },
            ],
            string_literal("react"),
        );
        assert_eq!(
            print_import(&decl),
            r#"import React, { useState, useEffect as effect } from "react";"#
        );
    }

    #[test]
    fn test_print_constructed_type_import() {
        let dictionary = ImportSpecifier::Type {
            imported: Some(identifier("Dictionary")),
            local: Some(identifier("Dictionary")),
        };
        let list = ImportSpecifier::Type {
            imported: Some(identifier("List")),
            local: Some(identifier("L")),
        };

        let decl = import_declaration(vec![dictionary.clone(), list], string_literal("lodash"));
        assert_eq!(
            print_import(&decl),
            r#"import type { Dictionary, List as L } from "lodash";"#
        );

        let mixed = import_declaration(
            vec![
                dictionary,
                ImportSpecifier::Named {
                    imported: Some(identifier("get")),
                    local: Some(identifier("get")),
                },
            ],
            string_literal("lodash"),
        );
        assert_eq!(
            print_import(&mixed),
            r#"import { type Dictionary, get } from "lodash";"#
        );
    }

    #[test]
    fn test_print_side_effect_import() {
        let decl = import_declaration(vec![], string_literal("./styles.css"));
        assert_eq!(print_import(&decl), r#"import "./styles.css";"#);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_parsed_program_round_trips() {
        let source = "import test3 from 'other-library';\nconst test = foo.bar(value, { a: 1 });\nfunction f() {\n    return x?.y;\n}";
        let program = parse_module(source, SourceLanguage::JavaScript).unwrap();
        assert_eq!(print_program(&program), source);
    }

    #[test]
    fn test_statements_are_joined_by_newlines() {
        let source = "\n    const a = 1;\n    const b = 2;\n";
        let program = parse_module(source, SourceLanguage::JavaScript).unwrap();
        assert_eq!(print_program(&program), "const a = 1;\nconst b = 2;");
    }
}
