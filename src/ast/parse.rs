//! Tree-sitter front end for JavaScript/TypeScript modules.
//!
//! Converts a tree-sitter concrete syntax tree into the owned [`Program`]
//! representation that the rewrite operates on.

use thiserror::Error;
use tree_sitter::{Language, Parser};

use super::nodes::{
    identifier, string_literal, Identifier, ImportDeclaration, ImportSpecifier, MemberExpression,
    Node, Part, Program, Statement,
};

/// Errors that can occur while parsing a module.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    #[error("Parser returned no syntax tree")]
    NoTree,

    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Language type for source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Get tree-sitter language for this source language.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parser holding one tree-sitter parser per grammar.
///
/// Tree-sitter parsers are stateful, so a `SourceParser` is meant to be
/// owned by a single thread and reused across files.
pub struct SourceParser {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl SourceParser {
    /// Create a new SourceParser.
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            js_parser: new_parser(SourceLanguage::JavaScript)?,
            ts_parser: new_parser(SourceLanguage::TypeScript)?,
            tsx_parser: new_parser(SourceLanguage::Tsx)?,
        })
    }

    /// Parse module source into a [`Program`].
    ///
    /// Input with syntax errors is rejected rather than partially
    /// converted.
    pub fn parse(&mut self, source: &str, language: SourceLanguage) -> ParseResult<Program> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if let Some(error) = first_error(root) {
            let position = error.start_position();
            return Err(ParseError::Syntax {
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        let mut cursor = root.walk();
        let body = root
            .children(&mut cursor)
            .map(|child| convert_statement(child, source))
            .collect();

        Ok(Program::new(body))
    }
}

/// Parse a single module with a throwaway parser.
pub fn parse_module(source: &str, language: SourceLanguage) -> ParseResult<Program> {
    SourceParser::new()?.parse(source, language)
}

fn new_parser(language: SourceLanguage) -> ParseResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|_| ParseError::LanguageInit)?;
    Ok(parser)
}

/// Locate the first error or missing node, depth first.
fn first_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(error) = first_error(child) {
            return Some(error);
        }
    }
    None
}

fn convert_statement(node: tree_sitter::Node<'_>, source: &str) -> Statement {
    if node.kind() == "import_statement" {
        if let Some(decl) = parse_import(node, source) {
            return Statement::Import(decl);
        }
    }
    Statement::Other(convert_node(node, source))
}

/// Parse an ES import statement.
///
/// TypeScript `import type` and `import x = require(...)` forms are not
/// ES import declarations and yield `None`.
fn parse_import(node: tree_sitter::Node<'_>, source: &str) -> Option<ImportDeclaration> {
    let mut specifiers = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "type" | "typeof" | "import_require_clause" => return None,
            "import_clause" => parse_import_clause(child, source, &mut specifiers),
            _ => {}
        }
    }

    let module = node.child_by_field_name("source")?;

    Some(ImportDeclaration {
        specifiers,
        source: string_literal(string_value(module, source)),
        raw: Some(node_text(node, source).to_string()),
    })
}

/// Parse the import clause (everything between 'import' and 'from').
fn parse_import_clause(
    node: tree_sitter::Node<'_>,
    source: &str,
    specifiers: &mut Vec<ImportSpecifier>,
) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => specifiers.push(ImportSpecifier::Default {
                local: Some(identifier(node_text(child, source))),
            }),
            "namespace_import" => specifiers.push(ImportSpecifier::Namespace {
                local: find_identifier(child, source),
            }),
            "named_imports" => {
                let mut named_cursor = child.walk();
                for spec in child.children(&mut named_cursor) {
                    if spec.kind() == "import_specifier" {
                        specifiers.push(parse_import_specifier(spec, source));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Find the local name in a namespace import (import * as NAME).
fn find_identifier(node: tree_sitter::Node<'_>, source: &str) -> Option<Identifier> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| child.kind() == "identifier")
        .map(|child| identifier(node_text(child, source)));
    found
}

/// Parse a single import specifier: `foo`, `foo as bar`, `"foo" as bar`
/// or the TypeScript `type Foo`.
fn parse_import_specifier(node: tree_sitter::Node<'_>, source: &str) -> ImportSpecifier {
    let name = node.child_by_field_name("name");
    let alias = node.child_by_field_name("alias");

    let mut cursor = node.walk();
    let type_only = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && matches!(child.kind(), "type" | "typeof"));

    let imported = match name {
        Some(n) if n.kind() == "string" => Some(identifier(string_value(n, source))),
        Some(n) => Some(identifier(node_text(n, source))),
        // Older grammars leave `default` in `{ default as x }` as a bare keyword.
        None => {
            let mut cursor = node.walk();
            let keyword = node
                .children(&mut cursor)
                .any(|child| child.kind() == "default");
            keyword.then(|| identifier("default"))
        }
    };

    // A string export name can only be bound through an alias.
    let local = match alias {
        Some(alias) => Some(identifier(node_text(alias, source))),
        None => name
            .filter(|n| n.kind() != "string")
            .map(|n| identifier(node_text(n, source))),
    };

    if type_only {
        ImportSpecifier::Type { imported, local }
    } else {
        ImportSpecifier::Named { imported, local }
    }
}

/// Convert an arbitrary node into the opaque expression tree.
fn convert_node(node: tree_sitter::Node<'_>, source: &str) -> Node {
    match node.kind() {
        "identifier" => return Node::Identifier(identifier(node_text(node, source))),
        "member_expression" => {
            if let Some(member) = convert_member(node, source) {
                return Node::Member(member);
            }
        }
        _ => {}
    }

    if node.child_count() == 0 {
        return Node::Token {
            kind: node.kind().to_string(),
            text: node_text(node, source).to_string(),
        };
    }

    let mut parts = Vec::new();
    let mut offset = node.start_byte();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        push_gap(&mut parts, source, offset, child.start_byte());
        parts.push(Part::Node(convert_node(child, source)));
        offset = child.end_byte();
    }
    push_gap(&mut parts, source, offset, node.end_byte());

    Node::Syntax {
        kind: node.kind().to_string(),
        parts,
    }
}

/// Convert `object.property`. Optional chains and private or computed
/// properties stay opaque.
fn convert_member(node: tree_sitter::Node<'_>, source: &str) -> Option<MemberExpression> {
    let object = node.child_by_field_name("object")?;
    let property = node.child_by_field_name("property")?;

    if property.kind() != "property_identifier" {
        return None;
    }

    let operator = source.get(object.end_byte()..property.start_byte())?;
    if operator.contains("?.") {
        return None;
    }

    Some(MemberExpression {
        object: Box::new(convert_node(object, source)),
        operator: operator.to_string(),
        property: identifier(node_text(property, source)),
    })
}

fn push_gap(parts: &mut Vec<Part>, source: &str, start: usize, end: usize) {
    if let Some(text) = source.get(start..end).filter(|t| !t.is_empty()) {
        parts.push(Part::Text(text.to_string()));
    }
}

/// Extract the text content of a node.
fn node_text<'a>(node: tree_sitter::Node<'_>, source: &'a str) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or_default()
}

/// Extract string value (removes the surrounding quotes).
fn string_value(node: tree_sitter::Node<'_>, source: &str) -> String {
    let text = node_text(node, source);
    let inner = text
        .strip_prefix(['"', '\''])
        .and_then(|t| t.strip_suffix(['"', '\'']))
        .unwrap_or(text);
    inner.to_string()
}
