//! Syntax tree types for ES modules.
//!
//! The tree only models what the import rewrite needs to see: top-level
//! import declarations, identifiers and `object.property` accesses. Every
//! other construct is kept as an opaque [`Node::Syntax`] that interleaves
//! the original source text with its child nodes, so untouched code prints
//! back exactly as it was written.

/// A parsed module: the ordered list of its top-level statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    /// Create a program from a list of statements.
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    /// Iterate over the import declarations of this program.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.body.iter().filter_map(|stmt| match stmt {
            Statement::Import(decl) => Some(decl),
            Statement::Other(_) => None,
        })
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// ES import declaration: `import ... from 'module'`
    Import(ImportDeclaration),
    /// Any other statement, comment or directive.
    Other(Node),
}

impl Statement {
    /// `#!/usr/bin/env node`
    pub fn is_hashbang(&self) -> bool {
        matches!(self, Statement::Other(node) if node.kind() == "hash_bang_line")
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Statement::Other(node) if node.kind() == "comment")
    }

    /// A directive prologue entry such as `"use strict";`: an expression
    /// statement made of a single string literal.
    pub fn is_directive(&self) -> bool {
        let Statement::Other(Node::Syntax { kind, parts }) = self else {
            return false;
        };
        if kind != "expression_statement" {
            return false;
        }

        let mut nodes = parts.iter().filter_map(|part| match part {
            Part::Node(node) => Some(node),
            Part::Text(_) => None,
        });
        let is_string = nodes.next().is_some_and(|node| node.kind() == "string");
        is_string && nodes.all(|node| matches!(node, Node::Token { text, .. } if text == ";"))
    }
}

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// The specifiers in source order. Empty for side-effect imports.
    pub specifiers: Vec<ImportSpecifier>,
    /// The module being imported from.
    pub source: StringLiteral,
    /// Original statement text. `None` for constructed declarations.
    pub raw: Option<String>,
}

impl ImportDeclaration {
    /// The module specifier string (without quotes).
    pub fn source_value(&self) -> &str {
        &self.source.value
    }
}

/// An individual specifier within an import declaration.
///
/// Names are optional because the parser may hand back incomplete
/// specifiers for unusual input; consumers skip what they cannot read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// Default import: `import foo from 'module'`
    Default { local: Option<Identifier> },
    /// Namespace import: `import * as foo from 'module'`
    Namespace { local: Option<Identifier> },
    /// Named import: `import { foo }` or `import { foo as bar }`
    Named {
        imported: Option<Identifier>,
        local: Option<Identifier>,
    },
    /// TypeScript inline type specifier: `import { type Foo }`
    Type {
        imported: Option<Identifier>,
        local: Option<Identifier>,
    },
}

impl ImportSpecifier {
    /// Returns the local name bound in the importing module.
    pub fn local_name(&self) -> Option<&str> {
        match self {
            ImportSpecifier::Default { local }
            | ImportSpecifier::Namespace { local }
            | ImportSpecifier::Named { local, .. }
            | ImportSpecifier::Type { local, .. } => local.as_ref().map(|id| id.name.as_str()),
        }
    }

    /// Returns the exported name being imported, if the specifier has one.
    pub fn imported_name(&self) -> Option<&str> {
        match self {
            ImportSpecifier::Named { imported, .. } | ImportSpecifier::Type { imported, .. } => {
                imported.as_ref().map(|id| id.name.as_str())
            }
            ImportSpecifier::Default { .. } | ImportSpecifier::Namespace { .. } => None,
        }
    }
}

/// A string literal. Only the cooked value is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
}

/// An identifier reference or binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

/// A non-computed property access: `object.property`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberExpression {
    pub object: Box<Node>,
    /// Source text between the object and the property, usually `.`
    pub operator: String,
    pub property: Identifier,
}

impl MemberExpression {
    /// The object's name when the object is a plain identifier, possibly
    /// wrapped in parentheses.
    pub fn object_name(&self) -> Option<&str> {
        self.object.as_identifier().map(|id| id.name.as_str())
    }
}

/// An expression-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Identifier(Identifier),
    Member(MemberExpression),
    /// Any other construct: original text interleaved with child nodes.
    Syntax { kind: String, parts: Vec<Part> },
    /// A leaf token kept verbatim.
    Token { kind: String, text: String },
}

impl Node {
    /// Tree-sitter node kind, or the kind a tree-sitter node would have.
    pub fn kind(&self) -> &str {
        match self {
            Node::Identifier(_) => "identifier",
            Node::Member(_) => "member_expression",
            Node::Syntax { kind, .. } | Node::Token { kind, .. } => kind,
        }
    }

    /// The identifier this node denotes, looking through parentheses:
    /// `_` and `((_))` both yield `_`.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Node::Identifier(id) => Some(id),
            Node::Syntax { kind, parts } if kind == "parenthesized_expression" => {
                let mut inner = None;
                for part in parts {
                    match part {
                        Part::Node(Node::Token { text, .. }) if text == "(" || text == ")" => {}
                        Part::Node(node) if inner.is_none() => inner = Some(node),
                        Part::Node(_) => return None,
                        Part::Text(_) => {}
                    }
                }
                inner?.as_identifier()
            }
            _ => None,
        }
    }
}

/// One piece of an opaque [`Node::Syntax`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Source text between child nodes (whitespace, punctuation).
    Text(String),
    Node(Node),
}

// ===== Construction primitives =====

/// Build an identifier.
pub fn identifier(name: impl Into<String>) -> Identifier {
    Identifier { name: name.into() }
}

/// Build a string literal.
pub fn string_literal(value: impl Into<String>) -> StringLiteral {
    StringLiteral {
        value: value.into(),
    }
}

/// Build a default import specifier binding `local`.
pub fn import_default_specifier(local: Identifier) -> ImportSpecifier {
    ImportSpecifier::Default { local: Some(local) }
}

/// Build an import declaration. Constructed declarations have no raw text
/// and are printed from their parts.
pub fn import_declaration(specifiers: Vec<ImportSpecifier>, source: StringLiteral) -> ImportDeclaration {
    ImportDeclaration {
        specifiers,
        source,
        raw: None,
    }
}

// ===== Structural predicates =====

/// `import foo from '...'`
pub fn is_import_default_specifier(specifier: &ImportSpecifier) -> bool {
    matches!(specifier, ImportSpecifier::Default { .. })
}

/// `import * as foo from '...'`
pub fn is_import_namespace_specifier(specifier: &ImportSpecifier) -> bool {
    matches!(specifier, ImportSpecifier::Namespace { .. })
}

/// `import { type Foo } from '...'`
pub fn is_import_type_specifier(specifier: &ImportSpecifier) -> bool {
    matches!(specifier, ImportSpecifier::Type { .. })
}

/// `import { foo } from '...'`
pub fn is_import_specifier(specifier: &ImportSpecifier) -> bool {
    matches!(specifier, ImportSpecifier::Named { .. })
}
