//! Syntax tree layer for barrelsplit.
//!
//! This module provides everything the import rewrite needs from a host
//! AST framework: parsing JavaScript/TypeScript modules with tree-sitter,
//! node construction primitives and predicates, a visitor-driven
//! traversal, and printing the tree back to source.
//!
//! # Example
//!
//! ```ignore
//! use barrelsplit::ast::{parse_module, print_program, SourceLanguage};
//!
//! let program = parse_module("import _ from 'lodash';", SourceLanguage::JavaScript)?;
//! assert_eq!(program.imports().count(), 1);
//! println!("{}", print_program(&program));
//! ```

pub mod nodes;
pub mod parse;
pub mod print;
pub mod visit;

// Re-export main types for convenience
pub use nodes::{
    identifier, import_declaration, import_default_specifier, is_import_default_specifier,
    is_import_namespace_specifier, is_import_specifier, is_import_type_specifier, string_literal, Identifier,
    ImportDeclaration, ImportSpecifier, MemberExpression, Node, Part, Program, Statement,
    StringLiteral,
};
pub use parse::{parse_module, ParseError, ParseResult, SourceLanguage, SourceParser};
pub use print::{print_program, print_statement};
pub use visit::{traverse, VisitAction, Visitor};
