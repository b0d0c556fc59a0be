//! Barrel import splitting.
//!
//! Rewrites whole-library imports of watched modules into per-function
//! default imports so bundlers can drop the members a module never uses:
//!
//! ```text
//! import _ from "lodash";              import lodash_map from "lodash/map";
//! import { get } from "lodash/fp";  => import get from "lodash/fp/get";
//! const a = _.map(xs, f);              const a = lodash_map(xs, f);
//! ```
//!
//! Named imports are rewritten as soon as their declaration is seen.
//! Default, namespace and `{ default as x }` imports register a binding;
//! each later `x.member` access queues its own import and is replaced by
//! a reference to it. Queued imports are inserted at the top of the module
//! once the traversal finishes, after any hashbang line and directive
//! prologue (`"use strict";`, `"use client";`).
//!
//! TypeScript `type` specifiers have no runtime value and stay behind on an
//! `import type { ... }` declaration from the original module.

pub mod classify;
pub mod emit;
pub mod rewrite;
pub mod table;

use tracing::debug;

use crate::ast::{
    parse_module, print_program, traverse, ImportDeclaration, MemberExpression, Node, ParseResult,
    Program, SourceLanguage, VisitAction, Visitor,
};
use crate::config::WatchedModules;

pub use classify::{classify_import, classify_specifier, Classification};
pub use emit::{PendingImports, SyntheticImport};
pub use rewrite::rewrite_member_expression;
pub use table::{ImportBinding, ImportTable};

/// State owned by a single traversal.
#[derive(Debug, Default)]
pub struct SplitState {
    pub table: ImportTable,
    pub pending: PendingImports,
}

/// The import-splitting visitor.
///
/// Holds configuration only; all mutable state lives in a [`SplitState`]
/// created per traversal, so one `SplitImports` can serve any number of
/// modules, concurrently or not.
#[derive(Debug, Clone, Default)]
pub struct SplitImports {
    watched: WatchedModules,
}

impl SplitImports {
    pub fn new(watched: WatchedModules) -> Self {
        Self { watched }
    }
}

impl Visitor for SplitImports {
    type State = SplitState;

    fn enter_program(&self, _program: &Program) -> SplitState {
        SplitState::default()
    }

    fn visit_import_declaration(
        &self,
        decl: &ImportDeclaration,
        state: &mut SplitState,
    ) -> VisitAction {
        if !self.watched.contains(decl.source_value()) {
            return VisitAction::Keep;
        }

        match classify_import(decl, state) {
            Some(types) => VisitAction::Replace(types),
            None => VisitAction::Remove,
        }
    }

    fn visit_member_expression(
        &self,
        expr: &MemberExpression,
        state: &mut SplitState,
    ) -> Option<Node> {
        rewrite_member_expression(expr, state)
    }

    fn exit_program(&self, program: &mut Program, state: SplitState) {
        if state.pending.is_empty() {
            return;
        }

        let at = prologue_end(program);
        debug!(count = state.pending.len(), at, "inserting synthetic imports");
        let rest = program.body.split_off(at);
        program.body.extend(state.pending.into_statements());
        program.body.extend(rest);
    }
}

/// Index of the first statement after the hashbang line and directive
/// prologue. Comments inside the prologue are skipped over.
fn prologue_end(program: &Program) -> usize {
    let mut end = 0;
    for (index, statement) in program.body.iter().enumerate() {
        if statement.is_hashbang() || statement.is_directive() {
            end = index + 1;
        } else if !statement.is_comment() {
            break;
        }
    }
    end
}

/// Run the rewrite over a parsed program in place.
pub fn transform_program(program: &mut Program, visitor: &SplitImports) {
    traverse(program, visitor);
}

/// Parse, rewrite and print a module.
pub fn transform_source(
    source: &str,
    language: SourceLanguage,
    watched: &WatchedModules,
) -> ParseResult<String> {
    let mut program = parse_module(source, language)?;
    transform_program(&mut program, &SplitImports::new(watched.clone()));
    Ok(print_program(&program))
}
