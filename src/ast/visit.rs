//! Traversal driver for [`Program`] trees.
//!
//! A [`Visitor`] supplies callbacks for the node kinds it cares about and
//! an associated `State` value. The driver creates the state when it
//! enters the program, threads it through every callback, and hands it
//! back by value when it leaves, so nothing outlives a single traversal.

use super::nodes::{ImportDeclaration, MemberExpression, Node, Part, Program, Statement};

/// What to do with a visited import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitAction {
    Keep,
    Remove,
    /// Put another declaration in its place.
    Replace(ImportDeclaration),
}

/// Callbacks invoked by [`traverse`].
pub trait Visitor {
    /// Per-traversal state.
    type State;

    /// Called once before any statement is visited.
    fn enter_program(&self, program: &Program) -> Self::State;

    /// Called for every top-level import declaration, in source order.
    fn visit_import_declaration(
        &self,
        _decl: &ImportDeclaration,
        _state: &mut Self::State,
    ) -> VisitAction {
        VisitAction::Keep
    }

    /// Called for every `object.property` expression, outermost first.
    ///
    /// Returning a node replaces the whole expression; the replacement is
    /// then traversed in turn.
    fn visit_member_expression(
        &self,
        _expr: &MemberExpression,
        _state: &mut Self::State,
    ) -> Option<Node> {
        None
    }

    /// Called once after the last statement, with the final state.
    fn exit_program(&self, _program: &mut Program, _state: Self::State) {}
}

/// Walk a program in source order, applying the visitor's edits.
pub fn traverse<V: Visitor>(program: &mut Program, visitor: &V) {
    let mut state = visitor.enter_program(program);

    let body = std::mem::take(&mut program.body);
    let mut kept = Vec::with_capacity(body.len());

    for statement in body {
        match statement {
            Statement::Import(decl) => match visitor.visit_import_declaration(&decl, &mut state) {
                VisitAction::Keep => kept.push(Statement::Import(decl)),
                VisitAction::Remove => {}
                VisitAction::Replace(replacement) => kept.push(Statement::Import(replacement)),
            },
            Statement::Other(mut node) => {
                walk_node(&mut node, visitor, &mut state);
                kept.push(Statement::Other(node));
            }
        }
    }

    program.body = kept;
    visitor.exit_program(program, state);
}

fn walk_node<V: Visitor>(node: &mut Node, visitor: &V, state: &mut V::State) {
    let replacement = match node {
        Node::Member(expr) => visitor.visit_member_expression(expr, state),
        _ => None,
    };

    if let Some(replacement) = replacement {
        *node = replacement;
        walk_node(node, visitor, state);
        return;
    }

    match node {
        Node::Member(expr) => walk_node(&mut expr.object, visitor, state),
        Node::Syntax { parts, .. } => {
            for part in parts.iter_mut() {
                if let Part::Node(child) = part {
                    walk_node(child, visitor, state);
                }
            }
        }
        Node::Identifier(_) | Node::Token { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::{identifier, import_declaration, import_default_specifier, string_literal};
    use crate::ast::parse::{parse_module, SourceLanguage};
    use crate::ast::print::print_program;

    /// Records visit order and renames `obj.prop` to `obj_prop`.
    struct Recorder;

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        type State = Log;

        fn enter_program(&self, _program: &Program) -> Log {
            Log {
                events: vec!["enter".to_string()],
            }
        }

        fn visit_import_declaration(&self, decl: &ImportDeclaration, state: &mut Log) -> VisitAction {
            state.events.push(format!("import {}", decl.source_value()));
            match decl.source_value() {
                "drop-me" => VisitAction::Remove,
                "swap-me" => VisitAction::Replace(import_declaration(
                    vec![import_default_specifier(identifier("swapped"))],
                    string_literal("swapped"),
                )),
                _ => VisitAction::Keep,
            }
        }

        fn visit_member_expression(&self, expr: &MemberExpression, state: &mut Log) -> Option<Node> {
            state.events.push(format!("member .{}", expr.property.name));
            let object = expr.object_name()?;
            Some(Node::Identifier(identifier(format!(
                "{}_{}",
                object, expr.property.name
            ))))
        }

        fn exit_program(&self, program: &mut Program, mut state: Log) {
            state.events.push("exit".to_string());
            let summary = state.events.join(", ");
            program.body.insert(
                0,
                Statement::Other(Node::Token {
                    kind: "comment".to_string(),
                    text: format!("// {}", summary),
                }),
            );
        }
    }

    fn run(source: &str) -> String {
        let mut program = parse_module(source, SourceLanguage::JavaScript).unwrap();
        traverse(&mut program, &Recorder);
        print_program(&program)
    }

    #[test]
    fn test_removes_and_keeps_imports() {
        let output = run("import a from 'keep';\nimport b from 'drop-me';");
        assert_eq!(
            output,
            "// enter, import keep, import drop-me, exit\nimport a from 'keep';"
        );
    }

    #[test]
    fn test_replaces_imports_in_place() {
        let output = run("import a from 'swap-me';\nfoo();");
        assert_eq!(
            output,
            "// enter, import swap-me, exit\nimport swapped from \"swapped\";\nfoo();"
        );
    }

    #[test]
    fn test_replaces_member_expressions() {
        let output = run("x.y(1);");
        assert_eq!(output, "// enter, member .y, exit\nx_y(1);");
    }

    #[test]
    fn test_visits_outer_member_first() {
        // `a.b.c`: the outer access has no identifier object, so it is kept
        // and the walk descends into `a.b`.
        let output = run("a.b.c;");
        assert_eq!(output, "// enter, member .c, member .b, exit\na_b.c;");
    }

    #[test]
    fn test_state_is_fresh_per_traversal() {
        let first = run("import a from 'one';");
        let second = run("import b from 'two';");
        assert!(first.starts_with("// enter, import one, exit"));
        assert!(second.starts_with("// enter, import two, exit"));
    }

    #[test]
    fn test_default_visitor_changes_nothing() {
        struct Noop;
        impl Visitor for Noop {
            type State = ();
            fn enter_program(&self, _program: &Program) {}
        }

        let source = "import a from 'a';\nconst b = a.c;";
        let mut program = parse_module(source, SourceLanguage::JavaScript).unwrap();
        traverse(&mut program, &Noop);
        assert_eq!(print_program(&program), source);
    }
}
