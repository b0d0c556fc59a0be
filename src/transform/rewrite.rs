//! Rewriting of member accesses on namespace handles.

use tracing::debug;

use super::emit::SyntheticImport;
use super::SplitState;
use crate::ast::{identifier, MemberExpression, Node};

/// Rewrite `handle.property` when `handle` is a registered namespace
/// binding.
///
/// On a hit a synthetic import is queued and the identifier that should
/// replace the whole expression is returned. Every hit queues its own
/// import, even for a property already seen.
pub fn rewrite_member_expression(expr: &MemberExpression, state: &mut SplitState) -> Option<Node> {
    let object = expr.object_name()?;
    let binding = state.table.resolve(object)?;

    let import = SyntheticImport::for_member(&binding.source_module, &expr.property.name);
    debug!(
        object,
        property = %expr.property.name,
        specifier = %import.specifier_name,
        "rewriting member access"
    );

    let replacement = Node::Identifier(identifier(import.specifier_name.clone()));
    state.pending.push(import);
    Some(replacement)
}
