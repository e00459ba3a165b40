//! Locating use sites and the lambdas around them

use crate::features::guard_analysis::domain::UseSite;
use crate::features::type_classifier::AccessorRole;
use crate::shared::models::{NodeId, NodeKind, SyntaxTree};

use super::context::{AnalysisContext, MemberCall};

/// Use site for a payload read at `node` (`s.Value`, `s?.Value`)
pub fn payload_use_site(ctx: &AnalysisContext<'_>, node: NodeId) -> Option<UseSite> {
    let tree = ctx.tree;
    let (receiver, member) = match tree.kind(node) {
        NodeKind::MemberAccess { receiver, member } => (*receiver, member.as_str()),
        NodeKind::MemberBinding { member } => (binding_receiver(tree, node)?, member.as_str()),
        _ => return None,
    };

    let family = ctx.wrapper_family(receiver)?;
    let required_state = match ctx.accessor_role(family, member)? {
        AccessorRole::Payload(state) => state,
        _ => return None,
    };

    Some(UseSite {
        node,
        member: member.to_string(),
        receiver,
        family,
        required_state,
    })
}

/// Receiver a `.member` binding reads from: the nearest conditional access
/// whose null-guarded part contains it
pub fn binding_receiver(tree: &SyntaxTree, binding: NodeId) -> Option<NodeId> {
    tree.ancestors(binding)
        .into_iter()
        .find_map(|ancestor| match tree.kind(ancestor) {
            NodeKind::ConditionalAccess {
                receiver,
                when_not_null,
            } if tree.is_within(binding, *when_not_null) => Some(*receiver),
            _ => None,
        })
}

/// `(lambda, index)` when `expr` names a parameter of an enclosing lambda
pub fn lambda_parameter(ctx: &AnalysisContext<'_>, expr: NodeId) -> Option<(NodeId, usize)> {
    let tree = ctx.tree;
    let expr = tree.strip_parens(expr);
    if !matches!(tree.kind(expr), NodeKind::Identifier { .. }) {
        return None;
    }

    tree.ancestors(expr)
        .into_iter()
        .find_map(|ancestor| match tree.kind(ancestor) {
            NodeKind::Lambda { params, .. } => params
                .iter()
                .position(|&p| ctx.same_symbol(p, expr))
                .map(|index| (ancestor, index)),
            _ => None,
        })
}

/// Projection call (`seq.Select(x => …)`) whose element parameter is `expr`
pub fn projection_parameter<'a>(
    ctx: &AnalysisContext<'a>,
    expr: NodeId,
) -> Option<(MemberCall<'a>, NodeId)> {
    let (lambda, index) = lambda_parameter(ctx, expr)?;
    if index != 0 {
        return None;
    }
    let (call, _) = ctx.call_taking_lambda(lambda)?;
    if ctx.config.pipeline.is_projection(call.method) {
        Some((call, lambda))
    } else {
        None
    }
}
