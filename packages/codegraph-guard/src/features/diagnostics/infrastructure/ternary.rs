/*
 * GRD002 - Ternary over a wrapper payload
 *
 * `r.IsSuccess ? r.Value : fallback` and its negated forms. Reported even
 * when correctly guarded: the whole expression is `GetValueOrDefault`.
 */

use crate::features::diagnostics::domain::{Diagnostic, DiagnosticDescriptor, TERNARY};
use crate::features::diagnostics::ports::DiagnosticDriver;
use crate::features::guard_analysis::domain::{Branch, GuardShape};
use crate::features::guard_analysis::AnalysisContext;
use crate::features::type_classifier::WrapperState;
use crate::shared::models::{NodeId, NodeKind, SyntaxKind};
use crate::shared::utils::render_expression;

#[derive(Debug, Default, Clone, Copy)]
pub struct TernaryDriver;

impl TernaryDriver {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticDriver for TernaryDriver {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &TERNARY
    }

    fn subscribed_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Conditional]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Option<Diagnostic> {
        let tree = ctx.tree;
        let NodeKind::Conditional {
            condition,
            when_true,
            when_false,
        } = tree.kind(node)
        else {
            return None;
        };

        let recognizer = ctx.recognizer();
        let shape = recognizer.shape(*condition);
        let subject = match shape {
            GuardShape::Discriminant { subject, .. }
            | GuardShape::NegatedDiscriminant { subject, .. }
            | GuardShape::LiteralComparison { subject, .. } => subject,
            _ => return None,
        };

        // Branch in which the subject is ok
        let ok_branch = shape
            .branch_facts()
            .into_iter()
            .find(|f| f.fact.implied_state() == Some(WrapperState::Ok))
            .map(|f| f.branch)?;
        let (payload_expr, fallback) = match ok_branch {
            Branch::Then => (*when_true, *when_false),
            Branch::Else => (*when_false, *when_true),
        };

        let NodeKind::MemberAccess { receiver, member } = tree.kind(tree.strip_parens(payload_expr))
        else {
            return None;
        };
        let family = ctx.family(ctx.wrapper_family(subject)?)?;
        if family.payload_for(WrapperState::Ok) != Some(member.as_str())
            || !ctx.same_location(*receiver, subject)
        {
            return None;
        }

        Some(Diagnostic::new(
            &TERNARY,
            tree.file_path(),
            node,
            tree.span(node),
            vec![
                render_expression(tree, node),
                render_expression(tree, subject),
                render_expression(tree, fallback),
            ],
        ))
    }

    fn name(&self) -> &'static str {
        "ternary"
    }
}
