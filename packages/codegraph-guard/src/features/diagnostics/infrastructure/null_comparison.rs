/*
 * GRD004 - Null comparison of a wrapper value
 *
 * Wrapper values are structs in the host language; `r == null` never
 * reads their state. Reported regardless of surrounding guards. Values of
 * an asynchronous wrapper (`Task<Result<T>>`) can be null and are left
 * alone.
 */

use crate::features::diagnostics::domain::{Diagnostic, DiagnosticDescriptor, NULL_COMPARISON};
use crate::features::diagnostics::ports::DiagnosticDriver;
use crate::features::guard_analysis::AnalysisContext;
use crate::features::type_classifier::WrapperState;
use crate::shared::models::{BinaryOp, Literal, NodeId, NodeKind, Pattern, SyntaxKind};
use crate::shared::utils::render_expression;

#[derive(Debug, Default, Clone, Copy)]
pub struct NullComparisonDriver;

impl NullComparisonDriver {
    pub fn new() -> Self {
        Self
    }

    /// `(operand, compares_equal)` for the four null-test forms
    fn null_test(ctx: &AnalysisContext<'_>, node: NodeId) -> Option<(NodeId, bool)> {
        let tree = ctx.tree;
        let is_null = |id: NodeId| {
            matches!(
                tree.kind(tree.strip_parens(id)),
                NodeKind::Literal {
                    value: Literal::Null
                }
            )
        };

        match tree.kind(node) {
            NodeKind::Binary { op, left, right } => {
                let equal = match op {
                    BinaryOp::Eq => true,
                    BinaryOp::NotEq => false,
                    _ => return None,
                };
                match (is_null(*left), is_null(*right)) {
                    (false, true) => Some((*left, equal)),
                    (true, false) => Some((*right, equal)),
                    _ => None,
                }
            }
            NodeKind::IsPattern {
                operand,
                pattern: Pattern::Null,
            } => Some((*operand, true)),
            NodeKind::IsPattern {
                operand,
                pattern: Pattern::NotNull,
            } => Some((*operand, false)),
            _ => None,
        }
    }
}

impl DiagnosticDriver for NullComparisonDriver {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &NULL_COMPARISON
    }

    fn subscribed_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Binary, SyntaxKind::IsPattern]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Option<Diagnostic> {
        let (operand, equal) = Self::null_test(ctx, node)?;
        let family_id = ctx.classify(ctx.tree.strip_parens(operand)).wrapper_family()?;
        let family = ctx.family(family_id)?;

        // `r == null` means "no value": suggest the not-ok discriminant
        let suggested = if equal {
            WrapperState::NotOk
        } else {
            WrapperState::Ok
        };

        let tree = ctx.tree;
        Some(Diagnostic::new(
            &NULL_COMPARISON,
            tree.file_path(),
            node,
            tree.span(node),
            vec![
                render_expression(tree, node),
                format!("{} value", family.name),
                family.discriminant_for(suggested).to_string(),
            ],
        ))
    }

    fn name(&self) -> &'static str {
        "null-comparison"
    }
}
