/*
 * GRD003 - Payload read inside a sequence projection
 *
 * `results.Select(r => r.Value)` is only safe when an earlier stage of the
 * same chain filtered the elements, e.g. `.Where(r => r.IsSuccess)`.
 * Element-preserving stages between the filter and the projection are
 * scanned through; any other stage ends the scan.
 */

use tracing::trace;

use crate::features::diagnostics::domain::{Diagnostic, DiagnosticDescriptor, PROJECTION};
use crate::features::diagnostics::ports::DiagnosticDriver;
use crate::features::guard_analysis::application::use_sites::{payload_use_site, projection_parameter};
use crate::features::guard_analysis::domain::Branch;
use crate::features::guard_analysis::AnalysisContext;
use crate::features::type_classifier::WrapperState;
use crate::shared::models::{NodeId, NodeKind, SyntaxKind};
use crate::shared::utils::render_expression;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionDriver;

impl ProjectionDriver {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticDriver for ProjectionDriver {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &PROJECTION
    }

    fn subscribed_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MemberAccess, SyntaxKind::MemberBinding]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Option<Diagnostic> {
        let site = payload_use_site(ctx, node)?;
        let (call, _lambda) = projection_parameter(ctx, site.receiver)?;

        // Guards written inside the projection lambda itself
        if ctx.walker().is_guarded_for_access(&site) {
            return None;
        }
        if filtered_upstream(ctx, call.receiver, site.required_state) {
            return None;
        }

        let family = ctx.family(site.family)?;
        let tree = ctx.tree;
        Some(Diagnostic::new(
            &PROJECTION,
            tree.file_path(),
            node,
            tree.span(node),
            vec![
                site.member.clone(),
                render_expression(tree, site.receiver),
                call.method.to_string(),
                family.discriminant_for(site.required_state).to_string(),
            ],
        ))
    }

    fn name(&self) -> &'static str {
        "projection"
    }
}

/// Scan the chain feeding a projection for a filter proving `state`
fn filtered_upstream(ctx: &AnalysisContext<'_>, source: NodeId, state: WrapperState) -> bool {
    let tree = ctx.tree;
    let pipeline = &ctx.config.pipeline;
    let mut current = tree.strip_parens(source);

    while let Some(call) = ctx.member_call(current) {
        if pipeline.is_filter(call.method) {
            if call.args.iter().any(|a| filter_proves(ctx, a.value, state)) {
                trace!(filter = call.invocation, "projection filtered upstream");
                return true;
            }
        } else if !pipeline.is_passthrough(call.method) {
            return false;
        }
        current = tree.strip_parens(call.receiver);
    }
    false
}

/// `x => x.IsSuccess` (or any recognized shape over `x`) proving `state`
/// whenever the predicate returns true
fn filter_proves(ctx: &AnalysisContext<'_>, lambda: NodeId, state: WrapperState) -> bool {
    let tree = ctx.tree;
    let NodeKind::Lambda { params, body, .. } = tree.kind(lambda) else {
        return false;
    };
    let Some(&param) = params.first() else {
        return false;
    };
    if tree.kind(*body).is_statement() {
        return false;
    }

    ctx.recognizer().extract(*body, None).iter().any(|f| {
        f.branch == Branch::Then
            && f.fact.implied_state() == Some(state)
            && ctx.same_symbol(tree.strip_parens(f.fact.subject), param)
    })
}
