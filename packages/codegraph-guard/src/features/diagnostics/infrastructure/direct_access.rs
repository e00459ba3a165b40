/*
 * GRD001 - Direct payload access
 *
 * `r.Value` / `r.Error` read without a proof of the state the accessor
 * needs. `r?.Value` is always safe.
 */

use crate::features::diagnostics::domain::{Diagnostic, DiagnosticDescriptor, DIRECT_ACCESS};
use crate::features::diagnostics::ports::DiagnosticDriver;
use crate::features::guard_analysis::application::use_sites::{payload_use_site, projection_parameter};
use crate::features::guard_analysis::AnalysisContext;
use crate::shared::models::{NodeId, SyntaxKind};
use crate::shared::utils::render_expression;

#[derive(Debug, Default, Clone, Copy)]
pub struct DirectAccessDriver;

impl DirectAccessDriver {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticDriver for DirectAccessDriver {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &DIRECT_ACCESS
    }

    fn subscribed_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MemberAccess, SyntaxKind::MemberBinding]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Option<Diagnostic> {
        let site = payload_use_site(ctx, node)?;

        if is_non_throwing_factory_call(ctx, site.receiver) {
            return None;
        }
        // Projection parameters are reported by GRD003
        if projection_parameter(ctx, site.receiver).is_some() {
            return None;
        }
        if ctx.walker().is_guarded_for_access(&site) {
            return None;
        }

        let family = ctx.family(site.family)?;
        let tree = ctx.tree;
        Some(Diagnostic::new(
            &DIRECT_ACCESS,
            tree.file_path(),
            node,
            tree.span(node),
            vec![
                site.member.clone(),
                render_expression(tree, site.receiver),
                family.discriminant_for(site.required_state).to_string(),
            ],
        ))
    }

    fn name(&self) -> &'static str {
        "direct-access"
    }
}

/// `Email.TryCreate(x)`: a configured factory whose wrapper result is read
/// in place. The receiver type does not matter; `payload_use_site` already
/// required the call to produce a wrapper.
fn is_non_throwing_factory_call(ctx: &AnalysisContext<'_>, receiver: NodeId) -> bool {
    ctx.member_call(ctx.tree.strip_parens(receiver))
        .map(|call| ctx.config.is_non_throwing_factory(call.method))
        .unwrap_or(false)
}
