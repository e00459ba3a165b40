//! Guard Chain Walker
//!
//! Ascends from a use site through its enclosing constructs, pairing each
//! ancestor with the child the ascent came from. Per ancestor:
//!
//! - `if`, `?:`, `&&`, `||`: recognizer facts on the receiver plus the
//!   branch resolver
//! - `s?.…` on the receiver's location: safe
//! - lambda: safe when it is a callback of a dispatch call or combinator on
//!   the receiver that runs in the required state; otherwise the ascent
//!   stops (or continues when lambda boundaries may be crossed)
//! - method / compilation unit: stop
//!
//! The walk keeps its state in locals and never fails: a miss is simply
//! "not proven".

use tracing::trace;

use crate::features::guard_analysis::domain::{Predicate, UseSite};
use crate::features::type_classifier::WrapperState;
use crate::shared::models::{BinaryOp, NodeId, NodeKind};

use super::context::AnalysisContext;
use super::reachability;

/// Decision at one ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Safe,
    Stop,
    Continue,
}

#[derive(Clone, Copy)]
pub struct GuardWalker<'a> {
    ctx: AnalysisContext<'a>,
}

impl<'a> GuardWalker<'a> {
    pub fn new(ctx: AnalysisContext<'a>) -> Self {
        Self { ctx }
    }

    /// Whether `site` is only reached when `predicate` has value `truth`
    pub fn is_guarded(&self, site: &UseSite, predicate: Predicate, truth: bool) -> bool {
        let Some(required) = predicate.implied_state(truth) else {
            return false;
        };

        let mut child = site.node;
        for ancestor in self.ctx.tree.ancestors(site.node) {
            match self.step(site, required, child, ancestor) {
                Step::Safe => {
                    trace!(node = site.node, guard = ancestor, "use site guarded");
                    return true;
                }
                Step::Stop => {
                    trace!(node = site.node, boundary = ancestor, "ascent stopped");
                    return false;
                }
                Step::Continue => child = ancestor,
            }
        }
        false
    }

    /// Whether `site` is only reached in its required state
    pub fn is_guarded_for_access(&self, site: &UseSite) -> bool {
        self.is_guarded(site, Predicate::discriminant(site.required_state), true)
    }

    fn step(&self, site: &UseSite, required: WrapperState, child: NodeId, ancestor: NodeId) -> Step {
        match self.ctx.tree.kind(ancestor) {
            NodeKind::If { .. }
            | NodeKind::Conditional { .. }
            | NodeKind::Binary {
                op: BinaryOp::And | BinaryOp::Or,
                ..
            } => {
                if self.branch_proves(site, required, ancestor) {
                    Step::Safe
                } else {
                    Step::Continue
                }
            }

            NodeKind::ConditionalAccess {
                receiver,
                when_not_null,
            } => {
                // `s?.Value` and reads bound under `s?.` are safe, including the
                // use site's own conditional access
                if child == *when_not_null
                    && (*receiver == site.receiver
                        || self.ctx.same_location(*receiver, site.receiver))
                {
                    Step::Safe
                } else {
                    Step::Continue
                }
            }

            NodeKind::Lambda { .. } => self.lambda_step(site, required, ancestor),

            NodeKind::Method { .. } | NodeKind::CompilationUnit { .. } => Step::Stop,

            _ => Step::Continue,
        }
    }

    fn branch_proves(&self, site: &UseSite, required: WrapperState, conditional: NodeId) -> bool {
        let Some(condition) = reachability::condition_of(self.ctx.tree, conditional) else {
            return false;
        };
        self.ctx
            .recognizer()
            .extract(condition, Some(site.receiver))
            .iter()
            .any(|f| {
                f.fact.implied_state() == Some(required)
                    && reachability::reachable_under(self.ctx.tree, site.node, conditional, f.branch)
            })
    }

    fn lambda_step(&self, site: &UseSite, required: WrapperState, lambda: NodeId) -> Step {
        if let Some((call, position)) = self.ctx.call_taking_lambda(lambda) {
            let contexts = &self.ctx.config.call_contexts;
            let state = if contexts.is_dispatch(call.method) {
                let name = call.args[position].name.as_deref();
                contexts.dispatch_state(name, position)
            } else {
                contexts.combinator_state(call.method)
            };

            if state == Some(required) && self.ctx.same_location(call.receiver, site.receiver) {
                return Step::Safe;
            }
        }

        if self.ctx.config.analysis.cross_lambda_boundaries {
            Step::Continue
        } else {
            Step::Stop
        }
    }
}
