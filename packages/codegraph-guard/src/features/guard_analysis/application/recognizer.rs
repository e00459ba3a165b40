//! Guard Predicate Recognizer
//!
//! Turns a boolean condition into a `GuardShape` and then into facts.
//! Parentheses are transparent. A discriminant read is `s.P` or `s?.P`
//! where `s` is a recognized wrapper and `P` one of its discriminants;
//! anything the recognizer cannot prove yields no facts.

use crate::features::guard_analysis::domain::{BranchFact, GuardShape};
use crate::features::type_classifier::{AccessorRole, WrapperState};
use crate::shared::models::{BinaryOp, Literal, NodeId, NodeKind, UnaryOp};

use super::context::AnalysisContext;

#[derive(Clone, Copy)]
pub struct GuardRecognizer<'a> {
    ctx: AnalysisContext<'a>,
}

impl<'a> GuardRecognizer<'a> {
    pub fn new(ctx: AnalysisContext<'a>) -> Self {
        Self { ctx }
    }

    /// Facts of `condition`, restricted to `subject_hint`'s location when
    /// given
    pub fn extract(&self, condition: NodeId, subject_hint: Option<NodeId>) -> Vec<BranchFact> {
        let facts = self.shape(condition).branch_facts();
        match subject_hint {
            Some(hint) => facts
                .into_iter()
                .filter(|f| self.ctx.same_location(f.fact.subject, hint))
                .collect(),
            None => facts,
        }
    }

    /// Classify a condition into one of the closed guard shapes
    pub fn shape(&self, condition: NodeId) -> GuardShape {
        let tree = self.ctx.tree;
        let condition = tree.strip_parens(condition);

        match tree.kind(condition) {
            NodeKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => self.shape(*operand).negate(),

            NodeKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => compound(self.shape(*left), self.shape(*right), GuardShape::Conjunction),

            NodeKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => compound(self.shape(*left), self.shape(*right), GuardShape::Disjunction),

            NodeKind::Binary {
                op: op @ (BinaryOp::Eq | BinaryOp::NotEq),
                left,
                right,
            } => self.literal_comparison(*op, *left, *right),

            NodeKind::IsPattern {
                operand,
                pattern: crate::shared::models::Pattern::Literal(Literal::Bool(value)),
            } => match self.discriminant(*operand) {
                Some((subject, state)) => GuardShape::LiteralComparison {
                    subject,
                    state,
                    expected: *value,
                },
                None => GuardShape::Unrecognized,
            },

            NodeKind::Invocation { .. } => self.try_accessor(condition),

            _ => match self.discriminant(condition) {
                Some((subject, state)) => GuardShape::Discriminant { subject, state },
                None => GuardShape::Unrecognized,
            },
        }
    }

    /// `s.P == true` with the literal on either side
    fn literal_comparison(&self, op: BinaryOp, left: NodeId, right: NodeId) -> GuardShape {
        let tree = self.ctx.tree;
        let bool_literal = |id: NodeId| match tree.kind(tree.strip_parens(id)) {
            NodeKind::Literal {
                value: Literal::Bool(b),
            } => Some(*b),
            _ => None,
        };

        let (operand, literal) = match (bool_literal(left), bool_literal(right)) {
            (None, Some(lit)) => (left, lit),
            (Some(lit), None) => (right, lit),
            _ => return GuardShape::Unrecognized,
        };

        match self.discriminant(operand) {
            Some((subject, state)) => GuardShape::LiteralComparison {
                subject,
                state,
                expected: literal != (op == BinaryOp::NotEq),
            },
            None => GuardShape::Unrecognized,
        }
    }

    /// `s.TryGetValue(out var x)`
    fn try_accessor(&self, invocation: NodeId) -> GuardShape {
        let Some(call) = self.ctx.member_call(invocation) else {
            return GuardShape::Unrecognized;
        };
        let Some(family) = self.ctx.wrapper_family(call.receiver) else {
            return GuardShape::Unrecognized;
        };
        match self.ctx.accessor_role(family, call.method) {
            Some(AccessorRole::TryAccessor(state)) => {
                let tree = self.ctx.tree;
                let out_binding = call
                    .args
                    .iter()
                    .map(|a| a.value)
                    .find(|&v| matches!(tree.kind(v), NodeKind::OutVariable { .. }));
                GuardShape::TryAccessor {
                    subject: call.receiver,
                    state,
                    out_binding,
                }
            }
            _ => GuardShape::Unrecognized,
        }
    }

    /// `(subject, state)` when `node` reads a discriminant
    fn discriminant(&self, node: NodeId) -> Option<(NodeId, WrapperState)> {
        let tree = self.ctx.tree;
        let node = tree.strip_parens(node);
        let (subject, member) = match tree.kind(node) {
            NodeKind::MemberAccess { receiver, member } => (*receiver, member.as_str()),
            NodeKind::ConditionalAccess {
                receiver,
                when_not_null,
            } => match tree.kind(*when_not_null) {
                NodeKind::MemberBinding { member } => (*receiver, member.as_str()),
                _ => return None,
            },
            _ => return None,
        };

        let family = self.ctx.wrapper_family(subject)?;
        match self.ctx.accessor_role(family, member)? {
            AccessorRole::Discriminant(state) => Some((subject, state)),
            _ => None,
        }
    }
}

/// Keep a compound only when at least one side says something
fn compound<F>(left: GuardShape, right: GuardShape, make: F) -> GuardShape
where
    F: FnOnce(Box<GuardShape>, Box<GuardShape>) -> GuardShape,
{
    if left.is_recognized() || right.is_recognized() {
        make(Box::new(left), Box::new(right))
    } else {
        GuardShape::Unrecognized
    }
}
