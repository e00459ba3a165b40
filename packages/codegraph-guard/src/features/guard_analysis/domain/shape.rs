//! Guard shapes
//!
//! The closed set of condition forms that produce facts. Recognition builds
//! a `GuardShape` from a condition; `branch_facts` is the single place that
//! turns a shape into branch-scoped facts.

use super::facts::{Branch, BranchFact, GuardFact, Predicate};
use crate::features::type_classifier::domain::WrapperState;
use crate::shared::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardShape {
    /// `s.P`
    Discriminant { subject: NodeId, state: WrapperState },

    /// `!s.P`
    NegatedDiscriminant { subject: NodeId, state: WrapperState },

    /// `s.P == true`, `false != s.P`, ...; `expected` is the value of `s.P`
    /// when the comparison holds
    LiteralComparison {
        subject: NodeId,
        state: WrapperState,
        expected: bool,
    },

    /// `s.TryGetValue(out var x)`
    TryAccessor {
        subject: NodeId,
        state: WrapperState,
        out_binding: Option<NodeId>,
    },

    /// `a && b`
    Conjunction(Box<GuardShape>, Box<GuardShape>),

    /// `a || b`
    Disjunction(Box<GuardShape>, Box<GuardShape>),

    /// No facts
    Unrecognized,
}

impl GuardShape {
    /// Shape of `!self`
    ///
    /// Only simple shapes invert; a negated compound or try call yields no
    /// facts.
    pub fn negate(self) -> GuardShape {
        match self {
            GuardShape::Discriminant { subject, state } => {
                GuardShape::NegatedDiscriminant { subject, state }
            }
            GuardShape::NegatedDiscriminant { subject, state } => {
                GuardShape::Discriminant { subject, state }
            }
            GuardShape::LiteralComparison {
                subject,
                state,
                expected,
            } => GuardShape::LiteralComparison {
                subject,
                state,
                expected: !expected,
            },
            _ => GuardShape::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, GuardShape::Unrecognized)
    }

    /// Facts per branch
    pub fn branch_facts(&self) -> Vec<BranchFact> {
        let split = |subject: NodeId, state: WrapperState, then_truth: bool| {
            let predicate = Predicate::discriminant(state);
            vec![
                BranchFact::then(GuardFact::new(subject, predicate, then_truth)),
                BranchFact::otherwise(GuardFact::new(subject, predicate, !then_truth)),
            ]
        };

        match self {
            GuardShape::Discriminant { subject, state } => split(*subject, *state, true),
            GuardShape::NegatedDiscriminant { subject, state } => split(*subject, *state, false),
            GuardShape::LiteralComparison {
                subject,
                state,
                expected,
            } => split(*subject, *state, *expected),
            GuardShape::TryAccessor { subject, state, .. } => vec![BranchFact::then(
                GuardFact::new(*subject, Predicate::TrySucceeded(*state), true),
            )],
            GuardShape::Conjunction(left, right) => left
                .branch_facts()
                .into_iter()
                .chain(right.branch_facts())
                .filter(|f| f.branch == Branch::Then)
                .collect(),
            GuardShape::Disjunction(left, right) => left
                .branch_facts()
                .into_iter()
                .chain(right.branch_facts())
                .filter(|f| f.branch == Branch::Else)
                .collect(),
            GuardShape::Unrecognized => Vec::new(),
        }
    }
}
