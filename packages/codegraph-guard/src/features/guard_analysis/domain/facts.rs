//! Guard facts
//!
//! A fact is (subject, predicate, truth) scoped to the branch of the
//! condition that produced it. Facts are built per query and never cached.

use serde::Serialize;

use crate::features::type_classifier::domain::WrapperState;
use crate::shared::models::NodeId;

/// State-reading predicate over a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Predicate {
    /// Ok discriminant (`IsSuccess`, `HasValue`)
    Ok,
    /// Not-ok discriminant (`IsFailure`, `HasNoValue`)
    NotOk,
    /// Try accessor for the given state returned `true`
    TrySucceeded(WrapperState),
}

impl Predicate {
    /// Discriminant predicate reading `state`
    pub fn discriminant(state: WrapperState) -> Self {
        match state {
            WrapperState::Ok => Predicate::Ok,
            WrapperState::NotOk => Predicate::NotOk,
        }
    }

    /// State proven by this predicate having value `truth`
    pub fn implied_state(self, truth: bool) -> Option<WrapperState> {
        match (self, truth) {
            (Predicate::Ok, true) | (Predicate::NotOk, false) => Some(WrapperState::Ok),
            (Predicate::Ok, false) | (Predicate::NotOk, true) => Some(WrapperState::NotOk),
            (Predicate::TrySucceeded(state), true) => Some(state),
            // A failed try says nothing: the accessor may also fail on null
            (Predicate::TrySucceeded(_), false) => None,
        }
    }
}

/// Branch of a conditional construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Branch {
    Then,
    Else,
}

/// (subject, predicate, truth)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GuardFact {
    /// Expression whose state is constrained
    pub subject: NodeId,
    pub predicate: Predicate,
    pub truth: bool,
}

impl GuardFact {
    pub fn new(subject: NodeId, predicate: Predicate, truth: bool) -> Self {
        Self {
            subject,
            predicate,
            truth,
        }
    }

    pub fn implied_state(&self) -> Option<WrapperState> {
        self.predicate.implied_state(self.truth)
    }
}

/// A fact together with the branch in which it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BranchFact {
    pub fact: GuardFact,
    pub branch: Branch,
}

impl BranchFact {
    pub fn then(fact: GuardFact) -> Self {
        Self {
            fact,
            branch: Branch::Then,
        }
    }

    pub fn otherwise(fact: GuardFact) -> Self {
        Self {
            fact,
            branch: Branch::Else,
        }
    }
}
