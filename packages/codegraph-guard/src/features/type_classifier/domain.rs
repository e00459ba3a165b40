/*
 * Type Classifier Domain
 *
 * Wrapper states, accessor roles and classification outcomes.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two mutually exclusive states a wrapper is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapperState {
    /// Carrying the payload (`IsSuccess`, `HasValue`)
    Ok,
    /// Carrying the alternative payload, or nothing (`IsFailure`, `HasNoValue`)
    NotOk,
}

impl fmt::Display for WrapperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapperState::Ok => write!(f, "ok"),
            WrapperState::NotOk => write!(f, "not-ok"),
        }
    }
}

/// What a member name means on a wrapper family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorRole {
    /// Boolean that is `true` exactly in the given state
    Discriminant(WrapperState),
    /// Payload readable only in the given state
    Payload(WrapperState),
    /// `bool TryGet…(out …)` succeeding exactly in the given state
    TryAccessor(WrapperState),
}

/// Index of a family in the configured catalog
pub type FamilyId = usize;

/// Classification outcome for one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A recognized two-state wrapper
    OkNotOk(FamilyId),
    /// An asynchronous wrapper whose argument is a recognized wrapper
    AsyncWrapping(FamilyId),
    /// Anything else, including missing types
    Unrelated,
}

impl Classification {
    pub fn wrapper_family(&self) -> Option<FamilyId> {
        match self {
            Classification::OkNotOk(family) => Some(*family),
            _ => None,
        }
    }

    pub fn async_family(&self) -> Option<FamilyId> {
        match self {
            Classification::AsyncWrapping(family) => Some(*family),
            _ => None,
        }
    }

    pub fn is_unrelated(&self) -> bool {
        matches!(self, Classification::Unrelated)
    }
}
