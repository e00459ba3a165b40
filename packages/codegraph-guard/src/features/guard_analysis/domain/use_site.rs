//! Use sites: reads of a state-dependent payload accessor

use serde::Serialize;

use crate::features::type_classifier::domain::{FamilyId, WrapperState};
use crate::shared::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseSite {
    /// `MemberAccess` or `MemberBinding` reading the payload
    pub node: NodeId,
    pub member: String,
    /// Expression holding the wrapper
    pub receiver: NodeId,
    pub family: FamilyId,
    /// State in which the read is valid
    pub required_state: WrapperState,
}
