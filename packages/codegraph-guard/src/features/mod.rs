//! Features
//!
//! - `type_classifier`: is this type a two-state wrapper?
//! - `guard_analysis`: is this payload read provably guarded?
//! - `diagnostics`: the rules built on the two

pub mod diagnostics;
pub mod guard_analysis;
pub mod type_classifier;
