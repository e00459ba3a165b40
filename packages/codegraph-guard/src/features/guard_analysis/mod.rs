//! Guard analysis
//!
//! Facts and guard shapes (domain) plus the recognizer, branch resolver and
//! walker that decide whether a payload read is provably guarded.

pub mod application;
pub mod domain;

pub use application::{reachability, AnalysisContext, GuardRecognizer, GuardWalker};
pub use domain::{Branch, BranchFact, GuardFact, GuardShape, Predicate, UseSite};
