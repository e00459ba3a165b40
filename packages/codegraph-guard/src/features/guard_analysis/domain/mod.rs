pub mod facts;
pub mod shape;
pub mod use_site;

pub use facts::{Branch, BranchFact, GuardFact, Predicate};
pub use shape::GuardShape;
pub use use_site::UseSite;
