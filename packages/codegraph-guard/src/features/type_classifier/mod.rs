//! Type classification for two-state wrappers

pub mod classifier;
pub mod domain;

pub use classifier::{ClassifierStats, TypeClassifier};
pub use domain::{AccessorRole, Classification, FamilyId, WrapperState};
