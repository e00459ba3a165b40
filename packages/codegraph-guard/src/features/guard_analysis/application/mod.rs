pub mod context;
pub mod reachability;
pub mod recognizer;
pub mod use_sites;
pub mod walker;

pub use context::{AnalysisContext, MemberCall};
pub use recognizer::GuardRecognizer;
pub use walker::GuardWalker;
