pub mod analyzer;
pub mod registry;

pub use analyzer::{AnalysisResult, AnalysisStats, AnalysisUnit, GuardAnalyzer};
pub use registry::DriverRegistry;
