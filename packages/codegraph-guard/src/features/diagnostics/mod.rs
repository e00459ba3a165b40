//! Diagnostics
//!
//! Four drivers (GRD001-GRD004) behind the `DiagnosticDriver` port, the
//! registry dispatching tree nodes to them and the `GuardAnalyzer` running
//! a whole unit.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{AnalysisResult, AnalysisStats, AnalysisUnit, DriverRegistry, GuardAnalyzer};
pub use domain::{descriptor_for, descriptors, Diagnostic, DiagnosticDescriptor, Severity, RULE_CODES};
pub use ports::DiagnosticDriver;
