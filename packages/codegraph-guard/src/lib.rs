/*
 * Codegraph Guard - State-guard analysis for two-state wrapper types
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Syntax tree, spans, errors, the SymbolOracle port
 * - config/      : Wrapper families, method tables, YAML schema v1
 * - features/    : Vertical slices (type_classifier → guard_analysis → diagnostics)
 * - adapters/    : Table oracle + binder, snippet front end, JSON dumps
 * - pipeline/    : Batch analysis over many units
 *
 * Reports reads of state-specific accessors (`Value`, `Error`) that are not
 * dominated by a guard proving the wrapper is in the matching state.
 */

// Crate-level lint configuration
#![allow(clippy::new_without_default)] // Builders mirror constructor naming
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::type_complexity)] // Driver tables keyed by syntax kind
#![allow(clippy::match_like_matches_macro)] // Match for readability

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Guard configuration
pub mod config;

/// Feature slices
pub mod features;

/// Inputs: oracle tables, snippet parsing, JSON dumps
pub mod adapters;

/// Batch analysis
pub mod pipeline;

pub use adapters::{parse_unit, Binder, TableOracle, UnitDump};
pub use config::{ConfigError, GuardConfig, WrapperFamily};
pub use features::diagnostics::{
    AnalysisResult, AnalysisStats, AnalysisUnit, Diagnostic, DiagnosticDescriptor,
    DiagnosticDriver, DriverRegistry, GuardAnalyzer, Severity,
};
pub use features::type_classifier::{Classification, TypeClassifier, WrapperState};
pub use pipeline::{BatchReport, BatchRunner};
pub use shared::models::{
    ErrorKind, GuardError, NodeId, NodeKind, Result, Span, SyntaxKind, SyntaxTree, TreeBuilder,
    TypeRef,
};
pub use shared::{CancellationToken, SymbolOracle};
