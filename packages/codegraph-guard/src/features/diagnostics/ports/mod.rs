//! Diagnostic Ports
//!
//! Drivers are stateless: every call sees one node of one tree and returns
//! at most one diagnostic for it. Nothing carries over between nodes.

use crate::features::guard_analysis::AnalysisContext;
use crate::shared::models::{NodeId, SyntaxKind};

use super::domain::{Diagnostic, DiagnosticDescriptor};

// ═══════════════════════════════════════════════════════════════════════════
// Primary Port
// ═══════════════════════════════════════════════════════════════════════════

/// Diagnostic Driver Port - one rule over one node shape
///
/// # Implementors
/// - `DirectAccessDriver` (GRD001)
/// - `TernaryDriver` (GRD002)
/// - `ProjectionDriver` (GRD003)
/// - `NullComparisonDriver` (GRD004)
pub trait DiagnosticDriver: Send + Sync {
    /// Rule metadata
    fn descriptor(&self) -> &'static DiagnosticDescriptor;

    /// Node kinds the registry dispatches to this driver
    fn subscribed_kinds(&self) -> &'static [SyntaxKind];

    /// Inspect one node of a subscribed kind
    fn analyze(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Option<Diagnostic>;

    /// Driver name for debugging and logging
    fn name(&self) -> &'static str;
}
