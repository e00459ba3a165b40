//! Guard Analyzer
//!
//! One analyzer per analysis run. It owns the configuration, the type
//! classifier (and with it the classification cache) and the driver
//! registry; units are analyzed independently and may be analyzed from
//! several threads at once.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::{GuardConfig, Validatable};
use crate::features::diagnostics::domain::Diagnostic;
use crate::features::guard_analysis::AnalysisContext;
use crate::features::type_classifier::TypeClassifier;
use crate::shared::models::{GuardError, Result, SyntaxTree};
use crate::shared::ports::SymbolOracle;
use crate::shared::utils::CancellationToken;

use super::registry::DriverRegistry;

// ═══════════════════════════════════════════════════════════════════════════
// Input / Output
// ═══════════════════════════════════════════════════════════════════════════

/// One file: its tree plus the oracle answering for it
pub struct AnalysisUnit {
    pub tree: SyntaxTree,
    pub oracle: Box<dyn SymbolOracle>,
}

impl AnalysisUnit {
    pub fn new(tree: SyntaxTree, oracle: impl SymbolOracle + 'static) -> Self {
        Self {
            tree,
            oracle: Box::new(oracle),
        }
    }

    pub fn file_path(&self) -> &str {
        self.tree.file_path()
    }
}

impl std::fmt::Debug for AnalysisUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisUnit")
            .field("file_path", &self.tree.file_path())
            .field("nodes", &self.tree.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub nodes_visited: usize,
    /// Node/driver dispatches
    pub candidates: usize,
    pub diagnostics: usize,
    pub elapsed_ms: u64,
}

impl AnalysisStats {
    pub fn merge(&mut self, other: &AnalysisStats) {
        self.nodes_visited += other.nodes_visited;
        self.candidates += other.candidates;
        self.diagnostics += other.diagnostics;
        self.elapsed_ms += other.elapsed_ms;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub file_path: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalysisStats,
}

// ═══════════════════════════════════════════════════════════════════════════
// Analyzer
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct GuardAnalyzer {
    config: Arc<GuardConfig>,
    classifier: TypeClassifier,
    registry: DriverRegistry,
}

impl GuardAnalyzer {
    /// Validate `config` and register the enabled built-in drivers
    pub fn new(config: GuardConfig) -> Result<Self> {
        let registry = DriverRegistry::standard(&config);
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: GuardConfig, registry: DriverRegistry) -> Result<Self> {
        config.validate()?;
        debug!(config = %config.describe(), drivers = ?registry.codes(), "guard analyzer ready");
        Ok(Self {
            classifier: TypeClassifier::new(&config),
            config: Arc::new(config),
            registry,
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Analyze one unit to completion
    pub fn analyze(&self, unit: &AnalysisUnit) -> Result<AnalysisResult> {
        self.analyze_tree(&unit.tree, unit.oracle.as_ref(), &CancellationToken::new())
    }

    /// Analyze one unit, checking `cancel` before each candidate node
    pub fn analyze_with_cancellation(
        &self,
        unit: &AnalysisUnit,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        self.analyze_tree(&unit.tree, unit.oracle.as_ref(), cancel)
    }

    pub fn analyze_tree(
        &self,
        tree: &SyntaxTree,
        oracle: &dyn SymbolOracle,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        let start = Instant::now();
        let ctx = AnalysisContext::new(tree, oracle, &self.classifier, &self.config);
        let mut diagnostics = Vec::new();
        let mut stats = AnalysisStats::default();

        for node in tree.preorder() {
            stats.nodes_visited += 1;
            let drivers = self.registry.drivers_for(tree.kind(node).syntax_kind());
            if drivers.is_empty() {
                continue;
            }
            if cancel.is_cancelled() {
                return Err(GuardError::cancelled("analysis cancelled")
                    .with_file(tree.file_path())
                    .with_line(tree.span(node).start_line));
            }
            for driver in drivers {
                stats.candidates += 1;
                if let Some(diagnostic) = driver.analyze(&ctx, node) {
                    diagnostics.push(diagnostic);
                }
            }
        }

        diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        stats.diagnostics = diagnostics.len();
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        debug!(
            file = tree.file_path(),
            nodes = stats.nodes_visited,
            diagnostics = stats.diagnostics,
            "unit analyzed"
        );

        Ok(AnalysisResult {
            file_path: tree.file_path().to_string(),
            diagnostics,
            stats,
        })
    }
}
