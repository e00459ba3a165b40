//! Batch Runner
//!
//! Analyzes many independent units with one `GuardAnalyzer`. With the
//! `parallel` feature and `analysis.parallel` set, units run on a dedicated
//! rayon pool of `analysis.threads` workers (0 = one per CPU); otherwise
//! sequentially. Results keep input order either way.

use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::inputs::UnitFailure;
use crate::features::diagnostics::{
    AnalysisResult, AnalysisStats, AnalysisUnit, Diagnostic, GuardAnalyzer, Severity,
};
use crate::shared::models::Result;
use crate::shared::utils::CancellationToken;

/// Outcome of one batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<UnitFailure>,
    /// Sum over all analyzed units
    pub stats: AnalysisStats,
    pub elapsed_ms: u64,
}

impl BatchReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.results.iter().flat_map(|r| r.diagnostics.iter())
    }

    pub fn diagnostic_count(&self) -> usize {
        self.stats.diagnostics
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics().map(|d| d.severity).max()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Add failures from an earlier stage (input loading)
    pub fn with_failures(mut self, failures: Vec<UnitFailure>) -> Self {
        let mut failures = failures;
        failures.append(&mut self.failures);
        self.failures = failures;
        self
    }
}

pub struct BatchRunner<'a> {
    analyzer: &'a GuardAnalyzer,
    cancel: CancellationToken,
}

impl<'a> BatchRunner<'a> {
    pub fn new(analyzer: &'a GuardAnalyzer) -> Self {
        Self {
            analyzer,
            cancel: CancellationToken::new(),
        }
    }

    /// Share a cancellation token with the caller
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn run(&self, units: &[AnalysisUnit]) -> BatchReport {
        let start = Instant::now();
        let outcomes = if self.analyzer.config().analysis.parallel && units.len() > 1 {
            self.run_parallel(units)
        } else {
            self.run_sequential(units)
        };

        let mut report = BatchReport::default();
        for (unit, outcome) in units.iter().zip(outcomes) {
            match outcome {
                Ok(result) => {
                    report.stats.merge(&result.stats);
                    report.results.push(result);
                }
                Err(err) => {
                    warn!(file = unit.file_path(), error = %err, "unit not analyzed");
                    report.failures.push(UnitFailure::new(unit.file_path(), &err));
                }
            }
        }
        report.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            units = units.len(),
            diagnostics = report.stats.diagnostics,
            failures = report.failures.len(),
            elapsed_ms = report.elapsed_ms,
            "batch complete"
        );
        report
    }

    fn analyze(&self, unit: &AnalysisUnit) -> Result<AnalysisResult> {
        self.analyzer.analyze_with_cancellation(unit, &self.cancel)
    }

    fn run_sequential(&self, units: &[AnalysisUnit]) -> Vec<Result<AnalysisResult>> {
        units.iter().map(|unit| self.analyze(unit)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, units: &[AnalysisUnit]) -> Vec<Result<AnalysisResult>> {
        let threads = self.analyzer.config().analysis.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("guard-worker-{}", i))
            .build();
        match pool {
            Ok(pool) => pool.install(|| units.par_iter().map(|unit| self.analyze(unit)).collect()),
            Err(err) => {
                warn!(error = %err, "thread pool unavailable, analyzing sequentially");
                self.run_sequential(units)
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(&self, units: &[AnalysisUnit]) -> Vec<Result<AnalysisResult>> {
        self.run_sequential(units)
    }
}
