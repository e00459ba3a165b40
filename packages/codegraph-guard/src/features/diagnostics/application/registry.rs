//! Driver registry
//!
//! Maps each `SyntaxKind` to the drivers subscribed to it, so a pass over
//! a tree dispatches every node once per interested driver.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::config::GuardConfig;
use crate::features::diagnostics::infrastructure::{
    DirectAccessDriver, NullComparisonDriver, ProjectionDriver, TernaryDriver,
};
use crate::features::diagnostics::ports::DiagnosticDriver;
use crate::shared::models::SyntaxKind;

#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<Arc<dyn DiagnosticDriver>>,
    by_kind: FxHashMap<SyntaxKind, Vec<Arc<dyn DiagnosticDriver>>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in drivers minus the disabled rules
    pub fn standard(config: &GuardConfig) -> Self {
        let builtin: [Arc<dyn DiagnosticDriver>; 4] = [
            Arc::new(DirectAccessDriver::new()),
            Arc::new(TernaryDriver::new()),
            Arc::new(ProjectionDriver::new()),
            Arc::new(NullComparisonDriver::new()),
        ];

        let mut registry = Self::new();
        for driver in builtin {
            if config.is_rule_enabled(driver.descriptor().code) {
                registry.register(driver);
            }
        }
        registry
    }

    pub fn register(&mut self, driver: Arc<dyn DiagnosticDriver>) {
        for kind in driver.subscribed_kinds() {
            self.by_kind.entry(*kind).or_default().push(Arc::clone(&driver));
        }
        self.drivers.push(driver);
    }

    pub fn drivers_for(&self, kind: SyntaxKind) -> &[Arc<dyn DiagnosticDriver>] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn drivers(&self) -> &[Arc<dyn DiagnosticDriver>] {
        &self.drivers
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.drivers.iter().map(|d| d.descriptor().code).collect()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.codes())
            .finish()
    }
}
