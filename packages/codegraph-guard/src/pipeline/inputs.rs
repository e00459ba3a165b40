//! Input loading
//!
//! `.json` files are unit dumps, everything else is snippet source. A file
//! that cannot be read or parsed is reported and skipped; the rest of the
//! batch still runs.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::adapters::{parse_unit, UnitDump};
use crate::config::GuardConfig;
use crate::features::diagnostics::AnalysisUnit;
use crate::shared::models::{GuardError, Result};

/// An input that produced no result
#[derive(Debug, Clone, Serialize)]
pub struct UnitFailure {
    pub file_path: String,
    pub error: String,
}

impl UnitFailure {
    pub fn new(file_path: impl Into<String>, error: &GuardError) -> Self {
        Self {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }
}

fn is_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load one input file
pub fn load_unit(path: &Path, config: &GuardConfig) -> Result<AnalysisUnit> {
    if is_dump(path) {
        return Ok(UnitDump::from_json_file(path)?.into_unit());
    }
    let source = std::fs::read_to_string(path)
        .map_err(|e| GuardError::from(e).with_file(path.display().to_string()))?;
    parse_unit(&path.display().to_string(), &source, config)
}

/// Load every input, collecting failures instead of stopping
pub fn load_units(paths: &[PathBuf], config: &GuardConfig) -> (Vec<AnalysisUnit>, Vec<UnitFailure>) {
    let mut units = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match load_unit(path, config) {
            Ok(unit) => units.push(unit),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping input");
                failures.push(UnitFailure::new(path.display().to_string(), &err));
            }
        }
    }
    (units, failures)
}
