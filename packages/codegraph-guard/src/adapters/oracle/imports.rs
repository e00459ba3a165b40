//! Simple-name imports for snippet sources
//!
//! Snippets write `Result<int>`; the analysis matches fully-qualified
//! names. The table maps the last segment of every configured wrapper and
//! async wrapper name, plus the common sequence types, to its full name.

use rustc_hash::FxHashMap;

use crate::config::GuardConfig;

const SEQUENCE_TYPES: &[&str] = &[
    "System.Collections.Generic.IEnumerable",
    "System.Collections.Generic.List",
    "System.Collections.Generic.IReadOnlyList",
    "System.Linq.IQueryable",
];

#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    by_simple_name: FxHashMap<String, String>,
}

impl ImportTable {
    pub fn from_config(config: &GuardConfig) -> Self {
        let mut table = Self::default();
        for name in config
            .families
            .iter()
            .flat_map(|f| f.type_names.iter())
            .chain(config.async_wrappers.iter())
        {
            table.import(name);
        }
        for name in SEQUENCE_TYPES {
            table.import(name);
        }
        table
    }

    /// Make `full_name` reachable by its last segment
    pub fn import(&mut self, full_name: &str) {
        let simple = full_name.rsplit('.').next().unwrap_or(full_name);
        self.by_simple_name
            .entry(simple.to_string())
            .or_insert_with(|| full_name.to_string());
    }

    pub fn lookup(&self, simple_name: &str) -> Option<&str> {
        self.by_simple_name.get(simple_name).map(String::as_str)
    }

    /// Full name for `name`, or `name` itself when not imported
    pub fn resolve(&self, name: &str) -> String {
        self.lookup(name).unwrap_or(name).to_string()
    }
}
