//! JSON interchange for host-produced units
//!
//! A dump is a syntax tree plus the semantic tables answering for it:
//!
//! ```json
//! { "tree":   { "file_path": "A.cs", "root": 7, "nodes": [ { "kind": "identifier", "name": "r", "span": … }, … ] },
//!   "oracle": { "types": { "0": { "name": "Ns.Result", "type_args": [ { "name": "int" } ] } },
//!               "symbols": { "0": "r@3" } } }
//! ```
//!
//! Trees are re-validated on the way in; table entries must refer to
//! existing nodes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::adapters::oracle::{Binder, ImportTable, TableOracle};
use crate::adapters::snippet::parse_tree;
use crate::config::GuardConfig;
use crate::features::diagnostics::AnalysisUnit;
use crate::shared::models::{GuardError, Result, SyntaxTree};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDump {
    pub tree: SyntaxTree,
    #[serde(default)]
    pub oracle: TableOracle,
}

impl UnitDump {
    pub fn new(tree: SyntaxTree, oracle: TableOracle) -> Self {
        Self { tree, oracle }
    }

    /// Parse and bind a snippet, keeping the tables for export
    pub fn from_snippet(file_path: &str, source: &str, config: &GuardConfig) -> Result<Self> {
        let imports = ImportTable::from_config(config);
        let tree = parse_tree(file_path, source, &imports)?;
        let oracle = Binder::new(&tree, config, &imports).bind();
        Ok(Self::new(tree, oracle))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let dump: UnitDump = serde_json::from_str(json)?;
        dump.validate()?;
        Ok(dump)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json).map_err(|e| match e.file_path {
            Some(_) => e,
            None => e.with_file(path.display().to_string()),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Table entries must name nodes of this tree
    pub fn validate(&self) -> Result<()> {
        match self.oracle.out_of_range(self.tree.len()) {
            Some(node) => Err(GuardError::tree(format!(
                "semantic table refers to node {} but the tree has {} nodes",
                node,
                self.tree.len()
            ))
            .with_file(self.tree.file_path())),
            None => Ok(()),
        }
    }

    pub fn into_unit(self) -> AnalysisUnit {
        AnalysisUnit::new(self.tree, self.oracle)
    }
}
