//! Table-backed symbol oracle
//!
//! Plain node -> type and node -> declaration maps. Hosts that export their
//! semantic model fill these directly; the snippet front end fills them
//! through `Binder`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::shared::models::{NodeId, SymbolId, TypeRef};
use crate::shared::ports::SymbolOracle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOracle {
    #[serde(default)]
    types: FxHashMap<NodeId, TypeRef>,
    #[serde(default)]
    symbols: FxHashMap<NodeId, SymbolId>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, node: NodeId, ty: TypeRef) {
        self.types.insert(node, ty);
    }

    pub fn set_symbol(&mut self, node: NodeId, symbol: impl Into<SymbolId>) {
        self.symbols.insert(node, symbol.into());
    }

    /// Builder: Set a node's type
    pub fn with_type(mut self, node: NodeId, ty: TypeRef) -> Self {
        self.set_type(node, ty);
        self
    }

    /// Builder: Set a node's declaration
    pub fn with_symbol(mut self, node: NodeId, symbol: impl Into<SymbolId>) -> Self {
        self.set_symbol(node, symbol);
        self
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Entries referring to nodes at or beyond `len`
    pub fn out_of_range(&self, len: usize) -> Option<NodeId> {
        self.types
            .keys()
            .chain(self.symbols.keys())
            .copied()
            .filter(|&id| id >= len)
            .min()
    }
}

impl SymbolOracle for TableOracle {
    fn type_of(&self, node: NodeId) -> Option<&TypeRef> {
        self.types.get(&node)
    }

    fn symbol_of(&self, node: NodeId) -> Option<&str> {
        self.symbols.get(&node).map(String::as_str)
    }
}
