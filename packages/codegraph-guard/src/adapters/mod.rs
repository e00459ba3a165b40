//! Adapters - ways of getting an `AnalysisUnit`
//!
//! - `oracle`: table-backed `SymbolOracle` and the `Binder` that fills it
//! - `snippet`: C#-like source text front end
//! - `dump`: JSON trees and tables exported by a host

pub mod dump;
pub mod oracle;
pub mod snippet;

pub use dump::UnitDump;
pub use oracle::{Binder, ImportTable, TableOracle};
pub use snippet::{parse_tree, parse_unit};
