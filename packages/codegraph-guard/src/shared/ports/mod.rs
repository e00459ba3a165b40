//! Shared Ports - interfaces to the host compiler
//!
//! The host's parse/type-check front end is consumed, not built. Everything
//! the analysis needs from it goes through `SymbolOracle`.

mod oracle;

pub use oracle::{same_location_by_symbols, SymbolOracle};
