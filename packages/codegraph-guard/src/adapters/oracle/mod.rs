//! Symbol oracle adapters

mod binder;
mod imports;
mod table;

pub use binder::Binder;
pub use imports::ImportTable;
pub use table::TableOracle;
