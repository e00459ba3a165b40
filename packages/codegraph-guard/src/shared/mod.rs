//! Shared module - Common types and utilities
//!
//! Types shared by every feature: the syntax tree the host hands us, the
//! oracle port through which we ask it questions, and small utilities.

pub mod models;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use ports::SymbolOracle;
pub use utils::cancellation::CancellationToken;
