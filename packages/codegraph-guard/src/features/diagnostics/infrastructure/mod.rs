//! Diagnostic drivers

mod direct_access;
mod null_comparison;
mod projection;
mod ternary;

pub use direct_access::DirectAccessDriver;
pub use null_comparison::NullComparisonDriver;
pub use projection::ProjectionDriver;
pub use ternary::TernaryDriver;
