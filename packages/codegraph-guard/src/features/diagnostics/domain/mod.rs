pub mod descriptor;
pub mod diagnostic;

pub use descriptor::{
    descriptor_for, descriptors, DiagnosticDescriptor, DIRECT_ACCESS, NULL_COMPARISON, PROJECTION,
    RULE_CODES, TERNARY,
};
pub use diagnostic::{Diagnostic, Severity};
