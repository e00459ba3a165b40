//! Shared utilities

pub mod cancellation;
pub mod render;
pub mod scope_stack;

pub use cancellation::CancellationToken;
pub use render::render_expression;
pub use scope_stack::ScopeStack;
