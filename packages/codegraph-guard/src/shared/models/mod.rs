//! Shared models

mod builder;
mod error;
mod span;
pub mod syntax;
mod types;

pub use builder::TreeBuilder;
pub use error::{ErrorKind, GuardError, Result};
pub use span::Span;
pub use syntax::{
    Argument, BinaryOp, Literal, NodeId, NodeKind, Pattern, SyntaxKind, SyntaxNode, SyntaxTree,
    UnaryOp,
};
pub use types::{SymbolId, TypeRef};
