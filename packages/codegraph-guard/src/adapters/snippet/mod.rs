//! Snippet front end
//!
//! Parses C#-like source text into a `SyntaxTree` and binds it into a
//! `TableOracle`. Used by the CLI for `.cs` inputs and throughout the tests.

mod lexer;
mod parser;

pub use lexer::{lex, Token, TokenKind};
pub use parser::parse_tree;

use tracing::debug;

use crate::adapters::oracle::{Binder, ImportTable};
use crate::config::GuardConfig;
use crate::features::diagnostics::AnalysisUnit;
use crate::shared::models::Result;

/// Parse and bind one source file
pub fn parse_unit(file_path: &str, source: &str, config: &GuardConfig) -> Result<AnalysisUnit> {
    let imports = ImportTable::from_config(config);
    let tree = parse_tree(file_path, source, &imports)?;
    let oracle = Binder::new(&tree, config, &imports).bind();
    debug!(
        file = file_path,
        nodes = tree.len(),
        typed = oracle.type_count(),
        bound = oracle.symbol_count(),
        "snippet bound"
    );
    Ok(AnalysisUnit::new(tree, oracle))
}
