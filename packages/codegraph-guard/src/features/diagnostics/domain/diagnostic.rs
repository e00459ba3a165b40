//! Diagnostic model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::descriptor::DiagnosticDescriptor;
use crate::shared::models::{NodeId, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// One confirmed-unsafe use site
///
/// Immutable once created; spans point at the use-site node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub file_path: String,
    pub span: Span,
    pub node: NodeId,
    pub message: String,
    pub arguments: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        descriptor: &DiagnosticDescriptor,
        file_path: impl Into<String>,
        node: NodeId,
        span: Span,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            code: descriptor.code.to_string(),
            severity: descriptor.severity,
            file_path: file_path.into(),
            span,
            node,
            message: descriptor.format_message(&arguments),
            arguments,
        }
    }

    /// Ordering used for reports: file, position, code
    pub fn sort_key(&self) -> (&str, Span, &str, NodeId) {
        (&self.file_path, self.span, &self.code, self.node)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} {}: {}",
            self.file_path, self.span, self.severity, self.code, self.message
        )
    }
}
