//! Error types for the codegraph-guard crate
//!
//! The analysis itself never fails on a single node: classification and guard
//! misses are analysis-quality outcomes, not errors. `GuardError` covers the
//! edges around it (reading inputs, building trees, loading configuration,
//! cooperative cancellation).

use std::fmt;

use crate::config::ConfigError;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Snippet front-end errors
    Parse,
    /// Malformed syntax tree (dangling or shared children)
    Tree,
    /// Configuration errors
    Config,
    /// IO errors
    IO,
    /// Analysis stopped by a cancellation request
    Cancelled,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Tree => "tree",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct GuardError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GuardError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn tree(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Tree, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for GuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GuardError>;

impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::io(format!("IO error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line() as u32;
        GuardError::parse(format!("JSON error: {}", err))
            .with_line(line)
            .with_source(err)
    }
}

impl From<ConfigError> for GuardError {
    fn from(err: ConfigError) -> Self {
        GuardError::config(err.to_string()).with_source(err)
    }
}
