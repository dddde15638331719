//! Error handling for grid table conversion
//!
//! This module provides the error type for the `Result` based entry points and
//! the output value that carries a rendered table together with its
//! diagnostics.

use std::fmt;

use super::diagnostics::{Diagnostic, DiagnosticLevel, Report, Severity};
use crate::core::grid::Position;

/// Grid table error type
#[derive(Debug, Clone)]
pub enum GridTableError {
    /// The table source is malformed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Invalid input or options
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// The span resolver found a grid it should never have been given
    InternalError { message: String, cell: Position },
}

impl fmt::Display for GridTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridTableError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            GridTableError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            GridTableError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            GridTableError::InternalError { message, cell } => {
                write!(f, "Internal error at {}: {}", cell, message)
            }
        }
    }
}

impl std::error::Error for GridTableError {}

impl From<std::io::Error> for GridTableError {
    fn from(err: std::io::Error) -> Self {
        GridTableError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for grid table operations
pub type GridTableResult<T> = Result<T, GridTableError>;

// Convenience constructors for errors
impl GridTableError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridTableError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, cell: Position) -> Self {
        GridTableError::InternalError {
            message: message.into(),
            cell,
        }
    }

    /// Turn the error into a diagnostic for a report
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GridTableError::ParseError {
                message,
                line,
                column,
            } => {
                let mut diag = Diagnostic::new(DiagnosticLevel::Error, message.clone());
                diag.line = *line;
                diag.column = *column;
                diag
            }
            GridTableError::InternalError { cell, .. } => {
                let diag = Diagnostic::new(DiagnosticLevel::Error, self.to_string());
                diag.with_cell(*cell)
            }
            other => Diagnostic::new(DiagnosticLevel::Error, other.to_string()),
        }
    }

    /// The first error of a report, if any
    pub fn from_report(report: &Report) -> Option<Self> {
        report
            .diagnostics
            .iter()
            .find(|d| d.level == DiagnosticLevel::Error)
            .map(|d| GridTableError::ParseError {
                message: d.message.clone(),
                line: d.line,
                column: d.column,
            })
    }
}

/// A processed table: rendered content, diagnostics and the lines that were
/// never interpreted because processing stopped on an error
#[derive(Debug, Clone, Default)]
pub struct TableOutput {
    /// The rendered table, empty when no complete table was parsed
    pub content: String,
    /// Diagnostics produced while processing
    pub report: Report,
    /// Trailing input lines to be echoed verbatim
    pub unconsumed: Vec<String>,
}

impl TableOutput {
    pub fn severity(&self) -> Severity {
        self.report.severity()
    }

    /// Rendered content followed by the unconsumed lines, as a caller in
    /// command-line mode prints it
    pub fn to_text(&self) -> String {
        let mut out = self.content.clone();
        for line in &self.unconsumed {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
