//! Grid table diagnostics
//!
//! Parsing and span resolution never abort with an exception. Every problem is
//! recorded as a [`Diagnostic`] in a [`Report`], and the caller decides what to
//! do with the worst [`Severity`] found.
//!
//! ## Example
//!
//! ```rust
//! use mcgtable::diagnostics::{Diagnostic, DiagnosticLevel, Report, Severity};
//!
//! let mut report = Report::new();
//! report.add(Diagnostic::new(DiagnosticLevel::Warning, "duplicate caption").with_line(3));
//! assert_eq!(report.severity(), Severity::Warning);
//! ```

use std::fmt;

use crate::core::grid::Position;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the table was produced but something looked off
    Warning,
    /// Error - table parsing stopped
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// Overall result status of processing one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Error,
}

impl From<DiagnosticLevel> for Severity {
    fn from(level: DiagnosticLevel) -> Self {
        match level {
            DiagnosticLevel::Info => Severity::Ok,
            DiagnosticLevel::Warning => Severity::Warning,
            DiagnosticLevel::Error => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "ok"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Input line number (1-indexed)
    pub line: Option<usize>,
    /// Character column in the line (1-indexed)
    pub column: Option<usize>,
    /// Grid cell the message refers to
    pub cell: Option<Position>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            cell: None,
            source_text: None,
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    /// Add the input line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add line and column information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add the grid cell
    pub fn with_cell(mut self, position: Position) -> Self {
        self.cell = Some(position);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line 4:12 (row 2, column 1)
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(f, "\n  --> line {}:{}", line, col)?,
            (Some(line), None) => write!(f, "\n  --> line {}", line)?,
            _ => {}
        }

        if let Some(cell) = self.cell {
            write!(f, " ({})", cell)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Accumulated diagnostics with a summary
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        tracing::debug!(level = %diag.level, line = ?diag.line, "{}", diag.message);
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: Report) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Merge a report whose line numbers are relative to `line_offset`
    pub fn merge_shifted(&mut self, other: Report, line_offset: usize) {
        let mut other = other;
        for diag in &mut other.diagnostics {
            if let Some(line) = diag.line.as_mut() {
                *line += line_offset;
            }
        }
        self.merge(other);
    }

    /// Worst severity found, `Ok` for an empty report
    pub fn severity(&self) -> Severity {
        self.diagnostics
            .iter()
            .map(|d| Severity::from(d.level))
            .max()
            .unwrap_or_default()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Format a report for terminal output
pub fn format_diagnostics(report: &Report, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &report.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if report.has_errors() {
            output.push_str("\x1b[31m");
        } else if report.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", report.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
