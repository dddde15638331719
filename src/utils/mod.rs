//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{format_diagnostics, Diagnostic, DiagnosticLevel, Report, Severity};
pub use error::{GridTableError, GridTableResult, TableOutput};
