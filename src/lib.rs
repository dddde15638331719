//! # mcgtable
//!
//! Multi-cell grid tables: converts ASCII grid tables with merged cells into
//! HTML or DocBook (CALS) tables.
//!
//! ## Features
//!
//! - **Merged Cells**: cells span columns and rows wherever the separator
//!   between them is missing or overwritten by content
//! - **Sections**: `=` ends the header, `_` starts the footer
//! - **Alignment**: `:` at the ends of a separator aligns a column or a cell
//! - **Hidden Borders**: blank separators hide the border they stand for
//! - **Markdown Cells**: cell text is rendered as Markdown (pulldown-cmark)
//! - **Markdown Filter**: renders fenced `mcgtable` blocks inside a document
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Table Conversion
//!
//! ```rust
//! use mcgtable::grid_table_to_html;
//!
//! let html = grid_table_to_html(
//!     "+-----+-----+\n\
//!      |h1         |\n\
//!      +============+\n\
//!      |c1   |c2   |\n\
//!      +-----+-----+\n",
//! );
//! assert!(html.contains("<th colspan=\"2\">h1</th>"));
//! assert!(html.contains("<td>c1</td>"));
//! ```
//!
//! ### Diagnostics
//!
//! ```rust
//! use mcgtable::{convert_grid_table_text, GridTableOptions, Severity};
//!
//! let output = convert_grid_table_text("+---+\n| a\n", &GridTableOptions::docbook());
//! assert_eq!(output.severity(), Severity::Error);
//! assert!(output.report.diagnostics[0].message.starts_with("line too short"));
//! ```

/// Core table engine
pub mod core;

/// Feature modules - content rendering and document filtering
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the conversion pipeline
pub use core::generate::{BlockRenderer, Fragment, TagGenerator, Target};
pub use core::grid;
pub use core::{
    check_grid_table, convert_grid_table, convert_grid_table_text, grid_table_to_docbook,
    grid_table_to_html, try_convert_grid_table, GridTableOptions,
};

// Re-export feature modules
pub use features::content::{ContentFormat, PlainContent};
#[cfg(feature = "markdown")]
pub use features::content::MarkdownContent;
pub use features::filter::{filter_markdown, FilterOutput};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::diagnostics::{Diagnostic, DiagnosticLevel, Report, Severity};
pub use utils::error::{GridTableError, GridTableResult, TableOutput};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Whether the text looks like a grid table: its first non-blank line is a
/// row separator
pub fn looks_like_grid_table(input: &str) -> bool {
    input
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("Table:"))
        .map(|l| (l.starts_with('+') || l.starts_with('#')) && l.len() > 1)
        .unwrap_or(false)
}
