//! Feature modules
//!
//! This module contains the pieces around the table engine:
//! - Cell content rendering (Markdown or plain text)
//! - Markdown document filtering for fenced `mcgtable` blocks

pub mod content;
pub mod filter;

// Re-export commonly used types
#[cfg(feature = "markdown")]
pub use content::MarkdownContent;
pub use content::{ContentFormat, PlainContent};
pub use filter::{filter_markdown, FilterOutput};
