//! Markdown document filter
//!
//! Replaces every fenced ```` ```mcgtable ```` block of a Markdown document
//! with the rendered table. Everything else passes through unchanged.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::convert::{convert_grid_table, GridTableOptions};
use crate::utils::diagnostics::{Diagnostic, Report};

lazy_static! {
    // Opening fence: ```mcgtable
    static ref FENCE_START: Regex = Regex::new(r"^ *`{3,}mcgtable *$").unwrap();

    // Closing fence: ```
    static ref FENCE_END: Regex = Regex::new(r"^ *`{3,}\s*$").unwrap();
}

/// Result of filtering one document
#[derive(Debug, Clone, Default)]
pub struct FilterOutput {
    /// The document with tables rendered
    pub text: String,
    /// Diagnostics of every table, with document line numbers
    pub report: Report,
    /// Number of tables rendered
    pub tables: usize,
    /// Number of blocks left as they were because of errors
    pub failed: usize,
}

/// Render every `mcgtable` fenced block in a Markdown document.
///
/// A block whose table has errors is kept as the original fenced block. An
/// opening fence without a closing one is left alone.
pub fn filter_markdown(document: &str, options: &GridTableOptions) -> FilterOutput {
    let lines: Vec<&str> = document.lines().collect();
    let mut output = FilterOutput::default();
    let mut i = 0;

    while i < lines.len() {
        if FENCE_START.is_match(lines[i]) {
            match (i + 1..lines.len()).find(|&j| FENCE_END.is_match(lines[j])) {
                Some(end) => {
                    let table = convert_grid_table(&lines[i + 1..end], options);
                    let failed = table.report.has_errors();
                    output.report.merge_shifted(table.report, i + 1);

                    if failed {
                        tracing::warn!(line = i + 1, "grid table left unrendered");
                        output.failed += 1;
                        for line in &lines[i..=end] {
                            output.text.push_str(line);
                            output.text.push('\n');
                        }
                    } else {
                        output.tables += 1;
                        output.text.push_str(&table.content);
                    }
                    i = end + 1;
                    continue;
                }
                None => {
                    output.report.add(
                        Diagnostic::warning("mcgtable block has no closing fence")
                            .with_line(i + 1)
                            .with_source(lines[i]),
                    );
                }
            }
        }

        output.text.push_str(lines[i]);
        output.text.push('\n');
        i += 1;
    }

    tracing::debug!(
        tables = output.tables,
        failed = output.failed,
        "markdown filtered"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_patterns() {
        assert!(FENCE_START.is_match("```mcgtable"));
        assert!(FENCE_START.is_match("  ````mcgtable  "));
        assert!(!FENCE_START.is_match("```rust"));
        assert!(!FENCE_START.is_match("``mcgtable"));
        assert!(FENCE_END.is_match("```"));
        assert!(FENCE_END.is_match(" ````  "));
        assert!(!FENCE_END.is_match("```mcgtable"));
    }

    #[test]
    fn test_block_is_replaced() {
        let doc = "# Title\n\n```mcgtable\n+---+\n| a |\n+---+\n```\n\nAfter.\n";
        let out = filter_markdown(doc, &GridTableOptions::plain());
        assert_eq!(out.tables, 1);
        assert_eq!(out.failed, 0);
        assert!(out.text.starts_with("# Title\n\n<table>\n"));
        assert!(out.text.ends_with("</table>\n\nAfter.\n"));
        assert!(!out.text.contains("```"));
    }

    #[test]
    fn test_failed_block_is_kept_with_document_lines() {
        let doc = "intro\n```mcgtable\n+---+\n| a\n+---+\n```\n";
        let out = filter_markdown(doc, &GridTableOptions::new());
        assert_eq!(out.failed, 1);
        assert_eq!(out.text, doc);
        assert!(out.report.has_errors());
        assert_eq!(out.report.diagnostics[0].line, Some(4));
    }

    #[test]
    fn test_unterminated_fence_is_untouched() {
        let doc = "```mcgtable\n+---+\n| a |\n+---+\n";
        let out = filter_markdown(doc, &GridTableOptions::new());
        assert_eq!(out.text, doc);
        assert_eq!(out.tables, 0);
        assert_eq!(out.report.warnings, 1);
    }
}
