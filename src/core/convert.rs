//! Grid table conversion pipeline
//!
//! Parse, resolve spans, generate tags, render cell content. Each call works
//! on a fresh [`Table`]; nothing is shared between tables.

use super::generate::{generator_for, has_spans, render_fragments, Fragment, Target};
use super::grid::{parse_table, resolve_spans, Table};
use crate::features::content::ContentFormat;
use crate::utils::diagnostics::Report;
use crate::utils::error::{GridTableError, GridTableResult, TableOutput};

/// Options for grid table conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTableOptions {
    /// Output tag dialect
    pub target: Target,
    /// How cell text is rendered
    pub content: ContentFormat,
    /// Use `<th>` for header cells in HTML
    pub header_cells: bool,
}

impl Default for GridTableOptions {
    fn default() -> Self {
        Self {
            target: Target::Html,
            content: ContentFormat::Markdown,
            header_cells: true,
        }
    }
}

impl GridTableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html() -> Self {
        Self::default()
    }

    pub fn docbook() -> Self {
        Self {
            target: Target::DocBook,
            ..Default::default()
        }
    }

    /// HTML output with cell text taken literally
    pub fn plain() -> Self {
        Self {
            content: ContentFormat::Plain,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

/// Convert the lines of one table source region.
///
/// A table whose rows were all closed is rendered even when an error
/// follows it (for example garbage after the table); an incomplete table
/// renders nothing. Lines from the first uninterpreted one onward are
/// returned in [`TableOutput::unconsumed`].
pub fn convert_grid_table<S: AsRef<str>>(
    lines: &[S],
    options: &GridTableOptions,
) -> TableOutput {
    let outcome = parse_table(lines);
    let mut report = outcome.report;
    let mut table = outcome.table;
    let unconsumed = outcome.unconsumed;

    if !outcome.table_complete {
        return TableOutput {
            content: String::new(),
            report,
            unconsumed,
        };
    }

    if let Err(err) = resolve_spans(&mut table) {
        tracing::warn!(error = %err, "span resolution failed");
        report.add(err.to_diagnostic());
        return TableOutput {
            content: String::new(),
            report,
            unconsumed: lines.iter().map(|l| l.as_ref().to_string()).collect(),
        };
    }

    let content = render_table(&table, &lines[..table.line_count_consumed], options);
    tracing::debug!(
        target_dialect = %options.target,
        spans = has_spans(&table),
        "grid table converted"
    );

    TableOutput {
        content,
        report,
        unconsumed,
    }
}

/// Pass-through emits the consumed source lines as literal text fragments
fn render_table<S: AsRef<str>>(
    table: &Table,
    consumed: &[S],
    options: &GridTableOptions,
) -> String {
    let fragments = match generator_for(options.target, options.header_cells) {
        Some(generator) => generator.generate(table),
        None => consumed
            .iter()
            .map(|line| Fragment::Text(line.as_ref().to_string()))
            .collect(),
    };
    let renderer = options.content.renderer();
    render_fragments(&fragments, renderer.as_ref(), options.target)
}

/// Convert table source text with options
pub fn convert_grid_table_text(input: &str, options: &GridTableOptions) -> TableOutput {
    let lines: Vec<&str> = input.lines().collect();
    convert_grid_table(&lines, options)
}

/// Convert table source text, failing on the first error
pub fn try_convert_grid_table(input: &str, options: &GridTableOptions) -> GridTableResult<String> {
    let output = convert_grid_table_text(input, options);
    match GridTableError::from_report(&output.report) {
        Some(err) => Err(err),
        None => Ok(output.content),
    }
}

/// Convert a grid table to HTML, echoing lines that could not be interpreted
pub fn grid_table_to_html(input: &str) -> String {
    let output = convert_grid_table_text(input, &GridTableOptions::html());
    output.to_text()
}

/// Convert a grid table to a DocBook (CALS) table
pub fn grid_table_to_docbook(input: &str) -> String {
    let output = convert_grid_table_text(input, &GridTableOptions::docbook());
    output.to_text()
}

/// Parse and resolve a grid table, returning only its diagnostics
pub fn check_grid_table(input: &str) -> Report {
    let lines: Vec<&str> = input.lines().collect();
    let outcome = parse_table(&lines);
    let mut report = outcome.report;
    let mut table = outcome.table;
    if outcome.table_complete {
        if let Err(err) = resolve_spans(&mut table) {
            report.add(err.to_diagnostic());
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::diagnostics::Severity;

    const SIMPLE: &str = "+---+---+\n| a | b |\n+---+---+\n";

    #[test]
    fn test_options_presets() {
        assert_eq!(GridTableOptions::new(), GridTableOptions::html());
        assert_eq!(GridTableOptions::docbook().target, Target::DocBook);
        assert_eq!(GridTableOptions::plain().content, ContentFormat::Plain);
        assert_eq!(
            GridTableOptions::new()
                .with_target(Target::Passthrough)
                .target,
            Target::Passthrough
        );
    }

    #[test]
    fn test_convert_simple() {
        let output = convert_grid_table_text(SIMPLE, &GridTableOptions::plain());
        assert_eq!(output.severity(), Severity::Ok);
        assert!(output.content.contains("<td>a</td>\n<td>b</td>"));
        assert!(output.unconsumed.is_empty());
    }

    #[test]
    fn test_passthrough_echoes_table() {
        let options = GridTableOptions::new().with_target(Target::Passthrough);
        let output = convert_grid_table_text(SIMPLE, &options);
        assert_eq!(output.content, SIMPLE);

        // Literal lines skip the cell renderer
        let emphasized = "Table: x\n+-----+\n| *a* |\n+-----+\n";
        let output = convert_grid_table_text(emphasized, &options);
        assert_eq!(output.content, emphasized);
    }

    #[test]
    fn test_incomplete_table_renders_nothing() {
        let output = convert_grid_table_text("+---+\n| a |\n", &GridTableOptions::new());
        assert_eq!(output.severity(), Severity::Error);
        assert!(output.content.is_empty());
    }

    #[test]
    fn test_complete_table_with_trailing_garbage() {
        let input = "+---+\n| a |\n+---+\nnot a table\n";
        let output = convert_grid_table_text(input, &GridTableOptions::plain());
        assert_eq!(output.severity(), Severity::Error);
        assert!(output.content.contains("<td>a</td>"));
        assert_eq!(output.unconsumed, vec!["not a table"]);
        assert!(output.to_text().ends_with("</table>\nnot a table\n"));
    }

    #[test]
    fn test_try_convert() {
        let options = GridTableOptions::plain();
        assert!(try_convert_grid_table(SIMPLE, &options).is_ok());
        let err = try_convert_grid_table("+---+\n|\ta |\n", &options).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_check_grid_table() {
        assert!(check_grid_table(SIMPLE).is_empty());
        let report = check_grid_table("Table: x\nTable: y\n+---+\n| a |\n+---+\n");
        assert_eq!(report.severity(), Severity::Warning);
    }
}
