//! Tag generation for span-resolved grid tables
//!
//! A generator walks the resolved grid and produces [`Fragment`]s: structural
//! tags, cell text still to be rendered, and literal lines. The cell text is
//! handed to a [`BlockRenderer`] when the fragments are joined into output.
//!
//! # Architecture
//!
//! ```text
//! Resolved Table -> TagGenerator -> Fragments -> BlockRenderer -> Output
//! ```

mod docbook;
mod html;

#[cfg(test)]
mod tests;

pub use docbook::DocBookGenerator;
pub use html::HtmlGenerator;

use std::fmt;
use std::str::FromStr;

use super::grid::{cell_alignment, Align, Position, Span, Table};

/// Output tag dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Html,
    /// CALS table model as used by DocBook
    DocBook,
    /// Unrecognized dialect: the table is checked and echoed unchanged
    Passthrough,
}

impl Target {
    /// Any unknown name selects pass-through
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "html" => Target::Html,
            "docbook" => Target::DocBook,
            _ => Target::Passthrough,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Target::Html => "html",
            Target::DocBook => "docbook",
            Target::Passthrough => "none",
        }
    }
}

impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Target::from_name(s))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece of generated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Markup emitted as is
    Tag(String),
    /// Cell text for the block renderer
    Content(String),
    /// A literal input line
    Text(String),
}

/// Renders the assembled text of one cell into target markup
pub trait BlockRenderer {
    fn render(&self, text: &str, target: Target) -> String;
}

/// Produces the fragment sequence for a resolved table
pub trait TagGenerator {
    fn generate(&self, table: &Table) -> Vec<Fragment>;
}

/// Join fragments, rendering cell content on the way
pub fn render_fragments(
    fragments: &[Fragment],
    renderer: &dyn BlockRenderer,
    target: Target,
) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Tag(tag) => out.push_str(tag),
            Fragment::Content(text) => out.push_str(renderer.render(text, target).trim_end()),
            Fragment::Text(line) => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

/// Alignment of a visible cell: colons in the separators it absorbed, else
/// the column default from the top border
pub fn resolved_align(table: &Table, pos: Position) -> Option<Align> {
    cell_alignment(&table.cell(pos).align_hsep)
        .or_else(|| table.column_align(pos.col))
}

/// Column and row extent of a visible cell
pub fn extent(table: &Table, pos: Position) -> (usize, usize) {
    let cell = table.cell(pos);
    (
        cell.colspan.width().unwrap_or(1),
        cell.rowspan.width().unwrap_or(1),
    )
}

/// Rebuild the visual text of a visible cell from every cell it covers.
///
/// Lines of horizontally merged cells are joined with the separator between
/// them, and the separator lines between merged rows are kept. Center and
/// right aligned text loses its leading spaces; otherwise the common
/// indentation is removed.
pub fn assemble_cell_text(table: &Table, pos: Position) -> String {
    let (width, height) = extent(table, pos);
    let cols = pos.col..pos.col + width;
    let mut lines: Vec<String> = Vec::new();

    for row in pos.row..pos.row + height {
        let first = table.cell(Position::new(row, pos.col));
        for i in 0..first.height() {
            let mut line = String::new();
            for col in cols.clone() {
                let cell = table.cell(Position::new(row, col));
                line.push_str(cell.content_lines.get(i).map(String::as_str).unwrap_or(""));
                if col + 1 < cols.end {
                    line.push(cell.vseps.get(i).copied().unwrap_or(' '));
                }
            }
            lines.push(line);
        }

        if row + 1 < pos.row + height {
            let mut line = String::new();
            for col in cols.clone() {
                let cell = table.cell(Position::new(row, col));
                line.push_str(&cell.closing_hsep);
                if col + 1 < cols.end {
                    line.push(cell.closing_isep);
                }
            }
            lines.push(line);
        }
    }

    let trims_leading = resolved_align(table, pos)
        .map(|a| a.trims_leading())
        .unwrap_or(false);
    normalize_lines(lines, trims_leading)
}

fn normalize_lines(lines: Vec<String>, trims_leading: bool) -> String {
    let mut lines: Vec<String> = lines
        .into_iter()
        .map(|l| {
            let l = l.trim_end();
            if trims_leading {
                l.trim_start().to_string()
            } else {
                l.to_string()
            }
        })
        .collect();

    if !trims_leading {
        let indent = lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().take_while(|&c| c == ' ').count())
            .min()
            .unwrap_or(0);
        for line in lines.iter_mut().filter(|l| !l.is_empty()) {
            *line = line.chars().skip(indent).collect();
        }
    }

    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

/// Visible cells of one row, left to right
pub fn visible_cells(table: &Table, row: usize) -> impl Iterator<Item = Position> + '_ {
    (1..=table.column_count())
        .map(move |col| Position::new(row, col))
        .filter(|&p| table.cell(p).is_visible())
}

/// Whether any cell merges across a column boundary
pub fn has_spans(table: &Table) -> bool {
    table.positions().any(|p| {
        let cell = table.cell(p);
        matches!(cell.colspan, Span::PartOf { .. }) || matches!(cell.rowspan, Span::PartOf { .. })
    })
}

/// Escape text for HTML and XML output
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the generator for a target, `None` for pass-through
pub fn generator_for(target: Target, header_cells: bool) -> Option<Box<dyn TagGenerator>> {
    match target {
        Target::Html => Some(Box::new(HtmlGenerator::new(header_cells))),
        Target::DocBook => Some(Box::new(DocBookGenerator::new())),
        Target::Passthrough => None,
    }
}
