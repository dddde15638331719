//! Line-driven state machine recognizing a grid table
//!
//! Every input line is handed to [`dispatch`] together with the current
//! [`ParseState`]. The handler for that state returns a [`Transition`]: the
//! next state, any diagnostics, and whether the same line must be looked at
//! again under the next state.

use lazy_static::lazy_static;
use regex::Regex;

use super::cell::Position;
use super::table::{ColumnGeometry, Table};
use crate::utils::diagnostics::{Diagnostic, Report};

const SEPARATOR_HELP: &str = "separators use - = _ : between + or # corners, without spaces";

lazy_static! {
    // Caption line: Table:<text>, only at column 0
    static ref CAPTION_PATTERN: Regex = Regex::new(r"^Table:(.*)$").unwrap();

    // One column of the initial row separator: hsep followed by isep
    static ref SEPARATOR_PAIR: Regex = Regex::new(r"^([-=_:]+)([+#])").unwrap();
}

/// States of the table recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Looking for the initial row separator
    BeforeTable,
    /// A content line is required
    RowLine,
    /// Inside a row: more content lines or the closing row separator
    RowSep,
    /// The table ended, only captions and blank lines may follow
    AfterTable,
    /// Terminal, nothing else is interpreted
    Error,
}

/// Result of feeding one line to the state machine
#[derive(Debug)]
pub struct Transition {
    pub next: ParseState,
    pub diagnostics: Vec<Diagnostic>,
    /// Handle the same line again in `next`
    pub reprocess: bool,
}

impl Transition {
    fn to(next: ParseState) -> Self {
        Transition {
            next,
            diagnostics: Vec::new(),
            reprocess: false,
        }
    }

    fn again(next: ParseState) -> Self {
        Transition {
            next,
            diagnostics: Vec::new(),
            reprocess: true,
        }
    }

    fn fail(diagnostic: Diagnostic) -> Self {
        Transition {
            next: ParseState::Error,
            diagnostics: vec![diagnostic],
            reprocess: false,
        }
    }

    fn with(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// An input line with its leading-space classification
#[derive(Debug)]
pub struct Line<'a> {
    /// 1-indexed line number
    pub number: usize,
    pub text: &'a str,
    pub chars: Vec<char>,
    /// Count of leading spaces
    pub indent: usize,
    /// First non-space character, `None` for a blank line
    pub first: Option<char>,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let indent = chars.iter().take_while(|&&c| c == ' ').count();
        let first = chars.get(indent).copied();
        Line {
            number,
            text,
            chars,
            indent,
            first,
        }
    }

    fn error(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::error(message)
            .with_line(self.number)
            .with_source(self.text)
    }

    fn error_at(&self, message: impl Into<String>, column: usize) -> Diagnostic {
        Diagnostic::error(message)
            .with_location(self.number, column + 1)
            .with_source(self.text)
    }
}

/// Everything the parser learned about one table
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub table: Table,
    pub report: Report,
    /// Input lines from the first one that was not interpreted
    pub unconsumed: Vec<String>,
    pub final_state: ParseState,
    /// A table was started and all of its rows were closed
    pub table_complete: bool,
}

/// Parse the lines of one table source region
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> ParseOutcome {
    let mut table = Table::new();
    let mut report = Report::new();
    let mut state = ParseState::BeforeTable;
    let mut table_complete = false;
    let mut consumed = lines.len();

    for (idx, raw) in lines.iter().enumerate() {
        let line = Line::new(idx + 1, raw.as_ref());

        if let Some(tab) = line.chars.iter().position(|&c| c == '\t') {
            if leaves_table(state, &table, &line) {
                table_complete = true;
            }
            report.add(
                line.error_at("tab character in table source", tab)
                    .with_suggestion("replace tabs with spaces"),
            );
            state = ParseState::Error;
        } else {
            loop {
                tracing::trace!(line = line.number, state = ?state, "grid table line");
                let transition = dispatch(state, &mut table, &line);
                for diag in transition.diagnostics {
                    report.add(diag);
                }
                if state == ParseState::RowSep && transition.next == ParseState::AfterTable {
                    table_complete = true;
                }
                state = transition.next;
                if !transition.reprocess {
                    break;
                }
            }
        }

        if state == ParseState::Error {
            consumed = idx;
            break;
        }
    }

    match state {
        ParseState::BeforeTable => {
            let line = lines.len() + 1;
            report.add(Diagnostic::error("no table found").with_line(line));
        }
        ParseState::RowLine => {
            report.add(
                Diagnostic::error("row ended unexpectedly: table has no rows")
                    .with_line(lines.len() + 1),
            );
        }
        ParseState::RowSep if table.current_row_has_content() => {
            report.add(
                Diagnostic::error("row ended unexpectedly: missing closing row separator")
                    .with_line(lines.len() + 1),
            );
        }
        ParseState::RowSep => table_complete = true,
        ParseState::AfterTable | ParseState::Error => {}
    }

    table.finish();
    table.line_count_consumed = consumed;
    table.result_severity = report.severity();

    let unconsumed = lines[consumed..]
        .iter()
        .map(|l| l.as_ref().to_string())
        .collect();

    tracing::debug!(
        rows = table.row_count().saturating_sub(1),
        columns = table.column_count(),
        severity = %table.result_severity,
        "grid table parsed"
    );

    ParseOutcome {
        table,
        report,
        unconsumed,
        final_state: state,
        table_complete,
    }
}

/// Feed one line to the handler of `state`
pub fn dispatch(state: ParseState, table: &mut Table, line: &Line) -> Transition {
    match state {
        ParseState::BeforeTable => before_table(table, line),
        ParseState::RowLine => row_line(table, line),
        ParseState::RowSep => row_sep(table, line),
        ParseState::AfterTable => after_table(table, line),
        ParseState::Error => Transition::to(ParseState::Error),
    }
}

fn before_table(table: &mut Table, line: &Line) -> Transition {
    if let Some(transition) = caption_line(table, line, ParseState::BeforeTable) {
        return transition;
    }
    match line.first {
        None => Transition::to(ParseState::BeforeTable),
        Some('+') | Some('#') => initial_separator(table, line),
        Some(_) => Transition::fail(
            line.error("garbage before table")
                .with_suggestion("a table starts with a row separator such as +---+"),
        ),
    }
}

fn after_table(table: &mut Table, line: &Line) -> Transition {
    if let Some(transition) = caption_line(table, line, ParseState::AfterTable) {
        return transition;
    }
    match line.first {
        None => Transition::to(ParseState::AfterTable),
        Some(_) => Transition::fail(line.error("garbage after table")),
    }
}

/// Record a `Table:` caption; the last one wins
fn caption_line(table: &mut Table, line: &Line, stay: ParseState) -> Option<Transition> {
    let caps = CAPTION_PATTERN.captures(line.text)?;
    let text = caps[1].trim().to_string();
    let mut transition = Transition::to(stay);
    if let Some(previous) = table.caption.replace(text) {
        transition = transition.with(
            Diagnostic::warning(format!("duplicate caption, replacing \"{}\"", previous))
                .with_line(line.number)
                .with_source(line.text),
        );
    }
    Some(transition)
}

/// Fix the column geometry from the table's first row separator
fn initial_separator(table: &mut Table, line: &Line) -> Transition {
    let indent = line.indent;
    let corner = line.chars[indent];
    // Only ASCII is consumed below, so byte and char offsets agree
    let mut pos = indent + 1;
    let mut columns = Vec::new();

    loop {
        let rest = &line.text[pos..];
        if rest.trim_end_matches(' ').is_empty() {
            if columns.is_empty() {
                return Transition::fail(line.error_at("no valid column found", pos));
            }
            break;
        }

        let Some(caps) = SEPARATOR_PAIR.captures(rest) else {
            let message = if columns.is_empty() {
                "no valid column found"
            } else {
                "garbage to the right of the table"
            };
            let diag = line.error_at(message, pos).with_suggestion(SEPARATOR_HELP);
            return Transition::fail(diag);
        };

        let hsep = caps[1].to_string();
        let isep = caps[2].chars().next().unwrap_or('+');
        let geometry = ColumnGeometry {
            hsep_start: pos,
            hsep_stop: pos + hsep.len(),
            isep_pos: pos + hsep.len(),
        };
        pos = geometry.isep_pos + 1;
        columns.push((geometry, hsep, isep));
    }

    table.start(indent, corner, columns);
    tracing::debug!(
        indent,
        columns = table.column_count(),
        "initial row separator"
    );

    let transition = Transition::to(ParseState::RowLine);
    if corner == '#' {
        transition.with(
            Diagnostic::info("single-line row mode is not supported, rows span multiple lines")
                .with_line(line.number),
        )
    } else {
        transition
    }
}

fn row_line(table: &mut Table, line: &Line) -> Transition {
    match line.first {
        Some('|') => content_line(table, line),
        Some('+') | Some('#') => Transition::fail(
            line.error("zero-height row: row separator where a content line was expected"),
        ),
        None => Transition::fail(line.error("row ended unexpectedly")),
        Some(_) => Transition::fail(line.error("table ended by garbage")),
    }
}

fn row_sep(table: &mut Table, line: &Line) -> Transition {
    match line.first {
        Some('|') => Transition::again(ParseState::RowLine),
        Some('+') | Some('#') if !table.current_row_has_content() => {
            Transition::fail(line.error("zero-height row: two row separators in a row"))
        }
        Some('+') | Some('#') => separator_line(table, line),
        None if table.current_row_has_content() => {
            Transition::fail(line.error("row ended unexpectedly: missing closing row separator"))
        }
        Some(_) if table.current_row_has_content() => {
            Transition::fail(line.error("table ended by garbage"))
        }
        _ => Transition::again(ParseState::AfterTable),
    }
}

/// The line cannot continue the table: it arrives after a closed row and
/// starts neither a content line nor a row separator
fn leaves_table(state: ParseState, table: &Table, line: &Line) -> bool {
    match state {
        ParseState::RowSep => {
            !table.current_row_has_content() && !matches!(line.first, Some('|' | '+' | '#'))
        }
        ParseState::AfterTable => true,
        _ => false,
    }
}

/// Indent and length checks shared by content and separator lines
fn check_shape(table: &Table, line: &Line) -> Option<Diagnostic> {
    let row = table.current_row();
    if line.indent != table.indent {
        return Some(
            line.error_at(
                format!(
                    "wrong indentation: expected {} spaces, found {}",
                    table.indent, line.indent
                ),
                line.indent,
            )
            .with_cell(Position::new(row, 1)),
        );
    }
    let expected = table.expected_line_len();
    if line.chars.len() < expected {
        let col = table.column_at(line.chars.len());
        return Some(
            line.error_at(
                format!(
                    "line too short: expected at least {} characters, found {}",
                    expected,
                    line.chars.len()
                ),
                line.chars.len(),
            )
            .with_cell(Position::new(row, col))
            .with_suggestion("pad the line to the width of the initial row separator"),
        );
    }
    None
}

fn content_line(table: &mut Table, line: &Line) -> Transition {
    if let Some(diag) = check_shape(table, line) {
        return Transition::fail(diag);
    }

    let mut parts = Vec::with_capacity(table.column_count() + 1);
    parts.push((String::new(), line.chars[table.indent]));
    for geometry in &table.columns {
        let text: String = line.chars[geometry.hsep_start..geometry.hsep_stop]
            .iter()
            .collect();
        parts.push((text, line.chars[geometry.isep_pos]));
    }
    table.push_content_line(parts);
    Transition::to(ParseState::RowSep)
}

fn separator_line(table: &mut Table, line: &Line) -> Transition {
    if let Some(diag) = check_shape(table, line) {
        return Transition::fail(diag);
    }

    let mut parts = Vec::with_capacity(table.column_count() + 1);
    parts.push((String::new(), line.chars[table.indent]));
    for geometry in &table.columns {
        let hsep: String = line.chars[geometry.hsep_start..geometry.hsep_stop]
            .iter()
            .collect();
        parts.push((hsep, line.chars[geometry.isep_pos]));
    }
    tracing::trace!(row = table.current_row(), "row closed");
    table.close_row(parts);
    Transition::to(ParseState::RowSep)
}
