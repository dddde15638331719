//! The cell grid built while scanning one table

use super::boundary::{
    cell_alignment, classify_hsep, is_blank, is_blank_char, section_hint, SectionHint,
};
use super::cell::{Align, Cell, Position, Section};
use crate::utils::diagnostics::Severity;

/// Character offsets of one column within a separator or content line.
///
/// The text of the column is `hsep_start..hsep_stop` (half open) and the
/// separator right of it sits at `isep_pos`, which always equals `hsep_stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGeometry {
    pub hsep_start: usize,
    pub hsep_stop: usize,
    pub isep_pos: usize,
}

impl ColumnGeometry {
    pub fn width(&self) -> usize {
        self.hsep_stop - self.hsep_start
    }
}

/// How content lines map to rows, selected by the table's first character.
///
/// Only multi-line rows are interpreted; a `#` table is tagged as
/// single-line but parsed the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMode {
    #[default]
    MultiLine,
    SingleLine,
}

/// One table being processed
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Spaces before the table's first character
    pub indent: usize,
    /// Geometry of declared columns 1..=N, stored at index col - 1
    pub columns: Vec<ColumnGeometry>,
    /// Rows of cells, row 0 and column 0 are sentinels
    pub cells: Vec<Vec<Cell>>,
    /// Section of each row, stamped by span resolution
    pub section_of_row: Vec<Section>,
    /// Section marker of each row's closing separator at column 1
    pub row_hints: Vec<Option<SectionHint>>,
    pub caption: Option<String>,
    pub line_count_consumed: usize,
    pub result_severity: Severity,
    pub row_mode: RowMode,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the column geometry and create the sentinel row 0.
    ///
    /// `corner` is the separator's first character; each column comes with its
    /// horizontal separator and the character right of it.
    pub fn start(
        &mut self,
        indent: usize,
        corner: char,
        columns: Vec<(ColumnGeometry, String, char)>,
    ) {
        self.indent = indent;
        self.row_mode = if corner == '#' {
            RowMode::SingleLine
        } else {
            RowMode::MultiLine
        };

        let mut separators = Vec::with_capacity(columns.len() + 1);
        separators.push((String::new(), corner));
        self.columns.clear();
        for (geometry, hsep, isep) in columns {
            self.columns.push(geometry);
            separators.push((hsep, isep));
        }

        self.cells = vec![vec![Cell::sentinel(); self.columns.len() + 1]];
        self.row_hints = vec![None];
        self.section_of_row.clear();
        self.close_row(separators);
    }

    /// Number of declared columns (sentinel excluded)
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows including the sentinel row 0
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Minimum length of every content and separator line
    pub fn expected_line_len(&self) -> usize {
        self.columns
            .last()
            .map(|c| c.isep_pos + 1)
            .unwrap_or(self.indent + 1)
    }

    /// Column (1-based) whose text or right separator covers a character
    /// offset; offsets left of column 1 map to 1, offsets past the last
    /// separator to the last column
    pub fn column_at(&self, offset: usize) -> usize {
        self.columns
            .iter()
            .position(|c| offset <= c.isep_pos)
            .map(|idx| idx + 1)
            .unwrap_or(self.columns.len())
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    /// Index of the row currently receiving content lines
    pub fn current_row(&self) -> usize {
        self.cells.len() - 1
    }

    /// Whether the current row has received any content line
    pub fn current_row_has_content(&self) -> bool {
        self.cells
            .last()
            .and_then(|row| row.first())
            .map(|cell| cell.height() > 0)
            .unwrap_or(false)
    }

    /// Append one content line, given as the text and right separator of
    /// each column (column 0 first)
    pub fn push_content_line(&mut self, parts: Vec<(String, char)>) {
        if let Some(row) = self.cells.last_mut() {
            for (cell, (text, vsep)) in row.iter_mut().zip(parts) {
                cell.push_line(text, vsep);
            }
        }
    }

    /// Close every cell of the current row and open the next one.
    ///
    /// Only the section marker is recorded here; sections themselves are
    /// assigned during span resolution.
    pub fn close_row(&mut self, separators: Vec<(String, char)>) {
        let row = self.current_row();
        let mut hint = None;
        for (col, (hsep, isep)) in separators.into_iter().enumerate() {
            // The top border carries alignment only
            if row > 0 && col == 1 && classify_hsep(&hsep).is_valid() {
                hint = section_hint(&hsep);
            }
            self.close_cell(Position::new(row, col), hsep, isep);
        }
        self.row_hints[row] = hint;

        let mut next = vec![Cell::new(); self.columns.len() + 1];
        next[0] = Cell::sentinel();
        self.cells.push(next);
        self.row_hints.push(None);
    }

    /// Store a cell's closing separators and derive its border visibility
    pub fn close_cell(&mut self, pos: Position, hsep: String, isep: char) {
        let hide_left = if pos.col == 0 {
            false
        } else {
            self.cells[pos.row][pos.col - 1].hidden_at_close.right
        };
        let hide_top = if pos.row == 0 {
            false
        } else {
            self.cells[pos.row - 1][pos.col].hidden_at_close.bottom
        };

        let cell = self.cell_mut(pos);
        cell.align = if pos.row == 0 {
            cell_alignment(&hsep)
        } else {
            None
        };
        cell.hidden_at_close.bottom = is_blank(&hsep);
        cell.hidden_at_close.right = cell.vseps.iter().all(|&c| is_blank_char(c));
        cell.hidden_at_close.left = hide_left;
        cell.hidden_at_close.top = hide_top;
        cell.hidden = cell.hidden_at_close;
        cell.closing_hsep = hsep;
        cell.closing_isep = isep;
        cell.closed = true;
    }

    /// Drop the trailing row that was opened but never received content
    pub fn finish(&mut self) {
        if self.cells.len() > 1 && !self.current_row_has_content() {
            self.cells.pop();
            self.row_hints.pop();
        }
    }

    /// Default alignment of a column, from the initial row separator
    pub fn column_align(&self, col: usize) -> Option<Align> {
        self.cells
            .first()
            .and_then(|row| row.get(col))
            .and_then(|c| c.align)
    }

    pub fn section_of(&self, row: usize) -> Section {
        self.section_of_row.get(row).copied().unwrap_or_default()
    }

    /// Positions of all real cells, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.column_count();
        (1..self.row_count())
            .flat_map(move |row| (1..=cols).map(move |col| Position::new(row, col)))
    }
}
