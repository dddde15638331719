//! Two-pass span resolution
//!
//! Pass 1 walks every row left to right and merges a cell into its left
//! neighbor when the boundary between them is not a real border. Pass 2
//! does the same top to bottom, but only between cells of the same section
//! that have identical column spans, so merged regions stay rectangular.
//!
//! Merged cells point back at their anchor with [`Span::PartOf`]; the anchor
//! counts them in [`Span::Anchor`] and takes over their border flags.

use super::boundary::{classify_hsep, classify_isep, classify_vsep, IsepClass, SectionHint};
use super::cell::{Cell, Position, Section, Span};
use super::table::Table;
use crate::utils::error::{GridTableError, GridTableResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Column spans, anchors lie to the left
    Horizontal,
    /// Row spans, anchors lie above
    Vertical,
}

impl Axis {
    fn span(self, cell: &Cell) -> Span {
        match self {
            Axis::Horizontal => cell.colspan,
            Axis::Vertical => cell.rowspan,
        }
    }

    fn span_mut(self, cell: &mut Cell) -> &mut Span {
        match self {
            Axis::Horizontal => &mut cell.colspan,
            Axis::Vertical => &mut cell.rowspan,
        }
    }

    /// The position `n` cells back along the axis, never reaching a sentinel
    fn back(self, pos: Position, n: usize) -> Option<Position> {
        match self {
            Axis::Horizontal => pos
                .col
                .checked_sub(n)
                .filter(|&c| c >= 1)
                .map(|col| Position::new(pos.row, col)),
            Axis::Vertical => pos
                .row
                .checked_sub(n)
                .filter(|&r| r >= 1)
                .map(|row| Position::new(row, pos.col)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "colspan",
            Axis::Vertical => "rowspan",
        }
    }
}

/// The right boundary does not separate the cell from its right neighbor
fn spans_right(cell: &Cell) -> bool {
    cell.vseps.iter().any(|&c| !classify_vsep(c).is_valid())
        || !matches!(
            classify_isep(cell.closing_isep),
            IsepClass::Intersection | IsepClass::ActsAsVsep
        )
}

/// The bottom boundary does not separate the cell from the cell below
fn spans_down(cell: &Cell) -> bool {
    !classify_hsep(&cell.closing_hsep).is_valid()
        || !matches!(
            classify_isep(cell.closing_isep),
            IsepClass::Intersection | IsepClass::ActsAsHsep
        )
}

/// Resolve every cell's column and row span.
///
/// Running it again on a resolved table gives the same result: all derived
/// state is reset from what the parser recorded.
pub fn resolve_spans(table: &mut Table) -> GridTableResult<()> {
    reset(table);
    stamp_sections(table);

    let rows = table.row_count();
    let cols = table.column_count();

    for row in 1..rows {
        for col in 1..=cols {
            resolve_horizontal(table, Position::new(row, col))?;
        }
    }
    for row in 1..rows {
        for col in 1..=cols {
            resolve_vertical(table, Position::new(row, col))?;
        }
    }

    if let Some(pos) = table.positions().find(|&p| {
        let cell = table.cell(p);
        cell.colspan == Span::Unresolved || cell.rowspan == Span::Unresolved
    }) {
        return Err(GridTableError::internal("span left unresolved", pos));
    }

    let visible = table
        .positions()
        .filter(|&p| table.cell(p).is_visible())
        .count();
    tracing::debug!(visible, "spans resolved");
    Ok(())
}

fn reset(table: &mut Table) {
    for (row, cells) in table.cells.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            cell.hidden = cell.hidden_at_close;
            cell.align_hsep.clear();
            cell.h_spanning = false;
            cell.v_spanning = false;
            if row == 0 || col == 0 {
                cell.colspan = Span::single();
                cell.rowspan = Span::single();
            } else {
                cell.colspan = Span::Unresolved;
                cell.rowspan = Span::Unresolved;
            }
        }
    }
}

/// Assign every row its section from the separators' `=` and `_` markers.
///
/// Rows start in the header when an `=` separator appears before any `_`
/// separator; `=` moves header rows to the body and `_` starts the footer.
fn stamp_sections(table: &mut Table) {
    let rows = table.row_count();
    let hint = |row: usize| table.row_hints.get(row).copied().flatten();

    let mut section = Section::Body;
    for row in 1..rows {
        match hint(row) {
            Some(SectionHint::EndsHeader) => {
                section = Section::Header;
                break;
            }
            Some(SectionHint::StartsFooter) => break,
            None => {}
        }
    }

    let mut stamped = Vec::with_capacity(rows);
    stamped.push(section);
    for row in 1..rows {
        stamped.push(section);
        section = match (section, hint(row)) {
            (_, Some(SectionHint::StartsFooter)) => Section::Footer,
            (Section::Header, Some(SectionHint::EndsHeader)) => Section::Body,
            (current, _) => current,
        };
    }

    for (cells, &section) in table.cells.iter_mut().zip(&stamped) {
        for cell in cells.iter_mut() {
            cell.section = section;
        }
    }
    table.section_of_row = stamped;
}

/// Step back from `pos` to the anchor of the span it continues, and count
/// the cell into that anchor.
fn join_anchor(table: &mut Table, pos: Position, axis: Axis) -> GridTableResult<Position> {
    let walk_error =
        || GridTableError::internal(format!("{} walk-back out of range", axis.name()), pos);

    let previous = axis.back(pos, 1).ok_or_else(walk_error)?;
    let (anchor, offset) = match axis.span(table.cell(previous)) {
        Span::Anchor { .. } => (previous, 1),
        Span::PartOf { offset } => (
            axis.back(previous, offset).ok_or_else(walk_error)?,
            offset + 1,
        ),
        Span::Unresolved => {
            return Err(GridTableError::internal(
                format!(
                    "{} of the previous cell used before it was resolved",
                    axis.name()
                ),
                previous,
            ));
        }
    };

    match axis.span_mut(table.cell_mut(anchor)) {
        Span::Anchor { width } => *width += 1,
        other => {
            return Err(GridTableError::internal(
                format!("{} walk-back from {} reached {:?}", axis.name(), pos, other),
                anchor,
            ));
        }
    }
    *axis.span_mut(table.cell_mut(pos)) = Span::PartOf { offset };
    Ok(anchor)
}

fn resolve_horizontal(table: &mut Table, pos: Position) -> GridTableResult<()> {
    {
        let cell = table.cell_mut(pos);
        cell.h_spanning = spans_right(cell);
        cell.v_spanning = spans_down(cell);
    }

    let left = Position::new(pos.row, pos.col - 1);
    if !table.cell(left).h_spanning {
        let cell = table.cell_mut(pos);
        cell.colspan = Span::single();
        cell.align_hsep = cell.closing_hsep.clone();
        return Ok(());
    }

    let anchor = join_anchor(table, pos, Axis::Horizontal)?;
    let (hidden, hsep) = {
        let cell = table.cell(pos);
        (cell.hidden, cell.closing_hsep.clone())
    };
    let target = table.cell_mut(anchor);
    target.hidden.right = hidden.right;
    target.hidden.top |= hidden.top;
    target.hidden.bottom |= hidden.bottom;
    target.align_hsep.push_str(&hsep);
    tracing::trace!(cell = %pos, anchor = %anchor, "merged into left neighbor");
    Ok(())
}

fn resolve_vertical(table: &mut Table, pos: Position) -> GridTableResult<()> {
    let above = Position::new(pos.row - 1, pos.col);
    let merges = {
        let upper = table.cell(above);
        let cell = table.cell(pos);
        upper.v_spanning && upper.section == cell.section && upper.colspan == cell.colspan
    };

    if !merges {
        table.cell_mut(pos).rowspan = Span::single();
        return Ok(());
    }

    let anchor = join_anchor(table, pos, Axis::Vertical)?;
    let (hidden, align_hsep) = {
        let cell = table.cell(pos);
        (cell.hidden, cell.align_hsep.clone())
    };
    let target = table.cell_mut(anchor);
    target.hidden.bottom = hidden.bottom;
    target.hidden.left |= hidden.left;
    target.hidden.right |= hidden.right;
    target.align_hsep = align_hsep;
    tracing::trace!(cell = %pos, anchor = %anchor, "merged into cell above");
    Ok(())
}
