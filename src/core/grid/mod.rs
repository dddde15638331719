//! Grid table recognition and span resolution
//!
//! Turns the lines of an ASCII grid table into a cell grid whose merged
//! regions are known, ready for the tag generators.
//!
//! # Architecture
//!
//! ```text
//! Lines -> Boundary Classification -> State Machine -> Cell Grid -> Span Resolution
//! ```
//!
//! # Example
//!
//! ```
//! use mcgtable::core::grid::{parse_table, resolve_spans, Position, Span};
//!
//! let lines = [
//!     "+-----+-----+",
//!     "| merged    |",
//!     "+-----+-----+",
//! ];
//! let mut outcome = parse_table(&lines);
//! resolve_spans(&mut outcome.table).unwrap();
//! let cell = outcome.table.cell(Position::new(1, 1));
//! assert_eq!(cell.colspan, Span::Anchor { width: 2 });
//! ```

pub mod boundary;
mod cell;
mod parser;
mod resolver;
mod table;


// Re-export public API
pub use boundary::{
    cell_alignment, classify_hsep, classify_isep, classify_vsep, section_hint, BoundaryClass,
    IsepClass, SectionHint,
};
pub use cell::{Align, Cell, HiddenBorders, Position, Section, Span};
pub use parser::{dispatch, parse_table, Line, ParseOutcome, ParseState, Transition};
pub use resolver::resolve_spans;
pub use table::{ColumnGeometry, RowMode, Table};
