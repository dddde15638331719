//! Core table engine
//!
//! This module contains the conversion stages:
//! - `grid`: line state machine, cell grid and span resolution
//! - `generate`: HTML and DocBook tag generation
//! - `convert`: the pipeline tying them together

pub mod convert;
pub mod generate;
pub mod grid;

// Re-export main types and functions
pub use convert::{
    check_grid_table, convert_grid_table, convert_grid_table_text, grid_table_to_docbook,
    grid_table_to_html, try_convert_grid_table, GridTableOptions,
};
pub use generate::{BlockRenderer, Fragment, TagGenerator, Target};
pub use grid::{parse_table, resolve_spans, ParseOutcome, Table};
