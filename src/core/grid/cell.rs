//! Cell types for the grid table model

use std::fmt;

/// Grid coordinates. Row 0 and column 0 hold sentinel cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.col)
    }
}

/// Table section a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    Header,
    #[default]
    Body,
    Footer,
}

impl Section {
    pub fn html_tag(&self) -> &'static str {
        match self {
            Section::Header => "thead",
            Section::Body => "tbody",
            Section::Footer => "tfoot",
        }
    }
}

/// Horizontal cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// Attribute value shared by CSS `text-align` and CALS `align`
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }

    /// Center and right aligned text loses its leading padding
    pub fn trims_leading(&self) -> bool {
        matches!(self, Align::Center | Align::Right)
    }
}

/// Span state of a cell along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Span {
    /// Not computed yet
    #[default]
    Unresolved,
    /// The cell represents a merged group of `width` cells
    Anchor { width: usize },
    /// The cell is consumed; its anchor is `offset` cells to the left (or above)
    PartOf { offset: usize },
}

impl Span {
    pub fn single() -> Self {
        Span::Anchor { width: 1 }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Span::Anchor { .. })
    }

    /// Width of an anchor, `None` for consumed or unresolved cells
    pub fn width(&self) -> Option<usize> {
        match self {
            Span::Anchor { width } => Some(*width),
            _ => None,
        }
    }
}

/// Hidden flags for the four borders of a cell (`true` = hidden)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HiddenBorders {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl HiddenBorders {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// One grid position's complete record
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Text of each physical line the cell occupies
    pub content_lines: Vec<String>,
    /// Separator right of each content line
    pub vseps: Vec<char>,
    /// Horizontal separator below the cell
    pub closing_hsep: String,
    /// Separator at the lower-right corner
    pub closing_isep: char,
    /// Set once the row separator below the cell was read
    pub closed: bool,
    pub section: Section,
    /// Column default for row 0 cells, `None` elsewhere
    pub align: Option<Align>,
    /// The right boundary does not separate this cell from its neighbor
    pub h_spanning: bool,
    /// The bottom boundary does not separate this cell from its neighbor
    pub v_spanning: bool,
    pub colspan: Span,
    pub rowspan: Span,
    /// Border visibility as read from the separators
    pub hidden_at_close: HiddenBorders,
    /// Border visibility after merged cells propagated theirs to the anchor
    pub hidden: HiddenBorders,
    /// Closing separators of every cell merged into this one
    pub align_hsep: String,
}

impl Cell {
    /// Create an open cell waiting for content lines
    pub fn new() -> Self {
        Cell {
            closing_isep: '+',
            ..Default::default()
        }
    }

    /// Create a sentinel cell for row 0 or column 0
    pub fn sentinel() -> Self {
        Cell {
            closing_isep: '+',
            colspan: Span::single(),
            rowspan: Span::single(),
            ..Default::default()
        }
    }

    /// Append one physical line of content
    pub fn push_line(&mut self, text: String, vsep: char) {
        self.content_lines.push(text);
        self.vseps.push(vsep);
    }

    /// Anchors in both directions are the cells emitted as output
    pub fn is_visible(&self) -> bool {
        self.colspan.is_anchor() && self.rowspan.is_anchor()
    }

    /// Number of physical content lines
    pub fn height(&self) -> usize {
        self.content_lines.len()
    }
}
