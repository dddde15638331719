//! Boundary classification for grid table separators
//!
//! Pure functions deciding what a run of separator characters means. The
//! parser uses them to recognize separator lines, the span resolver uses them
//! to decide which neighboring cells are merged.

use super::cell::Align;

/// Characters allowed in a horizontal separator
pub const HSEP_CHARS: [char; 5] = [' ', '-', '=', '_', ':'];

/// Validity of a vertical or horizontal separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryClass {
    /// The boundary is a border (possibly hidden)
    Valid,
    /// The boundary contains cell content, so the cells on both sides merge
    Invalid,
}

impl BoundaryClass {
    pub fn is_valid(self) -> bool {
        self == BoundaryClass::Valid
    }
}

/// Meaning of the character at a separator corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsepClass {
    /// `+` or `#`: both lines meet here
    Intersection,
    /// `|`: only the vertical line passes through
    ActsAsVsep,
    /// `-`, `=`, `_` or `:`: only the horizontal line passes through
    ActsAsHsep,
    Invalid,
}

/// Section transition carried by a horizontal separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionHint {
    /// Contains `=`: the rows above belong to the header
    EndsHeader,
    /// Contains `_`: the rows below belong to the footer
    StartsFooter,
}

pub fn classify_vsep(ch: char) -> BoundaryClass {
    match ch {
        ' ' | '|' => BoundaryClass::Valid,
        _ => BoundaryClass::Invalid,
    }
}

pub fn classify_hsep(s: &str) -> BoundaryClass {
    if s.chars().all(|c| HSEP_CHARS.contains(&c)) {
        BoundaryClass::Valid
    } else {
        BoundaryClass::Invalid
    }
}

pub fn classify_isep(ch: char) -> IsepClass {
    match ch {
        '+' | '#' => IsepClass::Intersection,
        '|' => IsepClass::ActsAsVsep,
        '-' | '=' | '_' | ':' => IsepClass::ActsAsHsep,
        _ => IsepClass::Invalid,
    }
}

/// Section marker of a horizontal separator; the footer marker wins.
pub fn section_hint(s: &str) -> Option<SectionHint> {
    if s.contains('_') {
        Some(SectionHint::StartsFooter)
    } else if s.contains('=') {
        Some(SectionHint::EndsHeader)
    } else {
        None
    }
}

/// Alignment encoded by colons at the ends of a horizontal separator.
///
/// A lone `:` is both the first and the last character, so it centers.
pub fn cell_alignment(hsep: &str) -> Option<Align> {
    let first = hsep.starts_with(':');
    let last = hsep.ends_with(':');
    match (first, last) {
        (true, true) => Some(Align::Center),
        (true, false) => Some(Align::Left),
        (false, true) => Some(Align::Right),
        (false, false) => None,
    }
}

/// A boundary is blank (its border hidden) when it has no visible character.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ')
}

pub fn is_blank_char(ch: char) -> bool {
    ch == ' '
}
