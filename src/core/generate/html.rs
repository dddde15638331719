//! HTML table generation

use super::{
    assemble_cell_text, escape_markup, extent, resolved_align, visible_cells, Fragment,
    TagGenerator,
};
use crate::core::grid::{Position, Section, Table};

/// Emits `<table>` markup with `thead`/`tbody`/`tfoot` wrappers
#[derive(Debug, Clone, Copy)]
pub struct HtmlGenerator {
    /// Use `<th>` for cells in the header section
    pub header_cells: bool,
}

impl HtmlGenerator {
    pub fn new(header_cells: bool) -> Self {
        HtmlGenerator { header_cells }
    }

    fn cell_open(&self, table: &Table, pos: Position) -> String {
        let cell = table.cell(pos);
        let tag = if self.header_cells && cell.section == Section::Header {
            "th"
        } else {
            "td"
        };

        let mut tag_open = format!("<{}", tag);
        let (colspan, rowspan) = extent(table, pos);
        if colspan > 1 {
            tag_open.push_str(&format!(" colspan=\"{}\"", colspan));
        }
        if rowspan > 1 {
            tag_open.push_str(&format!(" rowspan=\"{}\"", rowspan));
        }

        let mut styles = Vec::new();
        if let Some(align) = resolved_align(table, pos) {
            styles.push(format!("text-align: {}", align.as_str()));
        }
        let hidden = cell.hidden;
        for (side, is_hidden) in [
            ("top", hidden.top),
            ("bottom", hidden.bottom),
            ("left", hidden.left),
            ("right", hidden.right),
        ] {
            if is_hidden {
                styles.push(format!("border-{}-style: hidden", side));
            }
        }
        if !styles.is_empty() {
            tag_open.push_str(&format!(" style=\"{}\"", styles.join("; ")));
        }
        tag_open.push('>');
        tag_open
    }
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TagGenerator for HtmlGenerator {
    fn generate(&self, table: &Table) -> Vec<Fragment> {
        let mut fragments = vec![Fragment::Tag("<table>\n".to_string())];
        if let Some(ref caption) = table.caption {
            fragments.push(Fragment::Tag(format!(
                "<caption>{}</caption>\n",
                escape_markup(caption)
            )));
        }

        let mut open: Option<Section> = None;
        for row in 1..table.row_count() {
            let section = table.section_of(row);
            if open != Some(section) {
                if let Some(previous) = open {
                    fragments.push(Fragment::Tag(format!("</{}>\n", previous.html_tag())));
                }
                fragments.push(Fragment::Tag(format!("<{}>\n", section.html_tag())));
                open = Some(section);
            }

            fragments.push(Fragment::Tag("<tr>\n".to_string()));
            for pos in visible_cells(table, row) {
                let tag = self.cell_open(table, pos);
                let close = if tag.starts_with("<th") {
                    "</th>\n"
                } else {
                    "</td>\n"
                };
                fragments.push(Fragment::Tag(tag));
                fragments.push(Fragment::Content(assemble_cell_text(table, pos)));
                fragments.push(Fragment::Tag(close.to_string()));
            }
            fragments.push(Fragment::Tag("</tr>\n".to_string()));
        }

        if let Some(section) = open {
            fragments.push(Fragment::Tag(format!("</{}>\n", section.html_tag())));
        }
        fragments.push(Fragment::Tag("</table>\n".to_string()));
        fragments
    }
}
