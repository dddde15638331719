//! DocBook (CALS) table generation
//!
//! Column spans use `namest`/`nameend` against the `colspec` names `c1..cN`,
//! row spans use `morerows`. Hidden bottom and right borders become
//! `rowsep="0"` and `colsep="0"`; the other two sides belong to the
//! neighboring entries.

use super::{
    assemble_cell_text, escape_markup, extent, resolved_align, visible_cells, Fragment,
    TagGenerator,
};
use crate::core::grid::{Position, Section, Table};

#[derive(Debug, Clone, Copy, Default)]
pub struct DocBookGenerator;

impl DocBookGenerator {
    pub fn new() -> Self {
        DocBookGenerator
    }

    fn entry_open(&self, table: &Table, pos: Position) -> String {
        let cell = table.cell(pos);
        let (colspan, rowspan) = extent(table, pos);

        let mut tag = String::from("<entry");
        if colspan > 1 {
            tag.push_str(&format!(
                " namest=\"c{}\" nameend=\"c{}\"",
                pos.col,
                pos.col + colspan - 1
            ));
        }
        if rowspan > 1 {
            tag.push_str(&format!(" morerows=\"{}\"", rowspan - 1));
        }
        if let Some(align) = resolved_align(table, pos) {
            tag.push_str(&format!(" align=\"{}\"", align.as_str()));
        }
        if cell.hidden.bottom {
            tag.push_str(" rowsep=\"0\"");
        }
        if cell.hidden.right {
            tag.push_str(" colsep=\"0\"");
        }
        tag.push('>');
        tag
    }

    fn section(&self, table: &Table, section: Section, fragments: &mut Vec<Fragment>) {
        let rows: Vec<usize> = (1..table.row_count())
            .filter(|&r| table.section_of(r) == section)
            .collect();
        if rows.is_empty() {
            return;
        }

        fragments.push(Fragment::Tag(format!("<{}>\n", section.html_tag())));
        for row in rows {
            fragments.push(Fragment::Tag("<row>\n".to_string()));
            for pos in visible_cells(table, row) {
                fragments.push(Fragment::Tag(self.entry_open(table, pos)));
                fragments.push(Fragment::Content(assemble_cell_text(table, pos)));
                fragments.push(Fragment::Tag("</entry>\n".to_string()));
            }
            fragments.push(Fragment::Tag("</row>\n".to_string()));
        }
        fragments.push(Fragment::Tag(format!("</{}>\n", section.html_tag())));
    }
}

impl TagGenerator for DocBookGenerator {
    fn generate(&self, table: &Table) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let outer = match table.caption {
            Some(ref caption) => {
                fragments.push(Fragment::Tag("<table frame=\"all\">\n".to_string()));
                fragments.push(Fragment::Tag(format!(
                    "<title>{}</title>\n",
                    escape_markup(caption)
                )));
                "table"
            }
            None => {
                fragments.push(Fragment::Tag("<informaltable frame=\"all\">\n".to_string()));
                "informaltable"
            }
        };

        let cols = table.column_count();
        fragments.push(Fragment::Tag(format!("<tgroup cols=\"{}\">\n", cols)));
        for col in 1..=cols {
            let mut spec = format!("<colspec colname=\"c{}\" colnum=\"{}\"", col, col);
            if let Some(align) = table.column_align(col) {
                spec.push_str(&format!(" align=\"{}\"", align.as_str()));
            }
            spec.push_str("/>\n");
            fragments.push(Fragment::Tag(spec));
        }

        // CALS wants the footer ahead of the body
        for section in [Section::Header, Section::Footer, Section::Body] {
            self.section(table, section, &mut fragments);
        }

        fragments.push(Fragment::Tag("</tgroup>\n".to_string()));
        fragments.push(Fragment::Tag(format!("</{}>\n", outer)));
        fragments
    }
}
