//! Tests for HTML and DocBook tag generation

use super::*;
use crate::core::grid::{parse_table, resolve_spans};

/// Hands cell text through unchanged
struct Verbatim;

impl BlockRenderer for Verbatim {
    fn render(&self, text: &str, _target: Target) -> String {
        text.to_string()
    }
}

fn table(lines: &[&str]) -> Table {
    let mut outcome = parse_table(lines);
    assert!(
        !outcome.report.has_errors(),
        "{:?}",
        outcome.report.diagnostics
    );
    resolve_spans(&mut outcome.table).unwrap();
    outcome.table
}

fn html(lines: &[&str]) -> String {
    let fragments = HtmlGenerator::new(true).generate(&table(lines));
    render_fragments(&fragments, &Verbatim, Target::Html)
}

fn docbook(lines: &[&str]) -> String {
    let fragments = DocBookGenerator::new().generate(&table(lines));
    render_fragments(&fragments, &Verbatim, Target::DocBook)
}

const MERGED_HEADER: [&str; 5] = [
    "+-----+-----+",
    "|h1         |",
    "+============+",
    "|c1   |c2   |",
    "+-----+-----+",
];

const ALIGNED: [&str; 3] = [
    "+:----+----:+:---:+",
    "| a   |   b |  c  |",
    "+-----+-----+-----+",
];

const BLOCK: [&str; 5] = [
    "+---+---+---+",
    "| big   | x |",
    "+       |---+",
    "| block | y |",
    "+---+---+---+",
];

#[test]
fn test_target_names() {
    assert_eq!(Target::from_name("html"), Target::Html);
    assert_eq!(Target::from_name(" DocBook "), Target::DocBook);
    assert_eq!(Target::from_name("rst"), Target::Passthrough);
    assert_eq!("docbook".parse::<Target>(), Ok(Target::DocBook));
    assert_eq!(Target::Passthrough.to_string(), "none");
}

#[test]
fn test_html_merged_header() {
    let expected = "<table>\n\
        <thead>\n<tr>\n<th colspan=\"2\">h1</th>\n</tr>\n</thead>\n\
        <tbody>\n<tr>\n<td>c1</td>\n<td>c2</td>\n</tr>\n</tbody>\n\
        </table>\n";
    assert_eq!(html(&MERGED_HEADER), expected);
}

#[test]
fn test_html_without_header_cells() {
    let fragments = HtmlGenerator::new(false).generate(&table(&MERGED_HEADER));
    let out = render_fragments(&fragments, &Verbatim, Target::Html);
    assert!(out.contains("<thead>\n<tr>\n<td colspan=\"2\">h1</td>"));
    assert!(!out.contains("<th"));
}

#[test]
fn test_html_footer_and_hidden_borders() {
    let out = html(&[
        "+----+----+----+",
        "| z1 | z5 | z6 |",
        "+----+    |----+",
        "| z3      | z7 |",
        "+_________+____+",
        "| f1 | f2 | f3 |",
        "+----+----+----+",
    ]);
    assert!(out.contains("<td style=\"border-bottom-style: hidden\">z5</td>"));
    assert!(out.contains("<td colspan=\"2\" style=\"border-top-style: hidden\">z3</td>"));
    assert!(out.contains("</tbody>\n<tfoot>\n<tr>\n<td>f1</td>"));
    assert!(out.ends_with("</tfoot>\n</table>\n"));
    assert!(!out.contains("<thead>"));
}

#[test]
fn test_html_alignment() {
    let out = html(&ALIGNED);
    assert!(out.contains("<td style=\"text-align: left\">a</td>"));
    assert!(out.contains("<td style=\"text-align: right\">b</td>"));
    assert!(out.contains("<td style=\"text-align: center\">c</td>"));
}

#[test]
fn test_cell_alignment_overrides_column() {
    let out = html(&[
        "+-----+-----+",
        "| a   | b   |",
        "+-----+:---:+",
    ]);
    assert!(out.contains("<td>a</td>"));
    assert!(out.contains("<td style=\"text-align: center\">b</td>"));
}

#[test]
fn test_html_rowspan() {
    let out = html(&[
        "+---+---+",
        "| a | b |",
        "+   |---+",
        "|   | c |",
        "+---+---+",
    ]);
    assert!(out.contains("<tr>\n<td rowspan=\"2\">a</td>\n<td>b</td>\n</tr>"));
    assert!(out.contains("<tr>\n<td>c</td>\n</tr>"));
}

#[test]
fn test_caption_is_escaped() {
    let mut lines = vec!["Table: A & B"];
    lines.extend_from_slice(&MERGED_HEADER);
    let out = html(&lines);
    assert!(out.starts_with("<table>\n<caption>A &amp; B</caption>\n<thead>"));

    let out = docbook(&lines);
    assert!(
        out.starts_with("<table frame=\"all\">\n<title>A &amp; B</title>\n<tgroup cols=\"2\">")
    );
    assert!(out.ends_with("</tgroup>\n</table>\n"));
}

#[test]
fn test_docbook_merged_header() {
    let expected = "<informaltable frame=\"all\">\n\
        <tgroup cols=\"2\">\n\
        <colspec colname=\"c1\" colnum=\"1\"/>\n\
        <colspec colname=\"c2\" colnum=\"2\"/>\n\
        <thead>\n<row>\n<entry namest=\"c1\" nameend=\"c2\">h1</entry>\n</row>\n</thead>\n\
        <tbody>\n<row>\n<entry>c1</entry>\n<entry>c2</entry>\n</row>\n</tbody>\n\
        </tgroup>\n</informaltable>\n";
    assert_eq!(docbook(&MERGED_HEADER), expected);
}

#[test]
fn test_docbook_block_and_colspecs() {
    let out = docbook(&BLOCK);
    assert!(
        out.contains("<entry namest=\"c1\" nameend=\"c2\" morerows=\"1\">big\n\nblock</entry>")
    );

    let out = docbook(&ALIGNED);
    assert!(out.contains("<colspec colname=\"c1\" colnum=\"1\" align=\"left\"/>"));
    assert!(out.contains("<colspec colname=\"c3\" colnum=\"3\" align=\"center\"/>"));
    assert!(out.contains("<entry align=\"right\">b</entry>"));
}

#[test]
fn test_docbook_footer_precedes_body() {
    let out = docbook(&[
        "+---+",
        "| h |",
        "+===+",
        "| b |",
        "+___+",
        "| f |",
        "+---+",
    ]);
    let thead = out.find("<thead>").unwrap();
    let tfoot = out.find("<tfoot>").unwrap();
    let tbody = out.find("<tbody>").unwrap();
    assert!(thead < tfoot && tfoot < tbody);
}

#[test]
fn test_assemble_block_text() {
    let table = table(&BLOCK);
    assert_eq!(
        assemble_cell_text(&table, Position::new(1, 1)),
        "big\n\nblock"
    );
    assert_eq!(assemble_cell_text(&table, Position::new(1, 3)), "x");
}

#[test]
fn test_assemble_keeps_relative_indent() {
    let table = table(&[
        "+--------+",
        "| - a    |",
        "|   - b  |",
        "+--------+",
    ]);
    assert_eq!(
        assemble_cell_text(&table, Position::new(1, 1)),
        "- a\n  - b"
    );
}

#[test]
fn test_render_fragments_text_lines() {
    let fragments = vec![
        Fragment::Tag("<p>".to_string()),
        Fragment::Content("x\n".to_string()),
        Fragment::Tag("</p>\n".to_string()),
        Fragment::Text("+--+".to_string()),
    ];
    assert_eq!(
        render_fragments(&fragments, &Verbatim, Target::Html),
        "<p>x</p>\n+--+\n"
    );
}

#[test]
fn test_generator_for_passthrough() {
    assert!(generator_for(Target::Passthrough, true).is_none());
    assert!(generator_for(Target::DocBook, true).is_some());
}

#[test]
fn test_has_spans() {
    assert!(has_spans(&table(&BLOCK)));
    assert!(!has_spans(&table(&ALIGNED)));
}
