//! Integration tests for mcgtable grid table conversion

use mcgtable::{
    check_grid_table, convert_grid_table_text, diagnostics::format_diagnostics, filter_markdown,
    grid_table_to_docbook, grid_table_to_html, try_convert_grid_table, GridTableOptions, Severity,
    Target,
};

const MERGED_HEADER: &str = "\
+-----+-----+
|h1         |
+============+
|c1   |c2   |
+-----+-----+
";

const DIAGONAL_OVERLAP: &str = "\
+----+----+----+
| z1 | z5 | z6 |
+----+    |----+
| z3      | z7 |
+_________+____+
| f1 | f2 | f3 |
+----+----+----+
";

const SECTIONS: &str = "\
+---+
| h |
+===+
| b |
+___+
| f |
+---+
";

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merged_header_over_two_cells() {
        let expected = "<table>\n\
            <thead>\n<tr>\n<th colspan=\"2\">h1</th>\n</tr>\n</thead>\n\
            <tbody>\n<tr>\n<td>c1</td>\n<td>c2</td>\n</tr>\n</tbody>\n\
            </table>\n";
        assert_eq!(grid_table_to_html(MERGED_HEADER), expected);
    }

    #[test]
    fn test_non_rectangular_overlap_is_not_merged() {
        let html = grid_table_to_html(DIAGONAL_OVERLAP);
        assert!(html.contains("<td>z1</td>"));
        assert!(html.contains("<td style=\"border-bottom-style: hidden\">z5</td>"));
        assert!(html.contains("<td>z6</td>"));
        assert!(html.contains("<td colspan=\"2\" style=\"border-top-style: hidden\">z3</td>"));
        assert!(!html.contains("rowspan"));
        assert!(html.contains(
            "<tfoot>\n<tr>\n<td>f1</td>\n<td>f2</td>\n<td>f3</td>\n</tr>\n</tfoot>"
        ));
    }

    #[test]
    fn test_tab_leaves_rest_unconsumed() {
        let input = "+---+\n| a |\n|\tb |\n+---+\nafter\n";
        let output = convert_grid_table_text(input, &GridTableOptions::new());
        assert_eq!(output.severity(), Severity::Error);
        assert!(output.content.is_empty());
        assert_eq!(output.unconsumed, vec!["|\tb |", "+---+", "after"]);
        assert_eq!(output.to_text(), "|\tb |\n+---+\nafter\n");
    }

    #[test]
    fn test_tab_after_table_is_treated_as_garbage() {
        let options = GridTableOptions::plain();
        let garbage = convert_grid_table_text("+---+\n| a |\n+---+\njunk\n", &options);
        let tabbed = convert_grid_table_text("+---+\n| a |\n+---+\n\tjunk\n", &options);
        assert_eq!(tabbed.severity(), Severity::Error);
        assert_eq!(tabbed.content, garbage.content);
        assert!(tabbed.content.contains("<td>a</td>"));
        assert_eq!(tabbed.unconsumed, vec!["\tjunk"]);
    }

    #[test]
    fn test_short_line_fails() {
        let input = "+-----+\n| abc |\n| ab |\n+-----+\n";
        let output = convert_grid_table_text(input, &GridTableOptions::new());
        assert_eq!(output.severity(), Severity::Error);
        let diag = &output.report.diagnostics[0];
        assert!(diag.message.starts_with("line too short"));
        assert_eq!(diag.line, Some(3));
    }
}

// ============================================================================
// HTML output
// ============================================================================

mod html_output {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_body_footer() {
        let expected = "<table>\n\
            <thead>\n<tr>\n<th>h</th>\n</tr>\n</thead>\n\
            <tbody>\n<tr>\n<td>b</td>\n</tr>\n</tbody>\n\
            <tfoot>\n<tr>\n<td>f</td>\n</tr>\n</tfoot>\n\
            </table>\n";
        assert_eq!(grid_table_to_html(SECTIONS), expected);
    }

    #[test]
    fn test_indented_table_with_caption() {
        let input = "Table: Indented\n\n    +---+---+\n    | a | b |\n    +---+---+\n";
        let html = grid_table_to_html(input);
        assert!(html.starts_with("<table>\n<caption>Indented</caption>\n<tbody>"));
        assert!(html.contains("<td>a</td>\n<td>b</td>"));
    }

    #[test]
    fn test_rowspan_and_colspan_block() {
        let input = "\
+---+---+---+
| big   | x |
+       |---+
| block | y |
+---+---+---+
";
        let html = grid_table_to_html(input);
        assert!(html.contains("<td colspan=\"2\" rowspan=\"2\"><p>big</p>\n<p>block</p></td>"));
        assert!(html.contains("<tr>\n<td>y</td>\n</tr>"));
    }

    #[test]
    fn test_header_cells_can_be_disabled() {
        let options = GridTableOptions {
            header_cells: false,
            ..GridTableOptions::plain()
        };
        let output = convert_grid_table_text(SECTIONS, &options);
        assert!(output.content.contains("<thead>\n<tr>\n<td>h</td>"));
    }
}

// ============================================================================
// DocBook output
// ============================================================================

mod docbook_output {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_in_cals_order() {
        let expected = "<informaltable frame=\"all\">\n\
            <tgroup cols=\"1\">\n\
            <colspec colname=\"c1\" colnum=\"1\"/>\n\
            <thead>\n<row>\n<entry>h</entry>\n</row>\n</thead>\n\
            <tfoot>\n<row>\n<entry>f</entry>\n</row>\n</tfoot>\n\
            <tbody>\n<row>\n<entry>b</entry>\n</row>\n</tbody>\n\
            </tgroup>\n</informaltable>\n";
        assert_eq!(grid_table_to_docbook(SECTIONS), expected);
    }

    #[test]
    fn test_hidden_borders_as_separators() {
        let docbook = grid_table_to_docbook(DIAGONAL_OVERLAP);
        assert!(docbook.contains("<entry rowsep=\"0\">z5</entry>"));
        assert!(docbook.contains("<entry namest=\"c1\" nameend=\"c2\">z3</entry>"));
    }

    #[test]
    fn test_list_cell() {
        let input = "+---------+\n| - one   |\n| - two   |\n+---------+\n";
        let docbook = grid_table_to_docbook(input);
        assert!(docbook.contains(
            "<entry><itemizedlist><listitem><para>one</para></listitem>\
             <listitem><para>two</para></listitem></itemizedlist></entry>"
        ));
    }
}

// ============================================================================
// Cell content
// ============================================================================

mod cell_content {
    use super::*;

    #[test]
    fn test_markdown_inlines() {
        let input = "+-------------+\n| *emph* and  |\n| `code`      |\n+-------------+\n";
        let html = grid_table_to_html(input);
        assert!(html.contains("<td><em>emph</em> and\n<code>code</code></td>"));
    }

    #[test]
    fn test_markdown_list() {
        let input = "+---------+\n| - one   |\n| - two   |\n+---------+\n";
        let html = grid_table_to_html(input);
        assert!(html.contains("<td><ul>\n<li>one</li>\n<li>two</li>\n</ul></td>"));
    }

    #[test]
    fn test_plain_content_is_escaped() {
        let input = "+-------+\n| a < b |\n| *c*   |\n+-------+\n";
        let output = convert_grid_table_text(input, &GridTableOptions::plain());
        assert!(output.content.contains("<td>a &lt; b<br/>\n*c*</td>"));
    }

    #[test]
    fn test_aligned_text_is_trimmed() {
        let input = "+------:+\n|    42 |\n+-------+\n";
        let html = grid_table_to_html(input);
        assert!(html.contains("<td style=\"text-align: right\">42</td>"));
    }
}

// ============================================================================
// Markdown filter mode
// ============================================================================

mod filter_mode {
    use super::*;

    #[test]
    fn test_multiple_blocks() {
        let doc = format!(
            "Intro\n\n```mcgtable\n{}```\n\ntext\n\n````mcgtable\n{}````\n",
            MERGED_HEADER, SECTIONS
        );
        let out = filter_markdown(&doc, &GridTableOptions::new());
        assert_eq!(out.tables, 2);
        assert_eq!(out.failed, 0);
        assert!(out.text.starts_with("Intro\n\n<table>\n<thead>"));
        assert!(out.text.contains("</table>\n\ntext\n\n<table>"));
        assert!(!out.text.contains("mcgtable"));
    }

    #[test]
    fn test_other_code_blocks_untouched() {
        let doc = "```rust\nfn main() {}\n```\n";
        let out = filter_markdown(doc, &GridTableOptions::new());
        assert_eq!(out.text, doc);
        assert!(out.report.is_empty());
    }

    #[test]
    fn test_failed_block_kept() {
        let doc = "```mcgtable\n+---+\n|\tx |\n+---+\n```\nend\n";
        let out = filter_markdown(doc, &GridTableOptions::docbook());
        assert_eq!(out.text, doc);
        assert_eq!(out.failed, 1);
        assert_eq!(out.report.diagnostics[0].line, Some(3));
    }
}

// ============================================================================
// Diagnostics and options
// ============================================================================

mod diagnostics {
    use super::*;

    #[test]
    fn test_check_reports_location() {
        let report = check_grid_table("+---+\n| a\n");
        assert!(report.has_errors());
        let text = format_diagnostics(&report, false);
        assert!(text.contains("error: line too short"));
        assert!(text.contains("--> line 2:4"));
        assert!(text.ends_with("Summary: 1 error"));
    }

    #[test]
    fn test_duplicate_caption_is_a_warning() {
        let input = "Table: one\nTable: two\n+---+\n| a |\n+---+\n";
        let output = convert_grid_table_text(input, &GridTableOptions::new());
        assert_eq!(output.severity(), Severity::Warning);
        assert!(output.content.contains("<caption>two</caption>"));
    }

    #[test]
    fn test_garbage_before_table() {
        let options = GridTableOptions::new();
        let err = try_convert_grid_table("hello\n+---+\n", &options).unwrap_err();
        assert!(err.to_string().contains("garbage before table"));
    }

    #[test]
    fn test_passthrough_target() {
        let target = Target::from_name("rst");
        let options = GridTableOptions::new().with_target(target);
        let output = convert_grid_table_text(SECTIONS, &options);
        assert_eq!(output.content, SECTIONS);
        assert_eq!(output.severity(), Severity::Ok);
    }
}
