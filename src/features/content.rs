//! Cell content rendering
//!
//! The assembled text of a cell is a small Markdown document. With the
//! `markdown` feature it goes through pulldown-cmark: HTML output uses the
//! stock HTML writer, DocBook output maps the event stream onto DocBook
//! elements. A cell holding a single paragraph is emitted without the
//! paragraph wrapper.

use crate::core::generate::{escape_markup, BlockRenderer, Target};

/// How cell text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormat {
    /// Markdown blocks and inlines
    #[default]
    Markdown,
    /// Literal text, escaped
    Plain,
}

impl ContentFormat {
    /// The renderer for this format.
    ///
    /// Without the `markdown` feature Markdown content is rendered as plain
    /// text.
    pub fn renderer(&self) -> Box<dyn BlockRenderer> {
        match self {
            #[cfg(feature = "markdown")]
            ContentFormat::Markdown => Box::new(MarkdownContent::new()),
            #[cfg(not(feature = "markdown"))]
            ContentFormat::Markdown => {
                tracing::warn!("markdown support not compiled in, rendering cells as plain text");
                Box::new(PlainContent)
            }
            ContentFormat::Plain => Box::new(PlainContent),
        }
    }
}

/// Escapes the text; line breaks survive as `<br/>` in HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainContent;

impl BlockRenderer for PlainContent {
    fn render(&self, text: &str, target: Target) -> String {
        match target {
            Target::Html => text
                .lines()
                .map(escape_markup)
                .collect::<Vec<_>>()
                .join("<br/>\n"),
            Target::DocBook => escape_markup(text),
            Target::Passthrough => text.to_string(),
        }
    }
}

#[cfg(feature = "markdown")]
pub use markdown::MarkdownContent;

#[cfg(feature = "markdown")]
mod markdown {
    use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

    use super::escape_markup;
    use crate::core::generate::{BlockRenderer, Target};

    /// Markdown cell content via pulldown-cmark
    #[derive(Debug, Clone, Copy)]
    pub struct MarkdownContent {
        options: Options,
    }

    impl MarkdownContent {
        pub fn new() -> Self {
            MarkdownContent {
                options: Options::ENABLE_STRIKETHROUGH,
            }
        }

        fn events<'a>(&self, text: &'a str) -> Vec<Event<'a>> {
            let events: Vec<Event<'a>> = Parser::new_ext(text, self.options).collect();
            unwrap_single_paragraph(events)
        }
    }

    impl Default for MarkdownContent {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BlockRenderer for MarkdownContent {
        fn render(&self, text: &str, target: Target) -> String {
            match target {
                Target::Html => {
                    let mut out = String::new();
                    html::push_html(&mut out, self.events(text).into_iter());
                    out
                }
                Target::DocBook => {
                    let mut writer = DocBookWriter::default();
                    for event in self.events(text) {
                        writer.event(event);
                    }
                    writer.finish()
                }
                Target::Passthrough => text.to_string(),
            }
        }
    }

    /// Drop the wrapper when the whole text is one paragraph
    fn unwrap_single_paragraph(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
        let mut depth = 0usize;
        let mut top_level = 0usize;
        for event in &events {
            match event {
                Event::Start(_) => {
                    if depth == 0 {
                        top_level += 1;
                    }
                    depth += 1;
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                _ if depth == 0 => top_level += 1,
                _ => {}
            }
        }

        let single = top_level == 1
            && matches!(events.first(), Some(Event::Start(Tag::Paragraph)))
            && matches!(events.last(), Some(Event::End(TagEnd::Paragraph)));
        if single {
            let len = events.len();
            events.into_iter().skip(1).take(len - 2).collect()
        } else {
            events
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Block {
        Item,
        Other,
    }

    /// Writes DocBook elements for a Markdown event stream
    #[derive(Debug, Default)]
    struct DocBookWriter {
        out: String,
        blocks: Vec<Block>,
        /// A `<para>` opened for inline content directly inside a list item
        implicit_para: bool,
        /// Inside an image, whose text is its alt text
        image_depth: usize,
        in_code_block: bool,
    }

    impl DocBookWriter {
        fn event(&mut self, event: Event<'_>) {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) => {
                    if self.image_depth > 0 {
                        return;
                    }
                    if !self.in_code_block {
                        self.inline();
                    }
                    self.out.push_str(&escape_markup(&text));
                }
                Event::Code(code) => {
                    self.inline();
                    self.out.push_str("<literal>");
                    self.out.push_str(&escape_markup(&code));
                    self.out.push_str("</literal>");
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    self.inline();
                    self.out.push_str(&escape_markup(&raw));
                }
                Event::SoftBreak | Event::HardBreak => self.out.push('\n'),
                _ => {}
            }
        }

        /// Inline content needs a paragraph when it sits directly in an item
        fn inline(&mut self) {
            if self.blocks.last() == Some(&Block::Item) && !self.implicit_para {
                self.out.push_str("<para>");
                self.implicit_para = true;
            }
        }

        fn close_implicit_para(&mut self) {
            if self.implicit_para {
                self.out.push_str("</para>");
                self.implicit_para = false;
            }
        }

        fn open_block(&mut self, block: Block, tag: &str) {
            self.close_implicit_para();
            self.blocks.push(block);
            self.out.push_str(tag);
        }

        fn close_block(&mut self, tag: &str) {
            self.close_implicit_para();
            self.blocks.pop();
            self.out.push_str(tag);
        }

        fn start(&mut self, tag: Tag<'_>) {
            match tag {
                Tag::Paragraph => self.open_block(Block::Other, "<para>"),
                Tag::Heading { .. } => self.open_block(Block::Other, "<bridgehead>"),
                Tag::BlockQuote(_) => self.open_block(Block::Other, "<blockquote>"),
                Tag::CodeBlock(kind) => {
                    let open = match kind {
                        CodeBlockKind::Fenced(ref lang) if !lang.is_empty() => format!(
                            "<programlisting language=\"{}\">",
                            escape_markup(lang)
                        ),
                        _ => "<programlisting>".to_string(),
                    };
                    self.open_block(Block::Other, &open);
                    self.in_code_block = true;
                }
                Tag::List(Some(_)) => self.open_block(Block::Other, "<orderedlist>"),
                Tag::List(None) => self.open_block(Block::Other, "<itemizedlist>"),
                Tag::Item => self.open_block(Block::Item, "<listitem>"),
                Tag::Emphasis => self.inline_tag("<emphasis>"),
                Tag::Strong => self.inline_tag("<emphasis role=\"strong\">"),
                Tag::Strikethrough => self.inline_tag("<emphasis role=\"strikethrough\">"),
                Tag::Superscript => self.inline_tag("<superscript>"),
                Tag::Subscript => self.inline_tag("<subscript>"),
                Tag::Link { dest_url, .. } => {
                    let open = format!("<ulink url=\"{}\">", escape_markup(&dest_url));
                    self.inline_tag(&open);
                }
                Tag::Image { dest_url, .. } => {
                    let image = format!(
                        "<inlinemediaobject><imageobject>\
                         <imagedata fileref=\"{}\"/>\
                         </imageobject></inlinemediaobject>",
                        escape_markup(&dest_url)
                    );
                    self.inline_tag(&image);
                    self.image_depth += 1;
                }
                _ => {}
            }
        }

        fn inline_tag(&mut self, tag: &str) {
            self.inline();
            self.out.push_str(tag);
        }

        fn end(&mut self, tag: TagEnd) {
            match tag {
                TagEnd::Paragraph => self.close_block("</para>"),
                TagEnd::Heading(_) => self.close_block("</bridgehead>"),
                TagEnd::BlockQuote(_) => self.close_block("</blockquote>"),
                TagEnd::CodeBlock => {
                    self.in_code_block = false;
                    self.close_block("</programlisting>");
                }
                TagEnd::List(true) => self.close_block("</orderedlist>"),
                TagEnd::List(false) => self.close_block("</itemizedlist>"),
                TagEnd::Item => self.close_block("</listitem>"),
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                    self.out.push_str("</emphasis>")
                }
                TagEnd::Superscript => self.out.push_str("</superscript>"),
                TagEnd::Subscript => self.out.push_str("</subscript>"),
                TagEnd::Link => self.out.push_str("</ulink>"),
                TagEnd::Image => self.image_depth = self.image_depth.saturating_sub(1),
                _ => {}
            }
        }

        fn finish(mut self) -> String {
            self.close_implicit_para();
            self.out
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn docbook(text: &str) -> String {
            MarkdownContent::new().render(text, Target::DocBook)
        }

        fn html(text: &str) -> String {
            MarkdownContent::new().render(text, Target::Html)
        }

        #[test]
        fn test_single_paragraph_is_unwrapped() {
            assert_eq!(html("some *text*"), "some <em>text</em>");
            assert_eq!(
                docbook("some **text**"),
                "some <emphasis role=\"strong\">text</emphasis>"
            );
        }

        #[test]
        fn test_paragraphs_are_kept() {
            assert_eq!(html("one\n\ntwo"), "<p>one</p>\n<p>two</p>\n");
            assert_eq!(docbook("one\n\ntwo"), "<para>one</para><para>two</para>");
        }

        #[test]
        fn test_tight_list_items_get_paragraphs() {
            assert_eq!(
                docbook("- a\n- b"),
                "<itemizedlist><listitem><para>a</para></listitem>\
                 <listitem><para>b</para></listitem></itemizedlist>"
            );
            assert_eq!(
                docbook("1. `x`"),
                "<orderedlist><listitem><para><literal>x</literal></para></listitem></orderedlist>"
            );
        }

        #[test]
        fn test_links_images_and_code() {
            assert_eq!(
                docbook("[home](https://example.org/?a&b)"),
                "<ulink url=\"https://example.org/?a&amp;b\">home</ulink>"
            );
            assert_eq!(
                docbook("![alt](pic.png)"),
                "<inlinemediaobject><imageobject>\
                 <imagedata fileref=\"pic.png\"/>\
                 </imageobject></inlinemediaobject>"
            );
            assert_eq!(
                docbook("```rust\nlet x = 1 < 2;\n```"),
                "<programlisting language=\"rust\">let x = 1 &lt; 2;\n</programlisting>"
            );
        }

        #[test]
        fn test_empty_text() {
            assert_eq!(html(""), "");
            assert_eq!(docbook(""), "");
        }
    }
}
