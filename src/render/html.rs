//! HTML output for external PDF layout engines.
//!
//! Text is always escaped before any inline tag is wrapped around it.

use chrono::NaiveDate;

use crate::block::{Block, Document, List, Span};
use crate::config::Config;

pub struct HtmlRenderer<'a> {
    config: &'a Config,
    date: Option<NaiveDate>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, date: None }
    }

    /// Print a creation date line in the page header.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Render the document body as an HTML fragment.
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        for block in &doc.blocks {
            emit_block(block, &mut out);
        }
        out
    }

    /// Render a standalone page: the fragment plus title, header and a style
    /// block derived from the style sheet.
    pub fn render_page(&self, doc: &Document) -> String {
        let style = &self.config.style;
        let header = &self.config.header;
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
        escape_into(&doc.title, &mut out);
        out.push_str("</title>\n<style>\n");
        out.push_str(&format!(
            "body {{ font-family: \"{}\", serif; font-size: {}pt; margin: {}in; }}\n",
            css_string(&style.font_family),
            style.font_size_pt,
            style.margin_in
        ));
        if style.justify {
            out.push_str("p, li { text-align: justify; }\n");
        }
        out.push_str(&format!(
            "code {{ font-family: \"{}\", monospace; }}\n",
            css_string(&style.code_font)
        ));
        out.push_str(".title { text-align: center; }\n.date { text-align: right; font-size: 10pt; }\n");
        out.push_str("</style>\n</head>\n<body>\n");

        if header.title_block {
            if let Some(title) = doc.detached_title() {
                out.push_str("<h1 class=\"title\">");
                escape_into(title, &mut out);
                out.push_str("</h1>\n");
            }
        }
        if let (true, Some(date)) = (header.date_line, self.date) {
            out.push_str("<p class=\"date\">");
            escape_into(&header.date_text(date), &mut out);
            out.push_str("</p>\n");
        }

        out.push_str(&self.render(doc));
        out.push_str("</body>\n</html>\n");
        out
    }
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
        Block::List(list) => list_to_html(list, out),
    }
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>\n"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(item, out);
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    if span.code {
        out.push_str("<code>");
        escape_into(&span.text, out);
        out.push_str("</code>");
        return;
    }

    if span.bold {
        out.push_str("<strong>");
    }
    if span.italic {
        out.push_str("<em>");
    }
    escape_into(&span.text, out);
    if span.italic {
        out.push_str("</em>");
    }
    if span.bold {
        out.push_str("</strong>");
    }
}

fn escape_into(text: &str, out: &mut String) {
    // Quoted-attribute escaping also covers both quote characters
    html_escape::encode_quoted_attribute_to_string(text, out);
}

// Font names end up inside a double-quoted CSS string in a <style> element
fn css_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\\' | '<' | '>'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn fragment(markdown: &str) -> String {
        let config = Config::default();
        HtmlRenderer::new(&config).render(&parse(markdown, ""))
    }

    #[test]
    fn heading() {
        assert_eq!(fragment("### Hello"), "<h3>Hello</h3>\n");
    }

    #[test]
    fn paragraph_with_inline_styles() {
        assert_eq!(
            fragment("**a** and *b* and `c`"),
            "<p><strong>a</strong> and <em>b</em> and <code>c</code></p>\n"
        );
    }

    #[test]
    fn bold_italic_nests_em_inside_strong() {
        assert_eq!(
            fragment("***both***"),
            "<p><strong><em>both</em></strong></p>\n"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            fragment("- one\n- two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            fragment("1. one\n2. two"),
            "<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n"
        );
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            fragment("<script>alert(\"x & y\")</script>"),
            "<p>&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;</p>\n"
        );

        let quoted = fragment("it's 'quoted'");
        assert!(quoted.starts_with("<p>it&"));
        assert!(!quoted.contains('\''));
    }

    #[test]
    fn escapes_inside_inline_markers() {
        assert_eq!(
            fragment("**<b>** `<i>`"),
            "<p><strong>&lt;b&gt;</strong> <code>&lt;i&gt;</code></p>\n"
        );
    }

    #[test]
    fn empty_document_renders_empty_fragment() {
        assert_eq!(fragment(""), "");
    }

    #[test]
    fn page_wraps_fragment_with_header() {
        let config = Config::default();
        let doc = parse("Body text", "Report <1>");
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let page = HtmlRenderer::new(&config).with_date(date).render_page(&doc);

        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<title>Report &lt;1&gt;</title>"));
        assert!(page.contains("font-family: \"Times New Roman\", serif"));
        assert!(page.contains("text-align: justify"));
        assert!(page.contains("<h1 class=\"title\">Report &lt;1&gt;</h1>\n"));
        assert!(page.contains("<p class=\"date\">Created: 02.01.2025</p>\n"));
        assert!(page.contains("<p>Body text</p>\n"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn page_does_not_repeat_heading_title() {
        let config = Config::default();
        let page = HtmlRenderer::new(&config).render_page(&parse("# Title\ntext", "Fallback"));

        assert!(!page.contains("class=\"title\""));
        assert!(!page.contains("class=\"date\""));
        assert_eq!(page.matches("<h1>Title</h1>").count(), 1);
    }
}
