use chrono::NaiveDate;

use crate::block::{Block, Document, List, Span};
use crate::config::Config;

/// Lists up to this size are kept on one page.
const UNBREAKABLE_LIST_ITEMS: usize = 5;

pub struct TypstRenderer<'a> {
    config: &'a Config,
    date: Option<NaiveDate>,
}

impl<'a> TypstRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, date: None }
    }

    /// Print a creation date line under the title.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Convert the document to Typst markup
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        self.emit_preamble(&mut out);
        self.emit_header(doc, &mut out);

        let blocks = &doc.blocks;
        let mut i = 0;
        while i < blocks.len() {
            let block = &blocks[i];

            match block {
                Block::Heading { .. } => {
                    // Keep heading with following content
                    out.push_str("#block(breakable: false)[\n");
                    emit_block(block, &mut out);

                    if i + 1 < blocks.len() {
                        i += 1;
                        emit_block(&blocks[i], &mut out);
                    }
                    out.push_str("]\n\n");
                }
                _ => emit_block(block, &mut out),
            }

            i += 1;
        }

        out
    }

    fn emit_preamble(&self, out: &mut String) {
        let style = &self.config.style;
        let pdf = &self.config.pdf;

        out.push_str(&format!(
            "#set page(paper: \"{}\", margin: {}in)\n",
            escape_string(&pdf.paper),
            style.margin_in
        ));
        out.push_str(&format!(
            "#set text(font: \"{}\", size: {}pt)\n",
            escape_string(&pdf.font_family),
            style.font_size_pt
        ));
        out.push_str(&format!(
            "#set par(justify: {}, linebreaks: \"optimized\")\n\n",
            style.justify
        ));
    }

    fn emit_header(&self, doc: &Document, out: &mut String) {
        let header = &self.config.header;

        if header.title_block {
            if let Some(title) = doc.detached_title() {
                out.push_str("#align(center, text(size: 18pt, weight: \"bold\")[");
                escape_markup(title, out);
                out.push_str("])\n\n");
            }
        }
        if let (true, Some(date)) = (header.date_line, self.date) {
            out.push_str("#align(right, text(size: 10pt)[");
            escape_markup(&header.date_text(date), out);
            out.push_str("])\n\n");
        }
    }
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::List(list) => {
            // Keep small lists together, allow breaks in large ones
            if list.items.len() <= UNBREAKABLE_LIST_ITEMS {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

// Function syntax instead of `*`/`_` markup, which Typst ignores inside words
fn span_to_typst(span: &Span, out: &mut String) {
    if span.code {
        out.push_str("#raw(\"");
        out.push_str(&escape_string(&span.text));
        out.push_str("\")");
        return;
    }

    if span.bold {
        out.push_str("#strong[");
    }
    if span.italic {
        out.push_str("#emph[");
    }
    escape_markup(&span.text, out);
    if span.italic {
        out.push(']');
    }
    if span.bold {
        out.push(']');
    }
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        spans_to_typst(item, out);
        out.push('\n');
    }
}

/// Escape every character with markup meaning. `(` and `.` are included so
/// text right after an inline call cannot extend it.
fn escape_markup(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '+' | '-'
            | '/' | '~' | '.' | '(' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const PREAMBLE: &str = "#set page(paper: \"a4\", margin: 1in)\n#set text(font: \"Libertinus Serif\", size: 12pt)\n#set par(justify: true, linebreaks: \"optimized\")\n\n";

    fn typst(markdown: &str) -> String {
        let config = Config::default();
        TypstRenderer::new(&config).render(&parse(markdown, ""))
    }

    #[test]
    fn heading() {
        assert_eq!(
            typst("# Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n= Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_content() {
        let result = typst("## Title\n\nSome text");
        assert!(result.contains("#block(breakable: false)[\n== Title\n\nSome text\n\n]\n\n"));
    }

    #[test]
    fn paragraph() {
        assert_eq!(typst("Hello world"), format!("{PREAMBLE}Hello world\n\n"));
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(typst("**bold**"), format!("{PREAMBLE}#strong[bold]\n\n"));
        assert_eq!(typst("*italic*"), format!("{PREAMBLE}#emph[italic]\n\n"));
        assert_eq!(
            typst("***both***"),
            format!("{PREAMBLE}#strong[#emph[both]]\n\n")
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(
            typst("`say \"hi\"`"),
            format!("{PREAMBLE}#raw(\"say \\\"hi\\\"\")\n\n")
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            typst("- one\n- two"),
            format!("{PREAMBLE}#block(breakable: false)[\n- one\n- two\n]\n\n")
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            typst("1. one\n2. two"),
            format!("{PREAMBLE}#block(breakable: false)[\n+ one\n+ two\n]\n\n")
        );
    }

    #[test]
    fn long_list_may_break() {
        let markdown = "- a\n- b\n- c\n- d\n- e\n- f";
        assert_eq!(
            typst(markdown),
            format!("{PREAMBLE}- a\n- b\n- c\n- d\n- e\n- f\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(typst("a # b"), format!("{PREAMBLE}a \\# b\n\n"));
        assert_eq!(typst("see http://x"), format!("{PREAMBLE}see http:\\/\\/x\n\n"));
        assert_eq!(
            typst("**file**.txt (v2)"),
            format!("{PREAMBLE}#strong[file]\\.txt \\(v2)\n\n")
        );
    }

    #[test]
    fn fallback_title_and_date() {
        let config = Config::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let result = TypstRenderer::new(&config)
            .with_date(date)
            .render(&parse("text", "My Report"));
        assert!(result.contains("#align(center, text(size: 18pt, weight: \"bold\")[My Report])\n\n"));
        assert!(result.contains("#align(right, text(size: 10pt)[Created: 06\\.05\\.2024])\n\n"));
    }
}
