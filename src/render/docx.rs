//! Word (.docx) output via `docx-rs`.

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use docx_rs::*;

use crate::block::{Block, Document, List, Span};
use crate::config::{Config, StyleSheet};
use crate::error::{Error, Result};

const HEADING_SIZES: [usize; 6] = [32, 28, 26, 24, 22, 20];

pub struct DocxRenderer<'a> {
    config: &'a Config,
    date: Option<NaiveDate>,
}

impl<'a> DocxRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, date: None }
    }

    /// Print a creation date line under the title.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Render the document and write the packed archive to `sink`.
    pub fn render<W: Write>(&self, doc: &Document, mut sink: W) -> Result<()> {
        let bytes = self.render_to_vec(doc)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Render the document to the bytes of a .docx archive.
    pub fn render_to_vec(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.build(doc)
            .build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| Error::Docx(e.to_string()))?;
        Ok(buffer)
    }

    /// Map the document onto a `docx-rs` document with styles and numbering.
    pub fn build(&self, doc: &Document) -> Docx {
        let style = &self.config.style;
        let header = &self.config.header;
        let margin = style.margin_twips();

        let mut docx = Docx::new()
            .page_margin(
                PageMargin::new()
                    .top(margin)
                    .bottom(margin)
                    .left(margin)
                    .right(margin),
            )
            .default_fonts(fonts(&style.font_family))
            .default_size(style.half_points());
        docx = add_styles(docx, style);

        if header.title_block {
            if let Some(title) = doc.detached_title() {
                docx = docx.add_paragraph(
                    Paragraph::new()
                        .style("Title")
                        .add_run(Run::new().add_text(title)),
                );
            }
        }
        if let (true, Some(date)) = (header.date_line, self.date) {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Right)
                    .add_run(Run::new().add_text(header.date_text(date)).size(20)),
            );
        }

        let mut numbering = ListNumbering::default();
        for block in &doc.blocks {
            docx = match block {
                Block::Heading { level, content } => {
                    let level = (*level).clamp(1, 6);
                    docx.add_paragraph(with_runs(
                        Paragraph::new().style(&format!("Heading{level}")),
                        content,
                    ))
                }
                Block::Paragraph { content } => {
                    let mut para = Paragraph::new();
                    if style.justify {
                        para = para.align(AlignmentType::Both);
                    }
                    docx.add_paragraph(with_runs(para, content))
                }
                Block::List(list) => add_list(docx, &mut numbering, list),
            };
        }

        log::debug!("built docx with {} numbering definitions", numbering.count());
        docx
    }
}

fn fonts(family: &str) -> RunFonts {
    RunFonts::new()
        .ascii(family)
        .hi_ansi(family)
        .east_asia(family)
        .cs(family)
}

fn add_styles(mut docx: Docx, style: &StyleSheet) -> Docx {
    for (i, size) in HEADING_SIZES.iter().enumerate() {
        let level = i + 1;
        docx = docx.add_style(
            Style::new(&format!("Heading{level}"), StyleType::Paragraph)
                .name(&format!("Heading {level}"))
                .size(*size)
                .bold(),
        );
    }

    let title = Style::new("Title", StyleType::Paragraph)
        .name("Title")
        .size(36)
        .bold()
        .align(AlignmentType::Center);

    let code_inline = Style::new("CodeInline", StyleType::Character)
        .name("Code Inline")
        .fonts(fonts(&style.code_font));

    docx.add_style(title).add_style(code_inline)
}

fn add_list(docx: Docx, numbering: &mut ListNumbering, list: &List) -> Docx {
    let (mut docx, num_id) = numbering.create(docx, list.ordered);
    for item in &list.items {
        let para = Paragraph::new().numbering(NumberingId::new(num_id), IndentLevel::new(0));
        docx = docx.add_paragraph(with_runs(para, item));
    }
    docx
}

fn with_runs(mut para: Paragraph, spans: &[Span]) -> Paragraph {
    for span in spans {
        para = para.add_run(span_to_run(span));
    }
    para
}

fn span_to_run(span: &Span) -> Run {
    let mut run = Run::new().add_text(&span.text);
    if span.code {
        return run.style("CodeInline");
    }
    if span.bold {
        run = run.bold();
    }
    if span.italic {
        run = run.italic();
    }
    run
}

/// Hands out one numbering definition per list so every ordered list restarts at 1.
#[derive(Debug, Default)]
struct ListNumbering {
    created: usize,
}

impl ListNumbering {
    fn count(&self) -> usize {
        self.created
    }

    fn create(&mut self, docx: Docx, ordered: bool) -> (Docx, usize) {
        self.created += 1;
        let id = self.created;

        let level = if ordered {
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("decimal"),
                LevelText::new("%1."),
                LevelJc::new("left"),
            )
            .indent(Some(720), Some(SpecialIndentType::Hanging(420)), None, None)
        } else {
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            )
            .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None)
        };

        let docx = docx
            .add_abstract_numbering(AbstractNumbering::new(id).add_level(level))
            .add_numbering(Numbering::new(id, id));
        (docx, id)
    }
}
