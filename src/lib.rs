//! Convert a small, flat Markdown dialect into Word, HTML and PDF documents.
//!
//! Text is parsed line by line into a [`Document`] (headings, paragraphs and
//! one-level lists with bold, italic and code spans), which each renderer in
//! [`render`] maps to its own format. Parsing never fails; only writing an
//! artifact can.

mod block;
mod config;
mod error;
pub mod output;
pub mod parser;
pub mod render;

pub use block::{Block, Document, List, Span, Style, TitleSource, plain_text};
pub use config::{Config, ConfigError, HeaderConfig, PdfConfig, StyleSheet};
pub use error::{Error, Result};
pub use render::{DocxRenderer, HtmlRenderer, TypstRenderer};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse markdown text into a document, using `fallback_title` when the text
/// has no level-1 heading.
pub fn parse(markdown: &str, fallback_title: &str) -> Document {
    parser::parse(markdown, fallback_title)
}

/// Convert markdown to an HTML fragment using the bundled config.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    HtmlRenderer::new(config).render(&parse(markdown, ""))
}

/// Convert markdown to a standalone HTML page.
pub fn markdown_to_html_page(markdown: &str, fallback_title: &str, config: &Config) -> String {
    HtmlRenderer::new(config).render_page(&parse(markdown, fallback_title))
}

/// Convert markdown to .docx bytes using the bundled config.
pub fn markdown_to_docx(markdown: &str, fallback_title: &str) -> Result<Vec<u8>> {
    markdown_to_docx_with_config(markdown, fallback_title, &Config::compiled_default())
}

/// Convert markdown to .docx bytes with custom config.
pub fn markdown_to_docx_with_config(
    markdown: &str,
    fallback_title: &str,
    config: &Config,
) -> Result<Vec<u8>> {
    DocxRenderer::new(config).render_to_vec(&parse(markdown, fallback_title))
}

/// Convert markdown to Typst markup using the bundled config.
pub fn markdown_to_typst(markdown: &str, fallback_title: &str) -> String {
    markdown_to_typst_with_config(markdown, fallback_title, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(
    markdown: &str,
    fallback_title: &str,
    config: &Config,
) -> String {
    TypstRenderer::new(config).render(&parse(markdown, fallback_title))
}

/// Convert markdown to PDF bytes using the bundled config.
pub fn markdown_to_pdf(markdown: &str, fallback_title: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, fallback_title, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(
    markdown: &str,
    fallback_title: &str,
    config: &Config,
) -> Result<Vec<u8>> {
    typst_to_pdf(markdown_to_typst_with_config(markdown, fallback_title, config))
}

/// Compile Typst markup to PDF bytes with the embedded fonts only.
pub fn typst_to_pdf(typst_content: String) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Pdf(format!("Typst compilation failed: {:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Pdf(format!("PDF export failed: {:?}", e)))
}
