//! Renderers from [`Document`](crate::Document) to concrete output formats.
//!
//! Each renderer borrows the static [`Config`](crate::Config) it was built
//! with and never mutates the document, so one document can be rendered to
//! several formats in turn.

pub mod docx;
pub mod html;
pub mod typst;

pub use docx::DocxRenderer;
pub use html::HtmlRenderer;
pub use typst::TypstRenderer;
