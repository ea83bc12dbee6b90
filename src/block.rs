/// A run of text sharing one combination of style flags.
///
/// `text` is never empty. A code span never carries `bold` or `italic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN.with_bold())
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN.with_italic())
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(text, Style::CODE)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            bold: style.bold,
            italic: style.italic,
            code: style.code,
        }
    }

    pub fn style(&self) -> Style {
        Style {
            bold: self.bold,
            italic: self.italic,
            code: self.code,
        }
    }
}

/// The style flags of a [`Span`], without its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        italic: false,
        code: false,
    };

    pub const CODE: Style = Style {
        bold: false,
        italic: false,
        code: true,
    };

    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

/// A run of consecutive list items of the same kind.
///
/// Never empty; nesting is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Span>>,
}

/// Top-level structural unit of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    List(List),
}

/// Where a [`Document`]'s title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// The first level-1 heading of the body.
    Heading,
    /// The caller-supplied fallback.
    Fallback,
}

/// Render-ready document model, built once per conversion and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub title_source: TitleSource,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The title to print above the body, if it is not already the body's first heading.
    pub fn detached_title(&self) -> Option<&str> {
        match self.title_source {
            TitleSource::Fallback if !self.title.is_empty() => Some(&self.title),
            _ => None,
        }
    }
}

/// Concatenated literal text of a run of spans.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}
