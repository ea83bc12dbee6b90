//! Line classification for the flat Markdown dialect.

/// Structural role of one input line. Text payloads are trimmed and still
/// carry their inline markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading { level: u8, text: &'a str },
    ListItem { ordered: bool, text: &'a str },
    Paragraph { text: &'a str },
    Blank,
}

/// Classify a single raw line. First matching rule wins; every line maps to
/// some kind.
pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim();

    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }

    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(text) = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
    {
        return LineKind::ListItem {
            ordered: false,
            text: text.trim(),
        };
    }

    if let Some(text) = ordered_item(line) {
        return LineKind::ListItem {
            ordered: true,
            text: text.trim(),
        };
    }

    LineKind::Paragraph { text: line }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some((level as u8, rest.trim()))
}

fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    line[digits..].strip_prefix(". ")
}
