//! Inline emphasis resolution.
//!
//! Recognized markers: `**`/`__` (bold), `*`/`_` (italic) and `` ` `` (code).
//! Markers pair only within the text handed in; anything that does not pair
//! is kept as literal text.
//!
//! The text is cut into literal text, code spans and runs of `*` or `_` in one
//! pass. Runs are then matched left to right against a stack of open runs per
//! marker, preferring a double match when both sides have two characters left.
//! Each run is visited a bounded number of times, so the work is linear in the
//! length of the line.

use crate::block::{Span, Style};

/// Resolve the inline markers of one line into styled spans.
///
/// Never fails. Adjacent spans with equal style are merged and empty spans
/// are never produced.
pub fn format(raw: &str) -> Vec<Span> {
    let (tokens, mut runs) = tokenize(raw);
    match_runs(&mut runs);

    let mut spans = Vec::new();
    let mut bold = 0;
    let mut italic = 0;

    for token in tokens {
        match token {
            Token::Text(text) => push(&mut spans, text, style(bold, italic)),
            Token::Code(text) => push(&mut spans, text, Style::CODE),
            Token::Run(index) => {
                let run = &runs[index];
                bold -= run.closes_bold;
                italic -= run.closes_italic;
                // Unused marker characters sit between the closing and opening parts
                let literal = &raw[run.start..run.start + run.left];
                push(&mut spans, literal, style(bold, italic));
                bold += run.opens_bold;
                italic += run.opens_italic;
            }
        }
    }

    spans
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Code(&'a str),
    Run(usize),
}

/// A maximal run of one emphasis marker character.
#[derive(Debug)]
struct Run {
    marker: u8,
    start: usize,
    can_open: bool,
    can_close: bool,
    /// Characters not yet used by a match.
    left: usize,
    opens_bold: usize,
    opens_italic: usize,
    closes_bold: usize,
    closes_italic: usize,
}

fn tokenize(text: &str) -> (Vec<Token<'_>>, Vec<Run>) {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut runs = Vec::new();
    let mut literal = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => {
                let rest = &text[i + 1..];
                if let Some(close) = rest.find('`').filter(|&close| close > 0) {
                    push_text(&mut tokens, &text[literal..i]);
                    tokens.push(Token::Code(&rest[..close]));
                    i += close + 2;
                    literal = i;
                    continue;
                }
            }
            marker @ (b'*' | b'_') => {
                let end = i + bytes[i..].iter().take_while(|&&b| b == marker).count();
                push_text(&mut tokens, &text[literal..i]);
                tokens.push(Token::Run(runs.len()));
                runs.push(Run {
                    marker,
                    start: i,
                    can_open: opens(text, i, end, marker),
                    can_close: closes(text, i, end, marker),
                    left: end - i,
                    opens_bold: 0,
                    opens_italic: 0,
                    closes_bold: 0,
                    closes_italic: 0,
                });
                i = end;
                literal = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    push_text(&mut tokens, &text[literal..]);

    (tokens, runs)
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}

/// An opening run must touch the text it emphasizes; `_` never opens mid-word.
fn opens(text: &str, start: usize, end: usize, marker: u8) -> bool {
    let next = text[end..].chars().next();
    if next.is_none_or(char::is_whitespace) {
        return false;
    }
    if marker == b'_' {
        let prev = text[..start].chars().next_back();
        return !prev.is_some_and(char::is_alphanumeric);
    }
    true
}

/// Mirror of [`opens`] for a closing run.
fn closes(text: &str, start: usize, end: usize, marker: u8) -> bool {
    let prev = text[..start].chars().next_back();
    if prev.is_none_or(char::is_whitespace) {
        return false;
    }
    if marker == b'_' {
        let next = text[end..].chars().next();
        return !next.is_some_and(char::is_alphanumeric);
    }
    true
}

fn match_runs(runs: &mut [Run]) {
    // Open runs per marker, innermost last. Every entry has characters left.
    let mut star: Vec<usize> = Vec::new();
    let mut underscore: Vec<usize> = Vec::new();

    for index in 0..runs.len() {
        let (same, other) = if runs[index].marker == b'*' {
            (&mut star, &mut underscore)
        } else {
            (&mut underscore, &mut star)
        };

        if runs[index].can_close {
            while runs[index].left > 0 {
                let Some(&opener) = same.last() else {
                    break;
                };

                let width = if runs[opener].left >= 2 && runs[index].left >= 2 {
                    2
                } else {
                    1
                };
                if width == 2 {
                    runs[opener].opens_bold += 1;
                    runs[index].closes_bold += 1;
                } else {
                    runs[opener].opens_italic += 1;
                    runs[index].closes_italic += 1;
                }
                runs[opener].left -= width;
                runs[index].left -= width;

                if runs[opener].left == 0 {
                    same.pop();
                }
                // Openers of the other marker inside the closed range can no longer pair
                while other.last().is_some_and(|&open| open > opener) {
                    other.pop();
                }
            }
        }

        if runs[index].can_open && runs[index].left > 0 {
            same.push(index);
        }
    }
}

fn style(bold: usize, italic: usize) -> Style {
    Style {
        bold: bold > 0,
        italic: italic > 0,
        code: false,
    }
}

fn push(out: &mut Vec<Span>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.style() == style => last.text.push_str(text),
        _ => out.push(Span::styled(text, style)),
    }
}
