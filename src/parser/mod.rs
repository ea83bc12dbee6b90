//! Line-oriented parser for the flat Markdown dialect.

mod inline;
mod line;
mod list;

pub use inline::format;
pub use line::{LineKind, classify};
pub use list::ListAggregator;

use crate::block::{Block, Document, TitleSource, plain_text};

/// Parse text into a [`Document`].
///
/// Every line is classified once. Headings and paragraphs become one block
/// each, list items are grouped by [`ListAggregator`] and blank lines only
/// close the open list. The title is the first level-1 heading, or
/// `fallback_title` when the text has none.
pub fn parse(text: &str, fallback_title: &str) -> Document {
    let mut blocks = Vec::new();
    let mut lists = ListAggregator::default();
    let mut title = None;

    for raw in text.lines() {
        match classify(raw) {
            LineKind::Heading { level, text } => {
                close_list(&mut lists, &mut blocks);
                let content = format(text);
                if level == 1 && title.is_none() {
                    title = Some(plain_text(&content));
                }
                blocks.push(Block::Heading { level, content });
            }
            LineKind::Paragraph { text } => {
                close_list(&mut lists, &mut blocks);
                blocks.push(Block::Paragraph {
                    content: format(text),
                });
            }
            LineKind::ListItem { ordered, text } => {
                if let Some(list) = lists.push(ordered, format(text)) {
                    blocks.push(Block::List(list));
                }
            }
            LineKind::Blank => close_list(&mut lists, &mut blocks),
        }
    }
    close_list(&mut lists, &mut blocks);

    log::debug!("parsed {} blocks", blocks.len());

    match title {
        Some(title) => Document {
            title,
            title_source: TitleSource::Heading,
            blocks,
        },
        None => Document {
            title: fallback_title.to_string(),
            title_source: TitleSource::Fallback,
            blocks,
        },
    }
}

fn close_list(lists: &mut ListAggregator, blocks: &mut Vec<Block>) {
    if let Some(list) = lists.flush() {
        blocks.push(Block::List(list));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{List, Span};
    use pretty_assertions::assert_eq;

    fn list(ordered: bool, items: &[&str]) -> Block {
        Block::List(List {
            ordered,
            items: items.iter().map(|text| vec![Span::plain(*text)]).collect(),
        })
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            content: vec![Span::plain(text)],
        }
    }

    #[test]
    fn headings_and_title() {
        let doc = parse("# Title\n## Sub", "Fallback");
        assert_eq!(doc.title, "Title");
        assert_eq!(doc.title_source, TitleSource::Heading);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![Span::plain("Title")],
                },
                Block::Heading {
                    level: 2,
                    content: vec![Span::plain("Sub")],
                },
            ]
        );
    }

    #[test]
    fn title_is_plain_text_of_first_level_one_heading() {
        let doc = parse("## Intro\n# **Bold** Title\n# Second", "x");
        assert_eq!(doc.title, "Bold Title");
    }

    #[test]
    fn fallback_title_without_level_one_heading() {
        let doc = parse("## Only a subheading", "Report");
        assert_eq!(doc.title, "Report");
        assert_eq!(doc.title_source, TitleSource::Fallback);
        assert_eq!(doc.detached_title(), Some("Report"));
    }

    #[test]
    fn empty_input() {
        let doc = parse("", "");
        assert!(doc.is_empty());
        assert_eq!(doc.title, "");
        assert_eq!(doc.detached_title(), None);
    }

    #[test]
    fn every_line_is_its_own_paragraph() {
        let doc = parse("first\nsecond\n\n\nthird", "");
        assert_eq!(
            doc.blocks,
            vec![paragraph("first"), paragraph("second"), paragraph("third")]
        );
    }

    #[test]
    fn list_kind_switch_splits_lists() {
        let doc = parse("* a\n1. b\n* c", "");
        assert_eq!(
            doc.blocks,
            vec![list(false, &["a"]), list(true, &["b"]), list(false, &["c"])]
        );
    }

    #[test]
    fn blank_line_closes_list() {
        let doc = parse("- a\n- b\n\n- c", "");
        assert_eq!(doc.blocks, vec![list(false, &["a", "b"]), list(false, &["c"])]);
    }

    #[test]
    fn paragraph_after_list_keeps_order() {
        let doc = parse("1. one\n2. two\nafter", "");
        assert_eq!(doc.blocks, vec![list(true, &["one", "two"]), paragraph("after")]);
    }

    #[test]
    fn list_items_are_formatted() {
        let doc = parse("* Second with **bold**", "");
        assert_eq!(
            doc.blocks,
            vec![Block::List(List {
                ordered: false,
                items: vec![vec![Span::plain("Second with "), Span::bold("bold")]],
            })]
        );
    }

    #[test]
    fn windows_line_endings() {
        let doc = parse("# T\r\n\r\ntext\r\n", "");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.blocks.len(), 2);
    }
}
