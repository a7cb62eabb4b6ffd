//! Heading and horizontal rule lines

use pretty_assertions::assert_eq;
use zim_parser::zim::ast::{Block, Heading, Inline, Paragraph, SpanStyle};
use zim_parser::zim::parsing::{parse_document, ParseOptions};

fn parse(source: &str) -> Vec<Block> {
    parse_document(source, &ParseOptions::default()).blocks
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading(Heading {
        level,
        content: vec![Inline::text(text)],
    })
}

#[test]
fn test_longest_marker_run_is_level_one() {
    assert_eq!(parse("====== Head ======\n"), vec![heading(1, "Head")]);
}

#[test]
fn test_every_level() {
    let source = "====== One ======\n===== Two =====\n==== Three ====\n=== Four ===\n== Five ==\n";
    let levels: Vec<u8> = parse(source)
        .iter()
        .filter_map(|block| match block {
            Block::Heading(h) => Some(h.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_headings_stay_flat() {
    let blocks = parse("== Deep ==\ntext\n====== Top ======\n");
    assert_eq!(
        blocks,
        vec![
            heading(5, "Deep"),
            Block::Paragraph(Paragraph {
                content: vec![Inline::text("text")]
            }),
            heading(1, "Top"),
        ]
    );
}

#[test]
fn test_mismatched_markers_are_text() {
    let blocks = parse("==== Head ===\n");
    assert_eq!(
        blocks,
        vec![Block::Paragraph(Paragraph {
            content: vec![Inline::text("==== Head ===")]
        })]
    );
}

#[test]
fn test_heading_with_inline_markup() {
    let blocks = parse("=== A //tilted// title ===\n");
    assert_eq!(
        blocks,
        vec![Block::Heading(Heading {
            level: 4,
            content: vec![
                Inline::text("A "),
                Inline::span(SpanStyle::Italic, vec![Inline::text("tilted")]),
                Inline::text(" title"),
            ]
        })]
    );
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(
        parse("above\n-----\nbelow\n"),
        vec![
            Block::Paragraph(Paragraph {
                content: vec![Inline::text("above")]
            }),
            Block::HorizontalRule,
            Block::Paragraph(Paragraph {
                content: vec![Inline::text("below")]
            }),
        ]
    );
    assert!(matches!(parse("----\n")[0], Block::Paragraph(_)));
}
