//! Verbatim regions, object blocks and legacy indented text

use pretty_assertions::assert_eq;
use zim_parser::zim::ast::{Block, Indented, Inline, Verbatim};
use zim_parser::zim::parsing::{parse_document, ParseOptions};

fn parse(source: &str) -> Vec<Block> {
    parse_document(source, &ParseOptions::default()).blocks
}

#[test]
fn test_markup_inside_verbatim_is_raw() {
    let blocks = parse("'''\n**not bold** [[NoLink]]\n* no list\n'''\n");
    assert_eq!(
        blocks,
        vec![Block::Verbatim(Verbatim {
            indent: 0,
            text: "**not bold** [[NoLink]]\n* no list\n".into()
        })]
    );
}

#[test]
fn test_indented_verbatim_strips_fence_indent() {
    let blocks = parse("\t'''\n\tfn main() {}\n\t\tnested\n\t'''\n");
    assert_eq!(
        blocks,
        vec![Block::Verbatim(Verbatim {
            indent: 1,
            text: "fn main() {}\n\tnested\n".into()
        })]
    );
}

#[test]
fn test_unclosed_fence_falls_back_to_text() {
    let blocks = parse("'''\nstill **bold**\n");
    let Block::Paragraph(paragraph) = &blocks[0] else {
        panic!("expected paragraph, got {blocks:?}");
    };
    assert_eq!(paragraph.content[0], Inline::text("'''\nstill "));
}

#[test]
fn test_object_block() {
    let blocks = parse("{{{code: lang=\"rust\" linenumbers=true\nlet x = 1;\n}}}\n");
    let Block::Object(object) = &blocks[0] else {
        panic!("expected object, got {blocks:?}");
    };
    assert_eq!(object.object_type, "code");
    assert_eq!(object.attribute("lang"), Some("rust"));
    assert_eq!(object.attribute("linenumbers"), Some("true"));
    assert_eq!(object.body, "let x = 1;\n");
}

#[test]
fn test_indented_text_and_legacy_mode() {
    let source = "\tquoted text\n\tsecond line\n";
    assert_eq!(
        parse(source),
        vec![Block::Indented(Indented {
            indent: 1,
            content: vec![Inline::text("quoted text\nsecond line")]
        })]
    );

    let legacy = ParseOptions {
        legacy_indented_verbatim: true,
        ..ParseOptions::default()
    };
    assert_eq!(
        parse_document(source, &legacy).blocks,
        vec![Block::Verbatim(Verbatim {
            indent: 0,
            text: source.into()
        })]
    );
}
