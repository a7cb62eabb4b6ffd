//! Plain text parsing

use zim_parser::zim::ast::{Block, Document, Inline, InlineContent, Paragraph};
use zim_parser::zim::inlines::links::bare_link_at;
use zim_parser::zim::inlines::LinkHeuristics;

/// Read plain text: paragraphs separated by blank lines, with URLs as links.
pub fn parse_plain(source: &str) -> Document {
    let source = source.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut blanks = 0;

    for line in source.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            blanks += 1;
            continue;
        }
        if blanks > 0 {
            blocks.push(Block::BlankLines(blanks));
            blanks = 0;
        }
        paragraph.push(line);
    }
    flush_paragraph(&mut blocks, &mut paragraph);
    if blanks > 0 {
        blocks.push(Block::BlankLines(blanks));
    }

    Document {
        headers: Vec::new(),
        blocks,
        ends_with_newline: source.is_empty() || source.ends_with('\n'),
    }
}

fn flush_paragraph(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    blocks.push(Block::Paragraph(Paragraph {
        content: link_urls(&lines.join("\n")),
    }));
    lines.clear();
}

/// Split text into text runs and bare URL links. Nothing else is markup.
fn link_urls(text: &str) -> InlineContent {
    let heuristics = LinkHeuristics::default();
    let mut content = Vec::new();
    let mut run = String::new();
    let mut prev: Option<char> = None;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some((link, len)) = bare_link_at(rest, prev, &heuristics) {
            if !run.is_empty() {
                content.push(Inline::Text(std::mem::take(&mut run)));
            }
            prev = rest[..len].chars().last();
            content.push(link);
            rest = &rest[len..];
            continue;
        }
        run.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }
    if !run.is_empty() {
        content.push(Inline::Text(run));
    }
    content
}
