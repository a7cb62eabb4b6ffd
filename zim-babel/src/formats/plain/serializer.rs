//! Plain text serialization

use crate::common::table::{column_widths, row_line};
use zim_parser::zim::ast::{
    Alignment, Block, Document, Inline, ItemMarker, List, ListKind, NumberStyle, Table,
};

const RULE: &str = "--------------------";

pub fn serialize_plain(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        match block {
            Block::Heading(heading) => {
                out.push_str(&inline_text(&heading.content));
                out.push('\n');
            }
            Block::Paragraph(paragraph) => {
                out.push_str(&inline_text(&paragraph.content));
                out.push('\n');
            }
            Block::Indented(indented) => {
                let text = format!("{}\n", inline_text(&indented.content));
                push_prefixed(&mut out, &text, &"\t".repeat(indented.indent));
            }
            Block::List(list) => write_list(&mut out, list, 0),
            Block::Verbatim(verbatim) => {
                push_prefixed(&mut out, &verbatim.text, &"\t".repeat(verbatim.indent));
            }
            Block::Object(object) => {
                push_prefixed(&mut out, &object.body, &"\t".repeat(object.indent));
            }
            Block::Table(table) => write_table(&mut out, table),
            Block::HorizontalRule => {
                out.push_str(RULE);
                out.push('\n');
            }
            Block::BlankLines(count) => out.push_str(&"\n".repeat(*count)),
        }
    }
    if !doc.ends_with_newline && out.ends_with('\n') {
        out.pop();
    }
    out
}

fn push_prefixed(out: &mut String, text: &str, prefix: &str) {
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
}

fn write_list(out: &mut String, list: &List, depth: usize) {
    let pad = "  ".repeat(depth);
    let mut number = match list.kind {
        ListKind::Numbered { start, .. } => start,
        _ => 1,
    };
    for item in &list.items {
        let bullet = match (&item.marker, list.kind) {
            (ItemMarker::Checkbox(state), _) => state.symbol().to_string(),
            (ItemMarker::Number(_), ListKind::Numbered { style, .. }) => {
                format!("{}.", style.label(number))
            }
            (ItemMarker::Number(_), _) => format!("{}.", NumberStyle::Arabic.label(number)),
            (ItemMarker::Bullet, _) => "-".to_string(),
        };
        number += 1;
        out.push_str(&format!("{pad}{bullet} {}\n", inline_text(&item.content)));
        for child in &item.children {
            write_list(out, child, depth + 1);
        }
    }
}

fn write_table(out: &mut String, table: &Table) {
    let mut rows: Vec<Vec<String>> = vec![table
        .header()
        .iter()
        .map(|cell| cell_text(cell))
        .collect()];
    rows.extend(
        table
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell_text(cell)).collect()),
    );
    let mut widths = column_widths(&rows);
    widths.resize(table.column_count(), 0);
    let aligns: Vec<Alignment> = table.columns().iter().map(|c| c.align).collect();
    for row in &rows {
        out.push_str(&row_line(row, &widths, &aligns));
        out.push('\n');
    }
}

fn cell_text(cell: &[Inline]) -> String {
    inline_text(cell).replace('\n', " ")
}

/// Text of inline content with the markup removed. Links show their text, images their
/// alt text or source.
fn inline_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Span(span) => out.push_str(&inline_text(&span.children)),
            Inline::Verbatim(verbatim) => out.push_str(&verbatim.text),
            Inline::Link(link) => out.push_str(link.display()),
            Inline::Image(image) => out.push_str(image.alt.as_deref().unwrap_or(&image.src)),
            Inline::Tag(name) => {
                out.push('@');
                out.push_str(name);
            }
            Inline::Anchor(_) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zim_parser::zim::parsing::{parse_document, ParseOptions};

    fn plain(source: &str) -> String {
        serialize_plain(&parse_document(source, &ParseOptions::default()))
    }

    #[test]
    fn test_markup_is_stripped() {
        assert_eq!(
            plain("== Head ==\n**bold** [[Page|text]] {{./a.png|alt}} ''raw'' ##hidden @tag\n"),
            "Head\nbold text alt raw  @tag\n"
        );
    }

    #[test]
    fn test_checkboxes_and_numbers() {
        assert_eq!(
            plain("[ ] open\n[x] done\n\tc. third\n\td. fourth\n"),
            "\u{2610} open\n\u{2611} done\n  c. third\n  d. fourth\n"
        );
    }

    #[test]
    fn test_blocks_keep_line_structure() {
        assert_eq!(
            plain("\tindented\n-----\n'''\n  raw\n'''\n"),
            "\tindented\n--------------------\n  raw\n"
        );
    }

    #[test]
    fn test_table_columns() {
        assert_eq!(
            plain("| a | bb |\n|---|--:|\n| ccc | d |\n"),
            "| a   | bb |\n| ccc |  d |\n"
        );
    }
}
