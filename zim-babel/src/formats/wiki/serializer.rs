//! Wiki serialization

use crate::common::table::{column_widths, header_line, row_line, separator_line};
use crate::options::DumpOptions;
use zim_parser::zim::ast::{
    Block, Document, Image, Inline, ItemMarker, Link, LinkStyle, List, Object, Table,
};
use zim_parser::zim::inlines::links::encode_image_options;
use zim_parser::zim::lexing::dump_headers;

pub fn serialize_wiki(doc: &Document, options: &DumpOptions) -> String {
    let mut body = String::new();
    for block in &doc.blocks {
        write_block(&mut body, block);
    }
    if !doc.ends_with_newline && body.ends_with('\n') {
        body.pop();
    }

    if options.file_output {
        let mut out = dump_headers(&doc.headers);
        out.push_str(&body);
        out
    } else {
        body
    }
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading(heading) => {
            let marks = "=".repeat(7 - usize::from(heading.level.clamp(1, 5)));
            out.push_str(&format!(
                "{marks} {} {marks}\n",
                serialize_inlines(&heading.content)
            ));
        }
        Block::Paragraph(paragraph) => {
            out.push_str(&serialize_inlines(&paragraph.content));
            out.push('\n');
        }
        Block::Indented(indented) => {
            let text = serialize_inlines(&indented.content);
            push_indented(out, &format!("{text}\n"), indented.indent);
        }
        Block::List(list) => write_list(out, list),
        Block::Verbatim(verbatim) => {
            push_indented(
                out,
                &format!("'''\n{}'''\n", verbatim.text),
                verbatim.indent,
            );
        }
        Block::Object(object) => push_indented(out, &object_source(object), object.indent),
        Block::Table(table) => write_table(out, table),
        Block::HorizontalRule => out.push_str("-----\n"),
        Block::BlankLines(count) => out.push_str(&"\n".repeat(*count)),
    }
}

/// Prefix every non-empty line with `indent` tabs.
fn push_indented(out: &mut String, text: &str, indent: usize) {
    let prefix = "\t".repeat(indent);
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(&prefix);
        }
        out.push_str(line);
    }
}

fn write_list(out: &mut String, list: &List) {
    let prefix = "\t".repeat(list.indent);
    for item in &list.items {
        let bullet = match &item.marker {
            ItemMarker::Bullet => "*".to_string(),
            ItemMarker::Checkbox(state) => state.glyph().to_string(),
            ItemMarker::Number(label) => format!("{label}."),
        };
        out.push_str(&format!(
            "{prefix}{bullet} {}\n",
            serialize_inlines(&item.content)
        ));
        for child in &item.children {
            write_list(out, child);
        }
    }
}

fn object_source(object: &Object) -> String {
    let mut source = format!("{{{{{{{}:", object.object_type);
    for (key, value) in &object.attributes {
        source.push_str(&format!(" {key}=\"{}\"", value.replace('"', "\"\"")));
    }
    source.push('\n');
    source.push_str(&object.body);
    source.push_str("}}}\n");
    source
}

fn write_table(out: &mut String, table: &Table) {
    let mut rows: Vec<Vec<String>> = vec![table
        .header()
        .iter()
        .map(|cell| escape_cell(&serialize_inlines(cell)))
        .collect()];
    rows.extend(table.rows().iter().map(|row| {
        row.iter()
            .map(|cell| escape_cell(&serialize_inlines(cell)))
            .collect()
    }));

    let mut widths = column_widths(&rows);
    widths.resize(table.column_count(), 0);
    // The separator needs at least one dash per column.
    for width in &mut widths {
        *width = (*width).max(1);
    }
    let aligns: Vec<_> = table.columns().iter().map(|c| c.align).collect();
    let wraps: Vec<bool> = table.columns().iter().map(|c| c.wrap).collect();

    out.push_str(&header_line(&rows[0], &widths, &aligns, &wraps));
    out.push('\n');
    out.push_str(&separator_line(&widths, &aligns));
    out.push('\n');
    for row in &rows[1..] {
        out.push_str(&row_line(row, &widths, &aligns));
        out.push('\n');
    }
}

/// Escape a cell so the row splitter reads it back unchanged.
fn escape_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\\' if matches!(chars.peek(), None | Some('|' | 'n' | '\\')) => {
                escaped.push_str("\\\\")
            }
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn serialize_inlines(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        write_inline(&mut out, inline);
    }
    out
}

fn write_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::Span(span) => {
            let (open, close) = span.style.delimiters();
            out.push_str(open);
            out.push_str(&serialize_inlines(&span.children));
            out.push_str(close);
        }
        Inline::Verbatim(verbatim) => {
            let delimiter = verbatim.marker.delimiter();
            out.push_str(delimiter);
            out.push_str(&verbatim.text);
            out.push_str(delimiter);
        }
        Inline::Link(link) => out.push_str(&link_source(link)),
        Inline::Image(image) => out.push_str(&image_source(image)),
        Inline::Tag(name) => {
            out.push('@');
            out.push_str(name);
        }
        Inline::Anchor(name) => {
            out.push_str("##");
            out.push_str(name);
        }
    }
}

fn link_source(link: &Link) -> String {
    match (&link.style, &link.text) {
        (LinkStyle::Bare, _) => link.target.clone(),
        (LinkStyle::Bracketed, Some(text)) if *text != link.target => {
            format!("[[{}|{text}]]", link.target)
        }
        (LinkStyle::Bracketed, _) => format!("[[{}]]", link.target),
    }
}

fn image_source(image: &Image) -> String {
    let mut source = format!("{{{{{}", image.src);
    let options = encode_image_options(image);
    if !options.is_empty() {
        source.push('?');
        source.push_str(&options);
    }
    if let Some(alt) = &image.alt {
        source.push('|');
        source.push_str(alt);
    }
    source.push_str("}}");
    source
}
