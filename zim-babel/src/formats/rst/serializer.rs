//! reStructuredText serialization

use crate::common::Linker;
use crate::options::DumpOptions;
use zim_parser::zim::ast::{
    plain_text, Block, Document, Image, Inline, ItemMarker, Link, LinkKind, List, ListKind,
    NumberStyle, SpanStyle, Table,
};

const HEADING_UNDERLINE: [char; 4] = ['=', '-', '^', '"'];
const INDENT: &str = "    ";

/// Escape inline markup characters. With `line_start`, list and comment markers at the
/// start of a line are escaped too.
pub fn escape_rst(text: &str, line_start: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let mut escaped = String::with_capacity(line.len());
        for c in line.chars() {
            if matches!(c, '\\' | '*' | '`' | '_' | '|') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        if line_start || n > 0 {
            escaped = escape_line_start(&escaped);
        }
        out.push_str(&escaped);
    }
    out
}

fn escape_line_start(line: &str) -> String {
    let body = line.trim_start_matches(' ');
    let lead = &line[..line.len() - body.len()];
    if body.starts_with(['-', '+', '#']) || body.starts_with("..") {
        return format!("{lead}\\{body}");
    }
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && body[digits..].starts_with(['.', ')']) {
        return format!("{lead}{}\\{}", &body[..digits], &body[digits..]);
    }
    line.to_string()
}

pub fn serialize_rst(doc: &Document, options: &DumpOptions) -> String {
    let mut writer = RstWriter {
        linker: Linker::new(options, "rst"),
        substitutions: Vec::new(),
    };
    let mut out = String::new();
    for block in &doc.blocks {
        writer.block(&mut out, block);
    }

    if !writer.substitutions.is_empty() {
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
        for definition in &writer.substitutions {
            out.push_str(definition);
        }
    }
    out
}

fn indent_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{prefix}{line}\n")
            }
        })
        .collect()
}

struct RstWriter<'a> {
    linker: Linker<'a>,
    /// `.. |name| image::` definitions for images inside text
    substitutions: Vec<String>,
}

impl RstWriter<'_> {
    fn block(&mut self, out: &mut String, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let level = usize::from(heading.level.clamp(1, 4));
                let text = self.inlines(&heading.content, false, false);
                let underline: String = std::iter::repeat(HEADING_UNDERLINE[level - 1])
                    .take(text.chars().count().max(1))
                    .collect();
                out.push_str(&format!("{text}\n{underline}\n"));
            }
            Block::Paragraph(paragraph) => self.paragraph(out, &paragraph.content, ""),
            Block::Indented(indented) => {
                self.paragraph(out, &indented.content, &INDENT.repeat(indented.indent))
            }
            Block::List(list) => self.list(out, list, 0),
            Block::Verbatim(verbatim) => {
                let prefix = INDENT.repeat(verbatim.indent + 1);
                out.push_str("::\n\n");
                out.push_str(&indent_lines(&verbatim.text, &prefix));
                out.push('\n');
            }
            Block::Object(object) => {
                let prefix = INDENT.repeat(object.indent + 1);
                match (object.object_type.as_str(), object.attribute("lang")) {
                    ("code", Some(lang)) => out.push_str(&format!(".. code-block:: {lang}\n\n")),
                    _ => out.push_str("::\n\n"),
                }
                out.push_str(&indent_lines(&object.body, &prefix));
                out.push('\n');
            }
            Block::Table(table) => self.table(out, table),
            Block::HorizontalRule => out.push_str("\n----------\n\n"),
            Block::BlankLines(count) => out.push_str(&"\n".repeat(*count)),
        }
    }

    fn paragraph(&mut self, out: &mut String, content: &[Inline], prefix: &str) {
        let images_only = content.iter().any(|i| matches!(i, Inline::Image(_)))
            && content.iter().all(|inline| match inline {
                Inline::Image(_) => true,
                Inline::Text(text) => text.trim().is_empty(),
                _ => false,
            });
        if images_only {
            let directives: Vec<String> = content
                .iter()
                .filter_map(|inline| match inline {
                    Inline::Image(image) => Some(self.image_directive(image, "image::")),
                    _ => None,
                })
                .collect();
            out.push_str(&indent_lines(&directives.join("\n"), prefix));
            return;
        }
        let text = self.inlines(content, true, false);
        out.push_str(&indent_lines(&text, prefix));
    }

    fn list(&mut self, out: &mut String, list: &List, indent: usize) {
        let pad = " ".repeat(indent);
        let mut number = match list.kind {
            ListKind::Numbered { start, .. } => start,
            _ => 1,
        };
        for item in &list.items {
            let bullet = match (&item.marker, list.kind) {
                (ItemMarker::Bullet, _) => "-".to_string(),
                (ItemMarker::Checkbox(state), _) => format!("- {}", state.symbol()),
                (ItemMarker::Number(_), ListKind::Numbered { style, .. }) => {
                    format!("{}.", style.label(number))
                }
                (ItemMarker::Number(_), _) => format!("{}.", NumberStyle::Arabic.label(number)),
            };
            number += 1;
            let text = self.inlines(&item.content, false, false).replace('\n', " ");
            out.push_str(&format!("{pad}{bullet} {text}\n"));

            // Nested lists line up with the item text, checkbox symbol included.
            let child_indent = indent + bullet.chars().count() + 1;
            for child in &item.children {
                out.push('\n');
                self.list(out, child, child_indent);
                out.push('\n');
            }
        }
    }

    /// A grid table. Cells holding line breaks span several lines of their row.
    fn table(&mut self, out: &mut String, table: &Table) {
        let mut rows: Vec<Vec<Vec<String>>> = Vec::new();
        for row in std::iter::once(table.header()).chain(table.rows().iter().map(Vec::as_slice)) {
            let cells = row
                .iter()
                .map(|cell| {
                    self.inlines(cell, false, false)
                        .split('\n')
                        .map(str::to_string)
                        .collect()
                })
                .collect();
            rows.push(cells);
        }

        let widths: Vec<usize> = (0..table.column_count())
            .map(|col| {
                rows.iter()
                    .flat_map(|row| row[col].iter())
                    .map(|line| line.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(1)
            })
            .collect();
        let border = |fill: char| -> String {
            let parts: Vec<String> = widths
                .iter()
                .map(|w| std::iter::repeat(fill).take(w + 2).collect())
                .collect();
            format!("+{}+\n", parts.join("+"))
        };

        out.push_str(&border('-'));
        for (n, row) in rows.iter().enumerate() {
            let height = row.iter().map(Vec::len).max().unwrap_or(1);
            for line in 0..height {
                let cells: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, width)| {
                        let text = cell.get(line).map_or("", String::as_str);
                        let pad = width - text.chars().count();
                        format!(" {text}{} ", " ".repeat(pad))
                    })
                    .collect();
                out.push_str(&format!("|{}|\n", cells.join("|")));
            }
            out.push_str(&border(if n == 0 { '=' } else { '-' }));
        }
    }

    /// Inline content. `nested` is set inside bold and italic, where markup cannot nest.
    fn inlines(&mut self, content: &[Inline], line_start: bool, nested: bool) -> String {
        let mut out = String::new();
        for (i, inline) in content.iter().enumerate() {
            match inline {
                Inline::Text(text) => out.push_str(&escape_rst(text, line_start && i == 0)),
                Inline::Span(span) => {
                    let inner = self.inlines(&span.children, false, true);
                    if nested {
                        out.push_str(&inner);
                        continue;
                    }
                    match span.style {
                        SpanStyle::Bold => out.push_str(&format!("**{inner}**")),
                        SpanStyle::Italic => out.push_str(&format!("*{inner}*")),
                        SpanStyle::Underline | SpanStyle::Strike => out.push_str(&inner),
                        SpanStyle::Subscript => out.push_str(&role("sub", &span.children)),
                        SpanStyle::Superscript => out.push_str(&role("sup", &span.children)),
                    }
                }
                Inline::Verbatim(verbatim) if nested => out.push_str(&escape_rst(&verbatim.text, false)),
                Inline::Verbatim(verbatim) => out.push_str(&format!("``{}``", verbatim.text)),
                Inline::Link(link) if nested => out.push_str(&escape_rst(link.display(), false)),
                Inline::Link(link) => out.push_str(&self.link(link)),
                Inline::Image(image) => {
                    let name = format!("image{}", self.substitutions.len() + 1);
                    let definition = self.image_directive(image, &format!("|{name}| image::"));
                    self.substitutions.push(definition);
                    out.push_str(&format!("|{name}|"));
                }
                Inline::Tag(name) => {
                    out.push('@');
                    out.push_str(&escape_rst(name, false));
                }
                Inline::Anchor(_) if nested => {}
                Inline::Anchor(name) => out.push_str(&format!("_`{name}`")),
            }
        }
        out
    }

    fn link(&self, link: &Link) -> String {
        let href = self.linker.link(&link.target);
        let text = link.display();
        if text == href && LinkKind::classify(&href) == LinkKind::Url {
            return href;
        }
        let text = text.replace('`', "\\`").replace('<', "\\<");
        format!("`{text} <{href}>`__")
    }

    /// `.. image:: src` with its options, one per line.
    fn image_directive(&self, image: &Image, directive: &str) -> String {
        let mut text = format!(".. {directive} {}\n", self.linker.img(&image.src));
        if let Some(alt) = image.alt.as_deref().filter(|alt| !alt.is_empty()) {
            text.push_str(&format!("   :alt: {alt}\n"));
        }
        if let Some(height) = image.height.filter(|h| *h > 0) {
            text.push_str(&format!("   :height: {height}\n"));
        }
        if let Some(href) = &image.href {
            text.push_str(&format!("   :target: {}\n", self.linker.link(href)));
        }
        if let Some(width) = image.width.filter(|w| *w > 0) {
            text.push_str(&format!("   :width: {width}\n"));
        }
        text
    }
}

/// `:sub:` and `:sup:` roles, escaped from the surrounding words with `\ `.
fn role(name: &str, content: &[Inline]) -> String {
    let text = plain_text(content).replace('`', "\\`");
    format!("\\ :{name}:`{text}`\\ ")
}
