//! Markdown serialization

use crate::common::table::{column_widths, row_line, separator_line};
use crate::common::Linker;
use crate::options::DumpOptions;
use zim_parser::zim::ast::{
    Alignment, Block, Document, Image, Inline, ItemMarker, Link, LinkKind, List, ListKind,
    SpanStyle, Table,
};

/// Escape inline metacharacters. With `line_start`, block markers at the start of the text
/// and after every line break are escaped too.
pub fn escape_markdown(text: &str, line_start: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let mut escaped = escape_inline(line);
        if line_start || n > 0 {
            escaped = escape_block_marker(&escaped);
        }
        out.push_str(&escaped);
    }
    out
}

fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' | '~' | '^' | '|' => {
                out.push('\\');
                out.push(c);
            }
            '&' if matches!(chars.peek(), Some(next) if next.is_alphanumeric() || *next == '#') => {
                out.push_str("\\&");
            }
            other => out.push(other),
        }
    }
    out
}

/// Escape `#`, `-`, `+`, `=` or an ordered list marker at the start of a line.
fn escape_block_marker(line: &str) -> String {
    let body = line.trim_start_matches(' ');
    let lead = &line[..line.len() - body.len()];
    if body.starts_with(['#', '-', '+', '=']) {
        return format!("{lead}\\{body}");
    }
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && body[digits..].starts_with(['.', ')']) {
        return format!("{lead}{}\\{}", &body[..digits], &body[digits..]);
    }
    line.to_string()
}

pub fn serialize_markdown(doc: &Document, options: &DumpOptions) -> String {
    let writer = MarkdownWriter {
        linker: Linker::new(options, "md"),
    };
    let mut out = String::new();
    for block in &doc.blocks {
        writer.block(&mut out, block);
    }
    out
}

struct MarkdownWriter<'a> {
    linker: Linker<'a>,
}

impl MarkdownWriter<'_> {
    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let marks = "#".repeat(usize::from(heading.level.clamp(1, 5)));
                out.push_str(&format!(
                    "{marks} {}\n",
                    self.inlines(&heading.content, None, false)
                ));
            }
            Block::Paragraph(paragraph) => {
                out.push_str(&self.text_block(&paragraph.content));
                out.push('\n');
            }
            Block::Indented(indented) => {
                out.push_str(&self.text_block(&indented.content));
                out.push('\n');
            }
            Block::List(list) => self.list(out, list, 0),
            Block::Verbatim(verbatim) => out.push_str(&fenced(&verbatim.text, "")),
            Block::Object(object) => {
                out.push_str(&fenced(&object.body, object.attribute("lang").unwrap_or("")))
            }
            Block::Table(table) => self.table(out, table),
            Block::HorizontalRule => out.push_str("*****\n"),
            Block::BlankLines(count) => out.push_str(&"\n".repeat(*count)),
        }
    }

    /// Paragraph text, with zim line breaks as Markdown hard breaks.
    fn text_block(&self, content: &[Inline]) -> String {
        self.inlines(content, None, true).replace('\n', "\\\n")
    }

    fn list(&self, out: &mut String, list: &List, depth: usize) {
        let pad = "    ".repeat(depth);
        let mut number = match list.kind {
            ListKind::Numbered { start, .. } => start,
            _ => 1,
        };
        for item in &list.items {
            let bullet = match &item.marker {
                ItemMarker::Bullet => "*".to_string(),
                ItemMarker::Checkbox(state) => format!("* {}", state.symbol()),
                ItemMarker::Number(_) => format!("{number}."),
            };
            number += 1;
            let text = self.inlines(&item.content, None, false).replace('\n', " ");
            out.push_str(&format!("{pad}{bullet} {text}\n"));
            for child in &item.children {
                self.list(out, child, depth + 1);
            }
        }
    }

    fn table(&self, out: &mut String, table: &Table) {
        let cell = |content: &[Inline]| self.inlines(content, None, false).replace('\n', "<br>");
        let mut rows: Vec<Vec<String>> = vec![table.header().iter().map(|c| cell(c)).collect()];
        rows.extend(
            table
                .rows()
                .iter()
                .map(|row| row.iter().map(|c| cell(c)).collect()),
        );
        let mut widths = column_widths(&rows);
        widths.resize(table.column_count(), 0);
        for width in &mut widths {
            *width = (*width).max(1);
        }
        let aligns: Vec<Alignment> = table.columns().iter().map(|c| c.align).collect();

        out.push_str(&row_line(&rows[0], &widths, &aligns));
        out.push('\n');
        out.push_str(&separator_line(&widths, &aligns));
        out.push('\n');
        for row in &rows[1..] {
            out.push_str(&row_line(row, &widths, &aligns));
            out.push('\n');
        }
    }

    fn inlines(&self, content: &[Inline], parent: Option<SpanStyle>, line_start: bool) -> String {
        let mut out = String::new();
        for (i, inline) in content.iter().enumerate() {
            match inline {
                Inline::Text(text) => out.push_str(&escape_markdown(text, line_start && i == 0)),
                Inline::Span(span) => {
                    let inner = self.inlines(&span.children, Some(span.style), false);
                    let (open, close) = match span.style {
                        SpanStyle::Bold => ("**", "**"),
                        SpanStyle::Italic if needs_underscore(parent, &span.children) => ("_", "_"),
                        SpanStyle::Italic => ("*", "*"),
                        SpanStyle::Underline => ("<u>", "</u>"),
                        SpanStyle::Strike => ("~~", "~~"),
                        SpanStyle::Subscript if touches_strike(parent, content, i) => {
                            ("<sub>", "</sub>")
                        }
                        SpanStyle::Subscript => ("~", "~"),
                        SpanStyle::Superscript => ("^", "^"),
                    };
                    out.push_str(open);
                    out.push_str(&inner);
                    out.push_str(close);
                }
                Inline::Verbatim(verbatim) => out.push_str(&code_span(&verbatim.text)),
                Inline::Link(link) => out.push_str(&self.link(link)),
                Inline::Image(image) => out.push_str(&self.image(image)),
                Inline::Tag(name) => {
                    out.push('@');
                    out.push_str(&escape_inline(name));
                }
                Inline::Anchor(name) => out.push_str(&format!("<a id=\"{name}\"></a>")),
            }
        }
        out
    }

    fn link(&self, link: &Link) -> String {
        let href = self.linker.link(&link.target);
        let text = link.display();
        if text == href && LinkKind::classify(&href) == LinkKind::Url {
            format!("<{href}>")
        } else {
            format!("[{}]({})", escape_inline(text), destination(&href))
        }
    }

    fn image(&self, image: &Image) -> String {
        let src = self.linker.img(&image.src);
        let alt = escape_inline(image.alt.as_deref().unwrap_or_default());
        let graphic = format!("![{alt}]({})", destination(&src));
        match &image.href {
            Some(href) => format!("[{graphic}]({})", destination(&self.linker.link(href))),
            None => graphic,
        }
    }
}

/// Italic next to bold is written with `_`, so the markers cannot merge into `***`.
fn needs_underscore(parent: Option<SpanStyle>, children: &[Inline]) -> bool {
    parent == Some(SpanStyle::Bold)
        || children
            .iter()
            .any(|child| matches!(child, Inline::Span(span) if span.style == SpanStyle::Bold))
}

/// A `~x~` subscript inside or next to `~~strike~~` runs the tildes together.
fn touches_strike(parent: Option<SpanStyle>, content: &[Inline], i: usize) -> bool {
    let is_strike =
        |inline: &Inline| matches!(inline, Inline::Span(span) if span.style == SpanStyle::Strike);
    let children = match &content[i] {
        Inline::Span(span) => span.children.as_slice(),
        _ => &[],
    };
    parent == Some(SpanStyle::Strike)
        || i.checked_sub(1).and_then(|j| content.get(j)).is_some_and(is_strike)
        || content.get(i + 1).is_some_and(is_strike)
        || children.first().is_some_and(is_strike)
        || children.last().is_some_and(is_strike)
}

/// A link destination, wrapped in angle brackets when it holds spaces or parentheses.
fn destination(href: &str) -> String {
    if href.contains([' ', '(', ')']) {
        format!("<{}>", href.replace('<', "%3C").replace('>', "%3E"))
    } else {
        href.to_string()
    }
}

/// Longest run of `c` in `text`.
fn longest_run(text: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn code_span(text: &str) -> String {
    let fence = "`".repeat(longest_run(text, '`') + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

fn fenced(text: &str, info: &str) -> String {
    let fence = "`".repeat(longest_run(text, '`').max(2) + 1);
    let mut out = format!("{fence}{info}\n{text}");
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zim_parser::zim::parsing::{parse_document, ParseOptions};

    fn markdown(source: &str) -> String {
        let doc = parse_document(source, &ParseOptions::default());
        serialize_markdown(&doc, &DumpOptions::default())
    }

    #[test]
    fn test_headings_and_emphasis() {
        assert_eq!(
            markdown("====== Title ======\n**b** //i// ~~s~~ x_{2} x^{2}\n"),
            "# Title\n**b** *i* ~~s~~ x~2~ x^2^\n"
        );
    }

    #[test]
    fn test_italic_next_to_bold_uses_underscore() {
        assert_eq!(markdown("**//both//**\n"), "**_both_**\n");
        assert_eq!(markdown("//**both**//\n"), "_**both**_\n");
    }

    #[test]
    fn test_subscript_next_to_strike_uses_html() {
        use zim_parser::zim::ast::{Block, Document, Paragraph};

        let sub = || Inline::span(SpanStyle::Subscript, vec![Inline::text("2")]);
        let strike = |children| Inline::span(SpanStyle::Strike, children);
        let render = |content| {
            let doc = Document::new(vec![Block::Paragraph(Paragraph { content })]);
            serialize_markdown(&doc, &DumpOptions::default())
        };

        assert_eq!(
            render(vec![strike(vec![Inline::text("a"), sub()])]),
            "~~a<sub>2</sub>~~\n"
        );
        assert_eq!(
            render(vec![strike(vec![Inline::text("a")]), sub()]),
            "~~a~~<sub>2</sub>\n"
        );
        assert_eq!(render(vec![Inline::text("x"), sub()]), "x~2~\n");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            escape_markdown("a*b_c [x] <y> & &amp;", false),
            "a\\*b\\_c \\[x\\] \\<y\\> & \\&amp;"
        );
        assert_eq!(escape_markdown("# not heading", true), "\\# not heading");
        assert_eq!(escape_markdown("1. not a list", true), "1\\. not a list");
        assert_eq!(escape_markdown("# mid line", false), "# mid line");
    }

    #[test]
    fn test_line_breaks_are_hard() {
        assert_eq!(markdown("one\ntwo\n"), "one\\\ntwo\n");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            markdown("* a\n\t[ ] b\n\t[x] c\n* d\n\nc. three\nd. four\n"),
            "* a\n    * \u{2610} b\n    * \u{2611} c\n* d\n\n3. three\n4. four\n"
        );
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            markdown("https://zim-wiki.org [[Projects:Zim|the page]] {{./a b.png|pic}}\n"),
            "<https://zim-wiki.org> [the page](Projects/Zim.md) ![pic](<./a b.png>)\n"
        );
    }

    #[test]
    fn test_code() {
        assert_eq!(markdown("''a`b''\n"), "``a`b``\n");
        assert_eq!(
            markdown("'''\nfn main() {}\n'''\n"),
            "```\nfn main() {}\n```\n"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            markdown("| a | b |\n|:-:|---|\n| x\\ny | z\\|w |\n"),
            "|   a    | b    |\n|:------:|------|\n| x<br>y | z\\|w |\n"
        );
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(markdown("-----\n"), "*****\n");
    }
}
