//! HTML serialization

use crate::common::Linker;
use crate::options::DumpOptions;
use html_escape::encode_quoted_attribute;
use std::collections::HashSet;
use zim_parser::zim::ast::{
    heading_to_anchor, plain_text, Alignment, Block, Document, Image, Inline, ItemMarker, Link,
    List, ListKind, NumberStyle, SpanStyle, Table,
};

pub fn serialize_html(doc: &Document, options: &DumpOptions) -> String {
    let mut writer = HtmlWriter {
        out: String::new(),
        linker: Linker::new(options, "html"),
        options,
        ids: doc.anchors().into_iter().collect(),
    };
    for block in &doc.blocks {
        writer.block(block);
    }

    if options.standalone {
        let title = doc.title().unwrap_or_default();
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape(&title),
            writer.out
        )
    } else {
        writer.out
    }
}

/// Escape `&`, `<`, `>` and both quote characters. Used for text and attribute values.
fn escape(text: &str) -> String {
    encode_quoted_attribute(text).into_owned()
}

/// Escaped text with line breaks as `<br>` and leading tabs as non-breaking spaces.
fn encode_text(text: &str) -> String {
    let mut out = String::new();
    for (n, line) in escape(text).split('\n').enumerate() {
        if n > 0 {
            out.push_str("<br>\n");
        }
        let body = line.trim_start_matches('\t');
        let tabs = line.len() - body.len();
        out.push_str(&"&nbsp;".repeat(tabs * 4));
        out.push_str(body);
    }
    out
}

fn padding(indent: usize) -> String {
    if indent == 0 {
        String::new()
    } else {
        format!(" style=\"padding-left: {}pt\"", 30 * indent)
    }
}

struct HtmlWriter<'a> {
    out: String,
    linker: Linker<'a>,
    options: &'a DumpOptions,
    /// Ids taken by `##anchors` and by headings handed out so far
    ids: HashSet<String>,
}

impl HtmlWriter<'_> {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let level = heading.level.clamp(1, 5);
                let content = self.inlines(&heading.content);
                match self.heading_id(&plain_text(&heading.content)) {
                    Some(id) => self.out.push_str(&format!(
                        "<h{level} id=\"{}\">{content}</h{level}>\n",
                        escape(&id)
                    )),
                    None => self
                        .out
                        .push_str(&format!("<h{level}>{content}</h{level}>\n")),
                }
            }
            Block::Paragraph(paragraph) => {
                let content = self.inlines(&paragraph.content);
                self.out.push_str(&format!("<p>\n{content}\n</p>\n"));
            }
            Block::Indented(indented) => {
                let content = self.inlines(&indented.content);
                self.out.push_str(&format!(
                    "<div{}>\n{content}\n</div>\n",
                    padding(indented.indent)
                ));
            }
            Block::List(list) => self.list(list, true),
            Block::Verbatim(verbatim) => {
                let text = self.preformatted(&verbatim.text);
                self.out.push_str(&format!(
                    "<pre{}>\n{text}</pre>\n",
                    padding(verbatim.indent)
                ));
            }
            Block::Object(object) => {
                let text = self.preformatted(&object.body);
                self.out.push_str(&format!(
                    "<pre class=\"zim-object\" data-type=\"{}\"{}>\n{text}</pre>\n",
                    escape(&object.object_type),
                    padding(object.indent)
                ));
            }
            Block::Table(table) => self.table(table),
            Block::HorizontalRule => self.out.push_str("<hr>\n"),
            Block::BlankLines(_) => {}
        }
    }

    /// A unique id for a heading, or `None` when the text yields no usable characters.
    fn heading_id(&mut self, text: &str) -> Option<String> {
        let slug = heading_to_anchor(text);
        if slug.is_empty() {
            return None;
        }
        let mut id = slug.clone();
        let mut n = 0;
        while self.ids.contains(&id) {
            n += 1;
            id = format!("{slug}-{n}");
        }
        self.ids.insert(id.clone());
        Some(id)
    }

    fn preformatted(&self, text: &str) -> String {
        let escaped = escape(text);
        if !self.options.line_numbers {
            return escaped;
        }
        let count = escaped.lines().count();
        let width = count.to_string().len();
        escaped
            .lines()
            .enumerate()
            .map(|(i, line)| {
                format!(
                    "<span class=\"lineno\">{:>width$}</span> {line}\n",
                    i + 1
                )
            })
            .collect()
    }

    fn list(&mut self, list: &List, top_level: bool) {
        let style = if top_level {
            padding(list.indent)
        } else {
            String::new()
        };
        let (open, close) = match list.kind {
            ListKind::Bullet => (format!("<ul{style}>"), "</ul>"),
            ListKind::Checkbox => (format!("<ul class=\"checklist\"{style}>"), "</ul>"),
            ListKind::Numbered { style: numbers, start } => {
                let kind = match numbers {
                    NumberStyle::Arabic => "1",
                    NumberStyle::LowerAlpha => "a",
                    NumberStyle::UpperAlpha => "A",
                };
                let start = if start == 1 {
                    String::new()
                } else {
                    format!(" start=\"{start}\"")
                };
                (format!("<ol type=\"{kind}\"{start}{style}>"), "</ol>")
            }
        };
        self.out.push_str(&open);
        self.out.push('\n');
        for item in &list.items {
            match &item.marker {
                ItemMarker::Checkbox(state) => self
                    .out
                    .push_str(&format!("<li class=\"{}\">", state.class_name())),
                _ => self.out.push_str("<li>"),
            }
            let content = self.inlines(&item.content);
            self.out.push_str(&content);
            if !item.children.is_empty() {
                self.out.push('\n');
                for child in &item.children {
                    self.list(child, false);
                }
            }
            self.out.push_str("</li>\n");
        }
        self.out.push_str(close);
        self.out.push('\n');
    }

    fn table(&mut self, table: &Table) {
        let aligns: Vec<Alignment> = table.columns().iter().map(|c| c.align).collect();
        self.out.push_str("<table>\n<thead>\n<tr>");
        for (cell, align) in table.header().iter().zip(&aligns) {
            let content = self.inlines(cell);
            self.out
                .push_str(&format!("<th{}>{content}</th>", align_style(*align)));
        }
        self.out.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in table.rows() {
            self.out.push_str("<tr>");
            for (cell, align) in row.iter().zip(&aligns) {
                let content = self.inlines(cell);
                self.out
                    .push_str(&format!("<td{}>{content}</td>", align_style(*align)));
            }
            self.out.push_str("</tr>\n");
        }
        self.out.push_str("</tbody>\n</table>\n");
    }

    fn inlines(&self, content: &[Inline]) -> String {
        let mut out = String::new();
        for inline in content {
            match inline {
                Inline::Text(text) => out.push_str(&encode_text(text)),
                Inline::Span(span) => {
                    let tag = span_tag(span.style);
                    out.push_str(&format!("<{tag}>{}</{tag}>", self.inlines(&span.children)));
                }
                Inline::Verbatim(verbatim) => {
                    out.push_str(&format!("<code>{}</code>", escape(&verbatim.text)))
                }
                Inline::Link(link) => out.push_str(&self.link(link)),
                Inline::Image(image) => out.push_str(&self.image(image)),
                Inline::Tag(name) => out.push_str(&format!(
                    "<span class=\"zim-tag\">@{}</span>",
                    escape(name)
                )),
                Inline::Anchor(name) => {
                    out.push_str(&format!("<a id=\"{}\"></a>", escape(name)))
                }
            }
        }
        out
    }

    fn link(&self, link: &Link) -> String {
        let href = self.linker.link(&link.target);
        let text = escape(link.display());
        format!(
            "<a href=\"{}\" title=\"{text}\">{text}</a>",
            escape(&href)
        )
    }

    fn image(&self, image: &Image) -> String {
        let src = self.linker.img(&image.src);
        let mut tag = format!(
            "<img src=\"{}\" alt=\"{}\"",
            escape(&src),
            escape(image.alt.as_deref().unwrap_or_default())
        );
        if let Some(width) = image.width.filter(|w| *w > 0) {
            tag.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(height) = image.height.filter(|h| *h > 0) {
            tag.push_str(&format!(" height=\"{height}\""));
        }
        if let Some(id) = &image.id {
            tag.push_str(&format!(" id=\"{}\"", escape(id)));
        }
        tag.push('>');
        match &image.href {
            Some(href) => format!("<a href=\"{}\">{tag}</a>", escape(&self.linker.link(href))),
            None => tag,
        }
    }
}

fn span_tag(style: SpanStyle) -> &'static str {
    match style {
        SpanStyle::Bold => "strong",
        SpanStyle::Italic => "em",
        SpanStyle::Underline => "u",
        SpanStyle::Strike => "s",
        SpanStyle::Subscript => "sub",
        SpanStyle::Superscript => "sup",
    }
}

fn align_style(align: Alignment) -> &'static str {
    match align {
        Alignment::Default => "",
        Alignment::Left => " style=\"text-align: left\"",
        Alignment::Center => " style=\"text-align: center\"",
        Alignment::Right => " style=\"text-align: right\"",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zim_parser::zim::parsing::{parse_document, ParseOptions};

    fn html(source: &str) -> String {
        let doc = parse_document(source, &ParseOptions::default());
        serialize_html(&doc, &DumpOptions::default())
    }

    #[test]
    fn test_paragraph_escapes_text() {
        assert_eq!(
            html("a < b & \"c\"\nnext\n"),
            "<p>\na &lt; b &amp; &quot;c&quot;<br>\nnext\n</p>\n"
        );
    }

    #[test]
    fn test_inline_spans() {
        assert_eq!(
            html("**b** //i// __u__ ~~s~~ x_{2} x^{2} ''<c>''\n"),
            "<p>\n<strong>b</strong> <em>i</em> <u>u</u> <s>s</s> x<sub>2</sub> x<sup>2</sup> <code>&lt;c&gt;</code>\n</p>\n"
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        assert_eq!(
            html("== Notes ==\n== Notes ==\n== Notes ==\n"),
            "<h5 id=\"notes\">Notes</h5>\n<h5 id=\"notes-1\">Notes</h5>\n<h5 id=\"notes-2\">Notes</h5>\n"
        );
    }

    #[test]
    fn test_heading_id_avoids_inline_anchor() {
        assert_eq!(
            html("see ##notes\n== Notes ==\n"),
            "<p>\nsee <a id=\"notes\"></a>\n</p>\n<h5 id=\"notes-1\">Notes</h5>\n"
        );
    }

    #[test]
    fn test_checkbox_and_numbered_lists() {
        assert_eq!(
            html("[ ] open\n[x] done\n\n3. three\n4. four\n"),
            "<ul class=\"checklist\">\n<li class=\"unchecked\">open</li>\n<li class=\"checked\">done</li>\n</ul>\n<ol type=\"1\" start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            html("* a\n\t* b\n* c\n"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n<li>c</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_links_use_linker() {
        assert_eq!(
            html("[[Projects:Zim|the project]] me@zim.org\n"),
            "<p>\n<a href=\"Projects/Zim.html\" title=\"the project\">the project</a> <a href=\"mailto:me@zim.org\" title=\"me@zim.org\">me@zim.org</a>\n</p>\n"
        );
    }

    #[test]
    fn test_image_attributes() {
        assert_eq!(
            html("{{./a.png?width=40|An \"a\"}}\n"),
            "<p>\n<img src=\"./a.png\" alt=\"An &quot;a&quot;\" width=\"40\">\n</p>\n"
        );
    }

    #[test]
    fn test_verbatim_line_numbers() {
        let doc = parse_document("'''\none\ntwo\n'''\n", &ParseOptions::default());
        let options = DumpOptions {
            line_numbers: true,
            ..DumpOptions::default()
        };
        assert_eq!(
            serialize_html(&doc, &options),
            "<pre>\n<span class=\"lineno\">1</span> one\n<span class=\"lineno\">2</span> two\n</pre>\n"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            html("| a | b |\n|:--|---|\n| 1 | 2 |\n"),
            "<table>\n<thead>\n<tr><th style=\"text-align: left\">a</th><th>b</th></tr>\n</thead>\n<tbody>\n<tr><td style=\"text-align: left\">1</td><td>2</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_standalone_document() {
        let doc = parse_document("====== A & B ======\n", &ParseOptions::default());
        let options = DumpOptions {
            standalone: true,
            ..DumpOptions::default()
        };
        let out = serialize_html(&doc, &options);
        assert!(out.starts_with("<!DOCTYPE html>\n"));
        assert!(out.contains("<title>A &amp; B</title>"));
        assert!(out.contains("<h1 id=\"a--b\">A &amp; B</h1>"));
        assert!(out.ends_with("</body>\n</html>\n"));
    }
}
